//! Wound photo gallery: binary upload and metadata rows.

pub mod service;
pub mod upload;

pub use service::{PhotoDetails, WoundPhotoService};
