//! Wound photo entities.

pub mod model;

pub use model::{NewWoundPhoto, WoundPhoto, WoundPhotoUpdate};
