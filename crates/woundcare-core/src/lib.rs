//! # woundcare-core
//!
//! Core crate for WoundCare. Contains the gateway traits implemented by
//! `woundcare-gateway`, configuration schemas, query types (filters and
//! sorting), the role model, and the unified error system.
//!
//! This crate has **no** internal dependencies on other WoundCare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
