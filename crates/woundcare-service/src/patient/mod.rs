//! Patient registry.

pub mod service;

pub use service::PatientService;
