//! The signed-in clinician's profile.

pub mod service;

pub use service::ProfessionalService;
