//! Professional (clinician profile) entities.

pub mod model;

pub use model::{NewProfessional, Professional, ProfessionalUpdate};
