//! Patient entities.

pub mod gender;
pub mod model;

pub use gender::Gender;
pub use model::{NewPatient, Patient, PatientUpdate};
