//! # woundcare-entity
//!
//! Domain records for WoundCare. Every read model represents one row of a
//! remote table and implements [`woundcare_core::traits::Record`]; the
//! `New*` and `*Update` structs are the insert and partial-update payloads
//! sent to the gateway. Optional payload fields are omitted from the wire
//! when unset.

pub mod consultation;
pub mod evolution;
pub mod patient;
pub mod photo;
pub mod professional;
pub mod template;

pub use evolution::{ClinicalEvolution, Material, WoundAssessment};
pub use patient::{Gender, Patient};
pub use photo::WoundPhoto;
pub use professional::Professional;
