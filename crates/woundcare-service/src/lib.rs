//! # woundcare-service
//!
//! Business services for WoundCare. Each entity service keeps a local,
//! newest-first list mirrored from its remote table (see
//! [`store::EntityCollection`]) and patches it after every successful
//! mutation. The remote table always stays the system of record.
//!
//! Services take their gateway and [`woundcare_auth::SessionManager`] at
//! construction; [`AppServices`] wires them all to one gateway.

pub mod admin;
pub mod app;
pub mod dashboard;
pub mod evolution;
pub mod patient;
pub mod photo;
pub mod professional;
pub mod store;

mod validation;

pub use admin::AdminService;
pub use app::AppServices;
pub use dashboard::DashboardSummary;
pub use evolution::EvolutionService;
pub use patient::PatientService;
pub use photo::{PhotoDetails, WoundPhotoService};
pub use professional::ProfessionalService;
pub use store::{EntityCollection, LoadStatus};
