//! Clinical evolution entities and their materials.

pub mod assessment;
pub mod material;
pub mod model;

pub use assessment::WoundAssessment;
pub use material::{Material, NewMaterial};
pub use model::{ClinicalEvolution, EvolutionUpdate, NewEvolution};
