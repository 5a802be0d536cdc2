//! Clinical evolutions and their materials.

pub mod service;

pub use service::EvolutionService;
