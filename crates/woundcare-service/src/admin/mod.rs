//! Administrative operations over all professionals.

pub mod service;

pub use service::AdminService;
