//! Headline numbers for the professional's home screen.

pub mod summary;

pub use summary::DashboardSummary;
