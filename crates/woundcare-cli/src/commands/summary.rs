//! Dashboard summary command.

use chrono::Local;

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;

/// Execute the summary command
pub async fn execute(
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, _context) = super::open_session(config_path, email).await?;
    let summary = services.dashboard(Local::now().date_naive()).await?;

    match format {
        OutputFormat::Json => output::print_item(&summary, format),
        OutputFormat::Table => {
            output::print_kv("Patients", &summary.patients.to_string());
            output::print_kv("Evolutions today", &summary.evolutions_today.to_string());
            output::print_kv("Photos", &summary.photos.to_string());
            output::print_kv("Pending patients", &summary.pending_patients.to_string());
        }
    }

    Ok(())
}
