//! Professional administration commands (admin role only).

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;
use woundcare_entity::professional::Professional;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List registered professionals, newest first
    Professionals {
        /// Filter by name, email or registration number
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Remove a professional
    Remove {
        /// Professional ID
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Professional display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProfessionalRow {
    /// Professional ID
    id: String,
    /// Name
    name: String,
    /// Registration
    registration: String,
    /// Email
    email: String,
    /// Specialty
    specialty: String,
    /// Joined
    created_at: String,
}

impl From<&Professional> for ProfessionalRow {
    fn from(p: &Professional) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.full_name.clone(),
            registration: p.registration_number.clone(),
            email: p.email.clone(),
            specialty: output::cell(&p.specialty),
            created_at: p.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, context) = super::open_session(config_path, email).await?;
    context.require_admin()?;

    match &args.command {
        AdminCommand::Professionals { search } => {
            let rows: Vec<ProfessionalRow> = services
                .admin
                .list_professionals(search.as_deref())
                .await?
                .iter()
                .map(ProfessionalRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        AdminCommand::Remove { id, yes } => {
            if !yes && !super::patient::confirm(&format!("Remove professional {}?", id))? {
                output::print_warning("Aborted");
                return Ok(());
            }
            services.admin.remove_professional(*id).await?;
            output::print_success(&format!("Professional {} removed", id));
        }
    }

    Ok(())
}
