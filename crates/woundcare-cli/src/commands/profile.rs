//! Professional profile commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;
use woundcare_entity::professional::{NewProfessional, Professional, ProfessionalUpdate};

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in professional's profile
    Show,
    /// Create the profile for the signed-in account
    Create {
        /// Full name
        #[arg(long)]
        full_name: String,
        /// Council registration number
        #[arg(long)]
        registration: String,
        /// Specialty
        #[arg(long)]
        specialty: Option<String>,
        /// Institution
        #[arg(long)]
        institution: Option<String>,
        /// Phone
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update profile fields
    Update {
        /// Full name
        #[arg(long)]
        full_name: Option<String>,
        /// Council registration number
        #[arg(long)]
        registration: Option<String>,
        /// Specialty
        #[arg(long)]
        specialty: Option<String>,
        /// Institution
        #[arg(long)]
        institution: Option<String>,
        /// Phone
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Execute profile commands
pub async fn execute(
    args: &ProfileArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (services, context) = super::open_session(config_path, email).await?;

    match &args.command {
        ProfileCommand::Show => match services.professionals.refresh().await? {
            Some(profile) => print_profile(&profile, format),
            None => output::print_warning(
                "No profile yet. Run `woundcare profile create` to complete it.",
            ),
        },
        ProfileCommand::Create {
            full_name,
            registration,
            specialty,
            institution,
            phone,
        } => {
            let payload = NewProfessional {
                full_name: full_name.clone(),
                registration_number: registration.clone(),
                specialty: specialty.clone(),
                institution: institution.clone(),
                email: context.email.clone().unwrap_or_default(),
                phone: phone.clone(),
                photo_url: None,
                digital_signature: None,
            };
            let profile = services.professionals.create(payload).await?;
            output::print_success(&format!("Profile created for '{}'", profile.full_name));
        }
        ProfileCommand::Update {
            full_name,
            registration,
            specialty,
            institution,
            phone,
        } => {
            let update = ProfessionalUpdate {
                full_name: full_name.clone(),
                registration_number: registration.clone(),
                specialty: specialty.clone(),
                institution: institution.clone(),
                phone: phone.clone(),
                ..ProfessionalUpdate::default()
            };
            let profile = services.professionals.update(update).await?;
            output::print_success("Profile updated");
            print_profile(&profile, format);
        }
    }

    Ok(())
}

fn print_profile(profile: &Professional, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(profile, format),
        OutputFormat::Table => {
            output::print_kv("Name", &profile.full_name);
            output::print_kv("Registration", &profile.registration_number);
            output::print_kv("Specialty", &output::cell(&profile.specialty));
            output::print_kv("Institution", &output::cell(&profile.institution));
            output::print_kv("Email", &profile.email);
            output::print_kv("Phone", &output::cell(&profile.phone));
        }
    }
}
