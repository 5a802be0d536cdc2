//! CLI command definitions and dispatch.

pub mod admin;
pub mod auth;
pub mod config;
pub mod evolution;
pub mod patient;
pub mod photo;
pub mod profile;
pub mod summary;

use clap::{Parser, Subcommand};
use tracing::debug;

use woundcare_auth::SessionContext;
use woundcare_core::config::AppConfig;
use woundcare_core::error::AppError;
use woundcare_gateway::Gateway;
use woundcare_service::AppServices;

use crate::output::OutputFormat;

/// Environment variable selecting the `config/{env}` overlay.
pub const ENV_VAR: &str = "WOUNDCARE_ENV";
/// Environment variable holding the login email.
pub const EMAIL_VAR: &str = "WOUNDCARE_EMAIL";
/// Environment variable holding the login password (skips the prompt).
pub const PASSWORD_VAR: &str = "WOUNDCARE_PASSWORD";

/// WoundCare: wound care records for clinicians
#[derive(Debug, Parser)]
#[command(name = "woundcare", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (extension optional)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Login email (falls back to WOUNDCARE_EMAIL, then a prompt)
    #[arg(short, long, global = true)]
    pub email: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Account registration and session checks
    Auth(auth::AuthArgs),
    /// The signed-in professional's profile
    Profile(profile::ProfileArgs),
    /// Patient records
    Patient(patient::PatientArgs),
    /// Clinical evolutions and their materials
    Evolution(evolution::EvolutionArgs),
    /// Wound photos
    Photo(photo::PhotoArgs),
    /// Dashboard counters
    Summary,
    /// Professional administration (admin role)
    Admin(admin::AdminArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let email = self.email.as_deref();
        match &self.command {
            Commands::Auth(args) => auth::execute(args, &self.config, email, self.format).await,
            Commands::Profile(args) => {
                profile::execute(args, &self.config, email, self.format).await
            }
            Commands::Patient(args) => {
                patient::execute(args, &self.config, email, self.format).await
            }
            Commands::Evolution(args) => {
                evolution::execute(args, &self.config, email, self.format).await
            }
            Commands::Photo(args) => photo::execute(args, &self.config, email, self.format).await,
            Commands::Summary => summary::execute(&self.config, email, self.format).await,
            Commands::Admin(args) => admin::execute(args, &self.config, email, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, overlay and environment
pub(crate) fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    debug!(path = %config_path, env = %env, "Loading configuration");
    AppConfig::load(config_path, &env)
}

/// Helper: wire the services to the configured remote gateway
pub(crate) fn connect(config: &AppConfig) -> Result<AppServices, AppError> {
    let gateway = Gateway::connect(&config.gateway)?;
    Ok(AppServices::new(&gateway, config.storage.clone()))
}

/// Helper: load config, connect and sign in
pub(crate) async fn open_session(
    config_path: &str,
    email: Option<&str>,
) -> Result<(AppServices, SessionContext), AppError> {
    let config = load_config(config_path)?;
    let services = connect(&config)?;
    let context = sign_in(&services, email).await?;
    Ok((services, context))
}

/// Helper: sign in with the given, configured or prompted credentials
pub(crate) async fn sign_in(
    services: &AppServices,
    email: Option<&str>,
) -> Result<SessionContext, AppError> {
    let email = resolve_email(email)?;
    let password = match std::env::var(PASSWORD_VAR) {
        Ok(p) if !p.is_empty() => p,
        _ => prompt_password("Password")?,
    };
    services.sessions.sign_in(&email, &password).await
}

/// Helper: email from the flag, the environment, or a prompt
pub(crate) fn resolve_email(email: Option<&str>) -> Result<String, AppError> {
    if let Some(email) = email {
        return Ok(email.to_string());
    }
    match std::env::var(EMAIL_VAR) {
        Ok(e) if !e.is_empty() => Ok(e),
        _ => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e))),
    }
}

/// Helper: hidden password prompt
pub(crate) fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}

/// Helper: optional free-text prompt, `None` when left empty
pub(crate) fn prompt_optional(prompt: &str) -> Result<Option<String>, AppError> {
    let value: String = dialoguer::Input::new()
        .with_prompt(format!("{} (optional, press Enter to skip)", prompt))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;
    Ok(if value.trim().is_empty() {
        None
    } else {
        Some(value)
    })
}
