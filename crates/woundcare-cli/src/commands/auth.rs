//! Account registration and session commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;

/// Arguments for auth commands
#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Auth subcommand
    #[command(subcommand)]
    pub command: AuthCommand,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Register a new account
    Signup,
    /// Sign in and show who the session belongs to
    Whoami,
}

/// Execute auth commands
pub async fn execute(
    args: &AuthArgs,
    config_path: &str,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AuthCommand::Signup => {
            let config = super::load_config(config_path)?;
            let services = super::connect(&config)?;
            let email = super::resolve_email(email)?;

            let (password, confirmation) = match std::env::var(super::PASSWORD_VAR) {
                Ok(p) if !p.is_empty() => (p.clone(), p),
                _ => (
                    super::prompt_password("Password")?,
                    super::prompt_password("Confirm password")?,
                ),
            };

            let context = services
                .sessions
                .sign_up(&email, &password, &confirmation)
                .await?;

            output::print_success(&format!(
                "Account '{}' registered (id: {})",
                email, context.user_id
            ));
            println!("Run `woundcare profile create` to complete your professional profile.");
        }
        AuthCommand::Whoami => {
            let (services, context) = super::open_session(config_path, email).await?;
            match format {
                OutputFormat::Json => output::print_item(&context, format),
                OutputFormat::Table => {
                    output::print_kv("User ID", &context.user_id.to_string());
                    output::print_kv("Email", context.email.as_deref().unwrap_or("-"));
                    output::print_kv("Role", &context.role.to_string());
                }
            }
            services.sessions.sign_out().await?;
        }
    }

    Ok(())
}
