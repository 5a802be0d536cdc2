//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use woundcare_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (anon key masked)
    Show,
    /// Check that the configuration can reach a gateway
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(config_path)?;
            config.gateway.anon_key = config.gateway.masked_anon_key();
            match format {
                OutputFormat::Json => output::print_item(&config, format),
                OutputFormat::Table => {
                    output::print_kv("Gateway URL", config.gateway.base_url());
                    output::print_kv("Anon key", &config.gateway.anon_key);
                    output::print_kv(
                        "Request timeout",
                        &format!("{}s", config.gateway.request_timeout_seconds),
                    );
                    output::print_kv("Photo bucket", &config.storage.bucket);
                    output::print_kv("Photo prefix", &config.storage.photo_prefix);
                    output::print_kv(
                        "Max upload size",
                        &format!("{} bytes", config.storage.max_upload_size_bytes),
                    );
                    output::print_kv("Log level", &config.logging.level);
                    output::print_kv("Log format", &config.logging.format);
                }
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Gateway: {}", config.gateway.base_url());
                println!("  Bucket: {}", config.storage.bucket);
            }
            Err(e) => {
                eprintln!("✗ Configuration invalid: {}", e.message);
                return Err(e);
            }
        },
    }

    Ok(())
}
