//! WoundCare: wound care records for clinicians.
//!
//! Entry point for the `woundcare` binary. Parses the command line, sets up
//! logging from the configuration and runs the selected command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use woundcare_cli::Cli;
use woundcare_core::config::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&logging_config(&cli.config));

    if let Err(e) = cli.execute().await {
        tracing::debug!(kind = %e.kind, "Command failed");
        eprintln!("Error: {}", e.message);
        std::process::exit(1);
    }
}

/// Logging settings from the configuration, or defaults when it cannot load.
///
/// A broken configuration is reported by the command itself.
fn logging_config(config_path: &str) -> LoggingConfig {
    let env = std::env::var(woundcare_cli::commands::ENV_VAR)
        .unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
        .map(|c| c.logging)
        .unwrap_or_default()
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
