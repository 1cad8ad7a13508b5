//! bedrock-inventory binary
//!
//! Checks private connectivity to Bedrock, lists the active foundation
//! models, and logs a summary of each.

use bedrock_inventory::cli::{Cli, Command, DEFAULT_CONFIG_PATH, generate_config_template};
use bedrock_inventory::config::{Config, DEFAULT_LOG_LEVEL};
use bedrock_inventory::connectivity::{ConnectivityCheck, SystemResolver};
use bedrock_inventory::{inventory, report, telemetry};
use clap::Parser;
use std::path::Path;
use tracing::Instrument;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                eprintln!("Wrote configuration template to {}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    // Load configuration; failures are logged at the default level
    let config = match Config::load(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            telemetry::init(DEFAULT_LOG_LEVEL);
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    // Initialize telemetry
    telemetry::init(&config.observability.log_level);

    let config = config
        .with_region_override(cli.region)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to apply region override"))?;

    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("inventory", %run_id, region = %config.service.region);

    let resolver = SystemResolver::new(config.resolve_timeout());
    let connectivity = ConnectivityCheck::new(&resolver, config.connectivity_hostname())
        .with_ranges(config.private_ranges());
    let client_config = config.client_config();

    report::run(inventory::list_foundation_models(&client_config, &connectivity))
        .instrument(span)
        .await?;

    Ok(())
}
