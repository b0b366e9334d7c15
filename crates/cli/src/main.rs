//! ArogyaShayak CLI
//!
//! Hospital search, type-ahead suggestions and care trip planning from the terminal.

use arogya_cli::commands::retry_hint;
use arogya_cli::{CliConfig, init_logging, run};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    debug!(command = ?config.command, "Starting arogya");
    if let Err(err) = run(config).await {
        eprintln!("Error: {:#}", err);
        if let Some(hint) = retry_hint(&err) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
    Ok(())
}
