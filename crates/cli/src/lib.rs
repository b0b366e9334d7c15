//! ArogyaShayak command line client.
//!
//! Wires the discovery engine to the REST collaborators:
//!
//! - `arogya search <term> [--specialty S] [--pages N | --all]`
//! - `arogya suggest <text>`
//! - `arogya plan --origin O --hospital H --address A [--lat L --lng L]`

pub mod commands;
pub mod config;

pub use commands::run;
pub use config::CliConfig;

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so command
/// output on stdout stays parseable.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "arogya_cli={level},arogya_discovery={level},arogya_http={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
