//! Command line configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AROGYA_API_URL` | http://localhost:5000 | API base URL |
//! | `AROGYA_LOG_LEVEL` | warn | Log level |
//! | `AROGYA_CONFIG` | - | JSON file with engine settings |
//! | `AROGYA_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `AROGYA_PAGE_SIZE` | 12 | Hospitals per search page |
//! | `AROGYA_TOKEN` | - | Bearer token of the signed-in user |

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use arogya_discovery::DiscoveryConfig;
use arogya_discovery::types::{Destination, GeoPoint};
use arogya_http::HttpConfig;

/// Command line interface for hospital discovery and care trip planning.
#[derive(Debug, Clone, Parser)]
#[command(name = "arogya")]
#[command(about = "Find hospitals and plan care trips with ArogyaShayak")]
#[command(version)]
pub struct CliConfig {
    /// API base URL.
    #[arg(long, env = "AROGYA_API_URL", default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "AROGYA_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// JSON file with engine settings (debounce, radius, stays).
    #[arg(long, env = "AROGYA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, env = "AROGYA_REQUEST_TIMEOUT", default_value = "30", global = true)]
    pub request_timeout: u64,

    /// Hospitals per search page.
    #[arg(long, env = "AROGYA_PAGE_SIZE", default_value = "12", global = true)]
    pub page_size: u32,

    /// Bearer token of the signed-in user.
    #[arg(long, env = "AROGYA_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search hospitals by name and specialty.
    Search(SearchArgs),
    /// Show type-ahead suggestions for a partial name.
    Suggest(SuggestArgs),
    /// Generate a care plan to a hospital.
    Plan(PlanArgs),
}

/// Arguments of `search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Hospital name or part of it.
    #[arg(default_value = "")]
    pub term: String,

    /// Restrict to a specialty.
    #[arg(short, long)]
    pub specialty: Option<String>,

    /// Number of pages to load.
    #[arg(short, long, default_value = "1", conflicts_with = "all")]
    pub pages: u32,

    /// Load every page.
    #[arg(long)]
    pub all: bool,
}

/// Arguments of `suggest`.
#[derive(Debug, Clone, Args)]
pub struct SuggestArgs {
    /// Text typed so far.
    pub text: String,
}

/// Arguments of `plan`.
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Where the patient travels from.
    #[arg(short, long)]
    pub origin: String,

    /// Hospital name.
    #[arg(long)]
    pub hospital: String,

    /// Hospital address.
    #[arg(long)]
    pub address: String,

    /// Hospital latitude; with `--lng`, nearby stays are included.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Hospital longitude.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
}

impl PlanArgs {
    /// Returns the destination described by the arguments.
    pub fn destination(&self) -> Destination {
        let destination = Destination::new(self.hospital.trim(), self.address.trim());
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => destination.with_location(GeoPoint::new(lat, lng)),
            _ => destination,
        }
    }
}

impl CliConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(http_errors) = self.http_config().validate() {
            errors.extend(http_errors);
        }

        match &self.command {
            Command::Search(args) if !args.all && args.pages == 0 => {
                errors.push("Pages cannot be 0".to_string());
            }
            Command::Plan(args) => {
                if args.hospital.trim().is_empty() {
                    errors.push("Hospital name cannot be empty".to_string());
                }
                if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
                    if !GeoPoint::new(lat, lng).is_valid() {
                        errors.push(format!("Location {},{} is out of range", lat, lng));
                    }
                }
            }
            _ => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns the HTTP client configuration.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout))
            .with_page_size(self.page_size)
    }

    /// Loads the engine configuration from `--config`, or the defaults.
    pub fn discovery_config(&self) -> anyhow::Result<DiscoveryConfig> {
        match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e)
                })?;
                Ok(DiscoveryConfig::from_json(&json)?)
            }
            None => Ok(DiscoveryConfig::default()),
        }
    }
}
