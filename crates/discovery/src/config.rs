//! Engine configuration.
//!
//! [`DiscoveryConfig`] is resolved once at startup and passed into the components.
//! It can be built programmatically or loaded from JSON; durations use humantime
//! notation (`"300ms"`, `"1s"`).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use arogya_discovery::DiscoveryConfig;
//!
//! let config = DiscoveryConfig::from_json(r#"{ "debounce": "150ms", "default_radius": 8 }"#)?;
//! assert_eq!(config.debounce, Duration::from_millis(150));
//! assert_eq!(config.default_radius, 8.0);
//! assert_eq!(config.max_nearby_stays, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Configuration for the discovery engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Quiet window before a type-ahead lookup fires.
    #[serde(with = "humantime_serde", default = "default_debounce")]
    pub debounce: Duration,

    /// Radius around the hospital used for the nearby stays lookup.
    #[serde(default = "default_radius")]
    pub default_radius: f64,

    /// Maximum number of stays kept in a care plan.
    #[serde(default = "default_max_nearby_stays")]
    pub max_nearby_stays: usize,

    /// Nights of stay budgeted in the total estimate.
    #[serde(default = "default_stay_nights")]
    pub stay_nights: u32,
}

fn default_debounce() -> Duration {
    Duration::from_millis(300)
}

fn default_radius() -> f64 {
    5.0
}

fn default_max_nearby_stays() -> usize {
    3
}

fn default_stay_nights() -> u32 {
    3
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            debounce: default_debounce(),
            default_radius: default_radius(),
            max_nearby_stays: default_max_nearby_stays(),
            stay_nights: default_stay_nights(),
        }
    }
}

impl DiscoveryConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Sets the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the stay search radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.default_radius = radius;
        self
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !self.default_radius.is_finite() || self.default_radius <= 0.0 {
            errors.push(ValidationError::InvalidConfig {
                field: "default_radius".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        if self.max_nearby_stays == 0 {
            errors.push(ValidationError::InvalidConfig {
                field: "max_nearby_stays".to_string(),
                message: "cannot be 0".to_string(),
            });
        }

        if self.stay_nights == 0 {
            errors.push(ValidationError::InvalidConfig {
                field: "stay_nights".to_string(),
                message: "cannot be 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Configuration suited to tests: no debounce window.
    pub fn for_testing() -> Self {
        Self {
            debounce: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// Errors loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but is invalid.
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serde module for Duration with humantime format.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
