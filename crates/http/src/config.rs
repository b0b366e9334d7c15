//! HTTP client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the REST collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL of the ArogyaShayak API, e.g. `http://localhost:5000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every request.
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// Hospitals requested per search page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_page_size() -> u32 {
    12
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            page_size: default_page_size(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Creates a configuration for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the search page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the parsed base URL.
    pub fn parsed_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.parsed_base_url() {
            Ok(url) if url.cannot_be_a_base() => {
                errors.push(format!("base_url '{}' cannot be a base URL", self.base_url));
            }
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push(format!(
                    "base_url scheme must be http or https, got '{}'",
                    url.scheme()
                ));
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("invalid base_url '{}': {}", self.base_url, e)),
        }

        if self.request_timeout.is_zero() {
            errors.push("request_timeout cannot be 0".to_string());
        }

        if self.page_size == 0 {
            errors.push("page_size cannot be 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Configuration for tests against a local server.
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }
}

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
