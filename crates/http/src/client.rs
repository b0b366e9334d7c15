//! Shared HTTP plumbing for the REST collaborators.
//!
//! [`ApiClient`] owns the `reqwest` client, resolves endpoint paths against the
//! configured base URL, attaches the signed-in user's bearer token and maps every
//! failure onto [`CollaboratorError`].

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use arogya_discovery::core::{AnonymousSession, DynSession};
use arogya_discovery::error::{CollaboratorError, CollaboratorResult};

use crate::config::HttpConfig;

/// Longest error body echoed into a [`CollaboratorError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

/// Errors building an [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configuration failed validation.
    #[error("invalid HTTP configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// A configured client for the ArogyaShayak API.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    page_size: u32,
    session: DynSession,
}

impl ApiClient {
    /// Builds a client that authenticates as the session's current user.
    pub fn new(config: &HttpConfig, session: DynSession) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::InvalidConfig)?;

        let mut base = config
            .parsed_base_url()
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base,
            page_size: config.page_size,
            session,
        })
    }

    /// Builds a client without a signed-in user.
    pub fn anonymous(config: &HttpConfig) -> Result<Self, ClientError> {
        Self::new(config, Arc::new(AnonymousSession))
    }

    /// Returns the base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Returns the configured search page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn endpoint(&self, service: &str, path: &str) -> CollaboratorResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| CollaboratorError::Transport {
                service: service.to_string(),
                message: format!("invalid endpoint '{}': {}", path, e),
            })
    }

    /// Sends a GET with query parameters and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> CollaboratorResult<T> {
        let url = self.endpoint(service, path)?;
        self.execute(service, self.http.get(url).query(query)).await
    }

    /// Sends a POST with a JSON body and decodes the JSON response.
    pub(crate) async fn post_json<B, T>(&self, service: &str, path: &str, body: &B) -> CollaboratorResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(service, path)?;
        self.execute(service, self.http.post(url).json(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        service: &str,
        request: RequestBuilder,
    ) -> CollaboratorResult<T> {
        let request = match self.session.current_user().and_then(|user| user.token) {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| transport(service, &e))?;
        let status = response.status();
        debug!(service, url = %response.url(), status = status.as_u16(), "API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            warn!(service, status = status.as_u16(), message = %message, "API call failed");
            return Err(CollaboratorError::Status {
                service: service.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| transport(service, &e))?;
        serde_json::from_slice(&bytes).map_err(|e| CollaboratorError::Decode {
            service: service.to_string(),
            message: e.to_string(),
        })
    }
}

fn transport(service: &str, err: &reqwest::Error) -> CollaboratorError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    CollaboratorError::Transport {
        service: service.to_string(),
        message,
    }
}

/// Extracts `message` (or `error`) from a JSON error body, else a trimmed prefix of the text.
fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(|m| m.as_str());
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }
    let text = body.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_ERROR_BODY).collect())
}
