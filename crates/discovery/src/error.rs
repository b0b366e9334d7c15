//! Error types for the discovery engine.
//!
//! Errors are split in two layers:
//!
//! - [`CollaboratorError`] is what a remote collaborator (hospital catalog, travel
//!   estimator, accommodation finder) returns when a call fails.
//! - [`DiscoveryError`] is what the engine components surface to their caller. Each
//!   variant corresponds to one [`ErrorKind`], and the kind decides whether the failure
//!   is shown to the user or absorbed.
//!
//! # Propagation Policy
//!
//! | Kind | Raised by | User visible |
//! |------|-----------|--------------|
//! | `FetchFailed` | search page fetch | yes, retryable |
//! | `SuggestionFailed` | type-ahead lookup | no |
//! | `PlanGenerationFailed` | travel estimate | yes, retryable |
//! | `AccommodationLookupFailed` | nearby stays lookup | no, plan degrades |
//! | `Validation` | caller input | yes |

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

/// The error type for engine operations.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A search page could not be fetched.
    #[error("failed to fetch page {page} for '{term}': {source}")]
    FetchFailed {
        term: String,
        page: u32,
        #[source]
        source: CollaboratorError,
    },

    /// A type-ahead lookup failed. Never shown to the user.
    #[error("suggestion lookup for '{input}' failed: {source}")]
    SuggestionFailed {
        input: String,
        #[source]
        source: CollaboratorError,
    },

    /// The travel estimate for a care plan could not be produced.
    #[error("failed to generate care plan from '{origin}': {source}")]
    PlanGenerationFailed {
        origin: String,
        #[source]
        source: CollaboratorError,
    },

    /// The nearby stays lookup failed. The plan proceeds without stays.
    #[error("accommodation lookup failed: {source}")]
    AccommodationLookupFailed {
        #[source]
        source: CollaboratorError,
    },

    /// Caller supplied input that the operation cannot accept.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors for invalid caller input or configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    /// A configuration value is out of range.
    #[error("invalid configuration for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// An operation was requested in a state that does not accept it.
    #[error("cannot {operation} while {state}")]
    InvalidState { operation: String, state: String },
}

/// Errors returned by remote collaborators.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The request never produced a response (connection refused, timeout, DNS).
    #[error("transport error calling {service}: {message}")]
    Transport { service: String, message: String },

    /// The remote answered with a non-success status.
    #[error("{service} responded with status {status}: {message}")]
    Status {
        service: String,
        status: u16,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("could not decode {service} response: {message}")]
    Decode { service: String, message: String },

    /// The collaborator is not available in this deployment.
    #[error("{service} is unavailable")]
    Unavailable { service: String },
}

impl CollaboratorError {
    /// Returns the name of the service that failed.
    pub fn service(&self) -> &str {
        match self {
            CollaboratorError::Transport { service, .. }
            | CollaboratorError::Status { service, .. }
            | CollaboratorError::Decode { service, .. }
            | CollaboratorError::Unavailable { service } => service,
        }
    }

    /// Returns true if retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CollaboratorError::Transport { .. } | CollaboratorError::Unavailable { .. } => true,
            CollaboratorError::Status { status, .. } => *status >= 500 || *status == 429,
            CollaboratorError::Decode { .. } => false,
        }
    }
}

/// Classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Search page fetch failed.
    FetchFailed,
    /// Suggestion lookup failed.
    SuggestionFailed,
    /// Travel estimate failed.
    PlanGenerationFailed,
    /// Accommodation lookup failed.
    AccommodationLookupFailed,
    /// Invalid input.
    Validation,
}

impl ErrorKind {
    /// Returns true if failures of this kind are surfaced to the user.
    ///
    /// Enrichment failures (suggestions, nearby stays) are absorbed locally.
    pub fn is_user_visible(&self) -> bool {
        !matches!(
            self,
            ErrorKind::SuggestionFailed | ErrorKind::AccommodationLookupFailed
        )
    }

    /// Returns true if the user can retry the same action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::FetchFailed | ErrorKind::PlanGenerationFailed
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FetchFailed => write!(f, "fetch-failed"),
            ErrorKind::SuggestionFailed => write!(f, "suggestion-failed"),
            ErrorKind::PlanGenerationFailed => write!(f, "plan-generation-failed"),
            ErrorKind::AccommodationLookupFailed => write!(f, "accommodation-lookup-failed"),
            ErrorKind::Validation => write!(f, "validation"),
        }
    }
}

impl DiscoveryError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiscoveryError::FetchFailed { .. } => ErrorKind::FetchFailed,
            DiscoveryError::SuggestionFailed { .. } => ErrorKind::SuggestionFailed,
            DiscoveryError::PlanGenerationFailed { .. } => ErrorKind::PlanGenerationFailed,
            DiscoveryError::AccommodationLookupFailed { .. } => {
                ErrorKind::AccommodationLookupFailed
            }
            DiscoveryError::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// Result type alias for engine operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Result type alias for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
