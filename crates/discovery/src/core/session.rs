//! Read-only view of the signed-in user.
//!
//! Components receive a [`SessionContext`] explicitly instead of reaching for
//! ambient state. The engine only reads it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Bearer token for API calls made on the user's behalf.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl UserIdentity {
    /// Creates an identity without a token.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            token: None,
        }
    }

    /// Sets the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Source of the current user.
pub trait SessionContext: Send + Sync {
    /// Returns the signed-in user, or `None` for anonymous use.
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Shared session handle.
pub type DynSession = Arc<dyn SessionContext>;

/// A session with nobody signed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSession;

impl SessionContext for AnonymousSession {
    fn current_user(&self) -> Option<UserIdentity> {
        None
    }
}

/// A session fixed to one user.
#[derive(Debug, Clone)]
pub struct StaticSession {
    user: UserIdentity,
}

impl StaticSession {
    /// Creates a session for `user`.
    pub fn new(user: UserIdentity) -> Self {
        Self { user }
    }
}

impl SessionContext for StaticSession {
    fn current_user(&self) -> Option<UserIdentity> {
        Some(self.user.clone())
    }
}
