//! Session state for the current browser client.
//!
//! DESIGN
//! ======
//! Fields are private so the invariants below hold by construction:
//!
//! - authenticated implies a user is present and the session was validated;
//! - no token implies neither authenticated nor validated.
//!
//! Every clear bumps `epoch`. A [`ValidationTicket`] remembers the epoch it was
//! issued under, so a validation that settles after a logout cannot resurrect
//! the session.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};

use super::validator::AuthError;

/// Identity confirmed by the remote authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable user identifier. Backends that use document ids send `_id`.
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "tenantId")]
    pub tenant_id: Option<String>,
}

impl UserIdentity {
    /// Identity carrying only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role: None,
            tenant_id: None,
        }
    }

    /// Best human-readable label: name, then email, then id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Handle for one in-flight validation, issued by [`SessionState::begin_validation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationTicket {
    token: String,
    epoch: u64,
}

impl ValidationTicket {
    /// The token being validated.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// What a settlement did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Identity confirmed; the session is authenticated.
    Authenticated,
    /// Validation failed; the session was cleared.
    Cleared,
    /// The session changed while the request was in flight; nothing applied.
    Stale,
}

/// Authentication state shared by the route guard and user-aware components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
    is_authenticated: bool,
    is_loading: bool,
    session_validated: bool,
    user: Option<UserIdentity>,
    epoch: u64,
}

impl SessionState {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn session_validated(&self) -> bool {
        self.session_validated
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Adopt a token read from persisted storage. Blank tokens are ignored, and
    /// a session that already holds a token keeps it.
    pub fn restore_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if self.token.is_some() || token.trim().is_empty() {
            return;
        }
        self.token = Some(token);
        self.is_authenticated = false;
        self.session_validated = false;
        self.user = None;
        debug_assert!(self.is_consistent());
    }

    /// Mark a validation as in flight. Returns `None` when there is no token
    /// to validate or a validation is already running.
    pub fn begin_validation(&mut self) -> Option<ValidationTicket> {
        if self.is_loading {
            return None;
        }
        let token = self.token.clone()?;
        self.is_loading = true;
        self.session_validated = false;
        self.is_authenticated = false;
        self.user = None;
        log::debug!("session validation started");
        Some(ValidationTicket { token, epoch: self.epoch })
    }

    /// Apply the outcome of the validation identified by `ticket`.
    pub fn settle(&mut self, ticket: &ValidationTicket, outcome: Result<UserIdentity, AuthError>) -> Settlement {
        if ticket.epoch != self.epoch || self.token.as_deref() != Some(ticket.token.as_str()) {
            log::debug!("discarding stale session validation");
            return Settlement::Stale;
        }
        let settlement = match outcome {
            Ok(user) => {
                log::debug!("session validated");
                self.user = Some(user);
                self.is_authenticated = true;
                self.session_validated = true;
                self.is_loading = false;
                Settlement::Authenticated
            }
            Err(err) => {
                log::warn!("session validation failed: {err}");
                self.clear();
                Settlement::Cleared
            }
        };
        debug_assert!(self.is_consistent());
        settlement
    }

    /// Explicit logout. Also applied by the global 401 handler.
    pub fn logout(&mut self) {
        if self.token.is_some() {
            log::info!("session logged out");
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.is_authenticated = false;
        self.is_loading = false;
        self.session_validated = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Whether the state satisfies the session invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let auth_ok = !self.is_authenticated || (self.user.is_some() && self.session_validated);
        let token_ok = self.token.is_some() || (!self.is_authenticated && !self.session_validated);
        auth_ok && token_ok
    }
}
