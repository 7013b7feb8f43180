//! Authenticated session issued by the hosted provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity token lifecycle owned by the session gate.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider account identifier.
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether the access token has passed its expiry time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Account label for display: the email when known, else the account id.
    pub fn account_label(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

// Tokens stay out of log output.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
