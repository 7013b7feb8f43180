use async_trait::async_trait;

use crate::error::AuthError;

use super::session::Session;

/// Hosted authentication provider, consumed as an opaque service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Session left over from a previous run, if still valid.
    async fn restore_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// URL that starts the redirect-based sign-in with `provider`.
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError>;

    /// Finish a redirect-based sign-in from the URL the browser landed on.
    async fn session_from_redirect(&self, callback_url: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}
