//! Session gate: the single source of truth for the current session.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::AuthError;

use super::provider::AuthProvider;
use super::session::Session;

/// Fixed path appended to the redirect origin for OAuth sign-in.
pub const OAUTH_REDIRECT_PATH: &str = "/select-department";

/// Build the post-auth redirect target from an origin.
pub fn redirect_target(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), OAUTH_REDIRECT_PATH)
}

/// Wraps the auth provider and publishes session changes to subscribers.
///
/// Cloning is cheap; all clones share the same session state.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    current: Arc<watch::Sender<Option<Session>>>,
}

impl SessionGate {
    pub fn new(provider: Arc<dyn AuthProvider>, initial: Option<Session>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            provider,
            current: Arc::new(tx),
        }
    }

    /// Create the gate, checking once for a session left from a previous run.
    pub async fn start(provider: Arc<dyn AuthProvider>) -> Self {
        let initial = match provider.restore_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                None
            }
        };

        if let Some(session) = &initial {
            tracing::info!("Restored session for {}", session.account_label());
        }

        Self::new(provider, initial)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Please enter valid credentials".to_string(),
            ));
        }

        let session = self.provider.sign_in_with_password(email, password).await?;
        tracing::info!("Signed in as {}", session.account_label());
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Start a redirect-based sign-in and return the URL to open.
    ///
    /// Completion is observed through the session subscription once
    /// [`complete_external_sign_in`](Self::complete_external_sign_in) runs.
    pub fn sign_in_with_external_provider(&self, provider_name: &str, redirect_to: &str) -> Result<String, AuthError> {
        let url = self.provider.authorize_url(provider_name, redirect_to)?;
        tracing::info!("Starting {} sign-in, redirecting to {}", provider_name, redirect_to);
        Ok(url)
    }

    /// Finish a redirect-based sign-in from the link the browser landed on.
    pub async fn complete_external_sign_in(&self, callback_url: &str) -> Result<Session, AuthError> {
        let session = self.provider.session_from_redirect(callback_url).await?;
        tracing::info!("Signed in as {} via redirect", session.account_label());
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Clear the current session. Remote revocation is best effort.
    pub async fn sign_out(&self) {
        let previous = self.current_session();
        self.publish(None);

        if let Some(session) = previous {
            tracing::info!("Signed out {}", session.account_label());
            if let Err(e) = self.provider.sign_out(&session).await {
                tracing::warn!("Remote sign-out failed: {}", e);
            }
        }
    }

    /// Replace the session, notifying subscribers only on an actual change.
    fn publish(&self, session: Option<Session>) {
        self.current.send_if_modified(|current| {
            if *current == session {
                false
            } else {
                *current = session;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct FakeProvider {
        restored: Option<Session>,
        sign_in_calls: AtomicUsize,
        sign_out_calls: AtomicUsize,
        fail_sign_out: bool,
        last_redirect: Mutex<Option<String>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                restored: None,
                sign_in_calls: AtomicUsize::new(0),
                sign_out_calls: AtomicUsize::new(0),
                fail_sign_out: false,
                last_redirect: Mutex::new(None),
            }
        }
    }

    fn session(email: &str) -> Session {
        Session {
            user_id: format!("id-{email}"),
            email: Some(email.to_string()),
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    #[async_trait]
    impl AuthProvider for FakeProvider {
        async fn restore_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.restored.clone())
        }

        async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            if email == "a@b.com" && password == "secret" {
                Ok(session(email))
            } else {
                Err(AuthError::InvalidCredentials("Invalid login credentials".to_string()))
            }
        }

        fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
            *self.last_redirect.lock().unwrap() = Some(redirect_to.to_string());
            Ok(format!("https://auth.test/authorize?provider={provider}"))
        }

        async fn session_from_redirect(&self, callback_url: &str) -> Result<Session, AuthError> {
            if callback_url.contains("access_token=") {
                Ok(session("oauth@b.com"))
            } else {
                Err(AuthError::ProviderError("The redirect link does not contain a session".to_string()))
            }
        }

        async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_sign_out {
                Err(AuthError::Unknown)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(
            redirect_target("http://localhost:3000/"),
            "http://localhost:3000/select-department"
        );
    }

    #[tokio::test]
    async fn test_start_without_session() {
        let gate = SessionGate::start(Arc::new(FakeProvider::new())).await;
        assert!(!gate.is_signed_in());
    }

    #[tokio::test]
    async fn test_start_restores_session() {
        let provider = FakeProvider {
            restored: Some(session("a@b.com")),
            ..FakeProvider::new()
        };
        let gate = SessionGate::start(Arc::new(provider)).await;
        assert_eq!(gate.current_session(), Some(session("a@b.com")));
    }

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let gate = SessionGate::new(Arc::new(FakeProvider::new()), None);
        let mut rx = gate.subscribe();

        let result = gate.sign_in("a@b.com", "secret").await;

        assert_eq!(result, Ok(session("a@b.com")));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(session("a@b.com")));
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_state() {
        let gate = SessionGate::new(Arc::new(FakeProvider::new()), None);
        let mut rx = gate.subscribe();

        let result = gate.sign_in("a@b.com", "wrong").await;

        assert_eq!(
            result,
            Err(AuthError::InvalidCredentials("Invalid login credentials".to_string()))
        );
        assert!(!rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_empty_credentials_skip_provider() {
        let provider = Arc::new(FakeProvider::new());
        let gate = SessionGate::new(provider.clone(), None);

        assert!(matches!(gate.sign_in("", "secret").await, Err(AuthError::InvalidCredentials(_))));
        assert!(matches!(gate.sign_in("a@b.com", "").await, Err(AuthError::InvalidCredentials(_))));
        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_same_session_not_republished() {
        let gate = SessionGate::new(Arc::new(FakeProvider::new()), None);
        gate.sign_in("a@b.com", "secret").await.unwrap();

        let mut rx = gate.subscribe();
        let _ = rx.borrow_and_update();
        gate.sign_in("a@b.com", "secret").await.unwrap();

        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let provider = Arc::new(FakeProvider::new());
        let gate = SessionGate::new(provider.clone(), Some(session("a@b.com")));
        let mut rx = gate.subscribe();

        gate.sign_out().await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);

        // Signing out again is a no-op
        gate.sign_out().await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_remote_fails() {
        let provider = FakeProvider {
            fail_sign_out: true,
            ..FakeProvider::new()
        };
        let gate = SessionGate::new(Arc::new(provider), Some(session("a@b.com")));

        gate.sign_out().await;
        assert!(!gate.is_signed_in());
    }

    #[tokio::test]
    async fn test_external_sign_in_completes_via_subscription() {
        let provider = Arc::new(FakeProvider::new());
        let gate = SessionGate::new(provider.clone(), None);
        let mut rx = gate.subscribe();

        let url = gate
            .sign_in_with_external_provider("google", &redirect_target("http://localhost:3000"))
            .unwrap();
        assert_eq!(url, "https://auth.test/authorize?provider=google");
        assert_eq!(
            provider.last_redirect.lock().unwrap().as_deref(),
            Some("http://localhost:3000/select-department")
        );
        assert!(!rx.has_changed().unwrap());

        gate.complete_external_sign_in("http://localhost:3000/select-department#access_token=abc")
            .await
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(session("oauth@b.com")));
    }

    #[tokio::test]
    async fn test_external_sign_in_error_passes_through() {
        let gate = SessionGate::new(Arc::new(FakeProvider::new()), None);
        let result = gate
            .complete_external_sign_in("http://localhost:3000/select-department")
            .await;

        assert_eq!(
            result,
            Err(AuthError::ProviderError(
                "The redirect link does not contain a session".to_string()
            ))
        );
        assert!(!gate.is_signed_in());
    }
}
