//! Hosted auth provider HTTP client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::storage::KeyValueStore;

use super::provider::AuthProvider;
use super::session::Session;

/// Key the current session is cached under in client-local storage.
pub const SESSION_KEY: &str = "auth.session";

/// Auth provider HTTP client.
///
/// Talks to a GoTrue-style REST interface (`/auth/v1/...`) and keeps the
/// issued session in client-local storage so it survives restarts.
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
    store: Arc<dyn KeyValueStore>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Tokens issued by the provider, from a token response or a redirect link.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IssuedTokens {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

impl AuthClient {
    /// Create a new client instance.
    pub fn new(config: &AuthConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            store,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{base}/auth/v1/{path}", base = self.base_url)
    }

    /// Look up the account behind an access token.
    async fn fetch_user(&self, access_token: &str) -> std::result::Result<UserPayload, AuthError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            tracing::warn!("Auth provider rejected user lookup ({})", status);
            return Err(provider_error(&body));
        }

        serde_json::from_str(&body).map_err(decode_error)
    }

    fn persist(&self, session: &Session) {
        let result = serde_json::to_string(session)
            .map_err(crate::error::AppError::from)
            .and_then(|raw| self.store.set(SESSION_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!("Failed to cache session: {}", e);
        }
    }

    fn forget(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::warn!("Failed to clear cached session: {}", e);
        }
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn restore_session(&self) -> std::result::Result<Option<Session>, AuthError> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!("Failed to read cached session: {}", e);
                return Ok(None);
            }
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable cached session: {}", e);
                self.forget();
                return Ok(None);
            }
        };

        if session.is_expired(Utc::now()) {
            tracing::info!("Cached session expired");
            self.forget();
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> std::result::Result<Session, AuthError> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            tracing::warn!("Password sign-in rejected ({})", status);
            return Err(provider_error(&body));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(decode_error)?;
        let session = session_from_tokens(
            token.user,
            IssuedTokens {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
                expires_in: token.expires_in,
            },
            Utc::now(),
        );
        self.persist(&session);
        Ok(session)
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> std::result::Result<String, AuthError> {
        let url = Url::parse_with_params(
            &self.endpoint("authorize"),
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| {
            tracing::warn!("Invalid authorize URL: {}", e);
            AuthError::Unknown
        })?;
        Ok(url.to_string())
    }

    async fn session_from_redirect(&self, callback_url: &str) -> std::result::Result<Session, AuthError> {
        let tokens = parse_redirect(callback_url)?;
        let user = self.fetch_user(&tokens.access_token).await?;
        let session = session_from_tokens(user, tokens, Utc::now());
        self.persist(&session);
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> std::result::Result<(), AuthError> {
        self.forget();

        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport_error)?;
            return Err(provider_error(&body));
        }
        Ok(())
    }
}

fn session_from_tokens(user: UserPayload, tokens: IssuedTokens, now: DateTime<Utc>) -> Session {
    Session {
        user_id: user.id,
        email: user.email,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_at: tokens.expires_in.map(|secs| now + TimeDelta::seconds(secs)),
    }
}

/// Map a provider error body to an [`AuthError`], keeping its message verbatim.
fn provider_error(body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty());
    let code = parsed.error_code.or(parsed.error);

    match code.as_deref() {
        Some("invalid_grant" | "invalid_credentials") => {
            AuthError::InvalidCredentials(message.unwrap_or_else(|| "Invalid login credentials".to_string()))
        }
        _ => message.map(AuthError::ProviderError).unwrap_or(AuthError::Unknown),
    }
}

fn transport_error(e: reqwest::Error) -> AuthError {
    tracing::warn!("Auth request failed: {}", e);
    AuthError::Unknown
}

fn decode_error(e: serde_json::Error) -> AuthError {
    tracing::warn!("Unexpected auth response: {}", e);
    AuthError::Unknown
}

/// Extract tokens (or the provider's error) from an OAuth redirect link.
///
/// Tokens arrive in the URL fragment; errors may arrive in either the query
/// or the fragment.
fn parse_redirect(callback_url: &str) -> std::result::Result<IssuedTokens, AuthError> {
    let mut url = Url::parse(callback_url.trim())
        .map_err(|_| AuthError::ProviderError("The redirect link is not a valid URL".to_string()))?;

    let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let fragment = url.fragment().unwrap_or_default().to_string();
    url.set_query(Some(&fragment));
    params.extend(url.query_pairs().into_owned());

    let find = |key: &str| {
        params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(description) = find("error_description").or_else(|| find("error")) {
        return Err(AuthError::ProviderError(description));
    }

    let access_token = find("access_token")
        .ok_or_else(|| AuthError::ProviderError("The redirect link does not contain a session".to_string()))?;

    Ok(IssuedTokens {
        access_token,
        refresh_token: find("refresh_token"),
        expires_in: find("expires_in").and_then(|v| v.parse().ok()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn client(store: Arc<MemoryStore>) -> AuthClient {
        let config = AuthConfig {
            url: "https://demo.supabase.co/".to_string(),
            api_key: "anon".to_string(),
            ..Default::default()
        };
        AuthClient::new(&config, store).unwrap()
    }

    fn cached(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: Some("a@b.com".to_string()),
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at,
        }
    }

    #[test]
    fn test_invalid_grant_maps_to_invalid_credentials() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            provider_error(body),
            AuthError::InvalidCredentials("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn test_error_code_body_maps_to_invalid_credentials() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(
            provider_error(body),
            AuthError::InvalidCredentials("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn test_other_errors_pass_message_through() {
        let body = r#"{"code":429,"error_code":"over_request_rate_limit","msg":"Request rate limit reached"}"#;
        assert_eq!(
            provider_error(body),
            AuthError::ProviderError("Request rate limit reached".to_string())
        );
    }

    #[test]
    fn test_unparseable_error_is_unknown() {
        assert_eq!(provider_error("<html>Bad Gateway</html>"), AuthError::Unknown);
        assert_eq!(provider_error(""), AuthError::Unknown);
    }

    #[test]
    fn test_authorize_url() {
        let client = client(Arc::new(MemoryStore::new()));
        let url = client
            .authorize_url("google", "http://localhost:3000/select-department")
            .unwrap();

        assert_eq!(
            url,
            "https://demo.supabase.co/auth/v1/authorize?provider=google&redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fselect-department"
        );
    }

    #[test]
    fn test_parse_redirect_fragment() {
        let tokens = parse_redirect(
            "http://localhost:3000/select-department#access_token=abc&expires_in=3600&refresh_token=def&token_type=bearer",
        )
        .unwrap();

        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
        assert_eq!(tokens.expires_in, Some(3600));
    }

    #[test]
    fn test_parse_redirect_error() {
        let result = parse_redirect(
            "http://localhost:3000/select-department?error=access_denied&error_description=Email+link+is+invalid",
        );
        assert_eq!(
            result,
            Err(AuthError::ProviderError("Email link is invalid".to_string()))
        );
    }

    #[test]
    fn test_parse_redirect_without_tokens() {
        assert!(matches!(
            parse_redirect("http://localhost:3000/select-department"),
            Err(AuthError::ProviderError(_))
        ));
        assert!(matches!(parse_redirect("not a url"), Err(AuthError::ProviderError(_))));
    }

    #[test]
    fn test_session_from_tokens_sets_expiry() {
        let now = Utc::now();
        let session = session_from_tokens(
            UserPayload {
                id: "user-1".to_string(),
                email: Some("a@b.com".to_string()),
            },
            IssuedTokens {
                access_token: "abc".to_string(),
                refresh_token: None,
                expires_in: Some(60),
            },
            now,
        );

        assert_eq!(session.expires_at, Some(now + TimeDelta::seconds(60)));
        assert_eq!(session.account_label(), "a@b.com");
    }

    #[tokio::test]
    async fn test_restore_cached_session() {
        let store = Arc::new(MemoryStore::new());
        let session = cached(Some(Utc::now() + TimeDelta::hours(1)));
        store
            .set(SESSION_KEY, &serde_json::to_string(&session).unwrap())
            .unwrap();

        let restored = client(store).restore_session().await.unwrap();
        assert_eq!(restored, Some(session));
    }

    #[tokio::test]
    async fn test_expired_session_is_discarded() {
        let store = Arc::new(MemoryStore::new());
        let session = cached(Some(Utc::now() - TimeDelta::hours(1)));
        store
            .set(SESSION_KEY, &serde_json::to_string(&session).unwrap())
            .unwrap();

        let restored = client(store.clone()).restore_session().await.unwrap();
        assert_eq!(restored, None);
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_no_cached_session() {
        let restored = client(Arc::new(MemoryStore::new())).restore_session().await.unwrap();
        assert_eq!(restored, None);
    }
}
