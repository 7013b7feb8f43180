//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication provider rejected or failed the request
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// User input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client-local storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error with message
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Input rejected before it reaches any state holder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Department, year, or semester not selected.
    #[error("Please select department, year, and semester")]
    IncompleteScope,

    /// A required student field is empty.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

/// Sign-in failures reported by the session gate.
///
/// Provider messages are carried verbatim so they can be shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    ProviderError(String),

    #[error("Something went wrong. Please try again.")]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_passes_provider_message_through() {
        let err = AuthError::InvalidCredentials("Invalid login credentials".to_string());
        assert_eq!(err.to_string(), "Invalid login credentials");

        let app_err = AppError::from(err);
        assert_eq!(app_err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_unknown_auth_error_uses_fallback() {
        assert_eq!(AuthError::Unknown.to_string(), "Something went wrong. Please try again.");
    }

    #[test]
    fn test_missing_field_names_field() {
        let err = ValidationError::MissingRequiredField { field: "email" };
        assert_eq!(err.to_string(), "Missing required field: email");
    }
}
