//! Session gate over the hosted authentication provider.

pub mod client;
pub mod gate;
pub mod provider;
pub mod session;

pub use client::{AuthClient, SESSION_KEY};
pub use gate::{OAUTH_REDIRECT_PATH, SessionGate, redirect_target};
pub use provider::AuthProvider;
pub use session::Session;
