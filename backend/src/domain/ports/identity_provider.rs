//! Port for the external identity provider.
//!
//! The provider owns credentials and sessions. The application only sees
//! account ids, emails and session transitions.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::{AccountId, AuthSession, Credentials, SessionEvent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// An account already exists for this email.
        EmailInUse { email: String } => "email {email} is already registered",
        /// Email or password did not match.
        InvalidCredentials => "invalid email or password",
        /// Password was shorter than the provider accepts.
        WeakPassword { min_length: usize } =>
            "password must be at least {min_length} characters",
        /// The provider could not be reached.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

/// Port for registering users and managing their sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity and sign it in.
    async fn register(&self, credentials: &Credentials)
    -> Result<AuthSession, IdentityProviderError>;

    /// Sign in an existing identity.
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, IdentityProviderError>;

    /// End the session for `account_id`. Ending an absent session succeeds.
    async fn end_session(&self, account_id: &AccountId) -> Result<(), IdentityProviderError>;

    /// Subscribe to session transitions published after this call.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}
