//! Driving port for registration and sign-in use-cases.
//!
//! Inbound adapters call this port to create accounts and manage sessions
//! without importing the identity provider or the document store.

use async_trait::async_trait;

use crate::domain::{AccountId, Credentials, Error, UserAccount};

/// Domain use-case port for account sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountSessionCommand: Send + Sync {
    /// Register a new identity and create its account record.
    ///
    /// The first account ever created is an admin.
    async fn register(&self, credentials: &Credentials) -> Result<UserAccount, Error>;

    /// Authenticate and return the stored account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserAccount, Error>;

    /// End the session for `account_id`.
    async fn sign_out(&self, account_id: &AccountId) -> Result<(), Error>;
}
