//! Driving port for reading account records.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, UserAccount};

/// Domain use-case port for account lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Fetch one account; unknown ids are `NotFound`.
    async fn fetch_account(&self, account_id: &AccountId) -> Result<UserAccount, Error>;

    /// Every account, for the admin dashboard.
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, Error>;
}
