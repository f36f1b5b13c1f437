//! Driving port for admin-only account mutations.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, ModuleId, UserAccount};

/// Domain use-case port for enrollment and admin-flag changes.
///
/// Callers are responsible for checking that the acting user is an admin.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountAdminCommand: Send + Sync {
    /// Grant or revoke admin rights.
    async fn set_admin(&self, account_id: &AccountId, is_admin: bool)
    -> Result<UserAccount, Error>;

    /// Enroll the account in a module. Repeating the call changes nothing.
    async fn add_course(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, Error>;

    /// Withdraw the account from a module. Absent modules are a no-op.
    async fn remove_course(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, Error>;
}
