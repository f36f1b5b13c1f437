//! Port for the `users` collection of the document store.

use async_trait::async_trait;

use crate::domain::{AccountId, ModuleId, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// A document with the same account id already exists.
        Duplicate { account_id: String } => "account {account_id} already exists",
    }
}

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalInsert {
    /// The precondition held and the document was written.
    Inserted,
    /// The precondition failed and nothing was written.
    Rejected,
}

/// Port for reading and writing user account documents.
///
/// Course updates are set operations: adding a present module or removing an
/// absent one succeeds without change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert `account` only when the collection holds no accounts.
    ///
    /// The emptiness check and the write must be atomic so that exactly one
    /// of several concurrent first registrations wins.
    async fn insert_if_empty(
        &self,
        account: &UserAccount,
    ) -> Result<ConditionalInsert, AccountPersistenceError>;

    /// Insert `account`, failing with `Duplicate` when its id is taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), AccountPersistenceError>;

    /// Fetch an account by id.
    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;

    /// Every account in insertion order.
    async fn list(&self) -> Result<Vec<UserAccount>, AccountPersistenceError>;

    /// Union `module_id` into the account's courses.
    ///
    /// Returns the updated account, or `None` when the account is missing.
    async fn add_course(
        &self,
        id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;

    /// Remove `module_id` from the account's courses.
    ///
    /// Returns the updated account, or `None` when the account is missing.
    async fn remove_course(
        &self,
        id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;

    /// Set the admin flag, returning the updated account when it exists.
    async fn set_admin(
        &self,
        id: &AccountId,
        is_admin: bool,
    ) -> Result<Option<UserAccount>, AccountPersistenceError>;
}
