//! Account registration, lookup and enrollment services.
//!
//! Registration applies the admin bootstrap rule: the first account record
//! written to an empty `users` collection is an admin, every later one is
//! not. The check and the write are delegated to the repository's
//! conditional insert so adapters with atomic writes close the race.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountAdminCommand, AccountPersistenceError, AccountRepository, AccountSessionCommand,
    AccountsQuery, ConditionalInsert, IdentityProvider, IdentityProviderError,
    ModulePersistenceError, ModuleRepository,
};
use crate::domain::{AccountId, AuthSession, Credentials, Error, ModuleId, UserAccount};

/// Errors raised by account services.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// The identity provider rejected or failed the request.
    #[error(transparent)]
    Identity(#[from] IdentityProviderError),
    /// The account store failed.
    #[error(transparent)]
    Accounts(#[from] AccountPersistenceError),
    /// The module catalogue failed.
    #[error(transparent)]
    Modules(#[from] ModulePersistenceError),
    /// No account record exists for the id.
    #[error("account {account_id} not found")]
    AccountNotFound {
        /// Missing account.
        account_id: AccountId,
    },
    /// No module exists for the id.
    #[error("module {module_id} not found")]
    ModuleNotFound {
        /// Missing module.
        module_id: ModuleId,
    },
}

impl From<AccountServiceError> for Error {
    fn from(value: AccountServiceError) -> Self {
        match value {
            AccountServiceError::Identity(err) => match err {
                IdentityProviderError::EmailInUse { .. } => Error::conflict(err.to_string()),
                IdentityProviderError::InvalidCredentials => Error::unauthorized(err.to_string()),
                IdentityProviderError::WeakPassword { .. } => {
                    Error::invalid_request(err.to_string())
                }
                IdentityProviderError::Unavailable { .. } => {
                    Error::service_unavailable(err.to_string())
                }
            },
            AccountServiceError::Accounts(err) => match err {
                AccountPersistenceError::Connection { .. } => {
                    Error::service_unavailable(err.to_string())
                }
                AccountPersistenceError::Query { .. } => Error::internal(err.to_string()),
                AccountPersistenceError::Duplicate { .. } => Error::conflict(err.to_string()),
            },
            AccountServiceError::Modules(err) => match err {
                ModulePersistenceError::Connection { .. } => {
                    Error::service_unavailable(err.to_string())
                }
                ModulePersistenceError::Query { .. } => Error::internal(err.to_string()),
            },
            err @ (AccountServiceError::AccountNotFound { .. }
            | AccountServiceError::ModuleNotFound { .. }) => Error::not_found(err.to_string()),
        }
    }
}

/// Service owning registration, sign-in and account reads.
#[derive(Clone)]
pub struct AccountService<I, A> {
    identity: Arc<I>,
    accounts: Arc<A>,
}

impl<I, A> AccountService<I, A> {
    /// Create a service over an identity provider and account store.
    pub fn new(identity: Arc<I>, accounts: Arc<A>) -> Self {
        Self { identity, accounts }
    }
}

impl<I, A> AccountService<I, A>
where
    I: IdentityProvider,
    A: AccountRepository,
{
    /// Register credentials and write the account record.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError`] when the provider or the store fails.
    /// A store failure after the provider accepted the registration leaves
    /// an identity without an account record; no compensation is attempted.
    pub async fn register_account(
        &self,
        credentials: &Credentials,
    ) -> Result<UserAccount, AccountServiceError> {
        let session = self.identity.register(credentials).await?;
        let (account_id, email) = (session.account_id().clone(), session.email().clone());

        let first = UserAccount::new(account_id.clone(), email.clone(), true);
        let account = match self.accounts.insert_if_empty(&first).await? {
            ConditionalInsert::Inserted => first,
            ConditionalInsert::Rejected => {
                let member = UserAccount::new(account_id, email, false);
                self.accounts.insert(&member).await?;
                member
            }
        };

        info!(
            account_id = %account.id(),
            is_admin = account.is_admin(),
            "registered account"
        );
        Ok(account)
    }

    /// Authenticate and load the account record.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::AccountNotFound`] when the provider
    /// knows the identity but no record exists.
    pub async fn sign_in_account(
        &self,
        credentials: &Credentials,
    ) -> Result<UserAccount, AccountServiceError> {
        let session = self.identity.authenticate(credentials).await?;
        self.account_for_session(&session).await
    }

    async fn account_for_session(
        &self,
        session: &AuthSession,
    ) -> Result<UserAccount, AccountServiceError> {
        match self.accounts.find_by_id(session.account_id()).await? {
            Some(account) => Ok(account),
            None => {
                warn!(account_id = %session.account_id(), "session without account record");
                Err(AccountServiceError::AccountNotFound {
                    account_id: session.account_id().clone(),
                })
            }
        }
    }

    /// End the provider session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Identity`] when the provider fails.
    pub async fn sign_out_account(&self, account_id: &AccountId) -> Result<(), AccountServiceError> {
        self.identity.end_session(account_id).await?;
        Ok(())
    }

    /// Fetch one account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::AccountNotFound`] for unknown ids.
    pub async fn account(&self, account_id: &AccountId) -> Result<UserAccount, AccountServiceError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AccountServiceError::AccountNotFound {
                account_id: account_id.clone(),
            })
    }

    /// Every account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Accounts`] when the store fails.
    pub async fn accounts(&self) -> Result<Vec<UserAccount>, AccountServiceError> {
        Ok(self.accounts.list().await?)
    }
}

#[async_trait]
impl<I, A> AccountSessionCommand for AccountService<I, A>
where
    I: IdentityProvider,
    A: AccountRepository,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserAccount, Error> {
        Ok(self.register_account(credentials).await?)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<UserAccount, Error> {
        Ok(self.sign_in_account(credentials).await?)
    }

    async fn sign_out(&self, account_id: &AccountId) -> Result<(), Error> {
        Ok(self.sign_out_account(account_id).await?)
    }
}

#[async_trait]
impl<I, A> AccountsQuery for AccountService<I, A>
where
    I: IdentityProvider,
    A: AccountRepository,
{
    async fn fetch_account(&self, account_id: &AccountId) -> Result<UserAccount, Error> {
        Ok(self.account(account_id).await?)
    }

    async fn list_accounts(&self) -> Result<Vec<UserAccount>, Error> {
        Ok(self.accounts().await?)
    }
}

/// Service applying enrollment and admin-flag changes.
#[derive(Clone)]
pub struct EnrollmentService<A, M> {
    accounts: Arc<A>,
    modules: Arc<M>,
}

impl<A, M> EnrollmentService<A, M> {
    /// Create a service over the account store and module catalogue.
    pub fn new(accounts: Arc<A>, modules: Arc<M>) -> Self {
        Self { accounts, modules }
    }
}

impl<A, M> EnrollmentService<A, M>
where
    A: AccountRepository,
    M: ModuleRepository,
{
    /// Union `module_id` into the account's courses.
    ///
    /// # Errors
    ///
    /// Returns `ModuleNotFound` for unknown modules and `AccountNotFound` for
    /// unknown accounts; neither case writes anything.
    pub async fn enroll(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, AccountServiceError> {
        if self.modules.find_by_id(module_id).await?.is_none() {
            return Err(AccountServiceError::ModuleNotFound {
                module_id: module_id.clone(),
            });
        }
        let account = self
            .accounts
            .add_course(account_id, module_id)
            .await?
            .ok_or_else(|| AccountServiceError::AccountNotFound {
                account_id: account_id.clone(),
            })?;
        info!(account_id = %account_id, module_id = %module_id, "course added");
        Ok(account)
    }

    /// Remove `module_id` from the account's courses.
    ///
    /// The module is not looked up so that stale ids can always be removed.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for unknown accounts.
    pub async fn withdraw(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, AccountServiceError> {
        let account = self
            .accounts
            .remove_course(account_id, module_id)
            .await?
            .ok_or_else(|| AccountServiceError::AccountNotFound {
                account_id: account_id.clone(),
            })?;
        info!(account_id = %account_id, module_id = %module_id, "course removed");
        Ok(account)
    }

    /// Grant or revoke admin rights.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for unknown accounts.
    pub async fn update_admin(
        &self,
        account_id: &AccountId,
        is_admin: bool,
    ) -> Result<UserAccount, AccountServiceError> {
        let account = self
            .accounts
            .set_admin(account_id, is_admin)
            .await?
            .ok_or_else(|| AccountServiceError::AccountNotFound {
                account_id: account_id.clone(),
            })?;
        info!(account_id = %account_id, is_admin, "admin flag updated");
        Ok(account)
    }
}

#[async_trait]
impl<A, M> AccountAdminCommand for EnrollmentService<A, M>
where
    A: AccountRepository,
    M: ModuleRepository,
{
    async fn set_admin(
        &self,
        account_id: &AccountId,
        is_admin: bool,
    ) -> Result<UserAccount, Error> {
        Ok(self.update_admin(account_id, is_admin).await?)
    }

    async fn add_course(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, Error> {
        Ok(self.enroll(account_id, module_id).await?)
    }

    async fn remove_course(
        &self,
        account_id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<UserAccount, Error> {
        Ok(self.withdraw(account_id, module_id).await?)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
