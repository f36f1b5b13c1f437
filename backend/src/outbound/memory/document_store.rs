//! Document store holding the `users`, `modules` and
//! `certifications` collections in memory.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, CertificationPersistenceError,
    CertificationRepository, ConditionalInsert, ModulePersistenceError, ModuleRepository,
    SeedingResult,
};
use crate::domain::{
    AccountId, Certification, CertificationDraft, CertificationId, ModuleCompletion, ModuleId,
    TrainingModule, TrainingModuleDraft, UserAccount,
};

/// In-memory document store.
///
/// Collections keep insertion order. Ids for modules and certifications are
/// generated on insert; account ids come from the identity provider.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    users: Mutex<Vec<UserAccount>>,
    modules: Mutex<Vec<TrainingModule>>,
    certifications: Mutex<Vec<Certification>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, collection: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex
        .lock()
        .map_err(|_| format!("{collection} collection lock poisoned"))
}

fn update_account(
    users: &mut [UserAccount],
    id: &AccountId,
    apply: impl FnOnce(&mut UserAccount),
) -> Option<UserAccount> {
    let account = users.iter_mut().find(|account| account.id() == id)?;
    apply(account);
    Some(account.clone())
}

#[async_trait]
impl AccountRepository for InMemoryDocumentStore {
    async fn insert_if_empty(
        &self,
        account: &UserAccount,
    ) -> Result<ConditionalInsert, AccountPersistenceError> {
        let mut users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        if !users.is_empty() {
            return Ok(ConditionalInsert::Rejected);
        }
        users.push(account.clone());
        Ok(ConditionalInsert::Inserted)
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), AccountPersistenceError> {
        let mut users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        if users.iter().any(|existing| existing.id() == account.id()) {
            return Err(AccountPersistenceError::duplicate(account.id().to_string()));
        }
        users.push(account.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AccountId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        Ok(users.iter().find(|account| account.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, AccountPersistenceError> {
        let users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        Ok(users.clone())
    }

    async fn add_course(
        &self,
        id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let mut users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        Ok(update_account(&mut users, id, |account| {
            account.courses_mut().enroll(module_id.clone());
        }))
    }

    async fn remove_course(
        &self,
        id: &AccountId,
        module_id: &ModuleId,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let mut users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        Ok(update_account(&mut users, id, |account| {
            account.courses_mut().withdraw(module_id);
        }))
    }

    async fn set_admin(
        &self,
        id: &AccountId,
        is_admin: bool,
    ) -> Result<Option<UserAccount>, AccountPersistenceError> {
        let mut users = lock(&self.users, "users").map_err(AccountPersistenceError::query)?;
        Ok(update_account(&mut users, id, |account| {
            account.set_admin(is_admin);
        }))
    }
}

#[async_trait]
impl ModuleRepository for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<TrainingModule>, ModulePersistenceError> {
        let modules =
            lock(&self.modules, "modules").map_err(ModulePersistenceError::query)?;
        Ok(modules.clone())
    }

    async fn find_by_id(
        &self,
        id: &ModuleId,
    ) -> Result<Option<TrainingModule>, ModulePersistenceError> {
        let modules =
            lock(&self.modules, "modules").map_err(ModulePersistenceError::query)?;
        Ok(modules.iter().find(|module| module.id() == id).cloned())
    }

    async fn record_completion(
        &self,
        id: &ModuleId,
        completion: ModuleCompletion,
    ) -> Result<Option<TrainingModule>, ModulePersistenceError> {
        let mut modules =
            lock(&self.modules, "modules").map_err(ModulePersistenceError::query)?;
        let Some(slot) = modules.iter_mut().find(|module| module.id() == id) else {
            return Ok(None);
        };
        let updated = slot.clone().with_completion(completion);
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn insert_all_if_empty(
        &self,
        drafts: Vec<TrainingModuleDraft>,
    ) -> Result<SeedingResult, ModulePersistenceError> {
        let mut modules =
            lock(&self.modules, "modules").map_err(ModulePersistenceError::query)?;
        if !modules.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }
        let inserted = drafts.len();
        modules.extend(
            drafts
                .into_iter()
                .map(|draft| draft.into_module(ModuleId::generate())),
        );
        Ok(SeedingResult::Applied { inserted })
    }
}

#[async_trait]
impl CertificationRepository for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<Certification>, CertificationPersistenceError> {
        let certifications = lock(&self.certifications, "certifications")
            .map_err(CertificationPersistenceError::query)?;
        Ok(certifications.clone())
    }

    async fn insert_all_if_empty(
        &self,
        drafts: Vec<CertificationDraft>,
    ) -> Result<SeedingResult, CertificationPersistenceError> {
        let mut certifications = lock(&self.certifications, "certifications")
            .map_err(CertificationPersistenceError::query)?;
        if !certifications.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }
        let inserted = drafts.len();
        certifications.extend(
            drafts
                .into_iter()
                .map(|draft| draft.into_certification(CertificationId::generate())),
        );
        Ok(SeedingResult::Applied { inserted })
    }
}
