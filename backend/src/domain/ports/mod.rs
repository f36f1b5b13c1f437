//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (document stores and the identity provider), while driving ports describe
//! the use-cases inbound adapters call. Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod account_admin;
mod account_repository;
mod account_session;
mod accounts_query;
mod certification_repository;
mod content_seed;
mod identity_provider;
mod module_completion;
mod module_repository;
mod seeding;
mod training_query;

#[cfg(test)]
pub use account_admin::MockAccountAdminCommand;
pub use account_admin::AccountAdminCommand;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository, ConditionalInsert};
#[cfg(test)]
pub use account_session::MockAccountSessionCommand;
pub use account_session::AccountSessionCommand;
#[cfg(test)]
pub use accounts_query::MockAccountsQuery;
pub use accounts_query::AccountsQuery;
#[cfg(test)]
pub use certification_repository::MockCertificationRepository;
pub use certification_repository::{CertificationPersistenceError, CertificationRepository};
#[cfg(test)]
pub use content_seed::MockContentSeedCommand;
pub use content_seed::ContentSeedCommand;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use module_completion::MockModuleCompletionCommand;
pub use module_completion::ModuleCompletionCommand;
#[cfg(test)]
pub use module_repository::MockModuleRepository;
pub use module_repository::{ModulePersistenceError, ModuleRepository};
pub use seeding::SeedingResult;
#[cfg(test)]
pub use training_query::MockTrainingQuery;
pub use training_query::TrainingQuery;
