//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountAdminCommand, AccountSessionCommand, AccountsQuery, ContentSeedCommand,
    ModuleCompletionCommand, TrainingQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub sessions: Arc<dyn AccountSessionCommand>,
    pub accounts: Arc<dyn AccountsQuery>,
    pub admin: Arc<dyn AccountAdminCommand>,
    pub training: Arc<dyn TrainingQuery>,
    pub completion: Arc<dyn ModuleCompletionCommand>,
    pub content: Arc<dyn ContentSeedCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn AccountSessionCommand>,
    pub accounts: Arc<dyn AccountsQuery>,
    pub admin: Arc<dyn AccountAdminCommand>,
    pub training: Arc<dyn TrainingQuery>,
    pub completion: Arc<dyn ModuleCompletionCommand>,
    pub content: Arc<dyn ContentSeedCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use nicu_training::domain::{
    ///     AccountService, ContentSeeder, EnrollmentService, TrainingService,
    /// };
    /// use nicu_training::inbound::http::state::{HttpState, HttpStatePorts};
    /// use nicu_training::outbound::memory::{InMemoryDocumentStore, InMemoryIdentityProvider};
    ///
    /// let store = Arc::new(InMemoryDocumentStore::new());
    /// let identity = Arc::new(InMemoryIdentityProvider::new());
    /// let accounts = Arc::new(AccountService::new(identity, store.clone()));
    /// let training = Arc::new(TrainingService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     sessions: accounts.clone(),
    ///     accounts,
    ///     admin: Arc::new(EnrollmentService::new(store.clone(), store.clone())),
    ///     training: training.clone(),
    ///     completion: training,
    ///     content: Arc::new(ContentSeeder::new(store.clone(), store)),
    /// });
    /// let _training = state.training.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            sessions,
            accounts,
            admin,
            training,
            completion,
            content,
        } = ports;
        Self {
            sessions,
            accounts,
            admin,
            training,
            completion,
            content,
        }
    }
}
