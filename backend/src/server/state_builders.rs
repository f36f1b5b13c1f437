//! Builders wiring the in-process adapters into the HTTP port bundle.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::{AccountService, ContentSeeder, EnrollmentService, TrainingService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryDocumentStore, InMemoryIdentityProvider};

/// Storage and identity adapters shared by every service.
#[derive(Clone)]
pub struct Backends {
    pub store: Arc<InMemoryDocumentStore>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub clock: Arc<dyn Clock>,
}

impl Default for Backends {
    fn default() -> Self {
        Self {
            store: Arc::new(InMemoryDocumentStore::new()),
            identity: Arc::new(InMemoryIdentityProvider::new()),
            clock: Arc::new(DefaultClock),
        }
    }
}

/// Build the handler state over `backends`.
///
/// The document store backs the account, module and certification
/// collections; the training service serves both the read and completion
/// ports.
pub fn build_http_state(backends: &Backends) -> HttpState {
    let Backends {
        store,
        identity,
        clock,
    } = backends;
    let accounts = Arc::new(AccountService::new(identity.clone(), store.clone()));
    let training = Arc::new(TrainingService::new(
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    HttpState::new(HttpStatePorts {
        sessions: accounts.clone(),
        accounts,
        admin: Arc::new(EnrollmentService::new(store.clone(), store.clone())),
        training: training.clone(),
        completion: training,
        content: Arc::new(ContentSeeder::new(store.clone(), store.clone())),
    })
}
