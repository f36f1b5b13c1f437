//! Identity provider keeping argon2id password hashes in memory.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use rand::RngCore;
use tokio::sync::broadcast;
use tracing::warn;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AccountId, AuthSession, Credentials, Email, SessionEvent};

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const SALT_LEN: usize = 16;
const EVENT_CAPACITY: usize = 64;

struct IdentityRecord {
    account_id: AccountId,
    email: Email,
    // PHC string, e.g. `$argon2id$v=19$...`.
    password_hash: String,
}

#[derive(Default)]
struct IdentityState {
    // Keyed by lowercased email.
    identities: HashMap<String, IdentityRecord>,
    signed_in: HashSet<AccountId>,
}

/// In-memory identity provider.
///
/// Issues opaque account ids on registration, signs the new identity in, and
/// publishes every session transition on a broadcast channel. Subscribers
/// that fall behind by more than the channel capacity miss events.
pub struct InMemoryIdentityProvider {
    state: Mutex<IdentityState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(IdentityState::default()),
            events,
        }
    }
}

impl InMemoryIdentityProvider {
    /// Create a provider with no identities.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, IdentityState>, IdentityProviderError> {
        self.state
            .lock()
            .map_err(|_| IdentityProviderError::unavailable("identity state lock poisoned"))
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is not an error: nobody is listening yet.
        let _ = self.events.send(event);
    }
}

fn hash_password(password: &str) -> Result<String, IdentityProviderError> {
    let mut salt_bytes = [0_u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| IdentityProviderError::unavailable(format!("salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityProviderError::unavailable(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn register(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, IdentityProviderError> {
        if credentials.password().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityProviderError::weak_password(MIN_PASSWORD_LENGTH));
        }
        let key = credentials.email().normalized();
        // Hashing is slow; keep it outside the lock.
        let password_hash = hash_password(credentials.password())?;

        let session = {
            let mut state = self.lock()?;
            if state.identities.contains_key(&key) {
                return Err(IdentityProviderError::email_in_use(
                    credentials.email().to_string(),
                ));
            }
            let record = IdentityRecord {
                account_id: AccountId::generate(),
                email: credentials.email().clone(),
                password_hash,
            };
            let session = AuthSession::new(record.account_id.clone(), record.email.clone());
            state.signed_in.insert(record.account_id.clone());
            state.identities.insert(key, record);
            session
        };

        self.publish(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, IdentityProviderError> {
        let stored = {
            let state = self.lock()?;
            state
                .identities
                .get(&credentials.email().normalized())
                .map(|record| {
                    (
                        AuthSession::new(record.account_id.clone(), record.email.clone()),
                        record.password_hash.clone(),
                    )
                })
        };
        let session = stored
            .filter(|(_, password_hash)| verify_password(credentials.password(), password_hash))
            .map(|(session, _)| session)
            .ok_or_else(IdentityProviderError::invalid_credentials)?;
        self.lock()?
            .signed_in
            .insert(session.account_id().clone());

        self.publish(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn end_session(&self, account_id: &AccountId) -> Result<(), IdentityProviderError> {
        let was_signed_in = self.lock()?.signed_in.remove(account_id);
        if !was_signed_in {
            warn!(account_id = %account_id, "sign-out without an active session");
        }
        self.publish(SessionEvent::SignedOut(account_id.clone()));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory identity provider.

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn provider() -> InMemoryIdentityProvider {
        InMemoryIdentityProvider::new()
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn registration_signs_in_and_publishes(provider: InMemoryIdentityProvider) {
        let mut events = provider.subscribe();
        let session = provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");

        assert_eq!(session.email().as_ref(), "rt@nicu.example");
        assert_eq!(
            events.recv().await.expect("event"),
            SessionEvent::SignedIn(session)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn emails_are_unique_ignoring_case(provider: InMemoryIdentityProvider) {
        provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");
        let error = provider
            .register(&creds("RT@NICU.example", "another1"))
            .await
            .expect_err("duplicate");
        assert!(matches!(error, IdentityProviderError::EmailInUse { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn short_passwords_are_rejected(provider: InMemoryIdentityProvider) {
        let error = provider
            .register(&creds("rt@nicu.example", "12345"))
            .await
            .expect_err("weak password");
        assert_eq!(
            error,
            IdentityProviderError::weak_password(MIN_PASSWORD_LENGTH)
        );
    }

    #[rstest]
    #[case("rt@nicu.example", "wrong-password")]
    #[case("nobody@nicu.example", "bagging42")]
    #[tokio::test]
    async fn authentication_rejects_mismatches(
        provider: InMemoryIdentityProvider,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");
        let error = provider
            .authenticate(&creds(email, password))
            .await
            .expect_err("mismatch");
        assert_eq!(error, IdentityProviderError::InvalidCredentials);
    }

    #[rstest]
    #[tokio::test]
    async fn passwords_are_stored_as_argon2id_hashes(provider: InMemoryIdentityProvider) {
        provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");
        let stored = {
            let state = provider.lock().expect("state lock");
            state
                .identities
                .get("rt@nicu.example")
                .map(|record| record.password_hash.clone())
                .expect("identity stored")
        };

        assert!(stored.starts_with("$argon2id$"), "unexpected hash: {stored}");
        assert!(!stored.contains("bagging42"));
        assert!(verify_password("bagging42", &stored));
        assert!(!verify_password("bagging43", &stored));
    }

    #[rstest]
    fn equal_passwords_get_distinct_salts() {
        let first = hash_password("bagging42").expect("hash");
        let second = hash_password("bagging42").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("bagging42", "not-a-phc-string"));
    }

    #[rstest]
    #[tokio::test]
    async fn authentication_returns_registered_account(provider: InMemoryIdentityProvider) {
        let registered = provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");
        let session = provider
            .authenticate(&creds("Rt@Nicu.Example", "bagging42"))
            .await
            .expect("login");
        assert_eq!(session.account_id(), registered.account_id());
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_publishes_event(provider: InMemoryIdentityProvider) {
        let session = provider
            .register(&creds("rt@nicu.example", "bagging42"))
            .await
            .expect("register");
        let mut events = provider.subscribe();

        provider
            .end_session(session.account_id())
            .await
            .expect("sign out");

        assert_eq!(
            events.recv().await.expect("event"),
            SessionEvent::SignedOut(session.account_id().clone())
        );
    }
}
