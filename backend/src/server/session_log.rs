//! Audit log of identity provider session transitions.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::domain::SessionEvent;

/// Log every session event until the provider drops its sender.
///
/// Returns the number of events logged. Events missed because the receiver
/// lagged are reported with a warning and skipped.
pub async fn log_session_events(mut events: broadcast::Receiver<SessionEvent>) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(SessionEvent::SignedIn(session)) => {
                info!(
                    account_id = %session.account_id(),
                    email = %session.email(),
                    "session started"
                );
                logged += 1;
            }
            Ok(SessionEvent::SignedOut(account_id)) => {
                info!(account_id = %account_id, "session ended");
                logged += 1;
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(missed, "session log fell behind; events dropped");
            }
            Err(RecvError::Closed) => return logged,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::IdentityProvider;
    use crate::domain::{AccountId, Credentials};
    use crate::outbound::memory::InMemoryIdentityProvider;

    #[rstest]
    #[tokio::test]
    async fn logs_sign_in_and_sign_out_until_closed() {
        let provider = InMemoryIdentityProvider::new();
        let events = provider.subscribe();
        let credentials =
            Credentials::try_from_parts("rt@nicu.example", "bagging42").expect("credentials");
        let session = provider.register(&credentials).await.expect("register");
        provider
            .end_session(session.account_id())
            .await
            .expect("sign out");
        drop(provider);

        assert_eq!(log_session_events(events).await, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn lagging_receiver_skips_missed_events() {
        let (sender, events) = broadcast::channel(1);
        for _ in 0..3 {
            sender
                .send(SessionEvent::SignedOut(AccountId::generate()))
                .expect("receiver alive");
        }
        drop(sender);

        assert_eq!(log_session_events(events).await, 1);
    }
}
