//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use actix_http::Request;
use serde_json::json;

use crate::domain::ports::{
    MockAccountAdminCommand, MockAccountSessionCommand, MockAccountsQuery,
    MockContentSeedCommand, MockModuleCompletionCommand, MockTrainingQuery,
};
use crate::domain::{AccountId, Email, UserAccount};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Port mocks with no expectations; any unexpected call panics.
#[derive(Default)]
pub struct MockPorts {
    pub sessions: MockAccountSessionCommand,
    pub accounts: MockAccountsQuery,
    pub admin: MockAccountAdminCommand,
    pub training: MockTrainingQuery,
    pub completion: MockModuleCompletionCommand,
    pub content: MockContentSeedCommand,
}

impl MockPorts {
    /// Accept `POST /login` for `account`, once.
    pub fn allow_sign_in(&mut self, account: UserAccount) {
        self.sessions
            .expect_sign_in()
            .times(1)
            .return_once(move |_| Ok(account));
    }

    /// Resolve `account` from [`AccountsQuery::fetch_account`] any number of
    /// times, for admin checks and `GET /me`.
    ///
    /// [`AccountsQuery::fetch_account`]: crate::domain::ports::AccountsQuery::fetch_account
    pub fn resolve_account(&mut self, account: UserAccount) {
        let expected = account.id().clone();
        self.accounts
            .expect_fetch_account()
            .withf(move |id| *id == expected)
            .returning(move |_| Ok(account.clone()));
    }

    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            sessions: Arc::new(self.sessions),
            accounts: Arc::new(self.accounts),
            admin: Arc::new(self.admin),
            training: Arc::new(self.training),
            completion: Arc::new(self.completion),
            content: Arc::new(self.content),
        }))
    }
}

/// Account fixture with a deterministic id derived from `local`.
pub fn account(local: &str, is_admin: bool) -> UserAccount {
    let id = AccountId::new(format!("acct-{local}")).expect("fixture account id");
    let email = Email::new(format!("{local}@nicu.example")).expect("fixture email");
    UserAccount::new(id, email, is_admin)
}

/// Log in through `POST /api/v1/login` and return the session cookie.
///
/// The app's session port must accept the sign-in (see
/// [`MockPorts::allow_sign_in`]).
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "staff@nicu.example", "password": "bagging42"}))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login should succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
