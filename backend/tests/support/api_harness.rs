//! In-process HTTP harness for behaviour tests.
//!
//! Each request builds the full application from [`build_app`] over one
//! shared set of in-memory adapters and a fixed session key, so cookies
//! issued by one request authenticate the next.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::Method;
use actix_web::{test, web};
use nicu_training::inbound::http::state::HttpState;
use nicu_training::server::{AppDependencies, Backends, build_app, build_http_state};
use serde_json::{Value, json};

/// Password used for every account the scenarios register.
pub const PASSWORD: &str = "bagging42";

/// Status and decoded JSON body of one call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Shared application state plus the session cookie held by each email.
#[derive(Clone)]
pub struct ApiHarness {
    state: web::Data<HttpState>,
    key: Key,
    cookies: Arc<Mutex<HashMap<String, Cookie<'static>>>>,
}

impl ApiHarness {
    pub fn new() -> Self {
        Self {
            state: web::Data::new(build_http_state(&Backends::default())),
            key: Key::generate(),
            cookies: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn deps(&self) -> AppDependencies {
        AppDependencies {
            http_state: self.state.clone(),
            key: self.key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    fn cookie_for(&self, email: &str) -> Option<Cookie<'static>> {
        self.cookies
            .lock()
            .expect("cookie jar lock")
            .get(email)
            .cloned()
    }

    /// Send one request, optionally as the holder of `email`'s session.
    ///
    /// A session cookie in the response replaces the one stored for `email`.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        as_email: Option<&str>,
    ) -> ApiResponse {
        let deps = self.deps();
        let cookie = as_email.and_then(|email| self.cookie_for(email));
        let uri = path.to_owned();
        let (status, issued, body) = actix_web::rt::System::new().block_on(async move {
            let app = test::init_service(build_app(deps)).await;
            let mut request = test::TestRequest::default().method(method).uri(&uri);
            if let Some(cookie) = cookie {
                request = request.cookie(cookie);
            }
            if let Some(body) = body {
                request = request.set_json(body);
            }
            let response = test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let issued = response
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(Cookie::into_owned);
            let bytes = test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON response body")
            };
            (status, issued, body)
        });

        if let (Some(email), Some(cookie)) = (as_email, issued) {
            self.cookies
                .lock()
                .expect("cookie jar lock")
                .insert(email.to_owned(), cookie);
        }
        ApiResponse { status, body }
    }

    /// Register `email` and keep the session it receives.
    pub fn register(&self, email: &str) -> ApiResponse {
        self.send(
            Method::POST,
            "/api/v1/accounts",
            Some(json!({"email": email, "password": PASSWORD})),
            Some(email),
        )
    }

    /// Resolve a catalogue module id by its title.
    pub fn module_id_titled(&self, title: &str, as_email: &str) -> String {
        let response = self.send(Method::GET, "/api/v1/modules", None, Some(as_email));
        assert_eq!(response.status, 200, "catalogue should be readable");
        response
            .body
            .as_array()
            .expect("module array")
            .iter()
            .find(|module| module["title"] == title)
            .and_then(|module| module["id"].as_str())
            .unwrap_or_else(|| panic!("no module titled {title}"))
            .to_owned()
    }

    /// Resolve an account id by email through the admin listing.
    pub fn account_id_for(&self, email: &str, admin_email: &str) -> String {
        self.account_for(email, admin_email)["id"]
            .as_str()
            .expect("account id")
            .to_owned()
    }

    /// Fetch the stored account for `email` through the admin listing.
    pub fn account_for(&self, email: &str, admin_email: &str) -> Value {
        let response = self.send(Method::GET, "/api/v1/users", None, Some(admin_email));
        assert_eq!(response.status, 200, "admin listing should succeed");
        response
            .body
            .as_array()
            .expect("account array")
            .iter()
            .find(|account| account["email"] == email)
            .cloned()
            .unwrap_or_else(|| panic!("no account for {email}"))
    }
}

/// The content bundle shipped with the backend.
pub fn shipped_bundle() -> Value {
    serde_json::from_str(include_str!("../../fixtures/training-content/bundle.json"))
        .expect("fixture bundle is JSON")
}
