//! Account session handlers.
//!
//! ```text
//! POST /api/v1/accounts {"email":"rt@nicu.example","password":"bagging42"}
//! POST /api/v1/login    {"email":"rt@nicu.example","password":"bagging42"}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    AccountValidationError, Credentials, CredentialsValidationError, Error, UserAccount,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserAccountSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body shared by registration and login.
///
/// Example JSON:
/// `{"email":"rt@nicu.example","password":"bagging42"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let code = match &err {
        CredentialsValidationError::InvalidEmail(AccountValidationError::EmptyEmail) => {
            "empty_email"
        }
        CredentialsValidationError::InvalidEmail(AccountValidationError::MalformedEmail) => {
            "malformed_email"
        }
        CredentialsValidationError::EmptyPassword => "empty_password",
    };
    let field = match err {
        CredentialsValidationError::InvalidEmail(_) => "email",
        CredentialsValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_credentials(payload: web::Json<CredentialsRequest>) -> Result<Credentials, Error> {
    Credentials::try_from(payload.into_inner()).map_err(map_credentials_error)
}

/// Register a new account and sign it in.
///
/// The first account ever registered becomes an admin.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = UserAccountSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/accounts")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload)?;
    let account = state.sessions.register(&credentials).await?;
    session.persist_account(account.id())?;
    Ok(HttpResponse::Created().json(account))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = UserAccountSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<UserAccount>> {
    let credentials = parse_credentials(payload)?;
    let account = state.sessions.sign_in(&credentials).await?;
    session.persist_account(account.id())?;
    Ok(web::Json(account))
}

/// End the current session. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Some(account_id) = session.account_id()? {
        state.sessions.sign_out(&account_id).await?;
    }
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current account", body = UserAccountSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account record missing", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "currentAccount"
)]
#[get("/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserAccount>> {
    let account_id = session.require_account_id()?;
    let account = state.accounts.fetch_account(&account_id).await?;
    Ok(web::Json(account))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
