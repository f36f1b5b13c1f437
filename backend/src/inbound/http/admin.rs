//! Admin-only handlers.
//!
//! ```text
//! GET    /api/v1/users
//! PUT    /api/v1/users/{account_id}/admin {"isAdmin":true}
//! PUT    /api/v1/users/{account_id}/courses/{module_id}
//! DELETE /api/v1/users/{account_id}/courses/{module_id}
//! POST   /api/v1/admin/seed <content bundle JSON>
//! ```
//!
//! Every handler resolves the caller through [`require_admin`] first.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use training_content::ContentBundle;
use utoipa::ToSchema;

use crate::domain::ports::SeedingResult;
use crate::domain::{AccountId, ContentSeedOutcome, Error, ModuleId, UserAccount};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::require_admin;
use crate::inbound::http::schemas::{ErrorSchema, UserAccountSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ACCOUNT_ID, MODULE_ID, parse_account_id, parse_module_id,
};

/// Admin flag update body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminFlagRequest {
    pub is_admin: bool,
}

/// Outcome for one seeded collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSeedResponse {
    /// `false` when the collection already held documents.
    pub applied: bool,
    pub inserted: usize,
}

impl From<SeedingResult> for CollectionSeedResponse {
    fn from(value: SeedingResult) -> Self {
        Self {
            applied: matches!(value, SeedingResult::Applied { .. }),
            inserted: value.inserted(),
        }
    }
}

/// Per-collection seeding outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub modules: CollectionSeedResponse,
    pub certifications: CollectionSeedResponse,
}

impl From<ContentSeedOutcome> for SeedResponse {
    fn from(value: ContentSeedOutcome) -> Self {
        Self {
            modules: value.modules.into(),
            certifications: value.certifications.into(),
        }
    }
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Accounts", body = [UserAccountSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAccounts"
)]
#[get("/users")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserAccount>>> {
    require_admin(&session, state.accounts.as_ref()).await?;
    Ok(web::Json(state.accounts.list_accounts().await?))
}

/// Grant or revoke admin rights.
#[utoipa::path(
    put,
    path = "/api/v1/users/{account_id}/admin",
    params(("account_id" = String, Path, description = "Account identifier")),
    request_body = AdminFlagRequest,
    responses(
        (status = 200, description = "Updated account", body = UserAccountSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "setAdmin"
)]
#[put("/users/{account_id}/admin")]
pub async fn set_admin(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AdminFlagRequest>,
) -> ApiResult<web::Json<UserAccount>> {
    let actor = require_admin(&session, state.accounts.as_ref()).await?;
    let account_id = parse_account_id(path.into_inner(), ACCOUNT_ID)?;
    let account = state.admin.set_admin(&account_id, payload.is_admin).await?;
    info!(
        actor = %actor.id(),
        account_id = %account_id,
        is_admin = payload.is_admin,
        "admin flag changed"
    );
    Ok(web::Json(account))
}

fn parse_course_path(path: web::Path<(String, String)>) -> Result<(AccountId, ModuleId), Error> {
    let (account_id, module_id) = path.into_inner();
    Ok((
        parse_account_id(account_id, ACCOUNT_ID)?,
        parse_module_id(module_id, MODULE_ID)?,
    ))
}

/// Enroll an account in a module. Idempotent.
#[utoipa::path(
    put,
    path = "/api/v1/users/{account_id}/courses/{module_id}",
    params(
        ("account_id" = String, Path, description = "Account identifier"),
        ("module_id" = String, Path, description = "Module identifier")
    ),
    responses(
        (status = 200, description = "Updated account", body = UserAccountSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown account or module", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "enroll"
)]
#[put("/users/{account_id}/courses/{module_id}")]
pub async fn enroll(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<UserAccount>> {
    require_admin(&session, state.accounts.as_ref()).await?;
    let (account_id, module_id) = parse_course_path(path)?;
    Ok(web::Json(state.admin.add_course(&account_id, &module_id).await?))
}

/// Withdraw an account from a module. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{account_id}/courses/{module_id}",
    params(
        ("account_id" = String, Path, description = "Account identifier"),
        ("module_id" = String, Path, description = "Module identifier")
    ),
    responses(
        (status = 200, description = "Updated account", body = UserAccountSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "withdraw"
)]
#[delete("/users/{account_id}/courses/{module_id}")]
pub async fn withdraw(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<UserAccount>> {
    require_admin(&session, state.accounts.as_ref()).await?;
    let (account_id, module_id) = parse_course_path(path)?;
    Ok(web::Json(
        state.admin.remove_course(&account_id, &module_id).await?,
    ))
}

/// Seed empty collections from a content bundle.
///
/// Collections that already hold documents are left untouched.
#[utoipa::path(
    post,
    path = "/api/v1/admin/seed",
    request_body(content = String, content_type = "application/json",
        description = "Content bundle: {\"version\":1,\"modules\":[...],\"certifications\":[...]}"),
    responses(
        (status = 200, description = "Seeding outcome", body = SeedResponse),
        (status = 400, description = "Invalid bundle", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "seedContent"
)]
#[post("/admin/seed")]
pub async fn seed_content(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: String,
) -> ApiResult<web::Json<SeedResponse>> {
    require_admin(&session, state.accounts.as_ref()).await?;
    let bundle = ContentBundle::from_json(&body).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "code": "invalid_bundle" }))
    })?;
    let outcome = state.content.seed(&bundle).await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
