//! Training module handlers.
//!
//! ```text
//! GET  /api/v1/modules?category=ventilation&filter=pending
//! GET  /api/v1/modules/upcoming?limit=5
//! GET  /api/v1/modules/recent?limit=3
//! POST /api/v1/modules/{module_id}/completion {"score":92}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    DueStatus, ModuleCategory, ModuleFilter, ModuleQuery, TrainingModule, UpcomingModule,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DueStatusSchema, ErrorSchema, ModuleCategorySchema, ModuleFilterSchema, TrainingModuleSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{MODULE_ID, parse_module_id, validate_score};

/// Number of entries `GET /modules/recent` returns when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Catalogue listing query string.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ModuleListParams {
    /// Restrict to one category.
    #[param(value_type = Option<ModuleCategorySchema>)]
    pub category: Option<ModuleCategory>,
    /// Completion filter; defaults to `all`.
    #[serde(default)]
    #[param(value_type = Option<ModuleFilterSchema>)]
    pub filter: ModuleFilter,
}

impl From<ModuleListParams> for ModuleQuery {
    fn from(value: ModuleListParams) -> Self {
        Self {
            filter: value.filter,
            category: value.category,
        }
    }
}

/// Optional result cap.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitParams {
    /// Maximum number of entries.
    pub limit: Option<usize>,
}

/// A pending module with its due-date distance.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingModuleResponse {
    #[serde(flatten)]
    #[schema(value_type = TrainingModuleSchema)]
    pub module: TrainingModule,
    /// Negative when overdue.
    pub days_until_due: i64,
    #[schema(value_type = DueStatusSchema)]
    pub due_status: DueStatus,
}

impl From<UpcomingModule> for UpcomingModuleResponse {
    fn from(value: UpcomingModule) -> Self {
        let days_until_due = value.days_until_due();
        let due_status = value.status();
        Self {
            module: value.module().clone(),
            days_until_due,
            due_status,
        }
    }
}

/// Completion request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Percentage score, 0 to 100.
    #[schema(minimum = 0, maximum = 100, example = 92)]
    pub score: i32,
}

/// List catalogue modules.
#[utoipa::path(
    get,
    path = "/api/v1/modules",
    params(ModuleListParams),
    responses(
        (status = 200, description = "Modules in catalogue order", body = [TrainingModuleSchema]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "listModules"
)]
#[get("/modules")]
pub async fn list_modules(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ModuleListParams>,
) -> ApiResult<web::Json<Vec<TrainingModule>>> {
    session.require_account_id()?;
    let modules = state
        .training
        .list_modules(params.into_inner().into())
        .await?;
    Ok(web::Json(modules))
}

/// Pending modules with a due date, earliest first. Overdue modules lead.
#[utoipa::path(
    get,
    path = "/api/v1/modules/upcoming",
    params(LimitParams),
    responses(
        (status = 200, description = "Upcoming modules", body = [UpcomingModuleResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "upcomingModules"
)]
#[get("/modules/upcoming")]
pub async fn upcoming_modules(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<LimitParams>,
) -> ApiResult<web::Json<Vec<UpcomingModuleResponse>>> {
    session.require_account_id()?;
    let upcoming = state.training.upcoming_modules(params.limit).await?;
    Ok(web::Json(upcoming.into_iter().map(Into::into).collect()))
}

/// Most recently completed modules, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/modules/recent",
    params(LimitParams),
    responses(
        (status = 200, description = "Recently completed modules", body = [TrainingModuleSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "recentModules"
)]
#[get("/modules/recent")]
pub async fn recent_modules(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<LimitParams>,
) -> ApiResult<web::Json<Vec<TrainingModule>>> {
    session.require_account_id()?;
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let modules = state.training.recently_completed(limit).await?;
    Ok(web::Json(modules))
}

/// Record a completion. Repeating the call overwrites score and date.
#[utoipa::path(
    post,
    path = "/api/v1/modules/{module_id}/completion",
    params(("module_id" = String, Path, description = "Module identifier")),
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "Updated module", body = TrainingModuleSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown module", body = ErrorSchema)
    ),
    tags = ["modules"],
    operation_id = "completeModule"
)]
#[post("/modules/{module_id}/completion")]
pub async fn complete_module(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CompletionRequest>,
) -> ApiResult<web::Json<TrainingModule>> {
    session.require_account_id()?;
    let module_id = parse_module_id(path.into_inner(), MODULE_ID)?;
    let score = validate_score(payload.score)?;
    let module = state.completion.complete_module(&module_id, score).await?;
    Ok(web::Json(module))
}

#[cfg(test)]
#[path = "modules_tests.rs"]
mod tests;
