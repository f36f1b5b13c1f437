//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested module or account does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "score must be between 0 and 100")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1c2b9e-0d1a-4c5e-9f3b-2a7d8e4c1b00")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserAccount`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserAccount, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserAccountSchema {
    /// Identity-provider account id.
    #[schema(example = "5f0e6a8c2b9d4e7f8a1b3c5d7e9f0a2b")]
    id: String,
    #[schema(example = "rt@nicu.example")]
    email: String,
    /// Set for the first account registered and by explicit admin updates.
    is_admin: bool,
    /// Enrolled module ids, without duplicates.
    courses: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::ModuleCategory`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ModuleCategory, rename_all = "lowercase")]
pub enum ModuleCategorySchema {
    Ventilation,
    Equipment,
    Procedures,
    Safety,
    Protocols,
}

/// OpenAPI schema for [`crate::domain::ModuleFilter`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ModuleFilter, rename_all = "lowercase")]
pub enum ModuleFilterSchema {
    All,
    Completed,
    Pending,
    Required,
}

/// OpenAPI schema for [`crate::domain::DueStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DueStatus, rename_all = "lowercase")]
pub enum DueStatusSchema {
    /// The due date has passed.
    Overdue,
    /// Due within seven days, today included.
    Urgent,
    Scheduled,
}

/// OpenAPI schema for [`crate::domain::TrainingModule`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TrainingModule, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TrainingModuleSchema {
    #[schema(example = "0b7e3c1d9f2a4b6c8d0e1f2a3b4c5d6e")]
    id: String,
    #[schema(example = "HFOV fundamentals")]
    title: String,
    description: String,
    category: ModuleCategorySchema,
    /// Length in minutes.
    #[schema(minimum = 1, example = 45)]
    duration: u32,
    completed: bool,
    /// Present exactly when `completed` is true.
    #[schema(minimum = 0, maximum = 100)]
    score: Option<i32>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-02")]
    completed_date: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-07-01")]
    due_date: Option<String>,
    required: bool,
}

/// OpenAPI schema for [`crate::domain::CertificationStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CertificationStatus, rename_all = "lowercase")]
pub enum CertificationStatusSchema {
    Active,
    Expiring,
    Expired,
}

/// OpenAPI schema for [`crate::domain::Certification`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Certification, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CertificationSchema {
    id: String,
    #[schema(example = "Neonatal Resuscitation Program")]
    name: String,
    #[schema(value_type = String, format = Date)]
    issue_date: String,
    #[schema(value_type = String, format = Date)]
    expiry_date: String,
    /// Stored as supplied; not recomputed from the dates.
    status: CertificationStatusSchema,
}
