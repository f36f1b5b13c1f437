//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed training entities used by the API and the
//! document store adapters, the pure progress aggregation over them, and the
//! services that implement the driving ports. Types document their invariants
//! and serialisation contracts (serde) in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - TrainingModule / Certification / UserAccount: stored documents.
//! - ProgressStats: dashboard aggregation.
//! - AccountService, EnrollmentService, TrainingService, ContentSeeder:
//!   use-case services over the ports in [`ports`].

pub mod account;
pub mod account_service;
pub mod auth;
pub mod certification;
pub mod content_seeder;
pub mod error;
pub mod ids;
pub mod ports;
pub mod progress;
pub mod trace_id;
pub mod training_module;
pub mod training_service;

pub use self::account::{AccountValidationError, CourseSet, Email, UserAccount};
pub use self::account_service::{AccountService, AccountServiceError, EnrollmentService};
pub use self::auth::{AuthSession, Credentials, CredentialsValidationError, SessionEvent};
pub use self::certification::{
    Certification, CertificationDraft, CertificationStatus, CertificationValidationError,
};
pub use self::content_seeder::{ContentSeedError, ContentSeedOutcome, ContentSeeder};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{AccountId, CertificationId, DOCUMENT_ID_MAX, IdValidationError, ModuleId};
pub use self::progress::{
    ModuleFilter, ModuleQuery, ProgressStats, UpcomingModule, filter_modules,
    modules_by_category, recently_completed, upcoming_modules,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::training_module::{
    DueStatus, ModuleCategory, ModuleCompletion, TrainingModule, TrainingModuleDraft,
    TrainingModuleValidationError, UPCOMING_WINDOW_DAYS, URGENT_WINDOW_DAYS,
};
pub use self::training_service::{TrainingService, TrainingServiceError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use nicu_training::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("admin access required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
