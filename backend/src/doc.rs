//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it.

use crate::inbound::http::accounts::CredentialsRequest;
use crate::inbound::http::admin::{AdminFlagRequest, CollectionSeedResponse, SeedResponse};
use crate::inbound::http::dashboard::StatsResponse;
use crate::inbound::http::modules::{CompletionRequest, UpcomingModuleResponse};
use crate::inbound::http::schemas::{
    CertificationSchema, CertificationStatusSchema, DueStatusSchema, ErrorCodeSchema, ErrorSchema,
    ModuleCategorySchema, ModuleFilterSchema, TrainingModuleSchema, UserAccountSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or POST /api/v1/accounts.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "NICU training API",
        description = "Training modules, certifications and progress for NICU respiratory therapists.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_account,
        crate::inbound::http::modules::list_modules,
        crate::inbound::http::modules::upcoming_modules,
        crate::inbound::http::modules::recent_modules,
        crate::inbound::http::modules::complete_module,
        crate::inbound::http::dashboard::stats,
        crate::inbound::http::dashboard::certifications,
        crate::inbound::http::admin::list_accounts,
        crate::inbound::http::admin::set_admin,
        crate::inbound::http::admin::enroll,
        crate::inbound::http::admin::withdraw,
        crate::inbound::http::admin::seed_content,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserAccountSchema,
        ModuleCategorySchema,
        ModuleFilterSchema,
        DueStatusSchema,
        TrainingModuleSchema,
        CertificationStatusSchema,
        CertificationSchema,
        CredentialsRequest,
        CompletionRequest,
        UpcomingModuleResponse,
        StatsResponse,
        AdminFlagRequest,
        CollectionSeedResponse,
        SeedResponse,
    )),
    tags(
        (name = "accounts", description = "Registration and cookie sessions"),
        (name = "modules", description = "Training module catalogue and completion"),
        (name = "dashboard", description = "Progress figures and certifications"),
        (name = "admin", description = "Account administration and content seeding")
    )
)]
pub struct ApiDoc;
