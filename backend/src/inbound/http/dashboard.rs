//! Dashboard handlers.
//!
//! ```text
//! GET /api/v1/stats
//! GET /api/v1/certifications
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Certification, ProgressStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CertificationSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Dashboard figures plus the derived ring values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_modules: usize,
    pub completed_modules: usize,
    /// Rounded mean over completed modules; zero when none.
    pub average_score: i64,
    /// Pending modules due within the next 30 days, today included.
    pub upcoming_due: usize,
    pub remaining_modules: usize,
    #[schema(maximum = 100)]
    pub completion_percent: u8,
}

impl From<ProgressStats> for StatsResponse {
    fn from(value: ProgressStats) -> Self {
        Self {
            total_modules: value.total_modules(),
            completed_modules: value.completed_modules(),
            average_score: value.average_score(),
            upcoming_due: value.upcoming_due(),
            remaining_modules: value.remaining_modules(),
            completion_percent: value.completion_percent(),
        }
    }
}

/// Progress figures as of today.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Dashboard stats",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = StatsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_account_id()?;
    let stats = state.training.progress().await?;
    // Depends on the server's date; never cache across days.
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(StatsResponse::from(stats)))
}

/// Every stored certification.
#[utoipa::path(
    get,
    path = "/api/v1/certifications",
    responses(
        (status = 200, description = "Certifications", body = [CertificationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "listCertifications"
)]
#[get("/certifications")]
pub async fn certifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Certification>>> {
    session.require_account_id()?;
    Ok(web::Json(state.training.certifications().await?))
}

#[cfg(test)]
mod tests {
    //! Dashboard handler coverage with mocked ports.

    use super::*;
    use crate::domain::{CertificationDraft, CertificationId, CertificationStatus, Error};
    use crate::inbound::http::accounts::login;
    use crate::inbound::http::test_utils::{
        MockPorts, account, login_cookie, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::NaiveDate;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(ports.into_state())
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(login)
                    .service(stats)
                    .service(certifications),
            )
    }

    fn stats_fixture() -> ProgressStats {
        serde_json::from_value(json!({
            "totalModules": 5,
            "completedModules": 2,
            "averageScore": 86,
            "upcomingDue": 1
        }))
        .expect("stats fixture")
    }

    #[rstest]
    #[actix_web::test]
    async fn stats_include_ring_values() {
        let mut ports = MockPorts::default();
        ports.allow_sign_in(account("staff", false));
        ports
            .training
            .expect_progress()
            .times(1)
            .return_once(|| Ok(stats_fixture()));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({
                "totalModules": 5,
                "completedModules": 2,
                "averageScore": 86,
                "upcomingDue": 1,
                "remainingModules": 3,
                "completionPercent": 40
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn stats_surface_store_outage() {
        let mut ports = MockPorts::default();
        ports.allow_sign_in(account("staff", false));
        ports
            .training
            .expect_progress()
            .return_once(|| Err(Error::service_unavailable("document store offline")));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn certifications_keep_stored_status() {
        let mut ports = MockPorts::default();
        ports.allow_sign_in(account("staff", false));
        let cert = CertificationDraft::new(
            "Neonatal Resuscitation Program",
            NaiveDate::from_ymd_opt(2023, 1, 10).expect("date"),
            NaiveDate::from_ymd_opt(2025, 1, 10).expect("date"),
            CertificationStatus::Expiring,
        )
        .expect("valid certification")
        .into_certification(CertificationId::new("nrp").expect("id"));
        ports
            .training
            .expect_certifications()
            .return_once(move || Ok(vec![cert]));
        let app = actix_test::init_service(test_app(ports)).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/certifications")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["status"], "expiring");
        assert_eq!(body[0]["expiryDate"], "2025-01-10");
    }
}
