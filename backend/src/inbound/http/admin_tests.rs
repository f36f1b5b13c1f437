//! Tests for admin-only handlers.

use super::*;
use crate::domain::ports::SeedingResult;
use crate::inbound::http::accounts::login;
use crate::inbound::http::test_utils::{MockPorts, account, login_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
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
                .service(list_accounts)
                .service(set_admin)
                .service(enroll)
                .service(withdraw)
                .service(seed_content),
        )
}

/// Ports with an admin signed in and resolvable.
#[fixture]
fn as_admin() -> MockPorts {
    let admin = account("charge-rt", true);
    let mut ports = MockPorts::default();
    ports.allow_sign_in(admin.clone());
    ports.resolve_account(admin);
    ports
}

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = login_cookie(&app).await;
    actix_test::call_service(&app, request.cookie(cookie).to_request()).await
}

#[rstest]
#[actix_web::test]
async fn non_admins_are_forbidden() {
    let staff = account("staff", false);
    let mut ports = MockPorts::default();
    ports.allow_sign_in(staff.clone());
    ports.resolve_account(staff);
    ports.accounts.expect_list_accounts().times(0);

    let response = call(ports, actix_test::TestRequest::get().uri("/api/v1/users")).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[actix_web::test]
async fn anonymous_callers_are_unauthorised() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/acct-staff/courses/hfov")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn admins_list_every_account(mut as_admin: MockPorts) {
    as_admin.accounts.expect_list_accounts().return_once(|| {
        Ok(vec![account("charge-rt", true), account("staff", false)])
    });

    let response = call(as_admin, actix_test::TestRequest::get().uri("/api/v1/users")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["email"], "staff@nicu.example");
}

#[rstest]
#[actix_web::test]
async fn admin_flag_is_forwarded(mut as_admin: MockPorts) {
    as_admin
        .admin
        .expect_set_admin()
        .withf(|id, flag| id.as_ref() == "acct-staff" && *flag)
        .times(1)
        .return_once(|_, _| Ok(account("staff", true)));

    let response = call(
        as_admin,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/acct-staff/admin")
            .set_json(json!({"isAdmin": true})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["isAdmin"], true);
}

#[rstest]
#[actix_web::test]
async fn enrollment_returns_updated_courses(mut as_admin: MockPorts) {
    let mut enrolled = account("staff", false);
    enrolled
        .courses_mut()
        .enroll(crate::domain::ModuleId::new("hfov").expect("module id"));
    as_admin
        .admin
        .expect_add_course()
        .withf(|id, module| id.as_ref() == "acct-staff" && module.as_ref() == "hfov")
        .times(1)
        .return_once(move |_, _| Ok(enrolled));

    let response = call(
        as_admin,
        actix_test::TestRequest::put().uri("/api/v1/users/acct-staff/courses/hfov"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courses"], json!(["hfov"]));
}

#[rstest]
#[actix_web::test]
async fn withdrawal_from_unknown_account_is_not_found(mut as_admin: MockPorts) {
    as_admin
        .admin
        .expect_remove_course()
        .return_once(|_, _| Err(crate::domain::Error::not_found("account ghost not found")));

    let response = call(
        as_admin,
        actix_test::TestRequest::delete().uri("/api/v1/users/ghost/courses/hfov"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn seeding_reports_each_collection(mut as_admin: MockPorts) {
    as_admin
        .content
        .expect_seed()
        .withf(|bundle| bundle.modules().len() == 1 && bundle.certifications().is_empty())
        .times(1)
        .return_once(|_| {
            Ok(ContentSeedOutcome {
                modules: SeedingResult::Applied { inserted: 1 },
                certifications: SeedingResult::AlreadySeeded,
            })
        });
    let bundle = json!({
        "version": 1,
        "modules": [{
            "title": "CPAP set-up", "category": "equipment", "duration": 20,
            "completed": false, "required": true
        }],
        "certifications": []
    });

    let response = call(
        as_admin,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/seed")
            .insert_header(("content-type", "application/json"))
            .set_payload(bundle.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "modules": {"applied": true, "inserted": 1},
            "certifications": {"applied": false, "inserted": 0}
        })
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_bundle_is_rejected_before_seeding(mut as_admin: MockPorts) {
    as_admin.content.expect_seed().times(0);

    let response = call(
        as_admin,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/seed")
            .set_payload(r#"{"version": 1, "modules": [{"title": ""}]}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_bundle");
}
