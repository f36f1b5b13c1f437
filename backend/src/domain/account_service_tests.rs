//! Tests for account registration and enrollment services.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockAccountRepository, MockIdentityProvider, MockModuleRepository};
use crate::domain::{
    CourseSet, Email, ErrorCode, ModuleCategory, TrainingModule, TrainingModuleDraft,
};

#[fixture]
fn credentials() -> Credentials {
    Credentials::try_from_parts("rt@nicu.example", "bagging42").expect("valid credentials")
}

fn account_id(raw: &str) -> AccountId {
    AccountId::new(raw).expect("account id")
}

fn module_id(raw: &str) -> ModuleId {
    ModuleId::new(raw).expect("module id")
}

fn email() -> Email {
    Email::new("rt@nicu.example").expect("email")
}

fn module(raw: &str) -> TrainingModule {
    TrainingModuleDraft::new("Surfactant delivery", "", ModuleCategory::Procedures, 25, true)
        .expect("valid draft")
        .into_module(module_id(raw))
}

fn identity_issuing(raw_id: &'static str) -> MockIdentityProvider {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_register()
        .times(1)
        .return_once(move |_| Ok(AuthSession::new(account_id(raw_id), email())));
    identity
}

#[rstest]
#[tokio::test]
async fn first_registration_becomes_admin(credentials: Credentials) {
    let identity = identity_issuing("uid-first");
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_insert_if_empty()
        .withf(|account| account.is_admin() && account.id().as_ref() == "uid-first")
        .times(1)
        .return_once(|_| Ok(ConditionalInsert::Inserted));
    accounts.expect_insert().times(0);

    let service = AccountService::new(Arc::new(identity), Arc::new(accounts));
    let account = service
        .register_account(&credentials)
        .await
        .expect("registration succeeds");

    assert!(account.is_admin());
    assert!(account.courses().is_empty());
    assert_eq!(account.email(), &email());
}

#[rstest]
#[tokio::test]
async fn later_registrations_are_not_admin(credentials: Credentials) {
    let identity = identity_issuing("uid-second");
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_insert_if_empty()
        .times(1)
        .return_once(|_| Ok(ConditionalInsert::Rejected));
    accounts
        .expect_insert()
        .withf(|account| !account.is_admin() && account.id().as_ref() == "uid-second")
        .times(1)
        .return_once(|_| Ok(()));

    let service = AccountService::new(Arc::new(identity), Arc::new(accounts));
    let account = service
        .register_account(&credentials)
        .await
        .expect("registration succeeds");

    assert!(!account.is_admin());
}

#[rstest]
#[tokio::test]
async fn identity_rejection_writes_no_account(credentials: Credentials) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_register()
        .times(1)
        .return_once(|_| Err(IdentityProviderError::email_in_use("rt@nicu.example")));
    let mut accounts = MockAccountRepository::new();
    accounts.expect_insert_if_empty().times(0);
    accounts.expect_insert().times(0);

    let service = AccountService::new(Arc::new(identity), Arc::new(accounts));
    let error = service
        .register_account(&credentials)
        .await
        .expect_err("duplicate email");

    assert!(matches!(
        error,
        AccountServiceError::Identity(IdentityProviderError::EmailInUse { .. })
    ));
    assert_eq!(Error::from(error).code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn store_failure_propagates_unchanged(credentials: Credentials) {
    let identity = identity_issuing("uid-3");
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_insert_if_empty()
        .times(1)
        .return_once(|_| Err(AccountPersistenceError::connection("store offline")));

    let service = AccountService::new(Arc::new(identity), Arc::new(accounts));
    let error = service
        .register_account(&credentials)
        .await
        .expect_err("store failure");

    assert!(matches!(
        &error,
        AccountServiceError::Accounts(AccountPersistenceError::Connection { message })
            if message == "store offline"
    ));
    assert_eq!(Error::from(error).code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn sign_in_without_record_is_not_found(credentials: Credentials) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_authenticate()
        .times(1)
        .return_once(|_| Ok(AuthSession::new(account_id("orphan"), email())));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = AccountService::new(Arc::new(identity), Arc::new(accounts));
    let error = service
        .sign_in(&credentials)
        .await
        .expect_err("missing record");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn invalid_credentials_map_to_unauthorized(credentials: Credentials) {
    let mut identity = MockIdentityProvider::new();
    identity
        .expect_authenticate()
        .times(1)
        .return_once(|_| Err(IdentityProviderError::invalid_credentials()));

    let service = AccountService::new(Arc::new(identity), Arc::new(MockAccountRepository::new()));
    let error = service
        .sign_in(&credentials)
        .await
        .expect_err("bad password");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn enroll_checks_module_before_touching_account() {
    let mut modules = MockModuleRepository::new();
    modules
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    let mut accounts = MockAccountRepository::new();
    accounts.expect_add_course().times(0);

    let service = EnrollmentService::new(Arc::new(accounts), Arc::new(modules));
    let error = service
        .enroll(&account_id("uid-1"), &module_id("ghost"))
        .await
        .expect_err("unknown module");

    assert!(matches!(error, AccountServiceError::ModuleNotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn enroll_unknown_account_is_not_found() {
    let mut modules = MockModuleRepository::new();
    modules
        .expect_find_by_id()
        .times(1)
        .return_once(|id| Ok(Some(module(id.as_ref()))));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_add_course()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = EnrollmentService::new(Arc::new(accounts), Arc::new(modules));
    let error = service
        .add_course(&account_id("ghost"), &module_id("m-1"))
        .await
        .expect_err("unknown account");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn enroll_returns_updated_account() {
    let mut modules = MockModuleRepository::new();
    modules
        .expect_find_by_id()
        .times(1)
        .return_once(|id| Ok(Some(module(id.as_ref()))));
    let mut accounts = MockAccountRepository::new();
    accounts.expect_add_course().times(1).return_once(|id, m| {
        let courses: CourseSet = [m.clone()].into_iter().collect();
        Ok(Some(
            UserAccount::new(id.clone(), email(), false).with_courses(courses),
        ))
    });

    let service = EnrollmentService::new(Arc::new(accounts), Arc::new(modules));
    let account = service
        .enroll(&account_id("uid-1"), &module_id("m-1"))
        .await
        .expect("enroll succeeds");

    assert!(account.courses().contains(&module_id("m-1")));
}

#[rstest]
#[tokio::test]
async fn withdraw_skips_module_lookup() {
    let mut modules = MockModuleRepository::new();
    modules.expect_find_by_id().times(0);
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_remove_course()
        .times(1)
        .return_once(|id, _| Ok(Some(UserAccount::new(id.clone(), email(), false))));

    let service = EnrollmentService::new(Arc::new(accounts), Arc::new(modules));
    let account = service
        .withdraw(&account_id("uid-1"), &module_id("retired-module"))
        .await
        .expect("withdraw succeeds");

    assert!(account.courses().is_empty());
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn set_admin_returns_updated_flag(#[case] flag: bool) {
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_set_admin()
        .times(1)
        .return_once(|id, is_admin| Ok(Some(UserAccount::new(id.clone(), email(), is_admin))));

    let service = EnrollmentService::new(Arc::new(accounts), Arc::new(MockModuleRepository::new()));
    let account = service
        .set_admin(&account_id("uid-1"), flag)
        .await
        .expect("set admin succeeds");

    assert_eq!(account.is_admin(), flag);
}
