use super::*;
use crate::config::AppConfig;
use crate::web::http::MockHttpClient;
use crate::web::storage::MemoryStorage;
use auth_portal_shared::User;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const TOKEN_URL: &str = "/api/token";
const SIGNUP_URL: &str = "/api/signup";

fn create_api(client: MockHttpClient) -> AuthApi<MockHttpClient> {
    AuthApi::new(AppConfig::default(), client)
}

fn login_request() -> LoginRequest {
    LoginRequest::new("ana", "secret")
}

fn signup_request() -> SignupRequest {
    SignupRequest::new("ana", "a@x.com", "secret")
}

fn ana() -> User {
    User {
        id: 1,
        username: "ana".to_string(),
        email: "a@x.com".to_string(),
    }
}

// =========================================================
// FormController 测试
// =========================================================

#[test]
fn test_begin_clears_previous_notice() {
    let mut form = FormController::default();
    form.finish(Some(Notice::Error("bad credentials".to_string())));

    assert!(form.begin());
    assert!(form.is_busy());
    assert_eq!(form.notice(), None);
}

#[test]
fn test_begin_refused_while_busy() {
    let mut form = FormController::default();
    assert!(form.begin());
    assert!(!form.begin());

    form.finish(None);
    assert!(!form.is_busy());
    assert!(form.begin());
}

// =========================================================
// 登录测试
// =========================================================

#[tokio::test]
async fn test_login_success_persists_session() {
    let client = MockHttpClient::new();
    client.mock_response(
        TOKEN_URL,
        200,
        json!({"token": "t1", "user": {"id": 1, "username": "ana", "email": "a@x.com"}}),
    );
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;

    assert_eq!(outcome, FormOutcome::LoggedIn);
    assert_eq!(outcome.next_route(), Some(AppRoute::Private));
    assert_eq!(store.token().as_deref(), Some("t1"));
    assert_eq!(store.user(), Some(ana()));
}

#[tokio::test]
async fn test_login_success_with_flat_response() {
    let client = MockHttpClient::new();
    client.mock_response(
        TOKEN_URL,
        200,
        json!({"token": "t1", "user_id": 1, "username": "ana"}),
    );
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;

    assert_eq!(outcome, FormOutcome::LoggedIn);
    assert_eq!(store.user().map(|u| u.username), Some("ana".to_string()));
}

#[tokio::test]
async fn test_login_rejected_shows_backend_message() {
    let client = MockHttpClient::new();
    client.mock_response(TOKEN_URL, 401, json!({"msg": "bad credentials"}));
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());
    let form = RefCell::new(FormController::default());

    let outcome = run_submit(&form, LoginFlow::submit(&api, &store, &login_request())).await;

    assert_eq!(outcome, Some(FormOutcome::Failed("bad credentials".to_string())));
    assert_eq!(outcome.unwrap().next_route(), None);
    // 表单重新启用，提示保留
    let form = form.borrow();
    assert!(!form.is_busy());
    assert_eq!(
        form.notice(),
        Some(&Notice::Error("bad credentials".to_string()))
    );
    assert_eq!(store.token(), None);
}

#[tokio::test]
async fn test_login_rejected_without_body_uses_fallback() {
    let client = MockHttpClient::new();
    client.mock_raw_response(TOKEN_URL, 500, "Internal Server Error");
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;
    assert_eq!(outcome, FormOutcome::Failed(LOGIN_FAILED.to_string()));
}

#[tokio::test]
async fn test_login_rejected_with_unreadable_body_uses_fallback() {
    let client = MockHttpClient::new();
    client.mock_unreadable_body(TOKEN_URL, 401);
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;
    assert_eq!(outcome, FormOutcome::Failed(LOGIN_FAILED.to_string()));
    assert_eq!(store.token(), None);
}

#[tokio::test]
async fn test_login_network_failure() {
    let client = MockHttpClient::new();
    client.mock_network_failure(TOKEN_URL);
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;
    assert_eq!(
        outcome,
        FormOutcome::Failed("Network error, please try again.".to_string())
    );
    assert_eq!(store.token(), None);
}

#[tokio::test]
async fn test_login_response_without_user_is_failure() {
    let client = MockHttpClient::new();
    client.mock_response(TOKEN_URL, 200, json!({"token": "t1"}));
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());

    let outcome = LoginFlow::submit(&api, &store, &login_request()).await;
    assert_eq!(outcome, FormOutcome::Failed(LOGIN_FAILED.to_string()));
    assert_eq!(store.token(), None);
}

#[tokio::test]
async fn test_duplicate_submit_issues_single_request() {
    let client = MockHttpClient::new().with_latency();
    client.mock_response(
        TOKEN_URL,
        200,
        json!({"token": "t1", "user": {"id": 1, "username": "ana", "email": "a@x.com"}}),
    );
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());
    let form = RefCell::new(FormController::default());

    let request = login_request();
    let first = run_submit(&form, LoginFlow::submit(&api, &store, &request));
    let second = run_submit(&form, LoginFlow::submit(&api, &store, &request));
    let (first, second) = futures::join!(first, second);

    assert_eq!(first, Some(FormOutcome::LoggedIn));
    assert_eq!(second, None);
    assert_eq!(api.client().request_count(), 1);
    assert!(!form.borrow().is_busy());
}

#[tokio::test]
async fn test_retry_after_failure_clears_message() {
    let client = MockHttpClient::new();
    client.mock_response(TOKEN_URL, 401, json!({"msg": "bad credentials"}));
    let api = create_api(client);
    let store = SessionStore::new(MemoryStorage::new());
    let form = RefCell::new(FormController::default());

    run_submit(&form, LoginFlow::submit(&api, &store, &login_request())).await;
    assert!(form.borrow().notice().is_some());

    api.client().mock_response(
        TOKEN_URL,
        200,
        json!({"token": "t2", "user": {"id": 1, "username": "ana", "email": "a@x.com"}}),
    );
    let outcome = run_submit(&form, LoginFlow::submit(&api, &store, &login_request())).await;

    assert_eq!(outcome, Some(FormOutcome::LoggedIn));
    assert_eq!(form.borrow().notice(), None);
    assert_eq!(api.client().request_count(), 2);
}

// =========================================================
// 注册测试
// =========================================================

#[tokio::test]
async fn test_signup_success_schedules_login_redirect() {
    let client = MockHttpClient::new();
    client.mock_response(
        SIGNUP_URL,
        201,
        json!({"message": "User created successfully", "user": {"id": 1, "username": "ana", "email": "a@x.com"}}),
    );
    let api = create_api(client);
    let delay = Duration::from_millis(1000);

    let outcome = SignupFlow::submit(&api, &signup_request(), delay).await;

    assert_eq!(
        outcome,
        FormOutcome::Registered {
            message: SIGNUP_SUCCEEDED.to_string(),
            redirect_after: delay,
        }
    );
    assert_eq!(outcome.next_route(), Some(AppRoute::Login));
    assert_eq!(
        outcome.notice(),
        Some(Notice::Success("Account created successfully!".to_string()))
    );
}

#[tokio::test]
async fn test_signup_success_keeps_form_on_page_with_message() {
    let client = MockHttpClient::new();
    client.mock_response(SIGNUP_URL, 201, json!({}));
    let api = create_api(client);
    let form = RefCell::new(FormController::default());

    let outcome = run_submit(
        &form,
        SignupFlow::submit(&api, &signup_request(), Duration::ZERO),
    )
    .await;

    assert!(matches!(outcome, Some(FormOutcome::Registered { .. })));
    let form = form.borrow();
    assert!(!form.is_busy());
    assert_eq!(
        form.notice(),
        Some(&Notice::Success(SIGNUP_SUCCEEDED.to_string()))
    );
}

#[tokio::test]
async fn test_signup_conflict_message() {
    let client = MockHttpClient::new();
    client.mock_response(
        SIGNUP_URL,
        409,
        json!({"error": "username or email already exists"}),
    );
    let api = create_api(client);

    let outcome = SignupFlow::submit(&api, &signup_request(), Duration::ZERO).await;
    assert_eq!(
        outcome,
        FormOutcome::Failed("username or email already exists".to_string())
    );
}

#[tokio::test]
async fn test_signup_falls_back_to_msg_then_generic() {
    let client = MockHttpClient::new();
    client.mock_response(SIGNUP_URL, 400, json!({"msg": "email is required"}));
    let api = create_api(client);

    let outcome = SignupFlow::submit(&api, &signup_request(), Duration::ZERO).await;
    assert_eq!(outcome, FormOutcome::Failed("email is required".to_string()));

    api.client().mock_raw_response(SIGNUP_URL, 400, "");
    let outcome = SignupFlow::submit(&api, &signup_request(), Duration::ZERO).await;
    assert_eq!(outcome, FormOutcome::Failed(SIGNUP_FAILED.to_string()));
}
