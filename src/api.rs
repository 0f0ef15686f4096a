use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::http::{FetchHttpClient, HttpClient, HttpRequest};
use auth_portal_shared::protocol::{ApiRequest, HttpMethod, MeRequest};
use auth_portal_shared::{
    ErrorBody, LoginRequest, LoginResponse, SignupRequest, SignupResponse, User,
};
use leptos::prelude::use_context;

/// 浏览器中使用的 API 客户端
pub type BrowserApi = AuthApi<FetchHttpClient>;

/// 从 Context 获取 API 客户端
pub fn use_api() -> BrowserApi {
    use_context::<BrowserApi>().expect("BrowserApi should be provided")
}

/// 后端认证 API
///
/// 每个调用最多发出一个请求，结果在这里解析为 `ApiResult`，页面不再接触原始响应。
#[derive(Clone, Debug)]
pub struct AuthApi<C> {
    config: AppConfig,
    client: C,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(config: AppConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 登录，换取 token 与用户记录
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.call(req, None).await
    }

    /// 注册；成功时不会建立会话
    pub async fn signup(&self, req: &SignupRequest) -> ApiResult<SignupResponse> {
        self.call(req, None).await
    }

    /// 用 bearer token 获取当前用户
    pub async fn me(&self, token: &str) -> ApiResult<User> {
        self.call(&MeRequest, Some(token)).await
    }

    async fn call<R: ApiRequest>(&self, req: &R, bearer: Option<&str>) -> ApiResult<R::Response> {
        let url = self.config.endpoint(R::PATH);
        let mut http_req = HttpRequest::new(&url, R::METHOD);

        if R::METHOD == HttpMethod::Post {
            let body = serde_json::to_string(req)
                .map_err(|e| ApiError::Malformed(format!("encode request: {}", e)))?;
            http_req = http_req.with_json(body);
        }
        if let Some(token) = bearer {
            http_req = http_req.with_bearer(token);
        }

        let resp = self.client.send(http_req).await?;

        if !resp.is_success() {
            // 错误响应体不是 JSON 时按空对象处理
            let body: ErrorBody = serde_json::from_str(&resp.body).unwrap_or_default();
            log::debug!("{} rejected with status {}", R::PATH, resp.status);
            return Err(ApiError::Rejected {
                status: resp.status,
                message: body.message_for(R::ERROR_FIELD),
            });
        }

        serde_json::from_str(&resp.body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::web::http::MockHttpClient;
    use serde_json::json;

    const BASE: &str = "https://api.test";

    fn create_api() -> AuthApi<MockHttpClient> {
        let config = AppConfig::from_values(Some("https://api.test/"), None);
        AuthApi::new(config, MockHttpClient::new())
    }

    #[tokio::test]
    async fn test_login_posts_json_body() {
        let api = create_api();
        api.client().mock_response(
            &format!("{}/api/token", BASE),
            200,
            json!({"token": "t1", "user": {"id": 1, "username": "ana", "email": "a@x.com"}}),
        );

        let resp = api.login(&LoginRequest::new("ana", "pw")).await.unwrap();
        assert_eq!(resp.token, "t1");

        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.url, "https://api.test/api/token");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"username": "ana", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_login_rejection_reads_msg() {
        let api = create_api();
        api.client().mock_response(
            &format!("{}/api/token", BASE),
            401,
            json!({"msg": "bad credentials"}),
        );

        let err = api.login(&LoginRequest::new("ana", "pw")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 401,
                message: Some("bad credentials".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_signup_rejection_reads_error_first() {
        let api = create_api();
        api.client().mock_response(
            &format!("{}/api/signup", BASE),
            409,
            json!({"error": "username or email already exists", "msg": "ignored"}),
        );

        let err = api
            .signup(&SignupRequest::new("ana", "a@x.com", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Signup failed"), "username or email already exists");
    }

    #[tokio::test]
    async fn test_non_json_rejection_body_is_empty_payload() {
        let api = create_api();
        api.client().mock_raw_response(
            &format!("{}/api/token", BASE),
            502,
            "<html>Bad Gateway</html>",
        );

        let err = api.login(&LoginRequest::new("ana", "pw")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 502,
                message: None,
            }
        );
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[tokio::test]
    async fn test_me_sends_bearer_token_without_body() {
        let api = create_api();
        api.client().mock_response(
            &format!("{}/api/me", BASE),
            200,
            json!({"id": 1, "username": "ana", "email": "a@x.com"}),
        );

        let user = api.me("tok-123").await.unwrap();
        assert_eq!(user.username, "ana");

        let requests = api.client().requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.header("Authorization"), Some("Bearer tok-123"));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_tagged() {
        let api = create_api();
        api.client().mock_network_failure(&format!("{}/api/me", BASE));

        let err = api.me("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(HttpError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_malformed() {
        let api = create_api();
        api.client()
            .mock_unreadable_body(&format!("{}/api/me", BASE), 200);

        let err = api.me("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let api = create_api();
        api.client()
            .mock_raw_response(&format!("{}/api/me", BASE), 200, "not json");

        let err = api.me("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }
}
