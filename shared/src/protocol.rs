use crate::{
    API_ME, API_SIGNUP, API_TOKEN, LoginRequest, LoginResponse, SignupRequest, SignupResponse,
    User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 错误响应中读取消息的字段顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    /// 只读取 `msg`
    Msg,
    /// 先 `error` 后 `msg`
    ErrorThenMsg,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Where rejection messages are read from.
    const ERROR_FIELD: ErrorField = ErrorField::Msg;
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = API_TOKEN;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Create an account (does not log in)
impl ApiRequest for SignupRequest {
    type Response = SignupResponse;
    const PATH: &'static str = API_SIGNUP;
    const METHOD: HttpMethod = HttpMethod::Post;
    const ERROR_FIELD: ErrorField = ErrorField::ErrorThenMsg;
}

/// Current user, authenticated by the bearer token.
/// Carries no body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const PATH: &'static str = API_ME;
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl crate::ErrorBody {
    /// 按端点约定的字段顺序读取错误消息
    pub fn message_for(&self, field: ErrorField) -> Option<String> {
        match field {
            ErrorField::Msg => self.msg.clone().filter(|s| !s.is_empty()),
            ErrorField::ErrorThenMsg => self.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorBody;

    #[test]
    fn test_login_reads_msg_only() {
        let body = ErrorBody {
            msg: None,
            error: Some("ignored".to_string()),
        };
        assert_eq!(body.message_for(LoginRequest::ERROR_FIELD), None);
        assert_eq!(
            body.message_for(SignupRequest::ERROR_FIELD).as_deref(),
            Some("ignored")
        );
    }

    #[test]
    fn test_endpoint_metadata() {
        assert_eq!(LoginRequest::PATH, "/api/token");
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert_eq!(SignupRequest::PATH, "/api/signup");
        assert_eq!(MeRequest::PATH, "/api/me");
        assert_eq!(MeRequest::METHOD, HttpMethod::Get);
    }
}
