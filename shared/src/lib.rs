use serde::{Deserialize, Serialize};
use std::fmt;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const API_TOKEN: &str = "/api/token";
pub const API_SIGNUP: &str = "/api/signup";
pub const API_ME: &str = "/api/me";

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 会话在浏览器存储中使用的键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_USER_KEY: &str = "user";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户记录
///
/// 权威副本在后端，客户端只在下一次 `/api/me` 校验前信任缓存的副本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// 登录凭据 (POST /api/token)
///
/// 表单提交 "Username or Email"，后端按 username 查找。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// 密码永远不进入日志
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 注册请求 (POST /api/signup)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// 登录成功响应
///
/// 兼容两种形态：
/// - `{ "token": ..., "user": {...} }`
/// - `{ "token": ..., "user_id": 1, "username": "..." }`（旧版后端的扁平形态）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LoginResponse {
    /// 解析出用户记录
    ///
    /// 扁平形态不携带 email，此时以空字符串填充，`/api/me` 会返回完整记录。
    pub fn resolve_user(&self) -> Option<User> {
        if let Some(user) = &self.user {
            return Some(user.clone());
        }
        match (self.user_id, &self.username) {
            (Some(id), Some(username)) => Some(User {
                id,
                username: username.clone(),
                email: String::new(),
            }),
            _ => None,
        }
    }
}

/// 注册成功响应，所有字段都是可选的
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// 后端的错误响应体
///
/// `/api/token` 使用 `msg`，`/api/signup` 使用 `error`（部分情况下为 `msg`）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// 优先 `error`，其次 `msg`；空字符串视为缺失
    pub fn message(&self) -> Option<String> {
        self.error
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.msg.as_deref().filter(|s| !s.is_empty()))
            .map(str::to_string)
    }
}
