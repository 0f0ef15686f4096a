//! 构建期配置
//!
//! 部署时通过环境变量注入，构建时由 `option_env!` 固化进 WASM：
//! - `BACKEND_URL`: 后端基础地址，末尾的 `/` 会被去掉；为空时使用同源相对路径
//! - `SESSION_SCOPE`: 会话存储区域，`local`（默认）或 `session`

use crate::web::storage::SessionScope;
use leptos::prelude::use_context;
use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "";

/// 注册成功后跳转到登录页之前的等待时间
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub session_scope: SessionScope,
    pub signup_redirect_delay: Duration,
}

impl AppConfig {
    /// 从构建期环境变量读取，读不到就用默认值
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("BACKEND_URL"), option_env!("SESSION_SCOPE"))
    }

    pub fn from_values(backend_url: Option<&str>, session_scope: Option<&str>) -> Self {
        let backend_url = backend_url
            .unwrap_or(DEFAULT_BACKEND_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();

        let session_scope = match session_scope {
            Some(raw) => SessionScope::parse(raw).unwrap_or_else(|| {
                log::warn!("unknown SESSION_SCOPE {:?}, falling back to local", raw);
                SessionScope::default()
            }),
            None => SessionScope::default(),
        };

        Self {
            backend_url,
            session_scope,
            signup_redirect_delay: SIGNUP_REDIRECT_DELAY,
        }
    }

    /// 拼接后端地址与 API 路径
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.backend_url, path)
        } else {
            format!("{}/{}", self.backend_url, path)
        }
    }
}

/// 从 Context 获取配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
