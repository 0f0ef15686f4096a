//! 错误类型模块
//!
//! 所有错误都在 API 边界解析一次，页面只和这里的带标签结果打交道：
//! - `HttpError`: 请求根本没有得到响应
//! - `ApiError`: 一次 API 调用的失败结果
//! - `StorageError`: 浏览器存储读写失败

use std::fmt;

/// 传输层失败时展示给用户的通用文案
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again.";

// =========================================================
// 传输错误
// =========================================================

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// 请求构建失败
    RequestBuildFailed(String),
    /// 网络请求失败 (DNS、连接被拒绝、CORS 等)
    NetworkError(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::RequestBuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::NetworkError(msg) => write!(f, "network error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

// =========================================================
// API 结果
// =========================================================

/// API 调用的失败分支
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 后端返回了非 2xx 状态码
    Rejected {
        status: u16,
        /// 从错误响应体中提取的消息；响应体不是合法 JSON 时为 `None`
        message: Option<String>,
    },
    /// 请求没有完成
    Transport(HttpError),
    /// 2xx 响应，但响应体无法解码为期望的结构
    Malformed(String),
}

impl ApiError {
    #[cfg(test)]
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }

    /// 生成展示给用户的文案
    ///
    /// 拒绝时优先使用后端消息，否则使用 `fallback`；传输失败统一为网络错误文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Rejected { message: None, .. } | ApiError::Malformed(_) => {
                fallback.to_string()
            }
            ApiError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Rejected {
                status,
                message: Some(message),
            } => write!(f, "rejected with status {}: {}", status, message),
            ApiError::Rejected {
                status,
                message: None,
            } => write!(f, "rejected with status {}", status),
            ApiError::Transport(e) => write!(f, "transport failure: {}", e),
            ApiError::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Transport(e)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 存储错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// 浏览器未提供该存储区域 (隐私模式、非浏览器环境)
    Unavailable,
    /// 写入被拒绝 (配额已满等)
    WriteFailed(String),
    /// 值无法序列化
    Encode(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage area unavailable"),
            StorageError::WriteFailed(msg) => write!(f, "storage write failed: {}", msg),
            StorageError::Encode(msg) => write!(f, "storage encode failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}
