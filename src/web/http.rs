//! HTTP 请求封装模块
//!
//! `HttpClient` trait 把页面逻辑和具体的 fetch 实现解耦：
//! 浏览器中使用基于 `gloo-net` 的 `FetchHttpClient`，测试中使用 `MockHttpClient`。
//! 不设置超时，也不做自动重试。

use crate::error::HttpError;
use auth_portal_shared::protocol::HttpMethod;
use std::fmt;

#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 附加 `Authorization: Bearer <token>`
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(
            auth_portal_shared::HEADER_AUTHORIZATION,
            &format!("Bearer {}", token),
        )
    }

    /// 设置 JSON 请求体
    pub fn with_json(self, body: String) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(body);
        req
    }

    #[cfg(test)]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 由状态码和响应体的读取结果构造响应
    ///
    /// 状态码已经收到时，读不出的响应体按空字符串处理，后续分类只取决于状态码。
    pub fn from_read<E: fmt::Display>(status: u16, body: Result<String, E>) -> Self {
        let body = body.unwrap_or_else(|e| {
            log::warn!("could not read body of {} response: {}", status, e);
            String::new()
        });
        Self { status, body }
    }

    /// 检查响应是否成功 (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器中的 JS 类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: fetch 客户端 (Production)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        use gloo_net::http::Request;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::NetworkError(e.to_string()))?;

        let status = response.status();
        Ok(HttpResponse::from_read(status, response.text().await))
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
enum MockReply {
    Body(u16, String),
    // 收到状态码，但响应体读取失败
    Unreadable(u16),
    NetworkFailure,
}

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> 预设的响应
    responses: RefCell<HashMap<String, MockReply>>,
    // 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    // 为 true 时，每个请求在响应前先让出一次执行权，模拟请求在途
    latency: Cell<bool>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            latency: Cell::new(false),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw_response(url, status, &body.to_string());
    }

    pub fn mock_raw_response(&self, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), MockReply::Body(status, body.to_string()));
    }

    pub fn mock_unreadable_body(&self, url: &str, status: u16) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), MockReply::Unreadable(status));
    }

    pub fn mock_network_failure(&self, url: &str) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), MockReply::NetworkFailure);
    }

    pub fn with_latency(self) -> Self {
        self.latency.set(true);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        if self.latency.get() {
            tokio::task::yield_now().await;
        }

        match self.responses.borrow().get(&url) {
            Some(MockReply::Body(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::Unreadable(status)) => Ok(HttpResponse::from_read(
                *status,
                Err("body stream aborted"),
            )),
            Some(MockReply::NetworkFailure) => {
                Err(HttpError::NetworkError("connection refused".to_string()))
            }
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_body_keeps_status() {
        let resp = HttpResponse::from_read(401, Err("body stream aborted"));
        assert_eq!(resp.status, 401);
        assert_eq!(resp.body, "");
        assert!(!resp.is_success());

        let resp = HttpResponse::from_read::<&str>(200, Ok("{}".to_string()));
        assert_eq!(resp.body, "{}");
        assert!(resp.is_success());
    }
}
