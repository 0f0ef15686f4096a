//! 受保护页面的守卫逻辑
//!
//! 每次进入页面都完整执行一遍：读取 token -> 调用 `/api/me` 校验 -> 渲染或重定向。
//! 不在多次挂载之间缓存任何结果；缓存的 user 记录不会被用于渲染。

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::storage::StorageArea;
use auth_portal_shared::User;
use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;


pub const VERIFY_FAILED: &str = "Network error while verifying user.";

/// 守卫状态机
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// 没有有效会话，正在跳转到登录页
    Redirecting,
    /// 会话存在，校验请求在途
    Loading,
    /// 校验通过
    Ready(User),
    /// 校验请求本身没有完成（不同于被拒绝），不跳转
    Error(String),
}

impl GuardState {
    /// 需要跳转时的目标路由
    pub fn redirect_target(&self) -> Option<AppRoute> {
        match self {
            GuardState::Redirecting => Some(AppRoute::Login),
            _ => None,
        }
    }
}

pub struct Guard;

impl Guard {
    /// 挂载时的同步检查
    ///
    /// 有 token 时返回它，调用方随后进入 `Loading` 并发起校验；
    /// 没有 token 时直接得到 `Redirecting`，不发出任何请求。
    pub fn check<S: StorageArea>(store: &SessionStore<S>) -> Result<String, GuardState> {
        match store.token() {
            Some(token) => Ok(token),
            None => {
                log::debug!("[Guard] no stored token");
                Err(GuardState::Redirecting)
            }
        }
    }

    /// 用后端校验 token
    pub async fn revalidate<C, S>(
        store: &SessionStore<S>,
        api: &AuthApi<C>,
        token: &str,
    ) -> GuardState
    where
        C: HttpClient,
        S: StorageArea,
    {
        match api.me(token).await {
            Ok(user) => {
                log::debug!("[Guard] token accepted for user {}", user.id);
                GuardState::Ready(user)
            }
            Err(ApiError::Rejected { status, .. }) => {
                log::info!("[Guard] token rejected with status {}, clearing session", status);
                store.purge();
                GuardState::Redirecting
            }
            Err(e) => {
                log::error!("[Guard] could not verify user: {}", e);
                GuardState::Error(VERIFY_FAILED.to_string())
            }
        }
    }

    /// 完整的进入流程
    pub async fn enter<C, S>(store: &SessionStore<S>, api: &AuthApi<C>) -> GuardState
    where
        C: HttpClient,
        S: StorageArea,
    {
        match Self::check(store) {
            Ok(token) => Self::revalidate(store, api, &token).await,
            Err(state) => state,
        }
    }

    /// 登出：删除两个会话键并跳转
    pub fn logout<S: StorageArea>(store: &SessionStore<S>) -> GuardState {
        store.clear();
        log::info!("[Guard] logged out");
        GuardState::Redirecting
    }
}

// =========================================================
// 视图生命周期
// =========================================================

/// 与页面可见生命周期绑定的取消句柄
///
/// 页面卸载时调用 `end()`，之后到达的响应会被丢弃，不会写入已失效的状态。
#[derive(Debug, Clone)]
pub struct ViewLifetime {
    handle: AbortHandle,
}

impl ViewLifetime {
    /// 把一个 future 绑定到新的生命周期上
    pub fn bind<F: Future>(fut: F) -> (Self, Abortable<F>) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self { handle }, Abortable::new(fut, registration))
    }

    pub fn end(&self) {
        self.handle.abort();
    }

    #[cfg(test)]
    pub fn is_ended(&self) -> bool {
        self.handle.is_aborted()
    }
}

/// 等待绑定的 future；生命周期已结束时返回 `None`
pub async fn run_bound<F: Future>(task: Abortable<F>) -> Option<F::Output> {
    match task.await {
        Ok(output) => Some(output),
        Err(Aborted) => {
            log::debug!("[Guard] view unmounted, discarding response");
            None
        }
    }
}
