//! 认证表单逻辑 (登录 / 注册)
//!
//! 页面组件只负责把输入绑定到信号；提交流程、防重入和结果解释都在这里，
//! 与 DOM 无关，可以直接在测试中驱动。

use crate::api::AuthApi;
use crate::error::{ApiError, NETWORK_ERROR_MESSAGE};
use crate::session::{Session, SessionStore};
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::storage::StorageArea;
use auth_portal_shared::{LoginRequest, SignupRequest};
use leptos::prelude::*;
#[cfg(test)]
use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

#[cfg(test)]
mod tests;

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const SIGNUP_SUCCEEDED: &str = "Account created successfully!";
pub const SESSION_SAVE_FAILED: &str = "Could not save your session, please try again.";

// =========================================================
// 表单状态
// =========================================================

/// 表单上方显示的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// 表单状态：忙碌标志与当前提示
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    busy: bool,
    notice: Option<Notice>,
}

impl FormController {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 开始一次提交
    ///
    /// 已有请求在途时返回 `false`；否则清除上一次的提示并进入忙碌状态。
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.notice = None;
        true
    }

    /// 结束提交并重新启用表单
    pub fn finish(&mut self, notice: Option<Notice>) {
        self.busy = false;
        self.notice = notice;
    }
}

/// 持有 `FormController` 的容器
///
/// 容器已被销毁（组件已卸载）时返回 `None`，此时结果直接丢弃。
pub trait FormHandle {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> Option<R>;
}

impl FormHandle for RwSignal<FormController> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[cfg(test)]
impl FormHandle for RefCell<FormController> {
    fn with_form<R>(&self, f: impl FnOnce(&mut FormController) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

// =========================================================
// 提交结果
// =========================================================

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// 被拒绝或网络失败，留在当前页
    Failed(String),
    /// 登录成功，会话已写入
    LoggedIn,
    /// 注册成功，延时后跳转到登录页
    Registered {
        message: String,
        redirect_after: Duration,
    },
}

impl FormOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            FormOutcome::Failed(msg) => Some(Notice::Error(msg.clone())),
            FormOutcome::LoggedIn => None,
            FormOutcome::Registered { message, .. } => Some(Notice::Success(message.clone())),
        }
    }

    /// 下一个路由（注册成功时需等待 `redirect_after`）
    pub fn next_route(&self) -> Option<AppRoute> {
        match self {
            FormOutcome::Failed(_) => None,
            FormOutcome::LoggedIn => Some(AppRoute::Private),
            FormOutcome::Registered { .. } => Some(AppRoute::Login),
        }
    }
}

/// 在防重入保护下执行一次提交
///
/// `flow` 只在成功进入忙碌状态后才会被 poll，所以被拒绝的重复提交不会发出请求。
/// 返回 `None` 表示提交被忽略。
pub async fn run_submit<H, F>(form: &H, flow: F) -> Option<FormOutcome>
where
    H: FormHandle,
    F: Future<Output = FormOutcome>,
{
    if !form.with_form(FormController::begin).unwrap_or(false) {
        log::debug!("submit ignored: request already in flight");
        return None;
    }

    let outcome = flow.await;
    form.with_form(|f| f.finish(outcome.notice()))?;
    Some(outcome)
}

fn failure_message(err: &ApiError, fallback: &str) -> String {
    if let ApiError::Transport(e) = err {
        log::warn!("request did not complete: {}", e);
        return NETWORK_ERROR_MESSAGE.to_string();
    }
    err.user_message(fallback)
}

// =========================================================
// 登录
// =========================================================

pub struct LoginFlow;

impl LoginFlow {
    /// 提交登录
    ///
    /// 成功时先写入 token 与 user 两个键，再返回 `LoggedIn`。
    pub async fn submit<C, S>(
        api: &AuthApi<C>,
        store: &SessionStore<S>,
        req: &LoginRequest,
    ) -> FormOutcome
    where
        C: HttpClient,
        S: StorageArea,
    {
        let resp = match api.login(req).await {
            Ok(resp) => resp,
            Err(e) => return FormOutcome::Failed(failure_message(&e, LOGIN_FAILED)),
        };

        let Some(user) = resp.resolve_user() else {
            log::warn!("login response carried no user record");
            return FormOutcome::Failed(LOGIN_FAILED.to_string());
        };

        let session = Session {
            token: resp.token,
            user,
        };
        if let Err(e) = store.save(&session) {
            log::error!("failed to persist session: {}", e);
            return FormOutcome::Failed(SESSION_SAVE_FAILED.to_string());
        }

        log::info!("logged in as user {}", session.user.id);
        FormOutcome::LoggedIn
    }
}

// =========================================================
// 注册
// =========================================================

pub struct SignupFlow;

impl SignupFlow {
    /// 提交注册；无论结果如何都不会写入会话
    pub async fn submit<C: HttpClient>(
        api: &AuthApi<C>,
        req: &SignupRequest,
        redirect_after: Duration,
    ) -> FormOutcome {
        match api.signup(req).await {
            Ok(_) => {
                log::info!("account created");
                FormOutcome::Registered {
                    message: SIGNUP_SUCCEEDED.to_string(),
                    redirect_after,
                }
            }
            Err(e) => FormOutcome::Failed(failure_message(&e, SIGNUP_FAILED)),
        }
    }
}
