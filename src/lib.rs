//! Auth Portal 前端应用
//!
//! 按职责拆分：
//! - `web`: 浏览器原生 API 封装（HTTP、存储、路由）
//! - `api` / `session`: 通过 Context 注入的服务
//! - `forms` / `guard`: 与界面无关的流程逻辑，可在原生目标上测试
//! - `components`: UI 组件层

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod session;

mod components {
    pub mod login;
    pub mod private;
    pub mod shell;
    pub mod signup;
}

pub mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::api::AuthApi;
use crate::components::login::LoginPage;
use crate::components::private::PrivatePage;
use crate::components::shell::{DemoPage, HomePage, Layout, NotFoundPage, SinglePage};
use crate::components::signup::SignupPage;
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::web::http::FetchHttpClient;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};
use crate::web::storage::BrowserStorage;

use leptos::prelude::*;

/// 路由匹配函数
///
/// 除 404 以外的页面都渲染在 `Layout` 之内。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <Layout><HomePage /></Layout> }.into_any(),
        AppRoute::Single { id } => view! { <Layout><SinglePage id=id /></Layout> }.into_any(),
        AppRoute::Demo => view! { <Layout><DemoPage /></Layout> }.into_any(),
        AppRoute::Login => view! { <Layout><LoginPage /></Layout> }.into_any(),
        AppRoute::Signup => view! { <Layout><SignupPage /></Layout> }.into_any(),
        AppRoute::Private => view! { <Layout><PrivatePage /></Layout> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = AppConfig::from_build_env();
    log::info!(
        "starting with backend {:?}, session scope {}",
        config.backend_url,
        config.session_scope.as_str()
    );

    // 2. 会话存储与 API 客户端，两者只通过 Context 提供给页面
    provide_context(SessionStore::new(BrowserStorage::new(config.session_scope)));
    provide_context(AuthApi::new(config.clone(), FetchHttpClient));
    provide_context(config);

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
