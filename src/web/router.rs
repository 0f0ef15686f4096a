//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 路由器只负责 path 与页面的绑定，从不检查会话状态。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向，后退按钮无法回到被替换的页面）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        log::debug!("[Router] initial route {}", initial_route);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路由，新增一条 History 记录
    pub fn navigate(&self, route: AppRoute) {
        log::debug!("[Router] navigate -> {}", route);
        push_history_state(&route.to_path());
        self.set_route.set(route);
    }

    /// 重定向到指定路由，替换当前 History 记录
    pub fn redirect(&self, route: AppRoute) {
        log::debug!("[Router] redirect -> {}", route);
        replace_history_state(&route.to_path());
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            let route = AppRoute::from_path(&current_path());
            log::debug!("[Router] popstate -> {}", route);
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router();

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 禁用状态下追加的 class
const DISABLED_LINK_CLASS: &str = "pointer-events-none opacity-50";

fn link_class(base: &str, disabled: bool) -> String {
    match (base.is_empty(), disabled) {
        (_, false) => base.to_string(),
        (true, true) => DISABLED_LINK_CLASS.to_string(),
        (false, true) => format!("{} {}", base, DISABLED_LINK_CLASS),
    }
}

/// 站内链接，点击时走 History API 而不是整页刷新
///
/// `disabled` 为真时点击不会导航（表单请求在途时使用）。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    /// 额外的 class
    #[prop(optional, into)]
    class: String,
    /// 是否禁用
    #[prop(default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let href = to.to_path();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        router.navigate(to.clone());
    };

    view! {
        <a
            href=href
            class=move || link_class(&class, disabled.get())
            aria-disabled=move || disabled.get().to_string()
            on:click=on_click
        >
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_class_marks_disabled() {
        assert_eq!(link_class("link link-primary", false), "link link-primary");
        assert_eq!(
            link_class("link link-primary", true),
            "link link-primary pointer-events-none opacity-50"
        );
        assert_eq!(link_class("", true), "pointer-events-none opacity-50");
    }
}
