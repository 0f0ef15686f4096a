//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的映射层，不依赖于 DOM 或 web_sys，也不读取会话状态：
//! 受保护页面的守卫完全由页面自身负责（见 `guard`）。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 `/`
    #[default]
    Home,
    /// 详情页 `/single/:id`
    Single { id: String },
    /// 演示页 `/demo`
    Demo,
    /// 登录页 `/login`
    Login,
    /// 注册页 `/signup`
    Signup,
    /// 私有资料页 `/private`
    Private,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略末尾的 `/`；查询串和 hash 不属于 pathname，不在此处理。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let mut segments = trimmed.split('/').skip(1);

        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) | (Some(""), None, _) => Self::Home,
            (Some("demo"), None, _) => Self::Demo,
            (Some("login"), None, _) => Self::Login,
            (Some("signup"), None, _) => Self::Signup,
            (Some("private"), None, _) => Self::Private,
            (Some("single"), Some(id), None) if !id.is_empty() => Self::Single {
                id: id.to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Single { id } => format!("/single/{}", id),
            Self::Demo => "/demo".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Private => "/private".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
