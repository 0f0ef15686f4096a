//! 会话存储模块
//!
//! `SessionStore` 是会话数据唯一的读写入口，通过 Context 注入到需要它的页面
//! （登录表单与受保护页面），而不是让各页面直接访问全局存储。
//! 除了存储中的内容，刷新页面后不保留任何内存副本。

use crate::error::StorageError;
use crate::web::storage::{BrowserStorage, StorageArea};
use auth_portal_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};
use leptos::prelude::use_context;

/// 浏览器中使用的会话存储
pub type BrowserSession = SessionStore<BrowserStorage>;

/// 从 Context 获取会话存储
pub fn use_session() -> BrowserSession {
    use_context::<BrowserSession>().expect("BrowserSession should be provided")
}

/// 一次登录建立的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// 会话存储服务
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    area: S,
}

impl<S: StorageArea> SessionStore<S> {
    pub fn new(area: S) -> Self {
        Self { area }
    }

    pub fn area(&self) -> &S {
        &self.area
    }

    /// 读取 token；空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.area
            .get(STORAGE_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// 读取缓存的用户记录；内容损坏时视为不存在
    pub fn user(&self) -> Option<User> {
        let raw = self.area.get(STORAGE_USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("discarding unreadable cached user: {}", e);
                None
            }
        }
    }

    /// 写入 token 与用户记录
    ///
    /// 用户记录写入失败时会回滚 token，保证两个键要么都在要么都不在。
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user =
            serde_json::to_string(&session.user).map_err(|e| StorageError::Encode(e.to_string()))?;

        self.area.set(STORAGE_TOKEN_KEY, &session.token)?;
        if let Err(e) = self.area.set(STORAGE_USER_KEY, &user) {
            self.area.remove(STORAGE_TOKEN_KEY);
            return Err(e);
        }
        Ok(())
    }

    /// 删除两个会话键（登出）
    pub fn clear(&self) {
        self.area.remove(STORAGE_TOKEN_KEY);
        self.area.remove(STORAGE_USER_KEY);
    }

    /// 清空整个存储区域（token 被后端拒绝时）
    pub fn purge(&self) {
        self.area.clear();
    }
}
