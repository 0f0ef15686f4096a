//! 浏览器存储封装模块
//!
//! `StorageArea` 是一个同步的键值存储接口。浏览器实现直接使用 `web_sys::Storage`，
//! 值按原样存取（token 是裸字符串，user 是 JSON 文本）。

use crate::error::StorageError;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::rc::Rc;

/// 存储区域作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionScope {
    /// `localStorage`：关闭标签页后仍然保留
    #[default]
    Local,
    /// `sessionStorage`：仅在当前标签页内有效
    Session,
}

impl SessionScope {
    /// 解析配置值，大小写不敏感
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "localstorage" => Some(Self::Local),
            "session" | "sessionstorage" => Some(Self::Session),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
        }
    }
}

/// 键值存储区域
pub trait StorageArea {
    /// 读取值；键不存在或存储不可用时返回 `None`
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
    /// 清空整个区域
    fn clear(&self);
}

// =========================================================
// 浏览器实现
// =========================================================

/// 浏览器存储区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserStorage {
    scope: SessionScope,
}

impl BrowserStorage {
    pub fn new(scope: SessionScope) -> Self {
        Self { scope }
    }

    /// 获取 Storage 实例
    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.scope {
            SessionScope::Local => window.local_storage().ok()?,
            SessionScope::Session => window.session_storage().ok()?,
        }
    }
}

impl StorageArea for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.clear();
        }
    }
}

// =========================================================
// 测试工具: MemoryStorage
// =========================================================

/// 内存存储，克隆后共享同一份数据
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub map: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }
}

#[cfg(test)]
impl StorageArea for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.map.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.map.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!(SessionScope::parse("local"), Some(SessionScope::Local));
        assert_eq!(SessionScope::parse(" Session "), Some(SessionScope::Session));
        assert_eq!(
            SessionScope::parse("sessionStorage"),
            Some(SessionScope::Session)
        );
        assert_eq!(SessionScope::parse("cookie"), None);
    }

    #[test]
    fn test_memory_storage_shares_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("token", "t1").unwrap();
        assert_eq!(b.get("token").as_deref(), Some("t1"));
        b.clear();
        assert_eq!(a.len(), 0);
    }
}
