//! Model List Cache Port - 模型/音色列表缓存
//!
//! 缓存条目在本地日期变更（过了午夜）后失效，
//! 未命中时由调用方向供应商重新拉取并写回

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// 缓存错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

/// 列表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Models,
    Voices,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Models => "models",
            ListKind::Voices => "voices",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 返回"今天"的时钟，测试中可替换以模拟跨天
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// 本地时区的系统时钟
pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().date_naive())
}

/// Model List Cache Port
#[async_trait]
pub trait ModelListCache: Send + Sync {
    /// 查找当天有效的列表，过期或不存在时返回 None
    async fn lookup(&self, provider: &str, kind: ListKind) -> Result<Option<Vec<String>>, CacheError>;

    /// 写入列表，有效期到本地日期变更为止
    async fn store(&self, provider: &str, kind: ListKind, entries: &[String]) -> Result<(), CacheError>;
}
