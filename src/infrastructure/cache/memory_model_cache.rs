//! In-Memory Model List Cache Implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{local_clock, CacheError, Clock, ListKind, ModelListCache};

#[derive(Debug, Clone)]
struct CachedList {
    entries: Vec<String>,
    stored_on: NaiveDate,
}

/// 内存列表缓存
pub struct MemoryModelListCache {
    entries: DashMap<(String, ListKind), CachedList>,
    clock: Clock,
}

impl MemoryModelListCache {
    pub fn new() -> Self {
        Self::with_clock(local_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryModelListCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelListCache for MemoryModelListCache {
    async fn lookup(&self, provider: &str, kind: ListKind) -> Result<Option<Vec<String>>, CacheError> {
        let key = (provider.to_string(), kind);
        let today = (self.clock)();

        let stale = match self.entries.get(&key) {
            Some(cached) if cached.stored_on == today => return Ok(Some(cached.entries.clone())),
            Some(_) => true,
            None => false,
        };

        if stale {
            self.entries.remove(&key);
            tracing::debug!(provider = %provider, kind = %kind, "Cached list expired");
        }
        Ok(None)
    }

    async fn store(&self, provider: &str, kind: ListKind, entries: &[String]) -> Result<(), CacheError> {
        let cached = CachedList {
            entries: entries.to_vec(),
            stored_on: (self.clock)(),
        };
        self.entries.insert((provider.to_string(), kind), cached);
        tracing::debug!(provider = %provider, kind = %kind, count = entries.len(), "List cached");
        Ok(())
    }
}
