//! File-based Model List Cache Implementation
//!
//! 每个条目一个文件 `<provider>.<kind>`，每行一个名称，
//! 文件修改日期等于本地当天日期时有效

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::ports::{local_clock, CacheError, Clock, ListKind, ModelListCache};

/// 文件列表缓存
pub struct FileModelListCache {
    dir: PathBuf,
    clock: Clock,
}

impl FileModelListCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, local_clock())
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Clock) -> Self {
        let dir = dir.into();
        tracing::info!(dir = %dir.display(), "FileModelListCache initialized");
        Self { dir, clock }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, provider: &str, kind: ListKind) -> Result<PathBuf, CacheError> {
        let valid = !provider.is_empty()
            && !provider.starts_with('.')
            && !provider.contains(|c: char| c == '/' || c == '\\');
        if !valid {
            return Err(CacheError::InvalidKey(provider.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", provider, kind)))
    }
}

#[async_trait]
impl ModelListCache for FileModelListCache {
    async fn lookup(&self, provider: &str, kind: ListKind) -> Result<Option<Vec<String>>, CacheError> {
        let path = self.path_for(provider, kind)?;

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let modified: DateTime<Local> = metadata.modified()?.into();
        if modified.date_naive() != (self.clock)() {
            tracing::debug!(path = %path.display(), "Cached list file is stale");
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let entries: Vec<String> = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(entries))
    }

    async fn store(&self, provider: &str, kind: ListKind, entries: &[String]) -> Result<(), CacheError> {
        let path = self.path_for(provider, kind)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, entries.join("\n")).await?;
        tracing::debug!(path = %path.display(), count = entries.len(), "List cached to file");
        Ok(())
    }
}
