//! Provider Registry - 启动时显式构建的供应商注册表

use std::sync::Arc;
use thiserror::Error;

use super::PrintTtsProvider;
use crate::application::ports::{ProviderLookup, TtsProvider};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Provider already registered: {0}")]
    Duplicate(String),
}

/// 供应商注册表
///
/// 保持注册顺序，名称唯一
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn TtsProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册内置供应商
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.providers.push(Arc::new(PrintTtsProvider::new()));
        registry
    }

    pub fn register(&mut self, provider: Arc<dyn TtsProvider>) -> Result<(), RegistryError> {
        let name = provider.name().to_string();
        if self.providers.iter().any(|p| p.name() == name) {
            return Err(RegistryError::Duplicate(name));
        }
        tracing::info!(provider = %name, "TTS provider registered");
        self.providers.push(provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl ProviderLookup for ProviderRegistry {
    fn get(&self, name: &str) -> Option<Arc<dyn TtsProvider>> {
        self.providers.iter().find(|p| p.name() == name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{FakeTtsProvider, FakeTtsProviderConfig};

    #[test]
    fn test_builtin_has_printer() {
        let registry = ProviderRegistry::builtin();
        assert_eq!(registry.names(), vec!["printer"]);
        assert!(registry.get("printer").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ProviderRegistry::builtin();
        registry
            .register(Arc::new(FakeTtsProvider::with_defaults()))
            .unwrap();
        let err = registry
            .register(Arc::new(FakeTtsProvider::new(FakeTtsProviderConfig::default())))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "fake"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["printer", "fake"]);
    }
}
