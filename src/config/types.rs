//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Language;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 文本规范化配置
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// 合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 模型/音色列表缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 文本规范化配置
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    /// 是否在合成前规范化文本
    #[serde(default = "default_normalizer_enabled")]
    pub enabled: bool,

    /// 启用数字转换的语言
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// 未指定时的语言提示，不设置则自动检测
    #[serde(default)]
    pub language_hint: Option<Language>,
}

fn default_normalizer_enabled() -> bool {
    true
}

fn default_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            enabled: default_normalizer_enabled(),
            languages: default_languages(),
            language_hint: None,
        }
    }
}

/// 合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 默认供应商
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// 默认语速
    #[serde(default = "default_speed")]
    pub default_speed: f32,
}

fn default_provider() -> String {
    "printer".to_string()
}

fn default_speed() -> f32 {
    1.0
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            default_speed: default_speed(),
        }
    }
}

/// 列表缓存后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    File,
}

/// 模型/音色列表缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// file 后端的缓存目录
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("data/cache")
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            dir: default_cache_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.normalizer.enabled);
        assert_eq!(
            config.normalizer.languages,
            vec![Language::English, Language::German]
        );
        assert_eq!(config.speech.default_provider, "printer");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.log.level, "info");
    }
}
