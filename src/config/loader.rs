//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, CacheBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOXGATE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOXGATE_SPEECH__DEFAULT_PROVIDER=printer`
/// - `VOXGATE_NORMALIZER__LANGUAGE_HINT=de`
/// - `VOXGATE_NORMALIZER__LANGUAGES=en,de`
/// - `VOXGATE_CACHE__BACKEND=file`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("normalizer.enabled", true)?
        .set_default("normalizer.languages", vec!["en", "de"])?
        .set_default("speech.default_provider", "printer")?
        .set_default("speech.default_speed", 1.0)?
        .set_default("cache.backend", "memory")?
        .set_default("cache.dir", "data/cache")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOXGATE_CACHE__DIR=/var/cache/voxgate
    builder = builder.add_source(
        Environment::with_prefix("VOXGATE")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("normalizer.languages")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.speech.default_provider.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Default provider cannot be empty".to_string(),
        ));
    }

    let speed = config.speech.default_speed;
    if !(speed.is_finite() && speed > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "Default speed must be positive, got {}",
            speed
        )));
    }

    if config.normalizer.enabled && config.normalizer.languages.is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one normalizer language is required when normalization is enabled"
                .to_string(),
        ));
    }

    if let Some(hint) = config.normalizer.language_hint {
        if !config.normalizer.languages.contains(&hint) {
            return Err(ConfigError::ValidationError(format!(
                "Language hint '{}' is not among the enabled languages",
                hint
            )));
        }
    }

    if config.cache.backend == CacheBackend::File && config.cache.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache directory cannot be empty for the file backend".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Normalizer Enabled: {}", config.normalizer.enabled);
    if config.normalizer.enabled {
        tracing::info!("Normalizer Languages: {:?}", config.normalizer.languages);
        tracing::info!("Language Hint: {:?}", config.normalizer.language_hint);
    }
    tracing::info!("Default Provider: {}", config.speech.default_provider);
    tracing::info!("Default Speed: {}", config.speech.default_speed);
    tracing::info!("Cache Backend: {:?}", config.cache.backend);
    if config.cache.backend == CacheBackend::File {
        tracing::info!("Cache Directory: {:?}", config.cache.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
