//! Voxgate - TTS 流式合成演示
//!
//! 从 stdin 读取文本，经规范化后交给配置的供应商流式合成，
//! 在阻塞线程上把 bridge 中的音频复制到 stdout。

use std::io::{Read, Write};
use std::sync::Arc;

use voxgate::application::ports::{ModelListCache, ProviderLookup};
use voxgate::application::{SpeechRequest, SpeechService, SpeechServiceConfig};
use voxgate::config::{load_config, print_config, AppConfig, CacheBackend};
use voxgate::domain::{NumberWords, TextNormalizer};
use voxgate::infrastructure::{FileModelListCache, MemoryModelListCache, ProviderRegistry};

fn init_logging(config: &AppConfig) {
    let log_filter = format!("{},voxgate={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // 音频写到 stdout，日志只能走 stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config);
    tracing::info!("Voxgate - TTS streaming core");
    print_config(&config);

    let registry = ProviderRegistry::builtin();
    tracing::info!(providers = ?registry.names(), "Providers ready");

    let cache: Arc<dyn ModelListCache> = match config.cache.backend {
        CacheBackend::Memory => MemoryModelListCache::new().arc(),
        CacheBackend::File => {
            tokio::fs::create_dir_all(&config.cache.dir).await?;
            Arc::new(FileModelListCache::new(config.cache.dir.clone()))
        }
    };

    let normalizer = TextNormalizer::new(NumberWords::with_languages(&config.normalizer.languages));
    let service = SpeechService::new(
        SpeechServiceConfig {
            default_provider: config.speech.default_provider.clone(),
            default_speed: config.speech.default_speed,
            normalize: config.normalizer.enabled,
            language_hint: config.normalizer.language_hint,
        },
        registry.arc(),
        cache,
        normalizer,
    );

    let provider = config.speech.default_provider.clone();
    let models = service.list_models(&provider).await?;
    tracing::info!(provider = %provider, models = ?models, "Models available");

    let text = tokio::task::spawn_blocking(|| {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    })
    .await??;

    let stream = service.stream(SpeechRequest::new(text))?;
    tracing::info!(
        session_id = %stream.session_id,
        language = ?stream.language,
        format = ?stream.audio_spec.format,
        channels = stream.audio_spec.channels,
        sample_rate = stream.audio_spec.sample_rate,
        "Streaming to stdout"
    );

    // 按块复制，块大小由供应商决定
    let bridge = stream.bridge.clone();
    let copied = tokio::task::spawn_blocking(move || -> std::io::Result<u64> {
        let mut stdout = std::io::stdout().lock();
        loop {
            let chunk = bridge.read();
            if chunk.is_empty() {
                break;
            }
            stdout.write_all(&chunk)?;
        }
        stdout.flush()?;
        Ok(bridge.position())
    })
    .await??;

    let summary = stream.finish().await?;
    tracing::info!(chunks = summary.chunks, bytes = copied, "Done");

    service.shutdown().await;
    Ok(())
}
