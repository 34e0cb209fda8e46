//! Speech Service - TTS 用例编排
//!
//! 文本先经过规范化，再交给注册表中选定的供应商；
//! 流式请求在 tokio 上启动 StreamingSession，调用方拿到 bridge 同步读取。
//! 模型/音色列表走注入的缓存，未命中时向供应商拉取。

use bytes::Bytes;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::error::ApplicationError;
use super::ports::{AudioSpec, ListKind, ModelListCache, ProviderLookup, SynthesisRequest, TtsProvider};
use super::streaming::{SessionError, SessionSummary, StreamBridge, StreamingSession};
use crate::domain::{Language, NormalizationResult, TextNormalizer};

/// Speech Service 配置
#[derive(Debug, Clone)]
pub struct SpeechServiceConfig {
    /// 请求未指定供应商时使用
    pub default_provider: String,
    pub default_speed: f32,
    /// 是否在合成前规范化文本
    pub normalize: bool,
    /// 请求未指定语言时使用的提示
    pub language_hint: Option<Language>,
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            default_provider: "printer".to_string(),
            default_speed: 1.0,
            normalize: true,
            language_hint: None,
        }
    }
}

/// 一次合成请求（原始文本）
#[derive(Debug, Clone, Default)]
pub struct SpeechRequest {
    pub text: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
    pub speed: Option<f32>,
    pub language_hint: Option<Language>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language_hint = Some(language);
        self
    }
}

/// 进行中的流式合成
///
/// `bridge` 交给同步解码器读取，`producer` 在生产结束后给出统计或错误
#[derive(Debug)]
pub struct SpeechStream {
    pub session_id: Uuid,
    pub bridge: StreamBridge,
    pub language: Option<Language>,
    pub audio_spec: AudioSpec,
    pub producer: JoinHandle<Result<SessionSummary, SessionError>>,
}

impl SpeechStream {
    /// 等待生产者结束
    pub async fn finish(self) -> Result<SessionSummary, ApplicationError> {
        let outcome = self
            .producer
            .await
            .map_err(|e| ApplicationError::internal(format!("Producer task failed: {}", e)))?;
        Ok(outcome?)
    }
}

/// Speech Service
pub struct SpeechService {
    providers: Arc<dyn ProviderLookup>,
    cache: Arc<dyn ModelListCache>,
    normalizer: TextNormalizer,
    config: SpeechServiceConfig,
}

impl SpeechService {
    pub fn new(
        config: SpeechServiceConfig,
        providers: Arc<dyn ProviderLookup>,
        cache: Arc<dyn ModelListCache>,
        normalizer: TextNormalizer,
    ) -> Self {
        Self {
            providers,
            cache,
            normalizer,
            config,
        }
    }

    pub fn config(&self) -> &SpeechServiceConfig {
        &self.config
    }

    fn provider(&self, name: Option<&str>) -> Result<Arc<dyn TtsProvider>, ApplicationError> {
        let name = name.unwrap_or(&self.config.default_provider);
        self.providers
            .get(name)
            .ok_or_else(|| ApplicationError::provider_not_found(name))
    }

    /// 规范化文本（关闭规范化时原样返回）
    pub fn prepare_text(
        &self,
        text: &str,
        hint: Option<Language>,
    ) -> Result<NormalizationResult, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }
        if !self.config.normalize {
            return Ok(NormalizationResult {
                text: text.to_string(),
                language: None,
            });
        }
        Ok(self
            .normalizer
            .normalize(text, hint.or(self.config.language_hint)))
    }

    fn build_request(
        &self,
        provider: &dyn TtsProvider,
        text: String,
        request: &SpeechRequest,
    ) -> Result<SynthesisRequest, ApplicationError> {
        let chars = text.chars().count();
        if chars > provider.max_length() {
            return Err(ApplicationError::validation(format!(
                "Text too long for {}: {} chars, max {}",
                provider.name(),
                chars,
                provider.max_length()
            )));
        }

        let speed = request.speed.unwrap_or(self.config.default_speed);
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ApplicationError::validation(format!("Invalid speed: {}", speed)));
        }

        Ok(SynthesisRequest {
            text,
            model: request
                .model
                .clone()
                .or_else(|| provider.default_model().map(str::to_string)),
            voice: request
                .voice
                .clone()
                .or_else(|| provider.default_voice().map(str::to_string)),
            speed,
        })
    }

    /// 非流式合成
    pub async fn synthesize(&self, request: SpeechRequest) -> Result<Bytes, ApplicationError> {
        let provider = self.provider(request.provider.as_deref())?;
        let normalized = self.prepare_text(&request.text, request.language_hint)?;
        let synthesis = self.build_request(provider.as_ref(), normalized.text, &request)?;

        let audio = provider.synthesize(&synthesis).await?;
        tracing::info!(
            provider = %provider.name(),
            language = ?normalized.language,
            audio_size = audio.len(),
            "Synthesis completed"
        );
        Ok(audio)
    }

    /// 流式合成
    ///
    /// 立即返回，供应商调用和块写入都在后台任务中进行。
    /// 必须在 tokio 运行时内调用，否则返回 `InternalError`
    pub fn stream(&self, request: SpeechRequest) -> Result<SpeechStream, ApplicationError> {
        let runtime = Handle::try_current().map_err(|e| {
            ApplicationError::internal(format!("Streaming requires a tokio runtime: {}", e))
        })?;
        let provider = self.provider(request.provider.as_deref())?;
        let normalized = self.prepare_text(&request.text, request.language_hint)?;
        let synthesis = self.build_request(provider.as_ref(), normalized.text, &request)?;

        let bridge = StreamBridge::new();
        let session = StreamingSession::new(bridge.clone());
        let session_id = session.id();
        let audio_spec = provider.audio_spec();

        tracing::info!(
            session_id = %session_id,
            provider = %provider.name(),
            language = ?normalized.language,
            model = ?synthesis.model,
            voice = ?synthesis.voice,
            "Starting streaming synthesis"
        );

        let producer = runtime.spawn(session.run_provider(provider, synthesis));

        Ok(SpeechStream {
            session_id,
            bridge,
            language: normalized.language,
            audio_spec,
            producer,
        })
    }

    pub async fn list_models(&self, provider: &str) -> Result<Vec<String>, ApplicationError> {
        self.cached_list(provider, ListKind::Models).await
    }

    pub async fn list_voices(&self, provider: &str) -> Result<Vec<String>, ApplicationError> {
        self.cached_list(provider, ListKind::Voices).await
    }

    /// 已注册的供应商名称
    pub fn providers(&self) -> Vec<String> {
        self.providers.names()
    }

    async fn cached_list(&self, name: &str, kind: ListKind) -> Result<Vec<String>, ApplicationError> {
        let provider = self.provider(Some(name))?;

        match self.cache.lookup(provider.name(), kind).await {
            Ok(Some(entries)) if !entries.is_empty() => return Ok(entries),
            Ok(_) => {}
            Err(e) => tracing::warn!(
                provider = %name,
                kind = %kind,
                error = %e,
                "List cache lookup failed, refreshing from provider"
            ),
        }

        let entries = match kind {
            ListKind::Models => provider.list_models().await?,
            ListKind::Voices => provider.list_voices().await?,
        };

        if let Err(e) = self.cache.store(provider.name(), kind, &entries).await {
            tracing::warn!(provider = %name, kind = %kind, error = %e, "Failed to store list in cache");
        }
        Ok(entries)
    }

    /// 关闭所有供应商
    pub async fn shutdown(&self) {
        for name in self.providers.names() {
            if let Some(provider) = self.providers.get(&name) {
                provider.close().await;
            }
        }
        tracing::info!("Speech service shut down");
    }
}
