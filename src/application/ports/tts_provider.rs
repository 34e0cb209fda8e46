//! TTS Provider Port - 语音合成供应商抽象
//!
//! 每个供应商一个实现，通过 `ProviderRegistry` 在启动时显式注册。
//! 供应商适配器本身（鉴权、HTTP 调用、字段映射）不在本 crate 内。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use std::sync::Arc;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Not supported by {provider}: {operation}")]
    Unsupported {
        provider: String,
        operation: &'static str,
    },
}

/// 供应商返回的音频块序列，每个请求只能迭代一次
pub type ChunkStream = BoxStream<'static, Result<Bytes, TtsError>>;

/// 音频容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Pcm,
    Opus,
}

/// 供应商输出的音频参数（供下游解码器使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSpec {
    pub format: AudioFormat,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            channels: 1,
            sample_rate: 24_000,
        }
    }
}

/// 合成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    /// 已规范化的文本
    pub text: String,
    pub model: Option<String>,
    pub voice: Option<String>,
    pub speed: f32,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            voice: None,
            speed: 1.0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// TTS Provider Port
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// 注册表中的唯一名称
    fn name(&self) -> &str;

    fn audio_spec(&self) -> AudioSpec {
        AudioSpec::default()
    }

    /// 单次请求允许的最大字符数
    fn max_length(&self) -> usize {
        4096
    }

    fn default_model(&self) -> Option<&str> {
        None
    }

    fn default_voice(&self) -> Option<&str> {
        None
    }

    async fn list_models(&self) -> Result<Vec<String>, TtsError>;

    async fn list_voices(&self) -> Result<Vec<String>, TtsError> {
        Ok(Vec::new())
    }

    /// 非流式合成，返回完整的音频
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, TtsError>;

    /// 流式合成
    async fn synthesize_stream(&self, request: &SynthesisRequest) -> Result<ChunkStream, TtsError>;

    /// 释放供应商持有的连接
    async fn close(&self) {}
}

/// 按名称查找供应商（由启动时构建的注册表实现）
pub trait ProviderLookup: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<dyn TtsProvider>>;

    /// 已注册的名称，按注册顺序
    fn names(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = SynthesisRequest::new("hello")
            .with_model("tts-1")
            .with_voice("nova")
            .with_speed(1.25);
        assert_eq!(request.text, "hello");
        assert_eq!(request.model.as_deref(), Some("tts-1"));
        assert_eq!(request.voice.as_deref(), Some("nova"));
        assert_eq!(request.speed, 1.25);
    }

    #[test]
    fn test_audio_spec_default() {
        let spec = AudioSpec::default();
        assert_eq!(spec.format, AudioFormat::Mp3);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
    }
}
