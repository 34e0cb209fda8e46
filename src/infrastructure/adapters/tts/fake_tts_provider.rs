//! Fake TTS Provider - 用于测试的 TTS 供应商
//!
//! 按脚本返回固定的音频块，可配置在第 N 块后失败，不调用任何外部服务

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{ChunkStream, SynthesisRequest, TtsError, TtsProvider};

/// Fake TTS Provider 配置
#[derive(Debug, Clone)]
pub struct FakeTtsProviderConfig {
    /// 注册表中的名称
    pub name: String,
    /// 按顺序返回的音频块
    pub chunks: Vec<Bytes>,
    /// 返回这么多块之后报错
    pub fail_after: Option<usize>,
    /// 每块之间的模拟延迟（毫秒）
    pub chunk_delay_ms: u64,
    pub models: Vec<String>,
    pub voices: Vec<String>,
}

impl Default for FakeTtsProviderConfig {
    fn default() -> Self {
        Self {
            name: "fake".to_string(),
            chunks: vec![Bytes::from(vec![0u8; 1024]); 4],
            fail_after: None,
            chunk_delay_ms: 0,
            models: vec!["fake-tts-1".to_string()],
            voices: vec!["alloy".to_string()],
        }
    }
}

/// Fake TTS Provider
pub struct FakeTtsProvider {
    config: FakeTtsProviderConfig,
    /// list_models / list_voices 被调用的次数
    list_calls: AtomicUsize,
}

impl FakeTtsProvider {
    pub fn new(config: FakeTtsProviderConfig) -> Self {
        tracing::info!(
            name = %config.name,
            chunks = config.chunks.len(),
            fail_after = ?config.fail_after,
            "FakeTtsProvider initialized"
        );
        Self {
            config,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsProviderConfig::default())
    }

    /// 读取音频文件并按 `chunk_size` 切块
    pub fn from_audio_file(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<Self, std::io::Error> {
        let audio = Bytes::from(std::fs::read(path.as_ref())?);
        let chunk_size = chunk_size.max(1);
        let chunks = (0..audio.len())
            .step_by(chunk_size)
            .map(|start| audio.slice(start..(start + chunk_size).min(audio.len())))
            .collect();

        Ok(Self::new(FakeTtsProviderConfig {
            name: name.into(),
            chunks,
            ..Default::default()
        }))
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn scripted_chunks(&self) -> Vec<Result<Bytes, TtsError>> {
        let take = self.config.fail_after.unwrap_or(self.config.chunks.len());
        let mut items: Vec<Result<Bytes, TtsError>> = self
            .config
            .chunks
            .iter()
            .take(take)
            .cloned()
            .map(Ok)
            .collect();
        if self.config.fail_after.is_some() {
            items.push(Err(TtsError::ServiceError(format!(
                "{}: scripted failure",
                self.config.name
            ))));
        }
        items
    }
}

#[async_trait]
impl TtsProvider for FakeTtsProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn default_model(&self) -> Option<&str> {
        self.config.models.first().map(String::as_str)
    }

    fn default_voice(&self) -> Option<&str> {
        self.config.voices.first().map(String::as_str)
    }

    async fn list_models(&self) -> Result<Vec<String>, TtsError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.models.clone())
    }

    async fn list_voices(&self) -> Result<Vec<String>, TtsError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.voices.clone())
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            model = ?request.model,
            voice = ?request.voice,
            "FakeTtsProvider: returning scripted audio"
        );

        let mut audio = Vec::new();
        for chunk in self.scripted_chunks() {
            audio.extend_from_slice(&chunk?);
        }
        Ok(Bytes::from(audio))
    }

    async fn synthesize_stream(&self, request: &SynthesisRequest) -> Result<ChunkStream, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            "FakeTtsProvider: streaming scripted audio"
        );

        let items = self.scripted_chunks();
        if self.config.chunk_delay_ms == 0 {
            return Ok(stream::iter(items).boxed());
        }

        let delay = Duration::from_millis(self.config.chunk_delay_ms);
        Ok(stream::iter(items)
            .then(move |item| async move {
                tokio::time::sleep(delay).await;
                item
            })
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_failure() {
        let provider = FakeTtsProvider::new(FakeTtsProviderConfig {
            fail_after: Some(2),
            ..Default::default()
        });
        let items: Vec<_> = provider
            .synthesize_stream(&SynthesisRequest::new("x"))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(items[1].is_ok());
        assert!(matches!(items[2], Err(TtsError::ServiceError(_))));
        assert!(provider.synthesize(&SynthesisRequest::new("x")).await.is_err());
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_chunks() {
        let provider = FakeTtsProvider::with_defaults();
        let audio = provider.synthesize(&SynthesisRequest::new("x")).await.unwrap();
        assert_eq!(audio.len(), 4096);
    }

    #[test]
    fn test_from_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.mp3");
        std::fs::write(&path, vec![7u8; 2500]).unwrap();

        let provider = FakeTtsProvider::from_audio_file("file", &path, 1024).unwrap();
        let sizes: Vec<usize> = provider.config.chunks.iter().map(Bytes::len).collect();
        assert_eq!(sizes, vec![1024, 1024, 452]);
        assert_eq!(provider.name(), "file");
    }
}
