//! Print TTS Provider - 只打印文本的供应商
//!
//! 不产生任何音频，用于调试规范化结果

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};

use crate::application::ports::{ChunkStream, SynthesisRequest, TtsError, TtsProvider};

const PRINTER_NAME: &str = "printer";

#[derive(Debug, Default)]
pub struct PrintTtsProvider;

impl PrintTtsProvider {
    pub fn new() -> Self {
        Self
    }

    fn print(&self, request: &SynthesisRequest) {
        tracing::info!(
            provider = PRINTER_NAME,
            chars = request.text.chars().count(),
            text = %request.text,
            "Text to speech"
        );
    }
}

#[async_trait]
impl TtsProvider for PrintTtsProvider {
    fn name(&self) -> &str {
        PRINTER_NAME
    }

    fn default_model(&self) -> Option<&str> {
        Some(PRINTER_NAME)
    }

    async fn list_models(&self) -> Result<Vec<String>, TtsError> {
        Ok(vec![PRINTER_NAME.to_string()])
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, TtsError> {
        self.print(request);
        Ok(Bytes::new())
    }

    async fn synthesize_stream(&self, request: &SynthesisRequest) -> Result<ChunkStream, TtsError> {
        self.print(request);
        Ok(stream::empty::<Result<Bytes, TtsError>>().boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_printer_produces_no_audio() {
        let provider = PrintTtsProvider::new();
        let request = SynthesisRequest::new("hello");

        assert!(provider.synthesize(&request).await.unwrap().is_empty());
        let chunks: Vec<_> = provider
            .synthesize_stream(&request)
            .await
            .unwrap()
            .collect()
            .await;
        assert!(chunks.is_empty());
        assert_eq!(provider.list_models().await.unwrap(), vec!["printer"]);
    }
}
