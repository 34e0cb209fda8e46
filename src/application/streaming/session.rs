//! Streaming Session - 单次流式 TTS 请求的编排
//!
//! 把供应商的块序列写入 StreamBridge，无论正常结束、出错、panic 还是任务被取消，
//! bridge 都恰好关闭一次，消费者不会永远阻塞

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{BridgeError, StreamBridge};
use crate::application::ports::{SynthesisRequest, TtsError, TtsProvider};

/// Session 错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 供应商在迭代中出错（bridge 已关闭）
    #[error("Provider failed after {chunks} chunks: {source}")]
    Provider {
        chunks: usize,
        #[source]
        source: TtsError,
    },

    /// 消费者提前关闭了 bridge
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

/// 一次会话的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub chunks: usize,
    pub bytes: u64,
}

/// 丢弃时关闭 bridge
struct CloseGuard<'a>(&'a StreamBridge);

impl Drop for CloseGuard<'_> {
    fn drop(&mut self) {
        if self.0.close() {
            tracing::debug!("Stream bridge closed on abnormal session exit");
        }
    }
}

/// 流式会话
///
/// 持有一个 bridge 句柄，消费者持有另一个
#[derive(Debug)]
pub struct StreamingSession {
    id: Uuid,
    bridge: StreamBridge,
}

impl StreamingSession {
    pub fn new(bridge: StreamBridge) -> Self {
        Self {
            id: Uuid::new_v4(),
            bridge,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bridge(&self) -> &StreamBridge {
        &self.bridge
    }

    /// 在 tokio 上启动生产者
    pub fn spawn<S>(self, chunks: S) -> JoinHandle<Result<SessionSummary, SessionError>>
    where
        S: Stream<Item = Result<Bytes, TtsError>> + Send + 'static,
    {
        tokio::spawn(self.run(chunks))
    }

    /// 消费异步块序列直到结束
    pub async fn run<S>(self, chunks: S) -> Result<SessionSummary, SessionError>
    where
        S: Stream<Item = Result<Bytes, TtsError>> + Send,
    {
        let _guard = CloseGuard(&self.bridge);
        let outcome = self.pump_stream(chunks).await;
        self.finish(outcome)
    }

    /// 向供应商发起流式合成并消费返回的块序列
    ///
    /// 供应商调用本身也在生产者一侧，调用失败同样先关闭 bridge
    pub async fn run_provider(
        self,
        provider: Arc<dyn TtsProvider>,
        request: SynthesisRequest,
    ) -> Result<SessionSummary, SessionError> {
        let _guard = CloseGuard(&self.bridge);
        tracing::debug!(
            session_id = %self.id,
            provider = %provider.name(),
            text_len = request.text.len(),
            "Requesting streaming synthesis"
        );

        let outcome = match provider.synthesize_stream(&request).await {
            Ok(chunks) => self.pump_stream(chunks).await,
            Err(source) => Err(SessionError::Provider { chunks: 0, source }),
        };
        self.finish(outcome)
    }

    async fn pump_stream<S>(&self, chunks: S) -> Result<SessionSummary, SessionError>
    where
        S: Stream<Item = Result<Bytes, TtsError>> + Send,
    {
        let mut chunks = std::pin::pin!(chunks);
        let mut summary = SessionSummary::default();

        while let Some(chunk) = chunks.next().await {
            self.pump(&mut summary, chunk)?;
        }
        Ok(summary)
    }

    /// 消费阻塞式块迭代器直到结束
    pub fn run_blocking<I>(self, chunks: I) -> Result<SessionSummary, SessionError>
    where
        I: IntoIterator<Item = Result<Bytes, TtsError>>,
    {
        let _guard = CloseGuard(&self.bridge);
        let mut summary = SessionSummary::default();

        let outcome = chunks
            .into_iter()
            .try_for_each(|chunk| self.pump(&mut summary, chunk))
            .map(|_| summary);

        self.finish(outcome)
    }

    fn pump(
        &self,
        summary: &mut SessionSummary,
        chunk: Result<Bytes, TtsError>,
    ) -> Result<(), SessionError> {
        let chunk = chunk.map_err(|source| SessionError::Provider {
            chunks: summary.chunks,
            source,
        })?;
        let written = self.bridge.write(chunk)?;
        if written > 0 {
            summary.chunks += 1;
            summary.bytes += written as u64;
        }
        Ok(())
    }

    /// 先关闭 bridge，再把结果交给调用方
    fn finish(
        &self,
        outcome: Result<SessionSummary, SessionError>,
    ) -> Result<SessionSummary, SessionError> {
        self.bridge.close();

        match &outcome {
            Ok(summary) => tracing::info!(
                session_id = %self.id,
                chunks = summary.chunks,
                bytes = summary.bytes,
                "Streaming session completed"
            ),
            Err(e) => tracing::error!(
                session_id = %self.id,
                error = %e,
                "Streaming session failed"
            ),
        }

        outcome
    }
}
