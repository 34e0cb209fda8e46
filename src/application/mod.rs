//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsProvider、ModelListCache）
//! - streaming: StreamBridge 与 StreamingSession
//! - speech_service: 规范化 + 供应商选择 + 流式会话
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod speech_service;
pub mod streaming;

pub use error::ApplicationError;
pub use ports::{
    AudioFormat, AudioSpec, CacheError, ChunkStream, ListKind, ModelListCache, ProviderLookup,
    SynthesisRequest, TtsError, TtsProvider,
};
pub use speech_service::{SpeechRequest, SpeechService, SpeechServiceConfig, SpeechStream};
pub use streaming::{BridgeError, SessionError, SessionSummary, StreamBridge, StreamingSession};
