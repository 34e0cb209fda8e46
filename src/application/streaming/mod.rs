//! Streaming - 流式 TTS 管道
//!
//! - bridge: 异步生产者 / 同步消费者之间的字节桥
//! - session: 把供应商块序列接到 bridge 上

mod bridge;
mod session;

pub use bridge::{BridgeError, StreamBridge};
pub use session::{SessionError, SessionSummary, StreamingSession};
