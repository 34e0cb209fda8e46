//! Voxgate - 多供应商语音网关的 TTS 流式核心
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Text Normalizer: 朗读前的文本规范化（数字、温度符号、链接）
//! - Number Words: 按语言的数字转单词
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsProvider, ProviderLookup, ModelListCache）
//! - Streaming: StreamBridge + StreamingSession（异步生产者 -> 同步读取）
//! - SpeechService: 规范化、供应商选择、流式合成、列表缓存
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Printer / Fake TTS Provider, ProviderRegistry
//! - Cache: 内存与文件模型列表缓存

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
