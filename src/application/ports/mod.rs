//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod model_list_cache;
mod tts_provider;

pub use model_list_cache::{local_clock, CacheError, Clock, ListKind, ModelListCache};
pub use tts_provider::{
    AudioFormat, AudioSpec, ChunkStream, ProviderLookup, SynthesisRequest, TtsError,
    TtsProvider,
};
