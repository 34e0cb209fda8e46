//! TTS Adapter - 供应商实现与注册表

mod fake_tts_provider;
mod print_tts_provider;
mod registry;

pub use fake_tts_provider::{FakeTtsProvider, FakeTtsProviderConfig};
pub use print_tts_provider::PrintTtsProvider;
pub use registry::{ProviderRegistry, RegistryError};
