//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod cache;

pub use adapters::{FakeTtsProvider, PrintTtsProvider, ProviderRegistry};
pub use cache::{FileModelListCache, MemoryModelListCache};
