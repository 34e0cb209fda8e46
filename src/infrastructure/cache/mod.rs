//! Model List Cache - 模型/音色列表缓存实现

mod file_model_cache;
mod memory_model_cache;

pub use file_model_cache::FileModelListCache;
pub use memory_model_cache::MemoryModelListCache;
