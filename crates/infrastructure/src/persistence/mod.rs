//! Token persistence adapters.

mod file_token_cache;
mod memory_token_cache;

pub use file_token_cache::FileTokenCache;
pub use memory_token_cache::MemoryTokenCache;
