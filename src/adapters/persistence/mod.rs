//! Token persistence adapters.

pub mod memory;
pub mod token_json;

pub use memory::MemoryTokenStore;
pub use token_json::TokenJson;
