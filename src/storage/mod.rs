// src/storage/mod.rs

pub mod traits;
pub mod sqlite;
pub mod memory;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;
pub use traits::{KvStore, KEY_CUSTOM_PROMPT, KEY_PREMIUM_PURCHASED};
