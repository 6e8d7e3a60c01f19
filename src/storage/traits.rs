// src/storage/traits.rs

//! Key-value collaborator trait for persisted settings.
//! The prompt override and the purchase flag go through this—no direct
//! DB calls in business logic.

use async_trait::async_trait;

/// Key under which a user-edited persona prompt is stored.
pub const KEY_CUSTOM_PROMPT: &str = "custom_prompt";

/// Key for the purchase flag that unlocks prompt editing.
pub const KEY_PREMIUM_PURCHASED: &str = "premium_purchased";

/// Trait for any settings backend—SQLite, in-memory, or whatever the host
/// application provides.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch a value, `None` when the key has never been written.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
