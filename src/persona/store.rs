// src/persona/store.rs
//! Owns the active persona prompt: built-in default plus an optional
//! user-edited override persisted through the KvStore collaborator.
//!
//! There is no change-notification channel. The response engine compares
//! the prompt string on every call and rebuilds its backend session when
//! it differs, so a `set` here takes effect on the next turn.

use crate::persona::riddle::RIDDLE_PERSONA_PROMPT;
use crate::storage::traits::{KvStore, KEY_CUSTOM_PROMPT, KEY_PREMIUM_PURCHASED};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt editing is locked")]
    EditingLocked,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Access-control collaborator gating prompt edits. The purchase flow
/// itself lives outside this crate; only the resulting flag crosses in.
#[async_trait]
pub trait EditGate: Send + Sync {
    async fn can_edit_prompt(&self) -> bool;
}

/// Gate backed by the persisted purchase flag.
pub struct PurchaseGate {
    store: Arc<dyn KvStore>,
}

impl PurchaseGate {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EditGate for PurchaseGate {
    async fn can_edit_prompt(&self) -> bool {
        matches!(
            self.store.get(KEY_PREMIUM_PURCHASED).await,
            Ok(Some(flag)) if flag == "true"
        )
    }
}

/// Gate that always allows editing. Used by tests and hosts without a
/// purchase flow.
pub struct OpenGate;

#[async_trait]
impl EditGate for OpenGate {
    async fn can_edit_prompt(&self) -> bool {
        true
    }
}

pub struct PromptStore {
    store: Arc<dyn KvStore>,
    gate: Arc<dyn EditGate>,
    // Mirror of the persisted override so `get` stays synchronous.
    override_prompt: Mutex<Option<String>>,
}

impl PromptStore {
    /// Build the store, reading any persisted override.
    pub async fn load(store: Arc<dyn KvStore>, gate: Arc<dyn EditGate>) -> anyhow::Result<Self> {
        let override_prompt = store.get(KEY_CUSTOM_PROMPT).await?;
        Ok(Self {
            store,
            gate,
            override_prompt: Mutex::new(override_prompt),
        })
    }

    /// The active prompt: the stored override when present and non-empty,
    /// else the built-in default.
    pub fn get(&self) -> String {
        let override_prompt = self.override_prompt.lock().unwrap();
        match override_prompt.as_ref() {
            Some(custom) if !custom.trim().is_empty() => custom.clone(),
            _ => RIDDLE_PERSONA_PROMPT.to_string(),
        }
    }

    /// Whether `get` currently returns the built-in default.
    pub fn is_default(&self) -> bool {
        self.get() == RIDDLE_PERSONA_PROMPT
    }

    /// Replace the active prompt. Rejected when the edit gate denies access.
    pub async fn set(&self, new_prompt: &str) -> Result<(), PromptError> {
        if !self.gate.can_edit_prompt().await {
            return Err(PromptError::EditingLocked);
        }

        self.store.set(KEY_CUSTOM_PROMPT, new_prompt).await?;
        let mut override_prompt = self.override_prompt.lock().unwrap();
        *override_prompt = Some(new_prompt.to_string());
        info!("Persona prompt updated ({} chars)", new_prompt.len());
        Ok(())
    }

    /// Drop any override so `get` reverts to the built-in default.
    pub async fn reset_to_default(&self) -> Result<(), PromptError> {
        self.store.remove(KEY_CUSTOM_PROMPT).await?;
        let mut override_prompt = self.override_prompt.lock().unwrap();
        *override_prompt = None;
        info!("Persona prompt reset to default");
        Ok(())
    }
}
