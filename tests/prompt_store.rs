// tests/prompt_store.rs
// PromptStore semantics: default/override resolution, gated editing, and
// the SQLite settings collaborator.

use riddle::persona::{OpenGate, PromptError, PromptStore, PurchaseGate, RIDDLE_PERSONA_PROMPT};
use riddle::storage::{self, KvStore, MemoryKvStore, SqliteKvStore, KEY_PREMIUM_PURCHASED};
use std::sync::Arc;

async fn open_store() -> (Arc<MemoryKvStore>, PromptStore) {
    let kv = Arc::new(MemoryKvStore::new());
    let prompts = PromptStore::load(kv.clone(), Arc::new(OpenGate))
        .await
        .expect("load should not fail on an empty store");
    (kv, prompts)
}

#[tokio::test]
async fn get_is_idempotent_and_defaults() {
    let (_, prompts) = open_store().await;
    assert_eq!(prompts.get(), RIDDLE_PERSONA_PROMPT);
    assert_eq!(prompts.get(), prompts.get());
    assert!(prompts.is_default());
}

#[tokio::test]
async fn set_overrides_and_reset_restores_exact_default() {
    let (_, prompts) = open_store().await;

    prompts.set("You are a different diary entirely.").await.unwrap();
    assert_eq!(prompts.get(), "You are a different diary entirely.");
    assert!(!prompts.is_default());

    prompts.reset_to_default().await.unwrap();
    assert_eq!(prompts.get(), RIDDLE_PERSONA_PROMPT);
    assert!(prompts.is_default());
}

#[tokio::test]
async fn empty_override_falls_back_to_default() {
    let (_, prompts) = open_store().await;
    prompts.set("   ").await.unwrap();
    assert_eq!(prompts.get(), RIDDLE_PERSONA_PROMPT);
}

#[tokio::test]
async fn override_survives_reload_through_the_store() {
    let (kv, prompts) = open_store().await;
    prompts.set("Persisted instructions").await.unwrap();

    let reloaded = PromptStore::load(kv, Arc::new(OpenGate)).await.unwrap();
    assert_eq!(reloaded.get(), "Persisted instructions");
}

#[tokio::test]
async fn purchase_gate_locks_editing_until_flag_is_set() {
    let kv: Arc<MemoryKvStore> = Arc::new(MemoryKvStore::new());
    let gate = Arc::new(PurchaseGate::new(kv.clone()));
    let prompts = PromptStore::load(kv.clone(), gate).await.unwrap();

    let err = prompts.set("Nice try").await.unwrap_err();
    assert!(matches!(err, PromptError::EditingLocked));
    assert_eq!(prompts.get(), RIDDLE_PERSONA_PROMPT);

    kv.set(KEY_PREMIUM_PURCHASED, "true").await.unwrap();
    prompts.set("Unlocked instructions").await.unwrap();
    assert_eq!(prompts.get(), "Unlocked instructions");
}

#[tokio::test]
async fn sqlite_store_roundtrips_settings() {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite");

    storage::sqlite::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let store = SqliteKvStore::new(pool);
    assert_eq!(store.get("custom_prompt").await.unwrap(), None);

    store.set("custom_prompt", "first").await.unwrap();
    store.set("custom_prompt", "second").await.unwrap();
    assert_eq!(
        store.get("custom_prompt").await.unwrap(),
        Some("second".to_string())
    );

    store.remove("custom_prompt").await.unwrap();
    store.remove("custom_prompt").await.unwrap();
    assert_eq!(store.get("custom_prompt").await.unwrap(), None);
}
