// src/main.rs

use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use sqlx::sqlite::SqlitePoolOptions;

use riddle::config::CONFIG;
use riddle::controller::{ConversationController, SubmitOutcome};
use riddle::engine::ResponseEngine;
use riddle::llm::{LanguageBackend, NullBackend, OpenAiBackend};
use riddle::persona::{PromptStore, PurchaseGate};
use riddle::storage::{self, KvStore, MemoryKvStore, SqliteKvStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = Level::from_str(&CONFIG.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Riddle diary backend");
    info!("Model: {}", CONFIG.model);
    info!("Response timeout: {}s", CONFIG.response_timeout);

    // Settings store: SQLite when reachable, in-memory otherwise
    let store: Arc<dyn KvStore> = match SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&CONFIG.database_url)
        .await
    {
        Ok(pool) => {
            storage::sqlite::run_migrations(&pool).await?;
            Arc::new(SqliteKvStore::new(pool))
        }
        Err(e) => {
            warn!("Settings database unavailable ({}), using in-memory store", e);
            Arc::new(MemoryKvStore::new())
        }
    };

    let gate = Arc::new(PurchaseGate::new(store.clone()));
    let prompts = Arc::new(PromptStore::load(store, gate).await?);

    let backend: Arc<dyn LanguageBackend> = if CONFIG.backend_api_key.trim().is_empty() {
        warn!("No API key configured - all replies will come from the fallback responder");
        Arc::new(NullBackend)
    } else {
        Arc::new(OpenAiBackend::from_config(&CONFIG))
    };
    info!("Primary backend: {}", backend.name());

    let engine = Arc::new(ResponseEngine::from_config(backend, &CONFIG));
    let controller = ConversationController::new(engine, prompts);

    // Stdin stands in for the handwriting recognition surface: each line is
    // one recognized diary entry.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if controller.submit(&line).await == SubmitOutcome::Responded {
            println!("{}", controller.turn().reply_text);
        }
        controller.dismiss();
    }

    Ok(())
}
