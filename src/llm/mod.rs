// src/llm/mod.rs
// Backend trait and type definitions for the primary generative collaborator.

use async_trait::async_trait;

pub mod openai;

pub use openai::OpenAiBackend;

/// Error types for the primary backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend invocation failed: {0}")]
    InvocationFailed(String),
}

/// A live session holding the persona instructions it was built with.
#[async_trait]
pub trait BackendSession: Send + Sync {
    /// Produce a reply to one user entry.
    async fn generate(&self, input: &str) -> Result<String, BackendError>;
}

/// Universal backend interface
#[async_trait]
pub trait LanguageBackend: Send + Sync {
    /// Backend name for logging/debugging
    fn name(&self) -> &'static str;

    /// Build a session primed with the given persona instructions.
    async fn start_session(
        &self,
        instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError>;
}

/// Stand-in backend for hosts running without credentials. Every session
/// request fails, so the engine answers from the fallback responder.
pub struct NullBackend;

#[async_trait]
impl LanguageBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn start_session(
        &self,
        _instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError> {
        Err(BackendError::Unavailable(
            "no generative backend configured".to_string(),
        ))
    }
}
