// src/engine/mod.rs
//! Response pipeline: primary generative backend with a deterministic
//! fallback. The contract is total—`respond` always returns a non-empty
//! reply, never an error.
//!
//! The backend session is a cache of size one keyed by the prompt text
//! that built it. An unchanged prompt reuses the session; a changed prompt
//! rebuilds it lazily on the next call.

use crate::config::RiddleConfig;
use crate::fallback::FallbackResponder;
use crate::llm::{BackendError, BackendSession, LanguageBackend};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

struct SessionSlot {
    prompt: String,
    session: Box<dyn BackendSession>,
}

pub struct ResponseEngine {
    backend: Arc<dyn LanguageBackend>,
    fallback: FallbackResponder,
    response_timeout: Duration,
    slot: Mutex<Option<SessionSlot>>,
}

impl ResponseEngine {
    pub fn new(
        backend: Arc<dyn LanguageBackend>,
        fallback: FallbackResponder,
        response_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            fallback,
            response_timeout,
            slot: Mutex::new(None),
        }
    }

    pub fn from_config(backend: Arc<dyn LanguageBackend>, config: &RiddleConfig) -> Self {
        Self::new(
            backend,
            FallbackResponder::new(),
            Duration::from_secs(config.response_timeout),
        )
    }

    /// Produce a persona reply for one diary entry. Backend failures of any
    /// kind are absorbed here and answered by the fallback responder.
    pub async fn respond(&self, input: &str, prompt: &str) -> String {
        match self.primary_reply(input, prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Primary backend failed, using fallback: {}", err);
                self.fallback.reply(input)
            }
        }
    }

    async fn primary_reply(&self, input: &str, prompt: &str) -> Result<String, BackendError> {
        let mut slot = self.slot.lock().await;

        let needs_rebuild = match slot.as_ref() {
            Some(active) => active.prompt != prompt,
            None => true,
        };
        if needs_rebuild {
            debug!("Initializing {} session", self.backend.name());
            let session = self.backend.start_session(prompt).await?;
            *slot = Some(SessionSlot {
                prompt: prompt.to_string(),
                session,
            });
        }

        let outcome = {
            let Some(active) = slot.as_ref() else {
                return Err(BackendError::Unavailable("no session".to_string()));
            };
            timeout(self.response_timeout, active.session.generate(input)).await
        };

        let reply = match outcome {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                // Drop the session so the next turn retries initialization.
                *slot = None;
                return Err(err);
            }
            Err(_) => {
                *slot = None;
                return Err(BackendError::InvocationFailed(format!(
                    "timed out after {}s",
                    self.response_timeout.as_secs()
                )));
            }
        };

        if reply.trim().is_empty() {
            *slot = None;
            return Err(BackendError::InvocationFailed(
                "backend returned an empty reply".to_string(),
            ));
        }

        Ok(reply)
    }
}
