// tests/pipeline.rs
// ResponseEngine behavior: primary backend preference, fallback on any
// failure, bounded call time, and prompt-keyed session reuse.

use async_trait::async_trait;
use riddle::engine::ResponseEngine;
use riddle::fallback::{FallbackResponder, IDENTITY_REPLY};
use riddle::llm::{BackendError, BackendSession, LanguageBackend};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend that can never build a session.
struct UnavailableBackend;

#[async_trait]
impl LanguageBackend for UnavailableBackend {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn start_session(
        &self,
        _instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError> {
        Err(BackendError::Unavailable("stubbed out".to_string()))
    }
}

#[derive(Default)]
struct Counters {
    inits: AtomicUsize,
    generates: AtomicUsize,
    instructions: Mutex<Vec<String>>,
}

/// Backend whose sessions return a fixed reply after an optional delay,
/// recording every initialization and generate call.
struct ScriptedBackend {
    counters: Arc<Counters>,
    reply: String,
    delay: Duration,
}

impl ScriptedBackend {
    fn new(reply: &str) -> (Self, Arc<Counters>) {
        Self::with_delay(reply, Duration::ZERO)
    }

    fn with_delay(reply: &str, delay: Duration) -> (Self, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        (
            Self {
                counters: counters.clone(),
                reply: reply.to_string(),
                delay,
            },
            counters,
        )
    }
}

#[async_trait]
impl LanguageBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn start_session(
        &self,
        instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError> {
        self.counters.inits.fetch_add(1, Ordering::SeqCst);
        self.counters
            .instructions
            .lock()
            .unwrap()
            .push(instructions.to_string());
        Ok(Box::new(ScriptedSession {
            counters: self.counters.clone(),
            reply: self.reply.clone(),
            delay: self.delay,
        }))
    }
}

struct ScriptedSession {
    counters: Arc<Counters>,
    reply: String,
    delay: Duration,
}

#[async_trait]
impl BackendSession for ScriptedSession {
    async fn generate(&self, _input: &str) -> Result<String, BackendError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.counters.generates.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Backend whose sessions build fine but fail on every generate call.
struct BrokenSessionBackend;

#[async_trait]
impl LanguageBackend for BrokenSessionBackend {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn start_session(
        &self,
        _instructions: &str,
    ) -> Result<Box<dyn BackendSession>, BackendError> {
        Ok(Box::new(BrokenSession))
    }
}

struct BrokenSession;

#[async_trait]
impl BackendSession for BrokenSession {
    async fn generate(&self, _input: &str) -> Result<String, BackendError> {
        Err(BackendError::InvocationFailed("stubbed failure".to_string()))
    }
}

fn engine(backend: Arc<dyn LanguageBackend>) -> ResponseEngine {
    ResponseEngine::new(backend, FallbackResponder::new(), Duration::from_secs(5))
}

#[tokio::test]
async fn unavailable_backend_still_replies() {
    let engine = engine(Arc::new(UnavailableBackend));
    let reply = engine.respond("who are you?", "persona").await;
    assert_eq!(reply, IDENTITY_REPLY);
}

#[tokio::test]
async fn failing_backend_output_comes_from_fallback() {
    let engine = engine(Arc::new(BrokenSessionBackend));
    for input in ["who are you?", "hello there", "an ordinary entry", "magic"] {
        let reply = engine.respond(input, "persona").await;
        assert!(!reply.is_empty());
        assert!(
            FallbackResponder::could_produce(input, &reply),
            "unexpected reply {:?} for input {:?}",
            reply,
            input
        );
    }
}

#[tokio::test]
async fn successful_backend_reply_is_verbatim() {
    let (backend, _) = ScriptedBackend::new("  A reply, untouched.  ");
    let engine = engine(Arc::new(backend));
    let reply = engine.respond("dear diary", "persona").await;
    assert_eq!(reply, "  A reply, untouched.  ");
}

#[tokio::test]
async fn empty_backend_reply_routes_to_fallback() {
    let (backend, _) = ScriptedBackend::new("   ");
    let engine = engine(Arc::new(backend));
    let reply = engine.respond("an ordinary entry", "persona").await;
    assert!(!reply.trim().is_empty());
    assert!(FallbackResponder::could_produce("an ordinary entry", &reply));
}

#[tokio::test]
async fn slow_backend_times_out_into_fallback() {
    let (backend, counters) = ScriptedBackend::with_delay("too late", Duration::from_secs(30));
    let engine = ResponseEngine::new(
        Arc::new(backend),
        FallbackResponder::new(),
        Duration::from_millis(50),
    );

    let reply = engine.respond("who are you?", "persona").await;
    assert_eq!(reply, IDENTITY_REPLY);
    assert_eq!(counters.generates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn session_rebuilt_only_on_prompt_change() {
    let (backend, counters) = ScriptedBackend::new("in character");
    let engine = engine(Arc::new(backend));

    engine.respond("first entry", "prompt one").await;
    engine.respond("second entry", "prompt one").await;
    assert_eq!(counters.inits.load(Ordering::SeqCst), 1);

    engine.respond("third entry", "prompt two").await;
    assert_eq!(counters.inits.load(Ordering::SeqCst), 2);

    let instructions = counters.instructions.lock().unwrap();
    assert_eq!(*instructions, vec!["prompt one", "prompt two"]);
}

#[tokio::test]
async fn failed_initialization_is_retried_next_turn() {
    let engine = engine(Arc::new(UnavailableBackend));

    engine.respond("first entry", "persona").await;
    // Same prompt again: the failed init must not be cached as a session.
    let reply = engine.respond("who are you?", "persona").await;
    assert_eq!(reply, IDENTITY_REPLY);
}
