// src/controller/mod.rs
//! Conversation turn state machine.
//!
//! Manages transitions for one turn at a time:
//! Idle -> Processing -> Responded -> Idle.
//!
//! `submit` while a turn is processing is a no-op, so at most one backend
//! call is ever in flight. A turn dismissed mid-flight invalidates its id,
//! and the late-arriving reply is discarded instead of being applied to
//! whatever turn is current by then.

use crate::engine::ResponseEngine;
use crate::persona::store::PromptStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Current state of a conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// No pending turn, ready to accept input
    Idle,

    /// A response call is in flight
    Processing,

    /// Reply available, awaiting dismissal
    Responded,
}

/// One request/response cycle as seen by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub input_text: String,
    pub status: TurnStatus,
    pub reply_text: String,
}

impl ConversationTurn {
    fn idle() -> Self {
        Self {
            id: Uuid::new_v4(),
            input_text: String::new(),
            status: TurnStatus::Idle,
            reply_text: String::new(),
        }
    }
}

/// What happened to a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reply was applied to the submitted turn.
    Responded,

    /// Empty input, or another turn was already processing.
    Rejected,

    /// The turn was dismissed while its call was in flight.
    Discarded,
}

pub struct ConversationController {
    engine: Arc<ResponseEngine>,
    prompts: Arc<PromptStore>,
    turn: Mutex<ConversationTurn>,
}

impl ConversationController {
    pub fn new(engine: Arc<ResponseEngine>, prompts: Arc<PromptStore>) -> Self {
        Self {
            engine,
            prompts,
            turn: Mutex::new(ConversationTurn::idle()),
        }
    }

    /// Entry point for the input surface collaborator: one recognized text
    /// per call.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let turn_id = {
            let mut turn = self.turn.lock().unwrap();
            if text.is_empty() || turn.status == TurnStatus::Processing {
                return SubmitOutcome::Rejected;
            }
            let id = Uuid::new_v4();
            *turn = ConversationTurn {
                id,
                input_text: text.to_string(),
                status: TurnStatus::Processing,
                reply_text: String::new(),
            };
            id
        };

        // Prompt is read once at call start; edits apply to the next turn.
        let prompt = self.prompts.get();
        let reply = self.engine.respond(text, &prompt).await;

        let mut turn = self.turn.lock().unwrap();
        if turn.id != turn_id || turn.status != TurnStatus::Processing {
            debug!("Discarding stale reply for turn {}", turn_id);
            return SubmitOutcome::Discarded;
        }
        turn.status = TurnStatus::Responded;
        turn.reply_text = reply;
        SubmitOutcome::Responded
    }

    /// Clear the current turn back to Idle. Called when the user taps to
    /// write again; also invalidates any call still in flight.
    pub fn dismiss(&self) {
        let mut turn = self.turn.lock().unwrap();
        *turn = ConversationTurn::idle();
    }

    /// Snapshot of the current turn for the presentation layer.
    pub fn turn(&self) -> ConversationTurn {
        self.turn.lock().unwrap().clone()
    }
}
