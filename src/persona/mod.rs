// src/persona/mod.rs
// Persona prompt definition and the store that manages the active prompt.
// Currently only the Riddle persona ships; the store is persona-agnostic.

pub mod riddle;
pub mod store;

pub use riddle::RIDDLE_PERSONA_PROMPT;
pub use store::{EditGate, OpenGate, PromptError, PromptStore, PurchaseGate};
