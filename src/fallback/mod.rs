// src/fallback/mod.rs
//! Deterministic responder used whenever the primary backend cannot answer.
//!
//! An ordered rule table is checked first (substring match on the lowercased
//! input, first match wins). When nothing matches, a stock reply is drawn
//! uniformly at random. The function is total: it never returns an empty
//! string, so the diary always writes back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const GREETING_REPLY: &str =
    "Hello there... How delightful that someone has found my diary. What is your name?";

pub const IDENTITY_REPLY: &str =
    "I am Tom Marvolo Riddle, a student at Hogwarts. This diary holds my memories... and so much more.";

pub const NAME_REPLY: &str =
    "Tom Riddle is my name, though I suspect it will not remain so forever. What shall I call you?";

pub const HELP_REPLY: &str =
    "Help? Oh, I can help you indeed... but first, tell me what troubles you.";

pub const MAGIC_REPLY: &str =
    "Ah, magic... Yes, I have a particular interest in the more... advanced forms of magical study.";

/// Atmospheric stock replies for inputs no rule recognizes.
pub const STOCK_REPLIES: &[&str] = &[
    "How curious... I sense great potential in you. Tell me more about yourself.",
    "Interesting... You write to me as if you know who I am. Do you?",
    "The magic in these words intrigues me. What brings you to my diary?",
    "I find myself drawn to your thoughts. We should speak more often.",
    "Your words echo in these pages... I wonder what secrets you carry.",
    "Fascinating... Few have the courage to write in my diary. What is your name?",
    "I can feel your thoughts through the ink... Tell me about your world.",
    "You intrigue me, stranger. What year is it in your time?",
    "Such interesting handwriting... I wonder what other talents you possess.",
    "The pages grow warm with your words... Continue writing to me.",
];

struct FallbackRule {
    triggers: &'static [&'static str],
    // When set, every trigger must appear; otherwise any one suffices.
    require_all: bool,
    reply: &'static str,
}

const RULES: &[FallbackRule] = &[
    FallbackRule {
        triggers: &["hello", "hi"],
        require_all: false,
        reply: GREETING_REPLY,
    },
    FallbackRule {
        triggers: &["who", "you"],
        require_all: true,
        reply: IDENTITY_REPLY,
    },
    FallbackRule {
        triggers: &["name"],
        require_all: false,
        reply: NAME_REPLY,
    },
    FallbackRule {
        triggers: &["help"],
        require_all: false,
        reply: HELP_REPLY,
    },
    FallbackRule {
        triggers: &["magic"],
        require_all: false,
        reply: MAGIC_REPLY,
    },
];

pub struct FallbackResponder {
    rng: Mutex<StdRng>,
}

impl FallbackResponder {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Inject a seeded rng so tests can assert exact output.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn reply(&self, input: &str) -> String {
        let lowered = input.to_lowercase();

        for rule in RULES {
            let matched = if rule.require_all {
                rule.triggers.iter().all(|t| lowered.contains(t))
            } else {
                rule.triggers.iter().any(|t| lowered.contains(t))
            };
            if matched {
                return rule.reply.to_string();
            }
        }

        // Uniform pick, repeats allowed.
        let mut rng = self.rng.lock().unwrap();
        let idx = rng.random_range(0..STOCK_REPLIES.len());
        STOCK_REPLIES[idx].to_string()
    }

    /// True when `reply` could have produced this text for this input,
    /// whether through a rule or the stock pool.
    pub fn could_produce(input: &str, reply: &str) -> bool {
        let lowered = input.to_lowercase();
        for rule in RULES {
            let matched = if rule.require_all {
                rule.triggers.iter().all(|t| lowered.contains(t))
            } else {
                rule.triggers.iter().any(|t| lowered.contains(t))
            };
            if matched {
                return reply == rule.reply;
            }
        }
        STOCK_REPLIES.contains(&reply)
    }
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}
