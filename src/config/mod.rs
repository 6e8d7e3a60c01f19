// src/config/mod.rs
// All tunables load from the environment, with a .env file honored when present.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct RiddleConfig {
    // ── Backend Configuration
    pub backend_base_url: String,
    pub backend_api_key: String,
    pub model: String,
    pub max_output_tokens: usize,
    pub temperature: f32,

    // ── Turn Handling
    // Seconds before an in-flight backend call is abandoned and the
    // fallback responder answers instead.
    pub response_timeout: u64,

    // ── Settings Database
    pub database_url: String,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and stray whitespace; a variable
// that fails to parse falls back to its default rather than aborting.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl RiddleConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            backend_base_url: env_var_or("RIDDLE_BACKEND_URL", "https://api.openai.com".to_string()),
            backend_api_key: env_var_or("RIDDLE_API_KEY", String::new()),
            model: env_var_or("RIDDLE_MODEL", "gpt-4o-mini".to_string()),
            max_output_tokens: env_var_or("RIDDLE_MAX_OUTPUT_TOKENS", 256),
            temperature: env_var_or("RIDDLE_TEMPERATURE", 0.8),
            response_timeout: env_var_or("RIDDLE_RESPONSE_TIMEOUT", 12),
            database_url: env_var_or("RIDDLE_DATABASE_URL", "sqlite:./riddle.db".to_string()),
            log_level: env_var_or("RIDDLE_LOG_LEVEL", "info".to_string()),
        }
    }
}

pub static CONFIG: Lazy<RiddleConfig> = Lazy::new(RiddleConfig::from_env);
