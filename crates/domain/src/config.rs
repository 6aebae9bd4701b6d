//! Process configuration.
//!
//! This is a plain data holder. Reading it from the environment is an infra
//! concern (see `prospecting_infra::config::loader`); the domain crate only
//! defines the shape and the defaults from the spec's configuration table.

use std::time::Duration;

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub db_path: String,
    pub admin_token: String,
    pub base_url: String,
    pub sender_signature: String,
    pub http_bind_addr: String,
    pub testing_stale_after: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            gemini_api_key: None,
            db_path: "./data/prospecting.db".to_string(),
            admin_token: "changeme-admin-token".to_string(),
            base_url: "http://localhost:8000".to_string(),
            sender_signature: "L'équipe EURKAI".to_string(),
            http_bind_addr: "0.0.0.0:8000".to_string(),
            testing_stale_after: Duration::from_secs(
                crate::constants::DEFAULT_TESTING_STALE_AFTER_SECS as u64,
            ),
        }
    }
}
