//! Configuration loader
//!
//! Loads application configuration from environment variables, with a
//! `.env` file in the working directory read first if present. Every
//! variable is optional; missing ones fall back to `Config::default()`.
//!
//! ## Environment Variables
//! - `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GEMINI_API_KEY`: AI provider keys
//! - `PROSPECTING_DB_PATH`: SQLite database file path
//! - `ADMIN_TOKEN`: bearer token required on admin-only HTTP routes
//! - `BASE_URL`: public base URL used to build landing page links
//! - `SENDER_SIGNATURE`: signature appended to generated outreach emails
//! - `HTTP_BIND_ADDR`: address the API server binds to
//! - `TESTING_STALE_AFTER_SECS`: seconds after which a stuck TESTING
//!   prospect becomes eligible for re-run (§9)
//! - `RUST_LOG`: tracing filter, read directly by the binary at startup

use std::time::Duration;

use prospecting_domain::{Config, ProspectingError, Result};

/// Loads configuration from the environment, applying `Config::default()`
/// for anything unset.
pub fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();

    let default = Config::default();

    let testing_stale_after = match std::env::var("TESTING_STALE_AFTER_SECS") {
        Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
            ProspectingError::Internal(format!("invalid TESTING_STALE_AFTER_SECS: {e}"))
        })?),
        Err(_) => default.testing_stale_after,
    };

    Ok(Config {
        openai_api_key: non_empty_env("OPENAI_API_KEY"),
        anthropic_api_key: non_empty_env("ANTHROPIC_API_KEY"),
        gemini_api_key: non_empty_env("GEMINI_API_KEY"),
        db_path: non_empty_env("PROSPECTING_DB_PATH").unwrap_or(default.db_path),
        admin_token: non_empty_env("ADMIN_TOKEN").unwrap_or(default.admin_token),
        base_url: non_empty_env("BASE_URL").unwrap_or(default.base_url),
        sender_signature: non_empty_env("SENDER_SIGNATURE").unwrap_or(default.sender_signature),
        http_bind_addr: non_empty_env("HTTP_BIND_ADDR").unwrap_or(default.http_bind_addr),
        testing_stale_after,
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Env vars are process-global; serialize tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn falls_back_to_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        for key in ["OPENAI_API_KEY", "PROSPECTING_DB_PATH", "ADMIN_TOKEN", "TESTING_STALE_AFTER_SECS"] {
            std::env::remove_var(key);
        }

        let config = load_config().expect("config loads with defaults");
        assert_eq!(config.db_path, Config::default().db_path);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn reads_overrides_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("PROSPECTING_DB_PATH", "/tmp/custom.db");
        std::env::set_var("TESTING_STALE_AFTER_SECS", "120");

        let config = load_config().expect("config loads");
        assert_eq!(config.db_path, "/tmp/custom.db");
        assert_eq!(config.testing_stale_after, Duration::from_secs(120));

        std::env::remove_var("PROSPECTING_DB_PATH");
        std::env::remove_var("TESTING_STALE_AFTER_SECS");
    }
}
