//! Shared state for the HTTP API.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::assistant::{AssistantError, ChatCompletion, OpenRouterClient, ScriptedAssistant};
use crate::config::AppConfig;
use crate::db::{open_database, DatabaseError};
use crate::symptom_checker::{ApiNinjasClient, SymptomCheckError, SymptomLookup};

/// Hourly allowance as a multiple of the per-minute limit.
const HOURLY_MULTIPLIER: u32 = 20;

/// Tracked clients before idle windows are swept.
const SWEEP_THRESHOLD: usize = 1000;

const HOUR: Duration = Duration::from_secs(3600);

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Assistant(#[from] AssistantError),
    #[error(transparent)]
    SymptomCheck(#[from] SymptomCheckError),
}

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub db_path: PathBuf,
    /// Provider for `/api/assistant`; fails when no key is configured.
    pub llm: Arc<dyn ChatCompletion>,
    /// Provider for chat: the LLM when configured, else the scripted assistant.
    pub chat: Arc<dyn ChatCompletion>,
    pub symptom_lookup: Arc<dyn SymptomLookup>,
    pub llm_configured: bool,
    pub reference_image_base_url: String,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(
        db_path: PathBuf,
        llm: Arc<dyn ChatCompletion>,
        chat: Arc<dyn ChatCompletion>,
        symptom_lookup: Arc<dyn SymptomLookup>,
    ) -> Self {
        Self {
            db_path,
            llm,
            chat,
            symptom_lookup,
            llm_configured: false,
            reference_image_base_url: crate::config::DEFAULT_REFERENCE_IMAGE_BASE_URL.to_string(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::default())),
        }
    }

    /// Build the production context: HTTP clients from config.
    pub fn from_config(config: &AppConfig) -> Result<Self, ContextError> {
        let openrouter = Arc::new(OpenRouterClient::new(
            &config.openrouter_base_url,
            config.openrouter_api_key.clone(),
            config.upstream_timeout_secs,
        )?);
        let llm_configured = openrouter.is_configured();
        let chat: Arc<dyn ChatCompletion> = if llm_configured {
            openrouter.clone()
        } else {
            tracing::warn!("OPENROUTER_API_KEY not set; chat uses the scripted assistant");
            Arc::new(ScriptedAssistant)
        };
        let symptom_lookup = Arc::new(ApiNinjasClient::new(
            &config.api_ninjas_base_url,
            config.api_ninjas_key.clone(),
            config.upstream_timeout_secs,
        )?);

        let mut ctx = Self::new(config.db_path.clone(), openrouter, chat, symptom_lookup)
            .with_rate_limit(config.rate_limit_per_minute);
        ctx.llm_configured = llm_configured;
        ctx.reference_image_base_url = config.reference_image_base_url.clone();
        Ok(ctx)
    }

    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limiter = Arc::new(Mutex::new(RateLimiter::new(
            per_minute,
            per_minute.saturating_mul(HOURLY_MULTIPLIER),
        )));
        self
    }

    /// Open the database for one request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.db_path)
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter: per-client sliding window
// ═══════════════════════════════════════════════════════════

/// Per-client rate limiter with per-minute and per-hour limits.
pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_hour: u32) -> Self {
        Self {
            windows: HashMap::new(),
            per_minute,
            per_hour,
        }
    }

    /// Check if a client is within rate limits. Returns `Ok(())` or
    /// `Err(retry_after_secs)` if exceeded.
    pub fn check(&mut self, client: &str) -> Result<(), u64> {
        let now = Instant::now();
        if self.windows.len() > SWEEP_THRESHOLD {
            self.cleanup(now);
        }
        let entries = self.windows.entry(client.to_string()).or_default();

        entries.retain(|ts| now.duration_since(*ts) < HOUR);

        let last_minute = entries
            .iter()
            .filter(|ts| now.duration_since(**ts) < Duration::from_secs(60))
            .count() as u32;
        if last_minute >= self.per_minute {
            return Err(60);
        }

        if entries.len() as u32 >= self.per_hour {
            return Err(3600);
        }

        entries.push(now);
        Ok(())
    }

    /// Number of clients with a live window.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Drop clients with no request inside the last hour.
    fn cleanup(&mut self, now: Instant) {
        self.windows.retain(|_, entries| {
            entries.retain(|ts| now.duration_since(*ts) < HOUR);
            !entries.is_empty()
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        let per_minute = crate::config::DEFAULT_RATE_LIMIT_PER_MINUTE;
        Self::new(per_minute, per_minute * HOURLY_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_allows_under_limit() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.check("user-1").is_ok());
        assert!(limiter.check("user-1").is_ok());
    }

    #[test]
    fn rate_limiter_rejects_over_per_minute() {
        let mut limiter = RateLimiter::new(2, 1000);
        assert!(limiter.check("user-1").is_ok());
        assert!(limiter.check("user-1").is_ok());
        assert_eq!(limiter.check("user-1"), Err(60));
    }

    #[test]
    fn rate_limiter_rejects_over_per_hour() {
        let mut limiter = RateLimiter::new(100, 3);
        for _ in 0..3 {
            assert!(limiter.check("user-1").is_ok());
        }
        assert_eq!(limiter.check("user-1"), Err(3600));
    }

    #[test]
    fn rate_limiter_isolates_clients() {
        let mut limiter = RateLimiter::new(1, 1000);
        assert!(limiter.check("user-1").is_ok());
        assert!(limiter.check("user-2").is_ok());
        assert_eq!(limiter.check("user-1"), Err(60));
    }

    #[test]
    fn idle_clients_are_swept() {
        let mut limiter = RateLimiter::new(1, 1000);
        for i in 0..=SWEEP_THRESHOLD {
            limiter.windows.insert(format!("ip:idle-{i}"), Vec::new());
        }
        assert!(limiter.check("ip:10.0.0.1").is_ok());
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn active_clients_survive_sweep() {
        let mut limiter = RateLimiter::new(1, 1000);
        assert!(limiter.check("ip:10.0.0.1").is_ok());
        for i in 0..SWEEP_THRESHOLD {
            limiter.windows.insert(format!("ip:idle-{i}"), Vec::new());
        }
        assert_eq!(limiter.check("ip:10.0.0.1"), Err(60));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn context_from_default_config_uses_scripted_chat() {
        let config = AppConfig::default();
        let ctx = ApiContext::from_config(&config).unwrap();
        assert!(!ctx.llm_configured);
        assert_eq!(ctx.chat.name(), "scripted");
        assert_eq!(ctx.llm.name(), "openrouter");
    }

    #[test]
    fn context_with_key_routes_chat_to_llm() {
        let config = AppConfig {
            openrouter_api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        let ctx = ApiContext::from_config(&config).unwrap();
        assert!(ctx.llm_configured);
        assert_eq!(ctx.chat.name(), "openrouter");
    }

    #[test]
    fn context_applies_configured_rate_limit() {
        let config = AppConfig {
            rate_limit_per_minute: 2,
            ..AppConfig::default()
        };
        let ctx = ApiContext::from_config(&config).unwrap();
        let mut limiter = ctx.rate_limiter.lock().unwrap();
        assert!(limiter.check("ip:10.0.0.1").is_ok());
        assert!(limiter.check("ip:10.0.0.1").is_ok());
        assert_eq!(limiter.check("ip:10.0.0.1"), Err(60));
    }
}
