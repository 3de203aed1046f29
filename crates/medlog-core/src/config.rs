//! Configuration for extraction and storage

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Settings for the extraction endpoint
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key (usually from `CLAUDE_API_KEY`)
    pub api_key: String,

    /// Model name sent with every request
    pub model: String,

    /// Token limit for a single-text request; batches get twice this
    pub max_tokens: u32,

    /// Low temperature keeps replies stable
    pub temperature: f64,

    /// Endpoint base, without the `/v1/messages` path
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 1024,
            temperature: 0.3,
            base_url: "https://api.anthropic.com".to_string(),
            timeout_secs: 60,
        }
    }

    /// API key reduced to its first and last few characters, for logs
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "<missing>".to_string();
        }
        if chars.len() <= 15 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entries per extraction request
    pub batch_size: usize,

    /// Data files untouched for longer than this are swept
    pub retention_days: u64,

    pub llm: LlmConfig,
}

impl Config {
    pub fn new() -> Self {
        Self {
            batch_size: 10,
            retention_days: 30,
            llm: LlmConfig::new(),
        }
    }

    /// Load `medlog.json` (all keys optional), then apply environment
    /// overrides. An unreadable or malformed file falls back to defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config = Self::from_file(config_path);
        config.apply_env();
        if config.batch_size == 0 {
            warn!("batch_size of 0 is not usable, using 1");
            config.batch_size = 1;
        }
        info!(
            batch_size = config.batch_size,
            retention_days = config.retention_days,
            model = %config.llm.model,
            api_key = %config.llm.masked_api_key(),
            "configuration loaded"
        );
        config
    }

    fn from_file(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::new();
        }

        let content = match std::fs::read_to_string(config_path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "cannot read config, using defaults");
                return Self::new();
            }
        };

        match serde_json::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
                Self::new()
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("CLAUDE_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = key.trim().to_string();
            }
        }
        if let Some(size) = env_number("MEDLOG_BATCH_SIZE") {
            self.batch_size = size;
        }
        if let Some(days) = env_number("MEDLOG_RETENTION_DAYS") {
            self.retention_days = days;
        }
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring non-numeric environment override");
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
