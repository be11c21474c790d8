//! Client configuration.
//!
//! Configuration can be built in code, loaded from a TOML file, or taken
//! from the environment. File resolution order:
//! 1. explicit path (if provided)
//! 2. `~/.sharpai/config.toml` (user)
//!
//! Environment variables override file values:
//! `SHARPAI_ENDPOINT`, `SHARPAI_TIMEOUT` (seconds), `SHARPAI_RETRIES`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::transport::RetryConfig;
use crate::{Result, SharpAiError};

/// Environment variable holding the endpoint URL.
pub const ENV_ENDPOINT: &str = "SHARPAI_ENDPOINT";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "SHARPAI_TIMEOUT";
/// Environment variable holding the maximum number of attempts.
pub const ENV_RETRIES: &str = "SHARPAI_RETRIES";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the SharpAI API (e.g. `http://localhost:8000`).
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request, including the first (default: 3).
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default)]
    pub backoff: BackoffConfig,
}

/// Delay between attempts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry in milliseconds (default: 500).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Upper bound on any single delay in milliseconds (default: 30000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Randomise delays by up to ±50% (default: true).
    #[serde(default = "default_jitter")]
    pub jitter: bool,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            jitter: default_jitter(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

fn default_jitter() -> bool {
    true
}

impl ClientConfig {
    /// Configuration for `endpoint` with default timeout and retries.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
            backoff: BackoffConfig::default(),
        }
    }

    /// Configuration taken from the environment only. `SHARPAI_ENDPOINT` is required.
    pub fn from_env() -> Result<Self> {
        Self::new(String::new()).with_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from the standard locations, then apply environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_from_file(&path)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML file without applying environment overrides.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SharpAiError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            SharpAiError::Configuration(msg) => {
                SharpAiError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SharpAiError::Configuration(format!("Failed to parse config: {e}")))
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// Values that fail to parse are reported as configuration errors rather than ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = timeout.trim().parse().map_err(|e| {
                SharpAiError::Configuration(format!("{ENV_TIMEOUT}={timeout:?} is not valid: {e}"))
            })?;
        }
        if let Some(retries) = lookup(ENV_RETRIES) {
            self.retries = retries.trim().parse().map_err(|e| {
                SharpAiError::Configuration(format!("{ENV_RETRIES}={retries:?} is not valid: {e}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the configuration can produce a client.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(SharpAiError::Configuration(format!(
                "no endpoint configured (set `endpoint` or {ENV_ENDPOINT})"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SharpAiError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy described by `retries` and `backoff`.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_attempts(self.retries)
            .initial_delay(Duration::from_millis(self.backoff.initial_delay_ms))
            .max_delay(Duration::from_millis(self.backoff.max_delay_ms))
            .jitter(self.backoff.jitter)
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(SharpAiError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".sharpai").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        Err(SharpAiError::Configuration(
            "No config file found. Create ~/.sharpai/config.toml or pass a path".to_string(),
        ))
    }
}
