//! Builder for configuring client instances

use std::sync::Arc;
use std::time::Duration;

use super::SharpAiClient;
use crate::config::ClientConfig;
use crate::transport::{RetryConfig, Transport};
use crate::{Result, SharpAiError};

/// Builder for configuring [`SharpAiClient`] instances.
#[derive(Debug, Clone, Default)]
pub struct SharpAiBuilder {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    retries: Option<u32>,
    retry_config: Option<RetryConfig>,
}

impl SharpAiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            endpoint: Some(config.endpoint.clone()),
            timeout_secs: Some(config.timeout_secs),
            retries: Some(config.retries),
            retry_config: Some(config.retry_config()),
        }
    }

    /// Base URL of the SharpAI service.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the per-request timeout (seconds, default: 10).
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the maximum number of attempts per request (default: 3).
    ///
    /// Zero is treated as a single attempt.
    pub fn retries(mut self, attempts: u32) -> Self {
        self.retries = Some(attempts);
        self
    }

    /// Replace the full retry policy. An explicit [`retries`](Self::retries) still
    /// overrides its attempt count.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = Some(config);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SharpAiClient> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| SharpAiError::Configuration("endpoint is required".to_string()))?;

        let timeout_secs = self.timeout_secs.unwrap_or(10);
        if timeout_secs == 0 {
            return Err(SharpAiError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let mut retry = self.retry_config.unwrap_or_default();
        if let Some(retries) = self.retries {
            retry = retry.max_attempts(retries);
        }
        // Store the effective attempt count so callers read back what is used.
        let attempts = retry.attempts();
        let retry = retry.max_attempts(attempts);

        let transport = Transport::new(endpoint, Duration::from_secs(timeout_secs), retry)?;
        Ok(SharpAiClient {
            transport: Arc::new(transport),
        })
    }
}
