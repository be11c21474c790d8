//! Retry configuration and the shared retry loop used by the transport.
//!
//! Only transport-level failures ([`SharpAiError::is_transient()`]) are
//! retried. HTTP error statuses are returned on the first attempt.
//!
//! Every verb is retried the same way, including PUT, POST and DELETE. A
//! connection that drops after the server processed a non-idempotent request
//! but before the response arrived can therefore submit it twice.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{error, warn};

use crate::telemetry;
use crate::{Result, SharpAiError};

const DEFAULT_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// How often and how patiently the transport re-sends a request whose
/// connection failed.
///
/// The wait before retry `n` (0-based) is `initial_delay * 2^n`, never more
/// than `max_delay`, spread by up to half its length in either direction
/// when `jitter` is on.
///
/// ```rust
/// # use sharpai::RetryConfig;
/// # use std::time::Duration;
/// // Three extra tries against a flaky local server, starting at 200ms.
/// let config = RetryConfig::new()
///     .max_attempts(4)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(false);
/// assert_eq!(config.delay_for_attempt(2), Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Requests sent per call, first one included. `0` behaves like `1`.
    pub max_attempts: u32,
    /// Wait after the first failed attempt.
    pub initial_delay: Duration,
    /// Ceiling for any single wait.
    pub max_delay: Duration,
    /// Spread each wait by up to ±50%.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Three attempts, 500ms initial wait, 30s ceiling, jitter on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Send every request exactly once.
    pub fn disabled() -> Self {
        Self::new().max_attempts(1)
    }

    pub fn max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    pub fn initial_delay(self, initial_delay: Duration) -> Self {
        Self {
            initial_delay,
            ..self
        }
    }

    pub fn max_delay(self, max_delay: Duration) -> Self {
        Self { max_delay, ..self }
    }

    pub fn jitter(self, jitter: bool) -> Self {
        Self { jitter, ..self }
    }

    /// Attempts the transport really makes: `max_attempts`, at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Backoff before retry `attempt` (0-based), without jitter.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// The wait actually slept before retry `attempt`: the backoff with
    /// jitter applied, still capped at `max_delay`.
    pub fn effective_delay(&self, attempt: u32) -> Duration {
        let base = self.delay_for_attempt(attempt);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let base_ms = base.as_millis() as f64;
        let offset = rand::thread_rng().gen_range(-0.5..=0.5) * base_ms;
        Duration::from_millis((base_ms + offset).max(0.0) as u64).min(self.max_delay)
    }
}

/// Run `f` until it succeeds, returns an error the server produced, or the
/// attempts run out. `f` receives the 0-based attempt number.
///
/// Running out wraps the last transport failure in
/// [`SharpAiError::TransportExhausted`].
pub(crate) async fn with_retry<F, Fut, T>(config: &RetryConfig, method: &str, f: F) -> Result<T>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.attempts();
    let mut last_err = None;
    for attempt in 0..attempts {
        match f(attempt).await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                if attempt + 1 < attempts {
                    metrics::counter!(telemetry::RETRIES_TOTAL, "method" => method.to_owned())
                        .increment(1);
                    let delay = config.effective_delay(attempt);
                    warn!(
                        method,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transport failure"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e), // the server answered, no retry
        }
    }
    let source = last_err.unwrap_or_else(|| SharpAiError::Http("no attempt was made".into()));
    error!(method, attempts, error = %source, "giving up after transport failures");
    Err(SharpAiError::TransportExhausted {
        attempts,
        source: Box::new(source),
    })
}
