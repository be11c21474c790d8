use std::time::Duration;

use sharpai::{ClientConfig, RetryConfig};

#[test]
fn retry_config_defaults() {
    let config = RetryConfig::default();
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.initial_delay, Duration::from_millis(500));
    assert_eq!(config.max_delay, Duration::from_secs(30));
    assert!(config.jitter);
}

#[test]
fn retry_config_builder() {
    let config = RetryConfig::new()
        .max_attempts(5)
        .initial_delay(Duration::from_millis(100))
        .max_delay(Duration::from_secs(10))
        .jitter(false);

    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.initial_delay, Duration::from_millis(100));
    assert_eq!(config.max_delay, Duration::from_secs(10));
    assert!(!config.jitter);
}

#[test]
fn retry_config_disabled() {
    let config = RetryConfig::disabled();
    assert_eq!(config.attempts(), 1);
}

#[test]
fn zero_attempts_means_one() {
    assert_eq!(RetryConfig::new().max_attempts(0).attempts(), 1);
}

#[test]
fn retry_config_delay_calculation() {
    let config = RetryConfig::new()
        .initial_delay(Duration::from_millis(100))
        .max_delay(Duration::from_secs(10))
        .jitter(false);

    // Exponential backoff: 100ms, 200ms, 400ms, 800ms, ...
    assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
    assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
    assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
    assert_eq!(config.delay_for_attempt(3), Duration::from_millis(800));
    assert_eq!(config.effective_delay(2), Duration::from_millis(400));
}

#[test]
fn retry_config_delay_capped_at_max() {
    let config = RetryConfig::new()
        .initial_delay(Duration::from_secs(1))
        .max_delay(Duration::from_secs(5))
        .jitter(false);

    // attempt 3 = 1 * 2^3 = 8s, but capped at 5s
    assert_eq!(config.delay_for_attempt(3), Duration::from_secs(5));
    assert_eq!(config.delay_for_attempt(40), Duration::from_secs(5));
}

#[test]
fn jittered_delay_stays_within_bounds() {
    let config = RetryConfig::new()
        .initial_delay(Duration::from_millis(1000))
        .max_delay(Duration::from_millis(1200))
        .jitter(true);

    for _ in 0..100 {
        let delay = config.effective_delay(0);
        assert!(delay >= Duration::from_millis(500), "{delay:?} below lower bound");
        assert!(delay <= Duration::from_millis(1200), "{delay:?} above max_delay");
    }
}

#[test]
fn client_config_builds_retry_policy() {
    let toml = r#"
        endpoint = "http://localhost:8000"
        retries = 7

        [backoff]
        initial_delay_ms = 50
        jitter = false
    "#;
    let retry = ClientConfig::from_toml_str(toml).unwrap().retry_config();
    assert_eq!(retry.max_attempts, 7);
    assert_eq!(retry.initial_delay, Duration::from_millis(50));
    assert_eq!(retry.max_delay, Duration::from_secs(30));
    assert!(!retry.jitter);
}
