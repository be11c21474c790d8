//! Telemetry metric name constants.
//!
//! Centralised metric names for SDK requests. Consumers install their own
//! `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `sharpai_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `method`: HTTP verb (e.g. "GET", "PUT")
//! - `status`: outcome: "ok" or "error"

/// Total logical requests issued through the transport (retries excluded).
///
/// Labels: `method`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "sharpai_requests_total";

/// Logical request duration in seconds, including retry delays.
///
/// Labels: `method`.
pub const REQUEST_DURATION_SECONDS: &str = "sharpai_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `method`.
pub const RETRIES_TOTAL: &str = "sharpai_retries_total";
