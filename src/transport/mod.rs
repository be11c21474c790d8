//! HTTP transport: one pooled connection handle, retry on transport
//! failures, and uniform decoding of success and error responses.

mod request;
pub mod retry;

use std::sync::RwLock;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use crate::error::ErrorEnvelope;
use crate::telemetry;
use crate::url::QueryParams;
use crate::version;
use crate::{Result, SharpAiError};

pub use request::{ApiRequest, RequestBody, ResponseBody};
pub use retry::RetryConfig;

/// Executes API requests against a single endpoint.
#[derive(Debug)]
pub struct Transport {
    http: RwLock<Option<reqwest::Client>>,
    endpoint: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl Transport {
    /// Build a transport for `endpoint`.
    ///
    /// The endpoint must be an absolute URL; a trailing `/` is ignored.
    pub fn new(endpoint: impl Into<String>, timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint).map_err(|e| {
            SharpAiError::Configuration(format!("invalid endpoint {endpoint:?}: {e}"))
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SharpAiError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            endpoint,
            timeout,
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Full URL for a relative path plus query.
    pub fn url_for(&self, path: &str, query: &QueryParams) -> String {
        let mut url = format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query.to_query_string());
        }
        url
    }

    /// Execute `request`, retrying transport failures.
    pub async fn request(&self, request: ApiRequest) -> Result<ResponseBody> {
        let http = self.http()?;
        let ApiRequest {
            method,
            path,
            query,
            body,
            headers,
        } = request;
        let url = self.url_for(&path, &query);
        let mut merged = default_headers();
        merged.extend(headers);
        let headers = merged;
        let body = body.into_bytes()?;
        let method_label = method.as_str().to_owned();

        let started = Instant::now();
        let outcome = retry::with_retry(&self.retry, &method_label, |attempt| {
            let mut builder = http
                .request(method.clone(), url.as_str())
                .headers(headers.clone());
            if let Some(bytes) = &body {
                builder = builder.body(bytes.clone());
            }
            let url = url.as_str();
            let method = &method;
            async move {
                debug!(%method, url, attempt = attempt + 1, "sending request");
                let response = builder
                    .send()
                    .await
                    .map_err(|e| SharpAiError::Http(error_chain(&e)))?;
                let status = response.status().as_u16();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| SharpAiError::Http(error_chain(&e)))?;
                Ok((status, content_type, bytes.to_vec()))
            }
        })
        .await;

        let result = outcome.and_then(|(status, content_type, bytes)| {
            debug!(%method, url = %url, status, len = bytes.len(), "received response");
            decode_response(status, content_type.as_deref(), &bytes)
        });

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "method" => method_label.clone(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "method" => method_label)
            .record(started.elapsed().as_secs_f64());

        result
    }

    /// Release the connection pool. Later requests fail with [`SharpAiError::Closed`].
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&self) {
        let mut slot = self.http.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            info!(endpoint = %self.endpoint, "transport closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.http.read().unwrap_or_else(|e| e.into_inner()).is_none()
    }

    fn http(&self) -> Result<reqwest::Client> {
        self.http
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(SharpAiError::Closed)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Ok(agent) = HeaderValue::from_str(&version::user_agent()) {
        headers.insert(USER_AGENT, agent);
    }
    headers
}

/// reqwest hides the interesting part (connection refused, DNS) in the source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Turn a status, `Content-Type` and body into a decoded body or a typed error.
pub(crate) fn decode_response(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<ResponseBody> {
    if status < 400 {
        return Ok(ResponseBody::from_bytes(body));
    }

    let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
    if !is_json {
        return Err(SharpAiError::NonJsonErrorResponse {
            status,
            body: body.to_vec(),
        });
    }

    let envelope: ErrorEnvelope = serde_json::from_slice(body)
        .map_err(|source| SharpAiError::UnexpectedResponse { status, source })?;
    Err(envelope.into_error(status))
}
