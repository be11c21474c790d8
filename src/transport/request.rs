//! Request descriptor and decoded response body.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::url::QueryParams;
use crate::{Result, SharpAiError};

/// Body sent with a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    None,
    /// Serialized with `serde_json` once and reused on every attempt.
    Json(Value),
    /// Sent as-is; the caller is responsible for the `Content-Type`.
    Raw(Vec<u8>),
}

impl RequestBody {
    pub(crate) fn into_bytes(self) -> Result<Option<Vec<u8>>> {
        match self {
            RequestBody::None => Ok(None),
            RequestBody::Json(value) => Ok(Some(serde_json::to_vec(&value)?)),
            RequestBody::Raw(bytes) => Ok(Some(bytes)),
        }
    }
}

/// One logical API call: verb, relative path, query, body and extra headers.
///
/// ```rust
/// # use sharpai::{ApiRequest, QueryParams};
/// let request = ApiRequest::get("v1.0/nodes/abc")
///     .query(QueryParams::new().flag("incldata"));
/// assert_eq!(request.path, "v1.0/nodes/abc");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured endpoint. May already carry a query string.
    pub path: String,
    pub query: QueryParams,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::default(),
            body: RequestBody::None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replace the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Send `bytes` verbatim as the payload.
    pub fn raw(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = RequestBody::Raw(bytes.into());
        self
    }

    /// Add a single header, overriding any default of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge `headers` into the request headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Zero-length body.
    Empty,
    Json(Value),
    /// Non-empty body that is not JSON, returned untouched.
    Raw(Vec<u8>),
}

impl ResponseBody {
    /// Classify a successful body: empty, JSON, or raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(bytes.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    /// The body as a JSON value; an empty body is `null`.
    pub fn into_value(self) -> Result<Value> {
        match self {
            ResponseBody::Empty => Ok(Value::Null),
            ResponseBody::Json(value) => Ok(value),
            ResponseBody::Raw(bytes) => Err(SharpAiError::UnexpectedBody(format!(
                "expected JSON, got {} bytes of non-JSON content",
                bytes.len()
            ))),
        }
    }

    /// Deserialize the body into `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_value()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_decodes_to_null() {
        let body = ResponseBody::from_bytes(b"");
        assert!(body.is_empty());
        assert_eq!(body.into_value().unwrap(), Value::Null);
    }

    #[test]
    fn non_json_body_is_raw() {
        let body = ResponseBody::from_bytes(b"Not valid JSON");
        assert_eq!(body, ResponseBody::Raw(b"Not valid JSON".to_vec()));
        assert!(matches!(
            body.into_value(),
            Err(SharpAiError::UnexpectedBody(_))
        ));
    }

    #[test]
    fn json_body_decodes_into_type() {
        let body = ResponseBody::from_bytes(br#"{"data": "test"}"#);
        let value: std::collections::HashMap<String, String> = body.decode().unwrap();
        assert_eq!(value["data"], "test");
    }

    #[test]
    fn caller_headers_override_defaults() {
        let request = ApiRequest::get("x")
            .header(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain"),
            )
            .header(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        assert_eq!(request.headers.len(), 1);
        assert_eq!(
            request.headers[reqwest::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
