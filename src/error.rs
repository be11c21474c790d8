//! SharpAI error types

use serde::Deserialize;

/// SharpAI error types
#[derive(Debug, thiserror::Error)]
pub enum SharpAiError {
    // Server-reported errors (mapped from the `Error` code of the error envelope)
    #[error("authentication failed ({status}): {description}")]
    Authentication { status: u16, description: String },

    #[error("authorization failed ({status}): {description}")]
    Authorization { status: u16, description: String },

    #[error("bad request ({status}): {description}")]
    BadRequest { status: u16, description: String },

    #[error("resource not found ({status}): {description}")]
    ResourceNotFound { status: u16, description: String },

    #[error("server error ({status}): {description}")]
    Server { status: u16, description: String },

    #[error("conflict ({status}): {description}")]
    Conflict { status: u16, description: String },

    #[error("resource inactive ({status}): {description}")]
    Inactive { status: u16, description: String },

    #[error("invalid range ({status}): {description}")]
    InvalidRange { status: u16, description: String },

    #[error("resource in use ({status}): {description}")]
    InUse { status: u16, description: String },

    #[error("resource not empty ({status}): {description}")]
    NotEmpty { status: u16, description: String },

    #[error("server failed to deserialize request ({status}): {description}")]
    Deserialization { status: u16, description: String },

    /// The server sent an error envelope whose code is missing or unknown.
    #[error("Invalid error code type '{code}' ({status}): {description}")]
    InvalidErrorCode {
        code: String,
        status: u16,
        description: String,
    },

    // Protocol errors
    #[error("Server responded with non-JSON content ({status})")]
    NonJsonErrorResponse { status: u16, body: Vec<u8> },

    #[error("Unexpected error ({status}): malformed error response")]
    UnexpectedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    // Transport errors
    /// A single failed attempt (connection refused, timeout, DNS, broken body).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request failed after {attempts} attempts")]
    TransportExhausted {
        attempts: u32,
        #[source]
        source: Box<SharpAiError>,
    },

    #[error("client has been closed")]
    Closed,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("SDK is not configured, call `configure` first")]
    NotConfigured,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SharpAiError {
    /// Whether the error is a transport-level failure worth another attempt.
    ///
    /// HTTP error statuses are never transient: the server answered.
    pub fn is_transient(&self) -> bool {
        matches!(self, SharpAiError::Http(_))
    }

    /// Whether the error was reported by the server through an error envelope.
    pub fn is_api_error(&self) -> bool {
        self.error_code().is_some() || matches!(self, SharpAiError::InvalidErrorCode { .. })
    }

    /// The known error code behind a server-reported error.
    pub fn error_code(&self) -> Option<ApiErrorCode> {
        use SharpAiError::*;
        let code = match self {
            Authentication { .. } => ApiErrorCode::AuthenticationFailed,
            Authorization { .. } => ApiErrorCode::AuthorizationFailed,
            BadRequest { .. } => ApiErrorCode::BadRequest,
            ResourceNotFound { .. } => ApiErrorCode::NotFound,
            Server { .. } => ApiErrorCode::InternalError,
            Conflict { .. } => ApiErrorCode::Conflict,
            Inactive { .. } => ApiErrorCode::Inactive,
            InvalidRange { .. } => ApiErrorCode::InvalidRange,
            InUse { .. } => ApiErrorCode::InUse,
            NotEmpty { .. } => ApiErrorCode::NotEmpty,
            Deserialization { .. } => ApiErrorCode::DeserializationError,
            _ => return None,
        };
        Some(code)
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        use SharpAiError::*;
        match self {
            Authentication { status, .. }
            | Authorization { status, .. }
            | BadRequest { status, .. }
            | ResourceNotFound { status, .. }
            | Server { status, .. }
            | Conflict { status, .. }
            | Inactive { status, .. }
            | InvalidRange { status, .. }
            | InUse { status, .. }
            | NotEmpty { status, .. }
            | Deserialization { status, .. }
            | InvalidErrorCode { status, .. }
            | NonJsonErrorResponse { status, .. }
            | UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied description for server-reported errors.
    pub fn description(&self) -> Option<&str> {
        use SharpAiError::*;
        match self {
            Authentication { description, .. }
            | Authorization { description, .. }
            | BadRequest { description, .. }
            | ResourceNotFound { description, .. }
            | Server { description, .. }
            | Conflict { description, .. }
            | Inactive { description, .. }
            | InvalidRange { description, .. }
            | InUse { description, .. }
            | NotEmpty { description, .. }
            | Deserialization { description, .. }
            | InvalidErrorCode { description, .. } => Some(description),
            _ => None,
        }
    }

    /// Build the error for a server error envelope.
    ///
    /// Codes are matched case-insensitively and without underscores, so both
    /// `not_found` and `NotFound` resolve to [`SharpAiError::ResourceNotFound`].
    pub fn from_error_code(code: &str, status: u16, description: impl Into<String>) -> Self {
        let description = description.into();
        let Some(known) = ApiErrorCode::parse(code) else {
            return SharpAiError::InvalidErrorCode {
                code: code.to_string(),
                status,
                description,
            };
        };
        match known {
            ApiErrorCode::AuthenticationFailed => {
                SharpAiError::Authentication { status, description }
            }
            ApiErrorCode::AuthorizationFailed => {
                SharpAiError::Authorization { status, description }
            }
            ApiErrorCode::BadRequest | ApiErrorCode::TooLarge => {
                SharpAiError::BadRequest { status, description }
            }
            ApiErrorCode::NotFound => SharpAiError::ResourceNotFound { status, description },
            ApiErrorCode::InternalError => SharpAiError::Server { status, description },
            ApiErrorCode::Conflict => SharpAiError::Conflict { status, description },
            ApiErrorCode::Inactive => SharpAiError::Inactive { status, description },
            ApiErrorCode::InvalidRange => SharpAiError::InvalidRange { status, description },
            ApiErrorCode::InUse => SharpAiError::InUse { status, description },
            ApiErrorCode::NotEmpty => SharpAiError::NotEmpty { status, description },
            ApiErrorCode::DeserializationError => {
                SharpAiError::Deserialization { status, description }
            }
        }
    }
}

/// Error codes the server places in the `Error` field of an error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    AuthenticationFailed,
    AuthorizationFailed,
    BadRequest,
    NotFound,
    InternalError,
    TooLarge,
    Conflict,
    Inactive,
    InvalidRange,
    InUse,
    NotEmpty,
    DeserializationError,
}

impl ApiErrorCode {
    const ALL: [ApiErrorCode; 12] = [
        ApiErrorCode::AuthenticationFailed,
        ApiErrorCode::AuthorizationFailed,
        ApiErrorCode::BadRequest,
        ApiErrorCode::NotFound,
        ApiErrorCode::InternalError,
        ApiErrorCode::TooLarge,
        ApiErrorCode::Conflict,
        ApiErrorCode::Inactive,
        ApiErrorCode::InvalidRange,
        ApiErrorCode::InUse,
        ApiErrorCode::NotEmpty,
        ApiErrorCode::DeserializationError,
    ];

    /// Wire spelling of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorCode::AuthenticationFailed => "authentication_failed",
            ApiErrorCode::AuthorizationFailed => "authorization_failed",
            ApiErrorCode::BadRequest => "bad_request",
            ApiErrorCode::NotFound => "not_found",
            ApiErrorCode::InternalError => "internal_error",
            ApiErrorCode::TooLarge => "too_large",
            ApiErrorCode::Conflict => "conflict",
            ApiErrorCode::Inactive => "inactive",
            ApiErrorCode::InvalidRange => "invalid_range",
            ApiErrorCode::InUse => "in_use",
            ApiErrorCode::NotEmpty => "not_empty",
            ApiErrorCode::DeserializationError => "deserialization_error",
        }
    }

    /// Parse a code, ignoring case and underscores. Returns `None` for unknown codes.
    pub fn parse(code: &str) -> Option<Self> {
        let wanted = normalize(code);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|candidate| normalize(candidate.as_str()) == wanted)
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(code: &str) -> String {
    code.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Error body the server sends with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "Error", alias = "error", default)]
    pub error: Option<String>,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: Option<String>,
}

impl ErrorEnvelope {
    /// Map the envelope through the error taxonomy.
    pub fn into_error(self, status: u16) -> SharpAiError {
        SharpAiError::from_error_code(
            self.error.as_deref().unwrap_or_default(),
            status,
            self.description.unwrap_or_default(),
        )
    }
}

/// Result type alias for SharpAI operations
pub type Result<T> = std::result::Result<T, SharpAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_snake_and_pascal_case() {
        assert_eq!(ApiErrorCode::parse("not_found"), Some(ApiErrorCode::NotFound));
        assert_eq!(ApiErrorCode::parse("NotFound"), Some(ApiErrorCode::NotFound));
        assert_eq!(
            ApiErrorCode::parse("DESERIALIZATION_ERROR"),
            Some(ApiErrorCode::DeserializationError)
        );
        assert_eq!(ApiErrorCode::parse("bogus"), None);
        assert_eq!(ApiErrorCode::parse(""), None);
    }

    #[test]
    fn envelope_without_code_is_invalid_code() {
        let err = ErrorEnvelope::default().into_error(500);
        assert!(matches!(err, SharpAiError::InvalidErrorCode { status: 500, .. }));
        assert!(err.to_string().contains("Invalid error code type"));
    }

    #[test]
    fn only_http_failures_are_transient() {
        assert!(SharpAiError::Http("connection refused".into()).is_transient());
        assert!(
            !SharpAiError::Server {
                status: 500,
                description: "boom".into()
            }
            .is_transient()
        );
        assert!(!SharpAiError::Closed.is_transient());
    }
}
