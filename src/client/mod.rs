//! Client handle and the optional process-wide client.
//!
//! [`SharpAiClient`] is a cheap-to-clone handle around one [`Transport`].
//! Pass it to resources and endpoint facades explicitly, or install one
//! process-wide with [`configure`] and fetch it with [`client`].

mod builder;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::info;

pub use builder::SharpAiBuilder;

use crate::config::ClientConfig;
use crate::transport::{ApiRequest, ResponseBody, RetryConfig, Transport};
use crate::{Result, SharpAiError};

static GLOBAL_CLIENT: RwLock<Option<SharpAiClient>> = RwLock::new(None);

/// Handle to a configured SharpAI service.
#[derive(Debug, Clone)]
pub struct SharpAiClient {
    transport: Arc<Transport>,
}

impl SharpAiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> SharpAiBuilder {
        SharpAiBuilder::new()
    }

    /// Client for `endpoint` with default timeout and retries.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::builder().endpoint(endpoint).build()
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        SharpAiBuilder::from_config(config).build()
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// Maximum attempts per request.
    pub fn retries(&self) -> u32 {
        self.transport.retry_config().attempts()
    }

    pub fn retry_config(&self) -> &RetryConfig {
        self.transport.retry_config()
    }

    /// Execute a raw request through the shared transport.
    pub async fn request(&self, request: ApiRequest) -> Result<ResponseBody> {
        self.transport.request(request).await
    }

    /// Release the connection pool shared by every clone of this handle.
    pub fn close(&self) {
        self.transport.close();
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

/// Build a client and install it as the process-wide client.
///
/// Re-configuring replaces the previous client; handles already obtained
/// keep using the old one.
pub fn configure(
    endpoint: impl Into<String>,
    timeout_secs: u64,
    retries: u32,
) -> Result<SharpAiClient> {
    let client = SharpAiClient::builder()
        .endpoint(endpoint)
        .timeout(timeout_secs)
        .retries(retries)
        .build()?;
    install(client.clone());
    Ok(client)
}

/// Install an already-built client as the process-wide client.
pub fn install(client: SharpAiClient) {
    info!(
        endpoint = client.endpoint(),
        timeout_secs = client.timeout().as_secs(),
        retries = client.retries(),
        "configured process-wide client"
    );
    let mut slot = GLOBAL_CLIENT.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(client);
}

/// The process-wide client, or [`SharpAiError::NotConfigured`].
pub fn client() -> Result<SharpAiClient> {
    GLOBAL_CLIENT
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
        .ok_or(SharpAiError::NotConfigured)
}

/// Remove the process-wide client. Returns the previous one, if any.
pub fn reset() -> Option<SharpAiClient> {
    GLOBAL_CLIENT
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .take()
}
