//! Reachability check.

use tracing::debug;

use crate::Result;
use crate::client::{self, SharpAiClient};
use crate::transport::ApiRequest;

#[derive(Debug, Clone)]
pub struct Connectivity {
    client: SharpAiClient,
}

impl Connectivity {
    pub fn new(client: SharpAiClient) -> Self {
        Self { client }
    }

    pub fn from_global() -> Result<Self> {
        Ok(Self::new(client::client()?))
    }

    /// `HEAD` on the endpoint root. `true` on any success status, `false` on any error.
    pub async fn validate(&self) -> bool {
        match self.client.request(ApiRequest::head("")).await {
            Ok(_) => true,
            Err(e) => {
                debug!(endpoint = self.client.endpoint(), error = %e, "connectivity check failed");
                false
            }
        }
    }
}
