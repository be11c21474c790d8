//! OpenAI-compatible API (`v1/*`).

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{self, SharpAiClient};
use crate::transport::ApiRequest;
use crate::types::openai::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
    EmbeddingRequest, EmbeddingResponse,
};
use crate::{Result, SharpAiError};

/// Client for the OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAi {
    client: SharpAiClient,
}

impl OpenAi {
    pub fn new(client: SharpAiClient) -> Self {
        Self { client }
    }

    pub fn from_global() -> Result<Self> {
        Ok(Self::new(client::client()?))
    }

    /// `POST v1/embeddings`
    pub async fn create_embedding(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse> {
        self.post("v1/embeddings", request).await
    }

    /// `POST v1/completions`
    ///
    /// Streaming is not supported; a request with `stream = true` is rejected.
    pub async fn create_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse> {
        reject_streaming(request.stream)?;
        self.post("v1/completions", request).await
    }

    /// `POST v1/chat/completions`
    ///
    /// Streaming is not supported; a request with `stream = true` is rejected.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        reject_streaming(request.stream)?;
        self.post("v1/chat/completions", request).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::post(path).json(body)?;
        self.client.request(request).await?.decode()
    }
}

fn reject_streaming(stream: bool) -> Result<()> {
    if stream {
        return Err(SharpAiError::InvalidInput(
            "streaming responses are not supported".to_string(),
        ));
    }
    Ok(())
}
