//! Ollama-compatible API (`api/*`).

use serde_json::Value;
use tracing::debug;

use crate::Result;
use crate::client::{self, SharpAiClient};
use crate::transport::ApiRequest;
use crate::types::ollama::{
    ChatRequest, ChatResponse, DeleteRequest, EmbedRequest, EmbedResponse, GenerateOptions,
    GenerateRequest, GenerateResponse, PullRequest, TagsResponse,
};
use crate::types::{ChatMessage, TextInput};

/// Client for the Ollama-compatible endpoints. All requests are non-streaming.
#[derive(Debug, Clone)]
pub struct Ollama {
    client: SharpAiClient,
}

impl Ollama {
    pub fn new(client: SharpAiClient) -> Self {
        Self { client }
    }

    pub fn from_global() -> Result<Self> {
        Ok(Self::new(client::client()?))
    }

    /// List locally available models (`GET api/tags`).
    pub async fn list_models(&self) -> Result<TagsResponse> {
        self.client.request(ApiRequest::get("api/tags")).await?.decode()
    }

    /// Pull a model from the registry (`POST api/pull`).
    pub async fn pull_model(&self, model: &str) -> Result<Value> {
        debug!(model, "pulling model");
        let request = ApiRequest::post("api/pull").json(&PullRequest {
            model: model.to_string(),
        })?;
        self.client.request(request).await?.into_value()
    }

    /// Delete a local model (`DELETE api/delete` with a JSON body).
    pub async fn delete_model(&self, name: &str) -> Result<Value> {
        debug!(name, "deleting model");
        let request = ApiRequest::delete("api/delete").json(&DeleteRequest {
            name: name.to_string(),
        })?;
        self.client.request(request).await?.into_value()
    }

    /// Embed one string or a batch (`POST api/embed`).
    pub async fn generate_embedding(
        &self,
        model: &str,
        input: impl Into<TextInput>,
    ) -> Result<EmbedResponse> {
        let request = ApiRequest::post("api/embed").json(&EmbedRequest {
            model: model.to_string(),
            input: input.into(),
        })?;
        self.client.request(request).await?.decode()
    }

    /// Complete `prompt` (`POST api/generate`).
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: Option<GenerateOptions>,
    ) -> Result<GenerateResponse> {
        let request = ApiRequest::post("api/generate").json(&GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
            options,
        })?;
        self.client.request(request).await?.decode()
    }

    /// Continue a conversation (`POST api/chat`).
    pub async fn chat(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        options: Option<GenerateOptions>,
    ) -> Result<ChatResponse> {
        let request = ApiRequest::post("api/chat").json(&ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
            options,
        })?;
        self.client.request(request).await?.decode()
    }
}
