//! SharpAI - Rust SDK for the SharpAI inference service
//!
//! The service exposes an Ollama-compatible API, an OpenAI-compatible API and
//! a versioned REST convention for its resources. This crate provides:
//!
//! - a [`SharpAiClient`] handle over an HTTP transport with retry on
//!   transport failures and typed errors for server-reported failures,
//! - endpoint facades ([`Ollama`], [`OpenAi`], [`Connectivity`]),
//! - capability traits for REST resources ([`resource`]).
//!
//! # Chat Example
//!
//! ```rust,no_run
//! use sharpai::{ChatMessage, Ollama, SharpAiClient};
//!
//! #[tokio::main]
//! async fn main() -> sharpai::Result<()> {
//!     let client = SharpAiClient::builder()
//!         .endpoint("http://localhost:8000")
//!         .timeout(30)
//!         .build()?;
//!
//!     let response = Ollama::new(client)
//!         .chat(
//!             "llama3",
//!             vec![
//!                 ChatMessage::system("You are a helpful assistant."),
//!                 ChatMessage::user("What is the capital of France?"),
//!             ],
//!             None,
//!         )
//!         .await?;
//!
//!     println!("{}", response.content().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Process-wide client
//!
//! ```rust,no_run
//! use sharpai::types::openai::EmbeddingRequest;
//! use sharpai::OpenAi;
//!
//! #[tokio::main]
//! async fn main() -> sharpai::Result<()> {
//!     sharpai::configure("http://localhost:8000", 10, 3)?;
//!
//!     let embeddings = OpenAi::from_global()?
//!         .create_embedding(&EmbeddingRequest::new("all-minilm", "Hello, world!"))
//!         .await?;
//!
//!     println!("Dimensions: {}", embeddings.data[0].embedding.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod resource;
pub mod telemetry;
pub mod transport;
pub mod types;
pub mod url;
pub mod version;

// Re-export main types at crate root
pub use client::{SharpAiBuilder, SharpAiClient, client, configure};
pub use config::ClientConfig;
pub use endpoints::{Connectivity, Ollama, OpenAi};
pub use error::{ApiErrorCode, Result, SharpAiError};
pub use resource::{ApiResource, Include, Resource};
pub use transport::{ApiRequest, RequestBody, ResponseBody, RetryConfig};
pub use types::{
    ChatMessage, EnumerationOrder, EnumerationQuery, EnumerationResult, Expr, Operator, Role,
    TextInput, Timestamp,
};
pub use url::QueryParams;
