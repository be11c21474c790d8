//! Fixed-path facades over the inference endpoints.
//!
//! Each facade wraps a [`SharpAiClient`](crate::SharpAiClient) and is built
//! with `new(client)` or, when a process-wide client has been configured,
//! `from_global()`.

mod connectivity;
mod ollama;
mod openai;

pub use connectivity::Connectivity;
pub use ollama::Ollama;
pub use openai::OpenAi;
