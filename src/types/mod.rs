//! Request, response and enumeration types.

mod enumeration;
mod expression;
mod input;
mod message;
pub mod ollama;
pub mod openai;

pub use enumeration::{EnumerationOrder, EnumerationQuery, EnumerationResult, Timestamp};
pub use expression::{Expr, Operator};
pub use input::TextInput;
pub use message::{ChatMessage, Role};
