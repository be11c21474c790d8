//! Text input accepted by the embedding and completion endpoints

use serde::{Deserialize, Serialize};

/// A single string or a batch of strings.
///
/// Serialized untagged, so `"hello"` and `["a", "b"]` are both valid on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Single(String),
    Batch(Vec<String>),
}

impl TextInput {
    /// Number of strings carried.
    pub fn len(&self) -> usize {
        match self {
            TextInput::Single(_) => 1,
            TextInput::Batch(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Single(value)
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Single(value.to_string())
    }
}

impl From<Vec<String>> for TextInput {
    fn from(value: Vec<String>) -> Self {
        TextInput::Batch(value)
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(value: Vec<&str>) -> Self {
        TextInput::Batch(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for TextInput {
    fn from(value: &[&str]) -> Self {
        TextInput::Batch(value.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_batch_serialize_untagged() {
        let single = serde_json::to_value(TextInput::from("hi")).unwrap();
        assert_eq!(single, serde_json::json!("hi"));

        let batch = serde_json::to_value(TextInput::from(vec!["a", "b"])).unwrap();
        assert_eq!(batch, serde_json::json!(["a", "b"]));
    }

    #[test]
    fn len_counts_strings() {
        assert_eq!(TextInput::from("x").len(), 1);
        assert!(TextInput::Batch(vec![]).is_empty());
    }
}
