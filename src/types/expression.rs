//! Filter expressions used by enumeration queries

use serde::{Deserialize, Serialize};

/// Comparison operator of an [`Expr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    GreaterThan,
    LessThan,
    #[default]
    Equals,
    Contains,
    NotEquals,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// `Left <Operator> Right`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(rename = "Left", alias = "left", default)]
    pub left: String,
    #[serde(rename = "Operator", alias = "operator", default)]
    pub operator: Operator,
    #[serde(rename = "Right", alias = "right", default)]
    pub right: String,
}

impl Expr {
    pub fn new(left: impl Into<String>, operator: Operator, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            operator,
            right: right.into(),
        }
    }

    pub fn equals(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, Operator::Equals, right)
    }

    pub fn contains(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(left, Operator::Contains, right)
    }
}
