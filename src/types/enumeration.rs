//! Paginated enumeration: query, result and timestamps

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::expression::Expr;

/// Point in time reported by the server, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(rename = "Timestamp", alias = "timestamp", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Timestamp {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }
}

/// Sort order of an enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnumerationOrder {
    CreatedAscending,
    #[default]
    CreatedDescending,
    NameAscending,
    NameDescending,
}

/// Body of an enumeration request.
///
/// Only fields set through the builder are sent; the server applies its own
/// defaults (`CreatedDescending`, five results per page) to the rest.
///
/// ```
/// use sharpai::types::{EnumerationQuery, Expr};
///
/// let query = EnumerationQuery::new()
///     .max_results(50)
///     .include_data(true)
///     .label("production")
///     .expr(Expr::equals("Name", "alpha"));
/// assert_eq!(query.max_results, Some(50));
/// assert_eq!(query.include_subordinates, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumerationQuery {
    #[serde(
        rename = "Ordering",
        alias = "ordering",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ordering: Option<EnumerationOrder>,
    #[serde(
        rename = "IncludeData",
        alias = "include_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub include_data: Option<bool>,
    #[serde(
        rename = "IncludeSubordinates",
        alias = "include_subordinates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub include_subordinates: Option<bool>,
    #[serde(
        rename = "MaxResults",
        alias = "max_results",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_results: Option<u32>,
    #[serde(
        rename = "ContinuationToken",
        alias = "continuation_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continuation_token: Option<String>,
    #[serde(
        rename = "Labels",
        alias = "labels",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub labels: Vec<String>,
    #[serde(
        rename = "Tags",
        alias = "tags",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,
    #[serde(
        rename = "Expr",
        alias = "expr",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expr: Option<Expr>,
}

impl EnumerationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordering(mut self, ordering: EnumerationOrder) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn include_data(mut self, include: bool) -> Self {
        self.include_data = Some(include);
        self
    }

    pub fn include_subordinates(mut self, include: bool) -> Self {
        self.include_subordinates = Some(include);
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Resume from the token returned by a previous page.
    pub fn continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn expr(mut self, expr: Expr) -> Self {
        self.expr = Some(expr);
        self
    }
}

/// One page of an enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct EnumerationResult<T> {
    #[serde(rename = "Success", alias = "success", default = "default_true")]
    pub success: bool,
    #[serde(rename = "Timestamp", alias = "timestamp", default)]
    pub timestamp: Timestamp,
    #[serde(
        rename = "MaxResults",
        alias = "max_results",
        default = "default_result_max_results"
    )]
    pub max_results: u32,
    #[serde(rename = "IterationsRequired", alias = "iterations_required", default)]
    pub iterations_required: u32,
    #[serde(
        rename = "ContinuationToken",
        alias = "continuation_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub continuation_token: Option<String>,
    #[serde(rename = "EndOfResults", alias = "end_of_results", default = "default_true")]
    pub end_of_results: bool,
    #[serde(rename = "TotalRecords", alias = "total_records", default)]
    pub total_records: u64,
    #[serde(rename = "RecordsRemaining", alias = "records_remaining", default)]
    pub records_remaining: u64,
    #[serde(
        rename = "Objects",
        alias = "objects",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub objects: Vec<T>,
}

impl<T> Default for EnumerationResult<T> {
    fn default() -> Self {
        Self {
            success: true,
            timestamp: Timestamp::now(),
            max_results: default_result_max_results(),
            iterations_required: 0,
            continuation_token: None,
            end_of_results: true,
            total_records: 0,
            records_remaining: 0,
            objects: Vec::new(),
        }
    }
}

impl<T> EnumerationResult<T> {
    /// Whether another page can be requested.
    pub fn has_more(&self) -> bool {
        !self.end_of_results && self.continuation_token.is_some()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

fn default_true() -> bool {
    true
}

fn default_result_max_results() -> u32 {
    1000
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
