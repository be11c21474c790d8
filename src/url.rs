//! URL conventions for versioned resources.
//!
//! CRUD verbs address `v1.0/<resource>[/<id>][?query]`, enumeration
//! addresses `v2.0/<resource>[?query]`. Query parameters without a value are
//! rendered as bare flags (`incldata`, not `incldata=`).

/// Ordered query parameters; a `None` value renders as a bare flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `key=value` pair.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), Some(value.to_string())));
        self
    }

    /// Add a bare flag.
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.pairs.push((key.into(), None));
        self
    }

    /// Add a bare flag only when `enabled` is true.
    pub fn flag_if(self, key: impl Into<String>, enabled: bool) -> Self {
        if enabled { self.flag(key) } else { self }
    }

    /// Append all parameters of `other`.
    pub fn extend(mut self, other: &QueryParams) -> Self {
        self.pairs.extend(other.pairs.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Render as a query string without the leading `?`.
    ///
    /// Valued pairs come first (URL-encoded), flags after them.
    pub fn to_query_string(&self) -> String {
        let valued = self.pairs.iter().filter_map(|(k, v)| {
            v.as_ref()
                .map(|v| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        });
        let flags = self
            .pairs
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| urlencoding::encode(k).into_owned());
        valued.chain(flags).collect::<Vec<_>>().join("&")
    }
}

/// API version prefix of a resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn prefix(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1.0",
            ApiVersion::V2 => "v2.0",
        }
    }
}

/// Build `{version}/{resource}[/{segment}...][?query]`.
///
/// Empty segments are skipped.
pub fn resource_path(
    version: ApiVersion,
    resource: &str,
    segments: &[&str],
    query: &QueryParams,
) -> String {
    let path = std::iter::once(resource)
        .chain(segments.iter().copied())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    let mut url = format!("{}/{}", version.prefix(), path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.to_query_string());
    }
    url
}

/// Shorthand for a `v1.0` path.
pub fn v1(resource: &str, segments: &[&str], query: &QueryParams) -> String {
    resource_path(ApiVersion::V1, resource, segments, query)
}

/// Shorthand for a `v2.0` path.
pub fn v2(resource: &str, segments: &[&str], query: &QueryParams) -> String {
    resource_path(ApiVersion::V2, resource, segments, query)
}
