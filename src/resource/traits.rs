//! One capability trait per verb.
//!
//! Every method is provided; implementing a capability for an [`ApiResource`]
//! is an empty `impl` block. All operations except [`Exists::exists`]
//! propagate transport and server errors unchanged.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{ApiResource, Include};
use crate::transport::{ApiRequest, ResponseBody};
use crate::types::{EnumerationQuery, EnumerationResult};
use crate::url::{self, QueryParams};
use crate::{Result, SharpAiError};

// ============================================================================
// Exists
// ============================================================================

#[async_trait]
pub trait Exists: ApiResource {
    /// `HEAD v1.0/{name}/{id}`. Any failure, including a transport error, reads as absent.
    async fn exists(&self, id: &str) -> bool {
        let path = url::v1(self.name(), &[id], &QueryParams::new());
        match self.client().request(ApiRequest::head(path)).await {
            Ok(_) => true,
            Err(e) => {
                debug!(resource = self.name(), id, error = %e, "exists check failed");
                false
            }
        }
    }
}

// ============================================================================
// Create
// ============================================================================

#[async_trait]
pub trait Creatable: ApiResource {
    /// Send `model` to `v1.0/{name}` with [`create_method`](ApiResource::create_method).
    async fn create(&self, model: &Self::Model) -> Result<Self::Model> {
        self.create_with_headers(model, HeaderMap::new()).await
    }

    async fn create_with_headers(
        &self,
        model: &Self::Model,
        headers: HeaderMap,
    ) -> Result<Self::Model> {
        let path = url::v1(self.name(), &[], &QueryParams::new());
        let request = ApiRequest::new(self.create_method(), path)
            .json(model)?
            .headers(headers);
        self.client().request(request).await?.decode()
    }

    /// Validate an untyped object against [`Model`](ApiResource::Model), then create it.
    async fn create_from_value(&self, value: Value) -> Result<Self::Model> {
        let model: Self::Model = serde_json::from_value(value).map_err(|e| {
            SharpAiError::InvalidInput(format!("invalid {} object: {e}", self.name()))
        })?;
        self.create(&model).await
    }
}

#[async_trait]
pub trait CreatableMultiple: ApiResource {
    /// `PUT v1.0/{name}/bulk`.
    ///
    /// `None` is rejected before any request is made; an empty slice returns
    /// an empty list without contacting the server.
    async fn create_multiple(&self, models: Option<&[Self::Model]>) -> Result<Vec<Self::Model>> {
        let Some(models) = models else {
            return Err(SharpAiError::InvalidInput(
                "objects to create cannot be None".to_string(),
            ));
        };
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let path = url::v1(self.name(), &["bulk"], &QueryParams::new());
        let body = self.client().request(ApiRequest::put(path).json(models)?).await?;
        decode_list(body)
    }
}

// ============================================================================
// Read
// ============================================================================

#[async_trait]
pub trait Retrievable: ApiResource {
    async fn retrieve(&self, id: &str, include: Include) -> Result<Self::Model> {
        let path = url::v1(self.name(), &[id], &include.to_query());
        self.client().request(ApiRequest::get(path)).await?.decode()
    }
}

#[async_trait]
pub trait AllRetrievable: ApiResource {
    async fn retrieve_all(&self, include: Include) -> Result<Vec<Self::Model>> {
        let path = url::v1(self.name(), &[], &include.to_query());
        let body = self.client().request(ApiRequest::get(path)).await?;
        decode_list(body)
    }
}

// ============================================================================
// Update / Delete
// ============================================================================

#[async_trait]
pub trait Updatable: ApiResource {
    /// `PUT v1.0/{name}/{id}` with a partial body.
    ///
    /// The patch is sent as-is; only the response is decoded into the model.
    async fn update<P>(&self, id: &str, patch: &P) -> Result<Self::Model>
    where
        P: Serialize + Sync + ?Sized,
    {
        let path = url::v1(self.name(), &[id], &QueryParams::new());
        let request = ApiRequest::put(path).json(patch)?;
        self.client().request(request).await?.decode()
    }
}

#[async_trait]
pub trait Deletable: ApiResource {
    /// `DELETE v1.0/{name}/{id}`, with `query` appended.
    async fn delete(&self, id: &str, query: &QueryParams) -> Result<()> {
        let path = url::v1(self.name(), &[id], query);
        self.client().request(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

// ============================================================================
// Search / Enumerate
// ============================================================================

#[async_trait]
pub trait Searchable: ApiResource {
    /// `POST v1.0/{name}/search`.
    ///
    /// `criteria` must serialize to a JSON object. `include_data` and
    /// `include_subordinates` keys are sent as `IncludeData` / `IncludeSubordinates`.
    async fn search<C>(&self, criteria: &C) -> Result<EnumerationResult<Self::Model>>
    where
        C: Serialize + Sync + ?Sized,
    {
        let Value::Object(mut criteria) = serde_json::to_value(criteria)? else {
            return Err(SharpAiError::InvalidInput(
                "search criteria must be a JSON object".to_string(),
            ));
        };
        rename_include_flags(&mut criteria);

        let path = url::v1(self.name(), &["search"], &QueryParams::new());
        let request = ApiRequest::post(path)
            .raw(serde_json::to_vec(&criteria)?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.client().request(request).await?.decode()
    }
}

#[async_trait]
pub trait Enumerable: ApiResource {
    /// `GET v2.0/{name}` with `query` plus the include flags.
    async fn enumerate(
        &self,
        include: Include,
        query: &QueryParams,
    ) -> Result<EnumerationResult<Self::Model>> {
        let query = query.clone().extend(&include.to_query());
        let path = url::v2(self.name(), &[], &query);
        self.client().request(ApiRequest::get(path)).await?.decode()
    }
}

#[async_trait]
pub trait EnumerableWithQuery: ApiResource {
    /// `POST v2.0/{name}` with `query` as the body.
    async fn enumerate_with_query(
        &self,
        query: &EnumerationQuery,
    ) -> Result<EnumerationResult<Self::Model>> {
        let path = url::v2(self.name(), &[], &QueryParams::new());
        let request = ApiRequest::post(path).json(query)?;
        self.client().request(request).await?.decode()
    }

    /// Follow continuation tokens until the server reports the end, collecting every object.
    ///
    /// Stops early if the server hands back a token it already returned.
    async fn enumerate_all(&self, query: EnumerationQuery) -> Result<Vec<Self::Model>> {
        let mut query = query;
        let mut objects = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let page = self.enumerate_with_query(&query).await?;
            debug!(
                resource = self.name(),
                received = page.objects.len(),
                remaining = page.records_remaining,
                "enumeration page"
            );
            objects.extend(page.objects);
            match page.continuation_token {
                Some(token) if !page.end_of_results => {
                    if !seen.insert(token.clone()) {
                        warn!(
                            resource = self.name(),
                            %token,
                            "continuation token repeated, stopping"
                        );
                        break;
                    }
                    query.continuation_token = Some(token);
                }
                _ => break,
            }
        }
        Ok(objects)
    }
}

/// An empty body on a list endpoint means an empty list.
fn decode_list<T: serde::de::DeserializeOwned>(body: ResponseBody) -> Result<Vec<T>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.decode()
}

fn rename_include_flags(criteria: &mut Map<String, Value>) {
    for (from, to) in [
        ("include_data", "IncludeData"),
        ("include_subordinates", "IncludeSubordinates"),
    ] {
        if let Some(value) = criteria.remove(from) {
            if is_truthy(&value) {
                criteria.insert(to.to_string(), Value::Bool(true));
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
