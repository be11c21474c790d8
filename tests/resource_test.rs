//! Wiremock integration tests for the resource capability traits.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sharpai::resource::{
    AllRetrievable, ApiResource, Creatable, CreatableMultiple, Deletable, Enumerable,
    EnumerableWithQuery, Exists, Retrievable, Searchable, Updatable,
};
use sharpai::{
    EnumerationQuery, Include, QueryParams, Resource, RetryConfig, SharpAiClient, SharpAiError,
};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Node {
    #[serde(rename = "GUID", default, skip_serializing_if = "Option::is_none")]
    guid: Option<String>,
    #[serde(rename = "Name")]
    name: String,
}

fn node(guid: &str, name: &str) -> Node {
    Node {
        guid: Some(guid.to_string()),
        name: name.to_string(),
    }
}

fn client_for(server: &MockServer) -> SharpAiClient {
    SharpAiClient::builder()
        .endpoint(server.uri())
        .retry_config(
            RetryConfig::new()
                .initial_delay(Duration::from_millis(1))
                .jitter(false),
        )
        .retries(1)
        .build()
        .unwrap()
}

fn nodes(server: &MockServer) -> Resource<Node> {
    Resource::new(client_for(server), "nodes")
}

/// Matches when the raw query string equals `expected` exactly.
fn raw_query(expected: &'static str) -> impl Fn(&Request) -> bool {
    move |req: &Request| req.url.query() == Some(expected)
}

fn no_query() -> impl Fn(&Request) -> bool {
    |req: &Request| req.url.query().is_none()
}

// ============================================================================
// Exists
// ============================================================================

#[tokio::test]
async fn exists_is_true_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v1.0/nodes/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert!(nodes(&server).exists("abc").await);
}

#[tokio::test]
async fn exists_is_false_on_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/v1.0/nodes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!nodes(&server).exists("missing").await);
}

#[tokio::test]
async fn exists_is_false_when_closed() {
    let server = MockServer::start().await;
    let resource = nodes(&server);
    resource.client().close();

    assert!(!resource.exists("abc").await);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn create_puts_model_and_decodes_response() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1.0/nodes"))
        .and(no_query())
        .and(body_json(json!({"Name": "alpha"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"GUID": "n1", "Name": "alpha"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = nodes(&server)
        .create(&Node {
            guid: None,
            name: "alpha".into(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(created, node("n1", "alpha"));
}

#[tokio::test]
async fn create_uses_configured_method_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/nodes"))
        .and(header("x-tenant", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"GUID": "n1", "Name": "a"})))
        .expect(1)
        .mount(&server)
        .await;

    let resource = nodes(&server).with_create_method(Method::POST);
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-tenant"), HeaderValue::from_static("t1"));

    let created = resource
        .create_with_headers(&node("n1", "a"), headers)
        .await
        .unwrap();
    assert_eq!(created.guid.as_deref(), Some("n1"));
}

#[tokio::test]
async fn create_from_value_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = nodes(&server)
        .create_from_value(json!({"Nme": "typo"}))
        .await
        .unwrap_err();

    assert!(matches!(err, SharpAiError::InvalidInput(_)));
}

#[tokio::test]
async fn create_multiple_rejects_none_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = nodes(&server).create_multiple(None).await.unwrap_err();
    assert!(matches!(err, SharpAiError::InvalidInput(_)));
}

#[tokio::test]
async fn create_multiple_empty_returns_empty_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let created = nodes(&server).create_multiple(Some(&[])).await.unwrap();
    assert!(created.is_empty());
}

#[tokio::test]
async fn create_multiple_puts_to_bulk() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1.0/nodes/bulk"))
        .and(body_json(json!([{"Name": "a"}, {"Name": "b"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"GUID": "1", "Name": "a"},
            {"GUID": "2", "Name": "b"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let input = [
        Node {
            guid: None,
            name: "a".into(),
        },
        Node {
            guid: None,
            name: "b".into(),
        },
    ];
    let created = nodes(&server).create_multiple(Some(&input)).await.unwrap();
    assert_eq!(created, vec![node("1", "a"), node("2", "b")]);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn retrieve_with_data_sends_bare_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/nodes/abc"))
        .and(raw_query("incldata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"GUID": "abc", "Name": "a"})))
        .expect(1)
        .mount(&server)
        .await;

    let found = nodes(&server).retrieve("abc", Include::data()).await.unwrap();
    assert_eq!(found, node("abc", "a"));
}

#[tokio::test]
async fn retrieve_with_both_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/nodes/abc"))
        .and(raw_query("incldata&inclsub"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"GUID": "abc", "Name": "a"})))
        .expect(1)
        .mount(&server)
        .await;

    let include = Include::data().with_subordinates(true);
    nodes(&server).retrieve("abc", include).await.unwrap();
}

#[tokio::test]
async fn retrieve_propagates_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/nodes/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"Error": "NotFound", "Description": "no such node"})),
        )
        .mount(&server)
        .await;

    let err = nodes(&server).retrieve("gone", Include::none()).await.unwrap_err();
    assert!(matches!(err, SharpAiError::ResourceNotFound { status: 404, .. }));
    assert_eq!(err.description(), Some("no such node"));
}

#[tokio::test]
async fn retrieve_all_lists_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/nodes"))
        .and(no_query())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"GUID": "1", "Name": "a"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let all = nodes(&server).retrieve_all(Include::none()).await.unwrap();
    assert_eq!(all, vec![node("1", "a")]);
}

#[tokio::test]
async fn retrieve_all_empty_body_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/nodes"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let all = nodes(&server).retrieve_all(Include::none()).await.unwrap();
    assert!(all.is_empty());
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn update_sends_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1.0/nodes/abc"))
        .and(body_json(json!({"Name": "renamed"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"GUID": "abc", "Name": "renamed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let updated = nodes(&server)
        .update("abc", &json!({"Name": "renamed"}))
        .await
        .unwrap();
    assert_eq!(updated.name, "renamed");
}

#[tokio::test]
async fn delete_appends_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1.0/nodes/abc"))
        .and(raw_query("force"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    nodes(&server)
        .delete("abc", &QueryParams::new().flag("force"))
        .await
        .unwrap();
}

// ============================================================================
// Search / Enumerate
// ============================================================================

#[tokio::test]
async fn search_renames_include_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/nodes/search"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"Name": "a", "IncludeData": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Success": true,
            "TotalRecords": 1,
            "Objects": [{"GUID": "1", "Name": "a"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = nodes(&server)
        .search(&json!({"Name": "a", "include_data": true, "include_subordinates": false}))
        .await
        .unwrap();

    assert_eq!(result.total_records, 1);
    assert_eq!(result.objects, vec![node("1", "a")]);
}

#[tokio::test]
async fn search_requires_an_object() {
    let server = MockServer::start().await;
    let err = nodes(&server).search(&json!(["not", "an", "object"])).await.unwrap_err();
    assert!(matches!(err, SharpAiError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn enumerate_uses_v2_with_query_then_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.0/nodes"))
        .and(raw_query("max-keys=5&incldata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Objects": null,
            "EndOfResults": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = nodes(&server)
        .enumerate(Include::data(), &QueryParams::new().param("max-keys", 5))
        .await
        .unwrap();

    assert!(page.objects.is_empty());
    assert!(page.success);
}

#[tokio::test]
async fn enumerate_with_query_posts_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/nodes"))
        .and(body_json(json!({"IncludeData": true, "MaxResults": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MaxResults": 10,
            "TotalRecords": 1,
            "Objects": [{"GUID": "1", "Name": "a"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = EnumerationQuery::new().include_data(true).max_results(10);
    let page = nodes(&server).enumerate_with_query(&query).await.unwrap();

    assert_eq!(page.max_results, 10);
    assert_eq!(page.objects, vec![node("1", "a")]);
}

#[tokio::test]
async fn enumerate_with_default_query_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/nodes"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Objects": []})))
        .expect(1)
        .mount(&server)
        .await;

    let page = nodes(&server)
        .enumerate_with_query(&EnumerationQuery::new())
        .await
        .unwrap();

    assert!(page.is_empty());
}

#[tokio::test]
async fn enumerate_all_follows_continuation_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/nodes"))
        .and(body_partial_json(json!({"ContinuationToken": "page-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EndOfResults": true,
            "Objects": [{"GUID": "2", "Name": "b"}]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.0/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EndOfResults": false,
            "ContinuationToken": "page-2",
            "RecordsRemaining": 1,
            "Objects": [{"GUID": "1", "Name": "a"}]
        })))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let all = nodes(&server)
        .enumerate_all(EnumerationQuery::new().max_results(1))
        .await
        .unwrap();

    assert_eq!(all, vec![node("1", "a"), node("2", "b")]);
}

#[tokio::test]
async fn enumerate_all_stops_on_repeated_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.0/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "EndOfResults": false,
            "ContinuationToken": "stuck",
            "Objects": [{"GUID": "1", "Name": "a"}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let all = nodes(&server)
        .enumerate_all(EnumerationQuery::new())
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
}

// ============================================================================
// Custom resource types
// ============================================================================

/// A resource type that opts into a subset of capabilities.
struct Tenants(SharpAiClient);

impl ApiResource for Tenants {
    type Model = serde_json::Value;

    fn name(&self) -> &str {
        "tenants"
    }

    fn client(&self) -> &SharpAiClient {
        &self.0
    }
}

impl Retrievable for Tenants {}

#[tokio::test]
async fn custom_resource_with_untyped_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/tenants/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"anything": [1, 2]})))
        .mount(&server)
        .await;

    let tenant = Tenants(client_for(&server))
        .retrieve("t1", Include::none())
        .await
        .unwrap();
    assert_eq!(tenant["anything"][1], 2);
}
