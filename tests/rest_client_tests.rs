//! Integration tests for the REST API client functionality.
//!
//! These tests verify path normalization, the convenience methods and error
//! wrapping of [`RestClient`].

use std::collections::HashMap;

use chartmogul::clients::rest::{RestClient, RestError};
use chartmogul::clients::HttpError;
use chartmogul::{ApiKey, BaseUrl, ChartMogulConfig};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server: &MockServer) -> RestClient {
    let config = ChartMogulConfig::builder()
        .api_key(ApiKey::new("test-api-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

// ============================================================================
// Path Handling
// ============================================================================

#[tokio::test]
async fn test_leading_and_trailing_slashes_are_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/data_sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data_sources": []})))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    client.get("/v1/data_sources/", None).await.unwrap();
    client.get("v1/data_sources", None).await.unwrap();
}

#[tokio::test]
async fn test_empty_path_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let result = client.get("/", None).await;

    assert!(matches!(result, Err(RestError::InvalidPath { ref path }) if path == "/"));
}

// ============================================================================
// Convenience Methods
// ============================================================================

#[tokio::test]
async fn test_get_with_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("status", "Active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let query = HashMap::from([("status".to_string(), "Active".to_string())]);

    let response = client.get("/v1/customers", Some(query)).await.unwrap();
    assert_eq!(response.body["entries"], json!([]));
}

#[tokio::test]
async fn test_write_methods_send_json_bodies() {
    let server = MockServer::start().await;

    for verb in ["POST", "PUT", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/v1/customers/cus_1/attributes/tags"))
            .and(body_json(json!({"tags": ["vip"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["vip"]})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = create_test_client(&server);
    let path = "/v1/customers/cus_1/attributes/tags";
    let body = json!({"tags": ["vip"]});

    client.post(path, body.clone()).await.unwrap();
    client.put(path, body.clone()).await.unwrap();
    client.patch(path, body.clone()).await.unwrap();
    client.delete_with_body(path, body).await.unwrap();
}

#[tokio::test]
async fn test_delete_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/customers/cus_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = client.delete("/v1/customers/cus_1", None).await.unwrap();

    assert_eq!(response.code, 204);
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn test_api_errors_are_wrapped_as_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/customers/merges"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "message": "Customers cannot be merged"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let error = client
        .post("/v1/customers/merges", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        RestError::Http(HttpError::Response(ref e)) if e.code == 422
    ));
    assert!(error.to_string().contains("Customers cannot be merged"));
}

#[test]
fn test_rest_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
    assert_send_sync::<RestError>();
}
