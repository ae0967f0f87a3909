use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;

use super::client::{EsClient, SearchRequest, SearchResponse};
use super::mock::{MockFailure, MockSearchBackend};
use super::{BackendError, SearchBackend};
use crate::model::Document;

/// Serves a throwaway search stub on a loopback port, returning its base
/// URL.
async fn serve_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[test]
fn test_search_request_wire_shape() {
    let request = SearchRequest::new("cats", 200);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "size": 200,
            "query": { "match": { "body": "cats" } }
        })
    );
}

#[test]
fn test_search_response_into_documents() {
    let raw = serde_json::json!({
        "hits": {
            "hits": [
                { "_id": "http://a", "_score": 2.5, "_source": { "body": "text a" } },
                { "_id": "http://b" }
            ]
        }
    });

    let response: SearchResponse = serde_json::from_value(raw).unwrap();
    let docs = response.into_documents();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, "http://a");
    assert_eq!(docs[0].score, Some(2.5));
    assert!(docs[0].fields.contains_key("_source"));
    assert!(!docs[0].grade.is_judged());
    assert_eq!(docs[1].id, "http://b");
    assert!(docs[1].score.is_none());
}

#[test]
fn test_search_response_rejects_missing_hits() {
    let raw = serde_json::json!({ "took": 3 });
    assert!(serde_json::from_value::<SearchResponse>(raw).is_err());
}

#[test]
fn test_es_client_rejects_invalid_url() {
    let err = EsClient::new("not a url", "crawler").unwrap_err();
    assert!(matches!(err, BackendError::InvalidUrl { .. }));
}

#[test]
fn test_doc_url_percent_encodes_id() {
    let client = EsClient::new("http://localhost:9200", "crawler").unwrap();
    let url = client.doc_url("http://example.com/page?x=1").unwrap();

    assert_eq!(
        url.as_str(),
        "http://localhost:9200/crawler/_doc/http:%2F%2Fexample.com%2Fpage%3Fx=1"
    );
}

#[test]
fn test_doc_url_plain_id() {
    let client = EsClient::new("http://localhost:9200/", "crawler").unwrap();
    let url = client.doc_url("doc-42").unwrap();
    assert_eq!(url.as_str(), "http://localhost:9200/crawler/_doc/doc-42");
}

#[tokio::test]
async fn test_search_maps_non_success_status() {
    let router = Router::new().route(
        "/crawler/_search",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve_stub(router).await;

    let client = EsClient::new(&base, "crawler").unwrap();
    let err = client.search("cats").await.unwrap_err();
    assert!(matches!(err, BackendError::BackendStatus { status: 500 }));
}

#[tokio::test]
async fn test_search_maps_undecodable_body() {
    let router = Router::new().route(
        "/crawler/_search",
        post(|| async { "surprise, not json" }),
    );
    let base = serve_stub(router).await;

    let client = EsClient::new(&base, "crawler").unwrap();
    let err = client.search("cats").await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_search_maps_timeout_to_unavailable() {
    let router = Router::new().route(
        "/crawler/_search",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "too late"
        }),
    );
    let base = serve_stub(router).await;

    let client = EsClient::new(&base, "crawler")
        .unwrap()
        .with_timeout(Duration::from_millis(100));
    let err = client.search("cats").await.unwrap_err();
    assert!(matches!(err, BackendError::Unavailable { .. }));
}

#[tokio::test]
async fn test_search_maps_refused_connection_to_unavailable() {
    // Bind a port, learn the address, then close it again.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EsClient::new(&format!("http://{addr}"), "crawler").unwrap();
    let err = client.search("cats").await.unwrap_err();
    assert!(matches!(err, BackendError::Unavailable { .. }));
}

#[tokio::test]
async fn test_search_parses_loopback_hits() {
    let router = Router::new().route(
        "/crawler/_search",
        post(|| async {
            axum::Json(serde_json::json!({
                "hits": { "hits": [ { "_id": "http://a", "_score": 1.5 } ] }
            }))
        }),
    );
    let base = serve_stub(router).await;

    let client = EsClient::new(&base, "crawler").unwrap();
    let docs = client.search("cats").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "http://a");
    assert_eq!(docs[0].score, Some(1.5));
}

#[tokio::test]
async fn test_mock_backend_canned_response() {
    let mock = MockSearchBackend::new();
    mock.insert_response("cats", vec![Document::new("http://a")]);

    let docs = mock.search("cats").await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "http://a");

    let empty = mock.search("dogs").await.unwrap();
    assert!(empty.is_empty());
    assert_eq!(mock.calls(), vec!["cats".to_string(), "dogs".to_string()]);
}

#[tokio::test]
async fn test_mock_backend_failure_injection() {
    let mock = MockSearchBackend::new();
    mock.fail_with(MockFailure::Status(503));

    let err = mock.search("cats").await.unwrap_err();
    assert!(matches!(err, BackendError::BackendStatus { status: 503 }));

    mock.clear_failure();
    assert!(mock.search("cats").await.is_ok());
}
