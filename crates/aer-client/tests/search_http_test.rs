//! Search, tag and connectivity calls over real HTTP against a mock Aer server.

use std::sync::Arc;

use aer_client::{AerClient, ReqwestTransport, TracingNotifier};
use aer_core::{ClientConfig, Error, TransportConfig};
use aer_crypto::{derive_key_from_user_id, encrypt};
use aer_search::resolve_preview;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> AerClient {
    let config = ClientConfig::new("aer_user42").with_base_url(server.uri());
    let transport = ReqwestTransport::new(TransportConfig::default()).expect("transport");
    AerClient::new(config, Arc::new(transport), Arc::new(TracingNotifier))
}

#[tokio::test]
async fn test_search_falls_back_to_context_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "busy"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/context/search"))
        .and(header("Authorization", "Bearer aer_user42"))
        .and(body_json(json!({"query": "beta launch", "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [{"title": "Beta plan", "score": 0.9}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).search("beta launch", 5).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.as_deref(), Some("Beta plan"));
}

#[tokio::test]
async fn test_search_all_endpoints_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/context/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    match client(&server).search("anything", 5).await {
        Err(Error::SearchFailed(reason)) => assert_eq!(reason, "HTTP 404"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_assist_ranks_title_matches_first_and_opens_previews() {
    let server = MockServer::start().await;
    let key = derive_key_from_user_id("user42");
    let sealed = encrypt("Quarterly budget numbers for the design team", &key).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(body_json(json!({"query": "budget", "limit": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"title": "Lunch menu", "content": "soup and bread"},
                {"title": "Budget review", "encryptedContent": sealed},
            ]
        })))
        .mount(&server)
        .await;

    let found = client(&server).assist("  budget  ").await.unwrap();
    assert_eq!(found.user_id.as_deref(), Some("user42"));
    assert_eq!(found.results.len(), 2);

    let best = &found.results[0];
    assert_eq!(best.item.title.as_deref(), Some("Budget review"));
    assert!(best.score > found.results[1].score);
    assert!(resolve_preview(&best.item, &key).starts_with("Quarterly budget"));
}

#[tokio::test]
async fn test_tags_and_server_assisted_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["Rust", "tokio"]})))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.tags("async runtimes", "notes").await, vec!["Rust", "tokio"]);

    let text = "short";
    assert_eq!(client.filter(text, "").await, "short");

    let requests = server.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    assert_eq!(sent["title"], "notes");
    assert_eq!(sent["totalContexts"], 1);
}

#[tokio::test]
async fn test_tag_lookup_failure_yields_no_tags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client(&server).tags("text", "").await.is_empty());
}

#[tokio::test]
async fn test_connection_probe_uses_options() {
    let server = MockServer::start().await;
    Mock::given(method("OPTIONS"))
        .and(path("/api/context/upload"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client(&server).test_connection().await);
}

#[tokio::test]
async fn test_connection_refused_is_unreachable() {
    let config = ClientConfig::new("aer_user42").with_base_url("http://127.0.0.1:1");
    let client = AerClient::http(config, TransportConfig::default()).unwrap();
    assert!(!client.test_connection().await);
}
