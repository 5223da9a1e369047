//! Tests for the HTTP module

use super::*;
use crate::config::AuthToken;
use crate::decode::Kind;
use crate::error::{Error, ErrorCategory};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> AuthToken {
    AuthToken::new("test-token", "bearer", i64::MAX)
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("reddit-stream/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_api_request_headers() {
    let request = ApiRequest::post("https://example.com/token", "a=b")
        .header("User-Agent", "ua")
        .header("Authorization", "Basic xyz");

    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.body.as_deref(), Some("a=b"));
    assert_eq!(request.header_value("user-agent"), Some("ua"));
    assert_eq!(request.header_value("AUTHORIZATION"), Some("Basic xyz"));
    assert_eq!(request.header_value("Accept"), None);
}

// ============================================================================
// ReqwestTransport Tests
// ============================================================================

#[tokio::test]
async fn test_reqwest_transport_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .and(header("X-Custom", "value"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().header("X-Custom", "value").build();
    let transport = ReqwestTransport::with_config(config).unwrap();
    let url = format!("{}/r/rust/top.json", mock_server.uri());

    let data = transport.perform(ApiRequest::get(url)).await.unwrap();
    assert_eq!(&data[..], b"hello");
}

#[tokio::test]
async fn test_reqwest_transport_post_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string("grant_type=password"))
        .and(header("User-Agent", "custom-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let url = format!("{}/api/v1/access_token", mock_server.uri());
    let request = ApiRequest::post(url, "grant_type=password").header("User-Agent", "custom-agent");

    transport.perform(request).await.unwrap();
}

#[tokio::test]
async fn test_reqwest_transport_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let transport = ReqwestTransport::new().unwrap();
    let url = format!("{}/missing", mock_server.uri());

    let err = transport
        .perform(ApiRequest::get(url.clone()))
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus {
            status,
            url: err_url,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(err_url, url);
            assert_eq!(body, "Not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reqwest_transport_connection_error() {
    let transport = ReqwestTransport::with_config(
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(5))
            .build(),
    )
    .unwrap();
    let url = "http://127.0.0.1:1/r/rust/top.json";

    let err = transport.perform(ApiRequest::get(url)).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert!(matches!(err, Error::Transport { url: ref u, .. } if u == url));
}

// ============================================================================
// ApiClient Tests
// ============================================================================

#[tokio::test]
async fn test_api_client_sends_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .and(header("User-Agent", "useragent"))
        .and(header("Authorization", "bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "t2",
            "data": {"name": "blah", "link_karma": 10}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new().unwrap());
    let client = ApiClient::new(transport, "useragent", token());

    let thing = client
        .get_thing(&format!("{}/api/v1/me", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(thing.kind(), Kind::Account);
    assert_eq!(thing.as_account().unwrap().link_karma, 10);
}

#[tokio::test]
async fn test_api_client_get_json() {
    let url = "https://oauth.reddit.com/api/v1/scopes";
    let transport = Arc::new(ScriptedTransport::new([Exchange::ok(
        url,
        r#"{"read": {"id": "read"}}"#,
    )]));
    let client = ApiClient::new(transport.clone(), "useragent", token());

    let value: serde_json::Value = client.get_json(url).await.unwrap();
    assert_eq!(value["read"]["id"], "read");
}

#[tokio::test]
async fn test_api_client_decode_error_names_url() {
    let url = "https://oauth.reddit.com/r/rust/about.json";
    let transport = Arc::new(ScriptedTransport::new([Exchange::ok(url, "not json")]));
    let client = ApiClient::new(transport.clone(), "useragent", token());

    let err = client.get_thing(url).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err
        .to_string()
        .contains("failed to parse response from https://oauth.reddit.com/r/rust/about.json"));
}

#[tokio::test]
async fn test_api_client_unknown_kind_names_url() {
    let url = "https://oauth.reddit.com/api/trophies";
    let transport = Arc::new(ScriptedTransport::new([Exchange::ok(
        url,
        r#"{"kind": "TrophyList", "data": {}}"#,
    )]));
    let client = ApiClient::new(transport.clone(), "useragent", token());

    let err = client.get_thing(url).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Decode);
    assert_eq!(
        err.to_string(),
        "Unsupported kind: TrophyList in response from https://oauth.reddit.com/api/trophies"
    );
}

#[tokio::test]
async fn test_api_client_from_config() {
    let url = "https://oauth.reddit.com/api/v1/me";
    let transport = Arc::new(ScriptedTransport::new([Exchange::ok(
        url,
        r#"{"kind": "t2", "data": {}}"#,
    )
    .header("User-Agent", "useragent")
    .header("Authorization", "bearer stored-token")]));

    let mut config = crate::config::Config::default();
    config.credentials.user_agent = "useragent".into();
    config.auth_token = AuthToken::new("stored-token", "bearer", 0);

    let client = ApiClient::from_config(transport.clone(), &config);
    assert_eq!(client.token().token, "stored-token");
    client.get(url).await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, reqwest::Method::GET);
    assert!(request.body.is_none());
}

// ============================================================================
// ScriptedTransport Tests
// ============================================================================

#[tokio::test]
async fn test_scripted_transport_in_order() {
    let transport = ScriptedTransport::new([
        Exchange::ok("https://a.example/1", "one"),
        Exchange::ok("https://a.example/2", "two"),
    ]);

    let first = transport
        .perform(ApiRequest::get("https://a.example/1"))
        .await
        .unwrap();
    assert_eq!(&first[..], b"one");
    assert_eq!(transport.remaining(), 1);

    let second = transport
        .perform(ApiRequest::get("https://a.example/2"))
        .await
        .unwrap();
    assert_eq!(&second[..], b"two");
    assert_eq!(transport.calls(), 2);
    assert_eq!(transport.remaining(), 0);
}

#[tokio::test]
async fn test_scripted_transport_exhausted() {
    let transport = ScriptedTransport::new([]);
    let err = transport
        .perform(ApiRequest::get("https://a.example/1"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("all responses finished"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_scripted_transport_checks_request() {
    let transport = ScriptedTransport::new([
        Exchange::ok("https://a.example/1", "one"),
        Exchange::ok("https://a.example/2", "two").header("User-Agent", "ua"),
        Exchange::ok("https://a.example/3", "three").body("x=1"),
    ]);

    let err = transport
        .perform(ApiRequest::get("https://a.example/other"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("expected URL https://a.example/1"));

    let err = transport
        .perform(ApiRequest::get("https://a.example/2").header("User-Agent", "other"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("expected value ua for header User-Agent"));

    let err = transport
        .perform(ApiRequest::post("https://a.example/3", "x=2"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("expected body x=1"));
}

#[tokio::test]
async fn test_scripted_transport_body_unchecked_when_unset() {
    let transport = ScriptedTransport::new([
        Exchange::ok("https://a.example/token", "one"),
        Exchange::ok("https://a.example/form", "two").body(""),
    ]);

    let data = transport
        .perform(ApiRequest::post("https://a.example/token", "grant_type=password"))
        .await
        .unwrap();
    assert_eq!(&data[..], b"one");

    let err = transport
        .perform(ApiRequest::post("https://a.example/form", "x=1"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("expected body , got x=1"));
}

#[tokio::test]
async fn test_scripted_transport_status() {
    let transport =
        ScriptedTransport::new([Exchange::ok("https://a.example/1", "slow down").status(429)]);
    let err = transport
        .perform(ApiRequest::get("https://a.example/1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
}
