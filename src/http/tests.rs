//! Tests for the HTTP client module

use super::*;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .rate_limit(0)
        .build();
    HttpClient::with_config(config).unwrap()
}

fn retrying_client(server: &MockServer, max_retries: u32, max_backoff: Duration) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(max_retries)
        .max_backoff(max_backoff)
        .rate_limit(0)
        .build();
    HttpClient::with_config(config).unwrap()
}

fn no_query() -> Vec<(String, String)> {
    Vec::new()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.max_backoff, Duration::from_secs(2));
    assert!(config.base_url.is_none());
    assert!(config.token.is_none());
    assert_eq!(config.requests_per_second.map(|n| n.get()), Some(10));
    assert!(config.user_agent.starts_with("storyblok-loader/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .token("tok")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .max_backoff(Duration::from_secs(5))
        .rate_limit(0)
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.token, Some("tok".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.max_backoff, Duration::from_secs(5));
    assert!(config.requests_per_second.is_none());
}

#[test]
fn test_config_debug_redacts_token() {
    let config = HttpClientConfig::builder().token("super-secret").build();
    let debug_str = format!("{config:?}");
    assert!(!debug_str.contains("super-secret"));
    assert!(debug_str.contains("***"));
}

#[test]
fn test_http_client_debug() {
    let config = HttpClientConfig::builder().token("hidden").build();
    let client = HttpClient::with_config(config).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("rate_limit: Some(10)"));
    assert!(!debug_str.contains("hidden"));
}

#[test]
fn test_backoff_doubles_up_to_cap() {
    let config = HttpClientConfig::builder()
        .max_backoff(Duration::from_millis(500))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.backoff(0), Duration::from_millis(100));
    assert_eq!(client.backoff(1), Duration::from_millis(200));
    assert_eq!(client.backoff(2), Duration::from_millis(400));
    assert_eq!(client.backoff(3), Duration::from_millis(500));
    assert_eq!(client.backoff(40), Duration::from_millis(500));
}

#[tokio::test]
async fn test_get_json_sends_query_and_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .and(query_param("token", "secret123"))
        .and(query_param("page", "2"))
        .and(query_param("filter_query[content.category][in]", "technology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(format!("{}/", mock_server.uri()))
        .token("secret123")
        .rate_limit(0)
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let query = vec![
        ("page".to_string(), "2".to_string()),
        (
            "filter_query[content.category][in]".to_string(),
            "technology".to_string(),
        ),
    ];
    let data: Value = client.get_json("/cdn/stories", &query).await.unwrap();

    assert_eq!(data, json!({"stories": []}));
}

#[tokio::test]
async fn test_get_json_bad_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value> = client.get_json("cdn/stories", &no_query()).await;

    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 3, Duration::from_millis(10));
    let err = client
        .get_json::<Value>("cdn/stories", &no_query())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 3, Duration::from_millis(10));
    let data: Value = client.get_json("cdn/stories", &no_query()).await.unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 2, Duration::from_millis(10));
    let err = client
        .get_json::<Value>("cdn/stories", &no_query())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 502: Bad gateway");
}

#[tokio::test]
async fn test_rate_limited_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 2, Duration::from_secs(10));
    let data: Value = client.get_json("cdn/stories", &no_query()).await.unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_long_retry_after_is_capped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3600"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stories": []})))
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 3, Duration::from_millis(50));

    let started = Instant::now();
    let data: Value = tokio::time::timeout(
        Duration::from_secs(5),
        client.get_json("cdn/stories", &no_query()),
    )
    .await
    .expect("retry wait was not capped")
    .unwrap();

    assert_eq!(data, json!({"stories": []}));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_http_date_retry_after_uses_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(
            ResponseTemplate::new(429).insert_header("retry-after", "Wed, 21 Oct 2065 07:28:00 GMT"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 1, Duration::from_secs(10));

    let started = Instant::now();
    let data: Value = client.get_json("cdn/stories", &no_query()).await.unwrap();

    assert_eq!(data["ok"], true);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_rate_limited_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = retrying_client(&mock_server, 0, Duration::from_secs(10));
    let err = client
        .get_json::<Value>("cdn/stories", &no_query())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_invalid_base_url() {
    let config = HttpClientConfig::builder()
        .base_url("not a url")
        .rate_limit(0)
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_json::<Value>("cdn/stories", &no_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_rate_limited_client_still_serves_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cdn/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(100)
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert_eq!(client.rate_limit(), Some(100));

    for _ in 0..3 {
        let data: Value = client.get_json("cdn/stories", &no_query()).await.unwrap();
        assert_eq!(data["ok"], true);
    }
}
