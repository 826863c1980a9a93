//! Integration tests for the HTTP resolver

use pmoresolver::{Error, HttpResolver, Resolver, SourceIdentifier};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver_for(server: &MockServer) -> HttpResolver {
    HttpResolver::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_resolve_returns_stream_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/playlist"))
        .and(query_param("url", "https://example.com/a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "urlMusic": "https://cdn/a.mp3" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let track = resolver
        .resolve(&SourceIdentifier::new("https://example.com/a"))
        .await
        .unwrap();

    assert_eq!(track.as_str(), "https://cdn/a.mp3");
}

#[tokio::test]
async fn test_identical_identifiers_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/playlist"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "urlMusic": "https://cdn/x.mp3" })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let id = SourceIdentifier::new("https://x");
    let first = resolver.resolve(&id).await.unwrap();
    let second = resolver.resolve(&id).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_server_error_is_resolution_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/playlist"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let id = SourceIdentifier::new("https://example.com/broken");
    let err = resolver.resolve(&id).await.unwrap_err();

    assert_eq!(err.identifier(), &id);
    assert!(matches!(err.cause, Error::ApiError(_)));
}

#[tokio::test]
async fn test_missing_audio_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "urlMusic": "" })))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let err = resolver
        .resolve(&SourceIdentifier::new("https://example.com/silent"))
        .await
        .unwrap_err();

    assert!(matches!(err.cause, Error::NoAudioStream(_)));
}

#[tokio::test]
async fn test_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let err = resolver
        .resolve(&SourceIdentifier::new("https://example.com/a"))
        .await
        .unwrap_err();

    assert!(matches!(err.cause, Error::Json(_)));
}

#[tokio::test]
async fn test_relative_stream_url_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "urlMusic": "videoplayback?id=1" })),
        )
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let err = resolver
        .resolve(&SourceIdentifier::new("https://example.com/a"))
        .await
        .unwrap_err();

    assert!(matches!(err.cause, Error::InvalidUrl(_)));
}

#[tokio::test]
async fn test_non_http_stream_url_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "urlMusic": "javascript:alert(1)" })),
        )
        .mount(&mock_server)
        .await;

    let resolver = resolver_for(&mock_server);
    let id = SourceIdentifier::new("https://example.com/a");
    let err = resolver.resolve(&id).await.unwrap_err();

    assert_eq!(err.identifier(), &id);
    assert!(matches!(err.cause, Error::NoAudioStream(_)));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "urlMusic": "https://cdn/slow.mp3" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let resolver = HttpResolver::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = resolver
        .resolve(&SourceIdentifier::new("https://example.com/slow"))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Nothing listens on port 9 (discard) in the test environment
    let resolver = HttpResolver::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let id = SourceIdentifier::new("https://example.com/a");
    let err = resolver.resolve(&id).await.unwrap_err();
    assert_eq!(err.identifier(), &id);
}
