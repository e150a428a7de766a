#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a mock HTTP server that serves a sellers.json document at the
/// specified path.
pub async fn mock_sellers_endpoint(url_path: &str, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    server
}

/// Creates a mock HTTP server that returns the specified HTTP error status code.
///
/// Useful for testing that a failing source is skipped rather than fatal.
pub async fn mock_error_server(status_code: u16) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status_code))
        .mount(&server)
        .await;

    server
}

/// Creates a mock HTTP server that answers 200 OK with a body that is not JSON.
pub async fn mock_malformed_json_server(url_path: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>definitely not json</html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    server
}

/// Builds a sellers.json body with the given seller domains.
pub fn sellers_body(domains: &[&str]) -> serde_json::Value {
    let sellers: Vec<serde_json::Value> = domains
        .iter()
        .enumerate()
        .map(|(i, d)| {
            serde_json::json!({
                "seller_id": format!("{}", 1000 + i),
                "seller_type": "PUBLISHER",
                "domain": d,
            })
        })
        .collect();

    serde_json::json!({
        "version": "1.0",
        "contact_email": "adops@example.com",
        "sellers": sellers,
    })
}
