//! Registry client tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aiidalab_develop::registry::{app_summaries, RegistryClient, RegistryError};

fn sample_index() -> serde_json::Value {
    json!({
        "apps": {
            "aiidalab-widgets-base": {
                "metadata": {"title": "AiiDAlab Widgets"},
                "git_url": "https://github.com/aiidalab/aiidalab-widgets-base"
            },
            "quantum-espresso": {
                "metadata": {"title": "Quantum ESPRESSO"}
            }
        },
        "categories": {}
    })
}

async fn serve_index(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/v1/apps_index.json"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(format!("{}/api/v1", server.uri()))
}

#[tokio::test]
async fn fetches_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apps_index.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_index()))
        .expect(1)
        .mount(&server)
        .await;

    let index = client_for(&server).fetch_index().await.unwrap();

    let summaries = app_summaries(&index);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "aiidalab-widgets-base");
    assert_eq!(summaries[0].title.as_deref(), Some("AiiDAlab Widgets"));
}

#[tokio::test]
async fn fetches_single_app() {
    let server = MockServer::start().await;
    serve_index(
        &server,
        ResponseTemplate::new(200).set_body_json(sample_index()),
    )
    .await;

    let entry = client_for(&server)
        .fetch_app("quantum-espresso")
        .await
        .unwrap();

    assert_eq!(entry["metadata"]["title"], "Quantum ESPRESSO");
}

#[tokio::test]
async fn unknown_app_is_not_found() {
    let server = MockServer::start().await;
    serve_index(
        &server,
        ResponseTemplate::new(200).set_body_json(sample_index()),
    )
    .await;

    let err = client_for(&server).fetch_app("nope").await.unwrap_err();

    assert!(matches!(err, RegistryError::AppNotFound(name) if name == "nope"));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    serve_index(&server, ResponseTemplate::new(500)).await;

    let err = client_for(&server).fetch_index().await.unwrap_err();

    assert!(matches!(err, RegistryError::Http { status: 500, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    serve_index(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let err = client_for(&server).fetch_index().await.unwrap_err();

    assert!(matches!(err, RegistryError::Decode { .. }));
}

#[tokio::test]
async fn index_without_apps_is_a_decode_error() {
    let server = MockServer::start().await;
    serve_index(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"apps": []})),
    )
    .await;

    let err = client_for(&server).fetch_index().await.unwrap_err();

    assert!(err.to_string().contains("missing 'apps' object"));
}

#[tokio::test]
async fn unreachable_registry_is_a_request_error() {
    // Nothing listens on port 1.
    let err = RegistryClient::new("http://127.0.0.1:1/api/v1")
        .fetch_index()
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::Request { .. }));
}
