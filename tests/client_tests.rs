use async_trait::async_trait;
use roster_client::config::ClientOptions;
use roster_client::error::{Error, Result};
use roster_client::fetch::{ApiClient, RequestInterceptor};
use roster_client::shifts::ShiftsApi;
use roster_client::storage::{MemoryTokenStore, TokenStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct BrokenStore;

#[async_trait]
impl TokenStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::storage("storage unavailable"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::storage("storage unavailable"))
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::storage("storage unavailable"))
    }
}

struct TraceHeader;

#[async_trait]
impl RequestInterceptor for TraceHeader {
    async fn intercept(&self, request: &mut reqwest::Request) -> Result<()> {
        request
            .headers_mut()
            .insert("x-trace", reqwest::header::HeaderValue::from_static("t-1"));
        Ok(())
    }
}

fn options(server: &MockServer) -> ClientOptions {
    ClientOptions::default().with_base_url(&server.uri())
}

#[tokio::test]
async fn sends_json_content_type_and_stored_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shifts"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_entry("authToken", "stored-token"));
    let client = ApiClient::new(options(&server)).unwrap().with_token_store(tokens);

    let shifts = ShiftsApi::new(client).list().await.unwrap();
    assert!(shifts.is_empty());
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::new());
    let api = ShiftsApi::new(
        ApiClient::new(options(&server))
            .unwrap()
            .with_token_store(tokens.clone()),
    );
    api.list().await.unwrap();

    // an empty token counts as no token
    tokens.set("authToken", "").await.unwrap();
    api.list().await.unwrap();
}

#[tokio::test]
async fn token_changes_are_picked_up_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shifts"))
        .and(header("Authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_entry("authToken", "first"));
    let api = ShiftsApi::new(
        ApiClient::new(options(&server))
            .unwrap()
            .with_token_store(tokens.clone()),
    );

    tokens.set("authToken", "second").await.unwrap();
    api.list().await.unwrap();
}

#[tokio::test]
async fn custom_token_key_is_honoured() {
    let server = MockServer::start().await;
    Mock::given(header("Authorization", "Bearer jwt-value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_entry("jwt", "jwt-value"));
    let client = ApiClient::new(options(&server).with_token_key("jwt"))
        .unwrap()
        .with_token_store(tokens);

    let api = ShiftsApi::new(client);
    assert_eq!(api.client().options().token_key, "jwt");
    api.list().await.unwrap();
}

#[tokio::test]
async fn storage_failure_rejects_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(options(&server))
        .unwrap()
        .with_token_store(Arc::new(BrokenStore));

    let err = ShiftsApi::new(client).list().await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
}

#[tokio::test]
async fn token_that_is_not_a_header_value_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let tokens = Arc::new(MemoryTokenStore::with_entry("authToken", "bad\ntoken"));
    let client = ApiClient::new(options(&server)).unwrap().with_token_store(tokens);

    let err = ShiftsApi::new(client).list().await.unwrap_err();
    assert!(matches!(err, Error::InvalidHeader(_)));
}

#[tokio::test]
async fn custom_interceptors_run_on_every_request() {
    let server = MockServer::start().await;
    Mock::given(header("X-Trace", "t-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(options(&server))
        .unwrap()
        .with_interceptor(TraceHeader);

    ShiftsApi::new(client).delete("a").await.unwrap();
}

#[tokio::test]
async fn requests_go_under_the_api_prefix() {
    let server = MockServer::start().await;
    let draft = json!({ "name": "Night", "startTime": "22:00:00", "endTime": "06:00:00" });
    Mock::given(method("POST"))
        .and(path("/api/shifts"))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "n1",
            "name": "Night",
            "startTime": "22:00:00",
            "endTime": "06:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(
        ClientOptions::default().with_base_url(&format!("{}/api", server.uri())),
    )
    .unwrap();

    let created = ShiftsApi::new(client)
        .create(&roster_client::shifts::NewShift::new("Night", "22:00:00", "06:00:00"))
        .await
        .unwrap();
    assert_eq!(created.id, "n1");
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/shifts/z"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Shift not found"))
        .mount(&server)
        .await;

    let client = ApiClient::new(options(&server)).unwrap();
    let err = ShiftsApi::new(client).delete("z").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Shift not found");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    // nothing listens on port 9 on the loopback interface
    let client = ApiClient::new(ClientOptions::default().with_base_url("http://127.0.0.1:9/api"))
        .unwrap();
    let err = ShiftsApi::new(client).list().await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn request_timeout_cuts_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shifts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(
        options(&server).with_request_timeout(Some(Duration::from_millis(50))),
    )
    .unwrap();
    assert_eq!(
        client.options().request_timeout,
        Some(Duration::from_millis(50))
    );

    match ShiftsApi::new(client).list().await.unwrap_err() {
        Error::Http(err) => assert!(err.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}
