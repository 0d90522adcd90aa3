use crate::api::{ApiError, DnsApiClient, PorkbunClient, Record};
use crate::config::Secrets;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PorkbunClient {
    PorkbunClient::new(server.uri(), Secrets::new("pk1_test", "sk1_test"))
}

fn auth_body() -> serde_json::Value {
    json!({ "apikey": "pk1_test", "secretapikey": "sk1_test" })
}

#[tokio::test]
async fn test_ping_returns_your_ip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ping"))
        .and(body_json(auth_body()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "SUCCESS", "yourIp": "5.6.7.8" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ip = test_client(&server).ping().await.unwrap();
    assert_eq!(ip, "5.6.7.8");
}

#[tokio::test]
async fn test_ping_non_200_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "ERROR",
            "message": "Invalid API key. (002)"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).ping().await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message.as_deref(), Some("Invalid API key. (002)"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).ping().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(err.to_string(), "API request returned status: 503");
}

#[tokio::test]
async fn test_retrieve_records() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dns/retrieve/example.com"))
        .and(body_json(auth_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "records": [
                { "id": "1", "name": "example.com", "type": "A", "content": "1.2.3.4", "ttl": "600", "prio": "0", "notes": "" },
                { "id": "2", "name": "example.com", "type": "MX", "content": "mail.example.com", "ttl": "600", "prio": "10", "notes": null }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = test_client(&server)
        .retrieve_records("example.com")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("1"));
    assert_eq!(records[1].record_type, "MX");
}

#[tokio::test]
async fn test_retrieve_records_missing_list_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dns/retrieve/example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCESS" })))
        .mount(&server)
        .await;

    let records = test_client(&server)
        .retrieve_records("example.com")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_edit_record_sends_credentials_and_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dns/edit/example.com/42"))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test",
            "name": "www",
            "type": "A",
            "content": "5.6.7.8",
            "ttl": "600"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "SUCCESS" })))
        .expect(1)
        .mount(&server)
        .await;

    let record = Record {
        id: Some("42".into()),
        name: "www".into(),
        record_type: "A".into(),
        content: "5.6.7.8".into(),
        ttl: "600".into(),
    };
    test_client(&server)
        .edit_record("example.com", "42", &record)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server).ping().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/ping"));
}
