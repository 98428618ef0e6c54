//! HTTP contract tests for `RoleClient` against a local mock server.

mod common;

use std::time::Duration;

use common::MockServer;
use sysprompt_lib::Config;
use sysprompt_lib::RoleClient;
use sysprompt_lib::api::RoleApi;
use sysprompt_lib::error::ApiError;
use sysprompt_lib::error::Error;
use sysprompt_lib::model::Record;
use sysprompt_lib::model::RecordDraft;

const LIST_BODY: &str = r#"{
    "status": "ok",
    "data": [
        {"roleId": 1, "roleName": "tutor", "roleContent": "你好", "roleContentEng": "hello"},
        {"roleId": 2, "roleName": "critic", "roleContent": "評論", "roleContentEng": null}
    ]
}"#;

fn client(server: &MockServer) -> RoleClient {
    RoleClient::builder()
        .url(&server.url)
        .user("polly")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_reads_envelope() {
    let server = MockServer::start(200, LIST_BODY).await;
    let records = client(&server).list().await.unwrap();

    assert_eq!(
        records,
        vec![
            Record::new(1, "tutor", "你好", "hello"),
            Record::new(2, "critic", "評論", ""),
        ]
    );
    let request = server.last();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/role");
}

#[tokio::test]
async fn test_list_reads_served_records() {
    let served = vec![
        Record::new(3, "poet", "寫一首詩", "Write a poem"),
        Record::new(9, "critic", "", ""),
    ];
    let body = serde_json::json!({"status": "ok", "data": served}).to_string();
    let server = MockServer::start(200, &body).await;

    assert_eq!(client(&server).list().await.unwrap(), served);
}

#[tokio::test]
async fn test_list_rejects_non_ok_status() {
    let server = MockServer::start(200, r#"{"status":"error","data":null}"#).await;
    let err = client(&server).list().await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Status(ref s)) if s == "error"));
}

#[tokio::test]
async fn test_list_reports_malformed_body() {
    let server = MockServer::start(200, "<html>oops</html>").await;
    let err = client(&server).list().await.unwrap_err();
    match err {
        Error::Api(ApiError::Parse { body, .. }) => assert_eq!(body.as_deref(), Some("<html>oops</html>")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let server = MockServer::start(500, "database down").await;
    let err = client(&server).list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: database down");
}

#[tokio::test]
async fn test_create_posts_without_id() {
    let server = MockServer::start(200, "{}").await;
    let draft = RecordDraft::new("tutor", "be patient", "be patient (en)");
    client(&server).create(&draft).await.unwrap();

    let request = server.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/role");
    assert_eq!(
        request.json(),
        serde_json::json!({"name": "tutor", "content": "be patient", "user": "polly"})
    );
}

#[tokio::test]
async fn test_update_puts_id_in_body() {
    let server = MockServer::start(200, "{}").await;
    let draft = RecordDraft::new("tutor", "be brief", "");
    client(&server).update(7, &draft).await.unwrap();

    let request = server.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/role");
    assert_eq!(
        request.json(),
        serde_json::json!({"id": 7, "name": "tutor", "content": "be brief", "user": "polly"})
    );
}

#[tokio::test]
async fn test_delete_targets_record_path() {
    let server = MockServer::start(204, "").await;
    client(&server).delete(42).await.unwrap();

    let request = server.last();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/role/42");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_delete_missing_record_fails() {
    let server = MockServer::start(404, "").await;
    let err = client(&server).delete(42).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start_with_delay(200, LIST_BODY, Duration::from_millis(500)).await;
    let client = RoleClient::builder()
        .url(&server.url)
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Timeout(d)) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let server = MockServer::start(200, LIST_BODY).await;
    let client = RoleClient::builder()
        .url(format!("{}/", server.url))
        .build()
        .unwrap();
    client.list().await.unwrap();
    assert_eq!(server.last().path, "/api/role");
}

#[test]
fn test_invalid_urls_rejected() {
    for url in ["not a url", "ftp://host/api", "mailto:someone@example.com"] {
        let err = RoleClient::builder().url(url).build().err().unwrap();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))), "{url}");
    }
}

#[test]
fn test_from_config_uses_user() {
    let config = Config::new("http://localhost:7001/api").with_user("admin");
    let client = RoleClient::from_config(&config).unwrap();
    assert_eq!(client.user(), "admin");
    assert_eq!(client.base_url(), "http://localhost:7001/api");
}
