use std::time::Duration;

use serde_json::json;
use summarizer_core::{ApiConfig, UploadOptions};
use summarizer_engine::{ClientSettings, FailureKind, ReqwestApi, SummaryApi};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, settings: ClientSettings) -> ReqwestApi {
    let config = ApiConfig::resolve(Some(&server.uri())).expect("mock server uri");
    ReqwestApi::new(config, settings).expect("client")
}

#[tokio::test]
async fn summarize_posts_text_and_returns_first_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "Great tea, fast delivery." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summaries": [{ "summary": "X", "original_length": 25 }],
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    let summary = api.summarize("Great tea, fast delivery.").await.expect("summary");

    assert_eq!(summary, "X");
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": { "code": "EMPTY_INPUT", "message": "M", "detail": null }
        })))
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "M");
}

#[tokio::test]
async fn unparsable_error_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.message, "Ошибка API: HTTP 503");
}

#[tokio::test]
async fn empty_summaries_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "summaries": [] })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::EmptySummary);
}

#[tokio::test]
async fn unsuccessful_ok_response_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": "MODEL_ERROR", "message": "M" }
        })))
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidResponse);
    assert_eq!(err.message, "M");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "success": true, "summaries": [{ "summary": "late" }] })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let api = api_for(&server, settings);
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789abcdef"))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_response_bytes: 10,
        ..ClientSettings::default()
    };
    let api = api_for(&server, settings);
    let err = api.summarize("x").await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(16)
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let config = ApiConfig::resolve(Some("http://127.0.0.1:9")).unwrap();
    let settings = ClientSettings {
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(500),
        ..ClientSettings::default()
    };
    let api = ReqwestApi::new(config, settings).unwrap();

    let err = api.summarize("x").await.unwrap_err();

    assert!(matches!(
        err.kind,
        FailureKind::Network | FailureKind::Timeout
    ));
}

#[tokio::test]
async fn health_reports_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "service": "summarization-api",
            "version": "1.0.0"
        })))
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    assert!(api.health().await.unwrap());
}

#[tokio::test]
async fn health_is_false_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server, ClientSettings::default());
    assert!(!api.health().await.unwrap());
}

#[tokio::test]
async fn file_upload_sends_flags_and_returns_stats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize-file"))
        .and(query_param("combine", "false"))
        .and(query_param("detail", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "summaries": [{ "summary": "first" }, { "summary": "second" }],
            "stats": { "total_rows": 2, "extracted_texts": 2, "summarized": 2, "skipped": 0 },
            "filename": "reviews.csv"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let file = temp.path().join("reviews.csv");
    std::fs::write(&file, "ID,text\n1,A\n2,B\n").unwrap();

    let api = api_for(&server, ClientSettings::default());
    let options = UploadOptions {
        combine: false,
        detail: true,
    };
    let summary = api.summarize_file(&file, options).await.expect("file summary");

    assert_eq!(summary.text, "first\n\nsecond");
    assert_eq!(summary.stats.map(|s| s.total_rows), Some(2));
    assert_eq!(summary.filename.as_deref(), Some("reviews.csv"));
}

#[tokio::test]
async fn file_upload_rejects_unsupported_extension_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.txt");
    std::fs::write(&file, "plain").unwrap();

    let api = api_for(&server, ClientSettings::default());
    let err = api
        .summarize_file(&file, UploadOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::UnsupportedFile);
}
