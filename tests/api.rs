use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use ytsum::config::ResponseMode;
use ytsum::server::{AppState, create_router};
use ytsum::title::TitleResolver;
use ytsum::youtube::TranscriptResolver;

fn test_state() -> AppState {
    let client = reqwest::Client::new();
    AppState {
        mode: ResponseMode::Transcript,
        titles: Arc::new(TitleResolver::new(client.clone())),
        transcripts: Arc::new(TranscriptResolver::new(client, vec!["en".to_string()])),
        summarizer: None,
    }
}

async fn post_summarize(body: Body) -> (StatusCode, serde_json::Value) {
    let app = create_router(test_state());
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/summarize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn missing_field_returns_400() {
    let (status, body) = post_summarize(Body::from("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing youtube_url in request");
}

#[tokio::test]
async fn empty_body_returns_400() {
    let (status, body) = post_summarize(Body::empty()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing youtube_url in request");
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let (status, body) = post_summarize(Body::from("not json at all")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing youtube_url in request");
}

#[tokio::test]
async fn null_url_returns_400() {
    let (status, body) = post_summarize(Body::from(r#"{"youtube_url": null}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing youtube_url in request");
}

#[tokio::test]
async fn unparseable_url_returns_400() {
    let (status, body) =
        post_summarize(Body::from(r#"{"youtube_url": "https://www.youtube.com/watch"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid YouTube URL");
}

#[tokio::test]
async fn short_identifier_returns_400() {
    let (status, body) = post_summarize(Body::from(r#"{"youtube_url": "https://youtu.be/abc"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid YouTube URL");
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = create_router(test_state());
    let resp = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
