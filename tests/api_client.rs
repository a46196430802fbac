//! Integration tests: the API client against a local stub backend.
//!
//! The stub mirrors the two endpoints the client consumes, so these tests pin
//! down the request bodies, error surfacing, and filename derivation.

use axum::http::{StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use media_downloader::api::{ApiClient, ApiError};
use media_downloader::model::DisplayValue;

/// Serves `router` on an ephemeral local port and returns the base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn info_success_parses_description() {
    let router = Router::new().route(
        "/api/info",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({"url": "https://youtu.be/abc123"}));
            Json(json!({
                "title": "T",
                "duration": "3:00",
                "platform": "YouTube",
                "formats": [{"quality": "720p", "format_id": "22", "format": "mp4"}],
                "url": "https://youtu.be/abc123"
            }))
        }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let info = client.fetch_info("https://youtu.be/abc123").await.unwrap();

    assert_eq!(info.title.as_deref(), Some("T"));
    assert_eq!(info.duration, Some(DisplayValue::Text("3:00".to_string())));
    assert_eq!(info.platform.as_deref(), Some("YouTube"));
    assert_eq!(info.url, "https://youtu.be/abc123");
    assert_eq!(info.formats.len(), 1);
    assert_eq!(info.formats[0].format_id, "22");
    assert_eq!(info.formats[0].quality_label(), "720p");
    assert_eq!(info.formats[0].details(), "(mp4)");
}

#[tokio::test]
async fn info_empty_formats_stay_empty() {
    let router = Router::new().route(
        "/api/info",
        post(|| async { Json(json!({"url": "https://youtu.be/abc123", "formats": []})) }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let info = client.fetch_info("https://youtu.be/abc123").await.unwrap();
    assert!(info.formats.is_empty());
}

#[tokio::test]
async fn info_error_field_is_surfaced() {
    let router = Router::new().route(
        "/api/info",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({"error": "rate limited"})),
            )
        }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let err = client.fetch_info("https://youtu.be/abc123").await.unwrap_err();
    match err {
        ApiError::DescribeFailed(message) => assert!(message.contains("rate limited")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn info_error_without_body_falls_back() {
    let router = Router::new().route(
        "/api/info",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let err = client.fetch_info("https://youtu.be/abc123").await.unwrap_err();
    match err {
        ApiError::DescribeFailed(message) => {
            assert_eq!(message, "Failed to fetch media information");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_describe_failure() {
    // Nothing listens on the discard port.
    let client = ApiClient::with_base_url("http://127.0.0.1:9");

    let err = client.fetch_info("https://youtu.be/abc123").await.unwrap_err();
    match err {
        ApiError::DescribeFailed(message) => assert!(!message.is_empty()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn download_filename_comes_from_the_header() {
    let router = Router::new().route(
        "/api/download",
        post(|| async {
            (
                [(header::CONTENT_DISPOSITION, "attachment; filename=\"clip.mp4\"")],
                vec![1u8, 2, 3],
            )
        }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let media = client
        .fetch_media("https://youtu.be/abc123", "22")
        .await
        .unwrap();

    assert_eq!(media.filename, "clip.mp4");
    assert_eq!(media.bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn download_without_header_uses_the_default_name() {
    let router = Router::new().route("/api/download", post(|| async { vec![0u8; 16] }));
    let client = ApiClient::with_base_url(serve(router).await);

    let media = client
        .fetch_media("https://youtu.be/abc123", "22")
        .await
        .unwrap();

    assert_eq!(media.filename, "download");
    assert_eq!(media.bytes.len(), 16);
}

#[tokio::test]
async fn download_request_carries_the_echoed_url_and_format() {
    let router = Router::new().route(
        "/api/download",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(
                body,
                json!({"url": "https://youtu.be/abc123", "format_id": "22"})
            );
            vec![9u8]
        }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let media = client
        .fetch_media("https://youtu.be/abc123", "22")
        .await
        .unwrap();
    assert_eq!(media.bytes, vec![9]);
}

#[tokio::test]
async fn download_error_field_is_surfaced() {
    let router = Router::new().route(
        "/api/download",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "format unavailable"})),
            )
        }),
    );
    let client = ApiClient::with_base_url(serve(router).await);

    let err = client
        .fetch_media("https://youtu.be/abc123", "22")
        .await
        .unwrap_err();
    match err {
        ApiError::DownloadFailed(message) => assert!(message.contains("format unavailable")),
        other => panic!("unexpected error: {other}"),
    }
}
