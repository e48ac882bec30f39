//! Integration tests for the service surface: banner, health, diagnostics,
//! request IDs, and CORS.

#![allow(clippy::unwrap_used)]

use reqwest::{StatusCode, header};
use serde_json::{Value, json};

use voiceforge_api::middleware::REQUEST_ID_HEADER;
use voiceforge_integration_tests::TestContext;

#[tokio::test]
async fn test_banner() {
    let ctx = TestContext::without_storage().await;
    let body: Value = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "message": "VoiceForge Backend bereit" }));
}

#[tokio::test]
async fn test_health_probes() {
    let (ctx, _) = TestContext::with_memory_store().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let ctx = TestContext::without_storage().await;
    let resp = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_diagnostics_never_fail() {
    let ctx = TestContext::without_storage().await;
    let resp = ctx.client.get(ctx.url("/test")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["database"], "⚠️ Available but not initialized");
    assert_eq!(body["connection_status"], "Not Connected");

    let ctx = TestContext::with_failing_store().await;
    let resp = ctx.client.get(ctx.url("/test")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["database"], "⚠️ Connected but Error: connection refused");
    assert_eq!(body["database_name"], "unreachable");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let ctx = TestContext::without_storage().await;

    let resp = ctx.client.get(ctx.url("/")).send().await.unwrap();
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .header(REQUEST_ID_HEADER, "lb-7f3a")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()[REQUEST_ID_HEADER], "lb-7f3a");
}

#[tokio::test]
async fn test_cors_allows_any_origin_with_credentials() {
    let ctx = TestContext::without_storage().await;
    let resp = ctx
        .client
        .request(reqwest::Method::OPTIONS, ctx.url("/api/lead"))
        .header(header::ORIGIN, "https://preview-42.voiceforge.app")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://preview-42.voiceforge.app"
    );
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
