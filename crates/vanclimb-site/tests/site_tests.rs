//! Integration tests for the landing page endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;
use vanclimb_core::config::SiteConfig;
use vanclimb_site::build_router;
use vanclimb_site::state::AppState;
use vanclimb_types::Section;

fn make_test_state(config: SiteConfig) -> Arc<AppState> {
    Arc::new(AppState::new(config).unwrap())
}

async fn get(config: SiteConfig, uri: &str) -> Response {
    build_router(make_test_state(config))
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let response = get(SiteConfig::default(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_index_has_every_section() {
    let response = get(SiteConfig::default(), "/").await;
    let html = body_to_string(response.into_body()).await;

    for section in Section::ALL {
        assert!(html.contains(&format!("id=\"{}\"", section.id())));
    }
    assert!(html.contains("Visit Van Climb"));
    assert!(html.contains("Real-time Crowd Meter"));
}

#[tokio::test]
async fn test_index_starts_from_seed_reading() {
    let response = get(SiteConfig::default(), "/").await;
    let html = body_to_string(response.into_body()).await;

    assert!(html.contains(r#"data-crowd="percent">42</span>%"#));
    assert!(html.contains(r#"data-crowd="count">85</span> of 200 climbers"#));
    assert!(html.contains("Chill"));
}

#[tokio::test]
async fn test_index_carries_navigation_settings() {
    let mut config = SiteConfig::default();
    config.navigation.settle_delay_ms = 120;
    let response = get(config, "/").await;
    let html = body_to_string(response.into_body()).await;

    assert!(html.contains(r#"data-settle-delay="120""#));
    assert!(html.contains("data-crowd-socket=\"&#x2f;ws&#x2f;crowd\""));
}

#[tokio::test]
async fn test_list_sections() {
    let response = get(SiteConfig::default(), "/api/sections").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 4);
    assert_eq!(json["sections"][0]["id"], "crowd");
    assert_eq!(json["sections"][1]["id"], "first");
    assert_eq!(json["sections"][2]["id"], "pricing");
    assert_eq!(json["sections"][3]["id"], "visit");
}

#[tokio::test]
async fn test_go_to_known_section() {
    let response = get(SiteConfig::default(), "/go/pricing").await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/#pricing");
}

#[tokio::test]
async fn test_go_to_unknown_section_lands_on_top() {
    let response = get(SiteConfig::default(), "/go/bogus").await;

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_health() {
    let response = get(SiteConfig::default(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["live_sessions"], 0);
}

#[tokio::test]
async fn test_crowd_socket_requires_upgrade() {
    let response = get(SiteConfig::default(), "/ws/crowd").await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = get(SiteConfig::default(), "/api/nothing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
