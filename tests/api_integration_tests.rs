//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use reel_cache::{
    api::create_router, cache::CacheStore, subscriptions::unsubscribe_fn, AppState,
    SubscriptionRegistry,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::new(
        CacheStore::new(100, Duration::from_secs(300)),
        SubscriptionRegistry::new(),
    )
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

fn counting_capability(calls: &Arc<AtomicUsize>) -> Box<dyn reel_cache::Unsubscribe> {
    let counter = calls.clone();
    unsubscribe_fn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

// == Cache Entry Endpoints ==

#[tokio::test]
async fn test_set_then_get_roundtrip() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        "PUT",
        "/cache/omdb/tt0133093",
        Some(r#"{"value":{"Title":"The Matrix","Year":"1999"},"ttl":60}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("omdb:tt0133093"));

    let response = send(&app, "GET", "/cache/omdb/tt0133093", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["namespace"], "omdb");
    assert_eq!(json["id"], "tt0133093");
    assert_eq!(json["value"]["Title"], "The Matrix");
}

#[tokio::test]
async fn test_get_missing_returns_error_body() {
    let app = create_router(create_test_state());

    let response = send(&app, "GET", "/cache/omdb/unknown", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("omdb:unknown"));
}

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_router(create_test_state());

    send(&app, "PUT", "/cache/tmdb/603", Some(r#"{"value":8.7}"#)).await;

    let response = send(&app, "DELETE", "/cache/tmdb/603", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "DELETE", "/cache/tmdb/603", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_namespace_endpoint_isolates_namespaces() {
    let app = create_router(create_test_state());

    send(&app, "PUT", "/cache/x/1", Some(r#"{"value":"v1"}"#)).await;
    send(&app, "PUT", "/cache/y/1", Some(r#"{"value":"v2"}"#)).await;

    let response = send(&app, "DELETE", "/cache/x", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], 1);

    let response = send(&app, "GET", "/cache/y/1", None).await;
    assert_eq!(body_to_json(response.into_body()).await["value"], "v2");

    let response = send(&app, "GET", "/cache/x/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_endpoint_counts_clears() {
    let app = create_router(create_test_state());

    send(&app, "PUT", "/cache/x/1", Some(r#"{"value":1}"#)).await;
    let response = send(&app, "DELETE", "/cache", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_to_json(send(&app, "GET", "/stats", None).await.into_body()).await;
    assert_eq!(stats["size"], 0);
    assert_eq!(stats["clears"], 1);
}

// == Batch Endpoints ==

#[tokio::test]
async fn test_batch_set_and_get() {
    let app = create_router(create_test_state());

    let response = send(
        &app,
        "PUT",
        "/batch/warnings",
        Some(r#"{"entries":{"603":{"violence":true},"604":{"violence":false}},"ttl":120}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        "POST",
        "/batch/warnings/get",
        Some(r#"{"ids":["603","604","999"]}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let found = json["found"].as_object().unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found["603"]["violence"], true);
    assert!(!found.contains_key("999"));
}

#[tokio::test]
async fn test_batch_set_evicts_in_request_order() {
    for _ in 0..30 {
        let state = AppState::new(
            CacheStore::new(3, Duration::from_secs(300)),
            SubscriptionRegistry::new(),
        );
        let app = create_router(state.clone());

        let response = send(
            &app,
            "PUT",
            "/batch/ns",
            Some(r#"{"entries":{"a":1,"b":2,"c":3}}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "PUT", "/cache/ns/d", Some(r#"{"value":4}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cache = state.cache.read().await;
        assert!(cache.peek("ns", "a").is_none(), "first batch entry should be the victim");
        assert!(cache.peek("ns", "b").is_some());
        assert!(cache.peek("ns", "c").is_some());
        assert!(cache.peek("ns", "d").is_some());
    }
}

#[tokio::test]
async fn test_blank_key_segments_are_rejected() {
    let state = create_test_state();
    let app = create_router(state.clone());

    let response = send(&app, "PUT", "/cache/%20/%20", Some(r#"{"value":1}"#)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Namespace"));

    let response = send(&app, "GET", "/cache/omdb/%20", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", "/cache/%20", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(state.cache.read().await.is_empty());
}

#[tokio::test]
async fn test_batch_get_rejects_empty_ids() {
    let app = create_router(create_test_state());

    let response = send(&app, "POST", "/batch/warnings/get", Some(r#"{"ids":[""]}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = create_router(create_test_state());

    let response = send(&app, "PUT", "/cache/omdb/1", Some(r#"{"ttl":5}"#)).await;

    assert!(response.status().is_client_error());
}

// == Stats & Maintenance ==

#[tokio::test]
async fn test_stats_hit_miss_accounting() {
    let app = create_router(create_test_state());

    send(&app, "GET", "/cache/omdb/1", None).await; // miss
    send(&app, "PUT", "/cache/omdb/1", Some(r#"{"value":"x"}"#)).await;
    send(&app, "GET", "/cache/omdb/1", None).await; // hit

    let response = send(&app, "GET", "/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["sets"], 1);
    assert_eq!(json["max_size"], 100);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

#[tokio::test]
async fn test_cleanup_endpoint_sweeps_expired() {
    let state = create_test_state();
    {
        let mut cache = state.cache.write().await;
        cache.set_with_ttl("omdb", "short", Value::Null, Duration::from_millis(20));
        cache.set("omdb", "long", Value::Null);
    }
    let app = create_router(state.clone());

    tokio::time::sleep(Duration::from_millis(40)).await;

    let response = send(&app, "POST", "/cleanup", None).await;
    assert_eq!(body_to_json(response.into_body()).await["removed"], 1);
    assert_eq!(state.cache.read().await.len(), 1);
}

// == Subscription Endpoints ==

#[tokio::test]
async fn test_subscriptions_listing_and_cancel() {
    let state = create_test_state();
    let calls = Arc::new(AtomicUsize::new(0));
    state.registry.lock().await.register(
        "watchlist:alice",
        counting_capability(&calls),
        Some("watchlist".to_string()),
    );
    let app = create_router(state.clone());

    let response = send(&app, "GET", "/subscriptions", None).await;
    let json = body_to_json(response.into_body()).await;
    let active = json["active"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], "watchlist:alice");
    assert_eq!(active[0]["scope"], "watchlist");

    let response = send(&app, "DELETE", "/subscriptions/watchlist:alice", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let response = send(&app, "DELETE", "/subscriptions/watchlist:alice", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancel_scope_endpoint() {
    let state = create_test_state();
    let tab1 = Arc::new(AtomicUsize::new(0));
    let tab2 = Arc::new(AtomicUsize::new(0));
    {
        let mut registry = state.registry.lock().await;
        for id in ["a", "b", "c"] {
            registry.register(id, counting_capability(&tab1), Some("tab1".to_string()));
        }
        registry.register("d", counting_capability(&tab2), Some("tab2".to_string()));
    }
    let app = create_router(state.clone());

    let response = send(&app, "DELETE", "/scopes/tab1", None).await;
    assert_eq!(body_to_json(response.into_body()).await["cancelled"], 3);
    assert_eq!(tab1.load(Ordering::SeqCst), 3);
    assert_eq!(tab2.load(Ordering::SeqCst), 0);
    assert_eq!(state.registry.lock().await.len(), 1);
}

#[tokio::test]
async fn test_scope_change_endpoint() {
    let state = create_test_state();
    let calls = Arc::new(AtomicUsize::new(0));
    state.registry.lock().await.register(
        "trending",
        counting_capability(&calls),
        Some("discover".to_string()),
    );
    let app = create_router(state.clone());

    let response = send(
        &app,
        "PUT",
        "/scope",
        Some(r#"{"previous_scope":"discover","new_scope":"profile"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["cancelled"], 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let response = send(&app, "GET", "/subscriptions", None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["current_scope"], "profile");
    assert!(json["active"].as_array().unwrap().is_empty());
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
