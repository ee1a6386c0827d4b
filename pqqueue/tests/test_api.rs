//! Tests de la frontière HTTP : routes, codes de statut et enveloppes JSON.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pqqueue::{api::queue_api_router, QueueManager};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    queue_api_router(Arc::new(QueueManager::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_identity() {
    let app = app();

    let (status, body) = send(&app, post_json("/queue/create", json!({"name": "Soirée"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Soirée");
    assert_eq!(body["code"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_create_without_name_uses_default() {
    let app = app();

    let (status, body) = send(&app, post_json("/queue/create", json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Queue");
}

#[tokio::test]
async fn test_create_with_oversized_name_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/queue/create", json!({"name": "x".repeat(121)})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("120"));
}

#[tokio::test]
async fn test_fetch_unknown_queue_is_404_with_envelope() {
    let app = app();

    let (status, body) = send(&app, get("/queue?queue_id=99")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_fetch_without_reference_is_400() {
    let app = app();

    let (status, body) = send(&app, get("/queue")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_add_requires_title_and_artist() {
    let app = app();
    let (_, created) = send(&app, post_json("/queue/create", json!({}))).await;
    let code = created["code"].as_str().unwrap();

    let (status, body) = send(
        &app,
        post_json("/queue/add", json!({"code": code, "artist": "Artist X"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));

    let (status, body) = send(
        &app,
        post_json("/queue/add", json!({"code": code, "title": "Song A", "artist": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("artist"));
}

#[tokio::test]
async fn test_add_fetch_remove_roundtrip() {
    let app = app();
    let (_, created) = send(&app, post_json("/queue/create", json!({"name": "party"}))).await;
    let code = created["code"].as_str().unwrap().to_string();

    // Ajout par code, champs du track aplatis dans la réponse
    let (status, added) = send(
        &app,
        post_json(
            "/queue/add",
            json!({
                "code": code,
                "id": "qobuz:42",
                "title": "Song A",
                "artist": "Artist X",
                "album": "Album Y"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["item"]["queued_id"], 1);
    assert_eq!(added["item"]["title"], "Song A");
    assert_eq!(added["item"]["album"], "Album Y");

    // Lecture par code
    let (status, fetched) = send(&app, get(&format!("/queue?code={}", code))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["queue"]["name"], "party");
    assert_eq!(fetched["items"].as_array().unwrap().len(), 1);

    // Retrait effectif puis no-op rapporté
    let (status, removed) = send(
        &app,
        post_json("/queue/remove", json!({"code": code, "queued_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["removed"], true);

    let (status, removed) = send(
        &app,
        post_json("/queue/remove", json!({"code": code, "queued_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["removed"], false);
}

#[tokio::test]
async fn test_remove_without_criteria_is_400() {
    let app = app();
    let (_, created) = send(&app, post_json("/queue/create", json!({}))).await;
    let code = created["code"].as_str().unwrap();

    let (status, body) = send(&app, post_json("/queue/remove", json!({"code": code}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_reports_item_counts() {
    let app = app();
    let (_, first) = send(&app, post_json("/queue/create", json!({"name": "a"}))).await;
    send(&app, post_json("/queue/create", json!({"name": "b"}))).await;

    send(
        &app,
        post_json(
            "/queue/add",
            json!({"queue_id": first["id"], "title": "Song", "artist": "Artist"}),
        ),
    )
    .await;

    let (status, body) = send(&app, get("/queue/list")).await;
    assert_eq!(status, StatusCode::OK);
    let queues = body.as_array().unwrap();
    assert_eq!(queues.len(), 2);
    assert_eq!(queues[0]["name"], "a");
    assert_eq!(queues[0]["item_count"], 1);
    assert_eq!(queues[1]["item_count"], 0);
}

#[tokio::test]
async fn test_malformed_query_gets_error_envelope() {
    let app = app();

    // queue_id non numérique : rejet d'extracteur, même enveloppe
    let (status, body) = send(&app, get("/queue?queue_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, get("/queue/stream?queue_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_gets_error_envelope() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/queue/add")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_stream_route_rejects_unknown_queue() {
    let app = app();

    let (status, body) = send(&app, get("/queue/stream?queue_id=7")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
