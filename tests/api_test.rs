mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use common::*;
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;
use tz_calendar::adapters::router;

fn app() -> Router {
    let (state, _) = memory_state();
    router(state, Duration::from_secs(5))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn standup(start: &str, end: &str, profiles: &[&Value]) -> Value {
    json!({
        "title": "Standup",
        "timezone": "America/New_York",
        "start": {"date": "2025-01-15", "time": start},
        "end": {"date": "2025-01-15", "time": end},
        "profiles": profiles,
    })
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn profile_names_are_unique() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/profiles", Some(json!({"name": "Alice"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["timezone"], "UTC");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(json!({"name": "Alice", "timezone": "Europe/Paris"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "duplicate_name");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(json!({"name": "Bob", "timezone": "Moon/Base"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_timezone");

    let (_, body) = send(&app, Method::GET, "/api/profiles", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn event_lifecycle_over_http() {
    let app = app();
    let (_, alice) = send(&app, Method::POST, "/api/profiles", Some(json!({"name": "Alice"}))).await;
    let (_, bob) = send(&app, Method::POST, "/api/profiles", Some(json!({"name": "Bob"}))).await;
    let (alice_id, bob_id) = (&alice["id"], &bob["id"]);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(standup("09:00", "09:30", &[alice_id, bob_id])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["start"], "2025-01-15T14:00:00Z");
    let id = created["id"].as_str().unwrap().to_string();

    // Same instants in UTC with attendees reordered: nothing to log.
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(json!({
            "title": "Standup",
            "timezone": "UTC",
            "start": "2025-01-15T14:00:00Z",
            "end": "2025-01-15T14:30:00Z",
            "profiles": [bob_id, alice_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, logs) = send(&app, Method::GET, &format!("/api/events/{id}/logs"), None).await;
    assert_eq!(logs, json!([]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{id}"),
        Some(standup("10:00", "10:30", &[alice_id])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["version"], 3);

    let (_, logs) = send(&app, Method::GET, &format!("/api/events/{id}/logs"), None).await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    let fields: Vec<&str> = logs[0]["changes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["start", "end", "assignedTo"]);
    assert!(logs[0]["message"].as_str().unwrap().contains("Attendee list updated"));

    let (_, listed) = send(
        &app,
        Method::GET,
        &format!("/api/events?profileId={}", alice_id.as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(listed[0]["assignees"][0]["name"], "Alice");
    assert_eq!(listed[0]["startLocal"], "2025-01-15 10:00 EST");

    let (_, for_bob) = send(
        &app,
        Method::GET,
        &format!("/api/events?profileId={}", bob_id.as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(for_bob, json!([]));
}

#[tokio::test]
async fn validation_errors_map_to_bad_request() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/events", Some(standup("09:00", "09:00", &[]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_range");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/events",
        Some(json!({"title": "x", "timezone": "UTC", "start": "yesterday", "end": "today"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_input");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/events?tz=Nowhere/Land",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_timezone");
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = app();
    let missing = uuid::Uuid::now_v7();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/events/{missing}"),
        Some(standup("09:00", "10:00", &[])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "not_found");

    let (status, _) = send(&app, Method::GET, &format!("/api/events/{missing}/logs"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/events/not-a-uuid/logs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_input");
}
