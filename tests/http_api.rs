//! Integration tests for the HTTP routes over the in-memory backend.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use seasons::adapters::http::api_router;
use seasons::adapters::memory::{self, seed};
use seasons::application::Services;
use seasons::domain::foundation::UserId;
use seasons::domain::pillar::PillarName;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let repos = memory::repositories().unwrap();
    let services = Services::new(&repos);
    api_router(&services, repos.exercises.clone())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn focus_lists_five_pillars_in_order() {
    let (status, body) = send(&app(), "GET", "/api/focus/pillars", None).await;
    assert_eq!(status, StatusCode::OK);
    let pillars = body.as_array().unwrap();
    assert_eq!(pillars.len(), 5);
    assert_eq!(pillars[0]["pillar"]["sort_order"], 0);
}

#[tokio::test]
async fn unknown_pillar_is_404_and_malformed_id_is_400() {
    let app = app();
    let missing = "00000000-0000-4000-8000-0001000000ff";
    let (status, body) = send(&app, "GET", &format!("/api/focus/pillars/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PILLAR_NOT_FOUND");

    let (status, body) = send(&app, "GET", "/api/focus/pillars/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn season_can_be_created_themed_and_started() {
    let app = app();
    let user = UserId::new().to_string();

    let (status, view) = send(
        &app,
        "POST",
        "/api/seasons",
        Some(json!({"user_id": user, "name": "Summer Cut", "duration_weeks": 12})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(view["season"]["status"], "DRAFT");
    let season_id = view["season"]["id"].as_str().unwrap().to_string();

    let health = seed::pillar_id(PillarName::HealthAndFitness);
    let (status, pillar) = send(
        &app,
        "PUT",
        &format!("/api/seasons/{season_id}/pillars/{health}/theme"),
        Some(json!({"theme": "Get lean"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pillar["theme"], "Get lean");

    let (status, started) = send(
        &app,
        "POST",
        &format!("/api/seasons/{season_id}/start"),
        Some(json!({"user_id": user})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["status"], "ACTIVE");
    assert!(started["end_date"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/seasons",
        Some(json!({"user_id": user, "name": "Second"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ACTIVE_SEASON_EXISTS");
}

#[tokio::test]
async fn invalid_season_name_is_422_with_field() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/seasons",
        Some(json!({"user_id": UserId::new().to_string(), "name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "name");
}

#[tokio::test]
async fn archiving_a_draft_is_a_conflict() {
    let app = app();
    let user = UserId::new().to_string();
    let (_, view) = send(
        &app,
        "POST",
        "/api/seasons",
        Some(json!({"user_id": user, "name": "Draft"})),
    )
    .await;
    let season_id = view["season"]["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/seasons/{season_id}/archive"),
        Some(json!({"user_id": user})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/seasons/{season_id}?user_id={user}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/seasons/{season_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exercises_filter_by_muscle_group_and_equipment() {
    let app = app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/exercises?muscle_group=Chest&equipment=barbell",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let exercises = body.as_array().unwrap();
    assert!(!exercises.is_empty());
    for exercise in exercises {
        assert_eq!(exercise["equipment"], "barbell");
    }

    let (status, body) = send(&app, "GET", "/api/exercises/barbell_bench_press", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Barbell Bench Press");

    let (status, body) = send(&app, "GET", "/api/exercises/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EXERCISE_NOT_FOUND");
}
