//! Integration tests for the HTTP surface.
//!
//! Requests go through the full router with a mock completion provider and
//! an in-memory session store:
//! 1. Suggestion endpoints normalize model output
//! 2. Errors map to `{code, message}` with the right status
//! 3. Sessions round-trip and rank from stored state

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use decision_ranker::adapters::ai::{MockAIProvider, MockError};
use decision_ranker::adapters::http::{api_router, AppState};
use decision_ranker::adapters::storage::InMemorySessionStore;
use decision_ranker::application::{BatchPolicy, DEADLINE_MESSAGE};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(provider: MockAIProvider) -> Router {
    app_with_policy(provider, BatchPolicy::ContinueOnError)
}

fn app_with_policy(provider: MockAIProvider, policy: BatchPolicy) -> Router {
    let state = AppState::new(Arc::new(provider), Arc::new(InMemorySessionStore::new()))
        .with_batch_policy(policy);
    api_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

// =============================================================================
// Suggestion endpoints
// =============================================================================

#[tokio::test]
async fn suggest_criteria_extracts_array_from_prose() {
    let provider = MockAIProvider::new().with_response(
        r#"Sure! Here you go: [{"name":"Cost"},{"name":"Durability"}] Hope that helps."#,
    );
    let app = app(provider);

    let (status, body) = post(&app, "/api/suggest-criteria", json!({"topic": "laptops"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"criteria": [{"name": "Cost", "weight": 5}, {"name": "Durability", "weight": 5}]})
    );
}

#[tokio::test]
async fn suggest_criteria_requires_topic() {
    let provider = MockAIProvider::new();
    let app = app(provider.clone());

    let (status, body) = post(&app, "/api/suggest-criteria", json!({"topic": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_FIELD");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn product_details_align_keys_to_caller_criteria() {
    let provider = MockAIProvider::new()
        .with_response(r#"{"product":"widget","byCriterion":{"price":"Cheap and reliable"}}"#);
    let app = app(provider);

    let (status, body) = post(
        &app,
        "/api/product-details",
        json!({
            "topic": "gadgets",
            "products": ["Widget"],
            "criteria": [{"name": "Price", "weight": 5}, "Size"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["details"],
        json!([{"product": "Widget", "byCriterion": {"Price": "Cheap and reliable", "Size": ""}}])
    );
    assert_eq!(body["failures"], json!([]));
}

#[tokio::test]
async fn suggest_scores_normalizes_every_cell() {
    let provider = MockAIProvider::new()
        .with_response(r#"{"scores":{"Price":"8.7","Size":"huge"}}"#)
        .with_response(r#"{"scores":{}}"#);
    let app = app(provider);

    let (status, body) = post(
        &app,
        "/api/suggest-scores",
        json!({"topic": "gadgets", "products": ["A", "B"], "criteria": ["Price", "Size"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["scores"],
        json!({"A": {"Price": 9, "Size": 5}, "B": {"Price": 5, "Size": 5}})
    );
}

#[tokio::test]
async fn continue_on_error_reports_failed_products() {
    let provider = MockAIProvider::new()
        .with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        })
        .with_response(r#"{"scores":{"Price":7}}"#);
    let app = app(provider);

    let (status, body) = post(
        &app,
        "/api/suggest-scores",
        json!({"topic": "gadgets", "products": ["A", "B"], "criteria": ["Price"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scores"], json!({"B": {"Price": 7}}));
    assert_eq!(body["failures"][0]["product"], "A");
}

#[tokio::test(start_paused = true)]
async fn batch_deadline_returns_finished_scores() {
    let provider = MockAIProvider::new()
        .with_delay(Duration::from_millis(60))
        .with_response(r#"{"scores":{"Price":8}}"#)
        .with_response(r#"{"scores":{"Price":6}}"#)
        .with_response(r#"{"scores":{"Price":4}}"#);
    let state = AppState::new(Arc::new(provider), Arc::new(InMemorySessionStore::new()))
        .with_batch_deadline(Duration::from_millis(150));
    let app = api_router(state);

    let (status, body) = post(
        &app,
        "/api/suggest-scores",
        json!({"topic": "gadgets", "products": ["A", "B", "C"], "criteria": ["Price"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scores"], json!({"A": {"Price": 8}, "B": {"Price": 6}}));
    assert_eq!(body["failures"], json!([{"product": "C", "message": DEADLINE_MESSAGE}]));
}

#[tokio::test]
async fn abort_on_error_returns_bad_gateway() {
    let provider = MockAIProvider::new()
        .with_response(r#"{"scores":{"Price":7}}"#)
        .with_error(MockError::Network {
            message: "reset".to_string(),
        });
    let app = app_with_policy(provider, BatchPolicy::AbortOnError);

    let (status, body) = post(
        &app,
        "/api/suggest-scores",
        json!({"topic": "gadgets", "products": ["A", "B"], "criteria": ["Price"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "AI_PROVIDER_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("B: "));
}

#[tokio::test]
async fn authentication_failure_returns_401() {
    let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
    let app = app(provider);

    let (status, body) = post(&app, "/api/suggest-criteria", json!({"topic": "laptops"})).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"code": "UNAUTHORIZED", "message": "Invalid or missing API key"}));
}

#[tokio::test]
async fn duplicate_criteria_are_rejected() {
    let app = app(MockAIProvider::new());

    let (status, body) = post(
        &app,
        "/api/suggest-scores",
        json!({"topic": "gadgets", "products": ["A"], "criteria": ["Price", " Price "]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_VALUE");
}

// =============================================================================
// Ranking
// =============================================================================

#[tokio::test]
async fn rank_breaks_ties_by_input_order() {
    let app = app(MockAIProvider::new());

    let (status, body) = post(
        &app,
        "/api/rank",
        json!({
            "products": ["A", "B"],
            "criteria": [{"name": "X", "weight": 10}],
            "scores": {"A": {"X": 8}, "B": {"X": 8}}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ranked = body["ranked"].as_array().unwrap();
    assert_eq!(ranked[0]["name"], "A");
    assert_eq!(ranked[0]["weightedScore"], 80);
    assert_eq!(ranked[0]["rank"], 1);
    assert_eq!(ranked[1]["name"], "B");
    assert_eq!(ranked[1]["rank"], 2);
    assert_eq!(
        ranked[0]["explanation"],
        "Ranked #1 because it scored strongest on X given your weights."
    );
}

#[tokio::test]
async fn padded_product_name_round_trips_through_every_operation() {
    let provider = MockAIProvider::new()
        .with_response(r#"{"product":"Widget","byCriterion":{"X":"fast"}}"#)
        .with_response(r#"{"product":"Widget","scores":{"X":9}}"#);
    let app = app(provider);
    let body = json!({"topic": "gadgets", "products": [" Widget"], "criteria": ["X"]});

    let (status, details) = post(&app, "/api/product-details", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["details"][0]["product"], " Widget");

    let (status, scores) = post(&app, "/api/suggest-scores", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores["scores"], json!({" Widget": {"X": 9}}));

    let (status, ranked) = post(
        &app,
        "/api/rank",
        json!({
            "products": [" Widget"],
            "criteria": [{"name": "X", "weight": 10}],
            "scores": scores["scores"],
            "details": details["details"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranked["ranked"][0]["name"], " Widget");
    assert_eq!(ranked["ranked"][0]["weightedScore"], 90);
    assert_eq!(
        ranked["ranked"][0]["explanation"],
        "Ranked #1 because it scored strongest on X (fast) given your weights."
    );
}

#[tokio::test]
async fn rank_rejects_out_of_range_weight() {
    let app = app(MockAIProvider::new());

    let (status, body) = post(
        &app,
        "/api/rank",
        json!({"products": ["A"], "criteria": [{"name": "X", "weight": 0}]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
}

#[tokio::test]
async fn malformed_body_is_json_bad_request() {
    let app = app(MockAIProvider::new());
    let request = Request::post("/api/rank")
        .header("content-type", "application/json")
        .body(Body::from("{\"products\": [\"A\""))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "INVALID_FORMAT");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn fractional_score_is_json_bad_request() {
    let app = app(MockAIProvider::new());

    let (status, body) = post(
        &app,
        "/api/rank",
        json!({"products": ["A"], "criteria": ["X"], "scores": {"A": {"X": 8.5}}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn session_save_rejects_wrong_field_type() {
    let app = app(MockAIProvider::new());
    let (_, created) = send(&app, Method::POST, "/api/sessions", None).await;
    let uri = format!("/api/sessions/{}", created["sessionId"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"products": "A"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn session_lifecycle() {
    let app = app(MockAIProvider::new());

    let (status, created) = send(&app, Method::POST, "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["sessionId"].as_str().unwrap().to_string();
    let uri = format!("/api/sessions/{}", id);

    let (status, saved) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "topic": "laptops",
            "products": ["A", "B"],
            "criteria": [{"name": "Price", "weight": 2}, {"name": "Battery", "weight": 8}],
            "scores": {"A": {"Price": 9, "Battery": 2}, "B": {"Price": 4, "Battery": 9}},
            "productDetails": [{"product": "B", "byCriterion": {"Price": "", "Battery": "All day"}}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["topic"], "laptops");

    let (status, loaded) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, saved);

    let (status, ranking) = send(&app, Method::GET, &format!("{}/ranking", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranking["ranked"][0]["name"], "B");
    assert_eq!(ranking["ranked"][0]["weightedScore"], 80);
    assert_eq!(
        ranking["ranked"][0]["explanation"],
        "Ranked #1 because it scored strongest on Battery (All day) and Price given your weights."
    );

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn invalid_session_id_is_bad_request() {
    let app = app(MockAIProvider::new());

    let (status, body) = send(&app, Method::GET, "/api/sessions/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_FORMAT");
}
