//! End-to-end API tests: accept, poll, validation failures, not-found.

use axum::http::StatusCode;
use axum_test::TestServer;
use foresight_server::bundle::build_bundle;
use foresight_server::{create_router, AppState};
use serde_json::{json, Value};
use tokio::time::Duration;

fn test_state() -> AppState {
    // Short completion delay keeps the poll loops below fast.
    AppState::new(Duration::from_millis(25)).unwrap()
}

fn test_server(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).unwrap()
}

async fn poll_until_ready(server: &TestServer, run_id: &str) -> Value {
    for _ in 0..200 {
        let response = server.get(&format!("/v1/runs/{}", run_id)).await;
        match response.status_code() {
            StatusCode::OK => return response.json::<Value>(),
            StatusCode::ACCEPTED => {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            other => panic!("unexpected poll status {}", other),
        }
    }
    panic!("run {} never became ready", run_id);
}

#[tokio::test]
async fn test_health() {
    let server = test_server(test_state());
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_generate_accepts_then_serves_result() {
    let server = test_server(test_state());

    let response = server
        .post("/v1/generate")
        .json(&json!({ "question": "Future of EVs in NYC by 2030?", "horizon": 24 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    let body = response.json::<Value>();
    let run_id = body["run_id"].as_str().unwrap().to_string();
    assert!(run_id.starts_with("RUN-"));

    // First poll happens before the completion delay elapses.
    let early = server.get(&format!("/v1/runs/{}", run_id)).await;
    assert_eq!(early.status_code(), StatusCode::ACCEPTED);
    assert_eq!(early.json::<Value>()["status"], "processing");

    let result = poll_until_ready(&server, &run_id).await;
    let one_line = result["quick_take"]["one_line"].as_str().unwrap();
    assert!(one_line.contains("Future of EVs in NYC by 2030?"));
    assert!(one_line.contains("24 months"));
    assert!(result["quick_take"]["bullets"].as_array().unwrap().len() >= 6);
    assert_eq!(result["cones"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_result_round_trips_unchanged() {
    let state = test_state();
    let server = test_server(state.clone());

    let input = foresight_core::GenerateInput::question("Will robotaxis win?");
    let stored = build_bundle(&input);
    state.registry.insert_ready("RUN-fixed1", stored.clone()).await;

    let response = server.get("/v1/runs/RUN-fixed1").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        serde_json::to_value(&stored).unwrap()
    );
}

#[tokio::test]
async fn test_invalid_horizon_is_rejected_with_details() {
    let server = test_server(test_state());
    let response = server
        .post("/v1/generate")
        .json(&json!({ "question": "q", "horizon": 999 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "invalid_input");
    assert!(!body["details"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_question_lists_all_violations() {
    let server = test_server(test_state());
    let response = server
        .post("/v1/generate")
        .json(&json!({ "horizon": 999, "perspective": "them" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "invalid_input");
    assert!(body["details"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn test_unknown_run_is_not_found() {
    let server = test_server(test_state());
    let response = server.get("/v1/runs/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_stored_result_failing_output_schema_is_a_500() {
    let state = test_state();
    let server = test_server(state.clone());

    let mut broken = build_bundle(&foresight_core::GenerateInput::question("q"));
    broken.quick_take.bullets.truncate(1);
    state.registry.insert_ready("RUN-broken", broken).await;

    let response = server.get("/v1/runs/RUN-broken").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "invalid_artifacts");
}
