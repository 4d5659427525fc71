#![cfg(test)]

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use httpmock::prelude::*;
use serde_json::json;
use ticket_triage::{
    base::{
        config::{Config, ConfigInner, PLACEHOLDER_API_KEY},
        types::Ticket,
    },
    pipeline::{self, Stage},
    runtime::Runtime,
    server::{self, InvokeRequest},
    service::llm::GenericClassifierClient,
};

// Helpers.

const GENERATE_PATH: &str = "/models/gemini-2.5-flash-preview-09-2025:generateContent";

/// Helper function to set up a runtime whose classifier points at a mock
/// generation endpoint.
fn setup_test_runtime(endpoint: &str, api_key: &str) -> Runtime {
    let config = Config {
        inner: Arc::new(ConfigInner {
            gemini_api_key: api_key.to_string(),
            gemini_endpoint: endpoint.to_string(),
            ..Default::default()
        }),
    };

    Runtime::new(config).expect("Failed to create runtime")
}

/// Build a Gemini-style envelope whose generated text is the given payload.
fn envelope_with_text(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

/// Read an axum response produced by the invoke handler back into JSON.
async fn response_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read response body");
    let value = serde_json::from_slice(&bytes).expect("Response body was not JSON");

    (status, value)
}

// Pipeline scenarios.

#[tokio::test]
async fn test_high_severity_ticket_escalates() {
    let server = MockServer::start();

    let generate = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).query_param("key", "test-key");
        then.status(200).json_body(envelope_with_text(
            r#"{"Severity": "High", "Department": "Finance", "Action_Required": "Pass_to_RPA"}"#,
        ));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let state = pipeline::run(
        Ticket::new("The ERP application in the finance department is not working"),
        &runtime.classifier,
        &runtime.sink,
    )
    .await
    .expect("Pipeline should not fail");

    generate.assert();
    assert_eq!(state.stage, Stage::Done);
    assert_eq!(state.severity, "HIGH");
    assert!(state.action_taken.contains("CRITICAL"));
    assert!(state.action_taken.contains("Finance"));
    assert!(state.action_taken.contains("Pass_to_RPA"));
}

#[tokio::test]
async fn test_low_severity_ticket_logs() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope_with_text(
            r#"{"Severity": "Low", "Department": "Sales", "Action_Required": "Follow-up"}"#,
        ));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let state = pipeline::run(Ticket::new("Can someone from sales call me back about my quote?"), &runtime.classifier, &runtime.sink)
        .await
        .expect("Pipeline should not fail");

    assert_eq!(state.stage, Stage::Done);
    assert_eq!(state.severity, "LOW");
    assert!(state.action_taken.contains("Sales"));
    assert!(state.action_taken.contains("Follow-up"));
    assert!(!state.action_taken.contains("CRITICAL"));
}

#[tokio::test]
async fn test_upstream_http_error_becomes_error_marker() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(500).body("upstream exploded");
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let state = pipeline::run(Ticket::new("anything"), &runtime.classifier, &runtime.sink).await.expect("Pipeline should not fail");

    assert_eq!(state.stage, Stage::Done);
    assert_eq!(state.severity, "Error");
    assert!(state.classification.is_none());
    assert!(state.action_taken.contains("generation service returned"));
    assert!(state.action_taken.contains("500"));
    assert!(!state.action_taken.contains("CRITICAL"));
}

#[tokio::test]
async fn test_non_json_generated_text_becomes_error_marker() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope_with_text("I'm sorry, I cannot classify this ticket."));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let state = pipeline::run(Ticket::new("anything"), &runtime.classifier, &runtime.sink).await.expect("Pipeline should not fail");

    assert_eq!(state.severity, "Error");
    assert!(state.action_taken.contains("not a valid classification"));
}

#[tokio::test]
async fn test_empty_envelope_becomes_error_marker() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(json!({ "candidates": [] }));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let state = pipeline::run(Ticket::new("anything"), &runtime.classifier, &runtime.sink).await.expect("Pipeline should not fail");

    assert_eq!(state.severity, "Error");
    assert!(state.action_taken.contains("no candidates"));
}

#[tokio::test]
async fn test_placeholder_credential_never_touches_the_network() {
    let server = MockServer::start();

    let generate = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope_with_text("{}"));
    });

    let runtime = setup_test_runtime(&server.base_url(), PLACEHOLDER_API_KEY);

    let result = runtime.classifier.classify("anything").await;

    assert!(result.is_err());
    assert_eq!(generate.hits(), 0);
}

// HTTP shell scenarios.

#[tokio::test]
async fn test_invoke_returns_structured_response() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(envelope_with_text(
            r#"{"Severity": "High", "Department": "Finance", "Action_Required": "Pass_to_RPA"}"#,
        ));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let response = server::invoke(
        State(runtime),
        Json(InvokeRequest {
            query: Some("The ERP application in the finance department is not working".to_string()),
        }),
    )
    .await;

    let (status, body) = response_json(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "HIGH");
    assert!(body["finalMessage"].as_str().unwrap().contains("CRITICAL"));
    assert_eq!(body["classification"]["Department"], "Finance");
}

#[tokio::test]
async fn test_invoke_substitutes_default_ticket_when_query_absent() {
    let server = MockServer::start();

    let generate = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH).body_contains("Default test ticket");
        then.status(200).json_body(envelope_with_text(
            r#"{"Severity": "Low", "Department": "Tech Support", "Action_Required": "Follow-up"}"#,
        ));
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let response = server::invoke(State(runtime), Json(InvokeRequest { query: None })).await;
    let (status, body) = response_json(response).await;

    generate.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "LOW");
    assert!(body["finalMessage"].as_str().unwrap().contains("Tech Support"));
}

#[tokio::test]
async fn test_invoke_reports_classifier_failure_as_error_severity() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(503).body("service unavailable");
    });

    let runtime = setup_test_runtime(&server.base_url(), "test-key");

    let response = server::invoke(State(runtime), Json(InvokeRequest { query: Some("anything".to_string()) })).await;
    let (status, body) = response_json(response).await;

    // Classifier failures are ordinary pipeline outcomes, not endpoint errors.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "Error");
    assert!(body["classification"].is_null());
    assert!(body["finalMessage"].as_str().unwrap().contains("503"));
}
