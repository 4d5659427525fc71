//! HTTP shell exposing the triage pipeline.
//!
//! A thin layer around the pipeline: one POST RPC that accepts a JSON body
//! with an optional `query` field, runs the pipeline, and returns the final
//! message, the normalized severity, and the classification details. A
//! processing failure is reported as a 500 with a structured body, never an
//! unhandled crash.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    base::types::{Classification, Ticket, Void},
    pipeline,
    runtime::Runtime,
};

/// Request body for `POST /invoke`.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    /// Raw ticket text. The configured fallback ticket is substituted when
    /// the field is absent.
    #[serde(default)]
    pub query: Option<String>,
}

/// Success body for `POST /invoke`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeResponse {
    pub final_message: String,
    pub severity: String,
    pub classification: Option<Classification>,
}

/// Error body for `POST /invoke` when the pipeline fails unexpectedly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeErrorResponse {
    pub final_message: String,
    pub severity: String,
    pub message: String,
}

/// POST /invoke — run one ticket through the triage pipeline.
pub async fn invoke(State(runtime): State<Runtime>, Json(request): Json<InvokeRequest>) -> Response {
    let ticket_content = request.query.unwrap_or_else(|| runtime.config.fallback_ticket.clone());

    match pipeline::run(Ticket::new(ticket_content), &runtime.classifier, &runtime.sink).await {
        Ok(state) => (
            StatusCode::OK,
            Json(InvokeResponse {
                final_message: state.action_taken,
                severity: state.severity,
                classification: state.classification,
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Pipeline failed unexpectedly: {err}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InvokeErrorResponse {
                    final_message: format!("Internal Server Error: {err}"),
                    severity: "Error".to_string(),
                    message: "Check server logs for details.".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Build the application router.
pub fn app(runtime: Runtime) -> Router {
    Router::new().route("/invoke", post(invoke)).layer(TraceLayer::new_for_http()).with_state(runtime)
}

/// Serve the HTTP shell until ctrl-c.
pub async fn serve(runtime: Runtime) -> Void {
    let addr = runtime.config.server_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Listening on {addr} ...");

    axum::serve(listener, app(runtime)).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
