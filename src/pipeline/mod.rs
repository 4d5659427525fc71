//! The triage pipeline: classify, route, act.
//!
//! This module provides the only stateful coordination in the system. One
//! invocation creates a fresh [`TriageState`], asks the classifier for a
//! judgment, routes on the normalized severity, and takes exactly one of the
//! two terminal actions. There is no loop, no re-entry, and no fan-out; each
//! invocation is independent and shares no mutable state with any other.

pub mod router;

use tracing::{info, instrument, warn};

use crate::{
    base::types::{Classification, Res, Ticket},
    service::{llm::ClassifierClient, sink::ActionSink},
};

use router::Route;

/// Stages of one pipeline run.
///
/// The machine only moves forward: Start → Classified → (RoutedLog |
/// RoutedEscalate) → Done, with the routed step skipped entirely when the
/// classifier reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Classified,
    RoutedLog,
    RoutedEscalate,
    Done,
}

/// Invocation-local state threaded through the pipeline stages.
///
/// Created fresh per invocation, populated incrementally by each stage, and
/// discarded after the response is returned.
#[derive(Debug, Clone)]
pub struct TriageState {
    /// The raw ticket text under triage.
    pub ticket_content: String,
    /// The classifier's judgment; `None` until classification succeeds, and
    /// permanently `None` when it fails.
    pub classification: Option<Classification>,
    /// Confirmation message from the action taken (or the classification
    /// error message); empty until a terminal step runs.
    pub action_taken: String,
    /// Upper-cased copy of the classified severity, or `"Error"` when
    /// classification failed; empty initially.
    pub severity: String,
    /// Current position in the state machine.
    pub stage: Stage,
}

impl TriageState {
    fn new(ticket: Ticket) -> Self {
        Self {
            ticket_content: ticket.content,
            classification: None,
            action_taken: String::new(),
            severity: String::new(),
            stage: Stage::Start,
        }
    }
}

/// Run one ticket through the pipeline and return the final state.
///
/// Classifier failures never escape: they are folded into the state as an
/// error marker (severity `"Error"`, the error message as the action taken)
/// and terminate the run without touching the executors, so a failed
/// classification can never escalate. Only an action-sink failure surfaces as
/// an error, for the caller's catch-all boundary to report.
#[instrument(skip_all)]
pub async fn run(ticket: Ticket, classifier: &ClassifierClient, sink: &ActionSink) -> Res<TriageState> {
    let mut state = TriageState::new(ticket);

    // Classify. The state always moves forward, carrying either the judgment
    // or the error marker.
    match classifier.classify(&state.ticket_content).await {
        Ok(classification) => {
            state.severity = classification.severity.to_uppercase();
            state.classification = Some(classification);
        }
        Err(err) => {
            warn!("Classification failed: {err}");
            state.severity = "Error".to_string();
            state.action_taken = err.to_string();
        }
    }
    state.stage = Stage::Classified;

    // An error classification terminates here: the executors require a fully
    // populated classification.
    let Some(classification) = state.classification.clone() else {
        state.stage = Stage::Done;
        return Ok(state);
    };

    // Route on the normalized severity, then take the chosen action.
    match router::route(&state.severity) {
        Route::Standard => {
            state.stage = Stage::RoutedLog;
            state.action_taken = sink.log_ticket(&classification).await?;
        }
        Route::Escalate => {
            state.stage = Stage::RoutedEscalate;
            state.action_taken = sink.escalate_ticket(&classification).await?;
        }
    }

    state.stage = Stage::Done;
    info!("Ticket routed with severity `{}`.", state.severity);

    Ok(state)
}

// Tests.
