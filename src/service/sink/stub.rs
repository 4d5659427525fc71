//! Stub action sink that fabricates confirmation messages.
//!
//! No external I/O happens here: both paths only build the string a real
//! logging or paging integration would have produced.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::base::types::{Classification, Res};

use super::{ActionSink, GenericActionSink};

// Extra methods on `ActionSink` applied by the stub implementation.

impl ActionSink {
    pub fn stub() -> Self {
        Self { inner: Arc::new(StubActionSink) }
    }
}

// Specific implementations.

/// Action sink that mocks the downstream logging and paging systems.
#[derive(Clone, Default)]
pub struct StubActionSink;

#[async_trait]
impl GenericActionSink for StubActionSink {
    #[instrument(name = "StubActionSink::log_ticket", skip_all)]
    async fn log_ticket(&self, classification: &Classification) -> Res<String> {
        info!("Logging ticket for the {} team.", classification.department);

        Ok(format!(
            "Ticket logged to the support tracker for {} team. Severity: {}. Action: {}",
            classification.department, classification.severity, classification.action_required
        ))
    }

    #[instrument(name = "StubActionSink::escalate_ticket", skip_all)]
    async fn escalate_ticket(&self, classification: &Classification) -> Res<String> {
        warn!("Escalating ticket for the {} team.", classification.department);

        Ok(format!(
            "CRITICAL TICKET ESCALATED! Triggering RPA bot for Department: {}. Severity: {}. Action: {}",
            classification.department, classification.severity, classification.action_required
        ))
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn high_classification() -> Classification {
        Classification {
            severity: "High".to_string(),
            department: "Finance".to_string(),
            action_required: "Pass_to_RPA".to_string(),
        }
    }

    fn low_classification() -> Classification {
        Classification {
            severity: "Low".to_string(),
            department: "Sales".to_string(),
            action_required: "Follow-up".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_ticket_references_classification_fields() {
        let sink = ActionSink::stub();

        let message = sink.log_ticket(&low_classification()).await.unwrap();

        assert!(message.contains("Sales"));
        assert!(message.contains("Low"));
        assert!(message.contains("Follow-up"));
        assert!(!message.contains("CRITICAL"));
    }

    #[tokio::test]
    async fn test_escalate_ticket_is_marked_critical() {
        let sink = ActionSink::stub();

        let message = sink.escalate_ticket(&high_classification()).await.unwrap();

        assert!(message.contains("CRITICAL"));
        assert!(message.contains("Finance"));
        assert!(message.contains("Pass_to_RPA"));
    }

    #[tokio::test]
    async fn test_messages_are_deterministic() {
        let sink = ActionSink::stub();
        let classification = low_classification();

        let first = sink.log_ticket(&classification).await.unwrap();
        let second = sink.log_ticket(&classification).await.unwrap();

        assert_eq!(first, second);
    }
}
