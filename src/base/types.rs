use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// A raw support request awaiting triage.
///
/// Tickets are immutable: the pipeline reads the content but never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub content: String,
}

impl Ticket {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

/// Structured judgment produced by the generation service for one ticket.
///
/// The wire names (`Severity`, `Department`, `Action_Required`) are fixed by the
/// response schema sent to the service; the struct shape is also what gets
/// serialized into that schema descriptor. Values come straight from the model:
/// `severity` is expected to be "High", "Medium" or "Low" but is not validated
/// against an enum, and the "High" ⇒ "Pass_to_RPA" rule is enforced only by the
/// system instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Action_Required")]
    pub action_required: String,
}

/// Everything that can go wrong while classifying a ticket.
///
/// The classifier converts all of these into an error marker on the pipeline
/// state; none of them escape as a panic or an unhandled error.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The API key is unset or still the placeholder. Detected before any
    /// network I/O is attempted.
    #[error("generation service credential is not configured; set TICKET_TRIAGE_GEMINI_API_KEY")]
    CredentialMissing,
    /// The request never completed (DNS, connect, TLS, or read failure).
    #[error("generation service call failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success HTTP status.
    #[error("generation service returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    /// Either JSON decode step failed, or the envelope was missing expected
    /// fields (e.g. no candidates).
    #[error("failed to parse generation response: {0}")]
    Decode(String),
}
