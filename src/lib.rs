//! Library root for `ticket-triage`.
//!
//! Ticket-triage is a Gemini-powered support-ticket triage agent designed to:
//! - Classify free-text tickets into severity, owning department, and required action
//! - Route high-severity tickets to an escalation path, everything else to standard logging
//! - Expose the pipeline as a single HTTP RPC
//!
//! The agent calls the Gemini generation service for classification and mocks
//! its downstream logging/paging integrations. The architecture is built
//! around extensible traits that allow for different implementations of each
//! service.

pub mod base;
pub mod pipeline;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the ticket-triage runtime:
/// - Creates the runtime context with the classifier and action sink clients
/// - Starts the HTTP shell that exposes the pipeline
pub async fn start(config: Config) -> Void {
    info!("Starting ticket-triage ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
