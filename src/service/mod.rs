//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by ticket-triage:
//! - LLM services (e.g., Gemini) for ticket classification
//! - Action sinks (stubbed logging and escalation integrations)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod llm;
pub mod sink;
