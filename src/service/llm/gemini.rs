//! Integration with the Gemini generation service.
//!
//! This module provides the concrete [`GenericClassifierClient`] backed by the
//! Gemini `generateContent` REST endpoint. The request carries the ticket text
//! as user content, the fixed classifier directive as the system instruction,
//! and a JSON-schema constraint pinning the reply to the shape of
//! [`Classification`]. The reply is decoded twice: once for the transport
//! envelope, once for the generated text itself.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{Classification, ClassifyError},
};

use super::{ClassifierClient, GenericClassifierClient};

// Extra methods on `ClassifierClient` applied by the gemini implementation.

impl ClassifierClient {
    pub fn gemini(config: &Config) -> Self {
        let client = GeminiClassifierClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// Gemini classifier client implementation.
#[derive(Clone)]
pub struct GeminiClassifierClient {
    http: reqwest::Client,
    config: Config,
}

impl GeminiClassifierClient {
    /// Create a new Gemini classifier client.
    #[instrument(name = "GeminiClassifierClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Build the `generateContent` URL for the configured model.
    ///
    /// Gemini authenticates through a `key` query parameter rather than a
    /// header.
    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.gemini_endpoint.trim_end_matches('/'),
            self.config.gemini_model,
            self.config.gemini_api_key
        )
    }

    /// Build the generation request for one ticket.
    fn build_classify_request<'a>(&'a self, ticket_content: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: ticket_content }],
            }],
            system_instruction: RequestContent {
                parts: vec![RequestPart {
                    text: &self.config.classifier_system_directive,
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: classification_schema(),
            },
        }
    }
}

#[async_trait]
impl GenericClassifierClient for GeminiClassifierClient {
    #[instrument(name = "GeminiClassifierClient::classify", skip_all)]
    async fn classify(&self, ticket_content: &str) -> Result<Classification, ClassifyError> {
        // Short-circuit before any network I/O if no usable credential is configured.
        if !self.config.has_credential() {
            return Err(ClassifyError::CredentialMissing);
        }

        let request = self.build_classify_request(ticket_content);

        // One attempt only: a failed classification is terminal for the invocation.
        let response = self.http.post(self.generate_content_url()).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifyError::Status { status, body });
        }

        // First decode: the transport envelope.
        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|err| ClassifyError::Decode(format!("envelope is not valid JSON: {err}")))?;

        let generated = envelope
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or_else(|| ClassifyError::Decode("envelope contained no candidates".to_string()))?;

        // Second decode: the generated text, which must itself be a classification.
        let classification: Classification =
            serde_json::from_str(generated).map_err(|err| ClassifyError::Decode(format!("generated text is not a valid classification: {err}")))?;

        info!("Classified ticket for department `{}` with severity `{}`.", classification.department, classification.severity);

        Ok(classification)
    }
}

// Wire types for the `generateContent` endpoint.

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: RequestContent<'a>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'static Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

// Statics.

static CLASSIFICATION_SCHEMA: OnceLock<Value> = OnceLock::new();

/// Get the JSON schema describing [`Classification`].
///
/// Sent as the `responseSchema` constraint so the service returns exactly the
/// three expected fields.
fn classification_schema() -> &'static Value {
    CLASSIFICATION_SCHEMA.get_or_init(|| {
        serde_json::json!({
            "type": "object",
            "properties": {
                "Severity": {"type": "string", "description": "The urgency: 'High', 'Medium', or 'Low'."},
                "Department": {"type": "string", "description": "The responsible team, taken from keywords in the ticket text."},
                "Action_Required": {"type": "string", "description": "The primary action: 'Follow-up', 'Documentation_Update', 'Pass_to_RPA'."},
            },
            "required": ["Severity", "Department", "Action_Required"],
            "additionalProperties": false
        })
    })
}

// Tests.
