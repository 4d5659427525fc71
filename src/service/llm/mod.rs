pub mod gemini;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Classification, ClassifyError};

// Traits.

/// Generic classifier trait that clients must implement.
///
/// This trait defines the single operation the pipeline needs from a large
/// language model. Implementing this trait allows different generation
/// services to be used with ticket-triage, and lets tests substitute a
/// deterministic double.
#[async_trait]
pub trait GenericClassifierClient: Send + Sync + 'static {
    /// Classify one ticket's content into a structured judgment.
    ///
    /// Exactly one attempt is made against the generation service; any
    /// failure is terminal for the invocation and surfaces as a
    /// [`ClassifyError`] rather than a panic.
    async fn classify(&self, ticket_content: &str) -> Result<Classification, ClassifyError>;
}

// Structs.

/// Classifier client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ClassifierClient {
    inner: Arc<dyn GenericClassifierClient>,
}

impl Deref for ClassifierClient {
    type Target = dyn GenericClassifierClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ClassifierClient {
    pub fn new(inner: Arc<dyn GenericClassifierClient>) -> Self {
        Self { inner }
    }
}
