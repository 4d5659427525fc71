//! Runtime services and shared state for ticket-triage.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{llm::ClassifierClient, sink::ActionSink},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the classifier client, and the action
/// sink. It is designed to be trivially cloneable, allowing it to be passed
/// around (and into the HTTP shell's state) without the need for `Arc` or
/// `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The classifier client instance.
    pub classifier: ClassifierClient,
    /// The action sink instance.
    pub sink: ActionSink,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the classifier client.
        let classifier = ClassifierClient::gemini(&config);

        // Initialize the action sink.
        let sink = ActionSink::stub();

        Ok(Self { config, classifier, sink })
    }

    pub async fn start(&self) -> Void {
        crate::server::serve(self.clone()).await
    }
}
