pub mod stub;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Classification, Res};

// Traits.

/// Generic "action sink" trait that downstream integrations must implement.
///
/// This trait defines the two terminal actions a triaged ticket can trigger.
/// The shipped implementation is a stub that fabricates confirmation strings;
/// a real integration (CRM record-keeping, a pager, an RPA queue) can be
/// substituted without touching pipeline logic.
#[async_trait]
pub trait GenericActionSink: Send + Sync + 'static {
    /// Record a non-urgent ticket through the standard logging path.
    ///
    /// Returns a confirmation string referencing the classification's
    /// department, severity, and required action verbatim.
    async fn log_ticket(&self, classification: &Classification) -> Res<String>;

    /// Escalate an urgent ticket through the high-priority path.
    ///
    /// Returns a distinctly marked critical message, simulating a page or
    /// automation trigger.
    async fn escalate_ticket(&self, classification: &Classification) -> Res<String>;
}

// Structs.

/// Action sink for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ActionSink {
    inner: Arc<dyn GenericActionSink>,
}

impl Deref for ActionSink {
    type Target = dyn GenericActionSink;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ActionSink {
    pub fn new(inner: Arc<dyn GenericActionSink>) -> Self {
        Self { inner }
    }
}
