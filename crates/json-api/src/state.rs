//! State

use std::sync::Arc;

use marketplace_app::{auth::WebhookVerifier, context::AppContext};

/// Shared request state injected into every route.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Verifies identity-provider webhook signatures.
    pub(crate) webhooks: Arc<WebhookVerifier>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, webhooks: WebhookVerifier) -> Self {
        Self {
            app,
            webhooks: Arc::new(webhooks),
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, webhooks: WebhookVerifier) -> Arc<Self> {
        Arc::new(Self::new(app, webhooks))
    }
}
