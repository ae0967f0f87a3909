use std::sync::Arc;

use crate::backend::SearchBackend;

/// Shared state handed to gateway handlers.
pub struct GatewayState<B> {
    /// Search backend the gateway forwards queries to.
    pub backend: Arc<B>,
}

impl<B: SearchBackend> GatewayState<B> {
    /// Creates gateway state over a backend.
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

// Manual impl: `B` itself does not need to be `Clone` behind the `Arc`.
impl<B> Clone for GatewayState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}
