use finder_core::FinderAssistant;
use std::sync::Arc;

/// Shared state for all handlers.
///
/// The assistant owns the catalog; both are read-only after startup, so
/// requests share them without locking.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<FinderAssistant>,
}

impl AppState {
    #[must_use]
    pub fn new(assistant: FinderAssistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}
