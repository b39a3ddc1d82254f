use std::sync::Arc;

use nova_debug_model::JavaThread;
use parking_lot::RwLock;

/// Source of the thread bound to the user's active evaluation context (the
/// frame selected in the debug view, typically).
pub trait EvaluationContextProvider: Send + Sync {
    fn active_thread(&self) -> Option<Arc<dyn JavaThread>>;
}

/// No evaluation context is ever active.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvaluationContext;

impl EvaluationContextProvider for NoEvaluationContext {
    fn active_thread(&self) -> Option<Arc<dyn JavaThread>> {
        None
    }
}

/// Evaluation context updated by the host as the selection changes.
#[derive(Default)]
pub struct ActiveEvaluationContext {
    thread: RwLock<Option<Arc<dyn JavaThread>>>,
}

impl ActiveEvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, thread: Arc<dyn JavaThread>) {
        *self.thread.write() = Some(thread);
    }

    pub fn clear(&self) {
        self.thread.write().take();
    }
}

impl EvaluationContextProvider for ActiveEvaluationContext {
    fn active_thread(&self) -> Option<Arc<dyn JavaThread>> {
        self.thread.read().clone()
    }
}
