//! Detail strings: a value's secondary, usually `toString()`-based, text.
//!
//! Details are computed on a worker thread against a suspended thread of the
//! live target. The caller either receives the result through a single-shot
//! listener or waits for it with a deadline via [`DetailRequest`]. A waiter
//! that gives up does not stop the worker; a late result is simply dropped.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use nova_debug_model::{
    DebugFault, JavaDebugTarget, JavaThread, JavaValue, ModelResult, ValueKind, STRING_TYPE_NAME,
};
use parking_lot::{Condvar, Mutex, RwLock};

use crate::eval_context::EvaluationContextProvider;
use crate::signature::is_object_signature;

/// Delivered instead of a detail when no thread can run the evaluation.
pub const NO_SUSPENDED_THREADS: &str = "Details unavailable - no suspended threads";

/// Delivered when the detail computation itself panicked.
pub const DETAIL_FAILED: &str = "Details unavailable - evaluation failed";

pub const DEFAULT_DETAIL_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Receives exactly one detail string.
pub type DetailListener = Box<dyn FnOnce(String) + Send + 'static>;

/// Computes the detail of values of one runtime type.
pub trait DetailFormatter: Send + Sync {
    fn is_enabled(&self) -> bool;
    fn evaluate(&self, value: &dyn JavaValue, thread: &dyn JavaThread) -> ModelResult<String>;
}

/// Formatter backed by a Java snippet evaluated with the value bound to
/// `this`.
#[derive(Debug, Clone)]
pub struct SnippetFormatter {
    snippet: String,
    enabled: bool,
}

impl SnippetFormatter {
    pub fn new(snippet: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl DetailFormatter for SnippetFormatter {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn evaluate(&self, value: &dyn JavaValue, thread: &dyn JavaThread) -> ModelResult<String> {
        let result = thread.evaluate_snippet(&self.snippet, value)?;
        stringify(result.as_ref(), thread)
    }
}

/// Detail formatters keyed by runtime type name.
#[derive(Default)]
pub struct DetailFormatterRegistry {
    formatters: RwLock<HashMap<String, Arc<dyn DetailFormatter>>>,
}

impl DetailFormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, type_name: impl Into<String>, formatter: Arc<dyn DetailFormatter>) {
        self.formatters.write().insert(type_name.into(), formatter);
    }

    pub fn remove(&self, type_name: &str) -> Option<Arc<dyn DetailFormatter>> {
        self.formatters.write().remove(type_name)
    }

    pub fn formatter_for(&self, type_name: &str) -> Option<Arc<dyn DetailFormatter>> {
        self.formatters.read().get(type_name).cloned()
    }

    pub fn has_enabled_formatter(&self, type_name: &str) -> bool {
        self.formatter_for(type_name)
            .is_some_and(|formatter| formatter.is_enabled())
    }
}

impl std::fmt::Debug for DetailFormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<String> = self.formatters.read().keys().cloned().collect();
        types.sort();
        f.debug_struct("DetailFormatterRegistry")
            .field("types", &types)
            .finish()
    }
}

/// Promise for a single detail string.
///
/// [`DetailRequest::listener`] completes it; [`DetailRequest::wait`] blocks at
/// most the given timeout. Only the first completion is kept, and completing
/// a request nobody waits for any more is a no-op.
#[derive(Clone, Default)]
pub struct DetailRequest {
    inner: Arc<RequestState>,
}

#[derive(Default)]
struct RequestState {
    detail: Mutex<Option<String>>,
    ready: Condvar,
}

impl DetailRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener(&self) -> DetailListener {
        let request = self.clone();
        Box::new(move |detail| request.complete(detail))
    }

    pub fn complete(&self, detail: String) {
        let mut slot = self.inner.detail.lock();
        if slot.is_none() {
            *slot = Some(detail);
            self.inner.ready.notify_all();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.inner.detail.lock().is_some()
    }

    pub fn wait(&self, timeout: Duration) -> Option<String> {
        let mut slot = self.inner.detail.lock();
        let _ = self
            .inner
            .ready
            .wait_while_for(&mut slot, |detail| detail.is_none(), timeout);
        slot.clone()
    }
}

impl std::fmt::Debug for DetailRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailRequest")
            .field("complete", &self.is_complete())
            .finish()
    }
}

pub struct DetailCoordinator {
    formatters: Arc<DetailFormatterRegistry>,
    context: Arc<dyn EvaluationContextProvider>,
    timeout: Duration,
}

impl DetailCoordinator {
    pub fn new(
        formatters: Arc<DetailFormatterRegistry>,
        context: Arc<dyn EvaluationContextProvider>,
    ) -> Self {
        Self {
            formatters,
            context,
            timeout: DEFAULT_DETAIL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn formatters(&self) -> &Arc<DetailFormatterRegistry> {
        &self.formatters
    }

    /// Thread used to evaluate details for values of `target`.
    ///
    /// The active evaluation context wins when its thread belongs to
    /// `target` and is suspended or already evaluating; otherwise the first
    /// suspended thread of `target` is used.
    pub fn evaluation_thread(&self, target: &dyn JavaDebugTarget) -> Option<Arc<dyn JavaThread>> {
        if let Some(thread) = self.context.active_thread() {
            if thread.target_id() == target.id()
                && (thread.is_suspended() || thread.is_performing_evaluation())
            {
                return Some(thread);
            }
        }

        match target.threads() {
            Ok(threads) => threads.into_iter().find(|thread| thread.is_suspended()),
            Err(err) => {
                tracing::warn!(
                    target: "nova.debug.presentation",
                    error = %err,
                    "failed to list threads while choosing an evaluation thread"
                );
                None
            }
        }
    }

    /// Computes the detail of `value` and hands it to `listener`, exactly once.
    ///
    /// When no evaluation thread is available the listener is called
    /// synchronously with [`NO_SUSPENDED_THREADS`]. Otherwise the work runs on
    /// a dedicated worker thread and this returns immediately.
    pub fn compute_detail(&self, value: Arc<dyn JavaValue>, listener: DetailListener) {
        let thread = value
            .debug_target()
            .and_then(|target| self.evaluation_thread(target.as_ref()));
        let Some(thread) = thread else {
            listener(NO_SUSPENDED_THREADS.to_string());
            return;
        };

        let slot = Arc::new(Mutex::new(Some(listener)));
        let worker_slot = slot.clone();
        let formatters = self.formatters.clone();
        let spawned = std::thread::Builder::new()
            .name("nova-debug-detail".to_string())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    value_detail(&formatters, value.as_ref(), thread.as_ref())
                }));
                let detail = match result {
                    Ok(Ok(detail)) => detail,
                    Ok(Err(err)) => {
                        tracing::debug!(
                            target: "nova.debug.presentation",
                            error = %err,
                            "detail evaluation failed"
                        );
                        err.to_string()
                    }
                    Err(_) => {
                        tracing::warn!(
                            target: "nova.debug.presentation",
                            "detail evaluation panicked"
                        );
                        DETAIL_FAILED.to_string()
                    }
                };
                deliver(&worker_slot, detail);
            });

        if let Err(err) = spawned {
            tracing::warn!(
                target: "nova.debug.presentation",
                error = %err,
                "failed to spawn detail worker thread"
            );
            deliver(&slot, DETAIL_FAILED.to_string());
        }
    }

    /// Starts computing the detail of `value` and returns the pending request.
    pub fn request(&self, value: Arc<dyn JavaValue>) -> DetailRequest {
        let request = DetailRequest::new();
        self.compute_detail(value, request.listener());
        request
    }

    /// Blocks for at most the configured timeout.
    pub fn detail_blocking(&self, value: Arc<dyn JavaValue>) -> Option<String> {
        self.request(value).wait(self.timeout)
    }

    /// Awaits the detail for at most the configured timeout.
    pub async fn detail_async(&self, value: Arc<dyn JavaValue>) -> Option<String> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.compute_detail(
            value,
            Box::new(move |detail| {
                // The receiver is gone once the waiter timed out.
                let _ = tx.send(detail);
            }),
        );
        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(detail)) => Some(detail),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}

impl std::fmt::Debug for DetailCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailCoordinator")
            .field("formatters", &self.formatters)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn deliver(slot: &Mutex<Option<DetailListener>>, detail: String) {
    let listener = slot.lock().take();
    if let Some(listener) = listener {
        listener(detail);
    }
}

/// Detail text of `value`, evaluated on `thread`.
pub fn value_detail(
    formatters: &DetailFormatterRegistry,
    value: &dyn JavaValue,
    thread: &dyn JavaThread,
) -> ModelResult<String> {
    if value.kind() == ValueKind::ReferenceList {
        return reference_list_detail(value);
    }

    let signature = value.signature()?;
    let type_name = value.reference_type_name()?;
    if !is_object_signature(signature.as_deref()) || type_name == STRING_TYPE_NAME {
        return value.value_string();
    }

    if let Some(formatter) = formatters.formatter_for(&type_name) {
        if formatter.is_enabled() {
            return formatter.evaluate(value, thread);
        }
    }
    stringify(value, thread)
}

/// `toString()` on the target, or the value text when the thread cannot
/// invoke methods.
fn stringify(value: &dyn JavaValue, thread: &dyn JavaThread) -> ModelResult<String> {
    let signature = value.signature()?;
    if !is_object_signature(signature.as_deref())
        || value.reference_type_name()? == STRING_TYPE_NAME
    {
        return value.value_string();
    }
    match thread.invoke_to_string(value) {
        Err(DebugFault::Unsupported(_)) => value.value_string(),
        other => other,
    }
}

fn reference_list_detail(value: &dyn JavaValue) -> ModelResult<String> {
    let references = value.referring_objects()?;
    if references.is_empty() {
        return Ok("No references found".to_string());
    }

    let mut out = references.len().to_string();
    out.push_str(if references.len() == 1 {
        " reference:\n"
    } else {
        " references:\n"
    });
    for reference in &references {
        out.push_str(&reference.reference_type_name()?);
        out.push(' ');
        out.push_str(&reference.value_string()?);
        out.push('\n');
    }
    Ok(out)
}
