//! Read-only Java debug model façade for Nova's debugger presentation layer.
//!
//! The presentation crate renders labels, icons and detail strings for live
//! debuggee state. It never talks to the VM itself: everything it needs is
//! pulled through the traits in this crate, which a debugger backend (or the
//! [`mock`] model in tests) implements.
//!
//! Every accessor that touches live state is fallible. Elements may be
//! invalidated between two calls (objects collected, threads resumed, the VM
//! disconnected), so callers must treat a [`DebugFault`] as an ordinary
//! outcome rather than a bug.

mod element;
mod fault;
pub mod mock;

use std::sync::Arc;

pub use element::{DebugElement, MonitorRelation};
pub use fault::{DebugFault, FaultKind, ModelResult, VmErrorKind};

pub type TargetId = u64;
pub type ThreadId = u64;
pub type ObjectId = u64;

/// Reference type name of `java.lang.String`.
pub const STRING_TYPE_NAME: &str = "java.lang.String";

/// Default stratum of classes compiled from Java sources.
pub const JAVA_STRATUM: &str = "Java";

/// A debuggee VM connection.
pub trait JavaDebugTarget: Send + Sync {
    fn id(&self) -> TargetId;
    fn name(&self) -> ModelResult<String>;

    fn is_suspended(&self) -> bool;
    fn is_terminated(&self) -> bool;
    fn is_disconnected(&self) -> bool;

    /// The VM runs code that no longer matches the workspace sources.
    fn is_out_of_synch(&self) -> ModelResult<bool>;
    /// Heuristic variant of [`JavaDebugTarget::is_out_of_synch`]: a hot code
    /// replace failed or was not attempted, but nothing is confirmed stale.
    fn may_be_out_of_synch(&self) -> ModelResult<bool>;

    fn threads(&self) -> ModelResult<Vec<Arc<dyn JavaThread>>>;
}

pub trait JavaThread: Send + Sync {
    fn id(&self) -> ThreadId;
    fn target_id(&self) -> TargetId;
    fn name(&self) -> ModelResult<String>;

    fn is_suspended(&self) -> bool;
    /// Suspended for internal bookkeeping (e.g. a conditional breakpoint being
    /// evaluated) without being reported to the user.
    fn is_suspended_quiet(&self) -> bool {
        false
    }
    fn is_stepping(&self) -> bool;
    fn is_terminated(&self) -> bool;
    fn is_performing_evaluation(&self) -> bool;
    fn is_system_thread(&self) -> ModelResult<bool>;

    fn is_out_of_synch(&self) -> ModelResult<bool>;
    fn may_be_out_of_synch(&self) -> ModelResult<bool>;
    fn is_in_deadlock(&self) -> bool {
        false
    }

    /// Breakpoints the thread is currently suspended at, in the order the
    /// backend reported them.
    fn breakpoints(&self) -> Vec<Arc<dyn JavaBreakpoint>>;
    fn top_frame(&self) -> ModelResult<Option<Arc<dyn JavaStackFrame>>>;

    /// Invoke `toString()` on `value` using this thread.
    fn invoke_to_string(&self, _value: &dyn JavaValue) -> ModelResult<String> {
        Err(DebugFault::Unsupported(
            "toString() invocation is not supported by this thread".to_string(),
        ))
    }

    /// Evaluate `snippet` in the context of `receiver` (bound to `this`).
    fn evaluate_snippet(
        &self,
        _snippet: &str,
        _receiver: &dyn JavaValue,
    ) -> ModelResult<Arc<dyn JavaValue>> {
        Err(DebugFault::Unsupported(
            "snippet evaluation is not supported by this thread".to_string(),
        ))
    }
}

/// Compilation problem recorded at a stack frame location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemMarker {
    /// Problem message, if the marker carries one.
    pub message: Option<String>,
}

pub trait JavaStackFrame: Send + Sync {
    fn thread_id(&self) -> ThreadId;

    fn declaring_type_name(&self) -> ModelResult<String>;
    fn receiving_type_name(&self) -> ModelResult<String>;
    fn method_name(&self) -> ModelResult<String>;
    fn argument_type_names(&self) -> ModelResult<Vec<String>>;
    fn is_var_args(&self) -> ModelResult<bool>;

    /// Line number, or a negative value when no line information exists.
    fn line_number(&self) -> ModelResult<i32>;
    fn is_native(&self) -> ModelResult<bool>;
    fn is_obsolete(&self) -> ModelResult<bool>;
    fn is_out_of_synch(&self) -> ModelResult<bool>;
    fn is_synchronized(&self) -> ModelResult<bool>;

    fn default_stratum(&self) -> ModelResult<String> {
        Ok(JAVA_STRATUM.to_string())
    }
    fn source_name(&self) -> ModelResult<String>;
    fn source_path(&self) -> ModelResult<String>;
    fn were_locals_available(&self) -> bool;

    fn problem(&self) -> ModelResult<Option<ProblemMarker>> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Primitive,
    Object,
    Array,
    /// Synthetic value listing every object that refers to a root object.
    ReferenceList,
}

pub trait JavaValue: Send + Sync {
    fn kind(&self) -> ValueKind;
    fn debug_target(&self) -> Option<Arc<dyn JavaDebugTarget>>;

    fn reference_type_name(&self) -> ModelResult<String>;
    fn value_string(&self) -> ModelResult<String>;
    /// JNI-style signature of the value's type, if the type is known.
    fn signature(&self) -> ModelResult<Option<String>>;
    fn is_allocated(&self) -> ModelResult<bool>;

    fn array_length(&self) -> ModelResult<usize> {
        Err(DebugFault::Unsupported("value is not an array".to_string()))
    }

    fn referring_objects(&self) -> ModelResult<Vec<Arc<dyn JavaValue>>> {
        Err(DebugFault::Unsupported(
            "value is not a reference list".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Local,
    Public,
    Protected,
    Private,
    Package,
}

pub trait JavaVariable: Send + Sync {
    fn name(&self) -> ModelResult<String>;
    fn value(&self) -> ModelResult<Arc<dyn JavaValue>>;
    fn reference_type_name(&self) -> ModelResult<String>;

    fn visibility(&self) -> ModelResult<Visibility>;
    fn is_final(&self) -> ModelResult<bool>;
    fn is_static(&self) -> ModelResult<bool>;

    fn is_field(&self) -> bool {
        false
    }
    fn declaring_type_name(&self) -> ModelResult<String> {
        Err(DebugFault::Unsupported("variable is not a field".to_string()))
    }
    /// All field names visible in the receiving type, inherited ones included.
    fn receiving_type_field_names(&self) -> ModelResult<Vec<String>> {
        Err(DebugFault::Unsupported("variable is not a field".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakpointKind {
    Line,
    Method,
    MethodEntry,
    Watchpoint,
    Exception,
    ClassPrepare,
    Pattern,
    TargetPattern,
    StratumLine,
}

impl BreakpointKind {
    /// Kinds anchored at a source line.
    pub fn is_line_based(self) -> bool {
        matches!(
            self,
            BreakpointKind::Line
                | BreakpointKind::MethodEntry
                | BreakpointKind::Pattern
                | BreakpointKind::TargetPattern
                | BreakpointKind::StratumLine
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuspendPolicy {
    #[default]
    Thread,
    Vm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassPrepareMemberType {
    #[default]
    Class,
    Interface,
}

/// A breakpoint of any kind.
///
/// Accessors that only make sense for some kinds default to
/// [`DebugFault::Unsupported`]; callers dispatch on [`JavaBreakpoint::kind`]
/// first and only use the accessors that kind provides.
pub trait JavaBreakpoint: Send + Sync {
    fn kind(&self) -> BreakpointKind;

    /// Whether the persisted marker backing this breakpoint still exists.
    fn marker_exists(&self) -> bool;
    /// Breakpoint installed to stop on a compilation problem.
    fn is_problem(&self) -> bool {
        false
    }

    fn type_name(&self) -> ModelResult<String>;
    /// Name of the file resource the marker is attached to, if it is a file.
    fn resource_name(&self) -> ModelResult<Option<String>>;
    /// Label of the Java member enclosing the breakpoint, when resolvable.
    fn member_label(&self) -> ModelResult<Option<String>> {
        Ok(None)
    }

    fn is_enabled(&self) -> ModelResult<bool>;
    fn is_installed(&self) -> ModelResult<bool>;
    fn hit_count(&self) -> ModelResult<i32>;
    fn suspend_policy(&self) -> ModelResult<SuspendPolicy>;
    fn thread_filters(&self) -> ModelResult<Vec<ThreadId>>;
    fn instance_filters(&self) -> ModelResult<Vec<Arc<dyn JavaValue>>>;

    fn line_number(&self) -> ModelResult<i32> {
        Err(unsupported("line number"))
    }
    fn source_name(&self) -> ModelResult<Option<String>> {
        Err(unsupported("source name"))
    }
    fn condition(&self) -> ModelResult<Option<String>> {
        Err(unsupported("condition"))
    }
    fn is_condition_enabled(&self) -> ModelResult<bool> {
        Err(unsupported("condition"))
    }
    fn is_run_to_line(&self) -> bool {
        false
    }

    fn method_name(&self) -> ModelResult<Option<String>> {
        Err(unsupported("method name"))
    }
    fn method_signature(&self) -> ModelResult<Option<String>> {
        Err(unsupported("method signature"))
    }
    fn is_entry(&self) -> ModelResult<bool> {
        Err(unsupported("method entry"))
    }
    fn is_exit(&self) -> ModelResult<bool> {
        Err(unsupported("method exit"))
    }
    /// Whether the last suspension in `target` happened on method entry.
    fn is_entry_suspend(&self, _target: TargetId) -> ModelResult<bool> {
        Err(unsupported("method entry"))
    }

    fn field_name(&self) -> ModelResult<String> {
        Err(unsupported("field name"))
    }
    fn is_access(&self) -> ModelResult<bool> {
        Err(unsupported("field access"))
    }
    fn is_modification(&self) -> ModelResult<bool> {
        Err(unsupported("field modification"))
    }
    /// Whether the last suspension in `target` happened on field access.
    fn is_access_suspend(&self, _target: TargetId) -> ModelResult<bool> {
        Err(unsupported("field access"))
    }

    fn is_caught(&self) -> ModelResult<bool> {
        Err(unsupported("caught exceptions"))
    }
    fn is_uncaught(&self) -> ModelResult<bool> {
        Err(unsupported("uncaught exceptions"))
    }
    fn is_checked(&self) -> ModelResult<bool> {
        Err(unsupported("checked exceptions"))
    }
    /// Type of the exception that caused the last suspension.
    fn exception_type_name(&self) -> ModelResult<Option<String>> {
        Err(unsupported("exception type"))
    }
    fn inclusion_filters(&self) -> ModelResult<Vec<String>> {
        Err(unsupported("exception filters"))
    }
    fn exclusion_filters(&self) -> ModelResult<Vec<String>> {
        Err(unsupported("exception filters"))
    }

    fn member_type(&self) -> ModelResult<ClassPrepareMemberType> {
        Err(unsupported("class prepare member type"))
    }
}

fn unsupported(what: &str) -> DebugFault {
    DebugFault::Unsupported(format!("{what} is not available for this breakpoint"))
}

pub trait JavaExpression: Send + Sync {
    fn expression_text(&self) -> String;
    fn value(&self) -> Option<Arc<dyn JavaValue>>;
    /// Expression produced by an "inspect" action rather than a watch.
    fn is_inspect(&self) -> bool {
        false
    }
}

pub trait JavaWatchExpression: JavaExpression {
    fn is_enabled(&self) -> bool;
}
