use std::sync::Arc;

use crate::{
    JavaBreakpoint, JavaDebugTarget, JavaExpression, JavaStackFrame, JavaThread, JavaValue,
    JavaVariable, JavaWatchExpression,
};

/// Any element the presentation layer can be asked to label.
///
/// The set of kinds is closed: supporting a new kind means adding a variant
/// and handling it in every match.
#[derive(Clone)]
pub enum DebugElement {
    Target(Arc<dyn JavaDebugTarget>),
    Thread(Arc<dyn JavaThread>),
    StackFrame(Arc<dyn JavaStackFrame>),
    Variable(Arc<dyn JavaVariable>),
    Value(Arc<dyn JavaValue>),
    Breakpoint(Arc<dyn JavaBreakpoint>),
    Expression(Arc<dyn JavaExpression>),
    WatchExpression(Arc<dyn JavaWatchExpression>),
    Monitor(MonitorRelation),
}

/// Rows of the thread monitor tree.
#[derive(Clone)]
pub enum MonitorRelation {
    /// A monitor held by the parent thread.
    Owned {
        monitor: Arc<dyn JavaValue>,
        in_deadlock: bool,
    },
    /// The monitor the parent thread is blocked on.
    Contended {
        monitor: Arc<dyn JavaValue>,
        in_deadlock: bool,
    },
    /// The thread holding the parent monitor.
    OwningThread {
        thread: Arc<dyn JavaThread>,
        in_deadlock: bool,
    },
    /// A thread blocked on the parent monitor.
    WaitingThread {
        thread: Arc<dyn JavaThread>,
        in_deadlock: bool,
    },
    /// The VM cannot report monitor information.
    NoMonitorInfo,
}

impl MonitorRelation {
    pub fn is_in_deadlock(&self) -> bool {
        match self {
            MonitorRelation::Owned { in_deadlock, .. }
            | MonitorRelation::Contended { in_deadlock, .. }
            | MonitorRelation::OwningThread { in_deadlock, .. }
            | MonitorRelation::WaitingThread { in_deadlock, .. } => *in_deadlock,
            MonitorRelation::NoMonitorInfo => false,
        }
    }
}

impl std::fmt::Debug for DebugElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            DebugElement::Target(_) => "Target",
            DebugElement::Thread(_) => "Thread",
            DebugElement::StackFrame(_) => "StackFrame",
            DebugElement::Variable(_) => "Variable",
            DebugElement::Value(_) => "Value",
            DebugElement::Breakpoint(_) => "Breakpoint",
            DebugElement::Expression(_) => "Expression",
            DebugElement::WatchExpression(_) => "WatchExpression",
            DebugElement::Monitor(_) => "Monitor",
        };
        f.debug_tuple("DebugElement").field(&kind).finish()
    }
}
