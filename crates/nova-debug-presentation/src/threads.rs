//! Thread labels: `Thread [name] (state)`.

use std::sync::Arc;

use nova_debug_model::{BreakpointKind, JavaBreakpoint, JavaThread, ModelResult};

use crate::attributes::RenderPolicy;
use crate::breakpoints::breakpoint_marker_type_name;
use crate::naming::{qualify, simple_name};

const COMPILATION_ERROR: &str = "Compilation error";

/// Label for `thread` without the session decorations (synch state,
/// `<terminated>`), which [`crate::ModelPresentation`] adds on top.
pub fn thread_text(thread: &dyn JavaThread, policy: &RenderPolicy) -> ModelResult<String> {
    let name = thread.name()?;
    let prefix = if thread.is_system_thread()? {
        "System Thread"
    } else {
        "Thread"
    };
    let label = |state: &str| format!("{prefix} [{name}] ({state})");

    if thread.is_terminated() {
        return Ok(label("Terminated"));
    }
    if thread.is_stepping() {
        return Ok(label("Stepping"));
    }
    if thread.is_performing_evaluation() {
        return Ok(label("Evaluating"));
    }
    if !thread.is_suspended() || thread.is_suspended_quiet() {
        return Ok(label("Running"));
    }

    if let Some(breakpoint) = suspending_breakpoint(&thread.breakpoints()) {
        if let Some(state) = breakpoint_state(thread, breakpoint.as_ref(), policy)? {
            return Ok(match state {
                SuspendState::Narrated(state) => label(&state),
                SuspendState::ClassLoad(type_name) => {
                    format!("{prefix} [{name}] (Class load: {type_name})")
                }
            });
        }
    }

    Ok(label("Suspended"))
}

/// The breakpoint a suspended thread is narrated against: the first one
/// reported, unless a later one stops on a compilation problem.
pub fn suspending_breakpoint(
    breakpoints: &[Arc<dyn JavaBreakpoint>],
) -> Option<Arc<dyn JavaBreakpoint>> {
    breakpoints
        .iter()
        .find(|breakpoint| breakpoint.is_problem())
        .or_else(|| breakpoints.first())
        .cloned()
}

enum SuspendState {
    Narrated(String),
    ClassLoad(String),
}

fn breakpoint_state(
    thread: &dyn JavaThread,
    breakpoint: &dyn JavaBreakpoint,
    policy: &RenderPolicy,
) -> ModelResult<Option<SuspendState>> {
    let qualified = policy.show_qualified_names;

    if breakpoint.is_problem() {
        let problem = match thread.top_frame()? {
            Some(frame) => frame.problem()?,
            None => None,
        };
        if let Some(problem) = problem {
            let message = problem
                .message
                .unwrap_or_else(|| COMPILATION_ERROR.to_string());
            return Ok(Some(SuspendState::Narrated(format!("Suspended ({message})"))));
        }
    }

    let state = match breakpoint.kind() {
        BreakpointKind::Exception => {
            let exception = match breakpoint.exception_type_name()? {
                Some(exception) => exception,
                None => breakpoint.type_name()?,
            };
            let exception = if qualified {
                exception
            } else {
                simple_name(&exception).to_string()
            };
            SuspendState::Narrated(format!("Suspended (exception {exception})"))
        }
        BreakpointKind::Watchpoint => {
            let field = breakpoint.field_name()?;
            let type_name = breakpoint_marker_type_name(breakpoint, qualified)?;
            let action = if breakpoint.is_access_suspend(thread.target_id())? {
                "access"
            } else {
                "modification"
            };
            SuspendState::Narrated(format!(
                "Suspended ({action} of field {field} in {type_name})"
            ))
        }
        BreakpointKind::Method => {
            let method = breakpoint.method_name()?.unwrap_or_default();
            let type_name = breakpoint_marker_type_name(breakpoint, qualified)?;
            let narration = if breakpoint.is_entry_suspend(thread.target_id())? {
                "entry into"
            } else {
                "exit of"
            };
            SuspendState::Narrated(format!(
                "Suspended ({narration} method {method} in {type_name})"
            ))
        }
        BreakpointKind::ClassPrepare => {
            SuspendState::ClassLoad(qualify(&breakpoint.type_name()?, qualified))
        }
        kind if kind.is_line_based() => {
            let line = breakpoint.line_number()?;
            if line <= -1 {
                return Ok(None);
            }
            let type_name = breakpoint_marker_type_name(breakpoint, qualified)?;
            let narration = if breakpoint.is_run_to_line() {
                "run to line"
            } else {
                "breakpoint at line"
            };
            SuspendState::Narrated(format!("Suspended ({narration} {line} in {type_name})"))
        }
        _ => return Ok(None),
    };
    Ok(Some(state))
}
