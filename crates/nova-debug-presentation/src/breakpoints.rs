//! Breakpoint labels.
//!
//! Every kind starts with a base clause (owning type or source, plus its
//! anchor) followed by decorations that always appear in the same order:
//! line, hit count, suspend policy, thread filter, then kind-specific ones.

use nova_debug_model::{BreakpointKind, DebugFault, JavaBreakpoint, ModelResult, SuspendPolicy};

use crate::attributes::RenderPolicy;
use crate::naming::{marker_type_name, method_signature_label, qualify};

pub const BREAKPOINT_DOES_NOT_EXIST: &str = "Breakpoint does not exist";
pub const BREAKPOINT_LABEL_ERROR: &str = "<error retrieving breakpoint label>";

/// Label for `breakpoint`. Never fails.
pub fn breakpoint_text(breakpoint: &dyn JavaBreakpoint, policy: &RenderPolicy) -> String {
    match describe_breakpoint(breakpoint, policy) {
        Ok(label) => label,
        Err(err) if !breakpoint.marker_exists() || matches!(err, DebugFault::StaleReference(_)) => {
            BREAKPOINT_DOES_NOT_EXIST.to_string()
        }
        Err(err) => {
            tracing::warn!(
                target: "nova.debug.presentation",
                kind = ?breakpoint.kind(),
                error = %err,
                "failed to build breakpoint label"
            );
            BREAKPOINT_LABEL_ERROR.to_string()
        }
    }
}

/// Fallible form of [`breakpoint_text`].
pub fn describe_breakpoint(
    breakpoint: &dyn JavaBreakpoint,
    policy: &RenderPolicy,
) -> ModelResult<String> {
    let qualified = policy.show_qualified_names;
    let mut label = String::new();
    match breakpoint.kind() {
        BreakpointKind::Exception => return exception_text(breakpoint, qualified),
        BreakpointKind::Watchpoint => {
            label.push_str(&qualify(&breakpoint.type_name()?, qualified));
            append_common(breakpoint, &mut label)?;
            let access = breakpoint.is_access()?;
            let modification = breakpoint.is_modification()?;
            label.push_str(match (access, modification) {
                (true, true) => " [access and modification]",
                (true, false) => " [access]",
                (false, true) => " [modification]",
                (false, false) => "",
            });
            label.push_str(" - ");
            match breakpoint.member_label()? {
                Some(member) => label.push_str(&member),
                None => label.push_str(&breakpoint.field_name()?),
            }
        }
        BreakpointKind::Method => {
            label.push_str(&qualify(&breakpoint.type_name()?, qualified));
            append_common(breakpoint, &mut label)?;
            let entry = breakpoint.is_entry()?;
            let exit = breakpoint.is_exit()?;
            label.push_str(match (entry, exit) {
                (true, true) => " [entry and exit]",
                (true, false) => " [entry]",
                (false, true) => " [exit]",
                (false, false) => "",
            });
            append_conditional(breakpoint, &mut label)?;
            if let Some(member) = breakpoint.member_label()? {
                label.push_str(" - ");
                label.push_str(&member);
            } else {
                let name = breakpoint.method_name()?;
                match (breakpoint.method_signature()?, name) {
                    (Some(signature), name) => {
                        label.push_str(" - ");
                        label.push_str(&method_signature_label(
                            name.as_deref().unwrap_or_default(),
                            &signature,
                        ));
                    }
                    (None, Some(name)) => {
                        label.push_str(" - ");
                        label.push_str(&name);
                    }
                    (None, None) => {}
                }
            }
        }
        BreakpointKind::Pattern => {
            label.push_str(&breakpoint.resource_name()?.unwrap_or_default());
            append_line_number(breakpoint, &mut label)?;
            append_common(breakpoint, &mut label)?;
            append_member(breakpoint, &mut label)?;
        }
        BreakpointKind::TargetPattern => {
            label.push_str(&breakpoint.source_name()?.unwrap_or_default());
            append_line_number(breakpoint, &mut label)?;
            append_common(breakpoint, &mut label)?;
            append_member(breakpoint, &mut label)?;
        }
        BreakpointKind::StratumLine => {
            let source = match breakpoint.source_name()? {
                Some(source) => source,
                None => breakpoint.resource_name()?.unwrap_or_default(),
            };
            label.push_str(&source);
            append_line_number(breakpoint, &mut label)?;
            append_common(breakpoint, &mut label)?;
            append_member(breakpoint, &mut label)?;
        }
        BreakpointKind::Line | BreakpointKind::MethodEntry => {
            label.push_str(&qualify(&breakpoint.type_name()?, qualified));
            append_line_number(breakpoint, &mut label)?;
            append_common(breakpoint, &mut label)?;
            append_conditional(breakpoint, &mut label)?;
            append_instance_filters(breakpoint, &mut label)?;
            append_member(breakpoint, &mut label)?;
        }
        BreakpointKind::ClassPrepare => {
            label.push_str(&qualify(&breakpoint.type_name()?, qualified));
            append_hit_count(breakpoint, &mut label)?;
            append_suspend_policy(breakpoint, &mut label)?;
        }
    }
    Ok(label)
}

fn exception_text(breakpoint: &dyn JavaBreakpoint, qualified: bool) -> ModelResult<String> {
    let mut label = qualify(&breakpoint.type_name()?, qualified);
    append_common(breakpoint, &mut label)?;
    if !breakpoint.exclusion_filters()?.is_empty() || !breakpoint.inclusion_filters()?.is_empty() {
        label.push_str(" [scoped]");
    }
    append_instance_filters(breakpoint, &mut label)?;

    let state = match (breakpoint.is_caught()?, breakpoint.is_uncaught()?) {
        (true, true) => Some("caught and uncaught"),
        (true, false) => Some("caught"),
        (false, true) => Some("uncaught"),
        (false, false) => None,
    };
    Ok(match state {
        Some(state) => format!("{state}: {label}"),
        None => label,
    })
}

/// Hit count, suspend policy and thread filter, in that order.
fn append_common(breakpoint: &dyn JavaBreakpoint, label: &mut String) -> ModelResult<()> {
    append_hit_count(breakpoint, label)?;
    append_suspend_policy(breakpoint, label)?;
    append_thread_filter(breakpoint, label)
}

fn append_line_number(breakpoint: &dyn JavaBreakpoint, label: &mut String) -> ModelResult<()> {
    let line = breakpoint.line_number()?;
    if line > 0 {
        label.push_str(&format!(" [line: {line}]"));
    }
    Ok(())
}

pub fn append_hit_count(breakpoint: &dyn JavaBreakpoint, label: &mut String) -> ModelResult<()> {
    let hit_count = breakpoint.hit_count()?;
    if hit_count > 0 {
        label.push_str(&format!(" [hit count: {hit_count}]"));
    }
    Ok(())
}

pub fn append_suspend_policy(
    breakpoint: &dyn JavaBreakpoint,
    label: &mut String,
) -> ModelResult<()> {
    if breakpoint.suspend_policy()? == SuspendPolicy::Vm {
        label.push_str(" Suspend VM");
    }
    Ok(())
}

pub fn append_thread_filter(
    breakpoint: &dyn JavaBreakpoint,
    label: &mut String,
) -> ModelResult<()> {
    if !breakpoint.thread_filters()?.is_empty() {
        label.push_str(" [thread filtered]");
    }
    Ok(())
}

pub fn append_conditional(breakpoint: &dyn JavaBreakpoint, label: &mut String) -> ModelResult<()> {
    if breakpoint.is_condition_enabled()?
        && breakpoint
            .condition()?
            .is_some_and(|condition| !condition.is_empty())
    {
        label.push_str(" [conditional]");
    }
    Ok(())
}

/// Appends ` [instance= TEXT]` per filter object. Filter objects that have
/// been collected are left out; the breakpoint itself is still live.
pub fn append_instance_filters(
    breakpoint: &dyn JavaBreakpoint,
    label: &mut String,
) -> ModelResult<()> {
    for instance in breakpoint.instance_filters()? {
        match instance.value_string() {
            Ok(text) => label.push_str(&format!(" [instance= {text}]")),
            Err(DebugFault::StaleReference(_)) => {
                tracing::debug!(
                    target: "nova.debug.presentation",
                    "skipping collected instance filter"
                );
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn append_member(breakpoint: &dyn JavaBreakpoint, label: &mut String) -> ModelResult<()> {
    if let Some(member) = breakpoint.member_label()? {
        label.push_str(" - ");
        label.push_str(&member);
    }
    Ok(())
}

/// Type name used when narrating a thread suspended at `breakpoint`: the
/// file name for pattern breakpoints, the owning type otherwise.
pub fn breakpoint_marker_type_name(
    breakpoint: &dyn JavaBreakpoint,
    qualified: bool,
) -> ModelResult<String> {
    let name = if breakpoint.kind() == BreakpointKind::Pattern {
        breakpoint.resource_name()?.unwrap_or_default()
    } else {
        breakpoint.type_name()?
    };
    Ok(marker_type_name(&name, qualified))
}
