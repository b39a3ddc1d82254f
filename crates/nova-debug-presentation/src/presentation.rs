use std::sync::Arc;

use nova_debug_model::{
    DebugElement, DebugFault, JavaDebugTarget, JavaExpression, JavaStackFrame, JavaThread,
    JavaValue, JavaVariable, JavaWatchExpression, ModelResult, MonitorRelation, ValueKind,
    JAVA_STRATUM,
};

use crate::attributes::{AttributeStore, AttributeValue, RenderPolicy, ShowDetails};
use crate::breakpoints::breakpoint_text;
use crate::config::PresentationConfig;
use crate::detail::{DetailCoordinator, DetailFormatterRegistry, DetailListener};
use crate::eval_context::EvaluationContextProvider;
use crate::format::render_value;
use crate::images::{self, ImageDescriptor};
use crate::naming::qualify;
use crate::threads::thread_text;
use crate::tolerate;

pub const NOT_RESPONDING: &str = "<not responding>";
pub const UNKNOWN_VALUE: &str = "<unknown value>";
pub const GARBAGE_COLLECTED_OBJECT: &str = "<garbage collected object>";
pub const NO_MONITOR_INFORMATION: &str = "(No monitor information)";

const UNKNOWN_NAME: &str = "<unknown name>";
const UNKNOWN_TYPE: &str = "<unknown type>";
const UNKNOWN_DECLARING_TYPE: &str = "<unknown declaring type>";
const UNKNOWN_RECEIVING_TYPE: &str = "<unknown receiving type>";
const UNKNOWN_METHOD_NAME: &str = "<unknown method name>";
const UNKNOWN_ARGUMENTS: &str = "<unknown arguments>";

/// Text colour hint for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Deadlock,
}

/// Label and icon provider for Java debug elements.
///
/// Text and icon entry points never fail: faults raised by the live model
/// are turned into placeholders (`<not responding>`, `<unknown value>`, ...)
/// or a missing icon.
pub struct ModelPresentation {
    attributes: AttributeStore,
    details: DetailCoordinator,
}

impl ModelPresentation {
    pub fn new(
        formatters: Arc<DetailFormatterRegistry>,
        context: Arc<dyn EvaluationContextProvider>,
    ) -> Self {
        Self {
            attributes: AttributeStore::new(),
            details: DetailCoordinator::new(formatters, context),
        }
    }

    pub fn from_config(
        config: &PresentationConfig,
        formatters: Arc<DetailFormatterRegistry>,
        context: Arc<dyn EvaluationContextProvider>,
    ) -> Self {
        let mut presentation = Self::new(formatters, context);
        presentation.attributes.apply_policy(&config.policy);
        presentation.details = presentation.details.with_timeout(config.detail.timeout());
        presentation
    }

    pub fn set_attribute(&mut self, name: &str, value: Option<AttributeValue>) {
        self.attributes.set_attribute(name, value);
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn policy(&self) -> RenderPolicy {
        self.attributes.policy()
    }

    pub fn details(&self) -> &DetailCoordinator {
        &self.details
    }

    /// Label for `element`, or `None` when there is nothing to show (a value
    /// whose text is empty).
    pub fn text(&self, element: &DebugElement) -> Option<String> {
        let policy = self.policy();
        match self.base_text(element, &policy) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(
                    target: "nova.debug.presentation",
                    element = ?element,
                    error = %err,
                    "failed to compute label"
                );
                Some(NOT_RESPONDING.to_string())
            }
        }
    }

    pub fn image(&self, element: &DebugElement) -> Option<ImageDescriptor> {
        images::image(element)
    }

    pub fn foreground(&self, element: &DebugElement) -> Option<ColorRole> {
        let deadlock = match element {
            DebugElement::Monitor(relation) => relation.is_in_deadlock(),
            DebugElement::Thread(thread) => thread.is_in_deadlock(),
            _ => false,
        };
        deadlock.then_some(ColorRole::Deadlock)
    }

    /// See [`DetailCoordinator::compute_detail`].
    pub fn compute_detail(&self, value: Arc<dyn JavaValue>, listener: DetailListener) {
        self.details.compute_detail(value, listener);
    }

    /// Detail of the variable's value, waiting at most the configured timeout.
    pub fn variable_detail(&self, variable: &dyn JavaVariable) -> String {
        match variable.value() {
            Ok(value) => self
                .details
                .detail_blocking(value)
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
            Err(err) => {
                tracing::debug!(
                    target: "nova.debug.presentation",
                    error = %err,
                    "variable value unavailable for detail"
                );
                UNKNOWN_VALUE.to_string()
            }
        }
    }

    /// Drops every stored attribute.
    pub fn dispose(&mut self) {
        self.attributes.clear();
    }

    fn base_text(
        &self,
        element: &DebugElement,
        policy: &RenderPolicy,
    ) -> ModelResult<Option<String>> {
        let text = match element {
            DebugElement::Target(target) => target_label(target.as_ref())?,
            DebugElement::Thread(thread) => thread_label(thread.as_ref(), policy)?,
            DebugElement::StackFrame(frame) => frame_label(frame.as_ref(), policy)?,
            DebugElement::Variable(variable) => self.variable_text(variable.as_ref(), policy)?,
            DebugElement::Value(value) => {
                let text = render_value(value.as_ref(), policy)?;
                return Ok((!text.is_empty()).then_some(text));
            }
            DebugElement::Breakpoint(breakpoint) => breakpoint_text(breakpoint.as_ref(), policy),
            DebugElement::Expression(expression) => {
                self.expression_text(expression.as_ref(), policy)?
            }
            DebugElement::WatchExpression(expression) => {
                self.watch_expression_text(expression.as_ref(), policy)?
            }
            DebugElement::Monitor(relation) => monitor_text(relation, policy)?,
        };
        Ok(Some(text))
    }

    fn variable_text(
        &self,
        variable: &dyn JavaVariable,
        policy: &RenderPolicy,
    ) -> ModelResult<String> {
        // Some backends report names that already carry the declared type
        // (`int count`).
        let name = tolerate(variable.name())?;
        let typed_name = name.as_deref().is_some_and(|name| name.contains(' '));
        let name = match name {
            Some(name) if typed_name && !policy.show_variable_type_names => {
                name.rsplit(' ').next().unwrap_or_default().to_string()
            }
            Some(name) => name,
            None => UNKNOWN_NAME.to_string(),
        };

        let mut label = String::new();
        if policy.show_variable_type_names && !typed_name {
            let type_name = tolerate(variable.reference_type_name())?
                .map(|type_name| qualify(&type_name, policy.show_qualified_names))
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
            label.push_str(&type_name);
            label.push(' ');
        }
        label.push_str(&name);

        if variable.is_field() && is_duplicate_field(variable, &name)? {
            if let Some(declaring) = tolerate(variable.declaring_type_name())? {
                label.push_str(&format!(
                    " ({})",
                    qualify(&declaring, policy.show_qualified_names)
                ));
            }
        }

        let value_text = match tolerate(variable.value())? {
            Some(value) => self.value_text(value, policy)?,
            None => UNKNOWN_VALUE.to_string(),
        };
        if !value_text.is_empty() {
            label.push_str("= ");
            label.push_str(&value_text);
        }
        Ok(label)
    }

    fn expression_text<E: JavaExpression + ?Sized>(
        &self,
        expression: &E,
        policy: &RenderPolicy,
    ) -> ModelResult<String> {
        let mut label = format!("\"{}\"", expression.expression_text());
        let Some(value) = expression.value() else {
            return Ok(label);
        };

        let type_name = match value.reference_type_name() {
            Ok(type_name) => type_name,
            Err(DebugFault::StaleReference(_)) => return Ok(GARBAGE_COLLECTED_OBJECT.to_string()),
            Err(err) => return Err(err),
        };
        if policy.show_variable_type_names {
            label = format!("{} {label}", qualify(&type_name, policy.show_qualified_names));
        }

        // Expressions never show inline details.
        let value_text = tolerate(render_value(value.as_ref(), policy))?
            .unwrap_or_else(|| UNKNOWN_VALUE.to_string());
        if !value_text.is_empty() {
            label.push_str("= ");
            label.push_str(&value_text);
        }
        Ok(label)
    }

    fn watch_expression_text(
        &self,
        expression: &dyn JavaWatchExpression,
        policy: &RenderPolicy,
    ) -> ModelResult<String> {
        let mut label = self.expression_text(expression, policy)?;
        if !expression.is_enabled() {
            label.push_str(" (disabled)");
        }
        Ok(label)
    }

    /// Value part of variable labels: the detail string when
    /// details are shown inline, the rendered value otherwise.
    fn value_text(&self, value: Arc<dyn JavaValue>, policy: &RenderPolicy) -> ModelResult<String> {
        if self.inline_detail(value.as_ref(), policy) {
            return Ok(self
                .details
                .detail_blocking(value)
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string()));
        }
        Ok(tolerate(render_value(value.as_ref(), policy))?
            .unwrap_or_else(|| UNKNOWN_VALUE.to_string()))
    }

    fn inline_detail(&self, value: &dyn JavaValue, policy: &RenderPolicy) -> bool {
        match policy.show_details {
            ShowDetails::InlineAll => true,
            ShowDetails::InlineFormatters => {
                value.kind() != ValueKind::Primitive
                    && value
                        .reference_type_name()
                        .is_ok_and(|type_name| {
                            self.details.formatters().has_enabled_formatter(&type_name)
                        })
            }
            ShowDetails::DetailPane => false,
        }
    }
}

impl std::fmt::Debug for ModelPresentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPresentation")
            .field("attributes", &self.attributes)
            .field("details", &self.details)
            .finish()
    }
}

fn target_label(target: &dyn JavaDebugTarget) -> ModelResult<String> {
    let mut label = target.name()?;
    if target.is_suspended() {
        label.push_str(" (Suspended)");
    }
    if target.is_terminated() {
        return Ok(format!("<terminated>{label}"));
    }
    if target.is_disconnected() {
        return Ok(format!("<disconnected>{label}"));
    }
    label.push_str(synch_suffix(target.is_out_of_synch(), target.may_be_out_of_synch()));
    Ok(label)
}

fn thread_label(thread: &dyn JavaThread, policy: &RenderPolicy) -> ModelResult<String> {
    let mut label = thread_text(thread, policy)?;
    if thread.is_terminated() {
        return Ok(format!("<terminated>{label}"));
    }
    label.push_str(synch_suffix(thread.is_out_of_synch(), thread.may_be_out_of_synch()));
    Ok(label)
}

/// ` (out of synch)` wins over ` (may be out of synch)`; a failed check
/// counts as in synch.
fn synch_suffix(out_of_synch: ModelResult<bool>, may_be: ModelResult<bool>) -> &'static str {
    if out_of_synch.unwrap_or(false) {
        " (out of synch)"
    } else if may_be.unwrap_or(false) {
        " (may be out of synch)"
    } else {
        ""
    }
}

fn frame_label(frame: &dyn JavaStackFrame, policy: &RenderPolicy) -> ModelResult<String> {
    let qualified = policy.show_qualified_names;
    let declaring = tolerate(frame.declaring_type_name())?;

    if frame.is_obsolete()? {
        let declaring = declaring
            .map(|name| qualify(&name, qualified))
            .unwrap_or_else(|| UNKNOWN_DECLARING_TYPE.to_string());
        return Ok(format!("<obsolete method in {declaring}>"));
    }

    let mut label = String::new();
    let stratum = tolerate(frame.default_stratum())?;
    if stratum.as_deref().is_none_or(|stratum| stratum == JAVA_STRATUM) {
        let receiving = tolerate(frame.receiving_type_name())?;
        match &receiving {
            Some(receiving) => label.push_str(&qualify(receiving, qualified)),
            None => label.push_str(UNKNOWN_RECEIVING_TYPE),
        }
        match &declaring {
            Some(declaring) if receiving.as_ref() != Some(declaring) => {
                label.push('(');
                label.push_str(&qualify(declaring, qualified));
                label.push(')');
            }
            Some(_) => {}
            None => {
                label.push('(');
                label.push_str(UNKNOWN_DECLARING_TYPE);
                label.push(')');
            }
        }

        label.push('.');
        match tolerate(frame.method_name())? {
            Some(method) => label.push_str(&method),
            None => label.push_str(UNKNOWN_METHOD_NAME),
        }

        label.push('(');
        match tolerate(frame.argument_type_names())? {
            Some(arguments) => {
                let var_args = tolerate(frame.is_var_args())?.unwrap_or(false);
                let mut arguments: Vec<String> = arguments
                    .iter()
                    .map(|argument| qualify(argument, qualified))
                    .collect();
                if var_args {
                    if let Some(last) = arguments.last_mut() {
                        if let Some(base) = last.strip_suffix("[]") {
                            *last = format!("{base}...");
                        }
                    }
                }
                label.push_str(&arguments.join(", "));
            }
            None => label.push_str(UNKNOWN_ARGUMENTS),
        }
        label.push(')');
    } else if qualified {
        label.push_str(&frame.source_path()?);
    } else {
        label.push_str(&frame.source_name()?);
    }

    match tolerate(frame.line_number())? {
        Some(line) if line < 0 => {
            label.push_str(" line: not available");
            if tolerate(frame.is_native())?.unwrap_or(false) {
                label.push_str(" [native method]");
            }
        }
        Some(line) => label.push_str(&format!(" line: {line}")),
        None => label.push_str(" <unknown line number>"),
    }

    if !frame.were_locals_available() {
        label.push_str(" (local variables unavailable)");
    }
    if tolerate(frame.is_out_of_synch())?.unwrap_or(false) {
        label.push_str(" (out of synch)");
    }
    Ok(label)
}

fn is_duplicate_field(variable: &dyn JavaVariable, name: &str) -> ModelResult<bool> {
    let names = tolerate(variable.receiving_type_field_names())?.unwrap_or_default();
    Ok(names.iter().filter(|field| field.as_str() == name).count() > 1)
}

fn monitor_text(relation: &MonitorRelation, policy: &RenderPolicy) -> ModelResult<String> {
    Ok(match relation {
        MonitorRelation::Owned { monitor, .. } => {
            format!("owns: {}", render_value(monitor.as_ref(), policy)?)
        }
        MonitorRelation::Contended { monitor, .. } => {
            format!("waiting for: {}", render_value(monitor.as_ref(), policy)?)
        }
        MonitorRelation::OwningThread { thread, .. } => {
            format!("owned by: {}", thread_text(thread.as_ref(), policy)?)
        }
        MonitorRelation::WaitingThread { thread, .. } => {
            format!("waited by: {}", thread_text(thread.as_ref(), policy)?)
        }
        MonitorRelation::NoMonitorInfo => NO_MONITOR_INFORMATION.to_string(),
    })
}
