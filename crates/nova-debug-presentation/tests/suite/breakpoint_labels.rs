use std::sync::Arc;

use nova_debug_model::mock::{MockBreakpoint, MockValue};
use nova_debug_model::{DebugElement, DebugFault, SuspendPolicy};
use nova_debug_presentation::attributes::DISPLAY_QUALIFIED_NAMES;
use nova_debug_presentation::breakpoints::{
    append_hit_count, BREAKPOINT_DOES_NOT_EXIST, BREAKPOINT_LABEL_ERROR,
};
use nova_debug_presentation::{DetailFormatterRegistry, ModelPresentation, NoEvaluationContext};

fn presentation() -> ModelPresentation {
    ModelPresentation::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    )
}

fn label(presentation: &ModelPresentation, breakpoint: MockBreakpoint) -> String {
    presentation
        .text(&DebugElement::Breakpoint(Arc::new(breakpoint)))
        .unwrap_or_default()
}

#[test]
fn hit_count_then_suspend_policy_then_thread_filter() {
    let mut breakpoint = MockBreakpoint::method("com.example.Service", "handle", None);
    breakpoint.hit_count = 5;
    breakpoint.suspend_policy = SuspendPolicy::Vm;
    let text = label(&presentation(), breakpoint.clone());
    assert!(text.contains("[hit count: 5] Suspend VM"), "{text}");
    assert_eq!(text, "Service [hit count: 5] Suspend VM [entry] - handle");

    breakpoint.thread_filters = vec![7];
    assert_eq!(
        label(&presentation(), breakpoint),
        "Service [hit count: 5] Suspend VM [thread filtered] [entry] - handle"
    );
}

#[test]
fn line_breakpoint_with_every_decoration() {
    let mut breakpoint = MockBreakpoint::line("com.example.Service", 40);
    breakpoint.hit_count = 2;
    breakpoint.suspend_policy = SuspendPolicy::Vm;
    breakpoint.thread_filters = vec![1];
    breakpoint.condition = Some("count > 3".to_string());
    breakpoint.condition_enabled = true;
    breakpoint.instance_filters = vec![Arc::new(MockValue::object("com.example.Service", 9))];
    breakpoint.member_label = Some("handle(Request)".to_string());

    let mut presentation = presentation();
    presentation.set_attribute(DISPLAY_QUALIFIED_NAMES, Some(true.into()));
    assert_eq!(
        label(&presentation, breakpoint),
        "com.example.Service [line: 40] [hit count: 2] Suspend VM [thread filtered] \
         [conditional] [instance= (id=9)] - handle(Request)"
    );
}

#[test]
fn exception_breakpoints_with_instance_filters() {
    let mut breakpoint = MockBreakpoint::exception("java.lang.IllegalStateException", true, false);
    breakpoint.exclusion_filters = vec!["java.*".to_string()];
    breakpoint.instance_filters = vec![Arc::new(MockValue::object("com.example.Foo", 2))];
    assert_eq!(
        label(&presentation(), breakpoint),
        "caught: IllegalStateException [scoped] [instance= (id=2)]"
    );
}

#[test]
fn instance_filter_faults_are_contained() {
    let mut breakpoint = MockBreakpoint::line("com.example.Foo", 1);
    breakpoint.instance_filters = vec![
        Arc::new(
            MockValue::object("com.example.Foo", 2)
                .failing("value_string", DebugFault::stale("gc")),
        ),
        Arc::new(MockValue::object("com.example.Foo", 3)),
    ];
    let text = label(&presentation(), breakpoint);
    assert_ne!(text, BREAKPOINT_DOES_NOT_EXIST);
    assert_eq!(text, "Foo [line: 1] [instance= (id=3)]");

    let mut breakpoint = MockBreakpoint::line("com.example.Foo", 1);
    breakpoint.instance_filters = vec![Arc::new(
        MockValue::object("com.example.Foo", 2)
            .failing("value_string", DebugFault::timeout("slow")),
    )];
    assert_eq!(label(&presentation(), breakpoint), BREAKPOINT_LABEL_ERROR);
}

#[test]
fn decoration_helpers_propagate_faults() {
    let breakpoint = MockBreakpoint::line("Foo", 1)
        .failing("hit_count", DebugFault::timeout("slow"));
    let mut text = String::new();
    assert!(append_hit_count(&breakpoint, &mut text).is_err());
    assert!(text.is_empty());
}
