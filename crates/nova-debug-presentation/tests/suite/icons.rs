use std::sync::Arc;

use nova_debug_model::mock::{
    MockBreakpoint, MockExpression, MockField, MockStackFrame, MockTarget, MockThread, MockValue,
    MockVariable,
};
use nova_debug_model::{DebugElement, DebugFault, MonitorRelation, Visibility};
use nova_debug_presentation::{
    AdornmentFlags, BaseImage, DetailFormatterRegistry, ImageSize, ModelPresentation,
    NoEvaluationContext,
};

fn presentation() -> ModelPresentation {
    ModelPresentation::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    )
}

#[test]
fn suspended_thread_in_deadlock() {
    let mut thread = MockThread::new(1, 1, "main").suspended();
    thread.in_deadlock = true;
    thread.may_be_out_of_synch = true;
    let image = presentation()
        .image(&DebugElement::Thread(Arc::new(thread)))
        .unwrap();
    assert_eq!(image.base, BaseImage::ThreadSuspended);
    assert!(image.flags.contains(AdornmentFlags::IN_DEADLOCK));
    assert!(image.flags.contains(AdornmentFlags::MAY_BE_OUT_OF_SYNCH));
    assert!(!image.flags.contains(AdornmentFlags::OUT_OF_SYNCH));
}

#[test]
fn conditional_method_breakpoint_flags() {
    let mut breakpoint = MockBreakpoint::method("com.example.Foo", "run", None);
    breakpoint.installed = true;
    breakpoint.condition_enabled = true;
    breakpoint.exit = true;
    let image = presentation()
        .image(&DebugElement::Breakpoint(Arc::new(breakpoint)))
        .unwrap();
    assert_eq!(image.base, BaseImage::Breakpoint);
    assert_eq!(
        image.flags,
        AdornmentFlags::ENABLED
            | AdornmentFlags::INSTALLED
            | AdornmentFlags::CONDITIONAL
            | AdornmentFlags::ENTRY
            | AdornmentFlags::EXIT
    );
}

#[test]
fn breakpoint_icon_faults_keep_earlier_flags() {
    let breakpoint = MockBreakpoint::exception("java.io.IOException", true, false)
        .failing("is_uncaught", DebugFault::timeout("slow"));
    let image = presentation()
        .image(&DebugElement::Breakpoint(Arc::new(breakpoint)))
        .unwrap();
    assert_eq!(image.base, BaseImage::Exception);
    assert!(image.flags.contains(AdornmentFlags::CAUGHT));
    assert!(!image.flags.contains(AdornmentFlags::UNCAUGHT));

    let broken = MockBreakpoint::watchpoint("Foo", "x")
        .failing("is_access", DebugFault::stale("gone"));
    assert_eq!(
        presentation().image(&DebugElement::Breakpoint(Arc::new(broken))),
        None
    );
}

#[test]
fn run_to_line_breakpoints_have_no_icon() {
    let mut breakpoint = MockBreakpoint::line("Foo", 3);
    breakpoint.run_to_line = true;
    assert_eq!(
        presentation().image(&DebugElement::Breakpoint(Arc::new(breakpoint))),
        None
    );
}

#[test]
fn variables_use_visibility_and_modifiers() {
    let field = MockField {
        declaring_type: "com.example.Foo".to_string(),
        receiving_type_field_names: vec!["LIMIT".to_string()],
    };
    let mut variable = MockVariable::field("LIMIT", MockValue::int(8), Visibility::Public, field);
    variable.is_final = true;
    variable.is_static = true;
    let image = presentation()
        .image(&DebugElement::Variable(Arc::new(variable)))
        .unwrap();
    assert_eq!(image.base, BaseImage::Public);
    assert_eq!(image.flags, AdornmentFlags::FINAL | AdornmentFlags::STATIC);
    assert_eq!(image.size, ImageSize::Big);
}

#[test]
fn frames_targets_and_monitors() {
    let mut frame = MockStackFrame::new(1, "Foo", "run", 3);
    frame.synchronized = true;
    let image = presentation()
        .image(&DebugElement::StackFrame(Arc::new(frame)))
        .unwrap();
    assert_eq!(image.base, BaseImage::StackFrame);
    assert_eq!(image.flags, AdornmentFlags::SYNCHRONIZED);

    let mut target = MockTarget::new(1, "app");
    target.terminated = true;
    let image = presentation()
        .image(&DebugElement::Target(Arc::new(target)))
        .unwrap();
    assert_eq!(image.base, BaseImage::DebugTargetTerminated);

    let waiting = DebugElement::Monitor(MonitorRelation::WaitingThread {
        thread: Arc::new(MockThread::new(2, 1, "blocked")),
        in_deadlock: true,
    });
    let image = presentation().image(&waiting).unwrap();
    assert_eq!(image.base, BaseImage::ThreadRunning);
    assert_eq!(
        image.flags,
        AdornmentFlags::IN_CONTENTION_FOR_MONITOR | AdornmentFlags::IN_DEADLOCK
    );
}

#[test]
fn only_inspect_expressions_have_icons() {
    let mut expression = MockExpression::new("this", Some(MockValue::object("Foo", 1)));
    assert_eq!(
        presentation().image(&DebugElement::Expression(Arc::new(expression.clone()))),
        None
    );
    expression.inspect = true;
    let image = presentation()
        .image(&DebugElement::Expression(Arc::new(expression)))
        .unwrap();
    assert_eq!(image.base, BaseImage::InspectExpression);
}
