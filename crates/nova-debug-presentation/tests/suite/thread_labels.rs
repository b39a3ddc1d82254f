use std::sync::Arc;

use nova_debug_model::mock::{MockBreakpoint, MockStackFrame, MockThread};
use nova_debug_model::{DebugElement, ProblemMarker};
use nova_debug_presentation::attributes::DISPLAY_QUALIFIED_NAMES;
use nova_debug_presentation::{DetailFormatterRegistry, ModelPresentation, NoEvaluationContext};

fn presentation() -> ModelPresentation {
    ModelPresentation::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    )
}

fn text(thread: MockThread) -> Option<String> {
    presentation().text(&DebugElement::Thread(Arc::new(thread)))
}

#[test]
fn problem_breakpoint_second_in_list_is_selected() {
    let mut problem = MockBreakpoint::line("com.example.Broken", 14);
    problem.problem = true;
    let mut frame = MockStackFrame::new(1, "com.example.Broken", "run", 14);
    frame.problem = Some(ProblemMarker {
        message: Some("Unresolved compilation problem".to_string()),
    });

    let thread = MockThread::new(1, 1, "main")
        .suspended()
        .with_breakpoint(Arc::new(MockBreakpoint::line("com.example.Other", 3)))
        .with_breakpoint(Arc::new(problem))
        .with_top_frame(Arc::new(frame));

    assert_eq!(
        text(thread).as_deref(),
        Some("Thread [main] (Suspended (Unresolved compilation problem))")
    );
}

#[test]
fn first_breakpoint_wins_without_problems() {
    let thread = MockThread::new(1, 1, "main")
        .suspended()
        .with_breakpoint(Arc::new(MockBreakpoint::line("com.example.First", 3)))
        .with_breakpoint(Arc::new(MockBreakpoint::line("com.example.Second", 8)));
    assert_eq!(
        text(thread).as_deref(),
        Some("Thread [main] (Suspended (breakpoint at line 3 in First))")
    );
}

#[test]
fn system_threads_use_their_own_template() {
    let mut thread = MockThread::new(2, 1, "Finalizer").system();
    thread.evaluating = true;
    assert_eq!(
        text(thread).as_deref(),
        Some("System Thread [Finalizer] (Evaluating)")
    );

    let thread = MockThread::new(3, 1, "Reference Handler").system().suspended();
    assert_eq!(
        text(thread).as_deref(),
        Some("System Thread [Reference Handler] (Suspended)")
    );
}

#[test]
fn pattern_breakpoints_narrate_the_file() {
    let thread = MockThread::new(1, 1, "http-nio-1")
        .suspended()
        .with_breakpoint(Arc::new(MockBreakpoint::pattern("index.jsp", 22)));
    let mut presentation = presentation();
    presentation.set_attribute(DISPLAY_QUALIFIED_NAMES, Some(true.into()));
    assert_eq!(
        presentation
            .text(&DebugElement::Thread(Arc::new(thread)))
            .as_deref(),
        Some("Thread [http-nio-1] (Suspended (breakpoint at line 22 in index.jsp))")
    );
}
