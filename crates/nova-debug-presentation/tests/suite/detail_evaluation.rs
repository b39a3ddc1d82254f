use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use nova_debug_model::mock::{MockTarget, MockThread, MockValue, MockVariable};
use nova_debug_model::{DebugElement, JavaThread, JavaValue, ModelResult};
use nova_debug_presentation::detail::{SnippetFormatter, NO_SUSPENDED_THREADS};
use nova_debug_presentation::{
    ActiveEvaluationContext, DetailCoordinator, DetailFormatter, DetailFormatterRegistry,
    ModelPresentation, NoEvaluationContext, PresentationConfig, UNKNOWN_VALUE,
};

/// Formatter that takes longer than any test timeout.
struct SlowFormatter(Duration);

impl DetailFormatter for SlowFormatter {
    fn is_enabled(&self) -> bool {
        true
    }

    fn evaluate(&self, _value: &dyn JavaValue, _thread: &dyn JavaThread) -> ModelResult<String> {
        std::thread::sleep(self.0);
        Ok("finally".to_string())
    }
}

fn target_with(threads: Vec<MockThread>) -> Arc<MockTarget> {
    let mut target = MockTarget::new(1, "app");
    for thread in threads {
        target = target.with_thread(Arc::new(thread));
    }
    Arc::new(target)
}

fn value_in(target: &Arc<MockTarget>, type_name: &str, id: u64) -> Arc<dyn JavaValue> {
    Arc::new(MockValue::object(type_name, id).with_target(target.clone()))
}

#[test]
fn no_suspended_threads_reaches_the_listener_synchronously() {
    let target = target_with(vec![MockThread::new(1, 1, "main")]);
    let coordinator = DetailCoordinator::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    );

    let (tx, rx) = mpsc::channel();
    coordinator.compute_detail(
        value_in(&target, "com.example.Foo", 1),
        Box::new(move |detail| {
            let _ = tx.send(detail);
        }),
    );
    assert_eq!(rx.try_recv().ok().as_deref(), Some(NO_SUSPENDED_THREADS));
}

#[test]
fn first_suspended_thread_evaluates_to_string() {
    let target = target_with(vec![
        MockThread::new(1, 1, "main"),
        MockThread::new(2, 1, "worker").suspended(),
    ]);
    let coordinator = DetailCoordinator::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    );

    let detail = coordinator.detail_blocking(value_in(&target, "com.example.Foo", 5));
    assert_eq!(detail.as_deref(), Some("(id=5)"));
    assert_eq!(target.threads[1].to_string_calls(), 1);
    assert_eq!(target.threads[0].to_string_calls(), 0);
}

#[test]
fn active_context_thread_is_preferred() {
    let target = target_with(vec![
        MockThread::new(1, 1, "main").suspended(),
        MockThread::new(2, 1, "worker").suspended(),
    ]);
    let context = Arc::new(ActiveEvaluationContext::new());
    context.set(target.threads[1].clone());
    let coordinator =
        DetailCoordinator::new(Arc::new(DetailFormatterRegistry::new()), context.clone());

    let selected = coordinator.evaluation_thread(target.as_ref());
    assert_eq!(selected.map(|thread| thread.id()), Some(2));

    // A context thread from another target is ignored.
    context.set(Arc::new(MockThread::new(9, 2, "elsewhere").suspended()));
    let selected = coordinator.evaluation_thread(target.as_ref());
    assert_eq!(selected.map(|thread| thread.id()), Some(1));
}

#[test]
fn snippet_formatters_are_used_for_their_type() {
    let thread = MockThread::new(1, 1, "main")
        .suspended()
        .with_snippet("return size();", Arc::new(MockValue::string("3 entries")));
    let target = target_with(vec![thread]);
    let formatters = Arc::new(DetailFormatterRegistry::new());
    formatters.register(
        "java.util.HashMap",
        Arc::new(SnippetFormatter::new("return size();")),
    );
    let coordinator = DetailCoordinator::new(formatters, Arc::new(NoEvaluationContext));

    assert_eq!(
        coordinator
            .detail_blocking(value_in(&target, "java.util.HashMap", 4))
            .as_deref(),
        Some("3 entries")
    );
}

#[test]
fn timed_out_variable_detail_is_unknown_value() {
    let target = target_with(vec![MockThread::new(1, 1, "main").suspended()]);
    let formatters = Arc::new(DetailFormatterRegistry::new());
    formatters.register(
        "com.example.Slow",
        Arc::new(SlowFormatter(Duration::from_millis(500))),
    );
    let config = PresentationConfig::from_toml_str(
        r#"
        [policy]
        show_details = "inline_formatters"

        [detail]
        timeout_ms = 20
        "#,
    )
    .unwrap();
    let presentation =
        ModelPresentation::from_config(&config, formatters, Arc::new(NoEvaluationContext));

    let variable = MockVariable::local(
        "slow",
        MockValue::object("com.example.Slow", 8).with_target(target.clone()),
    );
    assert_eq!(presentation.variable_detail(&variable), UNKNOWN_VALUE);
    assert_eq!(
        presentation
            .text(&DebugElement::Variable(Arc::new(variable)))
            .as_deref(),
        Some("slow= <unknown value>")
    );
}

#[test]
fn inline_formatters_only_inlines_types_with_formatters() {
    let thread = MockThread::new(1, 1, "main")
        .suspended()
        .with_snippet("return name;", Arc::new(MockValue::string("alice")));
    let target = target_with(vec![thread]);
    let formatters = Arc::new(DetailFormatterRegistry::new());
    formatters.register("com.example.User", Arc::new(SnippetFormatter::new("return name;")));
    let config =
        PresentationConfig::from_toml_str("[policy]\nshow_details = \"inline_formatters\"\n")
            .unwrap();
    let presentation =
        ModelPresentation::from_config(&config, formatters, Arc::new(NoEvaluationContext));

    let user = MockVariable::local(
        "user",
        MockValue::object("com.example.User", 2).with_target(target.clone()),
    );
    let other = MockVariable::local(
        "other",
        MockValue::object("com.example.Other", 3).with_target(target.clone()),
    );
    assert_eq!(
        presentation
            .text(&DebugElement::Variable(Arc::new(user)))
            .as_deref(),
        Some("user= alice")
    );
    assert_eq!(
        presentation
            .text(&DebugElement::Variable(Arc::new(other)))
            .as_deref(),
        Some("other= Other (id=3)")
    );
}

#[test]
fn late_results_after_timeout_are_dropped() {
    let target = target_with(vec![MockThread::new(1, 1, "main").suspended()]);
    let formatters = Arc::new(DetailFormatterRegistry::new());
    formatters.register(
        "com.example.Slow",
        Arc::new(SlowFormatter(Duration::from_millis(100))),
    );
    let coordinator = DetailCoordinator::new(formatters, Arc::new(NoEvaluationContext))
        .with_timeout(Duration::from_millis(10));

    let request = coordinator.request(value_in(&target, "com.example.Slow", 1));
    assert_eq!(request.wait(coordinator.timeout()), None);

    // The worker still completes the abandoned request.
    assert_eq!(
        request.wait(Duration::from_secs(5)).as_deref(),
        Some("finally")
    );
}

#[tokio::test]
async fn async_detail_resolves_on_the_runtime() {
    let target = target_with(vec![MockThread::new(1, 1, "main").suspended()]);
    let coordinator = DetailCoordinator::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    );
    assert_eq!(
        coordinator
            .detail_async(value_in(&target, "com.example.Foo", 12))
            .await
            .as_deref(),
        Some("(id=12)")
    );
}

#[tokio::test]
async fn async_detail_times_out() {
    let target = target_with(vec![MockThread::new(1, 1, "main").suspended()]);
    let formatters = Arc::new(DetailFormatterRegistry::new());
    formatters.register(
        "com.example.Slow",
        Arc::new(SlowFormatter(Duration::from_millis(300))),
    );
    let coordinator = DetailCoordinator::new(formatters, Arc::new(NoEvaluationContext))
        .with_timeout(Duration::from_millis(20));
    assert_eq!(
        coordinator
            .detail_async(value_in(&target, "com.example.Slow", 1))
            .await,
        None
    );
}
