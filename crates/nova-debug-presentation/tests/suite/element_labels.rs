use std::sync::Arc;

use nova_debug_model::mock::{MockExpression, MockField, MockThread, MockValue, MockVariable};
use nova_debug_model::{DebugElement, DebugFault, MonitorRelation, Visibility};
use nova_debug_presentation::attributes::{
    DISPLAY_QUALIFIED_NAMES, DISPLAY_VARIABLE_TYPE_NAMES, SHOW_CHAR_VALUES, SHOW_DETAILS,
    SHOW_HEX_VALUES,
};
use nova_debug_presentation::naming::simplify_type_name;
use nova_debug_presentation::{
    ColorRole, DetailFormatterRegistry, ModelPresentation, NoEvaluationContext,
    GARBAGE_COLLECTED_OBJECT, NO_MONITOR_INFORMATION,
};

fn presentation() -> ModelPresentation {
    ModelPresentation::new(
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    )
}

fn value(value: MockValue) -> DebugElement {
    DebugElement::Value(Arc::new(value))
}

#[test]
fn generic_names_are_simplified() {
    assert_eq!(simplify_type_name("java.util.List<java.lang.String>"), "List<String>");
    let value = MockValue::object("java.util.List<java.lang.String>", 3);
    assert_eq!(
        presentation().text(&DebugElement::Value(Arc::new(value))).as_deref(),
        Some("List<String> (id=3)")
    );
}

#[test]
fn qualified_array_values_show_their_length() {
    let mut presentation = presentation();
    presentation.set_attribute(DISPLAY_QUALIFIED_NAMES, Some(true.into()));
    let text = presentation
        .text(&value(MockValue::array("int[]", "[I", 3, 21)))
        .unwrap_or_default();
    assert!(text.starts_with("int[3]"), "{text}");
}

#[test]
fn annotation_attributes_apply_to_values() {
    let mut presentation = presentation();
    presentation.set_attribute(SHOW_HEX_VALUES, Some(true.into()));
    presentation.set_attribute(SHOW_CHAR_VALUES, Some(true.into()));
    assert_eq!(
        presentation.text(&value(MockValue::int(65))).as_deref(),
        Some("65 [0x41] [A]")
    );
    assert_eq!(
        presentation.text(&value(MockValue::char('\n'))).as_deref(),
        Some("\n [\\u000a]")
    );

    // Non-boolean values under a flag name read as off.
    presentation.set_attribute(SHOW_HEX_VALUES, Some("yes".into()));
    assert_eq!(
        presentation.text(&value(MockValue::int(65))).as_deref(),
        Some("65 [A]")
    );

    presentation.set_attribute("org.example.UNKNOWN", Some(true.into()));
    assert_eq!(
        presentation.text(&value(MockValue::int(65))).as_deref(),
        Some("65 [A]")
    );
}

#[test]
fn duplicate_fields_name_their_declaring_type() {
    let field = MockField {
        declaring_type: "com.example.Base".to_string(),
        receiving_type_field_names: vec!["id".to_string(), "name".to_string(), "id".to_string()],
    };
    let variable = MockVariable::field("id", MockValue::int(4), Visibility::Private, field);
    assert_eq!(
        presentation()
            .text(&DebugElement::Variable(Arc::new(variable)))
            .as_deref(),
        Some("id (Base)= 4")
    );
}

#[test]
fn variable_placeholders() {
    let variable = MockVariable::local("count", MockValue::int(1))
        .failing("name", DebugFault::stale("frame popped"))
        .failing("value", DebugFault::timeout("slow"));
    assert_eq!(
        presentation()
            .text(&DebugElement::Variable(Arc::new(variable)))
            .as_deref(),
        Some("<unknown name>= <unknown value>")
    );

    let mut presentation = presentation();
    presentation.set_attribute(DISPLAY_VARIABLE_TYPE_NAMES, Some(true.into()));
    let variable = MockVariable::local("count", MockValue::int(1))
        .failing("reference_type_name", DebugFault::timeout("slow"));
    assert_eq!(
        presentation
            .text(&DebugElement::Variable(Arc::new(variable)))
            .as_deref(),
        Some("<unknown type> count= 1")
    );
}

#[test]
fn expressions_quote_their_text() {
    let expression = MockExpression::new("list.size()", Some(MockValue::int(2)));
    assert_eq!(
        presentation()
            .text(&DebugElement::Expression(Arc::new(expression.clone())))
            .as_deref(),
        Some("\"list.size()\"= 2")
    );

    let mut disabled = expression;
    disabled.enabled = false;
    assert_eq!(
        presentation()
            .text(&DebugElement::WatchExpression(Arc::new(disabled)))
            .as_deref(),
        Some("\"list.size()\"= 2 (disabled)")
    );

    let pending = MockExpression::new("a + b", None);
    assert_eq!(
        presentation()
            .text(&DebugElement::Expression(Arc::new(pending)))
            .as_deref(),
        Some("\"a + b\"")
    );
}

#[test]
fn expressions_ignore_inline_details() {
    let mut presentation = presentation();
    presentation.set_attribute(SHOW_DETAILS, Some("INLINE_ALL".into()));
    let expression = MockExpression::new("user", Some(MockValue::object("com.example.User", 7)));

    assert_eq!(
        presentation
            .text(&DebugElement::Expression(Arc::new(expression.clone())))
            .as_deref(),
        Some("\"user\"= User (id=7)")
    );
    assert_eq!(
        presentation
            .text(&DebugElement::WatchExpression(Arc::new(expression)))
            .as_deref(),
        Some("\"user\"= User (id=7)")
    );
}

#[test]
fn collected_expression_values() {
    let collected = MockExpression::new(
        "cache",
        Some(
            MockValue::object("com.example.Cache", 4)
                .failing("reference_type_name", DebugFault::stale("collected")),
        ),
    );
    assert_eq!(
        presentation()
            .text(&DebugElement::Expression(Arc::new(collected)))
            .as_deref(),
        Some(GARBAGE_COLLECTED_OBJECT)
    );
}

#[test]
fn monitor_rows() {
    let lock = Arc::new(MockValue::object("java.lang.Object", 17));
    let owner = Arc::new(MockThread::new(4, 1, "holder").suspended());
    let presentation = presentation();

    let owned = DebugElement::Monitor(MonitorRelation::Owned {
        monitor: lock.clone(),
        in_deadlock: false,
    });
    assert_eq!(presentation.text(&owned).as_deref(), Some("owns: Object (id=17)"));
    assert_eq!(presentation.foreground(&owned), None);

    let contended = DebugElement::Monitor(MonitorRelation::Contended {
        monitor: lock,
        in_deadlock: true,
    });
    assert_eq!(
        presentation.text(&contended).as_deref(),
        Some("waiting for: Object (id=17)")
    );
    assert_eq!(presentation.foreground(&contended), Some(ColorRole::Deadlock));

    let owning = DebugElement::Monitor(MonitorRelation::OwningThread {
        thread: owner.clone(),
        in_deadlock: true,
    });
    assert_eq!(
        presentation.text(&owning).as_deref(),
        Some("owned by: Thread [holder] (Suspended)")
    );
    assert_eq!(presentation.foreground(&owning), Some(ColorRole::Deadlock));

    let waiting = DebugElement::Monitor(MonitorRelation::WaitingThread {
        thread: owner,
        in_deadlock: false,
    });
    assert_eq!(
        presentation.text(&waiting).as_deref(),
        Some("waited by: Thread [holder] (Suspended)")
    );

    assert_eq!(
        presentation
            .text(&DebugElement::Monitor(MonitorRelation::NoMonitorInfo))
            .as_deref(),
        Some(NO_MONITOR_INFORMATION)
    );
}

#[test]
fn deadlocked_threads_are_highlighted() {
    let mut thread = MockThread::new(1, 1, "main").suspended();
    thread.in_deadlock = true;
    assert_eq!(
        presentation().foreground(&DebugElement::Thread(Arc::new(thread))),
        Some(ColorRole::Deadlock)
    );
}
