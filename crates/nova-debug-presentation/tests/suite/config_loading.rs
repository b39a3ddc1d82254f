use std::sync::Arc;
use std::time::Duration;

use nova_debug_model::mock::MockValue;
use nova_debug_model::DebugElement;
use nova_debug_presentation::{
    init_tracing, ConfigError, DetailFormatterRegistry, ModelPresentation, NoEvaluationContext,
    PresentationConfig, ShowDetails,
};

#[test]
fn loads_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presentation.toml");
    std::fs::write(
        &path,
        r#"
[policy]
show_qualified_names = true
show_unsigned_values = true
show_details = "inline_all"

[detail]
timeout_ms = 1500

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let config = PresentationConfig::load(&path).unwrap();
    assert!(config.policy.show_qualified_names);
    assert!(config.policy.show_unsigned_values);
    assert_eq!(config.policy.show_details, ShowDetails::InlineAll);
    assert_eq!(config.detail.timeout(), Duration::from_millis(1500));
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PresentationConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
    assert!(err.to_string().contains("absent.toml"), "{err}");
}

#[test]
fn unknown_show_details_value_is_rejected() {
    let err = PresentationConfig::from_toml_str("[policy]\nshow_details = \"sometimes\"\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn config_seeds_the_presentation() {
    let config = PresentationConfig::from_toml_str(
        "[policy]\nshow_qualified_names = true\nshow_unsigned_values = true\n",
    )
    .unwrap();
    let presentation = ModelPresentation::from_config(
        &config,
        Arc::new(DetailFormatterRegistry::new()),
        Arc::new(NoEvaluationContext),
    );
    assert_eq!(presentation.policy(), config.policy);
    assert_eq!(
        presentation
            .text(&DebugElement::Value(Arc::new(MockValue::byte(-2))))
            .as_deref(),
        Some("-2 [254]")
    );
    assert_eq!(presentation.details().timeout(), Duration::from_millis(5_000));
}

#[test]
fn tracing_init_is_idempotent() {
    let config = PresentationConfig::default();
    init_tracing(&config.logging);
    init_tracing(&config.logging);
    tracing::info!(target: "nova.debug.presentation", "logging after init");
}
