use kmatrix_core::errors::{ErrorInfo, KMatrixError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("line", "3")
        .with_context("expected", "6")
}

#[test]
fn config_error_surface() {
    let err = KMatrixError::Config(sample_info("config-pole-count", "short pole line"));
    assert_eq!(err.info().code, "config-pole-count");
    assert!(err.info().context.contains_key("line"));
}

#[test]
fn model_error_surface() {
    let err = KMatrixError::Model(sample_info("model-row", "row out of range"));
    assert_eq!(err.info().code, "model-row");
    assert!(err.info().context.contains_key("expected"));
}

#[test]
fn numerics_error_surface() {
    let err = KMatrixError::Numerics(sample_info("propagator-singular-a", "singular block"));
    assert_eq!(err.info().code, "propagator-singular-a");
}

#[test]
fn display_includes_context_and_hint() {
    let err = KMatrixError::Config(
        ErrorInfo::new("config-number", "invalid number `abc`")
            .with_context("line", "2")
            .with_hint("all fields must be plain decimal numbers"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("config-number"));
    assert!(rendered.contains("line=2"));
    assert!(rendered.contains("hint"));
}
