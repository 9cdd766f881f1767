use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FxError::empty_buffer("x")
            .to_string()
            .contains("empty buffer:")
    );
    assert!(
        FxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(FxError::EmptySequence.to_string(), "empty frame sequence");
}

#[test]
fn dimension_mismatch_reports_both_sizes() {
    let err = FxError::dimension_mismatch((10, 10), (5, 5));
    assert_eq!(
        err.to_string(),
        "dimension mismatch: expected 10x10, got 5x5"
    );
    assert!(matches!(
        err,
        FxError::DimensionMismatch {
            expected_width: 10,
            actual_height: 5,
            ..
        }
    ));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
