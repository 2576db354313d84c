use thiserror::Error;

/// Errors reported by segment sources and by the flattening configuration.
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum PathError {
    /// The flattening tolerance was negative.
    #[error("flatness must be >= 0, got {0}")]
    NegativeFlatness(f64),
    /// The flattening tolerance was not a number.
    #[error("flatness is not a number")]
    FlatnessIsNaN,
    /// The subdivision depth limit was negative.
    #[error("recursion limit must be >= 0, got {0}")]
    NegativeLimit(i32),
    /// The current segment was requested after the sequence ended.
    #[error("segment sequence is exhausted")]
    SequenceExhausted,
}

#[test]
fn error_messages() {
    use std::string::ToString;

    assert_eq!(
        PathError::NegativeFlatness(-1.0).to_string(),
        "flatness must be >= 0, got -1"
    );
    assert_eq!(
        PathError::NegativeLimit(-2).to_string(),
        "recursion limit must be >= 0, got -2"
    );
    assert_eq!(
        PathError::SequenceExhausted.to_string(),
        "segment sequence is exhausted"
    );
}
