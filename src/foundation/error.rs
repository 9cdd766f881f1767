/// Convenience result type used across rasterfx.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is recoverable by the caller; nothing in the engine aborts the process.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Invalid caller-provided parameters or raw data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Two buffers that must share a size do not.
    #[error(
        "dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        /// Width of the reference buffer (base, or first frame).
        expected_width: u32,
        /// Height of the reference buffer.
        expected_height: u32,
        /// Width of the offending buffer.
        actual_width: u32,
        /// Height of the offending buffer.
        actual_height: u32,
    },

    /// A zero-area buffer was supplied where a non-empty result is required.
    #[error("empty buffer: {0}")]
    EmptyBuffer(String),

    /// An empty frame sequence was handed to a sink.
    #[error("empty frame sequence")]
    EmptySequence,

    /// Errors when serializing or deserializing parameter documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::EmptyBuffer`] value.
    pub fn empty_buffer(msg: impl Into<String>) -> Self {
        Self::EmptyBuffer(msg.into())
    }

    /// Build a [`FxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`FxError::DimensionMismatch`] from `(width, height)` pairs.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
