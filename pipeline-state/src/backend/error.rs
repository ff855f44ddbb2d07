//! Backend error types.

use thiserror::Error;

use crate::error::PipelineStateError;

/// Errors a backend reports while realizing a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The requested feature is not supported.
    #[error("feature not supported: {0}")]
    FeatureNotSupported(String),

    /// A format cannot be used the way the description asks.
    #[error("format {0} is not supported")]
    UnsupportedFormat(String),

    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,

    /// The device was lost.
    #[error("GPU device lost")]
    DeviceLost,

    /// Pipeline object creation failed.
    #[error("pipeline creation failed: {0}")]
    PipelineCreationFailed(String),

    /// Internal backend error.
    #[error("internal backend error: {0}")]
    Internal(String),
}

impl From<BackendError> for PipelineStateError {
    fn from(error: BackendError) -> Self {
        Self::BackendRejected(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_passes_through() {
        let error: PipelineStateError = BackendError::DeviceLost.into();
        assert_eq!(error, PipelineStateError::BackendRejected("GPU device lost".into()));

        let error: PipelineStateError =
            BackendError::UnsupportedFormat("Rgb32Float".into()).into();
        assert_eq!(
            error.to_string(),
            "backend rejected the pipeline: format Rgb32Float is not supported"
        );
    }
}
