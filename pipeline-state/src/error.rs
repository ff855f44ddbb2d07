//! Pipeline state error types.

use thiserror::Error;

use crate::descriptors::DescriptorKind;
use crate::types::{AccessFlags, ResourceUsage, StageFlags};

/// Errors produced while describing pipelines or computing barriers.
///
/// Every variant is recoverable: the caller decides whether to retry with a
/// corrected description or abandon the rendering operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineStateError {
    /// A binding with the same index already exists in the descriptor set.
    #[error("descriptor binding index {binding} is already present in the set")]
    DuplicateBindingIndex { binding: u32 },

    /// A fixed-capacity container is full.
    #[error("{container} is full (capacity {capacity})")]
    CapacityExceeded {
        container: &'static str,
        capacity: usize,
    },

    /// The referenced resource variant does not match the declared descriptor kind.
    #[error("descriptor binding {binding} declares {kind:?} but references a {resource}")]
    KindMismatch {
        binding: u32,
        kind: DescriptorKind,
        resource: &'static str,
    },

    /// A descriptor binding declares an empty array.
    #[error("descriptor binding {binding} has an array size of zero")]
    InvalidArraySize { binding: u32 },

    /// A descriptor binding references a resource that has been destroyed.
    #[error("descriptor binding {binding} references a resource that no longer exists")]
    DanglingResourceReference { binding: u32 },

    /// A mandatory shader stage is missing or mismatched.
    #[error("incomplete pipeline description: {0}")]
    IncompletePipelineDescription(String),

    /// Render target count, formats or blend descriptors are inconsistent.
    #[error("invalid render target configuration: {0}")]
    InvalidRenderTargetCount(String),

    /// The input layout breaks slot/offset ordering or uses unusable formats.
    #[error("invalid input layout: {0}")]
    InvalidInputLayout(String),

    /// The multisample count is not supported.
    #[error("invalid sample count {count}: {reason}")]
    InvalidSampleCount { count: u32, reason: &'static str },

    /// The backend policy has no legal mapping for this usage pair.
    #[error("unsupported transition {from:?} -> {to:?}: {reason}")]
    UnsupportedTransition {
        from: ResourceUsage,
        to: ResourceUsage,
        reason: String,
    },

    /// An access type was paired with stages that cannot perform it.
    #[error("access {access:?} cannot be performed at stages {stage:?}")]
    IncompatibleStageAccess {
        stage: StageFlags,
        access: AccessFlags,
    },

    /// The backend refused to realize the pipeline. The message is the backend's own.
    #[error("backend rejected the pipeline: {0}")]
    BackendRejected(String),
}

impl PipelineStateError {
    /// Check if this error was raised by the backend rather than by local validation.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::BackendRejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineStateError::DuplicateBindingIndex { binding: 3 };
        assert_eq!(
            err.to_string(),
            "descriptor binding index 3 is already present in the set"
        );

        let err = PipelineStateError::BackendRejected("format not supported".to_string());
        assert_eq!(
            err.to_string(),
            "backend rejected the pipeline: format not supported"
        );
        assert!(err.is_backend_error());
    }

    #[test]
    fn test_capacity_display() {
        let err = PipelineStateError::CapacityExceeded {
            container: "descriptor set",
            capacity: 16,
        };
        assert_eq!(err.to_string(), "descriptor set is full (capacity 16)");
        assert!(!err.is_backend_error());
    }
}
