//! Backend boundary.
//!
//! Native graphics APIs plug in through two capabilities:
//!
//! - [`PipelineFactory`] turns a validated [`PipelineDescription`] into a
//!   native pipeline object.
//! - [`BarrierRecorder`] emits the synchronization command for a computed
//!   [`PipelineBarrier`].
//!
//! # Available Backends
//!
//! - `dummy` (default): records calls without touching a GPU
//! - `vulkan-backend` (default): conversions to `ash::vk` values and barrier
//!   structures

#[cfg(feature = "dummy")]
pub mod dummy;

#[cfg(feature = "vulkan-backend")]
pub mod vulkan;

mod error;

pub use error::BackendError;

use crate::barrier::PipelineBarrier;
use crate::pipeline::PipelineDescription;

/// Identity of a tracked resource, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Get the raw identifier.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ResourceId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Backend identity, used to select a barrier policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// The no-op backend.
    Dummy,
    /// Vulkan.
    Vulkan,
    /// Direct3D 12.
    D3D12,
    /// Any other backend, by name.
    Custom(&'static str),
}

/// Creates native pipeline objects.
pub trait PipelineFactory {
    /// The native pipeline object.
    type Pipeline;

    /// Human-readable backend name.
    fn name(&self) -> &'static str;

    /// Backend identity.
    fn kind(&self) -> BackendKind;

    /// Create a pipeline from a validated description.
    fn realize(&self, description: &PipelineDescription) -> Result<Self::Pipeline, BackendError>;
}

/// Records barriers into a backend command stream.
pub trait BarrierRecorder {
    /// Record one barrier for a resource.
    fn record_barrier(&mut self, barrier: &PipelineBarrier, resource: ResourceId);
}

impl<R: BarrierRecorder + ?Sized> BarrierRecorder for &mut R {
    fn record_barrier(&mut self, barrier: &PipelineBarrier, resource: ResourceId) {
        (**self).record_barrier(barrier, resource);
    }
}
