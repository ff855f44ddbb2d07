//! Resource barrier model.
//!
//! When a resource moves from one [`ResourceUsage`] to another, the backend
//! must make earlier work visible to later work. This module computes the
//! stage/access pairs for such a transition. It never decides *when* a
//! transition happens; callers (or a [`TrackedResource`]) ask for a barrier
//! whenever the usage changes and record the result through a backend's
//! [`BarrierRecorder`](crate::backend::BarrierRecorder).
//!
//! Backend differences live in a [`BarrierPolicy`] value. A
//! [`BarrierPolicyTable`] maps backend identities to policies and falls back
//! to [`BarrierPolicy::generic`].
//!
//! # Example
//!
//! ```ignore
//! // Render target written by a pass, then sampled by the fragment shader.
//! let transition = compute_barrier(
//!     ResourceUsage::RenderTarget,
//!     ResourceUsage::ShaderResource,
//!     ShaderStageFlags::FRAGMENT,
//! )?;
//! assert!(transition.transition_required);
//! assert_eq!(transition.barrier.next_stage, StageFlags::PIXEL_SHADER);
//! ```

mod batch;
mod compute;
mod policy;
mod tracker;

pub use batch::BarrierBatch;
pub use compute::compute_barrier;
pub use policy::{BarrierPolicy, BarrierPolicyTable};
pub use tracker::TrackedResource;

use crate::types::{AccessFlags, ResourceUsage, ShaderStageFlags, StageFlags};

/// Stage/access values for one usage transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelineBarrier {
    /// Usage before the barrier.
    pub current_usage: ResourceUsage,
    /// Stages that must complete before the barrier.
    pub current_stage: StageFlags,
    /// Accesses that must be made available before the barrier.
    pub current_access: AccessFlags,
    /// Usage after the barrier.
    pub next_usage: ResourceUsage,
    /// Stages that wait on the barrier.
    pub next_stage: StageFlags,
    /// Accesses that must see the earlier work.
    pub next_access: AccessFlags,
}

impl PipelineBarrier {
    /// Check if the usage changes across this barrier.
    pub fn changes_usage(&self) -> bool {
        self.current_usage != self.next_usage
    }
}

/// Result of a barrier computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarrierTransition {
    /// The computed barrier.
    pub barrier: PipelineBarrier,
    /// Whether the backend must record the barrier.
    pub transition_required: bool,
}

/// A usage together with the shader stages that declare it.
///
/// The stages only matter for shader-bound usages (constant buffers, shader
/// resources, unordered access). Empty stages mean "every shader stage".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageScope {
    /// The usage.
    pub usage: ResourceUsage,
    /// Shader stages that bind the resource.
    pub stages: ShaderStageFlags,
}

impl UsageScope {
    /// Create a scope.
    pub fn new(usage: ResourceUsage, stages: ShaderStageFlags) -> Self {
        Self { usage, stages }
    }

    /// Scope for a usage that no shader binds.
    pub fn unbound(usage: ResourceUsage) -> Self {
        Self {
            usage,
            stages: ShaderStageFlags::empty(),
        }
    }
}

static_assertions::assert_impl_all!(PipelineBarrier: Send, Sync);
static_assertions::assert_impl_all!(BarrierTransition: Send, Sync);
static_assertions::assert_impl_all!(UsageScope: Send, Sync);
