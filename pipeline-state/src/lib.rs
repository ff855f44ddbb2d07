//! # RedLilium Pipeline State
//!
//! Backend-neutral description of graphics pipeline state and resource barriers.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`PipelineDescription`] - Shaders, fixed-function state, render target
//!   formats, input layout and descriptor sets as one immutable value
//! - [`DescriptorSet`] - Bounded groups of shader-visible resource bindings
//! - [`compute_barrier`] and [`BarrierPolicy`] - Stage/access values for a
//!   resource moving between usages, with per-backend rules
//! - [`PipelineFactory`] and [`BarrierRecorder`] - The two capabilities a
//!   native backend implements
//!
//! Shaders, buffers, images and samplers are owned elsewhere and referenced
//! through weak [`Handle`]s.
//!
//! ## Example
//!
//! ```ignore
//! use redlilium_pipeline_state::*;
//!
//! let desc = PipelineDescription::builder()
//!     .with_vertex_shader(ShaderHandle::shader(&vs))
//!     .with_fragment_shader(ShaderHandle::shader(&fs))
//!     .with_render_target(Format::Rgba8Unorm)
//!     .build()?;
//! let pipeline = desc.realize(&backend)?;
//!
//! let mut target = TrackedResource::new(ResourceId(1));
//! let mut batch = BarrierBatch::new();
//! target.transition_into(
//!     ResourceUsage::RenderTarget,
//!     ShaderStageFlags::empty(),
//!     &BarrierPolicy::vulkan(),
//!     &mut batch,
//! )?;
//! batch.submit(&mut command_list);
//! ```

pub mod backend;
pub mod barrier;
pub mod descriptors;
pub mod error;
pub mod handle;
pub mod pipeline;
pub mod profiling;
pub mod types;

// Re-export main types for convenience
#[cfg(feature = "dummy")]
pub use backend::dummy::{DummyBackend, DummyCommandList, DummyPipeline};
pub use backend::{BackendError, BackendKind, BarrierRecorder, PipelineFactory, ResourceId};
pub use barrier::{
    BarrierBatch, BarrierPolicy, BarrierPolicyTable, BarrierTransition, PipelineBarrier,
    TrackedResource, UsageScope, compute_barrier,
};
pub use descriptors::{
    DescriptorBinding, DescriptorKind, DescriptorResource, DescriptorSet, MAX_BINDINGS_PER_SET,
};
pub use error::PipelineStateError;
pub use handle::{
    BufferHandle, BufferResource, Handle, ImageHandle, ImageResource, SamplerHandle,
    SamplerResource, ShaderHandle, ShaderModule,
};
pub use pipeline::{
    BlendComponent, BlendDesc, InputClassification, InputLayout, InputLayoutElement,
    MAX_DESCRIPTOR_SETS, MAX_INPUT_ELEMENTS, MAX_RENDER_TARGETS, PipelineDescription,
    PipelineDescriptionBuilder, RasterizerState, SampleDesc, ShaderStages,
};
pub use types::{
    AccessFlags, BlendFactor, BlendOperation, ColorWrites, CullMode, FillMode, Format, FrontFace,
    PrimitiveTopology, ResourceUsage, ShaderStage, ShaderStageFlags, StageFlags,
};

/// Pipeline state library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the pipeline state subsystem.
pub fn init() {
    log::info!("RedLilium Pipeline State v{} initialized", VERSION);
}

static_assertions::assert_impl_all!(PipelineDescription: Send, Sync);
static_assertions::assert_impl_all!(DescriptorSet: Send, Sync);
static_assertions::assert_impl_all!(BarrierPolicy: Send, Sync);
static_assertions::assert_impl_all!(BarrierPolicyTable: Send, Sync);
static_assertions::assert_impl_all!(TrackedResource: Send, Sync);
static_assertions::assert_impl_all!(PipelineStateError: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_description_is_incomplete() {
        let desc = PipelineDescription::default();
        assert!(matches!(
            desc.validate(),
            Err(PipelineStateError::IncompletePipelineDescription(_))
        ));
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_dummy_backend() {
        let backend = DummyBackend::new();
        assert_eq!(backend.name(), "Dummy Backend");
        assert_eq!(backend.kind(), BackendKind::Dummy);
    }
}
