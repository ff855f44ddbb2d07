//! The complete pipeline description value.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;

use super::{BlendDesc, InputLayout, PipelineDescriptionBuilder};
use crate::backend::PipelineFactory;
use crate::descriptors::DescriptorSet;
use crate::error::PipelineStateError;
use crate::handle::ShaderHandle;
use crate::types::{CullMode, FillMode, Format, FrontFace, PrimitiveTopology, ShaderStage};
use crate::profiling::{profile_function, profile_message, profile_scope};

/// Maximum number of simultaneously bound color render targets.
pub const MAX_RENDER_TARGETS: usize = 16;

/// Maximum number of descriptor sets a pipeline binds.
pub const MAX_DESCRIPTOR_SETS: usize = 4;

/// Sample counts accepted when multisampling is enabled.
pub const SUPPORTED_SAMPLE_COUNTS: [u32; 5] = [1, 2, 4, 8, 16];

/// Shader modules of every programmable stage.
///
/// Vertex and fragment are mandatory; the others are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShaderStages {
    /// Vertex shader.
    pub vertex: Option<ShaderHandle>,
    /// Fragment (pixel) shader.
    pub fragment: Option<ShaderHandle>,
    /// Hull (tessellation control) shader.
    pub hull: Option<ShaderHandle>,
    /// Domain (tessellation evaluation) shader.
    pub domain: Option<ShaderHandle>,
    /// Geometry shader.
    pub geometry: Option<ShaderHandle>,
    /// Tessellation shader.
    pub tessellation: Option<ShaderHandle>,
}

impl ShaderStages {
    /// Iterate over the populated slots with the stage each slot expects.
    pub fn iter(&self) -> impl Iterator<Item = (ShaderStage, &ShaderHandle)> {
        [
            (ShaderStage::Vertex, &self.vertex),
            (ShaderStage::Hull, &self.hull),
            (ShaderStage::Tessellation, &self.tessellation),
            (ShaderStage::Domain, &self.domain),
            (ShaderStage::Geometry, &self.geometry),
            (ShaderStage::Fragment, &self.fragment),
        ]
        .into_iter()
        .filter_map(|(stage, slot)| slot.as_ref().map(|handle| (stage, handle)))
    }

    /// Get the slot for a stage. Compute has no slot in a graphics pipeline.
    pub fn get(&self, stage: ShaderStage) -> Option<&ShaderHandle> {
        match stage {
            ShaderStage::Vertex => self.vertex.as_ref(),
            ShaderStage::Fragment => self.fragment.as_ref(),
            ShaderStage::Hull => self.hull.as_ref(),
            ShaderStage::Domain => self.domain.as_ref(),
            ShaderStage::Geometry => self.geometry.as_ref(),
            ShaderStage::Tessellation => self.tessellation.as_ref(),
            ShaderStage::Compute => None,
        }
    }

    pub(super) fn slot_mut(&mut self, stage: ShaderStage) -> Option<&mut Option<ShaderHandle>> {
        match stage {
            ShaderStage::Vertex => Some(&mut self.vertex),
            ShaderStage::Fragment => Some(&mut self.fragment),
            ShaderStage::Hull => Some(&mut self.hull),
            ShaderStage::Domain => Some(&mut self.domain),
            ShaderStage::Geometry => Some(&mut self.geometry),
            ShaderStage::Tessellation => Some(&mut self.tessellation),
            ShaderStage::Compute => None,
        }
    }
}

/// Fixed-function rasterization state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RasterizerState {
    /// Primitive topology.
    pub topology: PrimitiveTopology,
    /// Face culling mode.
    pub cull_mode: CullMode,
    /// Polygon fill mode.
    pub fill_mode: FillMode,
    /// Front face winding.
    pub front_face: FrontFace,
}

/// Multisample count and quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    /// Samples per pixel.
    pub count: u32,
    /// Backend-specific quality level.
    pub quality: u32,
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self {
            count: 1,
            quality: 0,
        }
    }
}

/// Complete, backend-neutral description of a graphics pipeline.
///
/// The value is immutable once handed to a backend and compares by value,
/// with shader handles compared by identity, so it can key a pipeline cache.
/// Shaders and descriptor resources are referenced, never owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineDescription {
    /// Shader modules.
    pub shaders: ShaderStages,

    /// Rasterization state.
    pub rasterizer: RasterizerState,

    /// Number of color render targets in use.
    pub render_target_count: u32,

    /// Color target formats. Exactly the first `render_target_count` are populated.
    pub render_target_formats: [Option<Format>; MAX_RENDER_TARGETS],

    /// Depth/stencil target format, if a depth buffer is bound.
    pub depth_stencil_format: Option<Format>,

    /// Derive coverage from the first target's alpha.
    pub alpha_to_coverage: bool,

    /// Use a separate blend descriptor per render target.
    pub independent_blend: bool,

    /// Blend descriptors. Only index 0 is used unless `independent_blend` is set.
    pub blend: [BlendDesc; MAX_RENDER_TARGETS],

    /// Descriptor sets, in set index order.
    pub descriptor_sets: ArrayVec<DescriptorSet, MAX_DESCRIPTOR_SETS>,

    /// Vertex input layout.
    pub input_layout: InputLayout,

    /// Whether multisampling is enabled.
    pub multisampling: bool,

    /// Multisample configuration.
    pub sample_desc: SampleDesc,

    /// Optional label for debugging.
    pub label: Option<String>,
}

impl Default for PipelineDescription {
    fn default() -> Self {
        Self {
            shaders: ShaderStages::default(),
            rasterizer: RasterizerState::default(),
            render_target_count: 0,
            render_target_formats: [None; MAX_RENDER_TARGETS],
            depth_stencil_format: None,
            alpha_to_coverage: false,
            independent_blend: false,
            blend: [BlendDesc::default(); MAX_RENDER_TARGETS],
            descriptor_sets: ArrayVec::new(),
            input_layout: InputLayout::default(),
            multisampling: false,
            sample_desc: SampleDesc::default(),
            label: None,
        }
    }
}

impl PipelineDescription {
    /// Start building a description.
    pub fn builder() -> PipelineDescriptionBuilder {
        PipelineDescriptionBuilder::new()
    }

    /// Check structural completeness.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// shaders, render targets, input layout, descriptor sets, sample count.
    pub fn validate(&self) -> Result<(), PipelineStateError> {
        profile_function!();

        self.validate_shaders()
            .and_then(|()| self.validate_render_targets())
            .and_then(|()| self.input_layout.validate())
            .and_then(|()| self.validate_descriptor_sets())
            .and_then(|()| self.validate_sample_count())
            .inspect_err(|e| {
                log::debug!(
                    "Pipeline '{}' failed validation: {}",
                    self.label.as_deref().unwrap_or("unnamed"),
                    e
                );
            })
    }

    fn validate_shaders(&self) -> Result<(), PipelineStateError> {
        if self.shaders.vertex.is_none() {
            return Err(PipelineStateError::IncompletePipelineDescription(
                "vertex shader is missing".to_string(),
            ));
        }
        if self.shaders.fragment.is_none() {
            return Err(PipelineStateError::IncompletePipelineDescription(
                "fragment shader is missing".to_string(),
            ));
        }
        if self.shaders.hull.is_some() != self.shaders.domain.is_some() {
            return Err(PipelineStateError::IncompletePipelineDescription(
                "hull and domain shaders must be provided together".to_string(),
            ));
        }

        // Expired handles are reported by realize; here only live ones are checked.
        for (expected, handle) in self.shaders.iter() {
            if let Some(declared) = handle.stage()
                && declared != expected
            {
                return Err(PipelineStateError::IncompletePipelineDescription(format!(
                    "{declared:?} shader bound to the {expected:?} slot"
                )));
            }
        }
        Ok(())
    }

    fn validate_render_targets(&self) -> Result<(), PipelineStateError> {
        let count = self.render_target_count as usize;
        if count > MAX_RENDER_TARGETS {
            return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                "{count} render targets exceed the limit of {MAX_RENDER_TARGETS}"
            )));
        }

        for (index, format) in self.render_target_formats.iter().enumerate() {
            match (index < count, format) {
                (true, None) => {
                    return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                        "render target {index} has no format"
                    )));
                }
                (true, Some(format)) if !format.is_color_renderable() => {
                    return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                        "render target {index} uses {format:?}, which is not a color format"
                    )));
                }
                (false, Some(format)) => {
                    return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                        "render target {index} has format {format:?} beyond the count of {count}"
                    )));
                }
                _ => {}
            }
        }

        match self.depth_stencil_format {
            Some(format) if !format.is_depth_stencil() => {
                return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                    "depth/stencil target uses {format:?}, which is not a depth format"
                )));
            }
            None if count == 0 => {
                return Err(PipelineStateError::InvalidRenderTargetCount(
                    "no color or depth/stencil target".to_string(),
                ));
            }
            _ => {}
        }

        if self.independent_blend
            && let Some(index) = self.blend[count..].iter().position(|b| !b.is_default())
        {
            return Err(PipelineStateError::InvalidRenderTargetCount(format!(
                "blend descriptor {} is set but only {count} render targets are bound",
                count + index
            )));
        }
        Ok(())
    }

    fn validate_descriptor_sets(&self) -> Result<(), PipelineStateError> {
        self.descriptor_sets.iter().try_for_each(DescriptorSet::validate)
    }

    fn validate_sample_count(&self) -> Result<(), PipelineStateError> {
        let count = self.sample_desc.count;
        if self.multisampling {
            if !SUPPORTED_SAMPLE_COUNTS.contains(&count) {
                return Err(PipelineStateError::InvalidSampleCount {
                    count,
                    reason: "must be 1, 2, 4, 8 or 16",
                });
            }
        } else if count > 1 {
            return Err(PipelineStateError::InvalidSampleCount {
                count,
                reason: "multisampling is disabled",
            });
        }
        Ok(())
    }

    /// Effective blend descriptor for a render target.
    pub fn blend_for(&self, target: usize) -> &BlendDesc {
        if self.independent_blend {
            self.blend.get(target).unwrap_or(&self.blend[0])
        } else {
            &self.blend[0]
        }
    }

    /// Active color target formats.
    pub fn color_formats(&self) -> impl Iterator<Item = Format> + '_ {
        self.render_target_formats
            .iter()
            .take(self.render_target_count as usize)
            .flatten()
            .copied()
    }

    /// Stable hash of the description, for keying a pipeline cache.
    ///
    /// Stable within one process; handles hash by address.
    pub fn cache_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Validate and hand the description to a backend.
    ///
    /// Every shader handle must still be alive. Backend failures are returned
    /// as [`PipelineStateError::BackendRejected`] with the backend's message.
    pub fn realize<F: PipelineFactory>(
        &self,
        factory: &F,
    ) -> Result<F::Pipeline, PipelineStateError> {
        profile_function!();

        self.validate()?;

        for (stage, handle) in self.shaders.iter() {
            if !handle.is_alive() {
                log::debug!(
                    "Pipeline '{}' references an expired {:?} shader",
                    self.label.as_deref().unwrap_or("unnamed"),
                    stage
                );
                return Err(PipelineStateError::BackendRejected(format!(
                    "{stage:?} shader no longer exists"
                )));
            }
        }

        log::debug!(
            "Realizing pipeline '{}' on {} backend",
            self.label.as_deref().unwrap_or("unnamed"),
            factory.name()
        );

        profile_scope!("backend_realize");
        factory.realize(self).map_err(|e| {
            log::debug!(
                "Backend {} rejected pipeline '{}': {}",
                factory.name(),
                self.label.as_deref().unwrap_or("unnamed"),
                e
            );
            profile_message!("pipeline rejected by backend");
            PipelineStateError::from(e)
        })
    }
}
