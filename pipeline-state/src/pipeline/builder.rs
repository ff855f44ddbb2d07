//! Builder for [`PipelineDescription`].

use super::{
    BlendDesc, InputLayout, InputLayoutElement, MAX_DESCRIPTOR_SETS, MAX_RENDER_TARGETS,
    PipelineDescription, RasterizerState, SampleDesc,
};
use crate::descriptors::DescriptorSet;
use crate::error::PipelineStateError;
use crate::handle::ShaderHandle;
use crate::types::{CullMode, FillMode, Format, FrontFace, PrimitiveTopology, ShaderStage};

/// Assembles a [`PipelineDescription`] without talking to any backend.
///
/// Setters never fail. Overfilling a bounded container is remembered and
/// reported by [`build`](Self::build); every other check is left to
/// [`PipelineDescription::validate`].
///
/// # Example
///
/// ```ignore
/// let desc = PipelineDescription::builder()
///     .with_vertex_shader(ShaderHandle::shader(&vs))
///     .with_fragment_shader(ShaderHandle::shader(&fs))
///     .with_render_target(Format::Bgra8UnormSrgb)
///     .with_depth_stencil_format(Format::Depth32Float)
///     .with_cull_mode(CullMode::Back)
///     .with_blend(BlendDesc::alpha_blending())
///     .with_label("forward_opaque")
///     .build()?;
/// desc.validate()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineDescriptionBuilder {
    desc: PipelineDescription,
    overflow: Option<PipelineStateError>,
}

impl PipelineDescriptionBuilder {
    /// Create a builder with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a shader in the slot of its declared stage.
    ///
    /// Expired handles and compute shaders have no slot and are ignored.
    pub fn with_shader(mut self, shader: ShaderHandle) -> Self {
        match shader.stage() {
            Some(stage) => match self.desc.shaders.slot_mut(stage) {
                Some(slot) => *slot = Some(shader),
                None => log::warn!("Ignoring {stage:?} shader in a graphics pipeline"),
            },
            None => log::warn!("Ignoring expired shader handle"),
        }
        self
    }

    /// Set the vertex shader.
    pub fn with_vertex_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Vertex, shader)
    }

    /// Set the fragment shader.
    pub fn with_fragment_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Fragment, shader)
    }

    /// Set the hull shader.
    pub fn with_hull_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Hull, shader)
    }

    /// Set the domain shader.
    pub fn with_domain_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Domain, shader)
    }

    /// Set the geometry shader.
    pub fn with_geometry_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Geometry, shader)
    }

    /// Set the tessellation shader.
    pub fn with_tessellation_shader(self, shader: ShaderHandle) -> Self {
        self.with_shader_in(ShaderStage::Tessellation, shader)
    }

    fn with_shader_in(mut self, stage: ShaderStage, shader: ShaderHandle) -> Self {
        if let Some(slot) = self.desc.shaders.slot_mut(stage) {
            *slot = Some(shader);
        }
        self
    }

    /// Set the whole rasterizer state.
    pub fn with_rasterizer(mut self, rasterizer: RasterizerState) -> Self {
        self.desc.rasterizer = rasterizer;
        self
    }

    /// Set the primitive topology.
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.desc.rasterizer.topology = topology;
        self
    }

    /// Set the cull mode.
    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.desc.rasterizer.cull_mode = cull_mode;
        self
    }

    /// Set the fill mode.
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.desc.rasterizer.fill_mode = fill_mode;
        self
    }

    /// Set the front face winding.
    pub fn with_front_face(mut self, front_face: FrontFace) -> Self {
        self.desc.rasterizer.front_face = front_face;
        self
    }

    /// Append a color render target.
    pub fn with_render_target(mut self, format: Format) -> Self {
        self.push_render_target(format);
        self
    }

    /// Append a color render target with its own blend state.
    ///
    /// Enables independent blending. Targets added earlier keep the shared
    /// blend state they had.
    pub fn with_render_target_blend(mut self, format: Format, blend: BlendDesc) -> Self {
        if let Some(index) = self.push_render_target(format) {
            self.enable_independent_blend();
            self.desc.blend[index] = blend;
        }
        self
    }

    fn push_render_target(&mut self, format: Format) -> Option<usize> {
        let index = self.desc.render_target_count as usize;
        if index >= MAX_RENDER_TARGETS {
            self.record_overflow("render targets", MAX_RENDER_TARGETS);
            return None;
        }
        self.desc.render_target_formats[index] = Some(format);
        self.desc.render_target_count += 1;
        Some(index)
    }

    /// Set the blend state shared by all targets (index 0).
    pub fn with_blend(mut self, blend: BlendDesc) -> Self {
        self.desc.blend[0] = blend;
        self
    }

    /// Enable or disable per-target blend state.
    ///
    /// When enabled, targets already added start from the shared blend state.
    pub fn with_independent_blend(mut self, enabled: bool) -> Self {
        if enabled {
            self.enable_independent_blend();
        } else {
            self.desc.independent_blend = false;
        }
        self
    }

    fn enable_independent_blend(&mut self) {
        if self.desc.independent_blend {
            return;
        }
        let shared = self.desc.blend[0];
        let count = self.desc.render_target_count as usize;
        for blend in &mut self.desc.blend[1..count.max(1)] {
            *blend = shared;
        }
        self.desc.independent_blend = true;
    }

    /// Set the depth/stencil target format.
    pub fn with_depth_stencil_format(mut self, format: Format) -> Self {
        self.desc.depth_stencil_format = Some(format);
        self
    }

    /// Enable alpha-to-coverage.
    pub fn with_alpha_to_coverage(mut self, enabled: bool) -> Self {
        self.desc.alpha_to_coverage = enabled;
        self
    }

    /// Append a descriptor set.
    pub fn with_descriptor_set(mut self, set: DescriptorSet) -> Self {
        if self.desc.descriptor_sets.try_push(set).is_err() {
            self.record_overflow("descriptor sets", MAX_DESCRIPTOR_SETS);
        }
        self
    }

    /// Append an input layout element.
    pub fn with_input_element(mut self, element: InputLayoutElement) -> Self {
        if let Err(e) = self.desc.input_layout.push(element) {
            self.overflow.get_or_insert(e);
        }
        self
    }

    /// Replace the input layout.
    pub fn with_input_layout(mut self, layout: InputLayout) -> Self {
        self.desc.input_layout = layout;
        self
    }

    /// Enable multisampling with the given sample count and quality.
    pub fn with_multisampling(mut self, count: u32, quality: u32) -> Self {
        self.desc.multisampling = true;
        self.desc.sample_desc = SampleDesc { count, quality };
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.desc.label = Some(label.into());
        self
    }

    fn record_overflow(&mut self, container: &'static str, capacity: usize) {
        self.overflow
            .get_or_insert(PipelineStateError::CapacityExceeded {
                container,
                capacity,
            });
    }

    /// Build the description.
    ///
    /// Fails only if a bounded container was overfilled.
    pub fn build(self) -> Result<PipelineDescription, PipelineStateError> {
        match self.overflow {
            Some(e) => Err(e),
            None => Ok(self.desc),
        }
    }
}
