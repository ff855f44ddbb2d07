//! Fixed-function Vulkan pipeline state derived from a pipeline description.

use std::collections::BTreeMap;

use ash::vk;

use crate::pipeline::PipelineDescription;

use super::conversion::{
    convert_blend_attachment, convert_cull_mode, convert_format, convert_front_face,
    convert_input_rate, convert_polygon_mode, convert_sample_count, convert_topology,
};

/// Owned Vulkan state for `vkCreateGraphicsPipelines` with dynamic rendering.
///
/// Create-infos that point at arrays borrow from this value, so it must
/// outlive the `vk::GraphicsPipelineCreateInfo` built from it.
#[derive(Debug, Clone)]
pub struct VulkanPipelineState {
    /// One binding per vertex buffer slot, in slot order.
    pub bindings: Vec<vk::VertexInputBindingDescription>,
    /// One attribute per input element; the location is the element index.
    pub attributes: Vec<vk::VertexInputAttributeDescription>,
    pub input_assembly: vk::PipelineInputAssemblyStateCreateInfo<'static>,
    pub rasterization: vk::PipelineRasterizationStateCreateInfo<'static>,
    pub multisample: vk::PipelineMultisampleStateCreateInfo<'static>,
    pub blend_attachments: Vec<vk::PipelineColorBlendAttachmentState>,
    pub color_formats: Vec<vk::Format>,
    pub depth_format: vk::Format,
    pub stencil_format: vk::Format,
}

impl VulkanPipelineState {
    /// Translate the fixed-function part of a description.
    pub fn from_description(desc: &PipelineDescription) -> Self {
        let elements = desc.input_layout.elements();

        let mut slots = BTreeMap::new();
        for element in elements {
            slots.entry(element.slot).or_insert(element.classification);
        }
        let bindings = slots
            .into_iter()
            .map(|(slot, classification)| {
                vk::VertexInputBindingDescription::default()
                    .binding(slot)
                    .stride(desc.input_layout.stride(slot))
                    .input_rate(convert_input_rate(classification))
            })
            .collect();

        let attributes = elements
            .iter()
            .enumerate()
            .map(|(location, element)| {
                vk::VertexInputAttributeDescription::default()
                    .location(location as u32)
                    .binding(element.slot)
                    .format(convert_format(element.format))
                    .offset(element.offset)
            })
            .collect();

        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
            .topology(convert_topology(desc.rasterizer.topology))
            .primitive_restart_enable(false);

        let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
            .depth_clamp_enable(false)
            .rasterizer_discard_enable(false)
            .polygon_mode(convert_polygon_mode(desc.rasterizer.fill_mode))
            .line_width(1.0)
            .cull_mode(convert_cull_mode(desc.rasterizer.cull_mode))
            .front_face(convert_front_face(desc.rasterizer.front_face))
            .depth_bias_enable(false);

        let samples = if desc.multisampling {
            convert_sample_count(desc.sample_desc.count)
        } else {
            vk::SampleCountFlags::TYPE_1
        };
        let multisample = vk::PipelineMultisampleStateCreateInfo::default()
            .sample_shading_enable(false)
            .rasterization_samples(samples)
            .alpha_to_coverage_enable(desc.alpha_to_coverage);

        let blend_attachments = (0..desc.render_target_count as usize)
            .map(|target| convert_blend_attachment(desc.blend_for(target)))
            .collect();

        let color_formats = desc.color_formats().map(convert_format).collect();

        let (depth_format, stencil_format) = match desc.depth_stencil_format {
            Some(format) if format.has_stencil() => {
                (convert_format(format), convert_format(format))
            }
            Some(format) => (convert_format(format), vk::Format::UNDEFINED),
            None => (vk::Format::UNDEFINED, vk::Format::UNDEFINED),
        };

        Self {
            bindings,
            attributes,
            input_assembly,
            rasterization,
            multisample,
            blend_attachments,
            color_formats,
            depth_format,
            stencil_format,
        }
    }

    /// Vertex input state referencing the owned bindings and attributes.
    pub fn vertex_input(&self) -> vk::PipelineVertexInputStateCreateInfo<'_> {
        vk::PipelineVertexInputStateCreateInfo::default()
            .vertex_binding_descriptions(&self.bindings)
            .vertex_attribute_descriptions(&self.attributes)
    }

    /// Color blend state referencing the owned attachments.
    pub fn color_blend(&self) -> vk::PipelineColorBlendStateCreateInfo<'_> {
        vk::PipelineColorBlendStateCreateInfo::default()
            .logic_op_enable(false)
            .attachments(&self.blend_attachments)
    }

    /// Attachment formats for dynamic rendering.
    pub fn rendering(&self) -> vk::PipelineRenderingCreateInfo<'_> {
        vk::PipelineRenderingCreateInfo::default()
            .color_attachment_formats(&self.color_formats)
            .depth_attachment_format(self.depth_format)
            .stencil_attachment_format(self.stencil_format)
    }
}
