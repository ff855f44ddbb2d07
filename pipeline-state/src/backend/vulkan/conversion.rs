//! Type conversions between pipeline state types and Vulkan types.

use ash::vk;

use crate::pipeline::{BlendDesc, InputClassification};
use crate::types::{
    AccessFlags, BlendFactor, BlendOperation, ColorWrites, CullMode, FillMode, Format, FrontFace,
    PrimitiveTopology, ResourceUsage, StageFlags,
};

const STAGE_TABLE: [(StageFlags, vk::PipelineStageFlags); 13] = [
    (StageFlags::VERTEX_INPUT, vk::PipelineStageFlags::VERTEX_INPUT),
    (StageFlags::VERTEX_SHADER, vk::PipelineStageFlags::VERTEX_SHADER),
    (StageFlags::PIXEL_SHADER, vk::PipelineStageFlags::FRAGMENT_SHADER),
    (
        StageFlags::EARLY_PIXEL_TESTS,
        vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS,
    ),
    (
        StageFlags::LATE_PIXEL_TESTS,
        vk::PipelineStageFlags::LATE_FRAGMENT_TESTS,
    ),
    (
        StageFlags::RENDER_TARGET,
        vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
    ),
    (StageFlags::COMPUTE_SHADER, vk::PipelineStageFlags::COMPUTE_SHADER),
    (StageFlags::TRANSFER, vk::PipelineStageFlags::TRANSFER),
    (StageFlags::ALL_COMMANDS, vk::PipelineStageFlags::ALL_COMMANDS),
    (
        StageFlags::HULL_SHADER,
        vk::PipelineStageFlags::TESSELLATION_CONTROL_SHADER,
    ),
    (
        StageFlags::DOMAIN_SHADER,
        vk::PipelineStageFlags::TESSELLATION_EVALUATION_SHADER,
    ),
    (StageFlags::GEOMETRY_SHADER, vk::PipelineStageFlags::GEOMETRY_SHADER),
    (StageFlags::HOST, vk::PipelineStageFlags::HOST),
];

const ACCESS_TABLE: [(AccessFlags, vk::AccessFlags); 14] = [
    (AccessFlags::VERTEX_READ, vk::AccessFlags::VERTEX_ATTRIBUTE_READ),
    (AccessFlags::INDEX_READ, vk::AccessFlags::INDEX_READ),
    (AccessFlags::SHADER_READ, vk::AccessFlags::SHADER_READ),
    (AccessFlags::SHADER_WRITE, vk::AccessFlags::SHADER_WRITE),
    (
        AccessFlags::RENDER_TARGET_READ,
        vk::AccessFlags::COLOR_ATTACHMENT_READ,
    ),
    (
        AccessFlags::RENDER_TARGET_WRITE,
        vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
    ),
    (
        AccessFlags::DEPTH_STENCIL_READ,
        vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_READ,
    ),
    (
        AccessFlags::DEPTH_STENCIL_WRITE,
        vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE,
    ),
    (AccessFlags::TRANSFER_READ, vk::AccessFlags::TRANSFER_READ),
    (AccessFlags::TRANSFER_WRITE, vk::AccessFlags::TRANSFER_WRITE),
    (AccessFlags::MEMORY_READ, vk::AccessFlags::MEMORY_READ),
    (AccessFlags::MEMORY_WRITE, vk::AccessFlags::MEMORY_WRITE),
    (AccessFlags::HOST_READ, vk::AccessFlags::HOST_READ),
    (AccessFlags::HOST_WRITE, vk::AccessFlags::HOST_WRITE),
];

/// Convert stage flags to Vulkan pipeline stage flags.
pub fn convert_stage_flags(stages: StageFlags) -> vk::PipelineStageFlags {
    STAGE_TABLE
        .iter()
        .filter(|(ours, _)| stages.contains(*ours))
        .fold(vk::PipelineStageFlags::empty(), |acc, (_, vk_stage)| {
            acc | *vk_stage
        })
}

/// Convert the source stages of a barrier. Nothing to wait for becomes `TOP_OF_PIPE`.
pub fn convert_src_stage(stages: StageFlags) -> vk::PipelineStageFlags {
    if stages.is_empty() {
        vk::PipelineStageFlags::TOP_OF_PIPE
    } else {
        convert_stage_flags(stages)
    }
}

/// Convert the destination stages of a barrier. Nothing waiting becomes `BOTTOM_OF_PIPE`.
pub fn convert_dst_stage(stages: StageFlags) -> vk::PipelineStageFlags {
    if stages.is_empty() {
        vk::PipelineStageFlags::BOTTOM_OF_PIPE
    } else {
        convert_stage_flags(stages)
    }
}

/// Convert access flags to Vulkan access flags.
pub fn convert_access_flags(access: AccessFlags) -> vk::AccessFlags {
    ACCESS_TABLE
        .iter()
        .filter(|(ours, _)| access.contains(*ours))
        .fold(vk::AccessFlags::empty(), |acc, (_, vk_access)| acc | *vk_access)
}

/// Image layout an image must be in for a usage.
pub fn convert_image_layout(usage: ResourceUsage) -> vk::ImageLayout {
    match usage {
        ResourceUsage::Undefined => vk::ImageLayout::UNDEFINED,
        ResourceUsage::RenderTarget => vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        ResourceUsage::DepthStencilWrite => vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
        ResourceUsage::DepthStencilRead => vk::ImageLayout::DEPTH_STENCIL_READ_ONLY_OPTIMAL,
        ResourceUsage::ShaderResource => vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        ResourceUsage::TransferSource => vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
        ResourceUsage::TransferDestination => vk::ImageLayout::TRANSFER_DST_OPTIMAL,
        ResourceUsage::Present => vk::ImageLayout::PRESENT_SRC_KHR,
        // Buffer-only usages never describe an image; storage and generic
        // access share the general layout.
        ResourceUsage::UnorderedAccess
        | ResourceUsage::GenericRead
        | ResourceUsage::GenericWrite
        | ResourceUsage::VertexBuffer
        | ResourceUsage::IndexBuffer
        | ResourceUsage::ConstantBuffer
        | ResourceUsage::HostRead
        | ResourceUsage::HostWrite => vk::ImageLayout::GENERAL,
    }
}

/// Convert a format to a Vulkan format.
pub fn convert_format(format: Format) -> vk::Format {
    match format {
        // 8-bit formats
        Format::R8Unorm => vk::Format::R8_UNORM,
        Format::R8Uint => vk::Format::R8_UINT,

        // 16-bit formats
        Format::R16Float => vk::Format::R16_SFLOAT,
        Format::Rg8Unorm => vk::Format::R8G8_UNORM,

        // 32-bit formats
        Format::R32Float => vk::Format::R32_SFLOAT,
        Format::R32Uint => vk::Format::R32_UINT,
        Format::R32Sint => vk::Format::R32_SINT,
        Format::Rg16Float => vk::Format::R16G16_SFLOAT,
        Format::Rgba8Unorm => vk::Format::R8G8B8A8_UNORM,
        Format::Rgba8Snorm => vk::Format::R8G8B8A8_SNORM,
        Format::Rgba8Uint => vk::Format::R8G8B8A8_UINT,
        Format::Rgba8UnormSrgb => vk::Format::R8G8B8A8_SRGB,
        Format::Bgra8Unorm => vk::Format::B8G8R8A8_UNORM,
        Format::Bgra8UnormSrgb => vk::Format::B8G8R8A8_SRGB,
        Format::Rgb10a2Unorm => vk::Format::A2B10G10R10_UNORM_PACK32,

        // 64-bit formats
        Format::Rgba16Float => vk::Format::R16G16B16A16_SFLOAT,
        Format::Rg32Float => vk::Format::R32G32_SFLOAT,
        Format::Rg32Uint => vk::Format::R32G32_UINT,
        Format::Rg32Sint => vk::Format::R32G32_SINT,

        // 96-bit formats
        Format::Rgb32Float => vk::Format::R32G32B32_SFLOAT,
        Format::Rgb32Uint => vk::Format::R32G32B32_UINT,
        Format::Rgb32Sint => vk::Format::R32G32B32_SINT,

        // 128-bit formats
        Format::Rgba32Float => vk::Format::R32G32B32A32_SFLOAT,
        Format::Rgba32Uint => vk::Format::R32G32B32A32_UINT,
        Format::Rgba32Sint => vk::Format::R32G32B32A32_SINT,

        // Depth/stencil formats
        Format::Depth16Unorm => vk::Format::D16_UNORM,
        Format::Depth24UnormStencil8 => vk::Format::D24_UNORM_S8_UINT,
        Format::Depth32Float => vk::Format::D32_SFLOAT,
        Format::Depth32FloatStencil8 => vk::Format::D32_SFLOAT_S8_UINT,
    }
}

/// Image aspects covered by a format.
pub fn image_aspect(format: Format) -> vk::ImageAspectFlags {
    if format.has_stencil() {
        vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL
    } else if format.is_depth_stencil() {
        vk::ImageAspectFlags::DEPTH
    } else {
        vk::ImageAspectFlags::COLOR
    }
}

/// Convert a blend factor.
pub fn convert_blend_factor(factor: BlendFactor) -> vk::BlendFactor {
    match factor {
        BlendFactor::Zero => vk::BlendFactor::ZERO,
        BlendFactor::One => vk::BlendFactor::ONE,
        BlendFactor::Src => vk::BlendFactor::SRC_COLOR,
        BlendFactor::OneMinusSrc => vk::BlendFactor::ONE_MINUS_SRC_COLOR,
        BlendFactor::SrcAlpha => vk::BlendFactor::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => vk::BlendFactor::ONE_MINUS_SRC_ALPHA,
        BlendFactor::Dst => vk::BlendFactor::DST_COLOR,
        BlendFactor::OneMinusDst => vk::BlendFactor::ONE_MINUS_DST_COLOR,
        BlendFactor::DstAlpha => vk::BlendFactor::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => vk::BlendFactor::ONE_MINUS_DST_ALPHA,
        BlendFactor::SrcAlphaSaturated => vk::BlendFactor::SRC_ALPHA_SATURATE,
        BlendFactor::Constant => vk::BlendFactor::CONSTANT_COLOR,
        BlendFactor::OneMinusConstant => vk::BlendFactor::ONE_MINUS_CONSTANT_COLOR,
    }
}

/// Convert a blend operation.
pub fn convert_blend_operation(operation: BlendOperation) -> vk::BlendOp {
    match operation {
        BlendOperation::Add => vk::BlendOp::ADD,
        BlendOperation::Subtract => vk::BlendOp::SUBTRACT,
        BlendOperation::ReverseSubtract => vk::BlendOp::REVERSE_SUBTRACT,
        BlendOperation::Min => vk::BlendOp::MIN,
        BlendOperation::Max => vk::BlendOp::MAX,
    }
}

/// Convert a color write mask.
pub fn convert_color_writes(writes: ColorWrites) -> vk::ColorComponentFlags {
    let mut result = vk::ColorComponentFlags::empty();

    if writes.contains(ColorWrites::RED) {
        result |= vk::ColorComponentFlags::R;
    }
    if writes.contains(ColorWrites::GREEN) {
        result |= vk::ColorComponentFlags::G;
    }
    if writes.contains(ColorWrites::BLUE) {
        result |= vk::ColorComponentFlags::B;
    }
    if writes.contains(ColorWrites::ALPHA) {
        result |= vk::ColorComponentFlags::A;
    }

    result
}

/// Convert a blend descriptor to a color blend attachment state.
pub fn convert_blend_attachment(blend: &BlendDesc) -> vk::PipelineColorBlendAttachmentState {
    vk::PipelineColorBlendAttachmentState::default()
        .blend_enable(blend.enabled)
        .src_color_blend_factor(convert_blend_factor(blend.color.src_factor))
        .dst_color_blend_factor(convert_blend_factor(blend.color.dst_factor))
        .color_blend_op(convert_blend_operation(blend.color.operation))
        .src_alpha_blend_factor(convert_blend_factor(blend.alpha.src_factor))
        .dst_alpha_blend_factor(convert_blend_factor(blend.alpha.dst_factor))
        .alpha_blend_op(convert_blend_operation(blend.alpha.operation))
        .color_write_mask(convert_color_writes(blend.write_mask))
}

/// Convert a cull mode.
pub fn convert_cull_mode(mode: CullMode) -> vk::CullModeFlags {
    match mode {
        CullMode::None => vk::CullModeFlags::NONE,
        CullMode::Front => vk::CullModeFlags::FRONT,
        CullMode::Back => vk::CullModeFlags::BACK,
    }
}

/// Convert a fill mode.
pub fn convert_polygon_mode(mode: FillMode) -> vk::PolygonMode {
    match mode {
        FillMode::Fill => vk::PolygonMode::FILL,
        FillMode::Wireframe => vk::PolygonMode::LINE,
    }
}

/// Convert a front face winding.
pub fn convert_front_face(face: FrontFace) -> vk::FrontFace {
    match face {
        FrontFace::Clockwise => vk::FrontFace::CLOCKWISE,
        FrontFace::CounterClockwise => vk::FrontFace::COUNTER_CLOCKWISE,
    }
}

/// Convert a primitive topology.
pub fn convert_topology(topology: PrimitiveTopology) -> vk::PrimitiveTopology {
    match topology {
        PrimitiveTopology::PointList => vk::PrimitiveTopology::POINT_LIST,
        PrimitiveTopology::LineList => vk::PrimitiveTopology::LINE_LIST,
        PrimitiveTopology::LineStrip => vk::PrimitiveTopology::LINE_STRIP,
        PrimitiveTopology::TriangleList => vk::PrimitiveTopology::TRIANGLE_LIST,
        PrimitiveTopology::TriangleStrip => vk::PrimitiveTopology::TRIANGLE_STRIP,
    }
}

/// Convert an input classification to a vertex input rate.
pub fn convert_input_rate(classification: InputClassification) -> vk::VertexInputRate {
    match classification {
        InputClassification::PerVertex => vk::VertexInputRate::VERTEX,
        InputClassification::PerInstance => vk::VertexInputRate::INSTANCE,
    }
}

/// Convert a sample count. Unsupported counts fall back to one sample.
pub fn convert_sample_count(count: u32) -> vk::SampleCountFlags {
    match count {
        2 => vk::SampleCountFlags::TYPE_2,
        4 => vk::SampleCountFlags::TYPE_4,
        8 => vk::SampleCountFlags::TYPE_8,
        16 => vk::SampleCountFlags::TYPE_16,
        _ => vk::SampleCountFlags::TYPE_1,
    }
}
