//! Single descriptor bindings.

use std::sync::Arc;

use crate::barrier::UsageScope;
use crate::error::PipelineStateError;
use crate::handle::{
    BufferHandle, BufferResource, ImageHandle, ImageResource, SamplerHandle, SamplerResource,
};
use crate::types::{ResourceUsage, ShaderStageFlags};

/// Kind of resource a shader expects at a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Texture sampler.
    Sampler,

    /// Read-only shader resource (sampled image or structured buffer).
    ShaderResource,

    /// Constant (uniform) buffer.
    ConstantBuffer,

    /// Read-write image.
    UnorderedAccessImage,

    /// Read-write buffer.
    UnorderedAccessBuffer,

    /// Small block of data pushed inline with the draw.
    PushConstant,
}

impl DescriptorKind {
    /// Check if the resource variant is legal for this kind.
    pub fn accepts(self, resource: &DescriptorResource) -> bool {
        matches!(
            (self, resource),
            (Self::Sampler, DescriptorResource::Sampler(_))
                | (Self::ShaderResource, DescriptorResource::Image(_))
                | (Self::ShaderResource, DescriptorResource::Buffer(_))
                | (Self::ConstantBuffer, DescriptorResource::Buffer(_))
                | (Self::UnorderedAccessImage, DescriptorResource::Image(_))
                | (Self::UnorderedAccessBuffer, DescriptorResource::Buffer(_))
                | (Self::PushConstant, DescriptorResource::Inline { .. })
        )
    }

    /// Usage a resource bound with this kind is in while shaders run.
    ///
    /// Samplers and push constants have no tracked memory and return `None`.
    pub fn usage(self) -> Option<ResourceUsage> {
        match self {
            Self::Sampler | Self::PushConstant => None,
            Self::ShaderResource => Some(ResourceUsage::ShaderResource),
            Self::ConstantBuffer => Some(ResourceUsage::ConstantBuffer),
            Self::UnorderedAccessImage | Self::UnorderedAccessBuffer => {
                Some(ResourceUsage::UnorderedAccess)
            }
        }
    }
}

/// The resource referenced by a binding.
///
/// The variant must agree with the binding's [`DescriptorKind`]; see
/// [`DescriptorKind::accepts`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DescriptorResource {
    /// A sampler object.
    Sampler(SamplerHandle),

    /// A buffer.
    Buffer(BufferHandle),

    /// An image.
    Image(ImageHandle),

    /// Inline data of the given size in bytes.
    Inline { size: u32 },
}

impl DescriptorResource {
    /// Name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Sampler(_) => "sampler",
            Self::Buffer(_) => "buffer",
            Self::Image(_) => "image",
            Self::Inline { .. } => "inline block",
        }
    }

    /// Check if the referenced object still exists. Inline data always does.
    pub fn is_alive(&self) -> bool {
        match self {
            Self::Sampler(handle) => handle.is_alive(),
            Self::Buffer(handle) => handle.is_alive(),
            Self::Image(handle) => handle.is_alive(),
            Self::Inline { .. } => true,
        }
    }
}

/// One binding slot of a descriptor set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorBinding {
    /// Binding index within the set.
    pub binding: u32,

    /// Kind of resource expected at this binding.
    pub kind: DescriptorKind,

    /// Shader stages that can access this binding.
    pub visibility: ShaderStageFlags,

    /// Number of array elements (at least 1).
    pub array_size: u32,

    /// The referenced resource.
    pub resource: DescriptorResource,
}

impl DescriptorBinding {
    /// Create a binding. Visibility defaults to vertex + fragment, array size to 1.
    pub fn new(binding: u32, kind: DescriptorKind, resource: DescriptorResource) -> Self {
        Self {
            binding,
            kind,
            visibility: ShaderStageFlags::GRAPHICS,
            array_size: 1,
            resource,
        }
    }

    /// Sampler binding.
    pub fn sampler<S: SamplerResource + 'static>(binding: u32, sampler: &Arc<S>) -> Self {
        Self::new(
            binding,
            DescriptorKind::Sampler,
            DescriptorResource::Sampler(SamplerHandle::sampler(sampler)),
        )
    }

    /// Read-only image binding.
    pub fn shader_resource_image<I: ImageResource + 'static>(binding: u32, image: &Arc<I>) -> Self {
        Self::new(
            binding,
            DescriptorKind::ShaderResource,
            DescriptorResource::Image(ImageHandle::image(image)),
        )
    }

    /// Read-only buffer binding.
    pub fn shader_resource_buffer<B: BufferResource + 'static>(
        binding: u32,
        buffer: &Arc<B>,
    ) -> Self {
        Self::new(
            binding,
            DescriptorKind::ShaderResource,
            DescriptorResource::Buffer(BufferHandle::buffer(buffer)),
        )
    }

    /// Constant buffer binding.
    pub fn constant_buffer<B: BufferResource + 'static>(binding: u32, buffer: &Arc<B>) -> Self {
        Self::new(
            binding,
            DescriptorKind::ConstantBuffer,
            DescriptorResource::Buffer(BufferHandle::buffer(buffer)),
        )
    }

    /// Read-write image binding.
    pub fn storage_image<I: ImageResource + 'static>(binding: u32, image: &Arc<I>) -> Self {
        Self::new(
            binding,
            DescriptorKind::UnorderedAccessImage,
            DescriptorResource::Image(ImageHandle::image(image)),
        )
    }

    /// Read-write buffer binding.
    pub fn storage_buffer<B: BufferResource + 'static>(binding: u32, buffer: &Arc<B>) -> Self {
        Self::new(
            binding,
            DescriptorKind::UnorderedAccessBuffer,
            DescriptorResource::Buffer(BufferHandle::buffer(buffer)),
        )
    }

    /// Push constant block of `size` bytes.
    pub fn push_constant(binding: u32, size: u32) -> Self {
        Self::new(
            binding,
            DescriptorKind::PushConstant,
            DescriptorResource::Inline { size },
        )
    }

    /// Set the shader stage visibility.
    pub fn with_visibility(mut self, visibility: ShaderStageFlags) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the array size.
    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    /// Usage and stages the bound resource is in while the pipeline runs.
    ///
    /// Feed this to a barrier computation before the draw. `None` for
    /// samplers and push constants.
    pub fn usage_scope(&self) -> Option<UsageScope> {
        self.kind
            .usage()
            .map(|usage| UsageScope::new(usage, self.visibility))
    }

    /// Check kind/resource agreement and array size.
    pub(crate) fn check_shape(&self) -> Result<(), PipelineStateError> {
        if !self.kind.accepts(&self.resource) {
            return Err(PipelineStateError::KindMismatch {
                binding: self.binding,
                kind: self.kind,
                resource: self.resource.variant_name(),
            });
        }
        if self.array_size == 0 {
            return Err(PipelineStateError::InvalidArraySize {
                binding: self.binding,
            });
        }
        Ok(())
    }
}
