//! Resource usage states.
//!
//! A [`ResourceUsage`] names the role a buffer or image plays at one point of
//! the command timeline. Every usage maps to a canonical stage/access pair,
//! which is what barrier computation transitions between.

use super::{AccessFlags, StageFlags};

/// The state a resource is in at a point in the timeline.
///
/// Exactly one usage describes a resource instance at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ResourceUsage {
    /// Contents undefined (first use after creation). Never a valid target.
    #[default]
    Undefined,
    /// Read as vertex buffer data.
    VertexBuffer,
    /// Read as index buffer data.
    IndexBuffer,
    /// Read as constant (uniform) buffer.
    ConstantBuffer,
    /// Read in a shader (sampled image or read-only structured buffer).
    ShaderResource,
    /// Read and written in a shader (storage image or buffer).
    UnorderedAccess,
    /// Written as color render target.
    RenderTarget,
    /// Written as depth/stencil target (depth test reads included).
    DepthStencilWrite,
    /// Read-only depth/stencil (depth test without writes).
    DepthStencilRead,
    /// Source of a copy operation.
    TransferSource,
    /// Destination of a copy operation.
    TransferDestination,
    /// Generic read by any command.
    GenericRead,
    /// Generic write by any command.
    GenericWrite,
    /// Handed to the presentation engine.
    Present,
    /// Read by the host through a mapping.
    HostRead,
    /// Written by the host through a mapping.
    HostWrite,
}

impl ResourceUsage {
    /// Every usage, in declaration order.
    pub const ALL: [ResourceUsage; 16] = [
        Self::Undefined,
        Self::VertexBuffer,
        Self::IndexBuffer,
        Self::ConstantBuffer,
        Self::ShaderResource,
        Self::UnorderedAccess,
        Self::RenderTarget,
        Self::DepthStencilWrite,
        Self::DepthStencilRead,
        Self::TransferSource,
        Self::TransferDestination,
        Self::GenericRead,
        Self::GenericWrite,
        Self::Present,
        Self::HostRead,
        Self::HostWrite,
    ];

    /// Canonical pipeline stages for this usage.
    ///
    /// Shader-bound usages report every shader stage here; barrier
    /// computation narrows them to the stages that declare the binding.
    pub fn stage(self) -> StageFlags {
        match self {
            Self::Undefined => StageFlags::ALL_COMMANDS,
            Self::VertexBuffer | Self::IndexBuffer => StageFlags::VERTEX_INPUT,
            Self::ConstantBuffer | Self::ShaderResource | Self::UnorderedAccess => {
                StageFlags::ALL_SHADERS
            }
            Self::RenderTarget => StageFlags::RENDER_TARGET,
            Self::DepthStencilWrite | Self::DepthStencilRead => StageFlags::PIXEL_TESTS,
            Self::TransferSource | Self::TransferDestination => StageFlags::TRANSFER,
            Self::GenericRead | Self::GenericWrite | Self::Present => StageFlags::ALL_COMMANDS,
            Self::HostRead | Self::HostWrite => StageFlags::HOST,
        }
    }

    /// Canonical access flags for this usage.
    pub fn access(self) -> AccessFlags {
        match self {
            Self::Undefined | Self::Present => AccessFlags::empty(),
            Self::VertexBuffer => AccessFlags::VERTEX_READ,
            Self::IndexBuffer => AccessFlags::INDEX_READ,
            Self::ConstantBuffer | Self::ShaderResource => AccessFlags::SHADER_READ,
            Self::UnorderedAccess => AccessFlags::SHADER_READ | AccessFlags::SHADER_WRITE,
            Self::RenderTarget => AccessFlags::RENDER_TARGET_WRITE,
            Self::DepthStencilWrite => {
                AccessFlags::DEPTH_STENCIL_READ | AccessFlags::DEPTH_STENCIL_WRITE
            }
            Self::DepthStencilRead => AccessFlags::DEPTH_STENCIL_READ,
            Self::TransferSource => AccessFlags::TRANSFER_READ,
            Self::TransferDestination => AccessFlags::TRANSFER_WRITE,
            Self::GenericRead => AccessFlags::MEMORY_READ,
            Self::GenericWrite => AccessFlags::MEMORY_WRITE,
            Self::HostRead => AccessFlags::HOST_READ,
            Self::HostWrite => AccessFlags::HOST_WRITE,
        }
    }

    /// Canonical (stage, access) pair for this usage.
    pub fn canonical_scope(self) -> (StageFlags, AccessFlags) {
        (self.stage(), self.access())
    }

    /// Check if the stage of this usage depends on which shaders bind the resource.
    pub fn is_shader_bound(self) -> bool {
        matches!(
            self,
            Self::ConstantBuffer | Self::ShaderResource | Self::UnorderedAccess
        )
    }

    /// Check if this usage writes the resource.
    pub fn is_write(self) -> bool {
        self.access().is_write()
    }

    /// Check if this usage reads the resource.
    pub fn is_read(self) -> bool {
        !self.access().difference(AccessFlags::WRITES).is_empty()
    }

    /// Check if this usage belongs to the host timeline.
    pub fn is_host(self) -> bool {
        matches!(self, Self::HostRead | Self::HostWrite)
    }
}
