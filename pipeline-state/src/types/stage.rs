//! Shader stage identification.

use bitflags::bitflags;

/// Programmable stage a shader module was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment (pixel) shader.
    Fragment,
    /// Hull (tessellation control) shader.
    Hull,
    /// Domain (tessellation evaluation) shader.
    Domain,
    /// Geometry shader.
    Geometry,
    /// Tessellation shader.
    Tessellation,
    /// Compute shader.
    Compute,
}

impl ShaderStage {
    /// Get the visibility flag for this stage.
    pub fn flag(self) -> ShaderStageFlags {
        match self {
            Self::Vertex => ShaderStageFlags::VERTEX,
            Self::Fragment => ShaderStageFlags::FRAGMENT,
            Self::Hull => ShaderStageFlags::HULL,
            Self::Domain => ShaderStageFlags::DOMAIN,
            Self::Geometry => ShaderStageFlags::GEOMETRY,
            Self::Tessellation => ShaderStageFlags::TESSELLATION,
            Self::Compute => ShaderStageFlags::COMPUTE,
        }
    }
}

bitflags! {
    /// Shader stages that can access a binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        /// Vertex shader stage.
        const VERTEX = 1 << 0;
        /// Fragment shader stage.
        const FRAGMENT = 1 << 1;
        /// Compute shader stage.
        const COMPUTE = 1 << 2;
        /// Hull shader stage.
        const HULL = 1 << 3;
        /// Domain shader stage.
        const DOMAIN = 1 << 4;
        /// Geometry shader stage.
        const GEOMETRY = 1 << 5;
        /// Tessellation shader stage.
        const TESSELLATION = 1 << 6;
    }
}

impl ShaderStageFlags {
    /// Stages of a classic vertex + fragment pipeline.
    pub const GRAPHICS: Self = Self::VERTEX.union(Self::FRAGMENT);
}

impl Default for ShaderStageFlags {
    fn default() -> Self {
        Self::GRAPHICS
    }
}
