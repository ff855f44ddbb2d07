//! Element formats for render targets, depth buffers and vertex inputs.

/// Format enumeration shared by render targets, depth/stencil targets and
/// input layout elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Format {
    // 8-bit formats
    /// 8-bit red channel, unsigned normalized.
    R8Unorm,
    /// 8-bit red channel, unsigned integer.
    R8Uint,

    // 16-bit formats
    /// 16-bit red channel, float.
    R16Float,
    /// 8-bit RG channels, unsigned normalized.
    Rg8Unorm,

    // 32-bit formats
    /// 32-bit red channel, float.
    R32Float,
    /// 32-bit red channel, unsigned integer.
    R32Uint,
    /// 32-bit red channel, signed integer.
    R32Sint,
    /// 16-bit RG channels, float.
    Rg16Float,
    /// 8-bit RGBA channels, unsigned normalized.
    Rgba8Unorm,
    /// 8-bit RGBA channels, signed normalized.
    Rgba8Snorm,
    /// 8-bit RGBA channels, unsigned integer.
    Rgba8Uint,
    /// 8-bit RGBA channels, sRGB.
    Rgba8UnormSrgb,
    /// 8-bit BGRA channels, unsigned normalized.
    Bgra8Unorm,
    /// 8-bit BGRA channels, sRGB.
    Bgra8UnormSrgb,
    /// 10-bit RGB with 2-bit alpha, unsigned normalized.
    Rgb10a2Unorm,

    // 64-bit formats
    /// 16-bit RGBA channels, float.
    Rgba16Float,
    /// 32-bit RG channels, float.
    Rg32Float,
    /// 32-bit RG channels, unsigned integer.
    Rg32Uint,
    /// 32-bit RG channels, signed integer.
    Rg32Sint,

    // 96-bit formats (vertex input only)
    /// 32-bit RGB channels, float.
    Rgb32Float,
    /// 32-bit RGB channels, unsigned integer.
    Rgb32Uint,
    /// 32-bit RGB channels, signed integer.
    Rgb32Sint,

    // 128-bit formats
    /// 32-bit RGBA channels, float.
    Rgba32Float,
    /// 32-bit RGBA channels, unsigned integer.
    Rgba32Uint,
    /// 32-bit RGBA channels, signed integer.
    Rgba32Sint,

    // Depth/stencil formats
    /// 16-bit depth.
    Depth16Unorm,
    /// 24-bit depth with 8-bit stencil.
    Depth24UnormStencil8,
    /// 32-bit depth, float.
    Depth32Float,
    /// 32-bit depth float with 8-bit stencil.
    Depth32FloatStencil8,
}

impl Format {
    /// Size in bytes of one element (texel or vertex attribute).
    pub fn size_bytes(self) -> u32 {
        match self {
            Self::R8Unorm | Self::R8Uint => 1,
            Self::R16Float | Self::Rg8Unorm | Self::Depth16Unorm => 2,
            Self::R32Float
            | Self::R32Uint
            | Self::R32Sint
            | Self::Rg16Float
            | Self::Rgba8Unorm
            | Self::Rgba8Snorm
            | Self::Rgba8Uint
            | Self::Rgba8UnormSrgb
            | Self::Bgra8Unorm
            | Self::Bgra8UnormSrgb
            | Self::Rgb10a2Unorm
            | Self::Depth24UnormStencil8
            | Self::Depth32Float => 4,
            Self::Rgba16Float
            | Self::Rg32Float
            | Self::Rg32Uint
            | Self::Rg32Sint
            | Self::Depth32FloatStencil8 => 8,
            Self::Rgb32Float | Self::Rgb32Uint | Self::Rgb32Sint => 12,
            Self::Rgba32Float | Self::Rgba32Uint | Self::Rgba32Sint => 16,
        }
    }

    /// Check if this is a depth or depth/stencil format.
    pub fn is_depth_stencil(self) -> bool {
        matches!(
            self,
            Self::Depth16Unorm
                | Self::Depth24UnormStencil8
                | Self::Depth32Float
                | Self::Depth32FloatStencil8
        )
    }

    /// Check if this format carries a stencil component.
    pub fn has_stencil(self) -> bool {
        matches!(self, Self::Depth24UnormStencil8 | Self::Depth32FloatStencil8)
    }

    /// Check if this format uses sRGB encoding.
    pub fn is_srgb(self) -> bool {
        matches!(self, Self::Rgba8UnormSrgb | Self::Bgra8UnormSrgb)
    }

    /// Check if this format can be bound as a color render target.
    pub fn is_color_renderable(self) -> bool {
        !self.is_depth_stencil()
            && !matches!(self, Self::Rgb32Float | Self::Rgb32Uint | Self::Rgb32Sint)
    }

    /// Check if this format can describe a vertex attribute.
    pub fn is_vertex_format(self) -> bool {
        !self.is_depth_stencil() && !self.is_srgb()
    }
}
