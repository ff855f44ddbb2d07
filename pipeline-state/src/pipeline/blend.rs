//! Per-render-target blend state.

use crate::types::{BlendFactor, BlendOperation, ColorWrites};

/// Blend component configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponent {
    /// Source factor.
    pub src_factor: BlendFactor,
    /// Destination factor.
    pub dst_factor: BlendFactor,
    /// Blend operation.
    pub operation: BlendOperation,
}

impl Default for BlendComponent {
    fn default() -> Self {
        Self::REPLACE
    }
}

impl BlendComponent {
    /// Source replaces destination.
    pub const REPLACE: Self = Self {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
        operation: BlendOperation::Add,
    };

    /// Create an over blending component (standard alpha blending).
    pub fn over() -> Self {
        Self {
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        }
    }

    /// Create a premultiplied alpha blending component.
    pub fn premultiplied() -> Self {
        Self {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        }
    }

    /// Create an additive blending component.
    pub fn additive() -> Self {
        Self {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::One,
            operation: BlendOperation::Add,
        }
    }

    /// Check if any factor reads the constant blend color.
    pub fn uses_constant(&self) -> bool {
        [self.src_factor, self.dst_factor]
            .iter()
            .any(|f| matches!(f, BlendFactor::Constant | BlendFactor::OneMinusConstant))
    }
}

/// Blend configuration of one render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendDesc {
    /// Whether blending is enabled. When disabled the components are ignored.
    pub enabled: bool,
    /// Color blend component.
    pub color: BlendComponent,
    /// Alpha blend component.
    pub alpha: BlendComponent,
    /// Channels written to the target.
    pub write_mask: ColorWrites,
}

impl Default for BlendDesc {
    fn default() -> Self {
        Self::opaque()
    }
}

impl BlendDesc {
    /// Blending disabled, all channels written.
    pub fn opaque() -> Self {
        Self {
            enabled: false,
            color: BlendComponent::REPLACE,
            alpha: BlendComponent::REPLACE,
            write_mask: ColorWrites::ALL,
        }
    }

    /// Standard alpha blending (src over dst).
    pub fn alpha_blending() -> Self {
        Self {
            enabled: true,
            color: BlendComponent::over(),
            alpha: BlendComponent::over(),
            write_mask: ColorWrites::ALL,
        }
    }

    /// Premultiplied alpha blending.
    pub fn premultiplied_alpha() -> Self {
        Self {
            enabled: true,
            color: BlendComponent::premultiplied(),
            alpha: BlendComponent::premultiplied(),
            write_mask: ColorWrites::ALL,
        }
    }

    /// Additive blending.
    pub fn additive() -> Self {
        Self {
            enabled: true,
            color: BlendComponent::additive(),
            alpha: BlendComponent::additive(),
            write_mask: ColorWrites::ALL,
        }
    }

    /// Set the color write mask.
    pub fn with_write_mask(mut self, write_mask: ColorWrites) -> Self {
        self.write_mask = write_mask;
        self
    }

    /// Check if this is the default (opaque) descriptor.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_opaque() {
        let blend = BlendDesc::default();
        assert!(!blend.enabled);
        assert_eq!(blend.write_mask, ColorWrites::ALL);
        assert!(blend.is_default());
    }

    #[test]
    fn test_presets() {
        let alpha = BlendDesc::alpha_blending();
        assert!(alpha.enabled);
        assert_eq!(alpha.color.src_factor, BlendFactor::SrcAlpha);
        assert_eq!(alpha.color.dst_factor, BlendFactor::OneMinusSrcAlpha);

        let premul = BlendDesc::premultiplied_alpha();
        assert_eq!(premul.color.src_factor, BlendFactor::One);

        let additive = BlendDesc::additive();
        assert_eq!(additive.alpha.dst_factor, BlendFactor::One);
        assert!(!additive.is_default());
    }

    #[test]
    fn test_write_mask() {
        let blend = BlendDesc::opaque().with_write_mask(ColorWrites::RED | ColorWrites::GREEN);
        assert!(!blend.write_mask.contains(ColorWrites::ALPHA));
        assert!(!blend.is_default());
    }

    #[test]
    fn test_uses_constant() {
        let mut component = BlendComponent::over();
        assert!(!component.uses_constant());
        component.dst_factor = BlendFactor::OneMinusConstant;
        assert!(component.uses_constant());
    }
}
