//! Vertex input layout.
//!
//! An input layout describes how vertex buffer data feeds the vertex shader.
//! Each element names a shader semantic and says which buffer slot it reads
//! from, at which byte offset and in which format.
//!
//! # Buffer Slots
//!
//! Elements sharing a slot read from the same buffer. Within a slot offsets
//! must be declared in strictly increasing order and the byte ranges
//! `[offset, offset + format size)` must not overlap. A slot is stepped either
//! per vertex or per instance, never both.
//!
//! # Example
//!
//! ```ignore
//! // Slot 0: interleaved position + normal, slot 1: per-instance transform row.
//! let layout = InputLayout::new()
//!     .with_element(InputLayoutElement::per_vertex("POSITION", Format::Rgb32Float, 0, 0))?
//!     .with_element(InputLayoutElement::per_vertex("NORMAL", Format::Rgb32Float, 0, 12))?
//!     .with_element(InputLayoutElement::per_instance("INSTANCE", Format::Rgba32Float, 1, 0))?;
//! ```

use std::borrow::Cow;

use arrayvec::ArrayVec;

use crate::error::PipelineStateError;
use crate::types::Format;

/// Maximum number of input layout elements.
pub const MAX_INPUT_ELEMENTS: usize = 8;

/// How often a buffer slot advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputClassification {
    /// Advance once per vertex.
    #[default]
    PerVertex,
    /// Advance once per instance.
    PerInstance,
}

/// One attribute read by the vertex shader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputLayoutElement {
    /// Shader semantic name.
    pub semantic: Cow<'static, str>,
    /// Semantic index, for semantics that appear more than once (TEXCOORD0, TEXCOORD1).
    pub semantic_index: u32,
    /// Attribute format.
    pub format: Format,
    /// Vertex buffer slot.
    pub slot: u32,
    /// Byte offset within the slot's element.
    pub offset: u32,
    /// Step rate of the slot.
    pub classification: InputClassification,
}

impl InputLayoutElement {
    /// Create a per-vertex element with semantic index 0.
    pub fn per_vertex(
        semantic: impl Into<Cow<'static, str>>,
        format: Format,
        slot: u32,
        offset: u32,
    ) -> Self {
        Self {
            semantic: semantic.into(),
            semantic_index: 0,
            format,
            slot,
            offset,
            classification: InputClassification::PerVertex,
        }
    }

    /// Create a per-instance element with semantic index 0.
    pub fn per_instance(
        semantic: impl Into<Cow<'static, str>>,
        format: Format,
        slot: u32,
        offset: u32,
    ) -> Self {
        Self {
            classification: InputClassification::PerInstance,
            ..Self::per_vertex(semantic, format, slot, offset)
        }
    }

    /// Set the semantic index.
    pub fn with_semantic_index(mut self, semantic_index: u32) -> Self {
        self.semantic_index = semantic_index;
        self
    }

    /// One past the last byte this element reads.
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.format.size_bytes())
    }
}

/// Ordered, bounded list of input elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InputLayout {
    elements: ArrayVec<InputLayoutElement, MAX_INPUT_ELEMENTS>,
}

impl InputLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element.
    pub fn push(&mut self, element: InputLayoutElement) -> Result<(), PipelineStateError> {
        self.elements
            .try_push(element)
            .map_err(|_| PipelineStateError::CapacityExceeded {
                container: "input layout",
                capacity: MAX_INPUT_ELEMENTS,
            })
    }

    /// Append an element, builder style.
    pub fn with_element(mut self, element: InputLayoutElement) -> Result<Self, PipelineStateError> {
        self.push(element)?;
        Ok(self)
    }

    /// Get the elements in declaration order.
    pub fn elements(&self) -> &[InputLayoutElement] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the layout has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Stride of a slot, the end of its last element. Zero for unused slots.
    pub fn stride(&self, slot: u32) -> u32 {
        self.elements
            .iter()
            .filter(|e| e.slot == slot)
            .map(InputLayoutElement::end)
            .max()
            .unwrap_or(0)
    }

    /// Check element formats, semantics and per-slot ordering.
    pub fn validate(&self) -> Result<(), PipelineStateError> {
        for (position, element) in self.elements.iter().enumerate() {
            if element.semantic.is_empty() {
                return Err(PipelineStateError::InvalidInputLayout(format!(
                    "element {position} has an empty semantic name"
                )));
            }
            if !element.format.is_vertex_format() {
                return Err(PipelineStateError::InvalidInputLayout(format!(
                    "element {position} ({}) uses {:?}, which is not a vertex format",
                    element.semantic, element.format
                )));
            }

            let earlier = &self.elements[..position];

            if earlier.iter().any(|e| {
                e.semantic == element.semantic && e.semantic_index == element.semantic_index
            }) {
                return Err(PipelineStateError::InvalidInputLayout(format!(
                    "semantic {}{} is declared twice",
                    element.semantic, element.semantic_index
                )));
            }

            // Elements of one slot are declared in offset order, so the last
            // earlier element of the slot is the only one that can overlap.
            if let Some(previous) = earlier.iter().rev().find(|e| e.slot == element.slot) {
                if previous.classification != element.classification {
                    return Err(PipelineStateError::InvalidInputLayout(format!(
                        "slot {} mixes per-vertex and per-instance elements",
                        element.slot
                    )));
                }
                if element.offset <= previous.offset {
                    return Err(PipelineStateError::InvalidInputLayout(format!(
                        "element {position} ({}) offset {} is not after offset {} in slot {}",
                        element.semantic, element.offset, previous.offset, element.slot
                    )));
                }
                if element.offset < previous.end() {
                    return Err(PipelineStateError::InvalidInputLayout(format!(
                        "element {position} ({}) at offset {} overlaps bytes {}..{} in slot {}",
                        element.semantic,
                        element.offset,
                        previous.offset,
                        previous.end(),
                        element.slot
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_normal() -> InputLayout {
        InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("POSITION", Format::Rgb32Float, 0, 0))
            .unwrap()
            .with_element(InputLayoutElement::per_vertex("NORMAL", Format::Rgb32Float, 0, 12))
            .unwrap()
    }

    #[test]
    fn test_valid_layout() {
        let layout = position_normal()
            .with_element(InputLayoutElement::per_instance(
                "INSTANCE",
                Format::Rgba32Float,
                1,
                0,
            ))
            .unwrap();

        assert!(layout.validate().is_ok());
        assert_eq!(layout.stride(0), 24);
        assert_eq!(layout.stride(1), 16);
        assert_eq!(layout.stride(2), 0);
    }

    #[test]
    fn test_overlap_rejected() {
        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("POSITION", Format::Rgb32Float, 0, 0))
            .unwrap()
            .with_element(InputLayoutElement::per_vertex("NORMAL", Format::Rgb32Float, 0, 8))
            .unwrap();

        assert!(matches!(
            layout.validate(),
            Err(PipelineStateError::InvalidInputLayout(_))
        ));
    }

    #[test]
    fn test_decreasing_offset_rejected() {
        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("NORMAL", Format::Rgb32Float, 0, 12))
            .unwrap()
            .with_element(InputLayoutElement::per_vertex("POSITION", Format::Rgb32Float, 0, 0))
            .unwrap();

        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_same_offset_on_different_slots() {
        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("POSITION", Format::Rgb32Float, 0, 0))
            .unwrap()
            .with_element(InputLayoutElement::per_vertex("TEXCOORD", Format::Rg32Float, 1, 0))
            .unwrap();

        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_depth_format_rejected() {
        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("DEPTH", Format::Depth32Float, 0, 0))
            .unwrap();
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_mixed_classification_rejected() {
        let layout = position_normal()
            .with_element(InputLayoutElement::per_instance("COLOR", Format::Rgba8Unorm, 0, 24))
            .unwrap();
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_duplicate_semantic() {
        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("TEXCOORD", Format::Rg32Float, 0, 0))
            .unwrap()
            .with_element(InputLayoutElement::per_vertex("TEXCOORD", Format::Rg32Float, 0, 8))
            .unwrap();
        assert!(layout.validate().is_err());

        let layout = InputLayout::new()
            .with_element(InputLayoutElement::per_vertex("TEXCOORD", Format::Rg32Float, 0, 0))
            .unwrap()
            .with_element(
                InputLayoutElement::per_vertex("TEXCOORD", Format::Rg32Float, 0, 8)
                    .with_semantic_index(1),
            )
            .unwrap();
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_capacity() {
        let mut layout = InputLayout::new();
        for i in 0..MAX_INPUT_ELEMENTS as u32 {
            layout
                .push(InputLayoutElement::per_vertex("ATTR", Format::R32Float, i, 0))
                .unwrap();
        }
        let err = layout
            .push(InputLayoutElement::per_vertex("ATTR", Format::R32Float, 9, 0))
            .unwrap_err();
        assert_eq!(
            err,
            PipelineStateError::CapacityExceeded {
                container: "input layout",
                capacity: 8
            }
        );
    }
}
