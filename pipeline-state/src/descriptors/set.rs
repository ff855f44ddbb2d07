//! Bounded descriptor sets.

use arrayvec::ArrayVec;

use super::DescriptorBinding;
use crate::barrier::UsageScope;
use crate::error::PipelineStateError;
use crate::types::ShaderStageFlags;

/// Maximum number of bindings in one descriptor set.
pub const MAX_BINDINGS_PER_SET: usize = 16;

/// An ordered group of bindings bound together at draw time.
///
/// Binding indices are unique. The capacity matches the backend limit and is
/// enforced on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DescriptorSet {
    bindings: ArrayVec<DescriptorBinding, MAX_BINDINGS_PER_SET>,
    label: Option<String>,
}

impl DescriptorSet {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Add a binding.
    ///
    /// On failure the set is left unchanged.
    pub fn add_binding(&mut self, binding: DescriptorBinding) -> Result<(), PipelineStateError> {
        if self.binding(binding.binding).is_some() {
            return Err(PipelineStateError::DuplicateBindingIndex {
                binding: binding.binding,
            });
        }
        if self.bindings.is_full() {
            return Err(PipelineStateError::CapacityExceeded {
                container: "descriptor set",
                capacity: MAX_BINDINGS_PER_SET,
            });
        }
        binding.check_shape()?;

        self.bindings.push(binding);
        Ok(())
    }

    /// Add a binding, builder style.
    pub fn with_binding(mut self, binding: DescriptorBinding) -> Result<Self, PipelineStateError> {
        self.add_binding(binding)?;
        Ok(self)
    }

    /// Remove the binding with the given index, returning it.
    pub fn remove_binding(&mut self, index: u32) -> Option<DescriptorBinding> {
        let position = self.bindings.iter().position(|b| b.binding == index)?;
        Some(self.bindings.remove(position))
    }

    /// Re-check every invariant, reporting the first violation in binding order.
    ///
    /// This catches references that expired after insertion and bindings
    /// mutated through [`DescriptorSet::iter_mut`].
    pub fn validate(&self) -> Result<(), PipelineStateError> {
        for (position, binding) in self.bindings.iter().enumerate() {
            if self.bindings[..position]
                .iter()
                .any(|earlier| earlier.binding == binding.binding)
            {
                return Err(PipelineStateError::DuplicateBindingIndex {
                    binding: binding.binding,
                });
            }
            binding.check_shape()?;
            if !binding.resource.is_alive() {
                return Err(PipelineStateError::DanglingResourceReference {
                    binding: binding.binding,
                });
            }
        }
        Ok(())
    }

    /// Get the binding with the given index.
    pub fn binding(&self, index: u32) -> Option<&DescriptorBinding> {
        self.bindings.iter().find(|b| b.binding == index)
    }

    /// Shader stages that declare the binding with the given index.
    pub fn stages_for(&self, index: u32) -> Option<ShaderStageFlags> {
        self.binding(index).map(|b| b.visibility)
    }

    /// Usage scope of the resource at the given binding index.
    pub fn usage_scope_for(&self, index: u32) -> Option<UsageScope> {
        self.binding(index).and_then(DescriptorBinding::usage_scope)
    }

    /// Iterate over bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DescriptorBinding> {
        self.bindings.iter()
    }

    /// Iterate mutably over bindings. Call [`DescriptorSet::validate`] afterwards.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DescriptorBinding> {
        self.bindings.iter_mut()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the set has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a DescriptorBinding;
    type IntoIter = std::slice::Iter<'a, DescriptorBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
