//! Descriptor binding model.
//!
//! A [`DescriptorSet`] groups the shader-visible resources bound together at
//! draw time. Each [`DescriptorBinding`] pairs a [`DescriptorKind`] with a
//! [`DescriptorResource`] whose variant must agree with the kind, so reading
//! the wrong variant is a checked error rather than a reinterpretation.
//!
//! # Example
//!
//! ```ignore
//! let mut set = DescriptorSet::new().with_label("per_frame");
//! set.add_binding(DescriptorBinding::constant_buffer(0, &camera_buffer))?;
//! set.add_binding(
//!     DescriptorBinding::shader_resource_image(1, &albedo)
//!         .with_visibility(ShaderStageFlags::FRAGMENT),
//! )?;
//! set.add_binding(DescriptorBinding::sampler(2, &linear_sampler))?;
//! ```

mod binding;
mod set;

pub use binding::{DescriptorBinding, DescriptorKind, DescriptorResource};
pub use set::{DescriptorSet, MAX_BINDINGS_PER_SET};
