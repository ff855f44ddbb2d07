//! Pipeline description.
//!
//! A [`PipelineDescription`] captures an entire graphics pipeline (shader
//! stages, rasterizer state, render target formats, blend state, input layout,
//! descriptor sets and multisampling) as one value. It is assembled with
//! [`PipelineDescriptionBuilder`], checked with
//! [`PipelineDescription::validate`] and turned into a native object with
//! [`PipelineDescription::realize`].

mod blend;
mod builder;
mod description;
mod input_layout;

pub use blend::{BlendComponent, BlendDesc};
pub use builder::PipelineDescriptionBuilder;
pub use description::{
    MAX_DESCRIPTOR_SETS, MAX_RENDER_TARGETS, PipelineDescription, RasterizerState, SampleDesc,
    SUPPORTED_SAMPLE_COUNTS, ShaderStages,
};
pub use input_layout::{InputClassification, InputLayout, InputLayoutElement, MAX_INPUT_ELEMENTS};
