//! Value types shared across the pipeline state model.
//!
//! This module contains stage/access flags, resource usages, formats and
//! fixed-function state enums. Everything else is built from these.

mod flags;
mod format;
mod stage;
mod state;
mod usage;

pub use flags::{AccessFlags, ColorWrites, StageFlags};
pub use format::Format;
pub use stage::{ShaderStage, ShaderStageFlags};
pub use state::{BlendFactor, BlendOperation, CullMode, FillMode, FrontFace, PrimitiveTopology};
pub use usage::ResourceUsage;
