//! Common test utilities for pipeline state integration tests.
//!
//! Provides stand-in shader/resource objects and a fixture that keeps them
//! alive for the duration of a test.

#![allow(dead_code)]

use std::sync::Arc;

use redlilium_pipeline_state::{
    BufferResource, Format, ImageResource, PipelineDescription, PipelineDescriptionBuilder,
    SamplerResource, ShaderHandle, ShaderModule, ShaderStage,
};

/// Initialize logging for test output.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// A compiled shader stand-in.
#[derive(Debug)]
pub struct TestShader {
    pub stage: ShaderStage,
    pub name: &'static str,
}

impl ShaderModule for TestShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn label(&self) -> Option<&str> {
        Some(self.name)
    }
}

/// A buffer stand-in.
#[derive(Debug)]
pub struct TestBuffer {
    pub size: u64,
}

impl BufferResource for TestBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}

/// An image stand-in.
#[derive(Debug)]
pub struct TestImage;

impl ImageResource for TestImage {}

/// A sampler stand-in.
#[derive(Debug)]
pub struct TestSampler;

impl SamplerResource for TestSampler {}

/// Owns every object a test description references.
pub struct Fixture {
    pub vertex: Arc<TestShader>,
    pub fragment: Arc<TestShader>,
    pub hull: Arc<TestShader>,
    pub domain: Arc<TestShader>,
    pub buffer: Arc<TestBuffer>,
    pub image: Arc<TestImage>,
    pub sampler: Arc<TestSampler>,
}

impl Fixture {
    pub fn new() -> Self {
        init_logging();
        Self {
            vertex: shader(ShaderStage::Vertex, "test_vs"),
            fragment: shader(ShaderStage::Fragment, "test_fs"),
            hull: shader(ShaderStage::Hull, "test_hs"),
            domain: shader(ShaderStage::Domain, "test_ds"),
            buffer: Arc::new(TestBuffer { size: 256 }),
            image: Arc::new(TestImage),
            sampler: Arc::new(TestSampler),
        }
    }

    /// Builder with vertex + fragment shaders and nothing else.
    pub fn shaders_only(&self) -> PipelineDescriptionBuilder {
        PipelineDescription::builder()
            .with_vertex_shader(ShaderHandle::shader(&self.vertex))
            .with_fragment_shader(ShaderHandle::shader(&self.fragment))
    }

    /// Minimally complete description: two shaders and one render target.
    pub fn minimal(&self) -> PipelineDescription {
        self.shaders_only()
            .with_render_target(Format::Rgba8Unorm)
            .with_label("minimal")
            .build()
            .expect("minimal description builds")
    }
}

pub fn shader(stage: ShaderStage, name: &'static str) -> Arc<TestShader> {
    Arc::new(TestShader { stage, name })
}
