//! Pipeline stage and memory access flags.
//!
//! These are the backend-neutral vocabulary used by barriers. Each backend
//! translates them into its own synchronization masks.

use bitflags::bitflags;

use super::ShaderStageFlags;

bitflags! {
    /// Points in the pipeline where work on a resource executes.
    ///
    /// `HOST` is API exclusive: it only appears in explicit host
    /// synchronization (mapping a buffer for readback or upload).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StageFlags: u32 {
        /// Vertex and index buffer fetch.
        const VERTEX_INPUT = 1 << 0;
        /// Vertex shader execution.
        const VERTEX_SHADER = 1 << 1;
        /// Pixel (fragment) shader execution.
        const PIXEL_SHADER = 1 << 2;
        /// Depth/stencil tests before pixel shading.
        const EARLY_PIXEL_TESTS = 1 << 3;
        /// Depth/stencil tests after pixel shading.
        const LATE_PIXEL_TESTS = 1 << 4;
        /// Color render target output.
        const RENDER_TARGET = 1 << 5;
        /// Compute shader execution.
        const COMPUTE_SHADER = 1 << 6;
        /// Copy and clear operations.
        const TRANSFER = 1 << 7;
        /// Every command on the queue.
        const ALL_COMMANDS = 1 << 8;
        /// Hull (tessellation control) shader execution.
        const HULL_SHADER = 1 << 9;
        /// Domain (tessellation evaluation) shader execution.
        const DOMAIN_SHADER = 1 << 10;
        /// Geometry shader execution.
        const GEOMETRY_SHADER = 1 << 11;
        /// Host (CPU) reads and writes of mapped memory.
        const HOST = 1 << 20;
    }
}

impl StageFlags {
    /// Every programmable shader stage.
    pub const ALL_SHADERS: Self = Self::VERTEX_SHADER
        .union(Self::PIXEL_SHADER)
        .union(Self::COMPUTE_SHADER)
        .union(Self::HULL_SHADER)
        .union(Self::DOMAIN_SHADER)
        .union(Self::GEOMETRY_SHADER);

    /// Both depth/stencil test stages.
    pub const PIXEL_TESTS: Self = Self::EARLY_PIXEL_TESTS.union(Self::LATE_PIXEL_TESTS);

    /// Map the shader stages that declare a binding to pipeline stages.
    pub fn from_shader_stages(stages: ShaderStageFlags) -> Self {
        let mut result = Self::empty();

        if stages.contains(ShaderStageFlags::VERTEX) {
            result |= Self::VERTEX_SHADER;
        }
        if stages.contains(ShaderStageFlags::FRAGMENT) {
            result |= Self::PIXEL_SHADER;
        }
        if stages.contains(ShaderStageFlags::COMPUTE) {
            result |= Self::COMPUTE_SHADER;
        }
        if stages.contains(ShaderStageFlags::HULL) {
            result |= Self::HULL_SHADER;
        }
        if stages.contains(ShaderStageFlags::DOMAIN) {
            result |= Self::DOMAIN_SHADER;
        }
        if stages.contains(ShaderStageFlags::GEOMETRY) {
            result |= Self::GEOMETRY_SHADER;
        }
        // The tessellator sits between hull and domain; bindings it declares
        // are visible to both.
        if stages.contains(ShaderStageFlags::TESSELLATION) {
            result |= Self::HULL_SHADER | Self::DOMAIN_SHADER;
        }

        result
    }

    /// Check if the host stage is present.
    pub fn is_host(self) -> bool {
        self.contains(Self::HOST)
    }

    /// Check if any device (non-host) stage is present.
    pub fn has_device_stages(self) -> bool {
        !self.difference(Self::HOST).is_empty()
    }
}

impl Default for StageFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Kinds of memory operations performed on a resource.
    ///
    /// `HOST_READ` and `HOST_WRITE` are API exclusive, like [`StageFlags::HOST`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u32 {
        /// Vertex attribute fetch.
        const VERTEX_READ = 1 << 0;
        /// Index fetch.
        const INDEX_READ = 1 << 1;
        /// Shader reads (sampled images, constant and structured buffers).
        const SHADER_READ = 1 << 2;
        /// Shader writes (unordered access).
        const SHADER_WRITE = 1 << 3;
        /// Render target reads (blending, load ops).
        const RENDER_TARGET_READ = 1 << 4;
        /// Render target writes.
        const RENDER_TARGET_WRITE = 1 << 5;
        /// Depth/stencil reads.
        const DEPTH_STENCIL_READ = 1 << 6;
        /// Depth/stencil writes.
        const DEPTH_STENCIL_WRITE = 1 << 7;
        /// Copy source reads.
        const TRANSFER_READ = 1 << 8;
        /// Copy destination writes.
        const TRANSFER_WRITE = 1 << 9;
        /// Any read.
        const MEMORY_READ = 1 << 10;
        /// Any write.
        const MEMORY_WRITE = 1 << 11;
        /// Host reads of mapped memory.
        const HOST_READ = 1 << 20;
        /// Host writes of mapped memory.
        const HOST_WRITE = 1 << 21;
    }
}

impl AccessFlags {
    /// Every access that modifies memory.
    pub const WRITES: Self = Self::SHADER_WRITE
        .union(Self::RENDER_TARGET_WRITE)
        .union(Self::DEPTH_STENCIL_WRITE)
        .union(Self::TRANSFER_WRITE)
        .union(Self::MEMORY_WRITE)
        .union(Self::HOST_WRITE);

    /// The API exclusive host accesses.
    pub const HOST_EXCLUSIVE: Self = Self::HOST_READ.union(Self::HOST_WRITE);

    /// Check if any write access is present.
    pub fn is_write(self) -> bool {
        self.intersects(Self::WRITES)
    }

    /// Check if any host access is present.
    pub fn is_host(self) -> bool {
        self.intersects(Self::HOST_EXCLUSIVE)
    }

    /// Check if any device (non-host) access is present.
    pub fn has_device_access(self) -> bool {
        !self.difference(Self::HOST_EXCLUSIVE).is_empty()
    }

    /// Stages at which this single access bit may legally execute.
    ///
    /// Returns `None` for combined or empty values. `MEMORY_READ` and
    /// `MEMORY_WRITE` are valid at any device stage.
    pub fn required_stages(self) -> Option<StageFlags> {
        const TABLE: [(AccessFlags, StageFlags); 7] = [
            (
                AccessFlags::VERTEX_READ.union(AccessFlags::INDEX_READ),
                StageFlags::VERTEX_INPUT,
            ),
            (
                AccessFlags::SHADER_READ.union(AccessFlags::SHADER_WRITE),
                StageFlags::ALL_SHADERS,
            ),
            (
                AccessFlags::RENDER_TARGET_READ.union(AccessFlags::RENDER_TARGET_WRITE),
                StageFlags::RENDER_TARGET,
            ),
            (
                AccessFlags::DEPTH_STENCIL_READ.union(AccessFlags::DEPTH_STENCIL_WRITE),
                StageFlags::PIXEL_TESTS,
            ),
            (
                AccessFlags::TRANSFER_READ.union(AccessFlags::TRANSFER_WRITE),
                StageFlags::TRANSFER,
            ),
            (
                AccessFlags::MEMORY_READ.union(AccessFlags::MEMORY_WRITE),
                StageFlags::all().difference(StageFlags::HOST),
            ),
            (AccessFlags::HOST_EXCLUSIVE, StageFlags::HOST),
        ];

        if self.bits().count_ones() != 1 {
            return None;
        }
        TABLE
            .iter()
            .find(|(group, _)| group.contains(self))
            .map(|&(_, stages)| stages)
    }
}

impl Default for AccessFlags {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Render target channels written by the output merger.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWrites: u8 {
        /// Red channel.
        const RED = 1 << 0;
        /// Green channel.
        const GREEN = 1 << 1;
        /// Blue channel.
        const BLUE = 1 << 2;
        /// Alpha channel.
        const ALPHA = 1 << 3;
        /// All four channels.
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

impl Default for ColorWrites {
    fn default() -> Self {
        Self::ALL
    }
}
