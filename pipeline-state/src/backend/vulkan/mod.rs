//! Vulkan translation of pipeline state and barriers.
//!
//! This module maps the backend-neutral vocabulary onto `ash::vk` values and
//! collects computed barriers into the structures `vkCmdPipelineBarrier`
//! consumes. Barriers are collected for all resources of a pass, then
//! submitted as a single pipeline barrier command.

pub mod conversion;
pub mod pipeline;

use std::collections::HashMap;

use ash::vk;

use super::{BarrierRecorder, ResourceId};
use crate::barrier::PipelineBarrier;
use crate::types::Format;

use conversion::{
    convert_access_flags, convert_dst_stage, convert_image_layout, convert_src_stage,
    image_aspect,
};

/// Native object behind a [`ResourceId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulkanResource {
    /// An image and its format.
    Image { image: vk::Image, format: Format },
    /// A buffer.
    Buffer { buffer: vk::Buffer },
}

/// Build an image memory barrier covering every mip level and layer.
pub fn image_memory_barrier(
    barrier: &PipelineBarrier,
    image: vk::Image,
    format: Format,
) -> vk::ImageMemoryBarrier<'static> {
    vk::ImageMemoryBarrier::default()
        .old_layout(convert_image_layout(barrier.current_usage))
        .new_layout(convert_image_layout(barrier.next_usage))
        .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .image(image)
        .subresource_range(vk::ImageSubresourceRange {
            aspect_mask: image_aspect(format),
            base_mip_level: 0,
            level_count: vk::REMAINING_MIP_LEVELS,
            base_array_layer: 0,
            layer_count: vk::REMAINING_ARRAY_LAYERS,
        })
        .src_access_mask(convert_access_flags(barrier.current_access))
        .dst_access_mask(convert_access_flags(barrier.next_access))
}

/// Build a buffer memory barrier covering the whole buffer.
pub fn buffer_memory_barrier(
    barrier: &PipelineBarrier,
    buffer: vk::Buffer,
) -> vk::BufferMemoryBarrier<'static> {
    vk::BufferMemoryBarrier::default()
        .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .buffer(buffer)
        .offset(0)
        .size(vk::WHOLE_SIZE)
        .src_access_mask(convert_access_flags(barrier.current_access))
        .dst_access_mask(convert_access_flags(barrier.next_access))
}

/// Build a global memory barrier.
pub fn memory_barrier(barrier: &PipelineBarrier) -> vk::MemoryBarrier<'static> {
    vk::MemoryBarrier::default()
        .src_access_mask(convert_access_flags(barrier.current_access))
        .dst_access_mask(convert_access_flags(barrier.next_access))
}

/// Collects barriers for one `vkCmdPipelineBarrier` call.
///
/// Resources are registered up front; barriers on unregistered resources
/// become global memory barriers.
#[derive(Debug, Default)]
pub struct VulkanBarrierRecorder {
    resources: HashMap<ResourceId, VulkanResource>,
    memory_barriers: Vec<vk::MemoryBarrier<'static>>,
    buffer_barriers: Vec<vk::BufferMemoryBarrier<'static>>,
    image_barriers: Vec<vk::ImageMemoryBarrier<'static>>,
    src_stage_mask: vk::PipelineStageFlags,
    dst_stage_mask: vk::PipelineStageFlags,
}

impl VulkanBarrierRecorder {
    /// Create a new empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a resource id with its native object.
    pub fn register(&mut self, id: ResourceId, resource: VulkanResource) {
        self.resources.insert(id, resource);
    }

    /// Check if no barriers have been recorded.
    pub fn is_empty(&self) -> bool {
        self.memory_barriers.is_empty()
            && self.buffer_barriers.is_empty()
            && self.image_barriers.is_empty()
    }

    /// Recorded image barriers.
    pub fn image_barriers(&self) -> &[vk::ImageMemoryBarrier<'static>] {
        &self.image_barriers
    }

    /// Recorded buffer barriers.
    pub fn buffer_barriers(&self) -> &[vk::BufferMemoryBarrier<'static>] {
        &self.buffer_barriers
    }

    /// Recorded global memory barriers.
    pub fn memory_barriers(&self) -> &[vk::MemoryBarrier<'static>] {
        &self.memory_barriers
    }

    /// Union of source stages.
    pub fn src_stage_mask(&self) -> vk::PipelineStageFlags {
        self.src_stage_mask
    }

    /// Union of destination stages.
    pub fn dst_stage_mask(&self) -> vk::PipelineStageFlags {
        self.dst_stage_mask
    }

    /// Submit all barriers in a single pipeline barrier command and clear them.
    ///
    /// Does nothing if no barriers were recorded.
    pub fn submit(&mut self, device: &ash::Device, cmd: vk::CommandBuffer) {
        if self.is_empty() {
            return;
        }

        unsafe {
            device.cmd_pipeline_barrier(
                cmd,
                self.src_stage_mask,
                self.dst_stage_mask,
                vk::DependencyFlags::empty(),
                &self.memory_barriers,
                &self.buffer_barriers,
                &self.image_barriers,
            );
        }
        self.clear();
    }

    /// Drop recorded barriers, keeping registered resources.
    pub fn clear(&mut self) {
        self.memory_barriers.clear();
        self.buffer_barriers.clear();
        self.image_barriers.clear();
        self.src_stage_mask = vk::PipelineStageFlags::empty();
        self.dst_stage_mask = vk::PipelineStageFlags::empty();
    }
}

impl BarrierRecorder for VulkanBarrierRecorder {
    fn record_barrier(&mut self, barrier: &PipelineBarrier, resource: ResourceId) {
        match self.resources.get(&resource) {
            Some(VulkanResource::Image { image, format }) => {
                self.image_barriers
                    .push(image_memory_barrier(barrier, *image, *format));
            }
            Some(VulkanResource::Buffer { buffer }) => {
                self.buffer_barriers
                    .push(buffer_memory_barrier(barrier, *buffer));
            }
            None => {
                log::trace!("Vulkan: no native object for {resource:?}, using a memory barrier");
                self.memory_barriers.push(memory_barrier(barrier));
            }
        }
        self.src_stage_mask |= convert_src_stage(barrier.current_stage);
        self.dst_stage_mask |= convert_dst_stage(barrier.next_stage);
    }
}
