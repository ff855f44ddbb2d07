//! Dummy backend for testing and development.
//!
//! This backend doesn't create any GPU objects but implements both backend
//! capabilities, so descriptions and barriers can be exercised without
//! hardware.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{BackendError, BackendKind, BarrierRecorder, PipelineFactory, ResourceId};
use crate::barrier::PipelineBarrier;
use crate::pipeline::PipelineDescription;
use crate::types::Format;

/// Pipeline object produced by [`DummyBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyPipeline {
    /// Sequential pipeline id.
    pub id: u64,
    /// Label copied from the description.
    pub label: Option<String>,
    /// Cache key of the description it was created from.
    pub cache_key: u64,
}

/// Dummy pipeline factory.
#[derive(Debug, Default)]
pub struct DummyBackend {
    next_id: AtomicU64,
    unsupported_formats: Vec<Format>,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject descriptions that use this format, to emulate a device limit.
    pub fn with_unsupported_format(mut self, format: Format) -> Self {
        self.unsupported_formats.push(format);
        self
    }

    /// Number of pipelines created so far.
    pub fn pipeline_count(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }
}

impl PipelineFactory for DummyBackend {
    type Pipeline = DummyPipeline;

    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Dummy
    }

    fn realize(&self, description: &PipelineDescription) -> Result<DummyPipeline, BackendError> {
        let used = description
            .color_formats()
            .chain(description.depth_stencil_format);
        for format in used {
            if self.unsupported_formats.contains(&format) {
                log::trace!("DummyBackend: rejecting format {format:?}");
                return Err(BackendError::UnsupportedFormat(format!("{format:?}")));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::trace!(
            "DummyBackend: creating pipeline {} {:?}",
            id,
            description.label
        );
        Ok(DummyPipeline {
            id,
            label: description.label.clone(),
            cache_key: description.cache_key(),
        })
    }
}

/// Command list that stores recorded barriers.
#[derive(Debug, Default)]
pub struct DummyCommandList {
    barriers: Vec<(ResourceId, PipelineBarrier)>,
}

impl DummyCommandList {
    /// Create an empty command list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Barriers recorded so far, in order.
    pub fn barriers(&self) -> &[(ResourceId, PipelineBarrier)] {
        &self.barriers
    }

    /// Forget every recorded barrier.
    pub fn reset(&mut self) {
        self.barriers.clear();
    }
}

impl BarrierRecorder for DummyCommandList {
    fn record_barrier(&mut self, barrier: &PipelineBarrier, resource: ResourceId) {
        log::trace!(
            "DummyBackend: barrier on {:?} {:?} -> {:?}",
            resource,
            barrier.current_usage,
            barrier.next_usage
        );
        self.barriers.push((resource, *barrier));
    }
}

static_assertions::assert_impl_all!(DummyBackend: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResourceUsage;

    #[test]
    fn test_records_barriers() {
        let mut list = DummyCommandList::new();
        let barrier = PipelineBarrier {
            next_usage: ResourceUsage::RenderTarget,
            ..Default::default()
        };

        list.record_barrier(&barrier, ResourceId(4));
        assert_eq!(list.barriers(), &[(ResourceId(4), barrier)]);

        list.reset();
        assert!(list.barriers().is_empty());
    }

    #[test]
    fn test_rejects_unsupported_format() {
        let backend = DummyBackend::new().with_unsupported_format(Format::Rgba16Float);
        let mut description = PipelineDescription::default();
        description.render_target_count = 1;
        description.render_target_formats[0] = Some(Format::Rgba16Float);

        assert_eq!(
            backend.realize(&description),
            Err(BackendError::UnsupportedFormat("Rgba16Float".to_string()))
        );
        assert_eq!(backend.pipeline_count(), 0);
    }
}
