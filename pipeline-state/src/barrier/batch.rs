//! Batching barriers for a single submission.

use std::collections::BTreeMap;

use super::{BarrierPolicy, BarrierTransition, PipelineBarrier};
use crate::backend::{BarrierRecorder, ResourceId};
use crate::error::PipelineStateError;
use crate::types::StageFlags;

/// A batch of barriers to record together.
///
/// Barriers are collected for every resource a pass touches, then handed to a
/// [`BarrierRecorder`] in resource order. A resource has at most one barrier
/// in the batch; later transitions are folded into it through the policy.
#[derive(Debug, Clone, Default)]
pub struct BarrierBatch {
    /// Barriers keyed by resource (to avoid duplicates).
    barriers: BTreeMap<ResourceId, PipelineBarrier>,
}

impl BarrierBatch {
    /// Create a new empty barrier batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a computed transition.
    ///
    /// Without a queued barrier for the resource, transitions that need no
    /// barrier are skipped. With one, both are folded with
    /// [`BarrierPolicy::merge`]: the entry is dropped if the combined
    /// transition needs no barrier, and an unsupported combination is
    /// returned as an error with the batch left unchanged. Submit the batch
    /// and start a new one to record such a transition.
    pub fn add(
        &mut self,
        id: ResourceId,
        transition: &BarrierTransition,
        policy: &BarrierPolicy,
    ) -> Result<(), PipelineStateError> {
        let Some(existing) = self.barriers.get(&id) else {
            if transition.transition_required {
                self.barriers.insert(id, transition.barrier);
            }
            return Ok(());
        };

        let merged = policy.merge(existing, &transition.barrier)?;
        if merged.transition_required {
            self.barriers.insert(id, merged.barrier);
        } else {
            log::trace!("Dropping barrier for {id:?}: folded transition is a no-op");
            self.barriers.remove(&id);
        }
        Ok(())
    }

    /// Add a barrier that must be recorded, merging like [`add`](Self::add).
    pub fn add_barrier(
        &mut self,
        id: ResourceId,
        barrier: PipelineBarrier,
        policy: &BarrierPolicy,
    ) -> Result<(), PipelineStateError> {
        self.add(
            id,
            &BarrierTransition {
                barrier,
                transition_required: true,
            },
            policy,
        )
    }

    /// Get the barrier queued for a resource.
    pub fn get(&self, id: ResourceId) -> Option<&PipelineBarrier> {
        self.barriers.get(&id)
    }

    /// Iterate over queued barriers in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &PipelineBarrier)> {
        self.barriers.iter().map(|(id, barrier)| (*id, barrier))
    }

    /// Union of every source stage.
    pub fn src_stages(&self) -> StageFlags {
        self.barriers
            .values()
            .fold(StageFlags::empty(), |acc, b| acc | b.current_stage)
    }

    /// Union of every destination stage.
    pub fn dst_stages(&self) -> StageFlags {
        self.barriers
            .values()
            .fold(StageFlags::empty(), |acc, b| acc | b.next_stage)
    }

    /// Check if the batch has any barriers.
    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty()
    }

    /// Get the number of barriers in the batch.
    pub fn len(&self) -> usize {
        self.barriers.len()
    }

    /// Record every barrier.
    ///
    /// Does nothing if the batch is empty.
    pub fn submit<R: BarrierRecorder + ?Sized>(&self, recorder: &mut R) {
        if self.is_empty() {
            return;
        }

        log::trace!(
            "Submitting {} barriers ({:?} -> {:?})",
            self.len(),
            self.src_stages(),
            self.dst_stages()
        );
        for (id, barrier) in &self.barriers {
            recorder.record_barrier(barrier, *id);
        }
    }

    /// Clear all barriers from the batch.
    pub fn clear(&mut self) {
        self.barriers.clear();
    }
}
