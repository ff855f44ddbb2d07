//! Usage tracking for a single resource.

use super::{BarrierBatch, BarrierPolicy, BarrierTransition, PipelineBarrier, UsageScope};
use crate::backend::ResourceId;
use crate::error::PipelineStateError;
use crate::types::{ResourceUsage, ShaderStageFlags};

/// The current usage of one resource.
///
/// A resource starts out `Undefined`. Its usage only changes through a
/// successful [`transition`](Self::transition); a rejected transition leaves
/// it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedResource {
    id: ResourceId,
    scope: UsageScope,
}

impl TrackedResource {
    /// Start tracking a freshly created resource.
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            scope: UsageScope::unbound(ResourceUsage::Undefined),
        }
    }

    /// Start tracking a resource already in a known usage.
    pub fn with_scope(id: ResourceId, scope: UsageScope) -> Self {
        Self { id, scope }
    }

    /// Resource identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Current usage.
    pub fn usage(&self) -> ResourceUsage {
        self.scope.usage
    }

    /// Current usage and the shader stages that bind it.
    pub fn scope(&self) -> UsageScope {
        self.scope
    }

    /// Move to a new usage.
    ///
    /// Returns the barrier to record, or `None` when the policy needs none.
    pub fn transition(
        &mut self,
        next: ResourceUsage,
        involved_stages: ShaderStageFlags,
        policy: &BarrierPolicy,
    ) -> Result<Option<PipelineBarrier>, PipelineStateError> {
        let (next, transition) = self.plan(next, involved_stages, policy)?;
        self.scope = next;
        Ok(transition.transition_required.then_some(transition.barrier))
    }

    /// Move to a new usage, folding the barrier (if any) into a batch.
    ///
    /// The usage is left unchanged if the batch rejects the folded barrier.
    pub fn transition_into(
        &mut self,
        next: ResourceUsage,
        involved_stages: ShaderStageFlags,
        policy: &BarrierPolicy,
        batch: &mut BarrierBatch,
    ) -> Result<(), PipelineStateError> {
        let (next, transition) = self.plan(next, involved_stages, policy)?;
        batch.add(self.id, &transition, policy)?;
        self.scope = next;
        Ok(())
    }

    fn plan(
        &self,
        next: ResourceUsage,
        involved_stages: ShaderStageFlags,
        policy: &BarrierPolicy,
    ) -> Result<(UsageScope, BarrierTransition), PipelineStateError> {
        let next = UsageScope::new(next, involved_stages);
        let transition = policy.compute_scoped(self.scope, next)?;
        Ok((next, transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_undefined() {
        let resource = TrackedResource::new(ResourceId(1));
        assert_eq!(resource.usage(), ResourceUsage::Undefined);
        assert_eq!(resource.id(), ResourceId(1));
    }

    #[test]
    fn test_failed_transition_keeps_usage() {
        let policy = BarrierPolicy::generic();
        let mut resource = TrackedResource::new(ResourceId(1));

        resource
            .transition(ResourceUsage::RenderTarget, ShaderStageFlags::empty(), &policy)
            .unwrap();
        assert!(
            resource
                .transition(ResourceUsage::Undefined, ShaderStageFlags::empty(), &policy)
                .is_err()
        );
        assert_eq!(resource.usage(), ResourceUsage::RenderTarget);
    }

    #[test]
    fn test_noop_returns_none() {
        let policy = BarrierPolicy::generic();
        let mut resource = TrackedResource::with_scope(
            ResourceId(3),
            UsageScope::new(ResourceUsage::ShaderResource, ShaderStageFlags::FRAGMENT),
        );

        let barrier = resource
            .transition(
                ResourceUsage::ShaderResource,
                ShaderStageFlags::FRAGMENT,
                &policy,
            )
            .unwrap();
        assert!(barrier.is_none());

        // Same usage, new stage: the wait moves.
        let barrier = resource
            .transition(ResourceUsage::ShaderResource, ShaderStageFlags::VERTEX, &policy)
            .unwrap();
        assert!(barrier.is_some());
    }

    #[test]
    fn test_transition_into_batch() {
        let policy = BarrierPolicy::vulkan();
        let mut batch = BarrierBatch::new();
        let mut resource = TrackedResource::new(ResourceId(5));

        resource
            .transition_into(
                ResourceUsage::TransferDestination,
                ShaderStageFlags::empty(),
                &policy,
                &mut batch,
            )
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(resource.usage(), ResourceUsage::TransferDestination);
    }

    #[test]
    fn test_rejected_fold_keeps_usage() {
        let policy = BarrierPolicy::d3d12();
        let mut batch = BarrierBatch::new();
        let mut resource = TrackedResource::with_scope(
            ResourceId(6),
            UsageScope::unbound(ResourceUsage::DepthStencilWrite),
        );

        resource
            .transition_into(
                ResourceUsage::ShaderResource,
                ShaderStageFlags::FRAGMENT,
                &policy,
                &mut batch,
            )
            .unwrap();

        // Depth write straight to render target is forbidden once folded.
        let result = resource.transition_into(
            ResourceUsage::RenderTarget,
            ShaderStageFlags::empty(),
            &policy,
            &mut batch,
        );
        assert!(result.is_err());
        assert_eq!(resource.usage(), ResourceUsage::ShaderResource);
        assert_eq!(
            batch.get(ResourceId(6)).map(|b| b.next_usage),
            Some(ResourceUsage::ShaderResource)
        );
    }
}
