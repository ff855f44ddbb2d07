//! Per-backend barrier rules.

use std::collections::{BTreeSet, HashMap};

use super::compute::{check_host_mixing, check_stage_access, resolve_scope};
use super::{BarrierTransition, PipelineBarrier, UsageScope};
use crate::backend::BackendKind;
use crate::error::PipelineStateError;
use crate::profiling::profile_function;
use crate::types::{ResourceUsage, ShaderStageFlags, StageFlags};

/// Rules a backend applies on top of the canonical usage table.
///
/// A policy is plain data: build one from a preset and adjust its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BarrierPolicy {
    /// Source stage reported for a resource whose contents are undefined.
    ///
    /// Empty means "nothing to wait for" (top of pipe on Vulkan).
    pub undefined_stage: StageFlags,

    /// Permit host stages/accesses to meet device stages/accesses in one barrier.
    pub allow_host_device_mixing: bool,

    /// Reject a write followed by a different write without an intervening read.
    pub require_read_between_writes: bool,

    /// Require a barrier between two identical writes (unordered access hazards).
    pub serialize_repeated_writes: bool,

    /// Require a barrier whenever the usage changes, even if stage and access
    /// do not (image layout or resource state changes).
    pub transition_on_usage_change: bool,

    forbidden: BTreeSet<(ResourceUsage, ResourceUsage)>,
}

impl Default for BarrierPolicy {
    fn default() -> Self {
        Self::generic()
    }
}

impl BarrierPolicy {
    /// Backend-neutral policy.
    ///
    /// A transition is required exactly when the canonical stage/access pairs
    /// differ. Host and device work never meet in one barrier.
    pub const fn generic() -> Self {
        Self {
            undefined_stage: StageFlags::ALL_COMMANDS,
            allow_host_device_mixing: false,
            require_read_between_writes: false,
            serialize_repeated_writes: false,
            transition_on_usage_change: false,
            forbidden: BTreeSet::new(),
        }
    }

    /// Vulkan rules.
    ///
    /// Undefined contents wait on nothing, layout changes always need a
    /// barrier, repeated storage writes are serialized and host stages are
    /// expressible in a pipeline barrier.
    pub const fn vulkan() -> Self {
        Self {
            undefined_stage: StageFlags::empty(),
            allow_host_device_mixing: true,
            require_read_between_writes: false,
            serialize_repeated_writes: true,
            transition_on_usage_change: true,
            forbidden: BTreeSet::new(),
        }
    }

    /// D3D12 rules.
    ///
    /// Resource state changes always need a barrier and repeated unordered
    /// access writes need a UAV barrier. A resource cannot be both a depth
    /// target and a render target or unordered access view, so those
    /// transitions are rejected.
    pub fn d3d12() -> Self {
        let mut policy = Self {
            undefined_stage: StageFlags::empty(),
            allow_host_device_mixing: true,
            require_read_between_writes: false,
            serialize_repeated_writes: true,
            transition_on_usage_change: true,
            forbidden: BTreeSet::new(),
        };

        for depth in [
            ResourceUsage::DepthStencilWrite,
            ResourceUsage::DepthStencilRead,
        ] {
            for other in [ResourceUsage::RenderTarget, ResourceUsage::UnorderedAccess] {
                policy.forbid(depth, other);
                policy.forbid(other, depth);
            }
        }
        policy
    }

    /// Forbid a usage pair.
    pub fn forbid(&mut self, from: ResourceUsage, to: ResourceUsage) {
        self.forbidden.insert((from, to));
    }

    /// Forbid a usage pair, builder style.
    pub fn with_forbidden(mut self, from: ResourceUsage, to: ResourceUsage) -> Self {
        self.forbid(from, to);
        self
    }

    /// Set the stage reported for undefined contents.
    pub fn with_undefined_stage(mut self, stage: StageFlags) -> Self {
        self.undefined_stage = stage;
        self
    }

    /// Allow or forbid host/device mixing.
    pub fn with_host_device_mixing(mut self, allowed: bool) -> Self {
        self.allow_host_device_mixing = allowed;
        self
    }

    /// Require or waive a read between two different writes.
    pub fn with_read_between_writes(mut self, required: bool) -> Self {
        self.require_read_between_writes = required;
        self
    }

    /// Check if a usage pair is forbidden.
    pub fn is_forbidden(&self, from: ResourceUsage, to: ResourceUsage) -> bool {
        self.forbidden.contains(&(from, to))
    }

    /// Compute the barrier for a usage change seen by the same shader stages
    /// on both sides.
    pub fn compute_barrier(
        &self,
        current: ResourceUsage,
        next: ResourceUsage,
        involved_stages: ShaderStageFlags,
    ) -> Result<BarrierTransition, PipelineStateError> {
        self.compute_scoped(
            UsageScope::new(current, involved_stages),
            UsageScope::new(next, involved_stages),
        )
    }

    /// Compute the barrier for a usage change whose sides are bound by
    /// different shader stages.
    pub fn compute_scoped(
        &self,
        current: UsageScope,
        next: UsageScope,
    ) -> Result<BarrierTransition, PipelineStateError> {
        profile_function!();

        self.check_usages(current.usage, next.usage)?;

        let (current_stage, current_access) = resolve_scope(current, self.undefined_stage);
        let (next_stage, next_access) = resolve_scope(next, self.undefined_stage);

        self.finish(PipelineBarrier {
            current_usage: current.usage,
            current_stage,
            current_access,
            next_usage: next.usage,
            next_stage,
            next_access,
        })
    }

    /// Fold two consecutive barriers of one resource into a single barrier.
    ///
    /// The result waits on the source side of `first` and releases into the
    /// destination side of `second`. The intermediate usage never executes,
    /// so the combined pair is checked like a fresh transition.
    pub fn merge(
        &self,
        first: &PipelineBarrier,
        second: &PipelineBarrier,
    ) -> Result<BarrierTransition, PipelineStateError> {
        let barrier = PipelineBarrier {
            next_usage: second.next_usage,
            next_stage: second.next_stage,
            next_access: second.next_access,
            ..*first
        };

        self.check_usages(barrier.current_usage, barrier.next_usage)?;
        self.finish(barrier)
    }

    fn check_usages(
        &self,
        from: ResourceUsage,
        to: ResourceUsage,
    ) -> Result<(), PipelineStateError> {
        let unsupported = |reason: &str| PipelineStateError::UnsupportedTransition {
            from,
            to,
            reason: reason.to_string(),
        };

        if to == ResourceUsage::Undefined {
            return Err(unsupported("a resource cannot return to the undefined state"));
        }
        if self.is_forbidden(from, to) {
            return Err(unsupported("transition is forbidden by the backend policy"));
        }
        if self.require_read_between_writes && from != to && from.is_write() && to.is_write() {
            return Err(unsupported("a read must separate two different writes"));
        }
        Ok(())
    }

    fn finish(&self, barrier: PipelineBarrier) -> Result<BarrierTransition, PipelineStateError> {
        check_host_mixing(&barrier, self)?;

        let identical = barrier.current_stage == barrier.next_stage
            && barrier.current_access == barrier.next_access;
        let transition_required = !identical
            || (self.transition_on_usage_change && barrier.changes_usage())
            || (self.serialize_repeated_writes && barrier.current_access.is_write());

        log::trace!(
            "Barrier {:?} -> {:?}: {:?}/{:?} -> {:?}/{:?} (required: {})",
            barrier.current_usage,
            barrier.next_usage,
            barrier.current_stage,
            barrier.current_access,
            barrier.next_stage,
            barrier.next_access,
            transition_required
        );

        Ok(BarrierTransition {
            barrier,
            transition_required,
        })
    }

    /// Check stage/access pairing and host mixing of a barrier.
    pub fn validate(&self, barrier: &PipelineBarrier) -> Result<(), PipelineStateError> {
        check_stage_access(barrier.current_stage, barrier.current_access)?;
        check_stage_access(barrier.next_stage, barrier.next_access)?;
        check_host_mixing(barrier, self)
    }
}

/// Barrier policies keyed by backend identity.
///
/// Lookups for unregistered backends return [`BarrierPolicy::generic`].
#[derive(Debug, Clone, Default)]
pub struct BarrierPolicyTable {
    policies: HashMap<BackendKind, BarrierPolicy>,
    fallback: BarrierPolicy,
}

impl BarrierPolicyTable {
    /// Create an empty table. Every lookup returns the generic policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the Vulkan and D3D12 presets registered.
    pub fn with_presets() -> Self {
        let mut table = Self::new();
        table.register(BackendKind::Vulkan, BarrierPolicy::vulkan());
        table.register(BackendKind::D3D12, BarrierPolicy::d3d12());
        table
    }

    /// Register a policy, returning the one it replaces.
    pub fn register(&mut self, kind: BackendKind, policy: BarrierPolicy) -> Option<BarrierPolicy> {
        log::debug!("Registering barrier policy for {kind:?}");
        self.policies.insert(kind, policy)
    }

    /// Remove a registered policy.
    pub fn unregister(&mut self, kind: BackendKind) -> Option<BarrierPolicy> {
        self.policies.remove(&kind)
    }

    /// Get the policy for a backend, or the generic one.
    pub fn policy_for(&self, kind: BackendKind) -> &BarrierPolicy {
        self.policies.get(&kind).unwrap_or(&self.fallback)
    }

    /// Check if a backend has its own policy.
    pub fn contains(&self, kind: BackendKind) -> bool {
        self.policies.contains_key(&kind)
    }
}
