//! Canonical stage/access resolution and pairing rules.

use super::{BarrierPolicy, BarrierTransition, PipelineBarrier, UsageScope};
use crate::error::PipelineStateError;
use crate::types::{AccessFlags, ResourceUsage, ShaderStageFlags, StageFlags};

static GENERIC_POLICY: BarrierPolicy = BarrierPolicy::generic();

/// Compute the barrier for a usage change with the generic policy.
///
/// `involved_stages` names the shader stages that bind the resource; it
/// narrows the stage of shader-bound usages. Empty means every shader stage.
pub fn compute_barrier(
    current: ResourceUsage,
    next: ResourceUsage,
    involved_stages: ShaderStageFlags,
) -> Result<BarrierTransition, PipelineStateError> {
    GENERIC_POLICY.compute_barrier(current, next, involved_stages)
}

impl PipelineBarrier {
    /// Check that every access runs at a stage able to perform it and that
    /// host and device work only meet where the policy allows.
    ///
    /// `ALL_COMMANDS` satisfies every device access.
    pub fn validate(&self, policy: &BarrierPolicy) -> Result<(), PipelineStateError> {
        policy.validate(self)
    }
}

/// Stage and access of one side of a transition.
pub(super) fn resolve_scope(
    scope: UsageScope,
    undefined_stage: StageFlags,
) -> (StageFlags, AccessFlags) {
    let usage = scope.usage;
    if usage == ResourceUsage::Undefined {
        return (undefined_stage, AccessFlags::empty());
    }

    let (stage, access) = usage.canonical_scope();
    if usage.is_shader_bound() {
        let narrowed = StageFlags::from_shader_stages(scope.stages);
        if !narrowed.is_empty() {
            return (narrowed, access);
        }
    }
    (stage, access)
}

/// Reject any access bit paired with stages that cannot perform it.
pub(super) fn check_stage_access(
    stage: StageFlags,
    access: AccessFlags,
) -> Result<(), PipelineStateError> {
    for bit in access.iter() {
        if !bit.is_host() && stage.contains(StageFlags::ALL_COMMANDS) {
            continue;
        }
        let allowed = bit.required_stages().unwrap_or(StageFlags::empty());
        if !stage.intersects(allowed) {
            return Err(PipelineStateError::IncompatibleStageAccess { stage, access: bit });
        }
    }
    Ok(())
}

/// Host classification of one side: `Some(true)` for host only,
/// `Some(false)` for device only, `None` when both appear.
fn host_side(stage: StageFlags, access: AccessFlags) -> Option<bool> {
    let host = stage.is_host() || access.is_host();
    let device = stage.has_device_stages() || access.has_device_access();
    match (host, device) {
        (true, true) => None,
        (host, _) => Some(host),
    }
}

/// Reject host/device mixing within a side or across the transition unless
/// the policy allows it. Undefined contents belong to neither timeline.
pub(super) fn check_host_mixing(
    barrier: &PipelineBarrier,
    policy: &BarrierPolicy,
) -> Result<(), PipelineStateError> {
    if policy.allow_host_device_mixing {
        return Ok(());
    }

    let unsupported = |reason: &str| PipelineStateError::UnsupportedTransition {
        from: barrier.current_usage,
        to: barrier.next_usage,
        reason: reason.to_string(),
    };

    let current = host_side(barrier.current_stage, barrier.current_access);
    let next = host_side(barrier.next_stage, barrier.next_access);
    if current.is_none() || next.is_none() {
        return Err(unsupported("host and device work are mixed in one scope"));
    }

    if barrier.current_usage != ResourceUsage::Undefined && current != next {
        return Err(unsupported("host and device work meet across the barrier"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_function_matches_generic_policy() {
        for current in ResourceUsage::ALL {
            for next in ResourceUsage::ALL {
                let free = compute_barrier(current, next, ShaderStageFlags::FRAGMENT);
                let policy = BarrierPolicy::generic().compute_barrier(
                    current,
                    next,
                    ShaderStageFlags::FRAGMENT,
                );
                assert_eq!(free, policy, "{current:?} -> {next:?}");
            }
        }
    }

    #[test]
    fn test_narrowing() {
        let scope = UsageScope::new(ResourceUsage::ConstantBuffer, ShaderStageFlags::VERTEX);
        assert_eq!(
            resolve_scope(scope, StageFlags::ALL_COMMANDS),
            (StageFlags::VERTEX_SHADER, AccessFlags::SHADER_READ)
        );

        let scope = UsageScope::unbound(ResourceUsage::ShaderResource);
        assert_eq!(
            resolve_scope(scope, StageFlags::ALL_COMMANDS).0,
            StageFlags::ALL_SHADERS
        );

        // Non shader-bound usages ignore the stages.
        let scope = UsageScope::new(ResourceUsage::RenderTarget, ShaderStageFlags::FRAGMENT);
        assert_eq!(
            resolve_scope(scope, StageFlags::ALL_COMMANDS).0,
            StageFlags::RENDER_TARGET
        );
    }

    #[test]
    fn test_stage_access_pairing() {
        assert!(
            check_stage_access(StageFlags::LATE_PIXEL_TESTS, AccessFlags::DEPTH_STENCIL_WRITE)
                .is_ok()
        );
        assert_eq!(
            check_stage_access(StageFlags::PIXEL_SHADER, AccessFlags::DEPTH_STENCIL_WRITE),
            Err(PipelineStateError::IncompatibleStageAccess {
                stage: StageFlags::PIXEL_SHADER,
                access: AccessFlags::DEPTH_STENCIL_WRITE,
            })
        );
        assert!(check_stage_access(StageFlags::ALL_COMMANDS, AccessFlags::TRANSFER_WRITE).is_ok());
        assert!(check_stage_access(StageFlags::ALL_COMMANDS, AccessFlags::HOST_READ).is_err());
        assert!(check_stage_access(StageFlags::HOST, AccessFlags::HOST_READ).is_ok());
        assert!(check_stage_access(StageFlags::COMPUTE_SHADER, AccessFlags::MEMORY_WRITE).is_ok());
    }

    #[test]
    fn test_host_side() {
        assert_eq!(host_side(StageFlags::HOST, AccessFlags::HOST_READ), Some(true));
        assert_eq!(
            host_side(StageFlags::TRANSFER, AccessFlags::TRANSFER_READ),
            Some(false)
        );
        assert_eq!(
            host_side(StageFlags::HOST | StageFlags::TRANSFER, AccessFlags::HOST_READ),
            None
        );
        assert_eq!(host_side(StageFlags::ALL_COMMANDS, AccessFlags::empty()), Some(false));
    }

    #[test]
    fn test_canonical_barriers_pass_validation() {
        let policy = BarrierPolicy::generic().with_host_device_mixing(true);
        for current in ResourceUsage::ALL {
            for next in ResourceUsage::ALL {
                if let Ok(transition) =
                    policy.compute_barrier(current, next, ShaderStageFlags::empty())
                {
                    assert!(
                        transition.barrier.validate(&policy).is_ok(),
                        "{current:?} -> {next:?}"
                    );
                }
            }
        }
    }
}
