//! Integration tests for barrier computation, policies and tracking.
//!
//! # Test Categories
//!
//! - **Canonical Mapping Tests**: generic policy over every usage pair
//! - **Scenario Tests**: common render graph transitions
//! - **Policy Tests**: presets, forbidden pairs, host mixing, table lookup
//! - **Tracking Tests**: tracked resources, batching and recording

mod common;

use rstest::rstest;

use redlilium_pipeline_state::{
    AccessFlags, BackendKind, BarrierBatch, BarrierPolicy, BarrierPolicyTable, PipelineBarrier,
    PipelineStateError, ResourceId, ResourceUsage, ShaderStageFlags, StageFlags, TrackedResource,
    UsageScope, compute_barrier,
};

// ============================================================================
// Canonical Mapping Tests
// ============================================================================

#[test]
fn test_generic_requires_transition_iff_scopes_differ() {
    common::init_logging();

    for current in ResourceUsage::ALL {
        for next in ResourceUsage::ALL {
            if next == ResourceUsage::Undefined {
                continue;
            }
            let Ok(transition) = compute_barrier(current, next, ShaderStageFlags::empty()) else {
                continue;
            };

            let differs = current.canonical_scope() != next.canonical_scope();
            assert_eq!(
                transition.transition_required, differs,
                "{current:?} -> {next:?}"
            );
            assert_eq!(transition.barrier.current_usage, current);
            assert_eq!(transition.barrier.next_usage, next);
        }
    }
}

#[test]
fn test_compute_is_deterministic() {
    for current in ResourceUsage::ALL {
        for next in ResourceUsage::ALL {
            let a = compute_barrier(current, next, ShaderStageFlags::FRAGMENT);
            let b = compute_barrier(current, next, ShaderStageFlags::FRAGMENT);
            assert_eq!(a, b, "{current:?} -> {next:?}");
        }
    }
}

#[test]
fn test_every_computed_barrier_validates() {
    for policy in [
        BarrierPolicy::generic(),
        BarrierPolicy::vulkan(),
        BarrierPolicy::d3d12(),
    ] {
        for current in ResourceUsage::ALL {
            for next in ResourceUsage::ALL {
                if let Ok(transition) =
                    policy.compute_barrier(current, next, ShaderStageFlags::VERTEX)
                {
                    assert_eq!(
                        transition.barrier.validate(&policy),
                        Ok(()),
                        "{current:?} -> {next:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_transition_to_undefined_rejected() {
    for current in ResourceUsage::ALL {
        let result = compute_barrier(current, ResourceUsage::Undefined, ShaderStageFlags::empty());
        assert!(
            matches!(result, Err(PipelineStateError::UnsupportedTransition { .. })),
            "{current:?}"
        );
    }
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_undefined_to_render_target() {
    let transition = compute_barrier(
        ResourceUsage::Undefined,
        ResourceUsage::RenderTarget,
        ShaderStageFlags::empty(),
    )
    .unwrap();

    assert!(transition.transition_required);
    assert_eq!(transition.barrier.current_access, AccessFlags::empty());
    assert_eq!(transition.barrier.next_stage, StageFlags::RENDER_TARGET);
    assert_eq!(transition.barrier.next_access, AccessFlags::RENDER_TARGET_WRITE);
}

#[test]
fn test_render_target_to_fragment_read() {
    let transition = compute_barrier(
        ResourceUsage::RenderTarget,
        ResourceUsage::ShaderResource,
        ShaderStageFlags::FRAGMENT,
    )
    .unwrap();

    assert!(transition.transition_required);
    assert_eq!(transition.barrier.current_stage, StageFlags::RENDER_TARGET);
    assert_eq!(transition.barrier.next_stage, StageFlags::PIXEL_SHADER);
    assert_eq!(transition.barrier.next_access, AccessFlags::SHADER_READ);
}

#[rstest]
#[case::read_after_read(
    ResourceUsage::ShaderResource,
    ResourceUsage::ShaderResource,
    false,
    false
)]
#[case::same_scope_new_usage(
    ResourceUsage::ConstantBuffer,
    ResourceUsage::ShaderResource,
    false,
    true
)]
#[case::repeated_storage_write(
    ResourceUsage::UnorderedAccess,
    ResourceUsage::UnorderedAccess,
    false,
    true
)]
#[case::copy_then_vertex(
    ResourceUsage::TransferDestination,
    ResourceUsage::VertexBuffer,
    true,
    true
)]
#[case::depth_write_to_read(
    ResourceUsage::DepthStencilWrite,
    ResourceUsage::DepthStencilRead,
    true,
    true
)]
fn test_generic_and_vulkan_requirements(
    #[case] current: ResourceUsage,
    #[case] next: ResourceUsage,
    #[case] generic_required: bool,
    #[case] vulkan_required: bool,
) {
    let stages = ShaderStageFlags::FRAGMENT;
    let generic = compute_barrier(current, next, stages).unwrap();
    let vulkan = BarrierPolicy::vulkan()
        .compute_barrier(current, next, stages)
        .unwrap();

    assert_eq!(generic.transition_required, generic_required);
    assert_eq!(vulkan.transition_required, vulkan_required);
}

#[test]
fn test_scoped_sides_use_their_own_stages() {
    let transition = BarrierPolicy::generic()
        .compute_scoped(
            UsageScope::new(ResourceUsage::UnorderedAccess, ShaderStageFlags::COMPUTE),
            UsageScope::new(ResourceUsage::ShaderResource, ShaderStageFlags::VERTEX),
        )
        .unwrap();

    assert_eq!(transition.barrier.current_stage, StageFlags::COMPUTE_SHADER);
    assert_eq!(transition.barrier.next_stage, StageFlags::VERTEX_SHADER);
}

// ============================================================================
// Policy Tests
// ============================================================================

#[rstest]
#[case::host_write_to_copy(ResourceUsage::HostWrite, ResourceUsage::TransferSource)]
#[case::copy_to_host_read(ResourceUsage::TransferDestination, ResourceUsage::HostRead)]
#[case::storage_to_host_read(ResourceUsage::UnorderedAccess, ResourceUsage::HostRead)]
fn test_host_mixing(#[case] current: ResourceUsage, #[case] next: ResourceUsage) {
    let generic = compute_barrier(current, next, ShaderStageFlags::COMPUTE);
    assert!(matches!(
        generic,
        Err(PipelineStateError::UnsupportedTransition { .. })
    ));

    let vulkan = BarrierPolicy::vulkan()
        .compute_barrier(current, next, ShaderStageFlags::COMPUTE)
        .unwrap();
    assert!(vulkan.transition_required);
}

#[test]
fn test_undefined_to_host_is_allowed() {
    let transition = compute_barrier(
        ResourceUsage::Undefined,
        ResourceUsage::HostWrite,
        ShaderStageFlags::empty(),
    )
    .unwrap();
    assert_eq!(transition.barrier.next_stage, StageFlags::HOST);
}

#[rstest]
#[case::depth_to_color(ResourceUsage::DepthStencilWrite, ResourceUsage::RenderTarget)]
#[case::color_to_depth(ResourceUsage::RenderTarget, ResourceUsage::DepthStencilRead)]
#[case::depth_to_storage(ResourceUsage::DepthStencilRead, ResourceUsage::UnorderedAccess)]
fn test_d3d12_forbidden_pairs(#[case] current: ResourceUsage, #[case] next: ResourceUsage) {
    let d3d12 = BarrierPolicy::d3d12();
    assert!(d3d12.is_forbidden(current, next));
    assert!(matches!(
        d3d12.compute_barrier(current, next, ShaderStageFlags::FRAGMENT),
        Err(PipelineStateError::UnsupportedTransition { .. })
    ));
    assert!(
        BarrierPolicy::vulkan()
            .compute_barrier(current, next, ShaderStageFlags::FRAGMENT)
            .is_ok()
    );
}

#[test]
fn test_custom_forbidden_pair() {
    let policy = BarrierPolicy::generic()
        .with_forbidden(ResourceUsage::Present, ResourceUsage::UnorderedAccess);
    assert!(
        policy
            .compute_barrier(
                ResourceUsage::Present,
                ResourceUsage::UnorderedAccess,
                ShaderStageFlags::COMPUTE
            )
            .is_err()
    );
    // Only the listed direction is forbidden.
    assert!(
        policy
            .compute_barrier(
                ResourceUsage::UnorderedAccess,
                ResourceUsage::Present,
                ShaderStageFlags::COMPUTE
            )
            .is_ok()
    );
}

#[test]
fn test_read_between_writes() {
    let policy = BarrierPolicy::generic().with_read_between_writes(true);
    assert!(
        policy
            .compute_barrier(
                ResourceUsage::TransferDestination,
                ResourceUsage::RenderTarget,
                ShaderStageFlags::empty()
            )
            .is_err()
    );
    assert!(
        policy
            .compute_barrier(
                ResourceUsage::TransferDestination,
                ResourceUsage::ShaderResource,
                ShaderStageFlags::FRAGMENT
            )
            .is_ok()
    );
}

#[test]
fn test_undefined_stage_follows_policy() {
    let vulkan = BarrierPolicy::vulkan()
        .compute_barrier(
            ResourceUsage::Undefined,
            ResourceUsage::TransferDestination,
            ShaderStageFlags::empty(),
        )
        .unwrap();
    assert_eq!(vulkan.barrier.current_stage, StageFlags::empty());

    let custom = BarrierPolicy::generic()
        .with_undefined_stage(StageFlags::TRANSFER)
        .compute_barrier(
            ResourceUsage::Undefined,
            ResourceUsage::TransferDestination,
            ShaderStageFlags::empty(),
        )
        .unwrap();
    assert_eq!(custom.barrier.current_stage, StageFlags::TRANSFER);
}

#[test]
fn test_validate_rejects_mismatched_access() {
    let barrier = PipelineBarrier {
        current_usage: ResourceUsage::ShaderResource,
        current_stage: StageFlags::VERTEX_INPUT,
        current_access: AccessFlags::SHADER_READ,
        next_usage: ResourceUsage::RenderTarget,
        next_stage: StageFlags::RENDER_TARGET,
        next_access: AccessFlags::RENDER_TARGET_WRITE,
    };

    assert_eq!(
        barrier.validate(&BarrierPolicy::generic()),
        Err(PipelineStateError::IncompatibleStageAccess {
            stage: StageFlags::VERTEX_INPUT,
            access: AccessFlags::SHADER_READ,
        })
    );
}

#[test]
fn test_policy_table_lookup() {
    let mut table = BarrierPolicyTable::new();
    assert_eq!(*table.policy_for(BackendKind::Vulkan), BarrierPolicy::generic());

    table = BarrierPolicyTable::with_presets();
    assert_eq!(*table.policy_for(BackendKind::Vulkan), BarrierPolicy::vulkan());
    assert_eq!(*table.policy_for(BackendKind::D3D12), BarrierPolicy::d3d12());
    assert_eq!(
        *table.policy_for(BackendKind::Custom("metal")),
        BarrierPolicy::generic()
    );

    let strict = BarrierPolicy::generic().with_read_between_writes(true);
    assert!(table.register(BackendKind::Custom("metal"), strict.clone()).is_none());
    assert_eq!(*table.policy_for(BackendKind::Custom("metal")), strict);

    assert!(table.unregister(BackendKind::Vulkan).is_some());
    assert!(!table.contains(BackendKind::Vulkan));
    assert_eq!(*table.policy_for(BackendKind::Vulkan), BarrierPolicy::generic());
}

// ============================================================================
// Tracking Tests
// ============================================================================

#[test]
fn test_tracker_changes_only_on_success() {
    let policy = BarrierPolicy::d3d12();
    let mut depth = TrackedResource::new(ResourceId(7));

    let barrier = depth
        .transition(ResourceUsage::DepthStencilWrite, ShaderStageFlags::empty(), &policy)
        .unwrap();
    assert!(barrier.is_some());
    assert_eq!(depth.usage(), ResourceUsage::DepthStencilWrite);

    let rejected = depth.transition(
        ResourceUsage::RenderTarget,
        ShaderStageFlags::empty(),
        &policy,
    );
    assert!(rejected.is_err());
    assert_eq!(depth.usage(), ResourceUsage::DepthStencilWrite);

    let rejected = depth.transition(ResourceUsage::Undefined, ShaderStageFlags::empty(), &policy);
    assert!(rejected.is_err());
    assert_eq!(depth.usage(), ResourceUsage::DepthStencilWrite);
}

#[test]
fn test_tracker_skips_needless_barriers() {
    let policy = BarrierPolicy::generic();
    let mut texture = TrackedResource::with_scope(
        ResourceId(1),
        UsageScope::new(ResourceUsage::ShaderResource, ShaderStageFlags::FRAGMENT),
    );

    let barrier = texture
        .transition(ResourceUsage::ShaderResource, ShaderStageFlags::FRAGMENT, &policy)
        .unwrap();
    assert!(barrier.is_none());
}

#[test]
fn test_batch_merges_per_resource() {
    let policy = BarrierPolicy::vulkan();
    let mut image = TrackedResource::new(ResourceId(3));
    let mut buffer = TrackedResource::with_scope(
        ResourceId(1),
        UsageScope::unbound(ResourceUsage::VertexBuffer),
    );
    let mut batch = BarrierBatch::new();

    image
        .transition_into(
            ResourceUsage::TransferDestination,
            ShaderStageFlags::empty(),
            &policy,
            &mut batch,
        )
        .unwrap();
    image
        .transition_into(
            ResourceUsage::ShaderResource,
            ShaderStageFlags::FRAGMENT,
            &policy,
            &mut batch,
        )
        .unwrap();
    buffer
        .transition_into(
            ResourceUsage::VertexBuffer,
            ShaderStageFlags::empty(),
            &policy,
            &mut batch,
        )
        .unwrap();

    assert_eq!(batch.len(), 1);
    let merged = batch.get(ResourceId(3)).unwrap();
    assert_eq!(merged.current_usage, ResourceUsage::Undefined);
    assert_eq!(merged.next_usage, ResourceUsage::ShaderResource);
    assert!(batch.dst_stages().contains(StageFlags::PIXEL_SHADER));
    assert!(batch.get(ResourceId(1)).is_none());
}

#[test]
fn test_batch_drops_round_trip() {
    let policy = BarrierPolicy::generic();
    let mut texture = TrackedResource::with_scope(
        ResourceId(8),
        UsageScope::new(ResourceUsage::ShaderResource, ShaderStageFlags::FRAGMENT),
    );
    let mut batch = BarrierBatch::new();

    texture
        .transition_into(
            ResourceUsage::RenderTarget,
            ShaderStageFlags::empty(),
            &policy,
            &mut batch,
        )
        .unwrap();
    assert_eq!(batch.len(), 1);

    texture
        .transition_into(
            ResourceUsage::ShaderResource,
            ShaderStageFlags::FRAGMENT,
            &policy,
            &mut batch,
        )
        .unwrap();

    // Folded SR -> SR needs no barrier.
    assert!(batch.is_empty());
    assert_eq!(texture.usage(), ResourceUsage::ShaderResource);
}

#[test]
fn test_batch_rejects_forbidden_fold() {
    let policy = BarrierPolicy::d3d12();
    let mut depth = TrackedResource::with_scope(
        ResourceId(4),
        UsageScope::unbound(ResourceUsage::DepthStencilWrite),
    );
    let mut batch = BarrierBatch::new();

    depth
        .transition_into(
            ResourceUsage::ShaderResource,
            ShaderStageFlags::FRAGMENT,
            &policy,
            &mut batch,
        )
        .unwrap();

    let result = depth.transition_into(
        ResourceUsage::RenderTarget,
        ShaderStageFlags::empty(),
        &policy,
        &mut batch,
    );
    assert!(matches!(
        result,
        Err(PipelineStateError::UnsupportedTransition {
            from: ResourceUsage::DepthStencilWrite,
            to: ResourceUsage::RenderTarget,
            ..
        })
    ));

    // Every queued barrier stays valid for the policy.
    for (_, barrier) in batch.iter() {
        assert!(!policy.is_forbidden(barrier.current_usage, barrier.next_usage));
        assert_eq!(barrier.validate(&policy), Ok(()));
    }
    assert_eq!(depth.usage(), ResourceUsage::ShaderResource);

    // After submitting, the transition goes through on a fresh batch.
    batch.clear();
    depth
        .transition_into(
            ResourceUsage::RenderTarget,
            ShaderStageFlags::empty(),
            &policy,
            &mut batch,
        )
        .unwrap();
    assert_eq!(depth.usage(), ResourceUsage::RenderTarget);
}

#[cfg(feature = "dummy")]
#[test]
fn test_batch_submits_in_resource_order() {
    use redlilium_pipeline_state::DummyCommandList;

    common::init_logging();
    let policy = BarrierPolicy::generic();
    let mut batch = BarrierBatch::new();

    for id in [9, 2, 5] {
        let transition = policy
            .compute_barrier(
                ResourceUsage::RenderTarget,
                ResourceUsage::ShaderResource,
                ShaderStageFlags::FRAGMENT,
            )
            .unwrap();
        batch.add(ResourceId(id), &transition, &policy).unwrap();
    }

    let mut command_list = DummyCommandList::new();
    batch.submit(&mut command_list);

    let ids: Vec<u64> = command_list
        .barriers()
        .iter()
        .map(|(id, _)| id.raw())
        .collect();
    assert_eq!(ids, vec![2, 5, 9]);

    batch.clear();
    assert!(batch.is_empty());
    assert_eq!(batch.src_stages(), StageFlags::empty());
}
