//! Tests for the flat and cluster-scoped masking toggles.

use blf_core::{ClusterToggleMasking, LinkedIndexSpace, MaskingPolicy, ToggleMasking};

#[test]
fn flat_toggle_masks_everything_unselected() {
    let space = LinkedIndexSpace::new(5);
    space.set_highlighted(1, true);
    space.set_highlighted(3, true);

    let mut policy = ToggleMasking::new();
    policy.toggle(&space);

    assert!(policy.is_masking());
    assert!(!policy.nothing_masked());
    for index in 0..5 {
        assert_eq!(space.masked(index), index == 0 || index == 2 || index == 4);
    }

    policy.toggle(&space);
    assert!(!policy.is_masking());
    assert!(policy.nothing_masked());
    for index in 0..5 {
        assert!(!space.masked(index));
    }
}

#[test]
fn flat_toggle_with_empty_selection_reverts() {
    let space = LinkedIndexSpace::new(4);
    assert_eq!(space.highlighted_count(), 0);

    let mut policy = ToggleMasking::new();
    policy.toggle(&space);

    assert!(!policy.is_masking());
    assert!(policy.nothing_masked());
    for index in 0..4 {
        assert!(!space.masked(index));
    }
}

#[test]
fn flat_reversion_leaves_no_pending_mask_state_visible() {
    let space = LinkedIndexSpace::new(3);
    let mut policy = ToggleMasking::new();
    policy.toggle(&space);
    space.commit();

    // Mask and unmask within one tick collapse through the guarded writes.
    for index in 0..3 {
        assert!(!space.masked(index));
    }
}

#[test]
fn cluster_toggle_only_touches_enabled_clusters() {
    let space = LinkedIndexSpace::new(5);
    space.set_highlighted(0, true);

    let mut policy = ClusterToggleMasking::new(vec![0..3, 3..5]);
    policy.set_cluster_enabled(1, false);
    policy.toggle(&space);

    assert!(policy.is_masking());
    assert!(!policy.nothing_masked());
    assert!(!space.masked(0));
    assert!(space.masked(1));
    assert!(space.masked(2));
    // The disabled cluster is untouched.
    assert!(!space.masked(3));
    assert!(!space.masked(4));

    policy.toggle(&space);
    for index in 0..5 {
        assert!(!space.masked(index));
    }
}

#[test]
fn cluster_reversion_counts_only_enabled_ranges() {
    let space = LinkedIndexSpace::new(5);
    // The only highlight sits in a disabled cluster.
    space.set_highlighted(0, true);

    let mut policy = ClusterToggleMasking::new(vec![0..3, 3..5]);
    policy.set_enabled(vec![false, true]);
    policy.toggle(&space);

    // Every enabled index was unhighlighted, so the toggle reverted.
    assert!(!policy.is_masking());
    assert!(policy.nothing_masked());
    for index in 0..5 {
        assert!(!space.masked(index));
    }
}

#[test]
fn cluster_unmask_skips_clusters_disabled_after_masking() {
    let space = LinkedIndexSpace::new(5);
    space.set_highlighted(0, true);

    let mut policy = ClusterToggleMasking::new(vec![0..3, 3..5]);
    policy.toggle(&space);
    assert!(space.masked(3));
    assert!(space.masked(4));

    policy.set_cluster_enabled(1, false);
    policy.toggle(&space);

    assert!(!space.masked(1));
    assert!(!space.masked(2));
    // Disabled after masking: left as it was, in either direction.
    assert!(space.masked(3));
    assert!(space.masked(4));
}

#[test]
fn toggle_on_empty_space_is_a_no_op_for_both_policies() {
    let space = LinkedIndexSpace::new(0);

    let mut flat = ToggleMasking::new();
    flat.toggle(&space);
    assert!(!flat.is_masking());

    let mut clustered = ClusterToggleMasking::new(Vec::new());
    clustered.toggle(&space);
    assert!(!clustered.is_masking());
    assert!(!space.any_changed());
}
