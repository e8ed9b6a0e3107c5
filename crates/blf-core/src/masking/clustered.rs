//! Cluster-scoped masking: the toggle covers only the index ranges of
//! clusters the rendering layer has marked enabled.

use std::ops::Range;

use tracing::warn;

use super::MaskingPolicy;
use crate::space::LinkedIndexSpace;

/// Mask-unselected toggle restricted to enabled clusters.
///
/// The policy holds one contiguous index range per cluster, in cluster
/// order, plus an enabled flag per cluster supplied by the rendering layer.
/// Disabled clusters are never touched, in either direction, and both the
/// affected count and the total count used for the all-unhighlighted
/// reversion are computed over enabled ranges only. With no clusters enabled
/// the toggle does nothing and `nothing_masked` keeps its value.
#[derive(Debug)]
pub struct ClusterToggleMasking {
    masking: bool,
    nothing_masked: bool,
    ranges: Vec<Range<usize>>,
    enabled: Vec<bool>,
}

impl ClusterToggleMasking {
    /// Create a policy over the given cluster ranges, all clusters enabled.
    pub fn new(ranges: Vec<Range<usize>>) -> Self {
        let enabled = vec![true; ranges.len()];
        Self {
            masking: false,
            nothing_masked: true,
            ranges,
            enabled,
        }
    }

    /// Number of clusters this policy spans.
    pub fn cluster_count(&self) -> usize {
        self.ranges.len()
    }

    /// Whether cluster `cluster` participates in toggling.
    pub fn is_cluster_enabled(&self, cluster: usize) -> bool {
        self.enabled[cluster]
    }

    /// Enable or disable a single cluster.
    pub fn set_cluster_enabled(&mut self, cluster: usize, enabled: bool) {
        self.enabled[cluster] = enabled;
    }

    /// Replace the whole enabled set, one flag per cluster in cluster order.
    /// A length mismatch is rejected and leaves the current set unchanged.
    pub fn set_enabled(&mut self, enabled: Vec<bool>) {
        if enabled.len() != self.ranges.len() {
            warn!(
                "enabled set has {} entries for {} clusters; ignoring",
                enabled.len(),
                self.ranges.len()
            );
            return;
        }
        self.enabled = enabled;
    }

    fn enabled_ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.ranges
            .iter()
            .zip(&self.enabled)
            .filter(|(_, on)| **on)
            .map(|(range, _)| range.clone())
    }
}

impl MaskingPolicy for ClusterToggleMasking {
    fn toggle(&mut self, space: &LinkedIndexSpace) {
        if space.is_empty() {
            return;
        }

        let total: usize = self.enabled_ranges().map(|range| range.len()).sum();
        if total == 0 {
            return;
        }

        if self.masking {
            for range in self.enabled_ranges() {
                for index in range {
                    space.set_masked(index, false);
                }
            }
            self.masking = false;
            self.nothing_masked = true;
            return;
        }

        let mut affected = 0;
        for range in self.enabled_ranges() {
            for index in range {
                if !space.highlighted(index) {
                    space.set_masked(index, true);
                    affected += 1;
                }
            }
        }

        if affected == total {
            // Nothing highlighted within enabled clusters; revert.
            for range in self.enabled_ranges() {
                for index in range {
                    space.set_masked(index, false);
                }
            }
            self.masking = false;
            self.nothing_masked = true;
        } else {
            self.masking = true;
            self.nothing_masked = false;
        }
    }

    fn is_masking(&self) -> bool {
        self.masking
    }

    fn nothing_masked(&self) -> bool {
        self.nothing_masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_enabled_clusters_is_a_no_op() {
        let space = LinkedIndexSpace::new(6);
        let mut policy = ClusterToggleMasking::new(vec![0..3, 3..6]);
        policy.set_enabled(vec![false, false]);

        space.set_highlighted(1, true);
        policy.toggle(&space);

        assert!(!policy.is_masking());
        assert!(policy.nothing_masked());
        for index in 0..6 {
            assert!(!space.masked(index));
        }
    }

    #[test]
    fn mismatched_enabled_set_is_rejected() {
        let mut policy = ClusterToggleMasking::new(vec![0..3, 3..6]);
        policy.set_enabled(vec![false]);
        assert!(policy.is_cluster_enabled(0));
        assert!(policy.is_cluster_enabled(1));
    }
}
