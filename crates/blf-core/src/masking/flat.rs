//! Flat masking: the toggle covers every index in the space.

use super::MaskingPolicy;
use crate::space::LinkedIndexSpace;

/// Two-state mask-unselected toggle over the whole index space.
///
/// The unmasked-to-masking transition masks every index that is not
/// highlighted. If that covers the entire space (nothing is highlighted at
/// all), the transition is reverted on the spot: masking everything is
/// indistinguishable from masking nothing, and would hide the whole dataset.
#[derive(Debug)]
pub struct ToggleMasking {
    masking: bool,
    nothing_masked: bool,
}

impl ToggleMasking {
    /// Create a policy in the unmasked state.
    pub fn new() -> Self {
        Self {
            masking: false,
            nothing_masked: true,
        }
    }
}

impl Default for ToggleMasking {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskingPolicy for ToggleMasking {
    fn toggle(&mut self, space: &LinkedIndexSpace) {
        if space.is_empty() {
            return;
        }

        if self.masking {
            for index in 0..space.len() {
                space.set_masked(index, false);
            }
            self.masking = false;
            self.nothing_masked = true;
            return;
        }

        let total = space.len();
        let mut affected = 0;
        for index in 0..total {
            if !space.highlighted(index) {
                space.set_masked(index, true);
                affected += 1;
            }
        }

        if affected == total {
            // Nothing highlighted; revert rather than masking the whole dataset.
            for index in 0..total {
                space.set_masked(index, false);
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
    fn toggle_on_empty_space_is_a_no_op() {
        let space = LinkedIndexSpace::new(0);
        let mut policy = ToggleMasking::new();
        policy.toggle(&space);
        assert!(!policy.is_masking());
        assert!(policy.nothing_masked());
        assert!(!space.any_changed());
    }

    #[test]
    fn toggle_with_no_highlight_reverts() {
        let space = LinkedIndexSpace::new(4);
        let mut policy = ToggleMasking::new();
        policy.toggle(&space);
        assert!(!policy.is_masking());
        assert!(policy.nothing_masked());
        for index in 0..4 {
            assert!(!space.masked(index));
        }
    }
}
