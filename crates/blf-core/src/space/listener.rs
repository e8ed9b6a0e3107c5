//! Listener seam for components that track the linked index space.

use super::IndexAttributes;

/// Trait for components that need to stay in sync with per-point attributes.
///
/// Rendering components implement this to redraw when the selection or mask
/// state changes; no other coupling to the views is required. Registration
/// is weak: the space never owns a listener.
pub trait SpaceListener: Send + Sync {
    /// Called once per changed index during a commit, with a read-only copy
    /// of the post-tick attribute record. Intended for cheap per-point
    /// bookkeeping.
    fn on_index_changed(&self, index: usize, attributes: IndexAttributes);

    /// Called exactly once per commit after all per-index notifications,
    /// and only if at least one index changed. Intended for the expensive
    /// whole-visual refresh.
    fn on_any_changed(&self);

    /// Called when the space is re-initialized or reset wholesale,
    /// independent of the per-point delta mechanism.
    fn on_reinitialized(&self);
}
