//! The linked index space: per-point attributes shared by every view of one
//! dataset, with change tracking and two-phase listener notification.

mod listener;

pub use listener::SpaceListener;

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, warn};

/// Per-index attribute record.
///
/// Listeners receive copies of this record; mutating a copy has no effect on
/// the space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexAttributes {
    /// Whether the point is part of the current selection.
    pub highlighted: bool,
    /// Whether the point is hidden by a masking policy.
    pub masked: bool,
    /// Set by guarded writes, cleared by [`LinkedIndexSpace::commit`].
    pub(crate) changed: bool,
}

/// Internal state guarded by one lock so writes and the commit scan observe a
/// consistent snapshot.
struct SpaceState {
    attributes: Vec<IndexAttributes>,
    any_changed: bool,
}

/// The shared per-point attribute space enabling brushing, linking and
/// filtering across views.
///
/// Attribute writes are guarded: writing a value equal to the current one is
/// a no-op and does not flag a change. Accumulated changes are delivered to
/// listeners by [`commit`](Self::commit), once per update tick, as at most
/// one per-index notification per changed index plus a single bulk refresh.
///
/// Listeners are held weakly; the space never controls their lifetime. Dead
/// references are pruned during notification. Registering or removing a
/// listener from inside a callback is safe and takes effect at the next
/// commit. Writing attributes from inside a callback is unsupported: the
/// write succeeds, but the tick it is delivered on is unspecified.
///
/// Index arguments are bounds-checked; out-of-range access panics.
pub struct LinkedIndexSpace {
    state: RwLock<SpaceState>,
    listeners: RwLock<Vec<Weak<dyn SpaceListener>>>,
}

impl LinkedIndexSpace {
    /// Create a space for `size` data points, all attributes cleared.
    pub fn new(size: usize) -> Self {
        Self {
            state: RwLock::new(SpaceState {
                attributes: vec![IndexAttributes::default(); size],
                any_changed: false,
            }),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Re-initialize to `size` cleared records, discarding all prior
    /// attribute state, and notify listeners via
    /// [`SpaceListener::on_reinitialized`].
    pub fn init(&self, size: usize) {
        {
            let mut state = self.state.write();
            state.attributes = vec![IndexAttributes::default(); size];
            state.any_changed = false;
        }
        self.notify_reinitialized();
    }

    /// Number of data points tracked by this space.
    pub fn len(&self) -> usize {
        self.state.read().attributes.len()
    }

    /// Whether the space tracks no points at all.
    pub fn is_empty(&self) -> bool {
        self.state.read().attributes.is_empty()
    }

    /// Whether any index has an undelivered attribute change.
    pub fn any_changed(&self) -> bool {
        self.state.read().any_changed
    }

    /// Current attribute record for `index`.
    pub fn attributes(&self, index: usize) -> IndexAttributes {
        self.state.read().attributes[index]
    }

    /// Whether `index` is part of the current selection.
    pub fn highlighted(&self, index: usize) -> bool {
        self.state.read().attributes[index].highlighted
    }

    /// Guarded write of the `highlighted` attribute.
    pub fn set_highlighted(&self, index: usize, highlighted: bool) {
        let mut state = self.state.write();
        let record = &mut state.attributes[index];
        if record.highlighted == highlighted {
            return;
        }
        record.highlighted = highlighted;
        record.changed = true;
        state.any_changed = true;
    }

    /// Whether `index` is currently hidden.
    pub fn masked(&self, index: usize) -> bool {
        self.state.read().attributes[index].masked
    }

    /// Guarded write of the `masked` attribute.
    pub fn set_masked(&self, index: usize, masked: bool) {
        let mut state = self.state.write();
        let record = &mut state.attributes[index];
        if record.masked == masked {
            return;
        }
        record.masked = masked;
        record.changed = true;
        state.any_changed = true;
    }

    /// Number of indices with `highlighted == true`.
    pub fn highlighted_count(&self) -> usize {
        self.state
            .read()
            .attributes
            .iter()
            .filter(|record| record.highlighted)
            .count()
    }

    /// Force every record back to `highlighted == false`, `masked == false`
    /// and notify listeners via [`SpaceListener::on_reinitialized`].
    ///
    /// Invoked automatically when the last listener detaches, so stale
    /// selection state never leaks into a newly attached consumer.
    pub fn reset(&self) {
        {
            let mut state = self.state.write();
            let mut any = false;
            for record in state.attributes.iter_mut() {
                if record.highlighted || record.masked {
                    record.highlighted = false;
                    record.masked = false;
                    record.changed = true;
                    any = true;
                }
            }
            if any {
                state.any_changed = true;
            }
        }
        self.notify_reinitialized();
    }

    /// Register a listener. The space keeps only a weak reference; the
    /// caller retains ownership. Adding a listener twice is a no-op.
    pub fn add_listener(&self, listener: Arc<dyn SpaceListener>) {
        let probe = Arc::downgrade(&listener);
        let mut listeners = self.listeners.write();
        listeners.retain(|weak| weak.strong_count() > 0);
        if listeners.iter().any(|weak| same_listener(weak, &probe)) {
            warn!("listener already registered, ignoring duplicate add");
            return;
        }
        listeners.push(probe);
    }

    /// Remove a listener. Removing one that was never registered is a no-op.
    /// If the registry becomes empty the space is [`reset`](Self::reset).
    pub fn remove_listener(&self, listener: Arc<dyn SpaceListener>) {
        let probe = Arc::downgrade(&listener);
        let now_empty = {
            let mut listeners = self.listeners.write();
            let before = listeners.len();
            listeners.retain(|weak| weak.strong_count() > 0 && !same_listener(weak, &probe));
            if listeners.len() == before {
                debug!("remove_listener: listener was not registered");
            }
            listeners.is_empty()
        };
        if now_empty {
            self.reset();
        }
    }

    /// Number of live registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Deliver accumulated changes: one
    /// [`on_index_changed`](SpaceListener::on_index_changed) per changed
    /// index per listener, then exactly one
    /// [`on_any_changed`](SpaceListener::on_any_changed) per listener.
    /// O(1) when nothing changed since the last commit.
    ///
    /// Changed records and the listener list are snapshotted before any
    /// callback runs, so listeners observe a consistent post-tick state and
    /// may read the space freely from inside a callback.
    pub fn commit(&self) {
        {
            let state = self.state.read();
            if !state.any_changed {
                return;
            }
        }

        let mut deltas = Vec::new();
        {
            let mut state = self.state.write();
            for (index, record) in state.attributes.iter_mut().enumerate() {
                if record.changed {
                    record.changed = false;
                    deltas.push((index, *record));
                }
            }
            state.any_changed = false;
        }

        let listeners = self.live_listeners();
        for (index, attributes) in &deltas {
            for listener in &listeners {
                listener.on_index_changed(*index, *attributes);
            }
        }
        for listener in &listeners {
            listener.on_any_changed();
        }
    }

    /// Prune dead references and upgrade the survivors.
    fn live_listeners(&self) -> Vec<Arc<dyn SpaceListener>> {
        let mut listeners = self.listeners.write();
        listeners.retain(|weak| weak.strong_count() > 0);
        listeners.iter().filter_map(Weak::upgrade).collect()
    }

    fn notify_reinitialized(&self) {
        for listener in self.live_listeners() {
            listener.on_reinitialized();
        }
    }
}

/// Identity comparison by allocation address. `Weak::ptr_eq` also compares
/// vtable pointers, which may differ across codegen units for the same
/// object.
fn same_listener(a: &Weak<dyn SpaceListener>, b: &Weak<dyn SpaceListener>) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_write_is_a_no_op_for_equal_value() {
        let space = LinkedIndexSpace::new(4);
        space.set_highlighted(2, false);
        assert!(!space.any_changed());

        space.set_highlighted(2, true);
        assert!(space.any_changed());
    }

    #[test]
    fn commit_clears_change_flags() {
        let space = LinkedIndexSpace::new(3);
        space.set_masked(0, true);
        space.commit();
        assert!(!space.any_changed());
        assert!(space.masked(0));
    }

    #[test]
    fn reset_clears_all_attributes() {
        let space = LinkedIndexSpace::new(3);
        space.set_highlighted(1, true);
        space.set_masked(2, true);
        space.reset();
        for index in 0..3 {
            assert!(!space.highlighted(index));
            assert!(!space.masked(index));
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let space = LinkedIndexSpace::new(2);
        space.highlighted(2);
    }
}
