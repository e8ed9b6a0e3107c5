//! Session state tying the current dataset to its linked index space.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::data::DataSet;
use crate::events::{events, EventBus};
use crate::space::LinkedIndexSpace;

/// The main session state.
///
/// Owns the event bus and the linked index space for the currently loaded
/// dataset. The space is created fresh whenever the dataset changes, sized
/// to its row count, and replaced together with it; consumers must
/// re-register their listeners on the new space after a load.
pub struct Session {
    /// The event bus
    event_bus: Arc<EventBus>,

    /// Index space for the current dataset
    space: RwLock<Arc<LinkedIndexSpace>>,

    /// The currently loaded dataset
    dataset: RwLock<Option<Arc<dyn DataSet>>>,
}

impl Session {
    /// Create a session with no dataset and an empty index space.
    pub fn new() -> Self {
        Self {
            event_bus: Arc::new(EventBus::new()),
            space: RwLock::new(Arc::new(LinkedIndexSpace::new(0))),
            dataset: RwLock::new(None),
        }
    }

    /// The event bus.
    pub fn event_bus(&self) -> Arc<EventBus> {
        self.event_bus.clone()
    }

    /// The index space of the current dataset.
    pub fn space(&self) -> Arc<LinkedIndexSpace> {
        self.space.read().clone()
    }

    /// The currently loaded dataset, if any.
    pub fn dataset(&self) -> Option<Arc<dyn DataSet>> {
        self.dataset.read().clone()
    }

    /// Load a dataset, replacing the index space with a fresh one sized to
    /// the dataset's row count.
    pub fn load_dataset(&self, dataset: Arc<dyn DataSet>) {
        let source_name = dataset.source_name().to_string();
        let row_count = dataset.row_count();

        if dataset.is_empty() {
            warn!("dataset '{}' is empty; views will have nothing to show", source_name);
            self.event_bus.publish(events::DatasetError {
                source_name: source_name.clone(),
                error: "dataset is empty".to_string(),
            });
        }

        *self.space.write() = Arc::new(LinkedIndexSpace::new(row_count));
        *self.dataset.write() = Some(dataset);

        info!("loaded dataset '{}' with {} rows", source_name, row_count);
        self.event_bus.publish(events::DatasetLoaded {
            source_name,
            row_count,
        });
    }

    /// Clear the current dataset and replace the space with an empty one.
    pub fn clear_dataset(&self) {
        let source_name = match self.dataset.write().take() {
            Some(dataset) => dataset.source_name().to_string(),
            None => return,
        };

        *self.space.write() = Arc::new(LinkedIndexSpace::new(0));
        self.event_bus.publish(events::DatasetCleared { source_name });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
