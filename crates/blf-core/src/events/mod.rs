//! System-wide event bus for dataset lifecycle notifications.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common system events
pub mod events {
    use super::Event;

    /// A dataset was loaded and a fresh index space was created for it.
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub row_count: usize,
    }

    /// The current dataset was cleared.
    #[derive(Debug, Clone)]
    pub struct DatasetCleared {
        pub source_name: String,
    }

    /// A dataset failed to load and was degraded to an empty one.
    #[derive(Debug, Clone)]
    pub struct DatasetError {
        pub source_name: String,
        pub error: String,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(DatasetLoaded, DatasetCleared, DatasetError);
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::DatasetLoaded;
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn publish_reaches_matching_subscribers_only() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_clone = seen.clone();
        bus.subscribe::<DatasetLoaded>(handler_from_fn(move |event| {
            let loaded = event
                .as_any()
                .downcast_ref::<DatasetLoaded>()
                .expect("subscribed to DatasetLoaded");
            assert_eq!(loaded.row_count, 7);
            seen_clone.fetch_add(1, Ordering::SeqCst);
        }));

        bus.publish(DatasetLoaded {
            source_name: "test.csv".to_string(),
            row_count: 7,
        });
        bus.publish(super::events::DatasetCleared {
            source_name: "test.csv".to_string(),
        });

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
