//! State-change notifications for lists and the registry.
//!
//! Lists and registries report every mutation to an observer instead of
//! writing to a fixed sink. [`TracingObserver`] is the default and turns
//! events into `tracing` records.

use std::fmt::Display;
use tracing::{debug, info, warn};

/// A mutation of an [`OrderedList`](crate::OrderedList).
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<T> {
    /// A value was appended; `len` is the new length.
    Appended { value: T, len: usize },
    /// The first minimal value was unlinked; `len` is the new length.
    MinimumRemoved { value: T, len: usize },
    /// Every node was released.
    Cleared { released: usize },
}

/// A mutation or notable condition of a [`SensorRegistry`](crate::SensorRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A sensor was appended; `len` is the new sensor count.
    Inserted { name: String, len: usize },
    /// An insertion was refused and the registry left untouched.
    Rejected { reason: String },
    /// A bulk operation was requested on an empty registry.
    Empty { operation: &'static str },
    /// A sensor and its readings were released during teardown.
    Released { name: String, readings: usize },
    /// Teardown finished.
    TornDown { released: usize },
    /// A copy was requested that does not carry the sensors over.
    CopyUnsupported,
}

/// Receives list mutations.
pub trait ListObserver<T>: Send + Sync {
    /// Called after the list has been updated.
    fn on_list_event(&self, event: &ListEvent<T>);
}

/// Receives registry mutations.
pub trait RegistryObserver: Send + Sync {
    /// Called after the registry has been updated.
    fn on_registry_event(&self, event: &RegistryEvent);
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<T: Display> ListObserver<T> for TracingObserver {
    fn on_list_event(&self, event: &ListEvent<T>) {
        match event {
            ListEvent::Appended { value, len } => {
                debug!("Node {} inserted, list length now {}", value, len)
            }
            ListEvent::MinimumRemoved { value, len } => {
                debug!("Node {} released, list length now {}", value, len)
            }
            ListEvent::Cleared { released } => debug!("List cleared, {} node(s) released", released),
        }
    }
}

impl RegistryObserver for TracingObserver {
    fn on_registry_event(&self, event: &RegistryEvent) {
        match event {
            RegistryEvent::Inserted { name, len } => {
                info!("Sensor '{}' registered ({} total)", name, len)
            }
            RegistryEvent::Rejected { reason } => warn!("Sensor rejected: {}", reason),
            RegistryEvent::Empty { operation } => {
                warn!("No sensors registered, nothing to {}", operation)
            }
            RegistryEvent::Released { name, readings } => {
                debug!("Releasing sensor '{}' with {} reading(s)", name, readings)
            }
            RegistryEvent::TornDown { released } => {
                info!("Registry torn down, {} sensor(s) released", released)
            }
            RegistryEvent::CopyUnsupported => {
                warn!("Registry copy does not carry sensors over; the copy is empty")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording observers shared by the unit tests.

    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct Recorder<T> {
        events: Mutex<Vec<ListEvent<T>>>,
    }

    impl<T: Clone> Recorder<T> {
        pub fn events(&self) -> Vec<ListEvent<T>> {
            self.events.lock().unwrap().clone()
        }
    }

    impl<T: Clone + Send> ListObserver<T> for Recorder<T> {
        fn on_list_event(&self, event: &ListEvent<T>) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[derive(Default)]
    pub struct RegistryRecorder {
        events: Mutex<Vec<RegistryEvent>>,
    }

    impl RegistryRecorder {
        pub fn events(&self) -> Vec<RegistryEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RegistryObserver for RegistryRecorder {
        fn on_registry_event(&self, event: &RegistryEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
