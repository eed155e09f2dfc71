//! Sensor registry.
//!
//! The registry exclusively owns every sensor inserted into it, keeps them
//! in insertion order and dispatches bulk operations across them. Dropping
//! the registry releases each sensor, and with it each sensor's readings,
//! in that same order.

use crate::observer::{RegistryEvent, RegistryObserver, TracingObserver};
use crate::sensor::{Report, Sensor};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Ordered collection of named sensors.
///
/// Names are not required to be unique. Lookups always resolve to the
/// earliest sensor with a matching name.
pub struct SensorRegistry {
    sensors: Vec<Box<dyn Sensor>>,
    observer: Arc<dyn RegistryObserver>,
}

impl SensorRegistry {
    /// Creates an empty registry reporting to [`TracingObserver`].
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Creates an empty registry reporting to `observer`.
    pub fn with_observer(observer: Arc<dyn RegistryObserver>) -> Self {
        Self {
            sensors: Vec::new(),
            observer,
        }
    }

    /// Appends a sensor.
    ///
    /// An absent sensor is reported to the observer and refused with
    /// [`Error::InvalidArgument`]; the registry is left as it was.
    pub fn insert(&mut self, sensor: Option<Box<dyn Sensor>>) -> Result<()> {
        let Some(sensor) = sensor else {
            let reason = "attempted to insert an absent sensor".to_string();
            self.notify(RegistryEvent::Rejected {
                reason: reason.clone(),
            });
            return Err(Error::InvalidArgument(reason));
        };

        self.push(sensor);
        Ok(())
    }

    /// Appends a sensor that is known to be present.
    pub fn add(&mut self, sensor: impl Sensor + 'static) {
        self.push(Box::new(sensor));
    }

    /// Appends an already boxed sensor.
    pub fn push(&mut self, sensor: Box<dyn Sensor>) {
        let name = sensor.name().to_string();
        self.sensors.push(sensor);
        self.notify(RegistryEvent::Inserted {
            name,
            len: self.sensors.len(),
        });
    }

    /// Returns the first sensor whose name matches `name`.
    ///
    /// The query is cut to the same length bound as stored names, so a
    /// sensor is always found under the name it was created with.
    pub fn find_by_name(&self, name: &str) -> Option<&(dyn Sensor + 'static)> {
        self.sensors
            .iter()
            .find(|sensor| sensor.name().matches(name))
            .map(|sensor| sensor.as_ref())
    }

    /// Returns the first sensor whose name matches `name`, mutably.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut (dyn Sensor + 'static)> {
        self.sensors
            .iter_mut()
            .find(|sensor| sensor.name().matches(name))
            .map(|sensor| sensor.as_mut())
    }

    /// Records `value` on the first sensor named `name`.
    pub fn record(&mut self, name: &str, value: f64) -> Result<()> {
        let sensor = self
            .find_by_name_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        sensor.record(value);
        Ok(())
    }

    /// Processes every sensor in insertion order.
    pub fn process_all(&mut self) -> Vec<Report> {
        if self.sensors.is_empty() {
            self.notify(RegistryEvent::Empty {
                operation: "process",
            });
            return Vec::new();
        }

        self.sensors
            .iter_mut()
            .map(|sensor| Report {
                name: sensor.name().clone(),
                kind: sensor.kind(),
                outcome: sensor.process(),
            })
            .collect()
    }

    /// Describes every sensor in insertion order, each headed by its
    /// 1-based position.
    pub fn describe_all(&self) -> String {
        if self.sensors.is_empty() {
            self.notify(RegistryEvent::Empty {
                operation: "describe",
            });
            return String::new();
        }

        self.sensors
            .iter()
            .enumerate()
            .map(|(i, sensor)| format!("[Sensor #{}]\n{}", i + 1, sensor.describe()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Returns the number of sensors.
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns true if no sensors are registered.
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Iterates over the sensors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Sensor + 'static)> {
        self.sensors.iter().map(|sensor| sensor.as_ref())
    }

    /// Releases every sensor in insertion order and returns how many were
    /// released.
    pub fn clear(&mut self) -> usize {
        let released = self.sensors.len();
        for sensor in self.sensors.drain(..) {
            let name = sensor.name().to_string();
            let readings = sensor.readings();
            drop(sensor);
            self.observer
                .on_registry_event(&RegistryEvent::Released { name, readings });
        }
        self.notify(RegistryEvent::TornDown { released });
        released
    }

    /// Returns an empty registry sharing this one's observer.
    ///
    /// Sensors are not carried over. Use [`SensorRegistry::deep_clone`] for a
    /// copy that owns duplicates of every sensor.
    pub fn shallow_copy(&self) -> Self {
        self.notify(RegistryEvent::CopyUnsupported);
        Self::with_observer(Arc::clone(&self.observer))
    }

    /// Returns a registry owning an independent copy of every sensor.
    pub fn deep_clone(&self) -> Self {
        Self {
            sensors: self.sensors.iter().map(|sensor| sensor.clone_box()).collect(),
            observer: Arc::clone(&self.observer),
        }
    }

    fn notify(&self, event: RegistryEvent) {
        self.observer.on_registry_event(&event);
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SensorRegistry {
    fn drop(&mut self) {
        if !self.sensors.is_empty() {
            self.clear();
        }
    }
}

impl fmt::Debug for SensorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorRegistry")
            .field("sensors", &self.sensors)
            .finish_non_exhaustive()
    }
}
