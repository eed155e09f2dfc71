//! Sensor Log Core Library
//!
//! Ordered reading lists, the pressure and temperature sensor variants,
//! and the registry that owns them and dispatches bulk operations by name.

pub mod error;
pub mod list;
pub mod name;
pub mod observer;
pub mod registry;
pub mod sensor;

pub use error::{Error, Result};
pub use list::{OrderedList, Reading};
pub use name::{SensorName, MAX_NAME_LEN};
pub use observer::{ListEvent, ListObserver, RegistryEvent, RegistryObserver, TracingObserver};
pub use registry::SensorRegistry;
pub use sensor::{Outcome, PressureSensor, Report, Sensor, SensorKind, TemperatureSensor};
