//! Pressure sensor.

use super::{describe_history, Outcome, Sensor, SensorKind};
use crate::list::OrderedList;
use crate::observer::ListObserver;
use crate::SensorName;
use std::sync::Arc;
use tracing::{debug, info};

/// Pressure sensor storing readings as whole pascals.
///
/// Processing averages every stored reading and leaves them in place.
#[derive(Debug, Clone)]
pub struct PressureSensor {
    name: SensorName,
    history: OrderedList<i32>,
}

impl PressureSensor {
    /// Creates a new pressure sensor.
    pub fn new(name: impl Into<SensorName>) -> Self {
        Self::with_history(name, OrderedList::new())
    }

    /// Creates a new pressure sensor whose readings report to `observer`.
    pub fn with_observer(
        name: impl Into<SensorName>,
        observer: Arc<dyn ListObserver<i32>>,
    ) -> Self {
        Self::with_history(name, OrderedList::with_observer(observer))
    }

    fn with_history(name: impl Into<SensorName>, history: OrderedList<i32>) -> Self {
        let name = name.into();
        info!("Pressure sensor '{}' created", name);
        Self { name, history }
    }

    /// Returns the stored readings.
    pub fn history(&self) -> &OrderedList<i32> {
        &self.history
    }
}

impl Sensor for PressureSensor {
    fn name(&self) -> &SensorName {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Pressure
    }

    fn record(&mut self, value: f64) {
        // Truncates toward zero; out-of-range values saturate and NaN becomes 0
        let pascals = value as i32;
        debug!("[{}] Recording reading: {} Pa", self.name, pascals);
        self.history.append(pascals);
    }

    fn process(&mut self) -> Outcome {
        let Ok(average) = self.history.average() else {
            info!("Pressure sensor '{}' has no readings", self.name);
            return Outcome::NoReadings;
        };
        let readings = self.history.len();
        info!(
            "Pressure sensor '{}': average over {} reading(s): {} Pa",
            self.name, readings, average
        );
        Outcome::Averaged { readings, average }
    }

    fn describe(&self) -> String {
        describe_history(SensorKind::Pressure, &self.name, &self.history)
    }

    fn readings(&self) -> usize {
        self.history.len()
    }

    fn clone_box(&self) -> Box<dyn Sensor> {
        Box::new(self.clone())
    }
}

impl Drop for PressureSensor {
    fn drop(&mut self) {
        debug!("Releasing readings of pressure sensor '{}'", self.name);
    }
}
