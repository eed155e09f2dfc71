//! Temperature sensor.

use super::{describe_history, Outcome, Sensor, SensorKind};
use crate::list::{OrderedList, Reading};
use crate::observer::ListObserver;
use crate::SensorName;
use std::sync::Arc;
use tracing::{debug, info};

/// Temperature sensor storing single-precision readings.
///
/// Processing is destructive: the lowest reading is removed first and the
/// average is taken over whatever remains.
#[derive(Debug, Clone)]
pub struct TemperatureSensor {
    name: SensorName,
    history: OrderedList<f32>,
}

impl TemperatureSensor {
    /// Creates a new temperature sensor.
    pub fn new(name: impl Into<SensorName>) -> Self {
        Self::with_history(name, OrderedList::new())
    }

    /// Creates a new temperature sensor whose readings report to `observer`.
    pub fn with_observer(
        name: impl Into<SensorName>,
        observer: Arc<dyn ListObserver<f32>>,
    ) -> Self {
        Self::with_history(name, OrderedList::with_observer(observer))
    }

    fn with_history(name: impl Into<SensorName>, history: OrderedList<f32>) -> Self {
        let name = name.into();
        info!("Temperature sensor '{}' created", name);
        Self { name, history }
    }

    /// Returns the stored readings.
    pub fn history(&self) -> &OrderedList<f32> {
        &self.history
    }
}

impl Sensor for TemperatureSensor {
    fn name(&self) -> &SensorName {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Temperature
    }

    fn record(&mut self, value: f64) {
        let celsius = value as f32;
        debug!("[{}] Recording reading: {} °C", self.name, celsius);
        self.history.append(celsius);
    }

    fn process(&mut self) -> Outcome {
        let Ok(minimum) = self.history.minimum() else {
            info!("Temperature sensor '{}' has no readings", self.name);
            return Outcome::NoReadings;
        };
        self.history.remove_minimum();
        info!(
            "Temperature sensor '{}': lowest reading ({} °C) discarded",
            self.name, minimum
        );

        let remaining = self.history.len();
        let average = self.history.average().ok();
        match average {
            Some(avg) => info!(
                "Temperature sensor '{}': average over {} reading(s): {} °C",
                self.name, remaining, avg
            ),
            None => info!("Temperature sensor '{}': no readings left", self.name),
        }

        Outcome::MinimumDiscarded {
            minimum: minimum.widen(),
            remaining,
            average,
        }
    }

    fn describe(&self) -> String {
        describe_history(SensorKind::Temperature, &self.name, &self.history)
    }

    fn readings(&self) -> usize {
        self.history.len()
    }

    fn clone_box(&self) -> Box<dyn Sensor> {
        Box::new(self.clone())
    }
}

impl Drop for TemperatureSensor {
    fn drop(&mut self) {
        debug!("Releasing readings of temperature sensor '{}'", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor_with(values: &[f64]) -> TemperatureSensor {
        let mut sensor = TemperatureSensor::new("T-001");
        for &v in values {
            sensor.record(v);
        }
        sensor
    }

    #[test]
    fn test_record_narrows_to_f32() {
        let sensor = sensor_with(&[25.5, 0.1]);
        let stored: Vec<f32> = sensor.history().iter().copied().collect();
        assert_eq!(stored, vec![25.5f32, 0.1f32]);
    }

    #[test]
    fn test_process_discards_minimum_then_averages() {
        let mut sensor = sensor_with(&[15.0, 10.0, 20.0]);

        assert_eq!(
            sensor.process(),
            Outcome::MinimumDiscarded {
                minimum: 10.0,
                remaining: 2,
                average: Some(17.5),
            }
        );
        let stored: Vec<f32> = sensor.history().iter().copied().collect();
        assert_eq!(stored, vec![15.0, 20.0]);

        assert_eq!(
            sensor.process(),
            Outcome::MinimumDiscarded {
                minimum: 15.0,
                remaining: 1,
                average: Some(20.0),
            }
        );
    }

    #[test]
    fn test_process_last_reading_leaves_nothing() {
        let mut sensor = sensor_with(&[21.0]);
        assert_eq!(
            sensor.process(),
            Outcome::MinimumDiscarded {
                minimum: 21.0,
                remaining: 0,
                average: None,
            }
        );
        assert_eq!(sensor.process(), Outcome::NoReadings);
    }

    #[test]
    fn test_process_removes_one_of_equal_minima() {
        let mut sensor = sensor_with(&[5.0, 3.0, 3.0, 7.0]);
        sensor.process();
        let stored: Vec<f32> = sensor.history().iter().copied().collect();
        assert_eq!(stored, vec![5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_describe() {
        let sensor = sensor_with(&[15.0, 10.5]);
        assert_eq!(
            sensor.describe(),
            "=== Temperature Sensor ===\nName: T-001\nReadings: 2\nHistory: 15 10.5"
        );
    }
}
