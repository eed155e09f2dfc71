//! Sensor variants.
//!
//! Every sensor owns one [`OrderedList`] of readings in its native numeric
//! type and exposes the same capabilities through the [`Sensor`] trait.

mod pressure;
mod temperature;

pub use pressure::PressureSensor;
pub use temperature::TemperatureSensor;

use crate::list::{OrderedList, Reading};
use crate::{Error, Result, SensorName};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Trait for all sensors.
pub trait Sensor: Send + Sync + fmt::Debug {
    /// Returns the sensor name.
    fn name(&self) -> &SensorName;

    /// Returns which variant this is.
    fn kind(&self) -> SensorKind;

    /// Converts a raw value to the native type and stores it.
    fn record(&mut self, value: f64);

    /// Runs the variant's aggregate step over the stored readings.
    fn process(&mut self) -> Outcome;

    /// Renders the name, reading count and readings in order.
    fn describe(&self) -> String;

    /// Returns the number of stored readings.
    fn readings(&self) -> usize;

    /// Returns an independent copy of this sensor and its readings.
    fn clone_box(&self) -> Box<dyn Sensor>;
}

/// The closed set of sensor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Integer pressure readings, averaged without removal.
    Pressure,
    /// Float temperature readings, lowest discarded before averaging.
    Temperature,
}

impl SensorKind {
    /// Returns the unit readings are reported in.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Pressure => "Pa",
            SensorKind::Temperature => "°C",
        }
    }

    /// Returns the heading used by [`Sensor::describe`].
    pub fn title(&self) -> &'static str {
        match self {
            SensorKind::Pressure => "Pressure Sensor",
            SensorKind::Temperature => "Temperature Sensor",
        }
    }

    /// Creates an empty sensor of this kind.
    pub fn build(self, name: impl Into<SensorName>) -> Box<dyn Sensor> {
        match self {
            SensorKind::Pressure => Box::new(PressureSensor::new(name)),
            SensorKind::Temperature => Box::new(TemperatureSensor::new(name)),
        }
    }
}

impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pressure" | "p" => Ok(SensorKind::Pressure),
            "temperature" | "temp" | "t" => Ok(SensorKind::Temperature),
            _ => Err(Error::InvalidArgument(format!("unknown sensor kind '{}'", s))),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Pressure => write!(f, "pressure"),
            SensorKind::Temperature => write!(f, "temperature"),
        }
    }
}

/// Result of a [`Sensor::process`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The sensor had nothing to process.
    NoReadings,
    /// Average over every stored reading; nothing was removed.
    Averaged { readings: usize, average: f64 },
    /// The lowest reading was removed before averaging the rest.
    /// `average` is `None` when nothing remained.
    MinimumDiscarded {
        minimum: f64,
        remaining: usize,
        average: Option<f64>,
    },
}

/// Outcome of processing one sensor, tagged with the sensor it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub name: SensorName,
    pub kind: SensorKind,
    pub outcome: Outcome,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.kind.unit();
        write!(f, "[{}] {}: ", self.kind, self.name)?;
        match self.outcome {
            Outcome::NoReadings => write!(f, "no readings recorded"),
            Outcome::Averaged { readings, average } => {
                write!(f, "average over {} reading(s): {} {}", readings, average, unit)
            }
            Outcome::MinimumDiscarded {
                minimum,
                remaining,
                average,
            } => {
                write!(f, "lowest reading ({} {}) discarded; ", minimum, unit)?;
                match average {
                    Some(avg) => {
                        write!(f, "average over {} reading(s): {} {}", remaining, avg, unit)
                    }
                    None => write!(f, "no readings left"),
                }
            }
        }
    }
}

/// Shared rendering for [`Sensor::describe`].
fn describe_history<T: Reading>(
    kind: SensorKind,
    name: &SensorName,
    history: &OrderedList<T>,
) -> String {
    let mut out = format!(
        "=== {} ===\nName: {}\nReadings: {}\nHistory:",
        kind.title(),
        name,
        history.len()
    );
    if history.is_empty() {
        out.push_str(" [empty]");
    }
    for value in history {
        let _ = write!(out, " {}", value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("pressure".parse::<SensorKind>().unwrap(), SensorKind::Pressure);
        assert_eq!("Temperature".parse::<SensorKind>().unwrap(), SensorKind::Temperature);
        assert_eq!("t".parse::<SensorKind>().unwrap(), SensorKind::Temperature);
        assert!("humidity".parse::<SensorKind>().is_err());
    }

    #[test]
    fn test_build_dispatches_on_kind() {
        let sensor = SensorKind::Temperature.build("T-001");
        assert_eq!(sensor.kind(), SensorKind::Temperature);
        assert_eq!(sensor.name().as_str(), "T-001");
        assert_eq!(sensor.readings(), 0);
    }

    #[test]
    fn test_report_display() {
        let report = Report {
            name: SensorName::new("T-001"),
            kind: SensorKind::Temperature,
            outcome: Outcome::MinimumDiscarded {
                minimum: 10.0,
                remaining: 2,
                average: Some(17.5),
            },
        };
        assert_eq!(
            report.to_string(),
            "[temperature] T-001: lowest reading (10 °C) discarded; average over 2 reading(s): 17.5 °C"
        );

        let report = Report {
            name: SensorName::new("P-105"),
            kind: SensorKind::Pressure,
            outcome: Outcome::NoReadings,
        };
        assert_eq!(report.to_string(), "[pressure] P-105: no readings recorded");
    }

    #[test]
    fn test_describe_empty_history() {
        let sensor = SensorKind::Pressure.build("P-105");
        assert_eq!(
            sensor.describe(),
            "=== Pressure Sensor ===\nName: P-105\nReadings: 0\nHistory: [empty]"
        );
    }
}
