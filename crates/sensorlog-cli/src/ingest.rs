//! Feeding `ID:value` records into the registry.

use crate::record::parse_record;
use anyhow::{Context, Result};
use sensorlog_core::SensorRegistry;
use sensorlog_hw::LineFramer;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

/// Read chunk size for record streams.
const CHUNK_SIZE: usize = 256;

/// What happened to a single record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// The value was stored on the named sensor.
    Recorded,
    /// No sensor has the given name.
    UnknownSensor,
    /// The line is not of the form `ID:value`.
    Malformed,
}

/// Tally of processed record lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub recorded: usize,
    pub unknown: usize,
    pub malformed: usize,
}

impl IngestStats {
    /// Counts one line outcome.
    pub fn add(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Recorded => self.recorded += 1,
            LineOutcome::UnknownSensor => self.unknown += 1,
            LineOutcome::Malformed => self.malformed += 1,
        }
    }
}

impl std::fmt::Display for IngestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} recorded, {} for unknown sensors, {} malformed",
            self.recorded, self.unknown, self.malformed
        )
    }
}

/// Parses one line and records it on the matching sensor.
pub fn apply_line(registry: &mut SensorRegistry, line: &str) -> LineOutcome {
    let Some(record) = parse_record(line) else {
        warn!("Invalid record '{}', expected 'ID:value'", line);
        return LineOutcome::Malformed;
    };

    match registry.record(record.id, record.value) {
        Ok(()) => {
            debug!("Recorded {} on '{}'", record.value, record.id);
            LineOutcome::Recorded
        }
        Err(e) => {
            warn!("{}", e);
            LineOutcome::UnknownSensor
        }
    }
}

/// Reads newline-framed records from `reader` until it ends or a line equal
/// to `exit_word` arrives.
pub async fn ingest_stream<R>(
    reader: &mut R,
    registry: &mut SensorRegistry,
    exit_word: &str,
) -> Result<IngestStats>
where
    R: AsyncRead + Unpin,
{
    let mut framer = LineFramer::new();
    let mut stats = IngestStats::default();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = reader
            .read(&mut buf)
            .await
            .context("Failed to read record stream")?;
        if n == 0 {
            break;
        }
        for line in framer.push(&buf[..n]) {
            if line == exit_word {
                info!("Exit word received, stopping record entry");
                return Ok(stats);
            }
            stats.add(apply_line(registry, &line));
        }
    }

    if let Some(line) = framer.finish() {
        if line != exit_word {
            stats.add(apply_line(registry, &line));
        }
    }
    info!("Record stream ended: {}", stats);
    Ok(stats)
}

/// Runs [`ingest_stream`] until it finishes or Ctrl+C is pressed.
///
/// Returns `None` when interrupted. Records received before the interrupt
/// stay in the registry.
pub async fn ingest_until_interrupted<R>(
    reader: &mut R,
    registry: &mut SensorRegistry,
    exit_word: &str,
) -> Result<Option<IngestStats>>
where
    R: AsyncRead + Unpin,
{
    tokio::select! {
        result = ingest_stream(reader, registry, exit_word) => result.map(Some),
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, stopping record entry");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorlog_core::{PressureSensor, TemperatureSensor};

    fn registry() -> SensorRegistry {
        let mut registry = SensorRegistry::new();
        registry.add(TemperatureSensor::new("T-001"));
        registry.add(PressureSensor::new("P-105"));
        registry
    }

    #[test]
    fn test_apply_line() {
        let mut registry = registry();
        assert_eq!(apply_line(&mut registry, "T-001:25.5"), LineOutcome::Recorded);
        assert_eq!(apply_line(&mut registry, "X-9:1"), LineOutcome::UnknownSensor);
        assert_eq!(apply_line(&mut registry, "T-001 25.5"), LineOutcome::Malformed);
        assert_eq!(apply_line(&mut registry, "P-105:oops"), LineOutcome::Recorded);

        assert_eq!(registry.find_by_name("T-001").unwrap().readings(), 1);
        assert_eq!(
            registry.find_by_name("P-105").unwrap().describe(),
            "=== Pressure Sensor ===\nName: P-105\nReadings: 1\nHistory: 0"
        );
    }

    #[tokio::test]
    async fn test_ingest_until_end_of_stream() {
        let mut registry = registry();
        let mut input: &[u8] = b"T-001:15\r\nT-001:10\nX:1\nbad\nP-105:100.7\nT-001:20";

        let stats = ingest_stream(&mut input, &mut registry, "quit").await.unwrap();
        assert_eq!(
            stats,
            IngestStats {
                recorded: 4,
                unknown: 1,
                malformed: 1,
            }
        );

        let reports = registry.process_all();
        assert_eq!(
            reports[0].to_string(),
            "[temperature] T-001: lowest reading (10 °C) discarded; average over 2 reading(s): 17.5 °C"
        );
        assert_eq!(
            reports[1].to_string(),
            "[pressure] P-105: average over 1 reading(s): 100 Pa"
        );
    }

    #[tokio::test]
    async fn test_ingest_stops_at_exit_word() {
        let mut registry = registry();
        let mut input: &[u8] = b"T-001:1\nquit\nT-001:2\n";

        let stats = ingest_stream(&mut input, &mut registry, "quit").await.unwrap();
        assert_eq!(stats.recorded, 1);
        assert_eq!(registry.find_by_name("T-001").unwrap().readings(), 1);
    }
}
