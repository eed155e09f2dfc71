//! Interactive menu session.

use crate::config::Config;
use crate::ingest::{apply_line, ingest_until_interrupted, IngestStats};
use crate::record::lenient_f64;
use anyhow::{Context, Result};
use sensorlog_core::{SensorKind, SensorRegistry};
use sensorlog_hw::{BaudRate, SerialLink};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::debug;

/// Menu entries, selected by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    CreateTemperature,
    CreatePressure,
    Record,
    Connect,
    Process,
    Show,
    Quit,
}

impl MenuChoice {
    fn from_input(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::CreateTemperature),
            "2" => Some(MenuChoice::CreatePressure),
            "3" => Some(MenuChoice::Record),
            "4" => Some(MenuChoice::Connect),
            "5" => Some(MenuChoice::Process),
            "6" => Some(MenuChoice::Show),
            "7" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

fn print_menu() {
    println!();
    println!("========================================");
    println!("  Sensor Log");
    println!("========================================");
    println!("1. Create temperature sensor (float)");
    println!("2. Create pressure sensor (integer)");
    println!("3. Record a reading");
    println!("4. Connect to board (serial port)");
    println!("5. Process readings");
    println!("6. Show sensors");
    println!("7. Quit");
    println!("========================================");
}

/// A menu-driven session over a line-oriented input.
pub struct Session<R> {
    input: Lines<BufReader<R>>,
    registry: SensorRegistry,
    config: Config,
}

impl<R: AsyncRead + Unpin> Session<R> {
    /// Creates a session reading commands from `input`.
    pub fn new(input: R, registry: SensorRegistry, config: Config) -> Self {
        Self {
            input: BufReader::new(input).lines(),
            registry,
            config,
        }
    }

    /// Returns the registry driven by this session.
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Runs the menu until the user quits or the input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            print_menu();
            let Some(input) = self.prompt("Select an option: ").await? else {
                debug!("Input closed, leaving menu");
                return Ok(());
            };

            match MenuChoice::from_input(&input) {
                Some(MenuChoice::CreateTemperature) => {
                    self.create_sensor(SensorKind::Temperature).await?
                }
                Some(MenuChoice::CreatePressure) => self.create_sensor(SensorKind::Pressure).await?,
                Some(MenuChoice::Record) => self.record_reading().await?,
                Some(MenuChoice::Connect) => self.connect().await?,
                Some(MenuChoice::Process) => self.process(),
                Some(MenuChoice::Show) => self.show(),
                Some(MenuChoice::Quit) => return Ok(()),
                None => println!("Invalid option '{}', try again.", input),
            }
        }
    }

    /// Releases every sensor and returns how many there were.
    pub fn shutdown(&mut self) -> usize {
        let released = self.registry.clear();
        println!("{} sensor(s) released.", released);
        released
    }

    /// Prints `text` and reads one trimmed line. `None` means end of input.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        print!("{}", text);
        std::io::stdout().flush().context("Failed to flush stdout")?;
        let line = self
            .input
            .next_line()
            .await
            .context("Failed to read input")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn create_sensor(&mut self, kind: SensorKind) -> Result<()> {
        let Some(name) = self
            .prompt("Sensor identifier (e.g. T-001, P-105): ")
            .await?
        else {
            return Ok(());
        };
        if name.is_empty() {
            println!("Sensor name cannot be empty.");
            return Ok(());
        }

        self.registry.push(kind.build(name.as_str()));
        println!("{} '{}' created.", kind.title(), name);
        Ok(())
    }

    async fn record_reading(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            println!("No sensors registered.");
            return Ok(());
        }

        let Some(name) = self.prompt("Sensor identifier: ").await? else {
            return Ok(());
        };
        if self.registry.find_by_name(&name).is_none() {
            println!("Sensor '{}' not found.", name);
            return Ok(());
        }
        let Some(value) = self.prompt("Reading value: ").await? else {
            return Ok(());
        };

        self.registry.record(&name, lenient_f64(&value))?;
        Ok(())
    }

    async fn connect(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            println!("No sensors registered. Create at least one first.");
            return Ok(());
        }

        let default_device = self.config.serial.device.clone();
        let text = format!(
            "Serial port, or '-' to type records here [{}]: ",
            default_device
        );
        let Some(device) = self.prompt(&text).await? else {
            return Ok(());
        };
        let device = if device.is_empty() {
            default_device
        } else {
            device
        };
        if device == "-" {
            return self.manual_records().await;
        }

        let text = format!(
            "Baud rate (9600, 19200, 38400, 57600, 115200) [{}]: ",
            self.config.serial.baud
        );
        let Some(baud) = self.prompt(&text).await? else {
            return Ok(());
        };
        let baud = if baud.is_empty() {
            self.config.serial.baud
        } else {
            lenient_f64(&baud) as u32
        };
        let baud = BaudRate::from_u32_or_default(baud);

        let mut link = SerialLink::new();
        if let Err(e) = link.open(&device, baud) {
            println!("Could not connect to {}: {}", device, e);
            return Ok(());
        }

        println!("Waiting for records from {} at {} baud.", device, baud);
        println!("Expected format: ID:value (e.g. T-001:25.5). Press Ctrl+C to stop.");
        let exit_word = self.config.exit_word.clone();
        let stats = ingest_until_interrupted(&mut link, &mut self.registry, &exit_word).await?;
        link.close();
        print_stats(stats);
        Ok(())
    }

    async fn manual_records(&mut self) -> Result<()> {
        println!(
            "Enter records as 'ID:value', '{}' to finish.",
            self.config.exit_word
        );
        let mut stats = IngestStats::default();
        while let Some(line) = self.prompt("> ").await? {
            if line == self.config.exit_word {
                break;
            }
            if line.is_empty() {
                continue;
            }
            stats.add(apply_line(&mut self.registry, &line));
        }
        print_stats(Some(stats));
        Ok(())
    }

    fn process(&mut self) {
        for report in self.registry.process_all() {
            println!("{}", report);
        }
    }

    fn show(&self) {
        let text = self.registry.describe_all();
        if text.is_empty() {
            println!("No sensors registered.");
        } else {
            println!("{}", text);
        }
    }
}

fn print_stats(stats: Option<IngestStats>) {
    match stats {
        Some(stats) => println!("Records: {}", stats),
        None => println!("Record entry interrupted."),
    }
}
