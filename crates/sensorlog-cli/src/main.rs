//! Sensor Log
//!
//! Creates pressure and temperature sensors, records readings typed in or
//! received from a serial board, and reports on them.

mod config;
mod ingest;
mod menu;
mod record;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use ingest::{ingest_stream, ingest_until_interrupted};
use menu::Session;
use sensorlog_core::{SensorKind, SensorRegistry};
use sensorlog_hw::{BaudRate, SerialLink};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sensorlog")]
#[command(about = "Record and process readings from pressure and temperature sensors")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read records from a serial board until it disconnects or Ctrl+C
    Listen {
        /// Serial device path (default from config)
        #[arg(short, long)]
        device: Option<String>,

        /// Baud rate: 9600, 19200, 38400, 57600 or 115200
        #[arg(short, long)]
        baud: Option<u32>,

        #[command(flatten)]
        sensors: SensorArgs,
    },
    /// Read records from stdin until the exit word or end of input
    Feed {
        #[command(flatten)]
        sensors: SensorArgs,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Output file path
        #[arg(default_value = "sensorlog.toml")]
        output: PathBuf,
    },
}

/// Extra sensors to register on top of the configured ones.
#[derive(clap::Args)]
struct SensorArgs {
    /// Add a temperature sensor (repeatable)
    #[arg(short, long = "temperature", value_name = "NAME")]
    temperature: Vec<String>,

    /// Add a pressure sensor (repeatable)
    #[arg(short, long = "pressure", value_name = "NAME")]
    pressure: Vec<String>,
}

impl SensorArgs {
    fn register(&self, registry: &mut SensorRegistry) -> Result<()> {
        let sensors = self
            .temperature
            .iter()
            .map(|name| (SensorKind::Temperature, name))
            .chain(self.pressure.iter().map(|name| (SensorKind::Pressure, name)));
        for (kind, name) in sensors {
            let name = name.trim();
            if name.is_empty() {
                bail!("Sensor name cannot be empty");
            }
            registry.push(kind.build(name));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.config {
        info!("Loaded configuration from: {}", path.display());
    }

    match cli.command {
        None => run_menu(config).await,
        Some(Commands::Listen {
            device,
            baud,
            sensors,
        }) => handle_listen(config, device, baud, &sensors).await,
        Some(Commands::Feed { sensors }) => handle_feed(config, &sensors).await,
        Some(Commands::InitConfig { output }) => {
            config.save(&output)?;
            println!("Configuration written to: {}", output.display());
            Ok(())
        }
    }
}

async fn run_menu(config: Config) -> Result<()> {
    let registry = config.registry();
    let mut session = Session::new(tokio::io::stdin(), registry, config);
    let result = session.run().await;
    session.shutdown();
    result
}

async fn handle_listen(
    config: Config,
    device: Option<String>,
    baud: Option<u32>,
    sensors: &SensorArgs,
) -> Result<()> {
    let mut registry = config.registry();
    sensors.register(&mut registry)?;
    if registry.is_empty() {
        bail!("No sensors registered. Add some with --temperature/--pressure or in the config file");
    }

    let device = device.unwrap_or(config.serial.device);
    let baud = BaudRate::from_u32_or_default(baud.unwrap_or(config.serial.baud));

    let mut link = SerialLink::new();
    link.open(&device, baud)
        .with_context(|| format!("Failed to open serial port {}", device))?;
    eprintln!("Listening on {} at {} baud. Press Ctrl+C to stop.", device, baud);

    match ingest_until_interrupted(&mut link, &mut registry, &config.exit_word).await? {
        Some(stats) => eprintln!("Records: {}", stats),
        None => eprintln!("Interrupted."),
    }
    link.close();

    report(&mut registry);
    Ok(())
}

async fn handle_feed(config: Config, sensors: &SensorArgs) -> Result<()> {
    let mut registry = config.registry();
    sensors.register(&mut registry)?;
    if registry.is_empty() {
        bail!("No sensors registered. Add some with --temperature/--pressure or in the config file");
    }

    let mut stdin = tokio::io::stdin();
    let stats = ingest_stream(&mut stdin, &mut registry, &config.exit_word).await?;
    eprintln!("Records: {}", stats);

    report(&mut registry);
    Ok(())
}

fn report(registry: &mut SensorRegistry) {
    for report in registry.process_all() {
        println!("{}", report);
    }
    println!();
    println!("{}", registry.describe_all());
}
