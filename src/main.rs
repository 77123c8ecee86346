use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use nodestat::Collector;
use nodestat::config::{self, Config};
use nodestat::logging::init_tracing;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "nodestat",
    about = "Node metrics probes: memory, disk, CPU, NIC counters and bandwidth"
)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Log filter directive, e.g. `debug` or `nodestat=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    probe: Probe,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Probe {
    /// Memory from /proc/meminfo and the OS
    Memory,
    /// Disk usage of the configured target via df
    Disk,
    /// CPU counts and load averages
    Cpu,
    /// Primary network interface counters from /proc/net/dev
    Nic,
    /// Run the speedtest binary
    Speedtest,
    /// Run every probe concurrently
    Report {
        /// Include the (slow) speedtest
        #[arg(long, default_value_t = false)]
        with_speedtest: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_tracing(&config.general)?;

    let collector = Collector::new(config);
    match cli.probe {
        Probe::Memory => emit(cli.format, &collector.memory().await?),
        Probe::Disk => emit(cli.format, &collector.disk().await?),
        Probe::Cpu => emit(cli.format, &collector.cpu().await?),
        Probe::Nic => match collector.nic().await? {
            Some(nic) => emit(cli.format, &nic),
            None => emit_none(cli.format, "no eligible network interface"),
        },
        Probe::Speedtest => {
            let result = collector.speedtest().await?;
            match cli.format {
                OutputFormat::Json => print_json(&result),
                OutputFormat::Text => {
                    println!("{}", result.summary());
                    Ok(())
                }
            }
        }
        Probe::Report { with_speedtest } => {
            let report = collector.report(with_speedtest).await;
            match cli.format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => print!("{report}"),
            }
            if !report.is_complete() {
                return Err(eyre!(
                    "{} of the report probes failed",
                    report.failures.len()
                ));
            }
            Ok(())
        }
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }

    config
}

fn emit<T: Serialize + std::fmt::Display>(format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            println!("{value}");
            Ok(())
        }
    }
}

fn emit_none(format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::Value::Null),
        OutputFormat::Text => {
            println!("{message}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
