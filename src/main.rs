use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use bqmba_rs::constants::DEFAULT_DEVICE_ADDRESS;
use bqmba_rs::util::hex::parse_u8_lenient;
use bqmba_rs::{
    init_logger, log_info, registry, run_sequence, MbaDeviceHandle, MbaTiming, SequenceOptions,
    SequenceReport, SmbusPort, StdoutSink, WritePolicy, CLEAR_PF2_SEQUENCE, DIAGNOSTIC_SEQUENCE,
};

#[derive(Parser)]
#[command(name = "bqmba")]
#[command(about = "ManufacturerBlockAccess tool for smart battery controllers")]
struct Cli {
    /// I2C bus number (/dev/i2c-N)
    #[arg(short, long, default_value_t = 1, global = true)]
    bus: u8,

    /// Device address, hex (0x0B) or decimal
    #[arg(short, long, default_value_t = DEFAULT_DEVICE_ADDRESS, value_parser = parse_address, global = true)]
    address: u8,

    /// JSON file overriding the bus timing
    #[arg(long, global = true)]
    timing: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known commands
    List {
        #[arg(long)]
        json: bool,
    },
    /// Run commands by name, in order
    Run {
        #[arg(required = true)]
        names: Vec<String>,
        /// Permit commands that change device state
        #[arg(long)]
        allow_write: bool,
        #[arg(long)]
        stop_on_error: bool,
    },
    /// Read identification, status and failure registers
    Diagnose,
    /// Unseal and clear the secondary permanent-failure flag
    ClearPf2 {
        #[arg(long)]
        allow_write: bool,
    },
}

fn parse_address(input: &str) -> Result<u8, String> {
    parse_u8_lenient(input).map_err(|e| e.to_string())
}

#[cfg(feature = "raspberry-pi")]
fn open_port(bus: u8) -> anyhow::Result<Box<dyn SmbusPort>> {
    let port = bqmba_rs::RaspberryPiSmbus::open(bus)?;
    Ok(Box::new(port))
}

#[cfg(not(feature = "raspberry-pi"))]
fn open_port(bus: u8) -> anyhow::Result<Box<dyn SmbusPort>> {
    bail!("no bus backend for /dev/i2c-{bus}: rebuild with --features raspberry-pi")
}

fn print_summary(report: &SequenceReport) {
    println!(
        "{}/{} commands succeeded",
        report.succeeded(),
        report.outcomes.len()
    );
    for outcome in report.failed() {
        if let Err(err) = &outcome.result {
            println!("  {}: {err}", outcome.name);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    if let Commands::List { json } = &cli.command {
        if *json {
            println!("{}", serde_json::to_string_pretty(registry())?);
        } else {
            for cmd in registry().iter() {
                println!(
                    "{:<26} 0x{:04X}  {:?}  {}",
                    cmd.name, cmd.sub_command, cmd.access, cmd.description
                );
            }
        }
        return Ok(());
    }

    if let Commands::ClearPf2 { allow_write: false } = cli.command {
        bail!("clear-pf2 unseals the device and writes to it; pass --allow-write to proceed");
    }

    let timing = match &cli.timing {
        Some(path) => MbaTiming::from_file(path)
            .with_context(|| format!("loading timing from {}", path.display()))?,
        None => MbaTiming::default(),
    };

    let port = open_port(cli.bus)?;
    let mut battery = MbaDeviceHandle::with_sink(port, StdoutSink, timing);
    log_info(&format!(
        "Using /dev/i2c-{} address 0x{:02X}",
        cli.bus, cli.address
    ));

    let report = match cli.command {
        Commands::Run {
            names,
            allow_write,
            stop_on_error,
        } => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let options = SequenceOptions {
                policy: if allow_write {
                    WritePolicy::AllowWrite
                } else {
                    WritePolicy::ReadOnly
                },
                stop_on_error,
            };
            run_sequence(&mut battery, cli.address, &names, options).await
        }
        Commands::Diagnose => {
            run_sequence(
                &mut battery,
                cli.address,
                DIAGNOSTIC_SEQUENCE,
                SequenceOptions::default(),
            )
            .await
        }
        Commands::ClearPf2 { .. } => {
            let options = SequenceOptions {
                policy: WritePolicy::AllowWrite,
                stop_on_error: true,
            };
            run_sequence(&mut battery, cli.address, CLEAR_PF2_SEQUENCE, options).await
        }
        Commands::List { .. } => return Ok(()),
    };

    print_summary(&report);
    if !report.is_success() {
        bail!("{} command(s) failed", report.failed().count());
    }
    Ok(())
}
