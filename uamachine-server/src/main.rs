//! uamachine server
//!
//! Builds an in-process address space, loads the Machinery catalog and
//! provisions the vendor machine with its live-bound device variables, then
//! reports their values until interrupted.
//!
//! Usage:
//!   uamachine-server --config machine.json --tick-ms 500

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use uamachine_provision::MachineConfig;
use uamachine_server::MachineServer;
use uamachine_types::Variant;

#[derive(Parser, Debug)]
#[command(name = "uamachine-server")]
#[command(about = "Provisions a Machinery machine into an in-process address space")]
struct Args {
    /// Path to a JSON machine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the counter tick interval (ms)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Interval between value reports (ms)
    #[arg(long, default_value = "1000")]
    report_ms: u64,

    /// Submit this payload to the setpoint at startup, as an external client would
    #[arg(long)]
    write_setpoint: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("uamachine server starting...");
    let mut config = match &args.config {
        Some(path) => MachineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MachineConfig::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    let server = MachineServer::start(&config)?;
    debug!("Objects:\n{}", server.render_objects());
    info!("Machine tree:\n{}", server.render());

    if let Some(payload) = args.write_setpoint {
        let status = server.write_setpoint(Variant::String(payload.clone()));
        if status.is_good() {
            info!("Setpoint written: {}", payload);
        } else {
            warn!("Setpoint write {:?} rejected: {}", payload, status);
        }
    }

    let mut report = tokio::time::interval(Duration::from_millis(args.report_ms.max(1)));
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Shutdown requested");
                break;
            }
            _ = report.tick() => {
                let snapshot = server.snapshot();
                info!("{}", serde_json::to_string(&snapshot)?);
            }
        }
    }

    let ticks = server.shutdown().await;
    info!("Counter ticked {} times, bye", ticks);
    Ok(())
}
