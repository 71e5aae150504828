use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use fenceguard_adb::AdbBridge;
use fenceguard_core::{Daemon, MonitorConfig};

#[derive(Parser)]
#[command(name = "fenceguard")]
#[command(about = "Geofence app blocker for adb-connected devices", long_about = None)]
struct Cli {
    /// Seconds between poll cycles
    #[arg(long, default_value_t = 5)]
    interval_secs: u64,

    /// Seconds before a hung adb command is abandoned
    #[arg(long, default_value_t = 15)]
    command_timeout_secs: u64,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!(
        "Starting fenceguard (interval {}s, command timeout {}s)",
        cli.interval_secs,
        cli.command_timeout_secs
    );

    let config = MonitorConfig {
        tick_interval: Duration::from_secs(cli.interval_secs),
        command_timeout: Duration::from_secs(cli.command_timeout_secs),
        ..MonitorConfig::default()
    };

    let bridge = Arc::new(AdbBridge::new(config.command_timeout));
    let daemon = Daemon::new(bridge, &config);

    if cli.once {
        daemon.tick().await?;
        return Ok(());
    }
    daemon.run().await
}
