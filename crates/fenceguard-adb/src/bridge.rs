use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::BridgeError;
use crate::parse;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Device bridge trait so orchestration can run against a mock in tests.
///
/// Serials and package names are opaque strings valid for one poll
/// cycle; nothing here caches device state across calls.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// List serials of connected, online devices.
    async fn list_devices(&self) -> Result<Vec<String>, BridgeError>;

    /// Last known location reported by the device, if it has one.
    async fn read_location(&self, serial: &str) -> Result<Option<Coordinate>, BridgeError>;

    /// Package name of the currently resumed activity, if any.
    async fn foreground_app(&self, serial: &str) -> Result<Option<String>, BridgeError>;

    /// Force-stop a package on the device.
    async fn force_stop(&self, serial: &str, package: &str) -> Result<(), BridgeError>;
}

/// Real bridge that shells out to the `adb` binary.
pub struct AdbBridge {
    adb_path: String,
    command_timeout: Duration,
}

impl AdbBridge {
    /// Create a bridge using the `adb` found on PATH.
    ///
    /// Every command runs under `command_timeout` so a hung device
    /// cannot stall the poll loop indefinitely.
    #[must_use]
    pub fn new(command_timeout: Duration) -> Self {
        Self {
            adb_path: "adb".to_string(),
            command_timeout,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output, BridgeError> {
        let command = format!("{} {}", self.adb_path, args.join(" "));
        log::debug!("Running `{command}`");

        // kill_on_drop so a timed-out command doesn't leave an orphaned
        // child running behind the loop.
        let output = timeout(
            self.command_timeout,
            Command::new(&self.adb_path)
                .args(args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| BridgeError::Timeout {
            command: command.clone(),
            timeout: self.command_timeout,
        })??;

        if !output.status.success() {
            return Err(BridgeError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn list_devices(&self) -> Result<Vec<String>, BridgeError> {
        let output = self.run(&["devices"]).await?;
        Ok(parse::device_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn read_location(&self, serial: &str) -> Result<Option<Coordinate>, BridgeError> {
        // Scoped to one device with -s; the dump itself is free text.
        let output = self
            .run(&["-s", serial, "shell", "dumpsys", "location"])
            .await?;
        Ok(parse::last_location(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    async fn foreground_app(&self, serial: &str) -> Result<Option<String>, BridgeError> {
        let output = self
            .run(&["-s", serial, "shell", "dumpsys", "activity", "activities"])
            .await?;
        Ok(parse::resumed_activity(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    async fn force_stop(&self, serial: &str, package: &str) -> Result<(), BridgeError> {
        self.run(&["-s", serial, "shell", "am", "force-stop", package])
            .await?;
        Ok(())
    }
}
