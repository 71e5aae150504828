use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use fenceguard_adb::DeviceBridge;
use tokio::time::interval;

use crate::blocker::{AppBlocker, BlockOutcome};
use crate::config::MonitorConfig;
use crate::geofence::Geofence;

/// The polling orchestrator.
///
/// Each cycle enumerates devices, walks them sequentially through
/// location lookup, geofence check, and foreground-app lookup, then
/// runs the collected block actions concurrently and waits for all of
/// them before the cycle ends. Per-device failures are logged and skip
/// only that device; no state survives into the next cycle.
pub struct Daemon {
    bridge: Arc<dyn DeviceBridge>,
    geofence: Geofence,
    blocker: AppBlocker,
    tick_interval: Duration,
    shutdown_signal: Arc<AtomicBool>,
}

impl Daemon {
    #[must_use]
    pub fn new(bridge: Arc<dyn DeviceBridge>, config: &MonitorConfig) -> Self {
        Self {
            geofence: config.geofence(),
            blocker: AppBlocker::new(bridge.clone(), config.blocklist.iter().cloned()),
            bridge,
            tick_interval: config.tick_interval,
            shutdown_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops `run` at the next loop turn.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown_signal.clone()
    }

    /// Run the poll loop until Ctrl-C or the shutdown flag is set.
    ///
    /// A failed cycle is logged and retried on the next tick; the loop
    /// never exits on a bridge failure.
    ///
    /// # Errors
    ///
    /// Currently always returns `Ok` after shutdown; the `Result` is
    /// kept so callers can `?` it alongside other entry points.
    pub async fn run(&self) -> Result<()> {
        let mut interval = interval(self.tick_interval);
        log::info!("Monitor started, polling every {:?}", self.tick_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.tick().await {
                        log::error!("Poll cycle failed: {e}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Received Ctrl-C, shutting down...");
                    self.shutdown_signal.store(true, Ordering::SeqCst);
                }
            }

            if self.shutdown_signal.load(Ordering::SeqCst) {
                break;
            }
        }

        log::info!("Monitor shut down gracefully.");
        Ok(())
    }

    /// Run exactly one poll cycle across all attached devices.
    ///
    /// # Errors
    ///
    /// Returns an error when device enumeration itself fails; everything
    /// past enumeration is per-device and only logged.
    pub async fn tick(&self) -> Result<()> {
        let devices = self.bridge.list_devices().await?;
        if devices.is_empty() {
            log::debug!("No devices attached");
            return Ok(());
        }

        let mut scheduled = Vec::new();
        for serial in &devices {
            if let Some(package) = self.inspect_device(serial).await {
                scheduled.push((serial.clone(), package));
            }
        }

        // Block actions across devices run concurrently; the cycle only
        // completes once every one of them has finished.
        let mut handles = Vec::new();
        for (serial, package) in scheduled {
            let blocker = self.blocker.clone();
            handles.push(tokio::spawn(async move {
                let outcome = blocker.block(&serial, &package).await;
                (serial, package, outcome)
            }));
        }

        for handle in handles {
            let (serial, package, outcome) = handle.await?;
            match outcome {
                Ok(BlockOutcome::Stopped) => log::info!("Blocked app {package} on {serial}"),
                Ok(BlockOutcome::NotBlocklisted) => {
                    log::debug!("{package} on {serial} is not blocklisted");
                }
                Err(e) => log::warn!("Failed to block {package} on {serial}: {e}"),
            }
        }

        Ok(())
    }

    /// Sequential per-device stage: location, geofence, foreground app.
    ///
    /// Returns the foreground package when the device is inside the
    /// fence and one could be read; any failure along the way logs and
    /// skips the device for this cycle.
    async fn inspect_device(&self, serial: &str) -> Option<String> {
        let coordinate = match self.bridge.read_location(serial).await {
            Ok(Some(coordinate)) => coordinate,
            Ok(None) => {
                log::warn!("Could not get location for device {serial}");
                return None;
            }
            Err(e) => {
                log::warn!("Location lookup failed for device {serial}: {e}");
                return None;
            }
        };
        log::debug!(
            "Device {serial} last seen at ({}, {})",
            coordinate.lat,
            coordinate.lon
        );

        if !self.geofence.contains(coordinate) {
            log::info!("Device {serial} is outside the geofence");
            return None;
        }

        match self.bridge.foreground_app(serial).await {
            Ok(Some(package)) => {
                log::info!("Foreground app for device {serial}: {package}");
                Some(package)
            }
            Ok(None) => {
                log::warn!("No resumed activity found for device {serial}");
                None
            }
            Err(e) => {
                log::warn!("Foreground-app lookup failed for device {serial}: {e}");
                None
            }
        }
    }
}
