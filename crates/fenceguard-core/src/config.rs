use std::time::Duration;

use fenceguard_adb::Coordinate;

use crate::geofence::Geofence;

/// Immutable monitor configuration, injected at construction.
///
/// The defaults carry the deployment's fixed geofence and blocklist;
/// nothing here changes for the life of the process.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub geofence_center: Coordinate,
    pub geofence_radius_m: f64,
    /// Packages that get force-stopped when seen in the foreground
    /// inside the fence.
    pub blocklist: Vec<String>,
    /// Delay between poll cycles.
    pub tick_interval: Duration,
    /// Upper bound on any single adb command.
    pub command_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            geofence_center: Coordinate {
                lat: 13.032_247,
                lon: 77.562_837,
            },
            geofence_radius_m: 500_000.0,
            blocklist: vec![
                "com.whatsapp".to_string(),
                "com.google.android.youtube".to_string(),
            ],
            tick_interval: Duration::from_secs(5),
            command_timeout: Duration::from_secs(15),
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub fn geofence(&self) -> Geofence {
        Geofence::new(self.geofence_center, self.geofence_radius_m)
    }
}
