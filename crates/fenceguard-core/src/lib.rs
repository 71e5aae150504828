pub mod blocker;
pub mod config;
pub mod daemon;
pub mod geofence;

pub use blocker::{AppBlocker, BlockOutcome};
pub use config::MonitorConfig;
pub use daemon::Daemon;
pub use geofence::Geofence;
