use std::collections::HashSet;
use std::sync::Arc;

use fenceguard_adb::{BridgeError, DeviceBridge};

/// What happened to a scheduled block action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Package not on the blocklist; no command was run.
    NotBlocklisted,
    /// Force-stop ran successfully.
    Stopped,
}

/// Force-stops blocklisted packages on a device.
#[derive(Clone)]
pub struct AppBlocker {
    bridge: Arc<dyn DeviceBridge>,
    blocklist: Arc<HashSet<String>>,
}

impl AppBlocker {
    pub fn new(bridge: Arc<dyn DeviceBridge>, blocklist: impl IntoIterator<Item = String>) -> Self {
        Self {
            bridge,
            blocklist: Arc::new(blocklist.into_iter().collect()),
        }
    }

    #[must_use]
    pub fn is_blocklisted(&self, package: &str) -> bool {
        self.blocklist.contains(package)
    }

    /// Force-stop `package` on `serial` if it is blocklisted.
    ///
    /// # Errors
    ///
    /// Returns the bridge error when the force-stop command fails; the
    /// outcome is reported rather than swallowed so the orchestrator
    /// can log it.
    pub async fn block(&self, serial: &str, package: &str) -> Result<BlockOutcome, BridgeError> {
        if !self.is_blocklisted(package) {
            return Ok(BlockOutcome::NotBlocklisted);
        }
        self.bridge.force_stop(serial, package).await?;
        Ok(BlockOutcome::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use fenceguard_adb::Coordinate;

    use super::*;

    #[derive(Default)]
    struct RecordingBridge {
        stops: Mutex<Vec<(String, String)>>,
        fail_stops: bool,
    }

    #[async_trait]
    impl DeviceBridge for RecordingBridge {
        async fn list_devices(&self) -> Result<Vec<String>, BridgeError> {
            Ok(Vec::new())
        }

        async fn read_location(&self, _serial: &str) -> Result<Option<Coordinate>, BridgeError> {
            Ok(None)
        }

        async fn foreground_app(&self, _serial: &str) -> Result<Option<String>, BridgeError> {
            Ok(None)
        }

        async fn force_stop(&self, serial: &str, package: &str) -> Result<(), BridgeError> {
            if self.fail_stops {
                return Err(BridgeError::Launch(std::io::Error::other("adb missing")));
            }
            self.stops
                .lock()
                .unwrap()
                .push((serial.to_string(), package.to_string()));
            Ok(())
        }
    }

    fn blocker_with(bridge: Arc<RecordingBridge>) -> AppBlocker {
        AppBlocker::new(
            bridge,
            [
                "com.whatsapp".to_string(),
                "com.google.android.youtube".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_block_is_noop_for_unlisted_package() {
        let bridge = Arc::new(RecordingBridge::default());
        let blocker = blocker_with(bridge.clone());

        let outcome = blocker.block("ABC123", "com.android.chrome").await.unwrap();
        assert_eq!(outcome, BlockOutcome::NotBlocklisted);
        assert!(bridge.stops.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_block_stops_blocklisted_package_once() {
        let bridge = Arc::new(RecordingBridge::default());
        let blocker = blocker_with(bridge.clone());

        let outcome = blocker.block("ABC123", "com.whatsapp").await.unwrap();
        assert_eq!(outcome, BlockOutcome::Stopped);
        assert_eq!(
            *bridge.stops.lock().unwrap(),
            vec![("ABC123".to_string(), "com.whatsapp".to_string())]
        );
    }

    #[tokio::test]
    async fn test_block_surfaces_command_failure() {
        let bridge = Arc::new(RecordingBridge {
            fail_stops: true,
            ..RecordingBridge::default()
        });
        let blocker = blocker_with(bridge);

        assert!(blocker
            .block("ABC123", "com.google.android.youtube")
            .await
            .is_err());
    }
}
