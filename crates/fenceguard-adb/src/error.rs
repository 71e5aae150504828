use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Failures from invoking the adb bridge tool.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The adb binary could not be spawned at all.
    #[error("failed to launch adb: {0}")]
    Launch(#[from] std::io::Error),

    /// adb ran but exited with a non-zero status.
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// adb did not complete within the configured timeout.
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}
