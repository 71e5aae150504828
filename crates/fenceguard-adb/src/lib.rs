pub mod bridge;
pub mod error;
pub mod parse;

pub use bridge::{AdbBridge, Coordinate, DeviceBridge};
pub use error::BridgeError;
