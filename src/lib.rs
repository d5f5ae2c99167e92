//! TermBridge Library
//!
//! Interactive serial console bridge: forwards local keystrokes to a device
//! and prints its sanitized, optionally timestamped output.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::domain::error::{TermBridgeError, TermBridgeResult};
pub use crate::domain::config::{SessionConfig, TermBridgeConfig};
pub use crate::core::console::{
    sanitize, InputPump, OutputPump, SessionController, SessionSignal, TimestampFormatter,
};
pub use crate::infrastructure::serial::SerialChannel;
