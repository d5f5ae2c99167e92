use std::io;
use thiserror::Error;

/// TermBridge unified error type
#[derive(Error, Debug)]
pub enum TermBridgeError {
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("serial read error: {0}")]
    SerialRead(#[source] io::Error),

    #[error("serial write error: {0}")]
    SerialWrite(#[source] io::Error),

    #[error("input read error: {0}")]
    LocalRead(#[source] io::Error),

    #[error("output write error: {0}")]
    LocalWrite(#[source] io::Error),

    #[error("{stream} closed")]
    Closed { stream: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl TermBridgeError {
    /// True for a clean end-of-stream rather than a transport failure.
    pub fn is_closed(&self) -> bool {
        matches!(self, TermBridgeError::Closed { .. })
    }
}

pub type TermBridgeResult<T> = Result<T, TermBridgeError>;
