// Serial module - Serial port access
pub mod channel;

pub use channel::{SerialChannel, SerialReader, SerialWriter};
