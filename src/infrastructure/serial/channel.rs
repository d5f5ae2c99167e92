use crate::domain::{
    config::SessionConfig,
    error::{TermBridgeError, TermBridgeResult},
};
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a single driver read waits before the reader retries it.
const READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// An open, configured serial connection (8 data bits, no parity, 1 stop bit).
pub struct SerialChannel {
    port_name: String,
    port: Box<dyn SerialPort>,
}

impl SerialChannel {
    pub fn open(config: &SessionConfig) -> TermBridgeResult<Self> {
        let flow_control = if config.hw_flow_control {
            serialport::FlowControl::Hardware
        } else {
            serialport::FlowControl::None
        };

        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(flow_control)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| TermBridgeError::Open {
                port: config.port.clone(),
                source,
            })?;

        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            hw_flow_control = config.hw_flow_control,
            "Serial port opened"
        );

        let mut channel = Self {
            port_name: config.port.clone(),
            port,
        };

        if let Some(level) = config.control_line_level() {
            drive_control_lines(&mut channel.port, &channel.port_name, level);
        }

        Ok(channel)
    }

    /// Split into independently owned read and write halves.
    pub fn split(self) -> TermBridgeResult<(SerialReader, SerialWriter)> {
        let writer = self.port.try_clone().map_err(|source| TermBridgeError::Open {
            port: self.port_name.clone(),
            source,
        })?;

        Ok((
            SerialReader { port: self.port },
            SerialWriter { port: writer },
        ))
    }
}

/// RTS/DTR access, split out of [`SerialPort`] so it can be exercised alone.
trait ModemControl {
    fn set_rts(&mut self, level: bool) -> serialport::Result<()>;
    fn set_dtr(&mut self, level: bool) -> serialport::Result<()>;
}

impl ModemControl for Box<dyn SerialPort> {
    fn set_rts(&mut self, level: bool) -> serialport::Result<()> {
        self.write_request_to_send(level)
    }

    fn set_dtr(&mut self, level: bool) -> serialport::Result<()> {
        self.write_data_terminal_ready(level)
    }
}

/// Drive RTS and DTR to `level`, returning whether both were set.
///
/// Ports without modem control lines (ptys, socat links, some USB-CDC
/// bridges) reject this. That only costs the reset/boot strobe, so the
/// port is still used.
fn drive_control_lines<P: ModemControl + ?Sized>(port: &mut P, name: &str, level: bool) -> bool {
    match port.set_rts(level).and_then(|_| port.set_dtr(level)) {
        Ok(()) => {
            debug!(port = %name, level, "RTS/DTR set");
            true
        }
        Err(e) => {
            warn!(port = %name, level, "Could not set RTS/DTR: {}", e);
            false
        }
    }
}

/// Read half of a [`SerialChannel`].
///
/// Reads block until at least one byte arrives; driver timeouts are retried.
pub struct SerialReader {
    port: Box<dyn SerialPort>,
}

impl Read for SerialReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.port.read(buf) {
                Err(ref e)
                    if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) =>
                {
                    continue;
                }
                other => return other,
            }
        }
    }
}

/// Write half of a [`SerialChannel`].
pub struct SerialWriter {
    port: Box<dyn SerialPort>,
}

impl Write for SerialWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}
