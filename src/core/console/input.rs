use super::signal::SessionSignal;
use crate::domain::error::{TermBridgeError, TermBridgeResult};
use std::io::{self, Read, Write};
use tracing::debug;

/// Local input -> device.
///
/// Forwards keystrokes one byte at a time so nothing waits on a line
/// buffer. Any fault, including end of input, cancels the session without
/// an operator-visible report. When forwarding is off the pump parks its
/// thread for good instead.
pub struct InputPump<I, S> {
    input: I,
    serial: S,
    forward: bool,
    signal: SessionSignal,
}

impl<I, S> InputPump<I, S>
where
    I: Read,
    S: Write,
{
    pub fn new(input: I, serial: S, forward: bool, signal: SessionSignal) -> Self {
        Self {
            input,
            serial,
            forward,
            signal,
        }
    }

    /// Pump until the first fault. Never returns when forwarding is off.
    pub fn run(mut self) -> TermBridgeError {
        if !self.forward {
            debug!("Input forwarding disabled, parking input pump");
            park_forever();
        }

        debug!("Input pump started");
        let mut byte = [0u8; 1];

        loop {
            if let Err(fault) = self.forward_byte(&mut byte) {
                debug!("Input pump stopped: {}", fault);
                self.signal.cancel();
                return fault;
            }
        }
    }

    fn forward_byte(&mut self, byte: &mut [u8; 1]) -> TermBridgeResult<()> {
        match self.input.read(byte) {
            Ok(0) => Err(TermBridgeError::Closed { stream: "input" }),
            Ok(_) => self
                .serial
                .write_all(&byte[..])
                .and_then(|_| self.serial.flush())
                .map_err(TermBridgeError::SerialWrite),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(()),
            Err(e) => Err(TermBridgeError::LocalRead(e)),
        }
    }
}

fn park_forever() -> ! {
    loop {
        // park may wake spuriously
        std::thread::park();
    }
}
