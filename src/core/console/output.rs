use super::filter::sanitize;
use super::signal::SessionSignal;
use super::timestamp::TimestampFormatter;
use crate::domain::error::{TermBridgeError, TermBridgeResult};
use std::io::{self, Read, Write};
use tracing::{debug, error, trace};

/// Bytes requested from the serial port per read.
pub const CHUNK_SIZE: usize = 100;

/// Device -> local output.
///
/// Sanitizes every chunk and, when timestamps are enabled, prefixes each
/// line with the current time. The pump stops on the first read or write
/// fault (a closed port counts as one), reports it on the diagnostics
/// stream and cancels the session. It never looks at the signal itself:
/// only its own read returning can unblock it.
pub struct OutputPump<R, W, D> {
    serial: R,
    output: W,
    diagnostics: D,
    timestamps: TimestampFormatter,
    at_line_start: bool,
    signal: SessionSignal,
}

impl<R, W, D> OutputPump<R, W, D>
where
    R: Read,
    W: Write,
    D: Write,
{
    pub fn new(
        serial: R,
        output: W,
        diagnostics: D,
        timestamps: TimestampFormatter,
        signal: SessionSignal,
    ) -> Self {
        Self {
            serial,
            output,
            diagnostics,
            timestamps,
            at_line_start: true,
            signal,
        }
    }

    /// Pump until the first fault, which is returned after it has been reported.
    pub fn run(mut self) -> TermBridgeError {
        debug!(timestamps = self.timestamps.is_enabled(), "Output pump started");
        let mut buffer = [0u8; CHUNK_SIZE];

        loop {
            if let Err(fault) = self.pump_chunk(&mut buffer) {
                error!("Output pump stopped: {}", fault);
                self.report(&fault);
                self.signal.cancel();
                return fault;
            }
        }
    }

    fn pump_chunk(&mut self, buffer: &mut [u8]) -> TermBridgeResult<()> {
        let n = match self.serial.read(buffer) {
            Ok(0) => return Err(TermBridgeError::Closed { stream: "serial port" }),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(()),
            Err(e) => return Err(TermBridgeError::SerialRead(e)),
        };

        trace!("Received {} bytes over serial", n);
        self.emit(&mut buffer[..n])
    }

    fn emit(&mut self, chunk: &mut [u8]) -> TermBridgeResult<()> {
        sanitize(chunk);

        if self.timestamps.is_enabled() {
            for &byte in chunk.iter() {
                if self.at_line_start {
                    let prefix = self.timestamps.format_now();
                    self.output
                        .write_all(prefix.as_bytes())
                        .map_err(TermBridgeError::LocalWrite)?;
                }
                self.output
                    .write_all(&[byte])
                    .map_err(TermBridgeError::LocalWrite)?;
                self.at_line_start = byte == b'\n';
            }
        } else {
            self.output
                .write_all(chunk)
                .map_err(TermBridgeError::LocalWrite)?;
        }

        self.output.flush().map_err(TermBridgeError::LocalWrite)
    }

    fn report(&mut self, fault: &TermBridgeError) {
        // A broken diagnostics stream must not hide the fault itself
        let _ = writeln!(self.diagnostics, "{}", fault);
        let _ = self.diagnostics.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pump(
        input: &[u8],
        timestamps: TimestampFormatter,
    ) -> (Vec<u8>, Vec<u8>, TermBridgeError, SessionSignal) {
        let signal = SessionSignal::new();
        let mut output = Vec::new();
        let mut diagnostics = Vec::new();
        let fault = OutputPump::new(
            Cursor::new(input.to_vec()),
            &mut output,
            &mut diagnostics,
            timestamps,
            signal.clone(),
        )
        .run();
        (output, diagnostics, fault, signal)
    }

    #[test]
    fn test_plain_passthrough_is_sanitized() {
        let (output, _, _, _) = pump(b"abc\x00\xffdef\r\n", TimestampFormatter::disabled());
        assert_eq!(output, b"abc  def\r\n");
    }

    #[test]
    fn test_prefix_on_every_line() {
        let (output, _, _, _) = pump(b"one\ntwo\nthr", TimestampFormatter::resolve("ts"));
        assert_eq!(output, b"[ts] one\n[ts] two\n[ts] thr");
    }

    #[test]
    fn test_line_start_survives_chunk_boundaries() {
        let mut input = vec![b'x'; CHUNK_SIZE - 1];
        input.extend_from_slice(b"\nnext\n");
        let (output, _, _, _) = pump(&input, TimestampFormatter::resolve("ts"));

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("[ts] ").count(), 2);
        assert!(text.ends_with("\n[ts] next\n"));
    }

    #[test]
    fn test_cr_does_not_start_a_line() {
        let (output, _, _, _) = pump(b"a\r\nb\rc", TimestampFormatter::resolve("ts"));
        assert_eq!(output, b"[ts] a\r\n[ts] b\rc");
    }

    #[test]
    fn test_closed_port_is_reported_and_cancels() {
        let (_, diagnostics, fault, signal) = pump(b"bye\n", TimestampFormatter::disabled());

        assert!(fault.is_closed());
        assert!(signal.is_cancelled());
        assert_eq!(diagnostics, b"serial port closed\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_write_fault_ends_pump() {
        let signal = SessionSignal::new();
        let mut diagnostics = Vec::new();
        let fault = OutputPump::new(
            Cursor::new(b"data".to_vec()),
            FailingWriter,
            &mut diagnostics,
            TimestampFormatter::disabled(),
            signal.clone(),
        )
        .run();

        assert!(matches!(fault, TermBridgeError::LocalWrite(_)));
        assert!(signal.is_cancelled());
        assert!(String::from_utf8(diagnostics).unwrap().contains("stdout gone"));
    }
}
