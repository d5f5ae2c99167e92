use super::input::InputPump;
use super::output::OutputPump;
use super::signal::SessionSignal;
use super::timestamp::TimestampFormatter;
use crate::domain::{config::SessionConfig, error::TermBridgeResult};
use crate::infrastructure::serial::SerialChannel;
use std::io::{self, Read, Write};
use std::thread;
use tracing::info;

/// Runs one console session: opens the port, starts both pumps and
/// returns once either of them has ended the session.
pub struct SessionController {
    config: SessionConfig,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Bridge the configured serial port to this process's stdin/stdout.
    ///
    /// Open failures are returned before any pump starts. A fault in either
    /// direction is a normal end of session, not an error.
    pub async fn run(self) -> TermBridgeResult<()> {
        let channel = SerialChannel::open(&self.config)?;
        let (reader, writer) = channel.split()?;

        self.bridge(reader, writer, io::stdin(), io::stdout(), io::stderr())
            .await
    }

    /// Bridge arbitrary streams; `run` supplies the serial port and stdio.
    ///
    /// Pumps run on their own threads and are left behind when this returns,
    /// the one that did not end the session may still be blocked in a read.
    pub async fn bridge<SR, SW, I, O, D>(
        &self,
        serial_rx: SR,
        serial_tx: SW,
        input: I,
        output: O,
        diagnostics: D,
    ) -> TermBridgeResult<()>
    where
        SR: Read + Send + 'static,
        SW: Write + Send + 'static,
        I: Read + Send + 'static,
        O: Write + Send + 'static,
        D: Write + Send + 'static,
    {
        let signal = SessionSignal::new();
        let timestamps = TimestampFormatter::resolve(&self.config.timestamp);

        let output_pump =
            OutputPump::new(serial_rx, output, diagnostics, timestamps, signal.clone());
        let input_pump =
            InputPump::new(input, serial_tx, !self.config.no_input, signal.clone());

        thread::Builder::new()
            .name("serial-output".to_string())
            .spawn(move || output_pump.run())?;
        thread::Builder::new()
            .name("console-input".to_string())
            .spawn(move || input_pump.run())?;

        info!(port = %self.config.port, "Console session started");
        signal.cancelled().await;
        info!(port = %self.config.port, "Console session ended");

        Ok(())
    }
}
