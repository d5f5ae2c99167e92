//! In-memory stand-ins for the serial port and local streams.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

/// Serial port that replays fixed chunks, then ends with `end`
/// (a clean close when `None`).
pub struct ScriptedSerial {
    chunks: VecDeque<Vec<u8>>,
    end: Option<io::Error>,
}

impl ScriptedSerial {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            end: None,
        }
    }

    pub fn failing_with(mut self, error: io::Error) -> Self {
        self.end = Some(error);
        self
    }
}

impl Read for ScriptedSerial {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            Some(mut chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.chunks.push_front(chunk.split_off(n));
                }
                Ok(n)
            }
            None => match self.end.take() {
                Some(error) => Err(error),
                None => Ok(0),
            },
        }
    }
}

/// Write sink whose contents stay readable after it has been moved into a pump.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.contents()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Local input that blocks until bytes are sent, ending once the sender is dropped.
pub struct ChannelInput(mpsc::Receiver<u8>);

impl ChannelInput {
    pub fn new() -> (mpsc::Sender<u8>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self(rx))
    }
}

impl Read for ChannelInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.0.recv() {
            Ok(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            Err(_) => Ok(0),
        }
    }
}
