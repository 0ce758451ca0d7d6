//! In-memory stand-in for the Duet, used by the unit and integration tests.

use crate::device::base::ControlTransport;
use crate::error::TransportError;
use std::collections::{HashMap, HashSet};

/// Holds one byte per (request code, index) register. Writes land in the register file and the
/// write log, reads come back out of the register file.
#[derive(Debug, Default)]
pub struct MockTransport {
    registers: HashMap<(u8, u16), u8>,

    /// Every successful write, in order: (request, index, value).
    pub writes: Vec<(u8, u16, u8)>,

    /// Every read, in order: (request, index).
    pub reads: Vec<(u8, u16)>,

    failing_writes: HashSet<u8>,
    failing_reads: HashSet<u8>,
    short_reads: HashSet<u8>,
    fail_write_number: Option<usize>,
    write_attempts: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_register(mut self, request: u8, index: u16, value: u8) -> Self {
        self.set_register(request, index, value);
        self
    }

    pub fn set_register(&mut self, request: u8, index: u16, value: u8) {
        self.registers.insert((request, index), value);
    }

    pub fn register(&self, request: u8, index: u16) -> Option<u8> {
        self.registers.get(&(request, index)).copied()
    }

    /// Every write to this request code fails with a pipe error.
    pub fn fail_writes_to(&mut self, request: u8) {
        self.failing_writes.insert(request);
    }

    /// Every read of this request code fails with a pipe error.
    pub fn fail_reads_of(&mut self, request: u8) {
        self.failing_reads.insert(request);
    }

    /// Reads of this request code transfer no bytes.
    pub fn short_reads_of(&mut self, request: u8) {
        self.short_reads.insert(request);
    }

    /// The nth write attempt from now (1 based) fails, regardless of its request code.
    pub fn fail_nth_write(&mut self, n: usize) {
        self.fail_write_number = Some(self.write_attempts + n);
    }

    pub fn writes_to(&self, request: u8) -> Vec<(u16, u8)> {
        self.writes
            .iter()
            .filter(|(code, _, _)| *code == request)
            .map(|(_, index, value)| (*index, *value))
            .collect()
    }
}

impl ControlTransport for MockTransport {
    fn read_byte(&mut self, request: u8, index: u16) -> Result<u8, TransportError> {
        self.reads.push((request, index));
        if self.failing_reads.contains(&request) {
            return Err(TransportError::UsbError(rusb::Error::Pipe));
        }
        if self.short_reads.contains(&request) {
            return Err(TransportError::MalformedResponse {
                expected: 1,
                transferred: 0,
            });
        }
        Ok(self.register(request, index).unwrap_or(0))
    }

    fn write_byte(&mut self, request: u8, index: u16, value: u8) -> Result<(), TransportError> {
        self.write_attempts += 1;
        if self.fail_write_number == Some(self.write_attempts)
            || self.failing_writes.contains(&request)
        {
            return Err(TransportError::UsbError(rusb::Error::Pipe));
        }
        self.registers.insert((request, index), value);
        self.writes.push((request, index, value));
        Ok(())
    }
}
