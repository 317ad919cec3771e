//! Scripted streams and clients shared by the unit tests.
//!
//! [`MockStream`] serves a fixed input and records everything done to it, so tests can assert on
//! both the bytes that come out of an adapter and the calls the adapter made to get them.

#![expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "Okay in tests"
)]

use std::collections::VecDeque;
use std::net::IpAddr;
use std::time::Duration;

use crate::{Client, ConnectError, Stream, TimedFlush, TimedStop};

/// A stream over a fixed input that counts its calls.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockStream {
    /// Bytes not yet read.
    pub input: VecDeque<u8>,
    /// Largest number of bytes a single `read_bytes` call delivers, `None` for no limit.
    pub chunk: Option<usize>,
    /// Overrides what `available` reports, `None` to report `input.len()`.
    pub reported_available: Option<usize>,
    /// Everything written, in order.
    pub written: Vec<u8>,
    /// Number of `read_bytes` calls.
    pub read_bytes_calls: usize,
    /// The buffer length of every `read_bytes` call.
    pub read_bytes_requests: Vec<usize>,
    /// Number of `read_byte` calls.
    pub read_byte_calls: usize,
    /// Number of `peek_byte` calls.
    pub peek_calls: usize,
    /// Number of `write_byte` calls.
    pub write_byte_calls: usize,
    /// Number of `write_bytes` calls.
    pub write_bytes_calls: usize,
    /// Number of `flush` calls.
    pub flushes: usize,
}

impl MockStream {
    pub fn new(data: &[u8]) -> Self {
        Self {
            input: data.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Delivers at most `chunk` bytes per `read_bytes` call.
    pub fn chunked(data: &[u8], chunk: usize) -> Self {
        Self {
            chunk: Some(chunk),
            ..Self::new(data)
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        self.input.extend(data.iter().copied());
    }
}

impl Stream for MockStream {
    fn available(&mut self) -> usize {
        self.reported_available.unwrap_or(self.input.len())
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.read_byte_calls += 1;
        self.input.pop_front()
    }

    fn peek_byte(&mut self) -> Option<u8> {
        self.peek_calls += 1;
        self.input.front().copied()
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        self.read_bytes_calls += 1;
        self.read_bytes_requests.push(buf.len());

        let limit = self.chunk.unwrap_or(usize::MAX);
        let count = buf.len().min(self.input.len()).min(limit);
        for (slot, byte) in buf[..count].iter_mut().zip(self.input.drain(..count)) {
            *slot = byte;
        }
        count
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.write_byte_calls += 1;
        self.written.push(byte);
        1
    }

    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.write_bytes_calls += 1;
        self.written.extend_from_slice(buf);
        buf.len()
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Where a [`MockClient`] was asked to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Remote {
    Ip(IpAddr, u16),
    Host(String, u16),
}

/// A client over a [`MockStream`] that records its connection calls.
#[derive(Debug, Default, Clone)]
pub(crate) struct MockClient {
    pub stream: MockStream,
    /// What the next `connect` returns.
    pub connect_result: Option<ConnectError>,
    pub remote: Option<Remote>,
    pub is_connected: bool,
    pub is_usable: bool,
    pub stops: usize,
    pub stop_timeouts: Vec<Duration>,
    pub flush_timeouts: Vec<Duration>,
}

impl MockClient {
    pub fn new(data: &[u8]) -> Self {
        Self {
            stream: MockStream::new(data),
            is_usable: true,
            ..Self::default()
        }
    }
}

impl Stream for MockClient {
    fn available(&mut self) -> usize {
        self.stream.available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.stream.read_byte()
    }

    fn peek_byte(&mut self) -> Option<u8> {
        self.stream.peek_byte()
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        self.stream.read_bytes(buf)
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.stream.write_byte(byte)
    }

    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.stream.write_bytes(buf)
    }

    fn flush(&mut self) {
        self.stream.flush();
    }
}

impl Client for MockClient {
    fn connect(&mut self, ip: IpAddr, port: u16) -> Result<(), ConnectError> {
        self.remote = Some(Remote::Ip(ip, port));
        self.finish_connect()
    }

    fn connect_host(&mut self, host: &str, port: u16) -> Result<(), ConnectError> {
        self.remote = Some(Remote::Host(host.to_owned(), port));
        self.finish_connect()
    }

    fn connected(&mut self) -> bool {
        self.is_connected
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.is_connected = false;
    }

    fn status(&mut self) -> bool {
        self.is_usable
    }

    fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        if self.stream.input.is_empty() {
            return None;
        }
        Some(self.stream.read_bytes(buf))
    }
}

impl MockClient {
    fn finish_connect(&mut self) -> Result<(), ConnectError> {
        match self.connect_result {
            Some(error) => Err(error),
            None => {
                self.is_connected = true;
                Ok(())
            }
        }
    }
}

impl TimedStop for MockClient {
    fn stop_timeout(&mut self, timeout: Duration) -> bool {
        self.stop_timeouts.push(timeout);
        self.is_connected = false;
        true
    }
}

impl TimedFlush for MockClient {
    fn flush_timeout(&mut self, timeout: Duration) -> bool {
        self.flush_timeouts.push(timeout);
        !timeout.is_zero()
    }
}
