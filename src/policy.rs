//! Policies plugged into a [`ClientProxy`](crate::ClientProxy).
//!
//! A proxy splits the client capability set into three categories and hands every call to the
//! policy for that category, together with the wrapped target:
//!
//! - [`ReadPolicy`]: `available`, `read_byte`, `peek_byte`, `read_bytes` and `read`.
//! - [`WritePolicy`]: `write_byte`, `write_bytes`, `flush`, plus a one-time
//!   [`detach`](WritePolicy::detach) when the proxy is dropped.
//! - [`ConnectPolicy`]: `connect`, `connect_host`, `connected`, `stop` and `status`.
//!
//! [`TimedFlushPolicy`] and [`TimedStopPolicy`] extend the write and connection policies for
//! targets that implement [`TimedFlush`] and [`TimedStop`].
//!
//! Every method defaults to forwarding the call to the target unchanged, so a policy only
//! overrides the operations it wants to intercept. [`Forward`] overrides nothing.
//!
//! # Example
//!
//! A write policy that counts outgoing bytes:
//!
//! ```
//! use stream_adapters::{Client, WritePolicy};
//!
//! #[derive(Clone, Default)]
//! struct CountWrites {
//!     sent: usize,
//! }
//!
//! impl WritePolicy for CountWrites {
//!     fn write_bytes<T: Client + ?Sized>(&mut self, target: &mut T, buf: &[u8]) -> usize {
//!         let written = target.write_bytes(buf);
//!         self.sent += written;
//!         written
//!     }
//!
//!     fn write_byte<T: Client + ?Sized>(&mut self, target: &mut T, byte: u8) -> usize {
//!         let written = target.write_byte(byte);
//!         self.sent += written;
//!         written
//!     }
//! }
//! ```

use core::net::IpAddr;
use core::time::Duration;

use crate::client::{Client, TimedFlush, TimedStop};
use crate::error::ConnectError;

/// Handles the read operations of a [`ClientProxy`](crate::ClientProxy).
pub trait ReadPolicy {
    /// Called for [`Stream::available`](crate::Stream::available).
    #[inline]
    fn available<T: Client + ?Sized>(&mut self, target: &mut T) -> usize {
        target.available()
    }

    /// Called for [`Stream::read_byte`](crate::Stream::read_byte).
    #[inline]
    fn read_byte<T: Client + ?Sized>(&mut self, target: &mut T) -> Option<u8> {
        target.read_byte()
    }

    /// Called for [`Stream::peek_byte`](crate::Stream::peek_byte).
    #[inline]
    fn peek_byte<T: Client + ?Sized>(&mut self, target: &mut T) -> Option<u8> {
        target.peek_byte()
    }

    /// Called for [`Stream::read_bytes`](crate::Stream::read_bytes).
    #[inline]
    fn read_bytes<T: Client + ?Sized>(&mut self, target: &mut T, buf: &mut [u8]) -> usize {
        target.read_bytes(buf)
    }

    /// Called for [`Client::read`].
    #[inline]
    fn read<T: Client + ?Sized>(&mut self, target: &mut T, buf: &mut [u8]) -> Option<usize> {
        target.read(buf)
    }
}

/// Handles the write operations of a [`ClientProxy`](crate::ClientProxy).
pub trait WritePolicy {
    /// Called for [`Stream::write_bytes`](crate::Stream::write_bytes).
    #[inline]
    fn write_bytes<T: Client + ?Sized>(&mut self, target: &mut T, buf: &[u8]) -> usize {
        target.write_bytes(buf)
    }

    /// Called for [`Stream::write_byte`](crate::Stream::write_byte).
    #[inline]
    fn write_byte<T: Client + ?Sized>(&mut self, target: &mut T, byte: u8) -> usize {
        target.write_byte(byte)
    }

    /// Called for [`Stream::flush`](crate::Stream::flush).
    #[inline]
    fn flush<T: Client + ?Sized>(&mut self, target: &mut T) {
        target.flush();
    }

    /// Called exactly once, when the proxy owning this policy is dropped.
    ///
    /// This is the last time the policy sees the target. Anything still held back for it, such
    /// as pending output, has to be handed over here. The default does nothing.
    #[inline]
    fn detach<T: Client + ?Sized>(&mut self, target: &mut T) {
        let _ = target;
    }
}

/// A [`WritePolicy`] that also handles [`TimedFlush::flush_timeout`].
pub trait TimedFlushPolicy: WritePolicy {
    /// Called for [`TimedFlush::flush_timeout`].
    #[inline]
    fn flush_timeout<T: TimedFlush + ?Sized>(&mut self, target: &mut T, timeout: Duration) -> bool {
        target.flush_timeout(timeout)
    }
}

/// Handles the connection operations of a [`ClientProxy`](crate::ClientProxy).
pub trait ConnectPolicy {
    /// Called for [`Client::connect`].
    ///
    /// # Errors
    ///
    /// Whatever the policy decides, by default the target's own [`ConnectError`].
    #[inline]
    fn connect<T: Client + ?Sized>(
        &mut self,
        target: &mut T,
        ip: IpAddr,
        port: u16,
    ) -> Result<(), ConnectError> {
        target.connect(ip, port)
    }

    /// Called for [`Client::connect_host`].
    ///
    /// # Errors
    ///
    /// Whatever the policy decides, by default the target's own [`ConnectError`].
    #[inline]
    fn connect_host<T: Client + ?Sized>(
        &mut self,
        target: &mut T,
        host: &str,
        port: u16,
    ) -> Result<(), ConnectError> {
        target.connect_host(host, port)
    }

    /// Called for [`Client::connected`].
    #[inline]
    fn connected<T: Client + ?Sized>(&mut self, target: &mut T) -> bool {
        target.connected()
    }

    /// Called for [`Client::stop`].
    #[inline]
    fn stop<T: Client + ?Sized>(&mut self, target: &mut T) {
        target.stop();
    }

    /// Called for [`Client::status`].
    #[inline]
    fn status<T: Client + ?Sized>(&mut self, target: &mut T) -> bool {
        target.status()
    }
}

/// A [`ConnectPolicy`] that also handles [`TimedStop::stop_timeout`].
pub trait TimedStopPolicy: ConnectPolicy {
    /// Called for [`TimedStop::stop_timeout`].
    #[inline]
    fn stop_timeout<T: TimedStop + ?Sized>(&mut self, target: &mut T, timeout: Duration) -> bool {
        target.stop_timeout(timeout)
    }
}

/// The pass-through policy: forwards every call to the target unchanged.
///
/// Use it for the categories a proxy shouldn't intercept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Forward;

impl ReadPolicy for Forward {}

impl WritePolicy for Forward {}

impl TimedFlushPolicy for Forward {}

impl ConnectPolicy for Forward {}

impl TimedStopPolicy for Forward {}
