//! Stream adapters for embedded byte streams and network clients.
//!
//! Serial ports, sockets and radio modules on small targets tend to expose the same blocking,
//! byte-oriented API: read a byte, peek at the next one, write a few, ask how many are waiting.
//! This crate models that API as the [`Stream`] and [`Client`] traits and provides two adapters
//! that can be slotted in front of any implementation:
//!
//! - [`BufferedStream`] turns many small reads into a few block reads of its upstream, using a
//!   fixed buffer that never grows.
//! - [`ClientProxy`] wraps a client and hands every operation to a pluggable policy, so reads,
//!   writes and connection handling can be intercepted independently.
//!
//! Both implement the same traits as what they wrap, so they drop into code written against
//! `impl Stream` or `impl Client` unchanged.
//!
//! # Quick start
//!
//! ```
//! use stream_adapters::{Stream, bufferize_input};
//! # struct Uart<'a>(&'a [u8]);
//! # impl Stream for Uart<'_> {
//! #     fn available(&mut self) -> usize { self.0.len() }
//! #     fn read_byte(&mut self) -> Option<u8> {
//! #         let (&first, rest) = self.0.split_first()?;
//! #         self.0 = rest;
//! #         Some(first)
//! #     }
//! #     fn peek_byte(&mut self) -> Option<u8> { self.0.first().copied() }
//! #     fn write_byte(&mut self, _: u8) -> usize { 1 }
//! # }
//!
//! let mut uart = Uart(b"+OK\r\n");
//!
//! // 64 bytes of inline buffer
//! let mut reader = bufferize_input(&mut uart);
//!
//! let mut line = [0u8; 5];
//! assert_eq!(reader.read_bytes(&mut line), 5);
//! assert_eq!(&line, b"+OK\r\n");
//! assert_eq!(reader.read_byte(), None);
//! ```
//!
//! # Features
//!
//! - `std` (default): implies `alloc`, and adds [`IoStream`] to bridge [`std::io`] readers and
//!   writers.
//! - `alloc`: heap-allocated buffers through [`BufferedStream::with_capacity`].
//! - `tracing`: logs buffer reloads and proxy lifecycle events with `tracing`.
//! - `defmt`: the same events through `defmt`, plus `defmt::Format` on the public types.
//!
//! # Crate organisation
//!
//! - [`Stream`], [`Client`], [`TimedStop`] and [`TimedFlush`]: the capability set.
//! - [`BufferedStream`]: the buffered reader, with [`StaticBufferedStream`] and
//!   [`bufferize_input`] for inline buffers.
//! - [`ClientProxy`]: the policy-driven client, configured with the traits in [`policy`].
//! - [`ConnectError`]: why a connection attempt failed.
//! - [`buffer::Buffer`]: the standalone fixed-capacity buffer.
//! - [`constants`]: buffer size constants ([`DEFAULT_CAPACITY`](constants::DEFAULT_CAPACITY),
//!   [`MAX_INLINE_CAPACITY`](constants::MAX_INLINE_CAPACITY)).

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod buffer;
mod client;
pub mod constants;
mod error;
#[cfg(feature = "std")]
mod io;
pub mod policy;
mod proxy;
mod reader;
mod stream;
#[cfg(test)]
mod testing;

pub use client::{Client, TimedFlush, TimedStop};
pub use error::ConnectError;
#[cfg(feature = "std")]
pub use io::IoStream;
pub use policy::{
    ConnectPolicy, Forward, ReadPolicy, TimedFlushPolicy, TimedStopPolicy, WritePolicy,
};
pub use proxy::ClientProxy;
pub use reader::{BufferedStream, StaticBufferedStream, bufferize_input};
pub use stream::Stream;
