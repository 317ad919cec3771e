//! Bridge from [`std::io`] to [`Stream`].
//!
//! [`IoStream`] lets anything implementing [`Read`] and [`Write`] (a `TcpStream`, a serial port
//! crate, a `Cursor` in tests) sit under a [`BufferedStream`](crate::BufferedStream) or a
//! [`ClientProxy`](crate::ClientProxy) target.
//!
//! `std::io` reports failures through [`io::Error`], while the stream capability set has no
//! error channel. `IoStream` treats a failed call like one that had no data, and keeps the error
//! around for the caller to collect with [`IoStream::take_error`].
//!
//! Reads never wait for more than one call to the inner reader. A reader that would block or timed
//! out simply has no data yet, and is not recorded as an error.

use std::io::{self, Read, Write};

use crate::Stream;

/// A [`Stream`] over a [`std::io`] reader and writer.
///
/// # Example
///
/// ```
/// use stream_adapters::{BufferedStream, IoStream, Stream};
/// use std::io::Cursor;
///
/// let mut io = IoStream::new(Cursor::new(b"Hello".to_vec()));
/// let mut reader = BufferedStream::with_capacity(&mut io, 16);
///
/// assert_eq!(reader.read_byte(), Some(b'H'));
/// assert_eq!(reader.buffered(), b"ello");
/// ```
#[derive(Debug)]
pub struct IoStream<T> {
    inner: T,
    /// A byte read ahead by `peek_byte`.
    peeked: Option<u8>,
    /// The most recent error, if it hasn't been taken.
    error: Option<io::Error>,
}

impl<T> IoStream<T> {
    /// Creates a new `IoStream` over `inner`.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            peeked: None,
            error: None,
        }
    }

    /// Returns the most recent I/O error and clears it.
    ///
    /// ```
    /// # use stream_adapters::{IoStream, Stream};
    /// # use std::io::{self, Read, Write};
    /// struct Broken;
    ///
    /// impl Read for Broken {
    ///     fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
    ///         Err(io::ErrorKind::BrokenPipe.into())
    ///     }
    /// }
    /// # impl Write for Broken {
    /// #     fn write(&mut self, buf: &[u8]) -> io::Result<usize> { Ok(buf.len()) }
    /// #     fn flush(&mut self) -> io::Result<()> { Ok(()) }
    /// # }
    ///
    /// let mut stream = IoStream::new(Broken);
    /// assert_eq!(stream.read_byte(), None);
    /// assert_eq!(stream.take_error().map(|e| e.kind()), Some(io::ErrorKind::BrokenPipe));
    /// assert!(stream.take_error().is_none());
    /// ```
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Gets a reference to the inner reader and writer.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Gets a mutable reference to the inner reader and writer.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwraps this `IoStream`, returning the inner reader and writer.
    ///
    /// A byte read ahead by [`peek_byte`](Stream::peek_byte) is lost.
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn record(&mut self, error: io::Error) {
        #[cfg(feature = "tracing")]
        tracing::warn!(%error, "stream I/O failed");

        self.error = Some(error);
    }
}

impl<T: Read + Write> IoStream<T> {
    /// Issues a single read into `buf`, retrying on interrupt, and returns how many bytes it got.
    ///
    /// A reader that would block or timed out has no data yet, which is not recorded as an error.
    fn read_once(&mut self, buf: &mut [u8]) -> usize {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return n.min(buf.len()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    return 0;
                }
                Err(e) => {
                    self.record(e);
                    return 0;
                }
            }
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        (self.read_once(&mut byte) == 1).then_some(byte[0])
    }
}

impl<T: Read + Write> Stream for IoStream<T> {
    /// Returns `1` if a byte was read ahead by [`peek_byte`](Stream::peek_byte), `0` otherwise.
    ///
    /// `std::io` has no portable way to ask how much can be read without blocking.
    fn available(&mut self) -> usize {
        usize::from(self.peeked.is_some())
    }

    fn read_byte(&mut self) -> Option<u8> {
        match self.peeked.take() {
            Some(byte) => Some(byte),
            None => self.next_byte(),
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.peeked.is_none() {
            self.peeked = self.next_byte();
        }
        self.peeked
    }

    /// Returns whatever a single read of the inner reader delivers, without waiting for `buf` to
    /// fill up. A byte read ahead by [`peek_byte`](Stream::peek_byte) is returned on its own.
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let Some(first) = buf.first_mut() else {
            return 0;
        };

        match self.peeked.take() {
            Some(byte) => {
                *first = byte;
                1
            }
            None => self.read_once(buf),
        }
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.write_bytes(&[byte])
    }

    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Bounded by buf.len()"
    )]
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        let mut pos = 0;
        while pos < buf.len() {
            match self.inner.write(&buf[pos..]) {
                Ok(0) => break,
                Ok(n) => pos += n.min(buf.len() - pos),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.record(e);
                    break;
                }
            }
        }
        pos
    }

    fn flush(&mut self) {
        loop {
            match self.inner.flush() {
                Ok(()) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.record(e);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
