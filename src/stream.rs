use core::cell::RefCell;

/// A blocking, byte-oriented stream, the capability set shared by serial ports, sockets and the
/// adapters in this crate.
///
/// Reads never fail: "nothing available right now" is reported through `None` or a short count,
/// and it is up to the caller to retry. Whether an operation blocks, and for how long, is decided
/// by the implementation (a UART might poll a FIFO, a socket might wait for its receive timeout).
///
/// Adapters are generic over `S: Stream` and take their upstream by value. To lend a stream
/// instead of handing it over, pass `&mut stream`, or `&RefCell<_>` when several adapters need
/// to take turns on the same upstream.
pub trait Stream {
    /// Returns the number of bytes that can be read without blocking.
    fn available(&mut self) -> usize;

    /// Reads and consumes the next byte, or returns `None` if there is no data.
    fn read_byte(&mut self) -> Option<u8>;

    /// Returns the next byte without consuming it, or `None` if there is no data.
    fn peek_byte(&mut self) -> Option<u8>;

    /// Reads up to `buf.len()` bytes into `buf` and returns how many were read.
    ///
    /// A short count, including zero, means the stream ran out of data before `buf` was full.
    ///
    /// The default implementation calls [`read_byte`](Self::read_byte) until `buf` is full or it
    /// returns `None`.
    #[expect(clippy::arithmetic_side_effects, reason = "Bounded by buf.len()")]
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.read_byte() {
                Some(byte) => *slot = byte,
                None => break,
            }
            count += 1;
        }
        count
    }

    /// Writes a single byte and returns the number of bytes written (`0` or `1`).
    fn write_byte(&mut self, byte: u8) -> usize;

    /// Writes `buf` and returns the number of bytes written.
    ///
    /// The default implementation calls [`write_byte`](Self::write_byte) for every byte and stops
    /// at the first one that isn't accepted.
    #[expect(clippy::arithmetic_side_effects, reason = "Bounded by buf.len()")]
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        let mut count = 0;
        for &byte in buf {
            if self.write_byte(byte) == 0 {
                break;
            }
            count += 1;
        }
        count
    }

    /// Waits until all outgoing bytes have been transmitted. Default is a no-op.
    fn flush(&mut self) {}
}

impl<S: Stream + ?Sized> Stream for &mut S {
    #[inline]
    fn available(&mut self) -> usize {
        (**self).available()
    }

    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    #[inline]
    fn peek_byte(&mut self) -> Option<u8> {
        (**self).peek_byte()
    }

    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        (**self).read_bytes(buf)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> usize {
        (**self).write_byte(byte)
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        (**self).write_bytes(buf)
    }

    #[inline]
    fn flush(&mut self) {
        (**self).flush();
    }
}

/// Shared handle to a stream.
///
/// Each call borrows the stream for the duration of that call only, so any number of handles can
/// be held at once as long as the calls themselves don't nest.
///
/// # Panics
///
/// Every method panics if the stream is already mutably borrowed, i.e. when called re-entrantly
/// from inside another call on the same stream.
impl<S: Stream + ?Sized> Stream for &RefCell<S> {
    #[inline]
    fn available(&mut self) -> usize {
        self.borrow_mut().available()
    }

    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        self.borrow_mut().read_byte()
    }

    #[inline]
    fn peek_byte(&mut self) -> Option<u8> {
        self.borrow_mut().peek_byte()
    }

    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        self.borrow_mut().read_bytes(buf)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> usize {
        self.borrow_mut().write_byte(byte)
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.borrow_mut().write_bytes(buf)
    }

    #[inline]
    fn flush(&mut self) {
        self.borrow_mut().flush();
    }
}
