//! Fixed-capacity read buffer.
//!
//! The [`Buffer`] type holds the bytes a [`BufferedStream`](crate::BufferedStream) pulled from its
//! upstream but hasn't handed out yet. It never grows: the capacity is the length of the storage
//! it was created with, and every [`reload`](Buffer::reload) asks the upstream for exactly that
//! many bytes.
//!
//! The storage is generic so the same buffer works with an inline array, a borrowed slice, or
//! (with the `alloc` feature) a heap allocation.
//!
//! # Example
//!
//! ```
//! use stream_adapters::buffer::Buffer;
//! # use stream_adapters::Stream;
//! # struct Bytes<'a>(&'a [u8]);
//! # impl Stream for Bytes<'_> {
//! #     fn available(&mut self) -> usize { self.0.len() }
//! #     fn read_byte(&mut self) -> Option<u8> {
//! #         let (&first, rest) = self.0.split_first()?;
//! #         self.0 = rest;
//! #         Some(first)
//! #     }
//! #     fn peek_byte(&mut self) -> Option<u8> { self.0.first().copied() }
//! #     fn write_byte(&mut self, _: u8) -> usize { 0 }
//! # }
//!
//! let mut upstream = Bytes(b"Hello, World!");
//! let mut buffer = Buffer::new([0u8; 8]);
//!
//! // One reload pulls a whole block
//! assert_eq!(buffer.reload(&mut upstream), 8);
//! assert_eq!(buffer.unconsumed(), b"Hello, W");
//!
//! // Hand out what we processed
//! assert_eq!(buffer.pop(), Some(b'H'));
//! assert_eq!(buffer.remaining(), 7);
//! ```

use core::cmp;

use crate::stream::Stream;

/// A fixed-capacity buffer holding a window of unconsumed bytes.
///
/// # Invariants
///
/// This buffer maintains the invariant `0 <= self.pos <= self.len <= self.cap()` at all times,
/// where `self.cap()` is the length of the backing storage. The unconsumed bytes are
/// `buf[pos..len]`, and the buffer is empty when `pos == len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer<B> {
    /// Backing storage, its length is the capacity.
    buf: B,
    /// End of the bytes delivered by the last reload.
    len: usize,
    /// Number of bytes handed out since the last reload (read position).
    pos: usize,
}

impl<B: AsRef<[u8]>> Buffer<B> {
    /// Creates an empty buffer over `storage`.
    ///
    /// The capacity is `storage.len()`. Existing contents of `storage` are never exposed, they
    /// only get overwritten by reloads.
    ///
    /// # Panics
    ///
    /// Panics if `storage` is empty, since a zero sized buffer can never be reloaded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stream_adapters::buffer::Buffer;
    /// let mut storage = [0u8; 16];
    /// let buffer = Buffer::new(&mut storage[..]);
    /// assert_eq!(buffer.cap(), 16);
    /// assert!(buffer.is_empty());
    /// ```
    #[inline]
    pub fn new(storage: B) -> Self {
        assert!(
            !storage.as_ref().is_empty(),
            "buffer storage must hold at least one byte"
        );

        Self {
            buf: storage,
            len: 0,
            pos: 0,
        }
    }

    /// Returns the capacity of the buffer in bytes.
    ///
    /// This is the number of bytes requested from the upstream on every reload.
    #[inline]
    pub fn cap(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns the end of the data delivered by the last reload.
    ///
    /// This includes both consumed and unconsumed data. The unconsumed portion is
    /// `len() - pos()` bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the current read position (number of bytes handed out since the last reload).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the number of unconsumed bytes.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Returns `true` if there are no unconsumed bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.len
    }

    /// Returns the unconsumed bytes.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn unconsumed(&self) -> &[u8] {
        &self.buf.as_ref()[self.pos..self.len]
    }

    /// Returns the next unconsumed byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.unconsumed().first().copied()
    }

    /// Consumes the buffer, returning the backing storage.
    #[inline]
    pub fn into_storage(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Buffer<B> {
    /// Discards all unconsumed bytes.
    #[inline]
    pub fn clear(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// Marks `amt` bytes as consumed, advancing the read position.
    ///
    /// If `amt` exceeds the unconsumed data, the position is clamped to [`len()`](Self::len).
    #[inline]
    pub fn consume(&mut self, amt: usize) {
        self.pos = cmp::min(self.pos.saturating_add(amt), self.len);
    }

    /// Consumes and returns the next byte, or `None` if the buffer is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.consume(1);
        Some(byte)
    }

    /// Copies as many unconsumed bytes as fit into `dest`, consumes them, and returns how many
    /// were copied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stream_adapters::buffer::Buffer;
    /// # use stream_adapters::Stream;
    /// # struct Bytes<'a>(&'a [u8]);
    /// # impl Stream for Bytes<'_> {
    /// #     fn available(&mut self) -> usize { self.0.len() }
    /// #     fn read_byte(&mut self) -> Option<u8> {
    /// #         let (&first, rest) = self.0.split_first()?;
    /// #         self.0 = rest;
    /// #         Some(first)
    /// #     }
    /// #     fn peek_byte(&mut self) -> Option<u8> { self.0.first().copied() }
    /// #     fn write_byte(&mut self, _: u8) -> usize { 0 }
    /// # }
    /// let mut buffer = Buffer::new([0u8; 4]);
    /// buffer.reload(&mut Bytes(b"abcd"));
    ///
    /// let mut dest = [0u8; 3];
    /// assert_eq!(buffer.take_into(&mut dest), 3);
    /// assert_eq!(&dest, b"abc");
    /// assert_eq!(buffer.unconsumed(), b"d");
    /// ```
    #[expect(clippy::indexing_slicing, reason = "Bounded by min of both lengths")]
    pub fn take_into(&mut self, dest: &mut [u8]) -> usize {
        let count = cmp::min(self.remaining(), dest.len());
        dest[..count].copy_from_slice(&self.unconsumed()[..count]);
        self.consume(count);
        count
    }

    /// Discards any unconsumed bytes and refills the buffer with a single
    /// [`read_bytes`](Stream::read_bytes) call of [`cap()`](Self::cap) bytes.
    ///
    /// Returns the number of bytes the upstream delivered, which may be anything from zero to
    /// the capacity. A zero sized reload is not an error, it means the upstream had nothing yet.
    ///
    /// An upstream that reports more bytes than it was given room for is clamped to the capacity.
    pub fn reload<S: Stream + ?Sized>(&mut self, upstream: &mut S) -> usize {
        let cap = self.cap();
        let delivered = upstream.read_bytes(self.buf.as_mut());

        if delivered > cap {
            #[cfg(feature = "tracing")]
            tracing::warn!(delivered, cap, "upstream reported more bytes than requested");

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "upstream reported {=usize} bytes for a {=usize} byte reload",
                delivered,
                cap
            );
        }

        self.pos = 0;
        self.len = cmp::min(delivered, cap);

        #[cfg(feature = "tracing")]
        tracing::trace!(filled = self.len, cap, "buffer reloaded");

        #[cfg(feature = "defmt")]
        defmt::trace!("buffer reloaded with {=usize} of {=usize} bytes", self.len, cap);

        self.len
    }
}

#[cfg(test)]
impl<B: AsRef<[u8]> + AsMut<[u8]>> Buffer<B> {
    /// Sets the buffer contents directly, for tests.
    #[expect(clippy::indexing_slicing, reason = "Only used in tests")]
    pub(crate) fn inject_test_data(&mut self, data: &[u8]) {
        self.buf.as_mut()[..data.len()].copy_from_slice(data);
        self.pos = 0;
        self.len = data.len();
    }
}
