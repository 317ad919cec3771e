use crate::Stream;
use crate::buffer::Buffer;
use crate::constants::DEFAULT_CAPACITY;

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec};

/// A [`Stream`] adapter that turns small reads into block reads of its upstream.
///
/// Every time its buffer runs dry, a `BufferedStream` refills it with one
/// [`read_bytes`](Stream::read_bytes) call asking for the full capacity, then serves
/// [`read_byte`](Stream::read_byte), [`peek_byte`](Stream::peek_byte) and small
/// [`read_bytes`](Stream::read_bytes) calls from memory. This pays off when each upstream call is
/// expensive, for instance when it polls a peripheral register or takes a lock.
///
/// Writes are not buffered: [`write_byte`](Stream::write_byte),
/// [`write_bytes`](Stream::write_bytes) and [`flush`](Stream::flush) go straight to the upstream.
///
/// The buffer is only ever filled on demand, never ahead of time, and every byte handed out came
/// from the upstream exactly once.
///
/// # Storage
///
/// `B` is the buffer storage and its length is the capacity:
///
/// - `[u8; N]` keeps the buffer inline, see [`StaticBufferedStream`] and [`bufferize_input`].
/// - `&mut [u8]` borrows a buffer from the caller.
/// - `Box<[u8]>` allocates, see [`with_capacity`](Self::with_capacity) (requires `alloc`).
///
/// # Example
///
/// ```
/// use stream_adapters::{BufferedStream, Stream};
/// # struct Uart<'a>(&'a [u8]);
/// # impl Stream for Uart<'_> {
/// #     fn available(&mut self) -> usize { self.0.len() }
/// #     fn read_byte(&mut self) -> Option<u8> {
/// #         let (&first, rest) = self.0.split_first()?;
/// #         self.0 = rest;
/// #         Some(first)
/// #     }
/// #     fn peek_byte(&mut self) -> Option<u8> { self.0.first().copied() }
/// #     fn write_byte(&mut self, _: u8) -> usize { 1 }
/// # }
///
/// let mut uart = Uart(b"HELLOWORLD");
/// let mut storage = [0u8; 4];
/// let mut reader = BufferedStream::new(&mut uart, &mut storage[..]);
///
/// // The first read pulls "HELL" in one go
/// assert_eq!(reader.read_byte(), Some(b'H'));
/// assert_eq!(reader.buffered(), b"ELL");
///
/// // 3 bytes buffered + 6 still in the upstream
/// assert_eq!(reader.available(), 9);
/// ```
#[derive(Debug)]
pub struct BufferedStream<S, B> {
    buffer: Buffer<B>,
    upstream: S,
}

/// A [`BufferedStream`] with an inline buffer of `N` bytes.
pub type StaticBufferedStream<S, const N: usize> = BufferedStream<S, [u8; N]>;

/// Wraps `upstream` in a [`BufferedStream`] with an inline buffer of [`DEFAULT_CAPACITY`] bytes.
///
/// ```
/// # use stream_adapters::{bufferize_input, Stream};
/// # use stream_adapters::constants::DEFAULT_CAPACITY;
/// # struct Silent;
/// # impl Stream for Silent {
/// #     fn available(&mut self) -> usize { 0 }
/// #     fn read_byte(&mut self) -> Option<u8> { None }
/// #     fn peek_byte(&mut self) -> Option<u8> { None }
/// #     fn write_byte(&mut self, _: u8) -> usize { 1 }
/// # }
/// let mut upstream = Silent;
/// let reader = bufferize_input(&mut upstream);
/// assert_eq!(reader.capacity(), DEFAULT_CAPACITY);
/// ```
pub fn bufferize_input<S: Stream>(upstream: S) -> StaticBufferedStream<S, DEFAULT_CAPACITY> {
    BufferedStream::inline(upstream)
}

impl<S: Stream, B: AsRef<[u8]> + AsMut<[u8]>> BufferedStream<S, B> {
    /// Creates a new `BufferedStream` reading from `upstream` through `storage`.
    ///
    /// The capacity is `storage.len()`. The buffer starts empty, nothing is read until the first
    /// read call.
    ///
    /// # Panics
    ///
    /// Panics if `storage` is empty.
    pub fn new(upstream: S, storage: B) -> Self {
        let buffer = Buffer::new(storage);

        #[cfg(feature = "tracing")]
        tracing::debug!(capacity = buffer.cap(), "creating buffered stream");

        #[cfg(feature = "defmt")]
        defmt::debug!("creating buffered stream with capacity {=usize}", buffer.cap());

        Self { buffer, upstream }
    }
}

impl<S: Stream, const N: usize> BufferedStream<S, [u8; N]> {
    /// Creates a new `BufferedStream` with an inline buffer of `N` bytes.
    ///
    /// A zero `N` is rejected at compile time.
    pub fn inline(upstream: S) -> Self {
        const { assert!(N > 0, "buffer capacity must be at least one byte") };
        Self::new(upstream, [0; N])
    }
}

#[cfg(feature = "alloc")]
impl<S: Stream> BufferedStream<S, Box<[u8]>> {
    /// Creates a new `BufferedStream` with a heap allocated buffer of `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(upstream: S, capacity: usize) -> Self {
        Self::new(upstream, vec![0; capacity].into_boxed_slice())
    }
}

impl<S, B: AsRef<[u8]>> BufferedStream<S, B> {
    /// Returns the buffer capacity, which is also the size of every reload.
    pub fn capacity(&self) -> usize {
        self.buffer.cap()
    }

    /// Returns the bytes that were read from the upstream but not handed out yet.
    pub fn buffered(&self) -> &[u8] {
        self.buffer.unconsumed()
    }

    /// Gets a reference to the upstream.
    pub fn get_ref(&self) -> &S {
        &self.upstream
    }

    /// Gets a mutable reference to the upstream.
    ///
    /// Reading from the upstream directly skips whatever is still buffered.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.upstream
    }

    /// Unwraps this `BufferedStream`, returning the upstream.
    ///
    /// Buffered bytes are lost. Check [`buffered`](Self::buffered) first if they matter.
    pub fn into_inner(self) -> S {
        self.upstream
    }

    /// Unwraps this `BufferedStream`, returning the upstream and the buffer storage.
    pub fn into_parts(self) -> (S, B) {
        (self.upstream, self.buffer.into_storage())
    }
}

impl<S: Stream, B: AsRef<[u8]> + AsMut<[u8]>> Stream for BufferedStream<S, B> {
    /// Returns the buffered byte count plus whatever the upstream reports.
    fn available(&mut self) -> usize {
        self.upstream
            .available()
            .saturating_add(self.buffer.remaining())
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.buffer.is_empty() {
            self.buffer.reload(&mut self.upstream);
        }

        self.buffer.pop()
    }

    /// Returns the next buffered byte, or defers to the upstream's peek when the buffer is empty.
    ///
    /// This never reloads.
    fn peek_byte(&mut self) -> Option<u8> {
        match self.buffer.peek() {
            Some(byte) => Some(byte),
            None => self.upstream.peek_byte(),
        }
    }

    /// Reads into `buf`, from the buffer first and then from the upstream.
    ///
    /// Whatever is buffered is handed out first. If less than a full buffer is still wanted, the
    /// buffer is reloaded once and the rest is served from it, keeping any surplus for later
    /// reads. Larger requests go straight to the upstream, since copying them through the buffer
    /// would gain nothing.
    ///
    /// The count is short when the upstream delivers less than what was asked for. Only bytes
    /// the upstream actually delivered are ever copied into `buf`.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Bounded by buf.len()"
    )]
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        // Hand out what we have
        let mut count = self.buffer.take_into(buf);
        let rest = &mut buf[count..];

        if rest.is_empty() {
            return count;
        }

        // At this point the buffer is empty
        debug_assert!(self.buffer.is_empty());

        if rest.len() < self.buffer.cap() {
            // Small request, go through the buffer so the surplus isn't lost
            self.buffer.reload(&mut self.upstream);
            let copied = self.buffer.take_into(rest);

            #[cfg(any(feature = "tracing", feature = "defmt"))]
            if copied < rest.len() {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    wanted = rest.len(),
                    copied,
                    "upstream delivered less than requested"
                );

                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "upstream delivered {=usize} of {=usize} requested bytes",
                    copied,
                    rest.len()
                );
            }

            count += copied;
        } else {
            // Large request, let the upstream write into `buf` directly
            count += self.upstream.read_bytes(rest).min(rest.len());
        }

        count
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.upstream.write_byte(byte)
    }

    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.upstream.write_bytes(buf)
    }

    fn flush(&mut self) {
        self.upstream.flush();
    }
}
