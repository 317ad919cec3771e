//! Buffer size constants for the buffered stream.
//!
//! Buffers in this crate never grow: whatever capacity a
//! [`BufferedStream`](crate::BufferedStream) is built with is the size of every reload it issues
//! to its upstream. [`DEFAULT_CAPACITY`] is the size picked by
//! [`bufferize_input`](crate::bufferize_input) when the caller does not choose one.
//!
//! # Invariant
//!
//! - `DEFAULT_CAPACITY` is non-zero, since a zero sized buffer can never be reloaded.
//! - `DEFAULT_CAPACITY` is a power of 2 and fits comfortably in the RAM of small
//!   microcontrollers (no more than [`MAX_INLINE_CAPACITY`]).

/// Default buffer capacity (64 bytes) for inline buffers.
///
/// This matches the receive FIFO of common UART peripherals several times over, which is enough
/// to turn a byte-at-a-time parser into a handful of block reads without costing much stack.
pub const DEFAULT_CAPACITY: usize =
    // 2^6 = 64
    1 << 6;

/// Largest inline capacity we consider reasonable on the stack of a small target (4 KiB).
///
/// This is not enforced, inline buffers of any non-zero size are accepted. It only bounds
/// [`DEFAULT_CAPACITY`].
pub const MAX_INLINE_CAPACITY: usize =
    // 2^12 = 4096 = 4 KiB
    1 << 12;
