use core::net::IpAddr;
use core::time::Duration;

use crate::client::{Client, TimedFlush, TimedStop};
use crate::error::ConnectError;
use crate::policy::{ConnectPolicy, ReadPolicy, TimedFlushPolicy, TimedStopPolicy, WritePolicy};
use crate::stream::Stream;

/// A [`Client`] that routes every call through pluggable policies.
///
/// `ClientProxy` wraps a target client and implements the same capability set, so it can stand
/// in for the target anywhere a [`Client`] or [`Stream`] is expected. It has no behaviour of its
/// own: every operation is handed to the policy for its category, together with the target.
///
/// | Category | Policy | Operations |
/// |----------|--------|------------|
/// | Read | `R: ReadPolicy` | `available`, `read_byte`, `peek_byte`, `read_bytes`, `read` |
/// | Write | `W: WritePolicy` | `write_byte`, `write_bytes`, `flush` |
/// | Connection | `C: ConnectPolicy` | `connect`, `connect_host`, `connected`, `stop`, `status` |
///
/// The timed variants are available when both the target and the matching policy support them:
/// [`TimedFlush`] needs `T: TimedFlush` and `W: TimedFlushPolicy`, [`TimedStop`] needs
/// `T: TimedStop` and `C: TimedStopPolicy`.
///
/// When the proxy is dropped, [`WritePolicy::detach`] is called exactly once with the target.
///
/// # Sharing the target
///
/// The target is held by value, and is typically `&mut client` or `&RefCell<client>`. The proxy
/// is [`Clone`] when the target and all three policies are. With a `&RefCell<_>` target, clones
/// share the client while each gets its own copy of the policies, and each one detaches from the
/// target when it is dropped.
///
/// # Example
///
/// ```
/// use stream_adapters::{Client, ClientProxy, Forward, Stream};
/// # use stream_adapters::ConnectError;
/// # use core::net::IpAddr;
/// # struct Socket;
/// # impl Stream for Socket {
/// #     fn available(&mut self) -> usize { 0 }
/// #     fn read_byte(&mut self) -> Option<u8> { None }
/// #     fn peek_byte(&mut self) -> Option<u8> { None }
/// #     fn write_byte(&mut self, _: u8) -> usize { 1 }
/// # }
/// # impl Client for Socket {
/// #     fn connect(&mut self, _: IpAddr, _: u16) -> Result<(), ConnectError> { Ok(()) }
/// #     fn connect_host(&mut self, _: &str, _: u16) -> Result<(), ConnectError> { Ok(()) }
/// #     fn connected(&mut self) -> bool { true }
/// #     fn stop(&mut self) {}
/// #     fn status(&mut self) -> bool { true }
/// #     fn read(&mut self, _: &mut [u8]) -> Option<usize> { None }
/// # }
///
/// let mut socket = Socket;
/// let mut client = ClientProxy::new(&mut socket, Forward, Forward, Forward);
///
/// client.connect_host("example.com", 80).unwrap();
/// assert_eq!(client.write_bytes(b"GET / HTTP/1.0\r\n\r\n"), 18);
/// ```
#[derive(Debug)]
pub struct ClientProxy<T, R, W, C>
where
    T: Client,
    R: ReadPolicy,
    W: WritePolicy,
    C: ConnectPolicy,
{
    target: T,
    reader: R,
    writer: W,
    connection: C,
}

impl<T, R, W, C> ClientProxy<T, R, W, C>
where
    T: Client,
    R: ReadPolicy,
    W: WritePolicy,
    C: ConnectPolicy,
{
    /// Creates a proxy over `target` with one policy per operation category.
    pub fn new(target: T, reader: R, writer: W, connection: C) -> Self {
        Self {
            target,
            reader,
            writer,
            connection,
        }
    }

    /// Gets a reference to the target.
    pub fn get_ref(&self) -> &T {
        &self.target
    }

    /// Gets a mutable reference to the target.
    ///
    /// Calls made directly on the target bypass the policies.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Returns the read policy.
    pub fn read_policy(&self) -> &R {
        &self.reader
    }

    /// Returns the write policy.
    pub fn write_policy(&self) -> &W {
        &self.writer
    }

    /// Returns the connection policy.
    pub fn connect_policy(&self) -> &C {
        &self.connection
    }
}

impl<T, R, W, C> Clone for ClientProxy<T, R, W, C>
where
    T: Client + Clone,
    R: ReadPolicy + Clone,
    W: WritePolicy + Clone,
    C: ConnectPolicy + Clone,
{
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            reader: self.reader.clone(),
            writer: self.writer.clone(),
            connection: self.connection.clone(),
        }
    }
}

impl<T, R, W, C> Drop for ClientProxy<T, R, W, C>
where
    T: Client,
    R: ReadPolicy,
    W: WritePolicy,
    C: ConnectPolicy,
{
    fn drop(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("detaching write policy from client");

        #[cfg(feature = "defmt")]
        defmt::debug!("detaching write policy from client");

        self.writer.detach(&mut self.target);
    }
}

impl<T, R, W, C> Stream for ClientProxy<T, R, W, C>
where
    T: Client,
    R: ReadPolicy,
    W: WritePolicy,
    C: ConnectPolicy,
{
    #[inline]
    fn available(&mut self) -> usize {
        self.reader.available(&mut self.target)
    }

    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        self.reader.read_byte(&mut self.target)
    }

    #[inline]
    fn peek_byte(&mut self) -> Option<u8> {
        self.reader.peek_byte(&mut self.target)
    }

    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
        self.reader.read_bytes(&mut self.target, buf)
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> usize {
        self.writer.write_byte(&mut self.target, byte)
    }

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.writer.write_bytes(&mut self.target, buf)
    }

    #[inline]
    fn flush(&mut self) {
        self.writer.flush(&mut self.target);
    }
}

impl<T, R, W, C> Client for ClientProxy<T, R, W, C>
where
    T: Client,
    R: ReadPolicy,
    W: WritePolicy,
    C: ConnectPolicy,
{
    #[inline]
    fn connect(&mut self, ip: IpAddr, port: u16) -> Result<(), ConnectError> {
        self.connection.connect(&mut self.target, ip, port)
    }

    #[inline]
    fn connect_host(&mut self, host: &str, port: u16) -> Result<(), ConnectError> {
        self.connection.connect_host(&mut self.target, host, port)
    }

    #[inline]
    fn connected(&mut self) -> bool {
        self.connection.connected(&mut self.target)
    }

    #[inline]
    fn stop(&mut self) {
        self.connection.stop(&mut self.target);
    }

    #[inline]
    fn status(&mut self) -> bool {
        self.connection.status(&mut self.target)
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        self.reader.read(&mut self.target, buf)
    }
}

impl<T, R, W, C> TimedStop for ClientProxy<T, R, W, C>
where
    T: TimedStop,
    R: ReadPolicy,
    W: WritePolicy,
    C: TimedStopPolicy,
{
    #[inline]
    fn stop_timeout(&mut self, timeout: Duration) -> bool {
        self.connection.stop_timeout(&mut self.target, timeout)
    }
}

impl<T, R, W, C> TimedFlush for ClientProxy<T, R, W, C>
where
    T: TimedFlush,
    R: ReadPolicy,
    W: TimedFlushPolicy,
    C: ConnectPolicy,
{
    #[inline]
    fn flush_timeout(&mut self, timeout: Duration) -> bool {
        self.writer.flush_timeout(&mut self.target, timeout)
    }
}
