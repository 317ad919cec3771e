use core::cell::RefCell;
use core::net::IpAddr;
use core::time::Duration;

use crate::error::ConnectError;
use crate::stream::Stream;

/// A network client: a [`Stream`] that can be connected to and disconnected from a remote host.
///
/// The connection state belongs to the implementation. Nothing in this crate tracks it on the
/// side.
pub trait Client: Stream {
    /// Connects to `ip:port`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectError`] describing why the connection could not be established.
    fn connect(&mut self, ip: IpAddr, port: u16) -> Result<(), ConnectError>;

    /// Resolves `host` and connects to it on `port`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectError`] describing why the connection could not be established.
    fn connect_host(&mut self, host: &str, port: u16) -> Result<(), ConnectError>;

    /// Returns `true` while the connection is open or unread data remains.
    fn connected(&mut self) -> bool;

    /// Closes the connection without waiting for the remote end.
    fn stop(&mut self);

    /// Returns whether the client is usable at all, independent of any connection.
    fn status(&mut self) -> bool;

    /// Reads up to `buf.len()` bytes and returns how many were read, or `None` when there is no
    /// data to read.
    fn read(&mut self, buf: &mut [u8]) -> Option<usize>;
}

/// A [`Client`] whose transport can bound the time spent closing the connection.
pub trait TimedStop: Client {
    /// Closes the connection, waiting at most `timeout`. Returns `true` if it closed cleanly.
    fn stop_timeout(&mut self, timeout: Duration) -> bool;
}

/// A [`Client`] whose transport can bound the time spent flushing outgoing data.
pub trait TimedFlush: Client {
    /// Flushes outgoing data, waiting at most `timeout`. Returns `true` if everything was sent.
    fn flush_timeout(&mut self, timeout: Duration) -> bool;
}

impl<C: Client + ?Sized> Client for &mut C {
    #[inline]
    fn connect(&mut self, ip: IpAddr, port: u16) -> Result<(), ConnectError> {
        (**self).connect(ip, port)
    }

    #[inline]
    fn connect_host(&mut self, host: &str, port: u16) -> Result<(), ConnectError> {
        (**self).connect_host(host, port)
    }

    #[inline]
    fn connected(&mut self) -> bool {
        (**self).connected()
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop();
    }

    #[inline]
    fn status(&mut self) -> bool {
        (**self).status()
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        (**self).read(buf)
    }
}

impl<C: TimedStop + ?Sized> TimedStop for &mut C {
    #[inline]
    fn stop_timeout(&mut self, timeout: Duration) -> bool {
        (**self).stop_timeout(timeout)
    }
}

impl<C: TimedFlush + ?Sized> TimedFlush for &mut C {
    #[inline]
    fn flush_timeout(&mut self, timeout: Duration) -> bool {
        (**self).flush_timeout(timeout)
    }
}

impl<C: Client + ?Sized> Client for &RefCell<C> {
    #[inline]
    fn connect(&mut self, ip: IpAddr, port: u16) -> Result<(), ConnectError> {
        self.borrow_mut().connect(ip, port)
    }

    #[inline]
    fn connect_host(&mut self, host: &str, port: u16) -> Result<(), ConnectError> {
        self.borrow_mut().connect_host(host, port)
    }

    #[inline]
    fn connected(&mut self) -> bool {
        self.borrow_mut().connected()
    }

    #[inline]
    fn stop(&mut self) {
        self.borrow_mut().stop();
    }

    #[inline]
    fn status(&mut self) -> bool {
        self.borrow_mut().status()
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Option<usize> {
        self.borrow_mut().read(buf)
    }
}

impl<C: TimedStop + ?Sized> TimedStop for &RefCell<C> {
    #[inline]
    fn stop_timeout(&mut self, timeout: Duration) -> bool {
        self.borrow_mut().stop_timeout(timeout)
    }
}

impl<C: TimedFlush + ?Sized> TimedFlush for &RefCell<C> {
    #[inline]
    fn flush_timeout(&mut self, timeout: Duration) -> bool {
        self.borrow_mut().flush_timeout(timeout)
    }
}
