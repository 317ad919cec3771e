use std::io::{self, Cursor, Read, Write};

use super::*;
use crate::BufferedStream;

/// Fails every call with `kind`, after interrupting `interrupts` times.
struct Faulty {
    kind: io::ErrorKind,
    interrupts: usize,
}

impl Faulty {
    fn new(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            interrupts: 0,
        }
    }

    fn fail(&mut self) -> io::Error {
        if self.interrupts > 0 {
            self.interrupts -= 1;
            io::ErrorKind::Interrupted.into()
        } else {
            self.kind.into()
        }
    }
}

impl Read for Faulty {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(self.fail())
    }
}

impl Write for Faulty {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(self.fail())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(self.fail())
    }
}

/// Yields at most one byte per call, interrupting before every byte.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    interrupt_next: bool,
}

impl Trickle {
    fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            interrupt_next: true,
        }
    }
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.interrupt_next = true;

        match (self.data.get(self.pos), buf.first_mut()) {
            (Some(&byte), Some(slot)) => {
                *slot = byte;
                self.pos += 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len().min(1))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serves one chunk per read, then reports `WouldBlock` like a socket with nothing pending.
struct Pending {
    chunks: Vec<Vec<u8>>,
    reads: usize,
}

impl Pending {
    fn new(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().rev().map(|chunk| chunk.to_vec()).collect(),
            reads: 0,
        }
    }
}

impl Read for Pending {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let chunk = self.chunks.pop().ok_or(io::ErrorKind::WouldBlock)?;
        let count = chunk.len().min(buf.len());
        buf[..count].copy_from_slice(&chunk[..count]);
        Ok(count)
    }
}

impl Write for Pending {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_read_byte() {
    let mut stream = IoStream::new(Cursor::new(b"ab".to_vec()));

    assert_eq!(stream.read_byte(), Some(b'a'));
    assert_eq!(stream.read_byte(), Some(b'b'));
    assert_eq!(stream.read_byte(), None);
    assert!(stream.take_error().is_none());
}

#[test]
fn test_peek_byte() {
    let mut stream = IoStream::new(Cursor::new(b"xy".to_vec()));

    assert_eq!(stream.available(), 0);
    assert_eq!(stream.peek_byte(), Some(b'x'));
    assert_eq!(stream.peek_byte(), Some(b'x'));
    assert_eq!(stream.available(), 1);

    assert_eq!(stream.read_byte(), Some(b'x'));
    assert_eq!(stream.available(), 0);
    assert_eq!(stream.read_byte(), Some(b'y'));
    assert_eq!(stream.peek_byte(), None);
}

#[test]
fn test_read_bytes() {
    let mut stream = IoStream::new(Cursor::new(b"Hello, world".to_vec()));
    let mut buf = [0u8; 5];

    assert_eq!(stream.read_bytes(&mut buf), 5);
    assert_eq!(&buf, b"Hello");

    // The peeked byte comes back on its own
    assert_eq!(stream.peek_byte(), Some(b','));
    assert_eq!(stream.read_bytes(&mut buf), 1);
    assert_eq!(buf[0], b',');

    assert_eq!(stream.read_bytes(&mut buf), 5);
    assert_eq!(&buf, b" worl");

    // Short at EOF
    assert_eq!(stream.read_bytes(&mut buf), 1);
    assert_eq!(buf[0], b'd');
    assert_eq!(stream.read_bytes(&mut buf), 0);
    assert_eq!(stream.read_bytes(&mut []), 0);
}

#[test]
fn test_read_bytes_empty_keeps_peeked() {
    let mut stream = IoStream::new(Cursor::new(b"z".to_vec()));

    assert_eq!(stream.peek_byte(), Some(b'z'));
    assert_eq!(stream.read_bytes(&mut []), 0);
    assert_eq!(stream.read_byte(), Some(b'z'));
}

#[test]
fn test_read_retries_interrupted() {
    let mut stream = IoStream::new(Trickle::new(b"abc"));
    let mut buf = [0u8; 8];

    // One byte per read, each after an interrupt
    assert_eq!(stream.read_bytes(&mut buf), 1);
    assert_eq!(buf[0], b'a');
    assert_eq!(stream.read_byte(), Some(b'b'));
    assert_eq!(stream.read_bytes(&mut buf), 1);
    assert_eq!(buf[0], b'c');
    assert_eq!(stream.read_bytes(&mut buf), 0);
    assert!(stream.take_error().is_none());
}

#[test]
fn test_read_does_not_wait_for_full_buffer() {
    let mut io = IoStream::new(Pending::new(&[b"+OK\r\n".as_slice()]));
    let mut reader = BufferedStream::with_capacity(&mut io, 64);

    assert_eq!(reader.read_byte(), Some(b'+'));
    assert_eq!(reader.buffered(), b"OK\r\n");
    drop(reader);

    assert_eq!(io.get_ref().reads, 1);
    assert!(io.take_error().is_none());
}

#[test]
fn test_read_would_block_is_not_an_error() {
    let mut stream = IoStream::new(Pending::new(&[b"ab".as_slice()]));
    let mut buf = [0u8; 8];

    assert_eq!(stream.read_bytes(&mut buf), 2);
    assert_eq!(stream.read_bytes(&mut buf), 0);
    assert_eq!(stream.read_byte(), None);
    assert_eq!(stream.peek_byte(), None);
    assert!(stream.take_error().is_none());

    let mut stream = IoStream::new(Faulty::new(io::ErrorKind::TimedOut));
    assert_eq!(stream.read_byte(), None);
    assert!(stream.take_error().is_none());
}

#[test]
fn test_read_error_recorded() {
    let mut stream = IoStream::new(Faulty::new(io::ErrorKind::ConnectionReset));
    let mut buf = [0u8; 4];

    assert_eq!(stream.read_byte(), None);
    assert_eq!(stream.peek_byte(), None);
    assert_eq!(stream.read_bytes(&mut buf), 0);

    let error = stream.take_error().expect("an error was recorded");
    assert_eq!(error.kind(), io::ErrorKind::ConnectionReset);
    assert!(stream.take_error().is_none());
}

#[test]
fn test_write() {
    let mut stream = IoStream::new(Cursor::new(Vec::new()));

    assert_eq!(stream.write_byte(b'>'), 1);
    assert_eq!(stream.write_bytes(b" ping"), 5);
    assert_eq!(stream.write_bytes(&[]), 0);
    stream.flush();

    assert_eq!(stream.into_inner().into_inner(), b"> ping");
}

#[test]
fn test_write_partial_writes_complete() {
    let mut stream = IoStream::new(Trickle::new(b""));

    assert_eq!(stream.write_bytes(b"four"), 4);
    assert!(stream.take_error().is_none());
}

#[test]
fn test_write_error_recorded() {
    let mut faulty = Faulty::new(io::ErrorKind::BrokenPipe);
    faulty.interrupts = 2;
    let mut stream = IoStream::new(faulty);

    assert_eq!(stream.write_bytes(b"data"), 0);
    assert_eq!(
        stream.take_error().map(|e| e.kind()),
        Some(io::ErrorKind::BrokenPipe)
    );

    stream.flush();
    assert_eq!(
        stream.take_error().map(|e| e.kind()),
        Some(io::ErrorKind::BrokenPipe)
    );
}

#[test]
fn test_accessors() {
    let mut stream = IoStream::new(Cursor::new(b"abc".to_vec()));
    assert_eq!(stream.get_ref().position(), 0);

    stream.get_mut().set_position(2);
    assert_eq!(stream.read_byte(), Some(b'c'));
}

#[test]
fn test_under_buffered_stream() {
    let mut io = IoStream::new(Cursor::new(b"0123456789".to_vec()));
    let mut reader = BufferedStream::with_capacity(&mut io, 4);
    let mut buf = [0u8; 3];

    assert_eq!(reader.read_byte(), Some(b'0'));
    assert_eq!(reader.buffered(), b"123");

    assert_eq!(reader.read_bytes(&mut buf), 3);
    assert_eq!(&buf, b"123");

    let mut rest = [0u8; 8];
    assert_eq!(reader.read_bytes(&mut rest), 6);
    assert_eq!(&rest[..6], b"456789");
    assert_eq!(reader.read_byte(), None);
}
