// src/duplex.rs
//! A reader and a writer travelling together.
//!
//! [`Duplex`] owns one buffered reader and one buffered writer and forwards
//! each call to the matching half. The halves share nothing; this only
//! exists so a single value can be passed where both contracts are needed.

use crate::error::{Partial, Result};
use crate::reader::Reader;
use crate::writer::Writer;

/// Anything that is both a [`Reader`] and a [`Writer`].
pub trait ReadWriter: Reader + Writer {}

impl<T: Reader + Writer + ?Sized> ReadWriter for T {}

/// Owned pair of a reader and a writer.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
/// use std::io::Cursor;
///
/// let reader = FixedReader::new(Cursor::new(b"PING\r\n"), [0u8; 64]);
/// let writer = FixedWriter::new(Vec::<u8>::new(), [0u8; 64]);
/// let mut conn = Duplex::new(reader, writer);
///
/// let line = peek_to(&mut conn, b'\n', 0)?.len();
/// conn.consume(line)?;
/// write_string(&mut conn, "PONG\r\n")?;
/// conn.flush()?;
///
/// assert_eq!(conn.writer().get_ref(), b"PONG\r\n");
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct Duplex<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Duplex<R, W> {
    /// Pairs `reader` and `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Gets a reference to the reader half.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the reader half.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Gets a reference to the writer half.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the writer half.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Splits the pair back into its halves.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Reader, W> Reader for Duplex<R, W> {
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        self.reader.read(dst)
    }

    #[inline]
    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>> {
        self.reader.peek(n)
    }

    #[inline]
    fn consume(&mut self, n: usize) -> Result<()> {
        self.reader.consume(n)
    }
}

impl<R, W: Writer> Writer for Duplex<R, W> {
    #[inline]
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>> {
        self.writer.write(src)
    }

    #[inline]
    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>> {
        self.writer.reserve(n)
    }

    #[inline]
    fn commit(&mut self, n: usize) -> Result<()> {
        self.writer.commit(n)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
