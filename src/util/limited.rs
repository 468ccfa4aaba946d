// src/util/limited.rs
//! Byte budget over another reader

use crate::error::{Error, Partial, Result};
use crate::reader::Reader;

/// A reader that yields at most a fixed number of bytes from `inner`, then
/// reports end of data.
///
/// Only `read` and `consume` spend the budget. `peek` never shows more
/// than what is left of it, and reports [`Error::Eof`] when asked for more.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
/// use std::io::Cursor;
///
/// let inner = FixedReader::new(Cursor::new(b"0123456789"), [0u8; 16]);
/// let mut body = LimitedReader::new(inner, 5);
///
/// let mut buf = [0u8; 8];
/// assert_eq!(body.read(&mut buf)?, 5);
/// assert_eq!(body.read(&mut buf), Err(peekio::Error::Eof));
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct LimitedReader<R> {
    inner: R,
    remaining: u64,
}

impl<R: Reader> LimitedReader<R> {
    /// Limits `inner` to `limit` more bytes.
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }

    /// Returns how many bytes may still be read.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Gets a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gets a mutable reference to the wrapped reader.
    ///
    /// Bytes read through it are not charged to the budget.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the limiter, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// The budget as an in-memory length.
    #[inline]
    fn budget(&self) -> usize {
        usize::try_from(self.remaining).unwrap_or(usize::MAX)
    }

    #[inline]
    fn spend(&mut self, n: usize) {
        self.remaining -= n as u64;
    }
}

impl<R: Reader> Reader for LimitedReader<R> {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        let budget = self.budget();
        if budget == 0 {
            return Err(Error::Eof);
        }

        let len = dst.len().min(budget);
        let n = self.inner.read(&mut dst[..len])?;
        self.spend(n);
        Ok(n)
    }

    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>> {
        let budget = self.budget();
        let cap = |view: &[u8]| view.len().min(budget);

        if n <= budget {
            return match self.inner.peek(n) {
                Ok(view) => Ok(&view[..cap(view)]),
                Err(Partial { value, error }) => Err(Partial::new(&value[..cap(value)], error)),
            };
        }

        match self.inner.peek(budget) {
            Ok(view) => Err(Partial::new(&view[..cap(view)], Error::Eof)),
            Err(Partial { value, error }) => Err(Partial::new(&value[..cap(value)], error)),
        }
    }

    fn consume(&mut self, n: usize) -> Result<()> {
        if n > self.budget() {
            return Err(Error::InvalidConsumeSize);
        }
        self.inner.consume(n)?;
        self.spend(n);
        Ok(())
    }
}
