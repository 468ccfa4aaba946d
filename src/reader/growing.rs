// src/reader/growing.rs
//! Buffered reader whose region grows to fit each peek
//!
//! Capacity starts at zero, jumps to [`GROWING_MIN_CAPACITY`] on the first
//! fill and doubles whenever a peek asks for more than the region holds.
//! It never shrinks by itself; call [`GrowingReader::shrink`] after a large
//! peek to give the memory back.
//!
//! A peek the allocator cannot satisfy fails with
//! [`Error::CapacityExceeded`], the same as one whose size cannot be
//! represented, and leaves the pending bytes in place.

use super::{Reader, read_source, settle};
use crate::error::{Error, Partial, Result};
use crate::io::Source;
use crate::region::Region;

/// Smallest region a [`GrowingReader`] allocates.
pub const GROWING_MIN_CAPACITY: usize = 4096;

/// Largest region the allocator can hand out.
const MAX_CAPACITY: usize = isize::MAX as usize;

/// A buffered reader that resizes its region on demand.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
/// use std::io::Cursor;
///
/// let data = vec![7u8; 10_000];
/// let mut reader = GrowingReader::new(Cursor::new(data));
///
/// assert_eq!(reader.peek(10_000)?.len(), 10_000);
/// assert_eq!(reader.capacity(), 16_384);
///
/// reader.discard(9_000)?;
/// reader.shrink();
/// assert_eq!(reader.capacity(), 4096);
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct GrowingReader<S> {
    src: S,
    failure: Option<Error>,
    region: Region<Vec<u8>>,
}

/// Returns the smallest `max(current, GROWING_MIN_CAPACITY) * 2^k` holding `n` bytes.
fn grown_capacity(current: usize, n: usize) -> Result<usize> {
    let mut capacity = current.max(GROWING_MIN_CAPACITY);
    while capacity < n {
        capacity = capacity
            .checked_mul(2)
            .filter(|&doubled| doubled <= MAX_CAPACITY)
            .ok_or(Error::CapacityExceeded)?;
    }
    Ok(capacity)
}

impl<S: Source> GrowingReader<S> {
    /// Wraps `src`. No memory is allocated until the first fill.
    pub fn new(src: S) -> Self {
        Self {
            src,
            failure: None,
            region: Region::new(Vec::new()),
        }
    }

    /// Returns the current capacity of the internal region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Returns the buffered bytes without filling.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        self.region.pending()
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.src
    }

    /// Gets a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.src
    }

    /// Consumes the reader, returning the underlying source.
    ///
    /// Buffered bytes are lost.
    pub fn into_inner(self) -> S {
        self.src
    }

    /// Drops the first `n` unread bytes.
    ///
    /// Same contract as [`Reader::consume`].
    #[inline]
    pub fn discard(&mut self, n: usize) -> Result<()> {
        self.region.consume(n)
    }

    /// Reallocates the region down to the smallest size that holds the
    /// pending bytes, but never below [`GROWING_MIN_CAPACITY`].
    ///
    /// Does nothing if the region is already that size or smaller.
    pub fn shrink(&mut self) {
        let current = self.region.capacity();
        let ideal = grown_capacity(0, self.region.len()).unwrap_or(current);
        if ideal < current {
            tracing::debug!(from = current, to = ideal, "shrinking read buffer");
            if let Err(error) = self.region.reallocate(ideal) {
                tracing::debug!(%error, "keeping read buffer");
            }
        }
    }

    /// Ensures at least `n` bytes are pending, growing the region if needed.
    fn fill(&mut self, n: usize) -> Result<()> {
        if self.region.len() >= n {
            return Ok(());
        }

        let current = self.region.capacity();
        if n > current {
            let capacity = grown_capacity(current, n)?;
            tracing::debug!(from = current, to = capacity, "growing read buffer");
            self.region.reallocate(capacity)?;
        }

        self.region.make_room(n);
        while self.region.len() < n {
            let got = read_source(&mut self.src, &mut self.failure, self.region.free_mut())?;
            self.region.advance_write(got);
        }

        Ok(())
    }
}

impl<S: Source> Reader for GrowingReader<S> {
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }

        if self.region.is_empty() {
            if dst.len() >= self.region.capacity().max(GROWING_MIN_CAPACITY) {
                tracing::trace!(len = dst.len(), "bypassing read buffer");
                return read_source(&mut self.src, &mut self.failure, dst);
            }
            self.fill(1)?;
        }

        Ok(self.region.copy_to(dst))
    }

    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>> {
        let outcome = self.fill(n);
        settle(self.region.pending(), outcome)
    }

    fn consume(&mut self, n: usize) -> Result<()> {
        self.discard(n)
    }
}
