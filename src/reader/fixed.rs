// src/reader/fixed.rs
//! Buffered reader over a caller-supplied, fixed-capacity region

use super::{Reader, read_source, settle};
use crate::error::{Error, Partial, Result};
use crate::io::Source;
use crate::region::Region;

/// A buffered reader whose region never changes size.
///
/// Peeks larger than the region return everything the region can hold,
/// paired with [`Error::BufferTooSmall`]. Once the source reports end of
/// data or a failure, that condition is replayed on every later fill
/// without asking the source again.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
/// use std::io::Cursor;
///
/// let mut reader = FixedReader::new(Cursor::new(b"GET / HTTP/1.1\r\n"), [0u8; 64]);
/// assert_eq!(reader.peek(3)?.get(..3), Some(&b"GET"[..]));
/// reader.consume(4)?;
/// assert_eq!(reader.peek(1)?[0], b'/');
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct FixedReader<S, B = Vec<u8>>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    src: S,
    failure: Option<Error>,
    region: Region<B>,
}

impl<S, B> FixedReader<S, B>
where
    S: Source,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wraps `src`, using `buf` as the internal region.
    pub fn new(src: S, buf: B) -> Self {
        Self {
            src,
            failure: None,
            region: Region::new(buf),
        }
    }

    /// Returns the capacity of the internal region.
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
    ///
    /// Reading from it directly skips the buffered bytes.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.src
    }

    /// Consumes the reader, returning the underlying source.
    ///
    /// Buffered bytes are lost.
    pub fn into_inner(self) -> S {
        self.src
    }

    /// Ensures at least `n` bytes are pending, capped at the capacity.
    fn fill(&mut self, n: usize) -> Result<()> {
        let capacity = self.region.capacity();
        let (n, capped) = if n > capacity {
            (capacity, Err(Error::BufferTooSmall))
        } else {
            (n, Ok(()))
        };

        if self.region.len() >= n {
            return capped;
        }

        self.region.make_room(n);
        while self.region.len() < n {
            let got = read_source(&mut self.src, &mut self.failure, self.region.free_mut())?;
            self.region.advance_write(got);
        }

        capped
    }
}

impl<S, B> Reader for FixedReader<S, B>
where
    S: Source,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }

        if self.region.is_empty() {
            // Large reads go straight to the source; copying through the
            // region would gain nothing.
            if dst.len() >= self.region.capacity() {
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
        self.region.consume(n)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Scripted, Zeros};
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_peek_within_capacity() {
        for capacity in [1usize, 7, 64, 4096] {
            let mut reader = FixedReader::new(Zeros, vec![0u8; capacity]);
            for n in [0, 1, capacity / 2, capacity] {
                let view = reader.peek(n).unwrap();
                assert!(view.len() >= n);
            }
        }
    }

    #[test]
    fn test_peek_beyond_capacity_is_partial() {
        let mut reader = FixedReader::new(Zeros, [0u8; 16]);
        let Partial { value, error } = reader.peek(17).unwrap_err();
        assert_eq!(value.len(), 16);
        assert_eq!(error, Error::BufferTooSmall);
    }

    #[test]
    fn test_peek_beyond_capacity_reports_when_already_full() {
        let mut reader = FixedReader::new(Zeros, [0u8; 8]);
        reader.peek(8).unwrap();
        let partial = reader.peek(100).unwrap_err();
        assert_eq!(partial.value.len(), 8);
        assert_eq!(partial.error, Error::BufferTooSmall);
    }

    #[test]
    fn test_peek_short_source_reports_eof() {
        let mut reader = FixedReader::new(Cursor::new(b"abc"), [0u8; 16]);
        let partial = reader.peek(5).unwrap_err();
        assert_eq!(partial.value, b"abc");
        assert_eq!(partial.error, Error::Eof);
    }

    #[test]
    fn test_peek_accumulates_across_source_reads() {
        let src = Scripted::new(vec![(&b"ab"[..], None), (&b"cd"[..], None), (&b"ef"[..], None)]);
        let mut reader = FixedReader::new(src, [0u8; 8]);

        assert_eq!(reader.peek(5).unwrap(), b"abcdef");
        assert_eq!(reader.get_ref().calls, 3);
    }

    #[test]
    fn test_fill_slides_pending_bytes() {
        let src = Scripted::new(vec![
            (&b"abcdef"[..], None),
            (&b"gh"[..], None),
            (&b"ij"[..], None),
        ]);
        let mut reader = FixedReader::new(src, [0u8; 8]);

        reader.peek(6).unwrap();
        reader.consume(4).unwrap();

        // Four slots after the read cursor are enough for four bytes.
        reader.peek(4).unwrap();
        assert_eq!(reader.region.read_pos(), 4);

        assert_eq!(reader.peek(5).unwrap(), b"efghij");
        assert_eq!(reader.region.read_pos(), 0);
    }

    #[test]
    fn test_consume_validates_size() {
        let mut reader = FixedReader::new(Cursor::new(b"abc"), [0u8; 8]);
        reader.peek(3).unwrap();

        assert_eq!(reader.consume(4), Err(Error::InvalidConsumeSize));
        assert_eq!(reader.buffered(), b"abc");

        reader.consume(0).unwrap();
        reader.consume(3).unwrap();
        assert!(reader.buffered().is_empty());
    }

    #[test]
    fn test_small_read_goes_through_region() {
        let mut reader = FixedReader::new(Cursor::new(b"hello world"), [0u8; 8]);
        let mut dst = [0u8; 5];

        assert_eq!(reader.read(&mut dst), Ok(5));
        assert_eq!(&dst, b"hello");
        assert_eq!(reader.buffered(), b" wo");
    }

    #[test]
    fn test_large_read_bypasses_region() {
        let mut reader = FixedReader::new(Cursor::new(b"hello world"), [0u8; 4]);
        let mut dst = [0u8; 16];

        assert_eq!(reader.read(&mut dst), Ok(11));
        assert_eq!(&dst[..11], b"hello world");
        assert!(reader.buffered().is_empty());
        assert_eq!(reader.read(&mut dst), Err(Error::Eof));
    }

    #[test]
    fn test_read_drains_buffer_before_source() {
        let mut reader = FixedReader::new(Cursor::new(b"abcdef"), [0u8; 4]);
        reader.peek(2).unwrap();

        let mut dst = [0u8; 16];
        assert_eq!(reader.read(&mut dst), Ok(4));
        assert_eq!(&dst[..4], b"abcd");
    }

    #[test]
    fn test_terminal_condition_is_replayed() {
        let err = Error::from(std::io::Error::other("disk gone"));
        let src = Scripted::new(vec![(&b"ab"[..], None), (&b""[..], Some(err.clone()))]);
        let mut reader = FixedReader::new(src, [0u8; 8]);

        let partial = reader.peek(4).unwrap_err();
        assert_eq!(partial.value, b"ab");
        assert_eq!(partial.error, err);

        reader.consume(2).unwrap();
        let mut dst = [0u8; 2];
        assert_eq!(reader.read(&mut dst), Err(err));
        assert_eq!(reader.get_ref().calls, 2);
    }

    #[test]
    fn test_no_progress_source() {
        let src = Scripted::new(vec![(&b""[..], None); 20]);
        let mut reader = FixedReader::new(src, [0u8; 8]);

        let partial = reader.peek(1).unwrap_err();
        assert!(partial.value.is_empty());
        assert_eq!(partial.error, Error::NoProgress);
    }

    #[test]
    fn test_borrowed_region() {
        let mut storage = [0u8; 32];
        let mut reader = FixedReader::new(Cursor::new(b"line\n"), &mut storage[..]);
        assert_eq!(reader.peek(5).unwrap(), b"line\n");
    }
}
