// src/writer/sized.rs
//! Buffered writer owning its region, recovering from partial flushes

use super::{Writer, drain_all};
use crate::error::{Error, Partial, Result};
use crate::io::Sink;
use crate::region::Region;

/// Smallest region a [`SizedWriter`] allocates, whatever size is requested.
pub const SIZED_MIN_CAPACITY: usize = 16;

/// A buffered writer that keeps unsent bytes after a failed flush.
///
/// When the sink takes only part of the buffered data, the bytes it did
/// take are dropped and the unsent tail moves to the front of the region.
/// The failure is reported but not remembered, so a later
/// [`flush`](Writer::flush) retries exactly the bytes that did not go out.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
///
/// let mut writer = SizedWriter::new(Vec::<u8>::new(), 4);
/// assert_eq!(writer.capacity(), 16);
///
/// writer.write(b"ping\n").map_err(peekio::Error::from)?;
/// writer.flush()?;
/// assert_eq!(writer.get_ref(), b"ping\n");
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct SizedWriter<K> {
    sink: K,
    region: Region<Vec<u8>>,
}

impl<K: Sink> SizedWriter<K> {
    /// Wraps `sink` with a region of `size` bytes, but at least
    /// [`SIZED_MIN_CAPACITY`].
    pub fn new(sink: K, size: usize) -> Self {
        Self {
            sink,
            region: Region::with_capacity(size.max(SIZED_MIN_CAPACITY)),
        }
    }

    /// Returns the capacity of the internal region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Returns the buffered, not yet flushed bytes.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        self.region.pending()
    }

    /// Returns the free space left in the region.
    #[inline]
    pub fn available(&self) -> usize {
        self.region.free_len()
    }

    /// Gets a reference to the underlying sink.
    pub fn get_ref(&self) -> &K {
        &self.sink
    }

    /// Gets a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Consumes the writer, returning the underlying sink.
    ///
    /// Buffered bytes are lost; flush first.
    pub fn into_inner(self) -> K {
        self.sink
    }
}

impl<K: Sink> Writer for SizedWriter<K> {
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>> {
        let mut n = 0;
        if !self.region.is_empty() {
            n = self.region.append(src);
            if self.region.is_full() {
                self.flush().map_err(|error| Partial::new(n, error))?;
            }
        }

        if n == src.len() {
            return Ok(n);
        }

        let rest = &src[n..];
        if rest.len() < self.region.capacity() {
            return Ok(n + self.region.append(rest));
        }

        tracing::trace!(len = rest.len(), "bypassing write buffer");
        drain_all(&mut self.sink, rest)
            .map(|sent| n + sent)
            .map_err(|partial| partial.map(|sent| n + sent))
    }

    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>> {
        if n > self.region.free_len() && !self.region.is_empty() {
            if let Err(error) = self.flush() {
                // Whatever the partial flush freed up is still usable.
                return Err(Partial::new(self.region.free_mut(), error));
            }
        }

        let too_small = n > self.region.capacity();
        let free = self.region.free_mut();
        if too_small {
            Err(Partial::new(free, Error::BufferTooSmall))
        } else {
            Ok(free)
        }
    }

    fn commit(&mut self, n: usize) -> Result<()> {
        if n > self.region.free_len() {
            return Err(Error::InvalidCommitSize);
        }
        self.region.advance_write(n);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.region.is_empty() {
            return Ok(());
        }

        match drain_all(&mut self.sink, self.region.pending()) {
            Ok(_) => {
                self.region.reset();
                Ok(())
            }
            Err(Partial { value: sent, error }) => {
                if sent > 0 {
                    tracing::debug!(
                        sent,
                        remaining = self.region.len() - sent,
                        "partial flush, keeping unsent tail"
                    );
                    self.region.shift_out(sent);
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Capture, Failing};
    use super::*;

    #[test]
    fn test_minimum_capacity() {
        assert_eq!(SizedWriter::new(Capture::default(), 0).capacity(), 16);
        assert_eq!(SizedWriter::new(Capture::default(), 15).capacity(), 16);
        assert_eq!(SizedWriter::new(Capture::default(), 100).capacity(), 100);
    }

    #[test]
    fn test_partial_flush_keeps_tail() {
        let sink = Capture {
            allowance: Some(3),
            ..Capture::default()
        };
        let mut writer = SizedWriter::new(sink, 16);
        writer.write(b"0123456789").unwrap();

        assert_eq!(writer.flush(), Err(Error::ShortWrite));
        assert_eq!(writer.get_ref().data, b"012");
        assert_eq!(writer.buffered(), b"3456789");

        writer.get_mut().allowance = None;
        writer.flush().unwrap();
        assert_eq!(writer.get_ref().data, b"0123456789");
        assert!(writer.buffered().is_empty());
    }

    #[test]
    fn test_failure_is_not_sticky() {
        let sink = Failing {
            accept: 4,
            error: std::io::Error::from(std::io::ErrorKind::TimedOut).into(),
            calls: 0,
        };
        let mut writer = SizedWriter::new(sink, 16);
        writer.write(b"abcdefgh").unwrap();

        assert!(writer.flush().is_err());
        assert_eq!(writer.buffered(), b"efgh");

        // Still accepts data and still asks the sink again.
        assert_eq!(writer.write(b"ij"), Ok(2));
        assert_eq!(writer.buffered(), b"efghij");
        assert!(writer.flush().is_err());
        assert_eq!(writer.get_ref().calls, 2);
    }

    #[test]
    fn test_flush_empty_is_noop() {
        let mut writer = SizedWriter::new(Capture::default(), 32);
        writer.flush().unwrap();
        assert_eq!(writer.get_ref().calls, 0);
    }

    #[test]
    fn test_reserve_after_partial_flush_offers_freed_space() {
        let sink = Capture {
            allowance: Some(10),
            ..Capture::default()
        };
        let mut writer = SizedWriter::new(sink, 16);
        writer.write(b"0123456789abcd").unwrap();

        let partial = writer.reserve(8).unwrap_err();
        assert_eq!(partial.error, Error::ShortWrite);
        assert_eq!(partial.value.len(), 12);
        assert_eq!(writer.buffered(), b"abcd");
    }

    #[test]
    fn test_commit_validates_size() {
        let mut writer = SizedWriter::new(Capture::default(), 16);
        writer.write(b"0123456789").unwrap();
        assert_eq!(writer.commit(7), Err(Error::InvalidCommitSize));
        writer.commit(6).unwrap();
        assert_eq!(writer.available(), 0);
    }

    #[test]
    fn test_large_write_bypasses_region() {
        let mut writer = SizedWriter::new(Capture::default(), 16);
        let payload = vec![b'z'; 64];
        assert_eq!(writer.write(&payload), Ok(64));
        assert_eq!(writer.get_ref().data, payload);
        assert_eq!(writer.get_ref().calls, 1);
    }
}
