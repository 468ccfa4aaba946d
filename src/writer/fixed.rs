// src/writer/fixed.rs
//! Buffered writer over a caller-supplied, fixed-capacity region

use super::{Writer, drain_all};
use crate::error::{Error, Partial, Result};
use crate::io::Sink;
use crate::region::Region;

/// A buffered writer whose region never changes size.
///
/// The first failure reported by the sink (or synthesized as
/// [`Error::ShortWrite`]) is sticky: every later `write`, `reserve`,
/// `commit` and `flush` returns it without touching the sink again.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
///
/// let mut writer = FixedWriter::new(Vec::<u8>::new(), [0u8; 32]);
///
/// let scratch = writer.reserve(5)?;
/// scratch[..5].copy_from_slice(b"hello");
/// writer.commit(5)?;
/// writer.flush()?;
///
/// assert_eq!(writer.get_ref(), b"hello");
/// # Ok::<(), peekio::Error>(())
/// ```
pub struct FixedWriter<K, B = Vec<u8>>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    sink: K,
    failure: Option<Error>,
    region: Region<B>,
}

impl<K, B> FixedWriter<K, B>
where
    K: Sink,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wraps `sink`, using `buf` as the internal region.
    pub fn new(sink: K, buf: B) -> Self {
        Self {
            sink,
            failure: None,
            region: Region::new(buf),
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

    /// Returns the sticky failure, if the writer has failed.
    #[inline]
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Gets a reference to the underlying sink.
    pub fn get_ref(&self) -> &K {
        &self.sink
    }

    /// Gets a mutable reference to the underlying sink.
    ///
    /// Writing to it directly bypasses the buffered bytes.
    pub fn get_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Consumes the writer, returning the underlying sink.
    ///
    /// Buffered bytes are lost; flush first.
    pub fn into_inner(self) -> K {
        self.sink
    }

    #[inline]
    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Records `error` as sticky and hands it back.
    fn fail(&mut self, error: Error) -> Error {
        tracing::debug!(%error, "buffered writer failed");
        self.failure = Some(error.clone());
        error
    }
}

impl<K, B> Writer for FixedWriter<K, B>
where
    K: Sink,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>> {
        self.check().map_err(|error| Partial::new(0, error))?;

        // Top up data that is already buffered.
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
        match drain_all(&mut self.sink, rest) {
            Ok(sent) => Ok(n + sent),
            Err(Partial { value, error }) => Err(Partial::new(n + value, self.fail(error))),
        }
    }

    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>> {
        if let Err(error) = self.check() {
            return Err(Partial::new(Default::default(), error));
        }

        if n > self.region.free_len() && !self.region.is_empty() {
            if let Err(error) = self.flush() {
                return Err(Partial::new(Default::default(), error));
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
        self.check()?;
        if n > self.region.free_len() {
            return Err(Error::InvalidCommitSize);
        }
        self.region.advance_write(n);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.check()?;
        if self.region.is_empty() {
            return Ok(());
        }

        match drain_all(&mut self.sink, self.region.pending()) {
            Ok(_) => {
                self.region.reset();
                Ok(())
            }
            Err(partial) => Err(self.fail(partial.error)),
        }
    }
}
