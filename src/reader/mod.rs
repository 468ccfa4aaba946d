// src/reader/mod.rs
//! Buffered readers with peek/consume access

pub mod fixed;
pub mod growing;

pub use fixed::FixedReader;
pub use growing::GrowingReader;

use crate::error::{Error, Partial, Result};
use crate::io::{Source, Transfer};

/// Maximum consecutive empty source reads before giving up with
/// [`Error::NoProgress`].
pub const MAX_EMPTY_READS: usize = 10;

/// A byte stream whose upcoming bytes can be inspected before they are consumed.
pub trait Reader {
    /// Reads up to `dst.len()` bytes into `dst`.
    fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

    /// Returns at least `n` unread bytes without consuming them, reading more
    /// data first if necessary.
    ///
    /// The view borrows the reader and is therefore gone by the next call.
    /// When fewer than `n` bytes can be returned, the available bytes come
    /// back in a [`Partial`] together with the reason.
    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>>;

    /// Drops the first `n` unread bytes.
    ///
    /// Fails with [`Error::InvalidConsumeSize`] if fewer than `n` bytes are
    /// buffered; nothing is consumed in that case.
    fn consume(&mut self, n: usize) -> Result<()>;
}

impl<R: Reader + ?Sized> Reader for &mut R {
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        (**self).read(dst)
    }

    #[inline]
    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>> {
        (**self).peek(n)
    }

    #[inline]
    fn consume(&mut self, n: usize) -> Result<()> {
        (**self).consume(n)
    }
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    #[inline]
    fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        (**self).read(dst)
    }

    #[inline]
    fn peek(&mut self, n: usize) -> std::result::Result<&[u8], Partial<&[u8]>> {
        (**self).peek(n)
    }

    #[inline]
    fn consume(&mut self, n: usize) -> Result<()> {
        (**self).consume(n)
    }
}

/// Reads from `src` into `dst`, tolerating up to [`MAX_EMPTY_READS`] empty
/// answers.
///
/// The last stop reason reported by the source is remembered in `failure`
/// and replayed on later calls without touching the source again. A source
/// that delivers bytes together with a stop reason gets its bytes accepted
/// now and the reason replayed next time.
pub(crate) fn read_source<S>(src: &mut S, failure: &mut Option<Error>, dst: &mut [u8]) -> Result<usize>
where
    S: Source + ?Sized,
{
    if let Some(err) = failure {
        return Err(err.clone());
    }

    for _ in 0..MAX_EMPTY_READS {
        let Transfer { len, stop } = src.fill(dst);
        if len > 0 {
            *failure = stop;
            return Ok(len);
        }
        if let Some(err) = stop {
            *failure = Some(err.clone());
            return Err(err);
        }
    }

    tracing::debug!(attempts = MAX_EMPTY_READS, "source made no progress");
    *failure = Some(Error::NoProgress);
    Err(Error::NoProgress)
}

/// Returns the pending view, paired with `outcome`'s error if there is one.
#[inline]
pub(crate) fn settle(view: &[u8], outcome: Result<()>) -> std::result::Result<&[u8], Partial<&[u8]>> {
    match outcome {
        Ok(()) => Ok(view),
        Err(error) => Err(Partial::new(view, error)),
    }
}
