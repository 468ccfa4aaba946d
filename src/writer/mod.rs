// src/writer/mod.rs
//! Buffered writers with reserve/commit access

pub mod fixed;
pub mod sized;

pub use fixed::FixedWriter;
pub use sized::{SIZED_MIN_CAPACITY, SizedWriter};

use crate::error::{Error, Partial, Result};
use crate::io::{Sink, Transfer};

/// A byte sink that hands out scratch space to write into before committing it.
pub trait Writer {
    /// Writes `src`, buffering it or passing it straight to the sink.
    ///
    /// On failure the [`Partial`] carries how many bytes of `src` were
    /// accepted (buffered or sent) before the failure.
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>>;

    /// Returns at least `n` bytes of scratch space, flushing buffered data
    /// first if that is needed to make room.
    ///
    /// The space borrows the writer and is therefore gone by the next call.
    /// When fewer than `n` bytes can be returned, the available space comes
    /// back in a [`Partial`] together with the reason.
    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>>;

    /// Commits the first `n` bytes of the scratch space returned by the last
    /// `reserve`.
    ///
    /// Fails with [`Error::InvalidCommitSize`] if `n` exceeds the free space.
    fn commit(&mut self, n: usize) -> Result<()>;

    /// Sends all buffered data to the sink.
    fn flush(&mut self) -> Result<()>;
}

impl<W: Writer + ?Sized> Writer for &mut W {
    #[inline]
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>> {
        (**self).write(src)
    }

    #[inline]
    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>> {
        (**self).reserve(n)
    }

    #[inline]
    fn commit(&mut self, n: usize) -> Result<()> {
        (**self).commit(n)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<W: Writer + ?Sized> Writer for Box<W> {
    #[inline]
    fn write(&mut self, src: &[u8]) -> std::result::Result<usize, Partial<usize>> {
        (**self).write(src)
    }

    #[inline]
    fn reserve(&mut self, n: usize) -> std::result::Result<&mut [u8], Partial<&mut [u8]>> {
        (**self).reserve(n)
    }

    #[inline]
    fn commit(&mut self, n: usize) -> Result<()> {
        (**self).commit(n)
    }

    #[inline]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Sends all of `src` to `sink`, retrying partial drains.
///
/// Stops at the first stop reason the sink reports, or with
/// [`Error::ShortWrite`] when a drain moves nothing and gives no reason.
/// The [`Partial`] carries how many bytes were sent before stopping.
pub(crate) fn drain_all<K>(sink: &mut K, src: &[u8]) -> std::result::Result<usize, Partial<usize>>
where
    K: Sink + ?Sized,
{
    let mut sent = 0;
    while sent < src.len() {
        let Transfer { len, stop } = sink.drain(&src[sent..]);
        sent += len.min(src.len() - sent);
        match stop {
            Some(error) => return Err(Partial::new(sent, error)),
            None if len == 0 => return Err(Partial::new(sent, Error::ShortWrite)),
            None => {}
        }
    }
    Ok(sent)
}
