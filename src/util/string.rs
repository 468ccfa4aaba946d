// src/util/string.rs
//! Copying text into a writer through its reservation window

use crate::error::{Error, Partial};
use crate::writer::Writer;

/// Writes `s` into `writer` by reserving space, copying and committing,
/// as many rounds as it takes.
///
/// Returns the number of bytes written. When a round cannot place any
/// byte, the bytes written so far come back in a [`Partial`] with the
/// writer's condition, or [`Error::ShortReserve`] if it gave none.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
///
/// let mut writer = FixedWriter::new(Vec::<u8>::new(), [0u8; 4]);
/// assert_eq!(write_string(&mut writer, "hello, world"), Ok(12));
/// writer.flush()?;
/// assert_eq!(writer.get_ref(), b"hello, world");
/// # Ok::<(), peekio::Error>(())
/// ```
pub fn write_string<W>(writer: &mut W, s: &str) -> std::result::Result<usize, Partial<usize>>
where
    W: Writer + ?Sized,
{
    let src = s.as_bytes();
    let mut written = 0;

    while written < src.len() {
        let rest = &src[written..];
        let (copied, stop) = match writer.reserve(rest.len()) {
            Ok(window) => (copy_prefix(window, rest), None),
            Err(Partial { value, error }) => (copy_prefix(value, rest), Some(error)),
        };

        if copied == 0 {
            return Err(Partial::new(written, stop.unwrap_or(Error::ShortReserve)));
        }

        writer
            .commit(copied)
            .map_err(|error| Partial::new(written, error))?;
        written += copied;
    }

    Ok(written)
}

#[inline]
fn copy_prefix(window: &mut [u8], src: &[u8]) -> usize {
    let n = window.len().min(src.len());
    window[..n].copy_from_slice(&src[..n]);
    n
}
