// src/util/delim.rs
//! Delimiter search over a peekable reader

use crate::error::{Error, Partial, Result};
use crate::reader::Reader;

/// Finds the first `delim` at or after `offset` in the reader's unread
/// bytes and returns everything up to and including it, without consuming.
///
/// `offset` is the number of leading unread bytes already known not to
/// contain `delim`. The reader is asked for one more byte than has been
/// scanned each round, so growth is left entirely to the reader.
///
/// Errors:
/// - [`Error::UnexpectedEof`] when the stream ends after the scan had made
///   progress: the caller passed a non-zero `offset`, or the final peek
///   still revealed bytes that had not been scanned;
/// - [`Error::Eof`] when the stream ends otherwise;
/// - the reader's own condition in every other case, including its
///   capacity condition when the token does not fit in its region.
///
/// # Examples
///
/// ```
/// use peekio::prelude::*;
/// use std::io::Cursor;
///
/// let mut reader = FixedReader::new(Cursor::new(b"abc\ndef"), [0u8; 16]);
/// assert_eq!(peek_to(&mut reader, b'\n', 0)?, b"abc\n");
///
/// reader.consume(4)?;
/// assert_eq!(peek_to(&mut reader, b'\n', 0), Err(peekio::Error::Eof));
/// # Ok::<(), peekio::Error>(())
/// ```
pub fn peek_to<R>(reader: &mut R, delim: u8, offset: usize) -> Result<&[u8]>
where
    R: Reader + ?Sized,
{
    let resumed = offset > 0;
    let mut offset = offset;
    loop {
        let (found, len, stop) = match reader.peek(offset.saturating_add(1)) {
            Ok(view) => (scan(view, delim, offset), view.len(), None),
            Err(Partial { value, error }) => (scan(value, delim, offset), value.len(), Some(error)),
        };

        if let Some(end) = found {
            // The bytes are already buffered, so this peek cannot block.
            let view = reader.peek(end).map_err(Error::from)?;
            return view.get(..end).ok_or(Error::ShortPeek);
        }

        match stop {
            Some(Error::Eof) if len > 0 && (resumed || len > offset) => {
                return Err(Error::UnexpectedEof);
            }
            Some(error) => return Err(error),
            None if len <= offset => return Err(Error::ShortPeek),
            None => offset = len,
        }
    }
}

/// Returns the end (exclusive) of the first `delim` at or after `offset`.
#[inline]
fn scan(view: &[u8], delim: u8, offset: usize) -> Option<usize> {
    let start = offset.min(view.len());
    memchr::memchr(delim, &view[start..]).map(|i| start + i + 1)
}
