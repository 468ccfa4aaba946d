// src/io.rs
//! Underlying byte source and sink capabilities.
//!
//! A [`Source`] attempts to fill a byte range, a [`Sink`] attempts to drain
//! one. Both report a [`Transfer`]: how many bytes moved and, optionally, why
//! the attempt stopped. Zero bytes with no stop reason is a valid transient
//! answer; the buffered types decide how often to tolerate it.
//!
//! Every [`std::io::Read`] is a `Source` and every [`std::io::Write`] is a
//! `Sink`, so files, sockets, `Cursor`s and `Vec<u8>` plug in directly.
//! `ErrorKind::Interrupted` is retried inside those impls. Every other
//! error, `WouldBlock` included, is reported as a stop reason.

use crate::error::Error;
use std::io;

/// Outcome of a single source fill or sink drain attempt.
#[derive(Debug)]
pub struct Transfer {
    /// Bytes moved by this attempt
    pub len: usize,
    /// `Some(Error::Eof)` at end of data, `Some(Error::Io(..))` on failure
    pub stop: Option<Error>,
}

impl Transfer {
    /// Bytes moved, no stop reason.
    #[inline]
    pub fn progress(len: usize) -> Self {
        Self { len, stop: None }
    }

    /// End of data with no bytes moved.
    #[inline]
    pub fn eof() -> Self {
        Self {
            len: 0,
            stop: Some(Error::Eof),
        }
    }

    /// Failure with no bytes moved.
    #[inline]
    pub fn failed(err: impl Into<Error>) -> Self {
        Self {
            len: 0,
            stop: Some(err.into()),
        }
    }
}

/// A capability that can attempt to fill a byte range.
pub trait Source {
    /// Fills a prefix of `dst`, reporting how much was written and why it stopped.
    fn fill(&mut self, dst: &mut [u8]) -> Transfer;
}

/// A capability that can attempt to drain a byte range.
pub trait Sink {
    /// Drains a prefix of `src`, reporting how much was taken and why it stopped.
    fn drain(&mut self, src: &[u8]) -> Transfer;
}

impl<R: io::Read + ?Sized> Source for R {
    fn fill(&mut self, dst: &mut [u8]) -> Transfer {
        // Retry on interrupt
        let result = loop {
            match self.read(dst) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                other => break other,
            }
        };

        match result {
            Ok(0) if !dst.is_empty() => Transfer::eof(),
            Ok(n) => Transfer::progress(n),
            Err(err) => Transfer::failed(err),
        }
    }
}

impl<W: io::Write + ?Sized> Sink for W {
    fn drain(&mut self, src: &[u8]) -> Transfer {
        // Retry on interrupt
        let result = loop {
            match self.write(src) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                other => break other,
            }
        };

        match result {
            Ok(n) => Transfer::progress(n),
            Err(err) => Transfer::failed(err),
        }
    }
}
