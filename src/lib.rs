// src/lib.rs
//! # Buffered Byte-Stream I/O
//!
//! Buffered readers and writers that sit between a protocol parser or
//! serializer and a raw byte source or sink.
//!
//! Readers let callers inspect upcoming bytes in place (`peek`) before
//! deciding how many to drop (`consume`). Writers hand out their free space
//! directly (`reserve`) so callers can serialize into it before publishing
//! the bytes (`commit`). Views borrow the reader or writer, so a view can
//! never outlive the next call that might move the data under it.
//!
//! Features:
//! - Fixed-capacity reader and writer over caller-supplied storage
//! - Growing reader that doubles its region on demand and can shrink back
//! - Sized writer that keeps unsent bytes after a partial flush
//! - Short results carry the partial value and the reason ([`Partial`])
//! - Every buffer region is wiped with `zeroize` when dropped or reallocated
//! - Any `std::io::Read` / `std::io::Write` works as a source / sink

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod duplex;
pub mod error;
pub mod io;
pub mod reader;
mod region;
pub mod util;
pub mod writer;

// Re-export main types
pub use duplex::{Duplex, ReadWriter};
pub use error::{Error, Partial, Result, ResultExt};
pub use io::{Sink, Source, Transfer};
pub use reader::{FixedReader, GrowingReader, MAX_EMPTY_READS, Reader};
pub use util::{LimitedReader, peek_to, write_string};
pub use writer::{FixedWriter, SIZED_MIN_CAPACITY, SizedWriter, Writer};

pub use reader::growing::GROWING_MIN_CAPACITY;

/// Commonly used imports.
pub mod prelude {
    pub use crate::duplex::{Duplex, ReadWriter};
    pub use crate::error::{Error, Partial, Result, ResultExt};
    pub use crate::io::{Sink, Source, Transfer};
    pub use crate::reader::growing::GROWING_MIN_CAPACITY;
    pub use crate::reader::{FixedReader, GrowingReader, MAX_EMPTY_READS, Reader};
    pub use crate::util::{LimitedReader, peek_to, write_string};
    pub use crate::writer::{FixedWriter, SIZED_MIN_CAPACITY, SizedWriter, Writer};
}
