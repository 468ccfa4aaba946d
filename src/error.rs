// src/error.rs
//! Error types for buffered stream operations with conversion support

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur during buffered reads and writes
#[derive(Debug, Clone)]
pub enum Error {
    /// The internal region can never hold the requested number of bytes
    BufferTooSmall,
    /// Growing the region would exceed the largest representable size
    CapacityExceeded,
    /// Consume/discard size exceeds the pending data
    InvalidConsumeSize,
    /// Commit size exceeds the reserved free space
    InvalidCommitSize,
    /// A peek returned fewer bytes than requested without saying why
    ShortPeek,
    /// A reserve returned fewer bytes than requested without saying why
    ShortReserve,
    /// The sink accepted fewer bytes than given without saying why
    ShortWrite,
    /// The source repeatedly returned no data and no error
    NoProgress,
    /// End of data
    Eof,
    /// End of data in the middle of a logical operation
    UnexpectedEof,
    /// Failure reported by the underlying source or sink
    Io(Arc<io::Error>),
}

impl Error {
    /// Returns `true` for plain end-of-data.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` for the capacity conditions (`BufferTooSmall`, `CapacityExceeded`).
    #[inline]
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::BufferTooSmall | Self::CapacityExceeded)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::CapacityExceeded => write!(f, "insufficient buffer capacity"),
            Self::InvalidConsumeSize => write!(f, "invalid consume size"),
            Self::InvalidCommitSize => write!(f, "invalid commit size"),
            Self::ShortPeek => write!(f, "short peek"),
            Self::ShortReserve => write!(f, "short reserve"),
            Self::ShortWrite => write!(f, "short write"),
            Self::NoProgress => write!(f, "multiple reads returned no data or error"),
            Self::Eof => write!(f, "end of data"),
            Self::UnexpectedEof => write!(f, "unexpected end of data"),
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Io(a), Self::Io(b)) => {
                Arc::ptr_eq(a, b) || (a.kind() == b.kind() && a.to_string() == b.to_string())
            }
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Error {}

/// A result that is shorter than requested, paired with the reason.
///
/// Returned by `peek`, `reserve` and `write` when they made partial
/// progress (possibly none) before hitting a condition. The `value` is the
/// best-effort outcome and is always meaningful.
#[derive(Debug, PartialEq, Eq)]
pub struct Partial<T> {
    /// Best-effort result
    pub value: T,
    /// Why the result is short
    pub error: Error,
}

impl<T> Partial<T> {
    /// Creates a partial result.
    #[inline]
    pub fn new(value: T, error: Error) -> Self {
        Self { value, error }
    }

    /// Transforms the carried value, keeping the error.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Partial<U> {
        Partial {
            value: f(self.value),
            error: self.error,
        }
    }
}

impl<T> From<Partial<T>> for Error {
    fn from(partial: Partial<T>) -> Self {
        partial.error
    }
}

impl<T: fmt::Debug> fmt::Display for Partial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (partial result: {:?})", self.error, self.value)
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert Error to std::io::Error
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        use io::ErrorKind;
        match err {
            Error::Io(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner,
                Err(shared) => io::Error::new(shared.kind(), shared.to_string()),
            },
            Error::Eof | Error::UnexpectedEof => io::Error::new(ErrorKind::UnexpectedEof, err),
            Error::ShortWrite | Error::ShortReserve => io::Error::new(ErrorKind::WriteZero, err),
            Error::InvalidConsumeSize | Error::InvalidCommitSize => {
                io::Error::new(ErrorKind::InvalidInput, err)
            }
            _ => io::Error::other(err),
        }
    }
}

/// Convert std::io::Error to Error
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

/// Result type alias for buffered stream operations
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        // anyhow's blanket `From` covers any `std::error::Error + Send + Sync`.
        self.map_err(anyhow::Error::new)
    }

    fn into_io(self) -> io::Result<T> {
        self.map_err(|e| e.into())
    }
}
