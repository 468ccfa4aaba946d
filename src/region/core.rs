// src/region/core.rs
//! Core region structure and cursor accessors
//!
//! This module provides the `Region` type: contiguous byte storage with a
//! read cursor and a write cursor, securely zeroed on drop. It is internal
//! to the buffered readers and writers, which expose its state only through
//! their own accessors.

use zeroize::Zeroize;

/// Contiguous byte storage delimited by two cursors.
///
/// `[r, w)` is pending data: unread bytes for a reader, buffered but not
/// yet flushed bytes for a writer (writers keep `r` at 0). `[w, cap)` is
/// free space. The invariant `r <= w <= cap` holds after every operation.
///
/// The storage may be owned (`Vec<u8>`, `Box<[u8]>`, `[u8; N]`) or
/// borrowed (`&mut [u8]`). Either way it is wiped with [`zeroize`] when the
/// region is dropped.
pub(crate) struct Region<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Backing storage (securely erased on drop)
    pub(crate) buf: B,
    /// Start of pending data
    pub(crate) r: usize,
    /// End of pending data, start of free space
    pub(crate) w: usize,
}

impl<B> Region<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wraps `buf` as an empty region; its length is the capacity.
    #[inline]
    pub(crate) fn new(buf: B) -> Self {
        Self { buf, r: 0, w: 0 }
    }

    /// Returns the total capacity of the region.
    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns the number of pending bytes.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.w - self.r
    }

    /// Returns `true` if no bytes are pending.
    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.r == self.w
    }

    /// Returns `true` if no free space remains after the write cursor.
    #[inline(always)]
    pub(crate) fn is_full(&self) -> bool {
        self.w == self.capacity()
    }

    /// Returns the read cursor.
    #[cfg(test)]
    pub(crate) fn read_pos(&self) -> usize {
        self.r
    }

    /// Returns the write cursor.
    #[cfg(test)]
    pub(crate) fn write_pos(&self) -> usize {
        self.w
    }

    /// Returns the number of free bytes after the write cursor.
    #[inline(always)]
    pub(crate) fn free_len(&self) -> usize {
        self.capacity() - self.w
    }

    /// Returns the pending bytes.
    #[inline]
    pub(crate) fn pending(&self) -> &[u8] {
        &self.buf.as_ref()[self.r..self.w]
    }

    /// Returns the free space after the write cursor.
    #[inline]
    pub(crate) fn free_mut(&mut self) -> &mut [u8] {
        let w = self.w;
        &mut self.buf.as_mut()[w..]
    }

    /// Resets both cursors without touching the contents.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.r = 0;
        self.w = 0;
    }
}

impl Region<Vec<u8>> {
    /// Creates an owned, zero-filled region of `capacity` bytes.
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::new(vec![0; capacity])
    }
}

impl<B> Drop for Region<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn drop(&mut self) {
        self.buf.as_mut().zeroize();
    }
}
