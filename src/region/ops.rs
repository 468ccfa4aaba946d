// src/region/ops.rs
//! Cursor movement, compaction and reallocation

use super::core::Region;
use crate::error::{Error, Result};
use zeroize::Zeroize;

impl<B> Region<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Marks `n` freshly filled bytes after the write cursor as pending.
    #[inline]
    pub(crate) fn advance_write(&mut self, n: usize) {
        debug_assert!(n <= self.free_len());
        self.w += n;
    }

    /// Drops `n` bytes from the front of the pending data.
    ///
    /// Fails with [`Error::InvalidConsumeSize`] and leaves the cursors alone
    /// if fewer than `n` bytes are pending.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) -> Result<()> {
        if n > self.len() {
            return Err(Error::InvalidConsumeSize);
        }
        self.r += n;
        Ok(())
    }

    /// Copies as much of the pending data into `dst` as fits and consumes it.
    pub(crate) fn copy_to(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len());
        dst[..n].copy_from_slice(&self.pending()[..n]);
        self.r += n;
        n
    }

    /// Appends as much of `src` as fits into the free space.
    pub(crate) fn append(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.free_len());
        self.free_mut()[..n].copy_from_slice(&src[..n]);
        self.w += n;
        n
    }

    /// Makes room so that `n` pending bytes can fit after the read cursor.
    ///
    /// An empty region rewinds both cursors; otherwise pending bytes slide to
    /// offset 0 only when the space after `r` is too small.
    pub(crate) fn make_room(&mut self, n: usize) {
        if self.is_empty() {
            self.reset();
        } else if n > self.capacity() - self.r {
            self.slide();
        }
    }

    /// Moves the pending bytes to offset 0.
    pub(crate) fn slide(&mut self) {
        if self.r == 0 {
            return;
        }
        let (r, w) = (self.r, self.w);
        self.buf.as_mut().copy_within(r..w, 0);
        self.w = w - r;
        self.r = 0;
    }

    /// Removes the first `n` pending bytes and shifts the rest to offset 0.
    pub(crate) fn shift_out(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.r += n;
        if self.is_empty() {
            self.reset();
        } else {
            self.slide();
        }
    }
}

impl Region<Vec<u8>> {
    /// Replaces the storage with a zero-filled one of `capacity` bytes.
    ///
    /// Pending bytes are copied to offset 0 of the new storage and the old
    /// storage is wiped before it is released. `capacity` must hold the
    /// pending bytes.
    ///
    /// Fails with [`Error::CapacityExceeded`] if the allocator refuses the
    /// new storage; the region is left untouched in that case.
    pub(crate) fn reallocate(&mut self, capacity: usize) -> Result<()> {
        debug_assert!(capacity >= self.len());
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(capacity)
            .map_err(|_| Error::CapacityExceeded)?;
        fresh.resize(capacity, 0);
        let len = self.len();
        fresh[..len].copy_from_slice(self.pending());

        let mut old = std::mem::replace(&mut self.buf, fresh);
        old.as_mut_slice().zeroize();

        self.r = 0;
        self.w = len;
        Ok(())
    }
}
