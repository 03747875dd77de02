//! The Buffer trait: cursor operations and capability queries.

use super::{Cursor, SharedStorage};
use crate::error::Result;

/// The contract shared by every buffer kind.
///
/// A buffer exposes its [`Cursor`] and answers capability queries. Everything
/// else in this trait is provided on top of those.
///
/// # Required Methods
///
/// - [`cursor()`](Buffer::cursor) / [`cursor_mut()`](Buffer::cursor_mut)
/// - [`is_read_only()`](Buffer::is_read_only), [`has_array()`](Buffer::has_array),
///   [`array()`](Buffer::array), [`array_offset()`](Buffer::array_offset),
///   [`is_direct()`](Buffer::is_direct)
///
/// # Chaining
///
/// Cursor mutators return `&mut Self` so calls chain on concrete buffer
/// types. Through a `dyn` reference use [`cursor_mut()`](Buffer::cursor_mut),
/// whose methods chain the same way.
///
/// ```
/// use cursorbuf::{Buffer, HeapByteBuffer};
///
/// let mut buf = HeapByteBuffer::allocate(16);
/// buf.set_limit(8)?.set_position(2)?.mark();
/// assert_eq!(buf.remaining(), 6);
/// # Ok::<(), cursorbuf::Error>(())
/// ```
pub trait Buffer {
    /// Returns the cursor state.
    fn cursor(&self) -> &Cursor;

    /// Returns the cursor state for mutation.
    fn cursor_mut(&mut self) -> &mut Cursor;

    /// Returns true if this buffer rejects writes.
    fn is_read_only(&self) -> bool;

    /// Returns true if this buffer is backed by an accessible array.
    ///
    /// When true, [`array()`](Buffer::array) and
    /// [`array_offset()`](Buffer::array_offset) succeed.
    fn has_array(&self) -> bool;

    /// Returns the storage backing this buffer.
    ///
    /// Writes through the returned handle are visible through the buffer and
    /// the other way around. Fails with `ReadOnlyBuffer` if the buffer is
    /// array-backed but read-only, or `UnsupportedOperation` if it has no
    /// accessible array.
    fn array(&self) -> Result<SharedStorage>;

    /// Returns the storage index of this buffer's element 0.
    ///
    /// Position `p` corresponds to storage index `p + array_offset()`. Fails
    /// the same way as [`array()`](Buffer::array).
    fn array_offset(&self) -> Result<usize>;

    /// Returns true if this buffer lives outside heap storage.
    fn is_direct(&self) -> bool;

    // === Provided cursor operations ===

    /// Returns the capacity.
    #[inline]
    fn capacity(&self) -> usize {
        self.cursor().capacity()
    }

    /// Returns the position.
    #[inline]
    fn position(&self) -> usize {
        self.cursor().position()
    }

    /// Returns the limit.
    #[inline]
    fn limit(&self) -> usize {
        self.cursor().limit()
    }

    /// Returns the number of bytes between position and limit.
    #[inline]
    fn remaining(&self) -> usize {
        self.cursor().remaining()
    }

    /// Returns true if any bytes remain.
    #[inline]
    fn has_remaining(&self) -> bool {
        self.cursor().has_remaining()
    }

    /// Sets the position. See [`Cursor::set_position`].
    fn set_position(&mut self, new_position: usize) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.cursor_mut().set_position(new_position)?;
        Ok(self)
    }

    /// Sets the limit. See [`Cursor::set_limit`].
    fn set_limit(&mut self, new_limit: usize) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.cursor_mut().set_limit(new_limit)?;
        Ok(self)
    }

    /// Sets the mark at the current position.
    fn mark(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.cursor_mut().mark();
        self
    }

    /// Restores the position to the mark.
    fn reset(&mut self) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.cursor_mut().reset()?;
        Ok(self)
    }

    /// Position 0, limit = capacity, mark discarded.
    fn clear(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.cursor_mut().clear();
        self
    }

    /// Limit = position, position 0, mark discarded.
    fn flip(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.cursor_mut().flip();
        self
    }

    /// Position 0, mark discarded, limit unchanged.
    fn rewind(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.cursor_mut().rewind();
        self
    }
}
