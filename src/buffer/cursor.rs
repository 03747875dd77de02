//! Cursor state shared by every buffer kind.

use crate::error::{Error, Result};

/// The mark/position/limit/capacity state machine behind every buffer.
///
/// `Cursor` knows nothing about byte content. It owns the four integers and
/// enforces `mark <= position <= limit <= capacity` after every operation:
/// setters that would break the relation either fail before mutating or clamp
/// the dependent field (position follows a lowered limit, a mark past the new
/// position or limit is discarded).
///
/// The `next_*_index` and `check_*` helpers are what concrete buffers call
/// before touching storage. They are public so that buffer kinds living
/// outside this crate can reuse the same checks.
///
/// # Examples
///
/// ```
/// use cursorbuf::Cursor;
///
/// let mut cursor = Cursor::new(None, 0, 16, 16).unwrap();
/// cursor.set_position(4).unwrap().mark();
/// cursor.set_position(10).unwrap();
/// cursor.reset().unwrap();
/// assert_eq!(cursor.position(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    mark: Option<usize>,
    position: usize,
    limit: usize,
    capacity: usize,
}

impl Cursor {
    /// Creates a cursor after checking the invariants.
    ///
    /// `limit` then `position` are applied through their setters, so their
    /// checks run in that order. A mark greater than `position` is rejected.
    pub fn new(
        mark: Option<usize>,
        position: usize,
        limit: usize,
        capacity: usize,
    ) -> Result<Self> {
        let mut cursor = Self {
            mark: None,
            position: 0,
            limit: 0,
            capacity,
        };
        cursor.set_limit(limit)?;
        cursor.set_position(position)?;
        if let Some(mark) = mark {
            if mark > position {
                return Err(Error::illegal_argument(format!(
                    "mark > position: ({mark} > {position})"
                )));
            }
            cursor.mark = Some(mark);
        }
        Ok(cursor)
    }

    /// Creates a cursor at position 0 with limit equal to `capacity`.
    #[must_use]
    pub const fn full(capacity: usize) -> Self {
        Self {
            mark: None,
            position: 0,
            limit: capacity,
            capacity,
        }
    }

    /// Returns the capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the limit.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the mark, or `None` if it is undefined.
    #[inline]
    #[must_use]
    pub const fn mark_value(&self) -> Option<usize> {
        self.mark
    }

    /// Sets the position, discarding a mark that lies beyond it.
    pub fn set_position(&mut self, new_position: usize) -> Result<&mut Self> {
        if new_position > self.limit {
            return Err(Error::illegal_argument(format!(
                "position {new_position} > limit {}",
                self.limit
            )));
        }
        self.position = new_position;
        if self.mark.is_some_and(|mark| mark > new_position) {
            self.mark = None;
        }
        Ok(self)
    }

    /// Sets the limit.
    ///
    /// The position is clamped to the new limit and a mark beyond it is
    /// discarded. A limit past the capacity is rejected.
    pub fn set_limit(&mut self, new_limit: usize) -> Result<&mut Self> {
        if new_limit > self.capacity {
            return Err(Error::illegal_argument(format!(
                "limit {new_limit} > capacity {}",
                self.capacity
            )));
        }
        self.limit = new_limit;
        if self.position > new_limit {
            self.position = new_limit;
        }
        if self.mark.is_some_and(|mark| mark > new_limit) {
            self.mark = None;
        }
        Ok(self)
    }

    /// Sets the mark at the current position.
    pub fn mark(&mut self) -> &mut Self {
        self.mark = Some(self.position);
        self
    }

    /// Restores the position to the mark. The mark itself is kept.
    pub fn reset(&mut self) -> Result<&mut Self> {
        let mark = self.mark.ok_or_else(Error::invalid_mark)?;
        self.position = mark;
        Ok(self)
    }

    /// Discards the mark.
    pub fn discard_mark(&mut self) -> &mut Self {
        self.mark = None;
        self
    }

    /// Prepares for a sequence of writes: position 0, limit = capacity.
    ///
    /// Content is not erased.
    pub fn clear(&mut self) -> &mut Self {
        self.position = 0;
        self.limit = self.capacity;
        self.mark = None;
        self
    }

    /// Switches from writing to reading: limit = position, position 0.
    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.position;
        self.position = 0;
        self.mark = None;
        self
    }

    /// Prepares to re-read: position 0, limit unchanged.
    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self.mark = None;
        self
    }

    /// Returns the number of elements between position and limit.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if at least one element remains.
    #[inline]
    #[must_use]
    pub const fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    // === Bounds checks for buffer implementations ===

    /// Checks that `n` elements remain for reading, then advances.
    ///
    /// Returns the position before the advance.
    #[inline]
    pub fn next_get_index(&mut self, n: usize) -> Result<usize> {
        if self.remaining() < n {
            return Err(Error::underflow(n, self.remaining()));
        }
        let index = self.position;
        self.position += n;
        Ok(index)
    }

    /// Checks that `n` elements remain for writing, then advances.
    ///
    /// Returns the position before the advance.
    #[inline]
    pub fn next_put_index(&mut self, n: usize) -> Result<usize> {
        if self.remaining() < n {
            return Err(Error::overflow(n, self.remaining()));
        }
        let index = self.position;
        self.position += n;
        Ok(index)
    }

    /// Checks that `n` elements remain for writing without advancing.
    ///
    /// Returns the position. Pair with [`next_put_index`](Self::next_put_index)
    /// once the write has landed.
    #[inline]
    pub fn check_put_index(&self, n: usize) -> Result<usize> {
        if self.remaining() < n {
            return Err(Error::overflow(n, self.remaining()));
        }
        Ok(self.position)
    }

    /// Checks a single-element absolute index against the limit.
    #[inline]
    pub fn check_index(&self, index: usize) -> Result<usize> {
        if index >= self.limit {
            return Err(Error::index_out_of_bounds(index, 1, self.limit));
        }
        Ok(index)
    }

    /// Checks that `n` elements starting at `index` lie below the limit.
    #[inline]
    pub fn check_index_range(&self, index: usize, n: usize) -> Result<usize> {
        if index > self.limit || n > self.limit - index {
            return Err(Error::index_out_of_bounds(index, n, self.limit));
        }
        Ok(index)
    }

    /// Checks that `[offset, offset + length)` lies within an array of
    /// `size` elements.
    ///
    /// The end is computed with `checked_add`, so a range that would wrap
    /// around `usize::MAX` is rejected rather than compared after overflow.
    #[inline]
    pub fn check_bounds(offset: usize, length: usize, size: usize) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= size => Ok(()),
            _ => Err(Error::range_out_of_bounds(offset, length, size)),
        }
    }
}
