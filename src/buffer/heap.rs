//! Heap-backed, writable byte buffer.

use super::byte_buffer_trait::transfer_bytewise;
use super::{Buffer, ByteBuffer, ByteOrder, Cursor, ReadOnlyByteBuffer, SharedStorage};
use crate::error::{Error, Result};
use crate::tracing_compat::trace;
use std::fmt;

/// A byte buffer over shared heap storage.
///
/// Logical index `i` maps to `storage[offset + i]`. Views created with
/// [`slice`](ByteBuffer::slice), [`duplicate`](ByteBuffer::duplicate) and
/// [`as_read_only`](HeapByteBuffer::as_read_only) share the storage but carry
/// their own cursor, so writes are visible everywhere while positions stay
/// independent.
///
/// # Examples
///
/// ```
/// use cursorbuf::{Buffer, ByteBuffer, HeapByteBuffer};
///
/// let mut buf = HeapByteBuffer::allocate(8);
/// buf.put_bytes(b"abcdef")?;
/// buf.flip();
/// buf.set_position(2)?;
///
/// let mut tail = buf.slice();
/// assert_eq!(tail.capacity(), 4);
/// tail.put_at(0, b'C')?;
/// assert_eq!(buf.get()?, b'C');
/// # Ok::<(), cursorbuf::Error>(())
/// ```
#[derive(Clone)]
pub struct HeapByteBuffer {
    storage: SharedStorage,
    offset: usize,
    cursor: Cursor,
    order: ByteOrder,
}

impl HeapByteBuffer {
    /// Allocates a zero-filled buffer with limit equal to capacity.
    #[must_use]
    pub fn allocate(capacity: usize) -> Self {
        Self {
            storage: SharedStorage::zeroed(capacity),
            offset: 0,
            cursor: Cursor::full(capacity),
            order: ByteOrder::default(),
        }
    }

    /// Allocates a zero-filled buffer of `capacity` bytes with the given limit.
    pub fn with_limit(capacity: usize, limit: usize) -> Result<Self> {
        Self::from_parts(
            SharedStorage::zeroed(capacity),
            None,
            0,
            limit,
            capacity,
            0,
            ByteOrder::default(),
        )
    }

    /// Wraps a vector; position 0, limit and capacity equal to its length.
    #[must_use]
    pub fn wrap(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            storage: SharedStorage::from(bytes),
            offset: 0,
            cursor: Cursor::full(len),
            order: ByteOrder::default(),
        }
    }

    /// Wraps `[offset, offset + length)` of existing storage without copying.
    ///
    /// The buffer spans the whole storage: capacity is the storage length,
    /// position starts at `offset` and limit at `offset + length`. Fails with
    /// `IndexOutOfBounds` if the window does not fit.
    pub fn wrap_storage(storage: SharedStorage, offset: usize, length: usize) -> Result<Self> {
        let capacity = storage.len();
        Cursor::check_bounds(offset, length, capacity)?;
        Self::from_parts(
            storage,
            None,
            offset,
            offset + length,
            capacity,
            0,
            ByteOrder::default(),
        )
    }

    /// Builds a view over `storage` whose element 0 is `storage[offset]`.
    pub(crate) fn from_parts(
        storage: SharedStorage,
        mark: Option<usize>,
        position: usize,
        limit: usize,
        capacity: usize,
        offset: usize,
        order: ByteOrder,
    ) -> Result<Self> {
        debug_assert!(offset + capacity <= storage.len());
        Ok(Self {
            storage,
            offset,
            cursor: Cursor::new(mark, position, limit, capacity)?,
            order,
        })
    }

    /// Sets the byte order, returning the buffer for chaining.
    #[must_use]
    pub fn with_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    /// Creates a read-only view sharing storage and cursor state.
    #[must_use]
    pub fn as_read_only(&self) -> ReadOnlyByteBuffer {
        trace!(
            position = self.cursor.position(),
            limit = self.cursor.limit(),
            "heap buffer read-only view"
        );
        ReadOnlyByteBuffer::new(self.storage.clone(), self.offset, self.cursor, self.order)
    }

    #[inline]
    const fn ix(&self, index: usize) -> usize {
        self.offset + index
    }

    fn bulk_from_array(&mut self, src: &mut dyn ByteBuffer, n: usize) -> Result<()> {
        let src_storage = src.array()?;
        let from = src.array_offset()? + src.position();
        let to = self.ix(self.cursor.position());
        if self.storage.ptr_eq(&src_storage) {
            self.storage
                .with_mut(|bytes| bytes.copy_within(from..from + n, to));
        } else {
            src_storage.with(|source| {
                self.storage
                    .with_mut(|bytes| bytes[to..to + n].copy_from_slice(&source[from..from + n]));
            });
        }
        src.cursor_mut().next_get_index(n)?;
        self.cursor.next_put_index(n)?;
        Ok(())
    }

    // The source may read from this buffer's storage, so drain it before
    // borrowing the storage for the write.
    fn bulk_from_direct(&mut self, src: &mut dyn ByteBuffer, n: usize) -> Result<()> {
        let mut staged = vec![0u8; n];
        src.get_bytes(&mut staged)?;
        let index = self.cursor.position();
        self.store(index, &staged)?;
        self.cursor.next_put_index(n)?;
        Ok(())
    }
}

impl Buffer for HeapByteBuffer {
    #[inline]
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn has_array(&self) -> bool {
        true
    }

    fn array(&self) -> Result<SharedStorage> {
        Ok(self.storage.clone())
    }

    fn array_offset(&self) -> Result<usize> {
        Ok(self.offset)
    }

    fn is_direct(&self) -> bool {
        false
    }
}

impl ByteBuffer for HeapByteBuffer {
    #[inline]
    fn order(&self) -> ByteOrder {
        self.order
    }

    fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    #[inline]
    fn load(&self, index: usize, dst: &mut [u8]) {
        let start = self.ix(index);
        self.storage
            .with(|bytes| dst.copy_from_slice(&bytes[start..start + dst.len()]));
    }

    #[inline]
    fn store(&mut self, index: usize, src: &[u8]) -> Result<()> {
        let start = self.ix(index);
        self.storage
            .with_mut(|bytes| bytes[start..start + src.len()].copy_from_slice(src));
        Ok(())
    }

    fn compact(&mut self) -> Result<()> {
        let remaining = self.cursor.remaining();
        let from = self.ix(self.cursor.position());
        let to = self.ix(0);
        self.storage
            .with_mut(|bytes| bytes.copy_within(from..from + remaining, to));
        let capacity = self.cursor.capacity();
        self.cursor
            .set_limit(capacity)?
            .set_position(remaining)?
            .discard_mark();
        trace!(moved = remaining, capacity, "heap buffer compacted");
        Ok(())
    }

    fn slice(&self) -> Self {
        let remaining = self.cursor.remaining();
        trace!(
            offset = self.ix(self.cursor.position()),
            len = remaining,
            "heap buffer slice"
        );
        Self {
            storage: self.storage.clone(),
            offset: self.ix(self.cursor.position()),
            cursor: Cursor::full(remaining),
            order: self.order,
        }
    }

    fn duplicate(&self) -> Self {
        trace!(
            position = self.cursor.position(),
            limit = self.cursor.limit(),
            "heap buffer duplicate"
        );
        self.clone()
    }

    /// Dispatches on the source's capabilities: array-backed sources are
    /// copied storage to storage, direct sources fill this buffer's storage
    /// through their bulk `get`, anything else moves byte by byte.
    fn put_buffer(&mut self, src: &mut dyn ByteBuffer) -> Result<()> {
        let n = src.remaining();
        if n > self.cursor.remaining() {
            return Err(Error::overflow(n, self.cursor.remaining()));
        }
        if src.has_array() {
            trace!(len = n, path = "array", "heap buffer bulk transfer");
            self.bulk_from_array(src, n)
        } else if src.is_direct() {
            trace!(len = n, path = "direct", "heap buffer bulk transfer");
            self.bulk_from_direct(src, n)
        } else {
            trace!(len = n, path = "bytewise", "heap buffer bulk transfer");
            transfer_bytewise(self, src)
        }
    }
}

impl From<Vec<u8>> for HeapByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::wrap(bytes)
    }
}

/// Two buffers are equal when their remaining bytes are equal.
impl PartialEq for HeapByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.remaining() == other.remaining() && self.remaining_to_vec() == other.remaining_to_vec()
    }
}

impl Eq for HeapByteBuffer {}

impl fmt::Debug for HeapByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapByteBuffer")
            .field("cursor", &self.cursor)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .field("storage", &self.storage)
            .finish()
    }
}

impl fmt::Display for HeapByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HeapByteBuffer[pos={} lim={} cap={}]",
            self.position(),
            self.limit(),
            self.capacity()
        )
    }
}
