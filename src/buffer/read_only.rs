//! Read-only view over heap storage.

use super::{Buffer, ByteBuffer, ByteOrder, Cursor, SharedStorage};
use crate::error::{Error, Result};
use crate::tracing_compat::trace;
use std::fmt;

/// A view that reads shared storage but rejects every write.
///
/// Obtained from [`HeapByteBuffer::as_read_only`](super::HeapByteBuffer::as_read_only).
/// The backing storage is not exposed: [`array`](Buffer::array) fails with
/// `ReadOnlyBuffer` and [`has_array`](Buffer::has_array) is false, so a heap
/// buffer pulling from this view through `put_buffer` copies byte by byte.
///
/// ```
/// use cursorbuf::{Buffer, ByteBuffer, ErrorKind, HeapByteBuffer};
///
/// let mut buf = HeapByteBuffer::wrap(vec![1, 2, 3]);
/// let mut view = buf.as_read_only();
/// assert_eq!(view.get()?, 1);
/// assert_eq!(view.put(9).unwrap_err().kind(), ErrorKind::ReadOnlyBuffer);
///
/// buf.put_at(1, 7)?;
/// assert_eq!(view.get()?, 7);
/// # Ok::<(), cursorbuf::Error>(())
/// ```
#[derive(Clone)]
pub struct ReadOnlyByteBuffer {
    storage: SharedStorage,
    offset: usize,
    cursor: Cursor,
    order: ByteOrder,
}

impl ReadOnlyByteBuffer {
    pub(crate) const fn new(
        storage: SharedStorage,
        offset: usize,
        cursor: Cursor,
        order: ByteOrder,
    ) -> Self {
        Self {
            storage,
            offset,
            cursor,
            order,
        }
    }

    /// Returns a duplicate; the view is already read-only.
    #[must_use]
    pub fn as_read_only(&self) -> Self {
        self.duplicate()
    }
}

impl Buffer for ReadOnlyByteBuffer {
    #[inline]
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn is_read_only(&self) -> bool {
        true
    }

    fn has_array(&self) -> bool {
        false
    }

    fn array(&self) -> Result<SharedStorage> {
        Err(Error::read_only())
    }

    fn array_offset(&self) -> Result<usize> {
        Err(Error::read_only())
    }

    fn is_direct(&self) -> bool {
        false
    }
}

impl ByteBuffer for ReadOnlyByteBuffer {
    #[inline]
    fn order(&self) -> ByteOrder {
        self.order
    }

    fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    #[inline]
    fn load(&self, index: usize, dst: &mut [u8]) {
        let start = self.offset + index;
        self.storage
            .with(|bytes| dst.copy_from_slice(&bytes[start..start + dst.len()]));
    }

    fn store(&mut self, _index: usize, _src: &[u8]) -> Result<()> {
        Err(Error::read_only())
    }

    fn compact(&mut self) -> Result<()> {
        Err(Error::read_only())
    }

    fn slice(&self) -> Self {
        let remaining = self.cursor.remaining();
        trace!(len = remaining, "read-only buffer slice");
        Self::new(
            self.storage.clone(),
            self.offset + self.cursor.position(),
            Cursor::full(remaining),
            self.order,
        )
    }

    fn duplicate(&self) -> Self {
        trace!(position = self.cursor.position(), "read-only buffer duplicate");
        self.clone()
    }
}

impl PartialEq for ReadOnlyByteBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.remaining() == other.remaining() && self.remaining_to_vec() == other.remaining_to_vec()
    }
}

impl Eq for ReadOnlyByteBuffer {}

impl fmt::Debug for ReadOnlyByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyByteBuffer")
            .field("cursor", &self.cursor)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ReadOnlyByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReadOnlyByteBuffer[pos={} lim={} cap={}]",
            self.position(),
            self.limit(),
            self.capacity()
        )
    }
}
