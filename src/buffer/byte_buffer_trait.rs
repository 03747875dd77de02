//! The ByteBuffer trait: byte-addressable reads and writes.

use super::order::MAX_WIDTH;
use super::{Buffer, ByteOrder, Cursor, FixedWidth};
use crate::error::{Error, Result};

/// A buffer of bytes with relative, absolute, bulk and typed accessors.
///
/// Relative operations use and advance the position; absolute operations take
/// an index and leave the position alone. Every accessor validates through the
/// [`Cursor`] helpers before touching storage, and relative writes advance only
/// after [`store`](ByteBuffer::store) succeeds, so a failed call leaves the
/// cursor unchanged.
///
/// # Required Methods
///
/// Implementors provide storage access and views:
/// - [`order()`](ByteBuffer::order) / [`set_order()`](ByteBuffer::set_order)
/// - [`load()`](ByteBuffer::load) / [`store()`](ByteBuffer::store)
/// - [`compact()`](ByteBuffer::compact), [`slice()`](ByteBuffer::slice),
///   [`duplicate()`](ByteBuffer::duplicate)
///
/// # Typed Accessors
///
/// | Value   | Rust type | Width |
/// |---------|-----------|-------|
/// | char            | `u16`     | 2     |
/// | short           | `i16`     | 2     |
/// | int             | `i32`     | 4     |
/// | long            | `i64`     | 8     |
/// | float           | `f32`     | 4     |
/// | double          | `f64`     | 8     |
///
/// Each has four forms (`get_i32`, `get_i32_at`, `put_i32`, `put_i32_at`)
/// and uses the buffer's [`ByteOrder`]. Relative forms advance by the full
/// width in one bounds check.
///
/// # Examples
///
/// ```
/// use cursorbuf::{Buffer, ByteBuffer, ByteOrder, HeapByteBuffer};
///
/// let mut buf = HeapByteBuffer::allocate(8);
/// buf.set_order(ByteOrder::BigEndian);
/// buf.put_u16(0xCAFE)?;
/// buf.put_i16(-2)?;
/// buf.flip();
/// assert_eq!(buf.get()?, 0xCA);
/// assert_eq!(buf.get_u16_at(0)?, 0xCAFE);
/// assert_eq!(buf.get_i16_at(2)?, -2);
/// # Ok::<(), cursorbuf::Error>(())
/// ```
pub trait ByteBuffer: Buffer {
    /// Returns the byte order used by the typed accessors.
    fn order(&self) -> ByteOrder;

    /// Changes the byte order used by the typed accessors.
    fn set_order(&mut self, order: ByteOrder);

    /// Copies `dst.len()` bytes starting at logical `index` into `dst`.
    ///
    /// Callers have already validated the range against the cursor; this is
    /// the raw storage read the provided accessors are built on.
    fn load(&self, index: usize, dst: &mut [u8]);

    /// Copies `src` into storage starting at logical `index`.
    ///
    /// Callers have already validated the range. Read-only buffers return a
    /// `ReadOnlyBuffer` error.
    fn store(&mut self, index: usize, src: &[u8]) -> Result<()>;

    /// Moves the bytes between position and limit to the start of the buffer.
    ///
    /// Afterwards position is the number of bytes moved, limit is the
    /// capacity and the mark is discarded, ready for more writes.
    fn compact(&mut self) -> Result<()>;

    /// Creates a view over the remaining bytes.
    ///
    /// The view shares storage, starts at position 0 and has capacity and
    /// limit equal to this buffer's remaining count.
    fn slice(&self) -> Self
    where
        Self: Sized;

    /// Creates a view over the same storage with an identical, independent
    /// cursor.
    fn duplicate(&self) -> Self
    where
        Self: Sized;

    // === Provided byte accessors ===

    /// Fails with `ReadOnlyBuffer` if this buffer rejects writes.
    #[inline]
    fn ensure_writable(&self) -> Result<()> {
        if self.is_read_only() {
            return Err(Error::read_only());
        }
        Ok(())
    }

    /// Reads the byte at the position and advances.
    fn get(&mut self) -> Result<u8> {
        let index = self.cursor_mut().next_get_index(1)?;
        let mut byte = [0u8; 1];
        self.load(index, &mut byte);
        Ok(byte[0])
    }

    /// Reads the byte at `index`.
    fn get_at(&self, index: usize) -> Result<u8> {
        let index = self.cursor().check_index(index)?;
        let mut byte = [0u8; 1];
        self.load(index, &mut byte);
        Ok(byte[0])
    }

    /// Reads `length` bytes into `dst[offset..offset + length]` and advances.
    ///
    /// Fails with `IndexOutOfBounds` if the window does not fit in `dst`, or
    /// `BufferUnderflow` if fewer than `length` bytes remain.
    fn get_slice(&mut self, dst: &mut [u8], offset: usize, length: usize) -> Result<()> {
        Cursor::check_bounds(offset, length, dst.len())?;
        let index = self.cursor_mut().next_get_index(length)?;
        self.load(index, &mut dst[offset..offset + length]);
        Ok(())
    }

    /// Fills `dst` completely and advances.
    fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let length = dst.len();
        self.get_slice(dst, 0, length)
    }

    /// Writes a byte at the position and advances.
    fn put(&mut self, value: u8) -> Result<()> {
        self.ensure_writable()?;
        let index = self.cursor().check_put_index(1)?;
        self.store(index, &[value])?;
        self.cursor_mut().next_put_index(1)?;
        Ok(())
    }

    /// Writes a byte at `index`.
    fn put_at(&mut self, index: usize, value: u8) -> Result<()> {
        self.ensure_writable()?;
        let index = self.cursor().check_index(index)?;
        self.store(index, &[value])
    }

    /// Writes `src[offset..offset + length]` at the position and advances.
    ///
    /// Fails with `IndexOutOfBounds` if the window does not fit in `src`, or
    /// `BufferOverflow` if fewer than `length` bytes remain.
    fn put_slice(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        self.ensure_writable()?;
        Cursor::check_bounds(offset, length, src.len())?;
        let index = self.cursor().check_put_index(length)?;
        self.store(index, &src[offset..offset + length])?;
        self.cursor_mut().next_put_index(length)?;
        Ok(())
    }

    /// Writes all of `src` at the position and advances.
    fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.put_slice(src, 0, src.len())
    }

    /// Transfers every remaining byte of `src` into this buffer.
    ///
    /// Both positions advance by the number of bytes moved. Fails with
    /// `BufferOverflow`, before anything is copied, if `src` has more
    /// remaining bytes than this buffer has room for.
    ///
    /// The provided implementation moves one byte at a time through the
    /// relative accessors; array-backed implementations override it with
    /// bulk copies.
    fn put_buffer(&mut self, src: &mut dyn ByteBuffer) -> Result<()> {
        transfer_bytewise(self, src)
    }

    /// Copies the bytes between position and limit without moving the cursor.
    fn remaining_to_vec(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.remaining()];
        self.load(self.position(), &mut bytes);
        bytes
    }

    // === Typed accessors ===

    /// Reads a fixed-width value at the position and advances by its width.
    fn get_value<T: FixedWidth>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        let index = self.cursor_mut().next_get_index(T::WIDTH)?;
        Ok(decode_at(self, index))
    }

    /// Reads a fixed-width value at `index`.
    fn get_value_at<T: FixedWidth>(&self, index: usize) -> Result<T>
    where
        Self: Sized,
    {
        let index = self.cursor().check_index_range(index, T::WIDTH)?;
        Ok(decode_at(self, index))
    }

    /// Writes a fixed-width value at the position and advances by its width.
    fn put_value<T: FixedWidth>(&mut self, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.ensure_writable()?;
        let index = self.cursor().check_put_index(T::WIDTH)?;
        encode_at(self, index, value)?;
        self.cursor_mut().next_put_index(T::WIDTH)?;
        Ok(())
    }

    /// Writes a fixed-width value at `index`.
    fn put_value_at<T: FixedWidth>(&mut self, index: usize, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.ensure_writable()?;
        let index = self.cursor().check_index_range(index, T::WIDTH)?;
        encode_at(self, index, value)
    }

    // --- char (UTF-16 code unit) ---

    /// Reads a 2-byte char code unit and advances.
    fn get_u16(&mut self) -> Result<u16>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads a 2-byte char code unit at `index`.
    fn get_u16_at(&self, index: usize) -> Result<u16>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes a 2-byte char code unit and advances.
    fn put_u16(&mut self, value: u16) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes a 2-byte char code unit at `index`.
    fn put_u16_at(&mut self, index: usize, value: u16) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }

    // --- short ---

    /// Reads an `i16` and advances.
    fn get_i16(&mut self) -> Result<i16>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads an `i16` at `index`.
    fn get_i16_at(&self, index: usize) -> Result<i16>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes an `i16` and advances.
    fn put_i16(&mut self, value: i16) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes an `i16` at `index`.
    fn put_i16_at(&mut self, index: usize, value: i16) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }

    // --- int ---

    /// Reads an `i32` and advances.
    fn get_i32(&mut self) -> Result<i32>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads an `i32` at `index`.
    fn get_i32_at(&self, index: usize) -> Result<i32>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes an `i32` and advances.
    fn put_i32(&mut self, value: i32) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes an `i32` at `index`.
    fn put_i32_at(&mut self, index: usize, value: i32) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }

    // --- long ---

    /// Reads an `i64` and advances.
    fn get_i64(&mut self) -> Result<i64>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads an `i64` at `index`.
    fn get_i64_at(&self, index: usize) -> Result<i64>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes an `i64` and advances.
    fn put_i64(&mut self, value: i64) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes an `i64` at `index`.
    fn put_i64_at(&mut self, index: usize, value: i64) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }

    // --- float ---

    /// Reads an `f32` and advances.
    fn get_f32(&mut self) -> Result<f32>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads an `f32` at `index`.
    fn get_f32_at(&self, index: usize) -> Result<f32>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes an `f32` and advances.
    fn put_f32(&mut self, value: f32) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes an `f32` at `index`.
    fn put_f32_at(&mut self, index: usize, value: f32) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }

    // --- double ---

    /// Reads an `f64` and advances.
    fn get_f64(&mut self) -> Result<f64>
    where
        Self: Sized,
    {
        self.get_value()
    }

    /// Reads an `f64` at `index`.
    fn get_f64_at(&self, index: usize) -> Result<f64>
    where
        Self: Sized,
    {
        self.get_value_at(index)
    }

    /// Writes an `f64` and advances.
    fn put_f64(&mut self, value: f64) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(value)
    }

    /// Writes an `f64` at `index`.
    fn put_f64_at(&mut self, index: usize, value: f64) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value_at(index, value)
    }
}

fn decode_at<B: ByteBuffer + ?Sized, T: FixedWidth>(buf: &B, index: usize) -> T {
    let mut raw = [0u8; MAX_WIDTH];
    let raw = &mut raw[..T::WIDTH];
    buf.load(index, raw);
    T::decode(buf.order(), raw)
}

fn encode_at<B: ByteBuffer + ?Sized, T: FixedWidth>(
    buf: &mut B,
    index: usize,
    value: T,
) -> Result<()> {
    let mut raw = [0u8; MAX_WIDTH];
    let raw = &mut raw[..T::WIDTH];
    value.encode(buf.order(), raw);
    buf.store(index, raw)
}

/// Moves every remaining byte of `src` into `dst` one relative get/put at a
/// time. Overflow is checked up front so nothing moves on failure.
pub(crate) fn transfer_bytewise<B: ByteBuffer + ?Sized>(
    dst: &mut B,
    src: &mut dyn ByteBuffer,
) -> Result<()> {
    dst.ensure_writable()?;
    let n = src.remaining();
    if n > dst.remaining() {
        return Err(Error::overflow(n, dst.remaining()));
    }
    for _ in 0..n {
        let byte = src.get()?;
        dst.put(byte)?;
    }
    Ok(())
}
