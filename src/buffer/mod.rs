//! Byte buffers with a mark/position/limit/capacity cursor.
//!
//! # Architecture
//!
//! ```text
//! Cursor                 four integers + bounds checks, no bytes
//!   ^
//!   | cursor() / cursor_mut()
//! Buffer (trait)         cursor operations, capability queries
//!   ^
//! ByteBuffer (trait)     relative/absolute/bulk/typed get & put over load/store
//!   ^
//!   +-- HeapByteBuffer       SharedStorage + offset, writable
//!   +-- ReadOnlyByteBuffer   same storage, writes rejected
//! ```
//!
//! Views (`slice`, `duplicate`, `as_read_only`) clone the [`SharedStorage`]
//! handle and copy or rebuild the cursor. Storage lives until the last view
//! holding it is dropped.
//!
//! # Byte order
//!
//! Multi-byte accessors encode with the buffer's [`ByteOrder`], which defaults
//! to little-endian regardless of the host. Use
//! [`ByteBuffer::set_order`] or a [`BufferConfig`](crate::BufferConfig) to
//! change it.

mod buffer_trait;
mod byte_buffer_trait;
mod cursor;
mod heap;
mod order;
mod read_only;
mod storage;

pub use buffer_trait::Buffer;
pub use byte_buffer_trait::ByteBuffer;
pub use cursor::Cursor;
pub use heap::HeapByteBuffer;
pub use order::{ByteOrder, FixedWidth, ParseByteOrderError, MAX_WIDTH};
pub use read_only::ReadOnlyByteBuffer;
pub use storage::SharedStorage;
