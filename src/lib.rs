//! Cursorbuf: fixed-capacity byte buffers with a cursor protocol.
//!
//! # Overview
//!
//! A buffer is a bounded region of bytes plus four integers that drive every
//! read and write:
//!
//! - **capacity**: total addressable size, fixed at construction
//! - **limit**: exclusive bound for reads and writes
//! - **position**: next index used by relative operations
//! - **mark**: an optional saved position restorable with `reset`
//!
//! The relation `mark <= position <= limit <= capacity` holds after every
//! operation. Producers fill a buffer with relative puts, `flip` it, and
//! consumers drain it with relative gets or read at absolute offsets.
//!
//! # Module Structure
//!
//! - [`buffer`]: Cursor state machine, buffer traits, heap-backed and
//!   read-only buffers, byte order codec
//! - [`config`]: Byte order configuration and buffer factory
//! - [`error`]: Error kinds for contract violations
//! - [`tracing_compat`]: Structured logging facade (no-op unless the
//!   `tracing-integration` feature is enabled)
//!
//! # Example
//!
//! ```
//! use cursorbuf::{Buffer, ByteBuffer, HeapByteBuffer};
//!
//! let mut buf = HeapByteBuffer::allocate(8);
//! buf.put_i32(0x0102_0304).unwrap();
//! buf.flip();
//! assert_eq!(buf.get_i32().unwrap(), 0x0102_0304);
//! assert_eq!(buf.remaining(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod tracing_compat;

#[cfg(test)]
pub(crate) mod test_utils;

pub use buffer::{
    Buffer, ByteBuffer, ByteOrder, Cursor, FixedWidth, HeapByteBuffer, ReadOnlyByteBuffer,
    SharedStorage,
};
pub use config::{BufferConfig, BufferConfigBuilder, ConfigError};
pub use error::{Error, ErrorCategory, ErrorKind, Result};
