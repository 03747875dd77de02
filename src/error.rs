//! Error types for buffer contract violations.
//!
//! Every failure in this crate is a violated precondition reported at the
//! point of the check. Errors are never retried or recovered internally, and
//! a buffer is left exactly as it was before the failing call: checks always
//! precede mutation.
//!
//! # Error Categories
//!
//! - **Argument**: out-of-range arguments (`IllegalArgument`, `InvalidMark`)
//! - **Bounds**: cursor or index bounds (`IndexOutOfBounds`,
//!   `BufferUnderflow`, `BufferOverflow`)
//! - **Capability**: operation not supported by this buffer kind
//!   (`ReadOnlyBuffer`, `UnsupportedOperation`)

use core::fmt;

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // === Arguments ===
    /// Caller supplied an out-of-range argument (position past limit,
    /// limit past capacity, mark past position).
    IllegalArgument,
    /// `reset` was called while no mark was set.
    InvalidMark,

    // === Bounds ===
    /// An absolute index or bulk range falls outside its valid window.
    IndexOutOfBounds,
    /// A relative read needs more bytes than remain.
    BufferUnderflow,
    /// A relative write needs more space than remains.
    BufferOverflow,

    // === Capabilities ===
    /// A mutating operation was invoked on a read-only view.
    ReadOnlyBuffer,
    /// Array access was requested from a buffer with no accessible array.
    UnsupportedOperation,
}

impl ErrorKind {
    /// Returns the error category for this kind.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::IllegalArgument | Self::InvalidMark => ErrorCategory::Argument,
            Self::IndexOutOfBounds | Self::BufferUnderflow | Self::BufferOverflow => {
                ErrorCategory::Bounds
            }
            Self::ReadOnlyBuffer | Self::UnsupportedOperation => ErrorCategory::Capability,
        }
    }
}

/// High-level error category for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid arguments or cursor state.
    Argument,
    /// Cursor or index bounds violations.
    Bounds,
    /// Operation unavailable on this buffer kind.
    Capability,
}

/// The error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Adds a message description to the error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if this is a bounds violation (index, underflow, overflow).
    #[must_use]
    pub const fn is_bounds_error(&self) -> bool {
        matches!(self.kind.category(), ErrorCategory::Bounds)
    }

    /// Creates an illegal argument error.
    #[must_use]
    pub fn illegal_argument(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalArgument).with_message(detail)
    }

    /// Creates an invalid mark error.
    #[must_use]
    pub const fn invalid_mark() -> Self {
        Self::new(ErrorKind::InvalidMark)
    }

    /// Creates an index out of bounds error for `len` bytes at `index`.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, len: usize, bound: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds).with_message(format!(
            "index {index} (+{len}) out of bounds for limit {bound}"
        ))
    }

    /// Creates an out-of-range error for a bulk `[offset, offset + length)`
    /// window over an array of `size` bytes.
    #[must_use]
    pub fn range_out_of_bounds(offset: usize, length: usize, size: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds).with_message(format!(
            "range {offset}+{length} out of bounds for array of {size} bytes"
        ))
    }

    /// Creates a buffer underflow error.
    #[must_use]
    pub fn underflow(needed: usize, remaining: usize) -> Self {
        Self::new(ErrorKind::BufferUnderflow)
            .with_message(format!("need {needed} bytes, {remaining} remaining"))
    }

    /// Creates a buffer overflow error.
    #[must_use]
    pub fn overflow(needed: usize, remaining: usize) -> Self {
        Self::new(ErrorKind::BufferOverflow)
            .with_message(format!("need {needed} bytes, {remaining} remaining"))
    }

    /// Creates a read-only buffer error.
    #[must_use]
    pub const fn read_only() -> Self {
        Self::new(ErrorKind::ReadOnlyBuffer)
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported(operation: &str) -> Self {
        Self::new(ErrorKind::UnsupportedOperation)
            .with_message(format!("{operation} is not supported by this buffer"))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized Result type for buffer operations.
pub type Result<T> = core::result::Result<T, Error>;
