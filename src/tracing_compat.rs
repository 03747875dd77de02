//! Logging facade for buffer internals.
//!
//! - **With `tracing-integration`**: re-exports the `tracing` event macros.
//! - **Without it**: no-op macros that expand to nothing.
//!
//! Buffer operations sit on hot paths, so only view creation, compaction,
//! bulk transfers and configuration resolution emit events, never per-byte
//! accessors.
//!
//! ```toml
//! cursorbuf = { version = "0.1", features = ["tracing-integration"] }
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    //! No-op event macros used when tracing is disabled.

    /// No-op trace-level event.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug-level event.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op warn-level event.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    pub use crate::{debug, trace, warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub use noop::*;
