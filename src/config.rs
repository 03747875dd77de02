//! Buffer configuration: default byte order from code, environment or file.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic**: values set on [`BufferConfigBuilder`]
//! 2. **Environment variables**: `CURSORBUF_*` (when [`BufferConfigBuilder::with_env`] is used)
//! 3. **Config file**: a TOML file (requires the `config-file` feature)
//! 4. **Defaults**: [`BufferConfig::default()`] (little-endian)
//!
//! # Supported Environment Variables
//!
//! | Variable | Values | Maps to |
//! |----------|--------|---------|
//! | `CURSORBUF_BYTE_ORDER` | `big`, `little`, `native` (and long forms) | `byte_order` |
//!
//! # TOML Layout
//!
//! ```toml
//! [buffer]
//! byte_order = "big-endian"
//! ```

use crate::buffer::{ByteBuffer, ByteOrder, HeapByteBuffer, ParseByteOrderError};
use crate::error::Result;
use crate::tracing_compat::debug;
#[cfg(feature = "config-file")]
use std::path::{Path, PathBuf};

/// Environment variable name for the default byte order.
pub const ENV_BYTE_ORDER: &str = "CURSORBUF_BYTE_ORDER";

/// Errors raised while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set to an unparseable value.
    #[error("invalid value for {var}: {source}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ParseByteOrderError,
    },
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that failed to open or read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML or has wrong field types.
    #[error("failed to parse TOML config: {0}")]
    Parse(String),
}

/// Resolved buffer settings and a factory for configured buffers.
///
/// ```
/// use cursorbuf::{Buffer, BufferConfig, ByteBuffer, ByteOrder};
///
/// let config = BufferConfig::builder()
///     .byte_order(ByteOrder::BigEndian)
///     .build()
///     .unwrap();
/// let mut buf = config.allocate(4);
/// buf.put_i32(1).unwrap();
/// assert_eq!(buf.array().unwrap().to_vec(), vec![0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferConfig {
    /// Byte order given to every buffer this config creates.
    pub byte_order: ByteOrder,
}

impl BufferConfig {
    /// Starts a builder with no overrides.
    #[must_use]
    pub fn builder() -> BufferConfigBuilder {
        BufferConfigBuilder::default()
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::builder().with_env().build()
    }

    /// Allocates a zero-filled buffer in the configured byte order.
    #[must_use]
    pub fn allocate(&self, capacity: usize) -> HeapByteBuffer {
        HeapByteBuffer::allocate(capacity).with_order(self.byte_order)
    }

    /// Allocates a zero-filled buffer with the given limit.
    pub fn with_limit(&self, capacity: usize, limit: usize) -> Result<HeapByteBuffer> {
        let mut buf = HeapByteBuffer::with_limit(capacity, limit)?;
        buf.set_order(self.byte_order);
        Ok(buf)
    }

    /// Wraps a vector in the configured byte order.
    #[must_use]
    pub fn wrap(&self, bytes: Vec<u8>) -> HeapByteBuffer {
        HeapByteBuffer::wrap(bytes).with_order(self.byte_order)
    }
}

/// Builder for [`BufferConfig`].
#[derive(Debug, Clone, Default)]
pub struct BufferConfigBuilder {
    byte_order: Option<ByteOrder>,
    use_env: bool,
    #[cfg(feature = "config-file")]
    file: Option<PathBuf>,
}

impl BufferConfigBuilder {
    /// Sets the byte order. Takes precedence over env and file.
    #[must_use]
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }

    /// Applies `CURSORBUF_*` environment variables during [`build`](Self::build).
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Loads a TOML file during [`build`](Self::build).
    #[cfg(feature = "config-file")]
    #[must_use]
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Resolves every layer into a [`BufferConfig`].
    pub fn build(self) -> std::result::Result<BufferConfig, ConfigError> {
        let mut config = BufferConfig::default();
        #[cfg(feature = "config-file")]
        if let Some(path) = &self.file {
            let parsed = parse_toml_file(path)?;
            apply_toml_config(&mut config, &parsed);
        }
        if self.use_env {
            apply_env_overrides(&mut config)?;
        }
        if let Some(order) = self.byte_order {
            config.byte_order = order;
        }
        debug!(byte_order = %config.byte_order, "buffer config resolved");
        Ok(config)
    }
}

/// Apply environment variable overrides to a [`BufferConfig`].
///
/// Only variables that are set are applied. A set but unparseable value is an
/// error.
pub fn apply_env_overrides(config: &mut BufferConfig) -> std::result::Result<(), ConfigError> {
    if let Some(val) = read_env(ENV_BYTE_ORDER) {
        config.byte_order = parse_byte_order(ENV_BYTE_ORDER, &val)?;
        debug!(var = ENV_BYTE_ORDER, byte_order = %config.byte_order, "env override");
    }
    Ok(())
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_byte_order(
    var: &'static str,
    val: &str,
) -> std::result::Result<ByteOrder, ConfigError> {
    val.trim()
        .parse()
        .map_err(|source| ConfigError::InvalidEnv { var, source })
}

/// TOML-deserializable buffer configuration.
#[cfg(feature = "config-file")]
#[derive(serde::Deserialize, Default, Debug)]
pub struct BufferTomlConfig {
    /// `[buffer]` table.
    #[serde(default)]
    pub buffer: BufferToml,
}

/// `[buffer]` section of the TOML config.
#[cfg(feature = "config-file")]
#[derive(serde::Deserialize, Default, Debug)]
pub struct BufferToml {
    /// `"big-endian"` or `"little-endian"`.
    pub byte_order: Option<ByteOrder>,
}

/// Apply a parsed TOML config. Only `Some` fields override.
#[cfg(feature = "config-file")]
pub fn apply_toml_config(config: &mut BufferConfig, toml: &BufferTomlConfig) {
    if let Some(order) = toml.buffer.byte_order {
        config.byte_order = order;
    }
}

/// Parse a TOML string into a [`BufferTomlConfig`].
#[cfg(feature = "config-file")]
pub fn parse_toml_str(toml_str: &str) -> std::result::Result<BufferTomlConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Read and parse a TOML file into a [`BufferTomlConfig`].
#[cfg(feature = "config-file")]
pub fn parse_toml_file(path: &Path) -> std::result::Result<BufferTomlConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = parse_toml_str(&content)?;
    debug!(path = %path.display(), "loaded buffer config file");
    Ok(parsed)
}


#[cfg(all(test, feature = "config-file"))]
mod toml_tests {
    use super::*;

    #[test]
    fn parse_toml_byte_order() {
        let parsed = parse_toml_str(
            r#"
[buffer]
byte_order = "big-endian"
"#,
        )
        .expect("valid");
        assert_eq!(parsed.buffer.byte_order, Some(ByteOrder::BigEndian));
    }

    #[test]
    fn parse_toml_empty_config() {
        let parsed = parse_toml_str("").expect("valid");
        assert_eq!(parsed.buffer.byte_order, None);
    }

    #[test]
    fn parse_toml_invalid_value() {
        let err = parse_toml_str(
            r#"
[buffer]
byte_order = "sideways"
"#,
        )
        .expect_err("unknown variant");
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn toml_file_not_found() {
        let err = parse_toml_file(Path::new("/nonexistent/cursorbuf.toml")).expect_err("missing");
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn file_then_env_then_programmatic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cursorbuf.toml");
        std::fs::write(&path, "[buffer]\nbyte_order = \"big-endian\"\n").expect("write");

        let _guard = crate::test_utils::env_lock();
        std::env::remove_var(ENV_BYTE_ORDER);
        let from_file = BufferConfig::builder()
            .config_file(&path)
            .with_env()
            .build()
            .expect("valid");
        assert_eq!(from_file.byte_order, ByteOrder::BigEndian);

        std::env::set_var(ENV_BYTE_ORDER, "little");
        let env_wins = BufferConfig::builder()
            .config_file(&path)
            .with_env()
            .build()
            .expect("valid");
        std::env::remove_var(ENV_BYTE_ORDER);
        assert_eq!(env_wins.byte_order, ByteOrder::LittleEndian);

        let code_wins = BufferConfig::builder()
            .config_file(&path)
            .byte_order(ByteOrder::BigEndian)
            .build()
            .expect("valid");
        assert_eq!(code_wins.byte_order, ByteOrder::BigEndian);
    }
}
