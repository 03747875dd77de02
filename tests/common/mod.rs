#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use cursorbuf::{Buffer, ByteBuffer, ByteOrder, Cursor, Error, Result, SharedStorage};
use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Default seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED5EED;

const PROPTEST_SEED_ENV: &str = "CURSORBUF_PROPTEST_SEED";
const PROPTEST_MAX_SHRINK_ITERS_ENV: &str = "CURSORBUF_PROPTEST_MAX_SHRINK_ITERS";

/// Configuration for property tests with optional deterministic seed support.
#[derive(Debug, Clone)]
pub struct PropertyTestConfig {
    /// Fixed seed for reproducibility (overrides CI default when set).
    pub seed: Option<u64>,
    /// Number of successful cases required.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl PropertyTestConfig {
    /// Build a config with defaults for property tests.
    #[must_use]
    pub fn new(cases: u32) -> Self {
        Self {
            seed: read_proptest_seed(),
            cases,
            max_shrink_iters: read_max_shrink_iters()
                .unwrap_or(ProptestConfig::default().max_shrink_iters),
        }
    }

    /// Convert into a ProptestConfig, applying deterministic seed rules.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        let mut config = ProptestConfig::with_cases(self.cases);

        // Honor existing PROPTEST_RNG_SEED, otherwise apply our own.
        if matches!(config.rng_seed, RngSeed::Random) {
            if let Some(seed) = self.seed {
                config.rng_seed = RngSeed::Fixed(seed);
            }
        }

        config.max_shrink_iters = self.max_shrink_iters;
        config
    }
}

/// Build a ProptestConfig with deterministic seed support for CI.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    PropertyTestConfig::new(cases).to_proptest_config()
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }

    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }

    None
}

fn read_max_shrink_iters() -> Option<u32> {
    std::env::var(PROPTEST_MAX_SHRINK_ITERS_ENV)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
}

/// Initialize test logging with trace-level output.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log a section within a test phase.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        tracing::debug!(section = %$name, "--- {} ---", $name);
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info!(
            test = %$name,
            $($key = %$value,)*
            "test completed successfully: {}",
            $name
        );
    };
}

/// Log before assertions for context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "Asserting: {}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}

// ============================================================================
// Mock buffers
// ============================================================================

/// A buffer that claims to live outside heap storage.
///
/// Holds its bytes privately and exposes no array, so a heap buffer pulling
/// from it takes the direct-transfer path. Counts bulk reads so tests can
/// tell which path ran.
pub struct MockDirectBuffer {
    bytes: Vec<u8>,
    cursor: Cursor,
    order: ByteOrder,
    pub bulk_reads: usize,
}

impl MockDirectBuffer {
    /// Wrap `bytes` with position 0 and limit at the end.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        let cursor = Cursor::full(bytes.len());
        Self {
            bytes,
            cursor,
            order: ByteOrder::default(),
            bulk_reads: 0,
        }
    }
}

impl Buffer for MockDirectBuffer {
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn has_array(&self) -> bool {
        false
    }

    fn array(&self) -> Result<SharedStorage> {
        Err(Error::unsupported("array"))
    }

    fn array_offset(&self) -> Result<usize> {
        Err(Error::unsupported("array_offset"))
    }

    fn is_direct(&self) -> bool {
        true
    }
}

impl ByteBuffer for MockDirectBuffer {
    fn order(&self) -> ByteOrder {
        self.order
    }

    fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    fn load(&self, index: usize, dst: &mut [u8]) {
        dst.copy_from_slice(&self.bytes[index..index + dst.len()]);
    }

    fn store(&mut self, index: usize, src: &[u8]) -> Result<()> {
        self.bytes[index..index + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn compact(&mut self) -> Result<()> {
        let (pos, lim) = (self.cursor.position(), self.cursor.limit());
        self.bytes.copy_within(pos..lim, 0);
        let capacity = self.cursor.capacity();
        self.cursor
            .set_limit(capacity)?
            .set_position(lim - pos)?
            .discard_mark();
        Ok(())
    }

    fn slice(&self) -> Self {
        Self::new(self.remaining_to_vec())
    }

    fn duplicate(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            cursor: self.cursor,
            order: self.order,
            bulk_reads: 0,
        }
    }

    fn get_slice(&mut self, dst: &mut [u8], offset: usize, length: usize) -> Result<()> {
        Cursor::check_bounds(offset, length, dst.len())?;
        let index = self.cursor.next_get_index(length)?;
        dst[offset..offset + length].copy_from_slice(&self.bytes[index..index + length]);
        self.bulk_reads += 1;
        Ok(())
    }
}

/// A writable buffer with neither an array nor direct memory.
///
/// Forces the byte-by-byte transfer fallback.
pub struct OpaqueBuffer {
    inner: MockDirectBuffer,
}

impl OpaqueBuffer {
    /// Wrap `bytes` with position 0 and limit at the end.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: MockDirectBuffer::new(bytes),
        }
    }

    /// Bulk reads observed so far.
    #[must_use]
    pub fn bulk_reads(&self) -> usize {
        self.inner.bulk_reads
    }
}

impl Buffer for OpaqueBuffer {
    fn cursor(&self) -> &Cursor {
        self.inner.cursor()
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        self.inner.cursor_mut()
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn has_array(&self) -> bool {
        false
    }

    fn array(&self) -> Result<SharedStorage> {
        Err(Error::unsupported("array"))
    }

    fn array_offset(&self) -> Result<usize> {
        Err(Error::unsupported("array_offset"))
    }

    fn is_direct(&self) -> bool {
        false
    }
}

impl ByteBuffer for OpaqueBuffer {
    fn order(&self) -> ByteOrder {
        self.inner.order()
    }

    fn set_order(&mut self, order: ByteOrder) {
        self.inner.set_order(order);
    }

    fn load(&self, index: usize, dst: &mut [u8]) {
        self.inner.load(index, dst);
    }

    fn store(&mut self, index: usize, src: &[u8]) -> Result<()> {
        self.inner.store(index, src)
    }

    fn compact(&mut self) -> Result<()> {
        self.inner.compact()
    }

    fn slice(&self) -> Self {
        Self {
            inner: self.inner.slice(),
        }
    }

    fn duplicate(&self) -> Self {
        Self {
            inner: self.inner.duplicate(),
        }
    }

    fn get_slice(&mut self, dst: &mut [u8], offset: usize, length: usize) -> Result<()> {
        self.inner.get_slice(dst, offset, length)
    }
}

/// A direct buffer that reads from storage owned by someone else.
///
/// Models off-heap memory mapped over the same region a heap buffer uses,
/// so a transfer into that heap buffer reads and writes one region.
pub struct StorageDirectBuffer {
    storage: SharedStorage,
    cursor: Cursor,
}

impl StorageDirectBuffer {
    /// View `storage[0..len)` with position 0 and limit `len`.
    #[must_use]
    pub fn new(storage: SharedStorage, len: usize) -> Self {
        Self {
            storage,
            cursor: Cursor::full(len),
        }
    }
}

impl Buffer for StorageDirectBuffer {
    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn has_array(&self) -> bool {
        false
    }

    fn array(&self) -> Result<SharedStorage> {
        Err(Error::unsupported("array"))
    }

    fn array_offset(&self) -> Result<usize> {
        Err(Error::unsupported("array_offset"))
    }

    fn is_direct(&self) -> bool {
        true
    }
}

impl ByteBuffer for StorageDirectBuffer {
    fn order(&self) -> ByteOrder {
        ByteOrder::default()
    }

    fn set_order(&mut self, _order: ByteOrder) {}

    fn load(&self, index: usize, dst: &mut [u8]) {
        self.storage
            .with(|bytes| dst.copy_from_slice(&bytes[index..index + dst.len()]));
    }

    fn store(&mut self, index: usize, src: &[u8]) -> Result<()> {
        self.storage
            .with_mut(|bytes| bytes[index..index + src.len()].copy_from_slice(src));
        Ok(())
    }

    fn compact(&mut self) -> Result<()> {
        Err(Error::unsupported("compact"))
    }

    fn slice(&self) -> Self {
        Self::new(self.storage.clone(), self.remaining())
    }

    fn duplicate(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            cursor: self.cursor,
        }
    }
}
