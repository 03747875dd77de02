//! Byte order and fixed-width primitive encoding.

use core::fmt;
use core::str::FromStr;

/// Byte order used by the typed accessors of a buffer.
///
/// Each buffer carries its own order; nothing is inherited from the host
/// platform unless [`ByteOrder::native`] is asked for explicitly. The default
/// is little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "kebab-case"))]
pub enum ByteOrder {
    /// Most significant byte first.
    BigEndian,
    /// Least significant byte first.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Returns the byte order of the target platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigEndian => f.write_str("big-endian"),
            Self::LittleEndian => f.write_str("little-endian"),
        }
    }
}

/// Error returned when a byte order name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown byte order {0:?} (expected big, little or native)")]
pub struct ParseByteOrderError(String);

impl FromStr for ByteOrder {
    type Err = ParseByteOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "big" | "be" | "big-endian" | "big_endian" | "network" => Ok(Self::BigEndian),
            "little" | "le" | "little-endian" | "little_endian" => Ok(Self::LittleEndian),
            "native" | "ne" => Ok(Self::native()),
            _ => Err(ParseByteOrderError(s.to_owned())),
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// Widest primitive handled by [`FixedWidth`], in bytes.
pub const MAX_WIDTH: usize = 8;

/// A primitive with a fixed encoded width.
///
/// Sealed: implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`,
/// `i64`, `f32` and `f64`. Floats are encoded through their IEEE-754 bit
/// patterns, so NaN payloads survive a round trip.
pub trait FixedWidth: Copy + private::Sealed {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Decodes a value from the first `WIDTH` bytes of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `WIDTH`.
    fn decode(order: ByteOrder, src: &[u8]) -> Self;

    /// Encodes the value into the first `WIDTH` bytes of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `WIDTH`.
    fn encode(self, order: ByteOrder, dst: &mut [u8]);
}

macro_rules! fixed_width {
    ($($ty:ty => $width:literal),* $(,)?) => {$(
        impl private::Sealed for $ty {}

        impl FixedWidth for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn decode(order: ByteOrder, src: &[u8]) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&src[..$width]);
                match order {
                    ByteOrder::BigEndian => <$ty>::from_be_bytes(raw),
                    ByteOrder::LittleEndian => <$ty>::from_le_bytes(raw),
                }
            }

            #[inline]
            fn encode(self, order: ByteOrder, dst: &mut [u8]) {
                let raw = match order {
                    ByteOrder::BigEndian => self.to_be_bytes(),
                    ByteOrder::LittleEndian => self.to_le_bytes(),
                };
                dst[..$width].copy_from_slice(&raw);
            }
        }
    )*};
}

fixed_width! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
}
