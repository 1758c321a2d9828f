//! Binary fixed-point numbers
//!
//! `FixedPoint<B, N>` stores an integer bit pattern `B` and represents
//! `bits / 2^N`. ICC profiles use these for every fractional field:
//!
//! | ICC name       | Alias          |
//! |----------------|----------------|
//! | s15Fixed16     | [`S15Fixed16`] |
//! | u16Fixed16     | [`U16Fixed16`] |
//! | u8Fixed8       | [`U8Fixed8`]   |
//! | 2.14 (Lab v4)  | [`S1Fixed14`]  |
//! | 2.30           | [`S2Fixed30`]  |

use std::fmt;
use std::hash::Hash;

/// Integer storage for a [`FixedPoint`] value
pub trait BitPattern: Copy + Eq + Ord + Hash + Default + fmt::Debug + Send + Sync + 'static {
    /// Encoded width in bytes
    const BYTES: usize;

    fn to_f64(self) -> f64;

    /// Saturating conversion; NaN becomes zero.
    fn from_f64_saturating(value: f64) -> Self;

    /// Read from the first `BYTES` bytes, big-endian
    fn read_be(bytes: &[u8]) -> Option<Self>;

    fn write_be(self, out: &mut Vec<u8>);
}

macro_rules! impl_bit_pattern {
    ($($t:ty),*) => {
        $(
            impl BitPattern for $t {
                const BYTES: usize = std::mem::size_of::<$t>();

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64_saturating(value: f64) -> Self {
                    // float-to-int `as` saturates and maps NaN to 0
                    value as $t
                }

                fn read_be(bytes: &[u8]) -> Option<Self> {
                    let raw = bytes.get(..Self::BYTES)?.try_into().ok()?;
                    Some(<$t>::from_be_bytes(raw))
                }

                fn write_be(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_bit_pattern!(i16, u16, i32, u32, i64, u64);

/// A real number stored as `bits / 2^N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint<B: BitPattern, const N: u32> {
    bits: B,
}

/// ICC s15Fixed16Number
pub type S15Fixed16 = FixedPoint<i32, 16>;
/// ICC u16Fixed16Number
pub type U16Fixed16 = FixedPoint<u32, 16>;
/// ICC u8Fixed8Number
pub type U8Fixed8 = FixedPoint<u16, 8>;
/// Signed 2.14 used by v4 Lab encodings
pub type S1Fixed14 = FixedPoint<i16, 14>;
/// Signed 2.30
pub type S2Fixed30 = FixedPoint<i32, 30>;

impl<B: BitPattern, const N: u32> FixedPoint<B, N> {
    /// Number of fractional bits
    pub const FRACTION_BITS: u32 = N;

    const SCALE: f64 = (1u64 << N) as f64;

    pub const fn from_bits(bits: B) -> Self {
        Self { bits }
    }

    pub const fn bits(&self) -> B {
        self.bits
    }

    /// Nearest representable value, clamped to the pattern's range.
    pub fn from_f64(value: f64) -> Self {
        Self {
            bits: B::from_f64_saturating((value * Self::SCALE).round()),
        }
    }

    pub fn to_f64(self) -> f64 {
        self.bits.to_f64() / Self::SCALE
    }

    /// Parse from big-endian bytes; `None` when `bytes` is too short.
    pub fn from_be_bytes(bytes: &[u8]) -> Option<Self> {
        B::read_be(bytes).map(Self::from_bits)
    }

    /// Append the big-endian encoding to `out`
    pub fn write_be(self, out: &mut Vec<u8>) {
        self.bits.write_be(out);
    }
}

impl<B: BitPattern, const N: u32> From<FixedPoint<B, N>> for f64 {
    fn from(value: FixedPoint<B, N>) -> Self {
        value.to_f64()
    }
}

impl<B: BitPattern, const N: u32> fmt::Display for FixedPoint<B, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
