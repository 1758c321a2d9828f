//! Exact rational arithmetic
//!
//! Values are stored reduced with a non-negative denominator. `0/0` is the
//! NaN sentinel produced from non-finite floats.
//!
//! Products of numerators and denominators are computed with wrapping i64
//! arithmetic. Operands whose cross products exceed `i64` silently overflow;
//! callers working with large magnitudes must bound their inputs.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A fraction of two `i64` values in lowest terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Rewrites both operands over a shared denominator.
///
/// Returns `(lhs_numerator, rhs_numerator, denominator)`.
fn common_denom(lhs: Rational, rhs: Rational) -> (i64, i64, i64) {
    let g = gcd(lhs.denominator.unsigned_abs(), rhs.denominator.unsigned_abs()).max(1) as i64;
    let d1 = lhs.denominator / g;
    let d2 = rhs.denominator / g;
    (
        lhs.numerator.wrapping_mul(d2),
        rhs.numerator.wrapping_mul(d1),
        lhs.denominator.wrapping_mul(d2),
    )
}

impl Rational {
    /// Zero
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// One
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// The `0/0` sentinel
    pub const NAN: Self = Self {
        numerator: 0,
        denominator: 0,
    };

    /// Create a reduced fraction.
    ///
    /// A numerator or denominator of 0 or ±1 skips the gcd step; the sign is
    /// still moved onto the numerator. Every zero is stored as `0/1` so that
    /// equality and hashing agree with ordering.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        if numerator == 0 && denominator != 0 {
            return Self::ZERO;
        }
        let (numerator, denominator) = if denominator < 0 {
            (numerator.wrapping_neg(), denominator.wrapping_neg())
        } else {
            (numerator, denominator)
        };

        if numerator.unsigned_abs() == 1 || denominator == 0 || denominator == 1 {
            return Self {
                numerator,
                denominator,
            };
        }

        let common = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i64;
        Self {
            numerator: numerator / common,
            denominator: denominator / common,
        }
    }

    /// Convert a double exactly.
    ///
    /// The IEEE significand (with its implicit leading bit) becomes the
    /// numerator and the binary exponent a power-of-two numerator or
    /// denominator. NaN and infinities map to `0/0`. Magnitudes beyond
    /// `i64` saturate, and denominators beyond `2^62` drop low significand
    /// bits.
    pub fn from_f64(value: f64) -> Self {
        if value == 0.0 {
            return Self::ZERO;
        }
        if !value.is_finite() {
            return Self::NAN;
        }

        const SIGNIFICAND_BITS: u32 = 52;
        const BIAS: u64 = 1 << SIGNIFICAND_BITS;

        let bits = value.to_bits();
        let biased_exponent = ((bits >> SIGNIFICAND_BITS) & 0x7ff) as i32;
        let fraction = bits & (BIAS - 1);

        let (mut significand, mut exponent) = if biased_exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | BIAS, biased_exponent - 1075)
        };

        let trailing = significand.trailing_zeros();
        significand >>= trailing;
        exponent += trailing as i32;

        let sign = if value.is_sign_negative() { -1 } else { 1 };

        if exponent >= 0 {
            let width = 64 - significand.leading_zeros() as i32;
            if width + exponent > 63 {
                return Self::new(sign * i64::MAX, 1);
            }
            return Self::new(sign * (significand << exponent) as i64, 1);
        }

        let mut shift = -exponent;
        if shift > 62 {
            significand >>= (shift - 62).min(63);
            shift = 62;
        }
        if significand == 0 {
            return Self::ZERO;
        }
        Self::new(sign * significand as i64, 1i64 << shift)
    }

    /// Numerator (carries the sign)
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Denominator (never negative)
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// True for the `0/0` sentinel
    pub fn is_nan(&self) -> bool {
        self.numerator == 0 && self.denominator == 0
    }

    /// Nearest double
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn abs(&self) -> Self {
        Self::new(self.numerator.wrapping_abs(), self.denominator)
    }

    pub fn recip(&self) -> Self {
        Self::new(self.denominator, self.numerator)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl From<f64> for Rational {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Rational> for f64 {
    fn from(value: Rational) -> Self {
        value.to_f64()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl PartialOrd for Rational {
    /// NaN is unordered; everything else compares over the common denominator.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        let (n1, n2, _) = common_denom(*self, *other);
        Some(n1.cmp(&n2))
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: self.numerator.wrapping_neg(),
            denominator: self.denominator,
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let (n1, n2, denom) = common_denom(self, rhs);
        Self::new(n1.wrapping_add(n2), denom)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let (n1, n2, denom) = common_denom(self, rhs);
        Self::new(n1.wrapping_sub(n2), denom)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.numerator.wrapping_mul(rhs.numerator),
            self.denominator.wrapping_mul(rhs.denominator),
        )
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.numerator.wrapping_mul(rhs.denominator),
            self.denominator.wrapping_mul(rhs.numerator),
        )
    }
}

macro_rules! assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Rational {
            fn $method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

assign_op!(AddAssign, add_assign, +);
assign_op!(SubAssign, sub_assign, -);
assign_op!(MulAssign, mul_assign, *);
assign_op!(DivAssign, div_assign, /);
