//! Exact and fixed-precision number types
//!
//! - [`Rational`]: i64 fraction kept in lowest terms
//! - [`FixedPoint`]: integer bit pattern scaled by `2^N`, the storage format
//!   of every fractional number in an ICC profile

mod fixed_point;
mod rational;

pub use fixed_point::{BitPattern, FixedPoint, S1Fixed14, S2Fixed30, S15Fixed16, U8Fixed8, U16Fixed16};
pub use rational::Rational;
