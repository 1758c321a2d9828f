//! Color value types
//!
//! This module provides:
//! - CIE XYZ tristimulus values and xy chromaticity
//! - RGB triples
//! - Standard illuminant chromaticities

pub mod illuminant;
pub mod rgb;
pub mod xyz;

pub use illuminant::{Illuminant, PCS_ILLUMINANT};
pub use rgb::Rgb;
pub use xyz::{Chromaticity, Xyz};
