//! Mathematical operations for color conversion
//!
//! This module provides:
//! - 3x3 and affine 3x4 matrices for XYZ normalization and RGB↔XYZ transforms
//! - Gamma, sRGB and ICC parametric transfer functions
//! - Chromatic adaptation (Bradford, Von Kries, XYZ scaling)

pub mod chromatic_adaptation;
pub mod gamma;
pub mod matrix;

pub use chromatic_adaptation::{ChromaticAdaptationMethod, adapt_xyz, adaptation_matrix};
pub use gamma::{
    ParametricCurve, ParametricCurveType, extended, extended_pow, srgb_from_linear,
    srgb_to_linear,
};
pub use matrix::{Matrix3x3, Matrix3x4};
