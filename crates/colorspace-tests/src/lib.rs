//! # colorspace-tests
//!
//! Integration tests for colorspace-core.
//!
//! This crate provides:
//! - Comparisons against lcms2 for ICC export and import
//! - Comparisons against palette for sRGB conversion
//! - Seeded sample generators for sweeps
//!
//! ## Reference Implementations
//!
//! - **lcms2**: Industry standard, full ICC support
//! - **palette**: Pure Rust color science, sRGB and CIEDE2000

pub mod accuracy;
pub mod patterns;
pub mod reference;

pub use accuracy::{DeltaEStats, compare_xyz, delta_e_2000};
