//! Accuracy measurement using perceptual color difference metrics
//!
//! Colors are compared as CIEDE2000 distances in Lab. Inputs are normalized
//! XYZ (white Y = 1) relative to D65.

use colorspace_core::Xyz;
use palette::color_difference::Ciede2000;
use palette::white_point::D65;
use palette::{FromColor, Lab};

/// Statistics from a deltaE comparison
#[derive(Debug, Clone)]
pub struct DeltaEStats {
    /// Mean deltaE across all samples
    pub mean: f64,
    /// Maximum deltaE
    pub max: f64,
    /// Number of samples
    pub count: usize,
}

impl DeltaEStats {
    /// Check if all differences are imperceptible (deltaE < 1.0)
    pub fn is_excellent(&self) -> bool {
        self.max < 1.0
    }
}

fn to_lab(xyz: Xyz) -> Lab<D65, f64> {
    Lab::from_color(palette::Xyz::<D65, f64>::new(xyz.x, xyz.y, xyz.z))
}

/// CIEDE2000 between two normalized D65 XYZ colors
pub fn delta_e_2000(a: Xyz, b: Xyz) -> f64 {
    to_lab(a).difference(to_lab(b))
}

/// Pairwise deltaE statistics
///
/// # Panics
///
/// If the slices differ in length.
pub fn compare_xyz(expected: &[Xyz], actual: &[Xyz]) -> DeltaEStats {
    assert_eq!(expected.len(), actual.len(), "sample counts differ");

    let (sum, max) = expected
        .iter()
        .zip(actual)
        .map(|(e, a)| delta_e_2000(*e, *a))
        .fold((0.0, 0.0f64), |(sum, max), d| (sum + d, max.max(d)));

    DeltaEStats {
        mean: if expected.is_empty() { 0.0 } else { sum / expected.len() as f64 },
        max,
        count: expected.len(),
    }
}
