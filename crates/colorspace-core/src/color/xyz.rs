//! CIE XYZ tristimulus values and xy chromaticity
//!
//! Every color space in this crate converts through [`Xyz`]. A [`Chromaticity`]
//! is the luminance-free projection of an XYZ value and is how white points
//! and primaries are usually published.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// CIE 1931 XYZ color coordinates
///
/// Y carries luminance. The layout is `#[repr(C)]` so slices can be cast to
/// `&[f64]` with bytemuck.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// XYZ at the given chromaticity with `Y = luminance`
    #[inline]
    pub fn from_chromaticity(point: Chromaticity, luminance: f64) -> Self {
        point.to_xyz(luminance)
    }

    /// The Y component
    #[inline]
    pub const fn luminance(&self) -> f64 {
        self.y
    }

    /// xy chromaticity; the origin maps to (0, 0)
    #[inline]
    pub fn point(&self) -> Chromaticity {
        let sum = self.x + self.y + self.z;
        if sum == 0.0 {
            Chromaticity::new(0.0, 0.0)
        } else {
            Chromaticity::new(self.x / sum, self.y / sum)
        }
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Bit-level identity, distinguishing `0.0` from `-0.0`
    #[inline]
    pub(crate) fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl From<[f64; 3]> for Xyz {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Xyz> for [f64; 3] {
    fn from(xyz: Xyz) -> Self {
        xyz.to_array()
    }
}

impl Add for Xyz {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Xyz {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Xyz {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Xyz {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<f64> for Xyz {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// CIE xy chromaticity coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
}

impl Chromaticity {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The implied third coordinate, `1 - x - y`
    #[inline]
    pub fn z(&self) -> f64 {
        1.0 - self.x - self.y
    }

    /// Absolute XYZ with the given Y
    ///
    /// A zero `y` yields the origin.
    #[inline]
    pub fn to_xyz(&self, luminance: f64) -> Xyz {
        if self.y == 0.0 {
            return Xyz::default();
        }
        let scale = luminance / self.y;
        Xyz::new(self.x * scale, luminance, self.z() * scale)
    }

    /// `(x, y, 1 - x - y)`
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_array_conversion() {
        let arr = [0.1, 0.2, 0.3];
        let xyz = Xyz::from_array(arr);
        assert_eq!(xyz.to_array(), arr);

        let xyz2: Xyz = arr.into();
        assert_eq!(xyz, xyz2);
    }

    #[test]
    fn test_chromaticity_roundtrip() {
        let original = Xyz::new(0.5, 0.6, 0.7);
        let back = original.point().to_xyz(original.luminance());
        assert!(original.approx_eq(&back, EPSILON));
    }

    #[test]
    fn test_d65_chromaticity() {
        let d65 = Chromaticity::new(0.3127, 0.3290).to_xyz(1.0);
        assert!((d65.x - 0.95046).abs() < 1e-4, "X = {}", d65.x);
        assert_eq!(d65.y, 1.0);
        assert!((d65.z - 1.08906).abs() < 1e-4, "Z = {}", d65.z);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(Xyz::default().point(), Chromaticity::new(0.0, 0.0));
        assert_eq!(Chromaticity::new(0.3, 0.0).to_xyz(1.0), Xyz::default());
    }

    #[test]
    fn test_operators() {
        let a = Xyz::new(1.0, 2.0, 3.0);
        let b = Xyz::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Xyz::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Xyz::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Xyz::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Xyz::new(0.5, 1.0, 1.5));
        assert_eq!(-b, Xyz::new(-0.5, -0.5, -0.5));
    }

    #[test]
    fn test_pod_cast() {
        let values = [Xyz::new(1.0, 2.0, 3.0), Xyz::new(4.0, 5.0, 6.0)];
        let flat: &[f64] = bytemuck::cast_slice(&values);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
