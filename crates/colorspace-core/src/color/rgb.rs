//! RGB Color Primitives

use std::ops::{Add, Mul, Sub};

/// RGB color in floating point
///
/// Components are nominally in `[0, 1]` but are never clamped by conversions.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Self {
            r: arr[0],
            g: arr[1],
            b: arr[2],
        }
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from 8-bit values (0-255)
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to 8-bit values (0-255)
    #[inline]
    pub fn to_u8(&self) -> [u8; 3] {
        self.to_array()
            .map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Apply `f` to each channel with its index
    #[inline]
    pub fn map_channels(&self, f: impl Fn(usize, f64) -> f64) -> Self {
        Self::new(f(0, self.r), f(1, self.g), f(2, self.b))
    }

    #[inline]
    pub fn clamp(&self) -> Self {
        self.map_channels(|_, v| v.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn is_in_gamut(&self) -> bool {
        self.to_array().iter().all(|v| (0.0..=1.0).contains(v))
    }

    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for Rgb {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f64> for Rgb {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_roundtrip() {
        let rgb = Rgb::from_u8(255, 128, 0);
        assert_eq!(rgb.to_u8(), [255, 128, 0]);
    }

    #[test]
    fn test_clamp_and_gamut() {
        let rgb = Rgb::new(-0.1, 0.5, 1.2);
        assert!(!rgb.is_in_gamut());
        assert_eq!(rgb.clamp(), Rgb::new(0.0, 0.5, 1.0));
        assert!(rgb.clamp().is_in_gamut());
    }

    #[test]
    fn test_map_channels_passes_index() {
        let rgb = Rgb::new(1.0, 1.0, 1.0).map_channels(|i, v| v * (i + 1) as f64);
        assert_eq!(rgb, Rgb::new(1.0, 2.0, 3.0));
    }
}
