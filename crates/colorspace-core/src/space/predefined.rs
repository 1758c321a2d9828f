//! Process-wide standard color spaces
//!
//! Built lazily on first use and never mutated afterwards.

use std::sync::LazyLock;

use crate::color::{Chromaticity, PCS_ILLUMINANT};

use super::{CalibratedGrayColorSpace, CalibratedRgbColorSpace, CieXyzColorSpace, ToneCurve};

const D65: Chromaticity = Chromaticity::new(0.3127, 0.3290);

/// Adobe RGB (1998) gamma, 563/256
const ADOBE_GAMMA: f64 = 2.19921875;

pub static SRGB: LazyLock<CalibratedRgbColorSpace> = LazyLock::new(|| {
    CalibratedRgbColorSpace::srgb_like(
        CieXyzColorSpace::from_chromaticity(D65),
        Chromaticity::new(0.64, 0.33),
        Chromaticity::new(0.30, 0.60),
        Chromaticity::new(0.15, 0.06),
    )
    .expect("sRGB primaries are not degenerate")
});

pub static DISPLAY_P3: LazyLock<CalibratedRgbColorSpace> = LazyLock::new(|| {
    CalibratedRgbColorSpace::srgb_like(
        CieXyzColorSpace::from_chromaticity(D65),
        Chromaticity::new(0.680, 0.320),
        Chromaticity::new(0.265, 0.690),
        Chromaticity::new(0.150, 0.060),
    )
    .expect("Display P3 primaries are not degenerate")
});

/// Reference display: 160 cd/m² white, 0.5557 cd/m² black
pub static ADOBE_RGB: LazyLock<CalibratedRgbColorSpace> = LazyLock::new(|| {
    CalibratedRgbColorSpace::new(
        CieXyzColorSpace::with_black(D65.to_xyz(160.0), D65.to_xyz(0.5557), 160.0),
        Chromaticity::new(0.64, 0.33),
        Chromaticity::new(0.21, 0.71),
        Chromaticity::new(0.15, 0.06),
        ToneCurve::Gamma(ADOBE_GAMMA),
    )
    .expect("Adobe RGB primaries are not degenerate")
});

pub static GENERIC_GAMMA22_GRAY: LazyLock<CalibratedGrayColorSpace> = LazyLock::new(|| {
    CalibratedGrayColorSpace::with_gamma(CieXyzColorSpace::from_chromaticity(D65), 2.2)
        .expect("D65 gray white point is not degenerate")
});

/// The D50 profile connection space
pub static GENERIC_XYZ: LazyLock<CieXyzColorSpace> =
    LazyLock::new(|| CieXyzColorSpace::new(PCS_ILLUMINANT));

pub fn srgb() -> &'static CalibratedRgbColorSpace {
    &SRGB
}

pub fn display_p3() -> &'static CalibratedRgbColorSpace {
    &DISPLAY_P3
}

pub fn adobe_rgb() -> &'static CalibratedRgbColorSpace {
    &ADOBE_RGB
}

pub fn generic_gamma22_gray() -> &'static CalibratedGrayColorSpace {
    &GENERIC_GAMMA22_GRAY
}

pub fn generic_xyz() -> &'static CieXyzColorSpace {
    &GENERIC_XYZ
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, Xyz};
    use crate::space::ColorSpaceBase;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_same_instance() {
        assert!(std::ptr::eq(srgb(), srgb()));
        assert!(std::ptr::eq(generic_xyz(), &*GENERIC_XYZ));
    }

    #[test]
    fn test_adobe_red_linear_value() {
        let linear = adobe_rgb().to_linear(Rgb::new(0.5, 0.0, 0.0));
        assert!((linear.r - 0.21776).abs() < 1e-5, "{}", linear.r);
        assert_eq!(linear.g, 0.0);

        let back = adobe_rgb().from_linear(linear);
        assert!((back.r - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_adobe_black_point() {
        let black = adobe_rgb().convert_to_xyz(Rgb::default());
        assert!((black.y - 0.5557).abs() < EPSILON, "{:?}", black);
        let white = adobe_rgb().convert_to_xyz(Rgb::new(1.0, 1.0, 1.0));
        assert!((white.y - 160.0).abs() < 1e-7, "{:?}", white);
    }

    #[test]
    fn test_srgb_to_p3_gray_axis() {
        // same white point, so neutrals stay neutral
        for v in [0.0, 0.25, 0.5, 1.0] {
            let p3 = srgb().convert_to(display_p3(), Rgb::new(v, v, v));
            for c in p3.to_array() {
                assert!((c - v).abs() < 1e-9, "{} -> {:?}", v, p3);
            }
        }
    }

    #[test]
    fn test_gray_and_srgb_share_white() {
        let gray = generic_gamma22_gray().convert_to_xyz(1.0);
        let white = srgb().convert_to_xyz(Rgb::new(1.0, 1.0, 1.0));
        assert!(gray.approx_eq(&white, EPSILON));
    }

    #[test]
    fn test_generic_xyz_is_d50() {
        assert_eq!(generic_xyz().white(), PCS_ILLUMINANT);
        assert_eq!(generic_xyz().black(), Xyz::default());
    }
}
