//! CIE Standard Illuminants
//!
//! Chromaticities for the CIE 1931 2° standard observer. The [`cie1964`]
//! module carries the 10° observer values of the same illuminants.
//!
//! [`PCS_ILLUMINANT`] is the fixed D50 XYZ that ICC profiles use as the
//! profile connection space white; it differs slightly from the
//! chromaticity-derived D50.

use crate::color::{Chromaticity, Xyz};

/// A named illuminant chromaticity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illuminant {
    pub name: &'static str,
    pub point: Chromaticity,
}

impl Illuminant {
    pub const fn new(name: &'static str, x: f64, y: f64) -> Self {
        Self {
            name,
            point: Chromaticity::new(x, y),
        }
    }

    /// XYZ with Y = 1
    pub fn xyz(&self) -> Xyz {
        self.point.to_xyz(1.0)
    }
}

/// ICC profile connection space white (D50, s15Fixed16-exact)
pub const PCS_ILLUMINANT: Xyz = Xyz::new(0.9642, 1.0, 0.8249);

/// Incandescent, ~2856K
pub const A: Illuminant = Illuminant::new("A", 0.44757, 0.40745);
pub const B: Illuminant = Illuminant::new("B", 0.34842, 0.35161);
pub const C: Illuminant = Illuminant::new("C", 0.31006, 0.31616);
/// Horizon light, ~5003K
pub const D50: Illuminant = Illuminant::new("D50", 0.34567, 0.35850);
pub const D55: Illuminant = Illuminant::new("D55", 0.33242, 0.34743);
/// Noon daylight, ~6504K
pub const D65: Illuminant = Illuminant::new("D65", 0.31271, 0.32902);
pub const D75: Illuminant = Illuminant::new("D75", 0.29902, 0.31485);
/// Equal energy
pub const E: Illuminant = Illuminant::new("E", 1.0 / 3.0, 1.0 / 3.0);
pub const F1: Illuminant = Illuminant::new("F1", 0.31310, 0.33727);
pub const F2: Illuminant = Illuminant::new("F2", 0.37208, 0.37529);
pub const F3: Illuminant = Illuminant::new("F3", 0.40910, 0.39430);
pub const F4: Illuminant = Illuminant::new("F4", 0.44018, 0.40329);
pub const F5: Illuminant = Illuminant::new("F5", 0.31379, 0.34531);
pub const F6: Illuminant = Illuminant::new("F6", 0.37790, 0.38835);
pub const F7: Illuminant = Illuminant::new("F7", 0.31292, 0.32933);
pub const F8: Illuminant = Illuminant::new("F8", 0.34588, 0.35875);
pub const F9: Illuminant = Illuminant::new("F9", 0.37417, 0.37281);
pub const F10: Illuminant = Illuminant::new("F10", 0.34609, 0.35986);
pub const F11: Illuminant = Illuminant::new("F11", 0.38052, 0.37713);
pub const F12: Illuminant = Illuminant::new("F12", 0.43695, 0.40441);
pub const LED_B1: Illuminant = Illuminant::new("LED-B1", 0.4560, 0.4078);
pub const LED_B2: Illuminant = Illuminant::new("LED-B2", 0.4357, 0.4012);
pub const LED_B3: Illuminant = Illuminant::new("LED-B3", 0.3756, 0.3723);
pub const LED_B4: Illuminant = Illuminant::new("LED-B4", 0.3422, 0.3502);
pub const LED_B5: Illuminant = Illuminant::new("LED-B5", 0.3118, 0.3236);
pub const LED_BH1: Illuminant = Illuminant::new("LED-BH1", 0.4474, 0.4066);
pub const LED_RGB1: Illuminant = Illuminant::new("LED-RGB1", 0.4557, 0.4211);
pub const LED_V1: Illuminant = Illuminant::new("LED-V1", 0.4560, 0.4548);
pub const LED_V2: Illuminant = Illuminant::new("LED-V2", 0.3781, 0.3775);

/// Every CIE 1931 illuminant defined above
pub const ALL: [Illuminant; 29] = [
    A, B, C, D50, D55, D65, D75, E, F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, LED_B1,
    LED_B2, LED_B3, LED_B4, LED_B5, LED_BH1, LED_RGB1, LED_V1, LED_V2,
];

/// Look up a CIE 1931 illuminant by name (case-insensitive)
pub fn by_name(name: &str) -> Option<Illuminant> {
    ALL.iter()
        .find(|illuminant| illuminant.name.eq_ignore_ascii_case(name))
        .copied()
}

/// CIE 1964 10° observer chromaticities
pub mod cie1964 {
    use super::Illuminant;

    pub const A: Illuminant = Illuminant::new("A", 0.45117, 0.40594);
    pub const B: Illuminant = Illuminant::new("B", 0.34980, 0.35270);
    pub const C: Illuminant = Illuminant::new("C", 0.31039, 0.31905);
    pub const D50: Illuminant = Illuminant::new("D50", 0.34773, 0.35952);
    pub const D55: Illuminant = Illuminant::new("D55", 0.33411, 0.34877);
    pub const D65: Illuminant = Illuminant::new("D65", 0.31382, 0.33100);
    pub const D75: Illuminant = Illuminant::new("D75", 0.29968, 0.31740);
    pub const E: Illuminant = Illuminant::new("E", 1.0 / 3.0, 1.0 / 3.0);
    pub const F1: Illuminant = Illuminant::new("F1", 0.31811, 0.33559);
    pub const F2: Illuminant = Illuminant::new("F2", 0.37925, 0.36733);
    pub const F3: Illuminant = Illuminant::new("F3", 0.41761, 0.38324);
    pub const F4: Illuminant = Illuminant::new("F4", 0.44920, 0.39074);
    pub const F5: Illuminant = Illuminant::new("F5", 0.31975, 0.34246);
    pub const F6: Illuminant = Illuminant::new("F6", 0.38660, 0.37847);
    pub const F7: Illuminant = Illuminant::new("F7", 0.31569, 0.32960);
    pub const F8: Illuminant = Illuminant::new("F8", 0.34902, 0.35939);
    pub const F9: Illuminant = Illuminant::new("F9", 0.37829, 0.37045);
    pub const F10: Illuminant = Illuminant::new("F10", 0.35090, 0.35444);
    pub const F11: Illuminant = Illuminant::new("F11", 0.38541, 0.37123);
    pub const F12: Illuminant = Illuminant::new("F12", 0.44256, 0.39717);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d65_xyz() {
        let xyz = D65.xyz();
        assert!((xyz.x - 0.95043).abs() < 1e-4, "X = {}", xyz.x);
        assert_eq!(xyz.y, 1.0);
        assert!((xyz.z - 1.08890).abs() < 1e-4, "Z = {}", xyz.z);
    }

    #[test]
    fn test_d50_near_pcs() {
        assert!(D50.xyz().approx_eq(&PCS_ILLUMINANT, 1e-3));
    }

    #[test]
    fn test_equal_energy() {
        let e = E.xyz();
        assert!((e.x - 1.0).abs() < 1e-12);
        assert!((e.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(by_name("d65"), Some(D65));
        assert_eq!(by_name("F11").map(|i| i.point), Some(F11.point));
        assert!(by_name("D93").is_none());
        assert_ne!(cie1964::D65.point, D65.point);
    }
}
