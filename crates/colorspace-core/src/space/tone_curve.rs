//! Tone response curves
//!
//! `to_linear` decodes stored component values into linear light and
//! `from_linear` encodes them back. Both accept any real input: analytic
//! curves are mirrored around zero.

use crate::icc::IccCurve;
use crate::math::gamma::{ParametricCurve, extended_pow, srgb_from_linear, srgb_to_linear};

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToneCurve {
    /// Identity
    #[default]
    Linear,
    /// `sign(x) * |x|^g`
    Gamma(f64),
    /// IEC 61966-2-1 piecewise curve
    Srgb,
    /// Curve decoded from a profile, with its precomputed inverse
    Icc { forward: IccCurve, inverse: IccCurve },
}

impl ToneCurve {
    /// Wrap a profile curve, simplifying identity and pure gamma
    pub fn from_icc(curve: IccCurve) -> Self {
        match curve {
            IccCurve::Identity => Self::Linear,
            IccCurve::Gamma(g) if g == 1.0 => Self::Linear,
            IccCurve::Gamma(g) => Self::Gamma(g),
            other => {
                let inverse = other.inverse();
                Self::Icc {
                    forward: other,
                    inverse,
                }
            }
        }
    }

    #[inline]
    pub fn to_linear(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Gamma(g) => extended_pow(x, *g),
            Self::Srgb => srgb_to_linear(x),
            Self::Icc { forward, .. } => forward.eval(x),
        }
    }

    #[inline]
    pub fn from_linear(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Gamma(g) => extended_pow(x, 1.0 / g),
            Self::Srgb => srgb_from_linear(x),
            Self::Icc { inverse, .. } => inverse.eval(x),
        }
    }

    pub fn is_linear(&self) -> bool {
        match self {
            Self::Linear => true,
            Self::Gamma(g) => *g == 1.0,
            Self::Icc { forward, .. } => forward.is_identity(),
            Self::Srgb => false,
        }
    }

    /// The decode direction as an ICC curve
    pub fn icc_curve(&self) -> IccCurve {
        match self {
            Self::Linear => IccCurve::Identity,
            Self::Gamma(g) => IccCurve::Gamma(*g),
            Self::Srgb => IccCurve::Parametric(ParametricCurve::srgb()),
            Self::Icc { forward, .. } => forward.clone(),
        }
    }

    /// Type 0 for gamma, type 3 for sRGB; `None` for sampled curves
    pub fn icc_parametric_curve(&self) -> Option<ParametricCurve> {
        self.icc_curve().to_parametric()
    }
}
