//! Gamma and transfer function operations
//!
//! This module provides:
//! - sign-preserving ("extended") power functions
//! - the sRGB piecewise transfer function
//! - ICC parametric curve types 0-4 with closed-form inverses
//!
//! Every function here accepts values outside `[0, 1]`. Negative inputs are
//! mirrored through the curve's value at zero, `f(-x) = 2 f(0) - f(x)`, so
//! out-of-gamut components survive a round trip instead of turning into NaN.
//! For curves through the origin this is the odd extension `f(-x) = -f(x)`.

/// Apply `curve` to non-negative `x`, point-mirrored around `(0, curve(0))`
/// below zero
#[inline]
pub fn extended(x: f64, curve: impl Fn(f64) -> f64) -> f64 {
    if x < 0.0 {
        let origin = curve(0.0);
        let origin = if origin.is_finite() { origin } else { 0.0 };
        2.0 * origin - curve(-x)
    } else {
        curve(x)
    }
}

/// `sign(x) * |x|^exponent`
#[inline]
pub fn extended_pow(x: f64, exponent: f64) -> f64 {
    extended(x, |v| v.powf(exponent))
}

/// sRGB decode (encoded → linear)
///
/// IEC 61966-2-1: linear segment below 0.04045.
#[inline]
pub fn srgb_to_linear(encoded: f64) -> f64 {
    extended(encoded, |x| {
        if x <= 0.04045 {
            x / 12.92
        } else {
            ((x + 0.055) / 1.055).powf(2.4)
        }
    })
}

/// sRGB encode (linear → encoded)
///
/// IEC 61966-2-1: linear segment below 0.0031308.
#[inline]
pub fn srgb_from_linear(linear: f64) -> f64 {
    extended(linear, |x| {
        if x <= 0.0031308 {
            x * 12.92
        } else {
            1.055 * x.powf(1.0 / 2.4) - 0.055
        }
    })
}

/// ICC Parametric Curve Type
///
/// As defined in ICC.1:2022 Section 10.18
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParametricCurveType {
    /// Type 0: Y = X^g
    Gamma,
    /// Type 1: Y = (aX + b)^g  if X >= -b/a, else 0
    CIE122,
    /// Type 2: Y = (aX + b)^g + c  if X >= -b/a, else c
    IEC61966_3,
    /// Type 3: Y = (aX + b)^g  if X >= d, else cX (sRGB-like)
    IEC61966_2_1,
    /// Type 4: Y = (aX + b)^g + e  if X >= d, else cX + f
    Full,
}

impl ParametricCurveType {
    /// Map the `para` function type field
    pub fn from_icc(function_type: u16) -> Option<Self> {
        match function_type {
            0 => Some(Self::Gamma),
            1 => Some(Self::CIE122),
            2 => Some(Self::IEC61966_3),
            3 => Some(Self::IEC61966_2_1),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn to_icc(self) -> u16 {
        match self {
            Self::Gamma => 0,
            Self::CIE122 => 1,
            Self::IEC61966_3 => 2,
            Self::IEC61966_2_1 => 3,
            Self::Full => 4,
        }
    }

    /// Number of s15Fixed16 parameters stored for this type
    pub fn param_count(self) -> usize {
        match self {
            Self::Gamma => 1,
            Self::CIE122 => 3,
            Self::IEC61966_3 => 4,
            Self::IEC61966_2_1 => 5,
            Self::Full => 7,
        }
    }
}

/// ICC Parametric Curve
///
/// Parameters that a type does not use are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParametricCurve {
    pub curve_type: ParametricCurveType,
    pub g: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ParametricCurve {
    /// Type 0 curve
    pub fn gamma(g: f64) -> Self {
        Self {
            curve_type: ParametricCurveType::Gamma,
            g,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// The sRGB decode curve as a type 3 parametric curve
    pub fn srgb() -> Self {
        Self {
            curve_type: ParametricCurveType::IEC61966_2_1,
            g: 2.4,
            a: 1.0 / 1.055,
            b: 0.055 / 1.055,
            c: 1.0 / 12.92,
            d: 0.04045,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Type 4 curve from all seven parameters
    pub fn full(g: f64, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            curve_type: ParametricCurveType::Full,
            g,
            a,
            b,
            c,
            d,
            e,
            f,
        }
    }

    /// Build from the parameter list in ICC order (g, a, b, c, d, e, f)
    pub fn from_params(curve_type: ParametricCurveType, params: &[f64]) -> Option<Self> {
        if params.len() < curve_type.param_count() {
            return None;
        }

        let mut p = [0.0; 7];
        p[..curve_type.param_count()].copy_from_slice(&params[..curve_type.param_count()]);
        let [g, a, b, c, d, e, f] = p;

        Some(Self {
            curve_type,
            g,
            a,
            b,
            c,
            d,
            e,
            f,
        })
    }

    /// Parameters in ICC order, truncated to the type's count
    pub fn params(&self) -> Vec<f64> {
        let all = [self.g, self.a, self.b, self.c, self.d, self.e, self.f];
        all[..self.curve_type.param_count()].to_vec()
    }

    /// Rewrite as an equivalent type 4 curve
    pub fn to_full(&self) -> Self {
        let Self { g, a, b, c, d, e, f, .. } = *self;
        match self.curve_type {
            ParametricCurveType::Gamma => Self::full(g, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            ParametricCurveType::CIE122 => Self::full(g, a, b, 0.0, -b / a, 0.0, 0.0),
            ParametricCurveType::IEC61966_3 => Self::full(g, a, b, 0.0, -b / a, c, c),
            ParametricCurveType::IEC61966_2_1 => Self::full(g, a, b, c, d, 0.0, 0.0),
            ParametricCurveType::Full => Self::full(g, a, b, c, d, e, f),
        }
    }

    /// Evaluate the curve, point-mirrored around `(0, eval(0))` for negative
    /// input
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let Self { g, a, b, c, d, e, f, .. } = *self;
        extended(x, |x| match self.curve_type {
            ParametricCurveType::Gamma => x.powf(g),
            ParametricCurveType::CIE122 => {
                if x < -b / a {
                    0.0
                } else {
                    (a * x + b).powf(g)
                }
            }
            ParametricCurveType::IEC61966_3 => {
                if x < -b / a {
                    c
                } else {
                    (a * x + b).powf(g) + c
                }
            }
            ParametricCurveType::IEC61966_2_1 => {
                if x < d {
                    c * x
                } else {
                    (a * x + b).powf(g)
                }
            }
            ParametricCurveType::Full => {
                if x < d {
                    c * x + f
                } else {
                    (a * x + b).powf(g) + e
                }
            }
        })
    }

    /// Closed-form inverse.
    ///
    /// Type 0 stays type 0; every other type is rewritten as type 4 first
    /// and inverted segment by segment.
    pub fn inverse(&self) -> Self {
        if self.curve_type == ParametricCurveType::Gamma {
            return Self::gamma(1.0 / self.g);
        }

        let Self { g, a, b, c, d, e, f, .. } = self.to_full();
        let inv_a = a.powf(-g);
        Self::full(
            1.0 / g,
            inv_a,
            -e * inv_a,
            if c == 0.0 { 0.0 } else { 1.0 / c },
            c * d + f,
            if a == 0.0 { 0.0 } else { -b / a },
            if c == 0.0 { 0.0 } else { -f / c },
        )
    }
}
