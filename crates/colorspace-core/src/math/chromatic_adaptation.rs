//! Chromatic Adaptation Transforms
//!
//! Chromatic adaptation converts colors seen under one white point into the
//! colors that look the same under another. Bradford is the ICC default.
//!
//! Conversions between color spaces never adapt unless the caller asks for
//! it through [`ConversionOptions`](crate::space::ConversionOptions).
//!
//! References:
//! - ICC.1:2022 Annex E
//! - Lindbloom: http://www.brucelindbloom.com/index.html?Eqn_ChromAdapt.html

use crate::color::Xyz;
use crate::math::Matrix3x3;

/// Chromatic adaptation method
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChromaticAdaptationMethod {
    /// Bradford adaptation (ICC default)
    #[default]
    Bradford,
    VonKries,
    /// Scale XYZ directly
    XyzScaling,
    /// Caller-supplied XYZ → cone response matrix
    Custom(Matrix3x3),
}

/// Bradford matrix: XYZ → LMS (cone response)
const BRADFORD_XYZ_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.8951000, 0.2664000, -0.1614000],
    [-0.7502000, 1.7135000, 0.0367000],
    [0.0389000, -0.0685000, 1.0296000],
]);

/// Von Kries matrix: XYZ → LMS
const VON_KRIES_XYZ_TO_LMS: Matrix3x3 = Matrix3x3::new([
    [0.4002400, 0.7076000, -0.0808100],
    [-0.2263000, 1.1653200, 0.0457000],
    [0.0000000, 0.0000000, 0.9182200],
]);

impl ChromaticAdaptationMethod {
    /// XYZ → cone response matrix
    pub fn cone_matrix(&self) -> Matrix3x3 {
        match self {
            Self::Bradford => BRADFORD_XYZ_TO_LMS,
            Self::VonKries => VON_KRIES_XYZ_TO_LMS,
            Self::XyzScaling => Matrix3x3::identity(),
            Self::Custom(m) => *m,
        }
    }
}

/// Matrix mapping XYZ under `src_white` to XYZ under `dst_white`
///
/// `XYZ_dst = M × XYZ_src`. Returns `None` when a custom cone matrix is
/// singular.
pub fn adaptation_matrix(
    src_white: Xyz,
    dst_white: Xyz,
    method: ChromaticAdaptationMethod,
) -> Option<Matrix3x3> {
    let m_a = method.cone_matrix();
    let m_a_inv = m_a.inverse()?;

    let src_lms = m_a.multiply_vec(src_white.to_array());
    let dst_lms = m_a.multiply_vec(dst_white.to_array());

    let ratio = |i: usize| {
        if src_lms[i].abs() > 1e-10 {
            dst_lms[i] / src_lms[i]
        } else {
            1.0
        }
    };
    let scale = Matrix3x3::diagonal(ratio(0), ratio(1), ratio(2));

    // M = M_A^-1 × Scale × M_A
    Some(m_a_inv.multiply(&scale.multiply(&m_a)))
}

/// Bradford adaptation of a single XYZ value
#[inline]
pub fn adapt_xyz(xyz: Xyz, src_white: Xyz, dst_white: Xyz) -> Xyz {
    match adaptation_matrix(src_white, dst_white, ChromaticAdaptationMethod::Bradford) {
        Some(m) => Xyz::from_array(m.multiply_vec(xyz.to_array())),
        None => xyz,
    }
}
