//! Absolute CIE XYZ reference space
//!
//! A [`CieXyzColorSpace`] fixes a white point, a black point and a luminance.
//! Its normalize matrix maps absolute XYZ so that black lands on the origin
//! and white lands at Y = 1 on its own chromaticity. Every calibrated space
//! derives its RGB or gray matrices in that normalized frame.

use std::hash::{Hash, Hasher};

use crate::color::{Chromaticity, PCS_ILLUMINANT, Xyz};
use crate::error::{Error, Result};
use crate::icc::{DataColorSpace, IccHeader, IccProfile, ProfileClass, ProfileWriter, TagSignature};
use crate::math::{ChromaticAdaptationMethod, Matrix3x3, Matrix3x4};

use super::ColorSpaceBase;

/// White point, black point and luminance of an absolute XYZ space
///
/// Equality and hashing compare the bit patterns of every defining value.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CieXyzColorSpace {
    white: Xyz,
    black: Xyz,
    luminance: f64,
}

impl CieXyzColorSpace {
    /// White point only: black at the origin, luminance 1
    pub fn new(white: Xyz) -> Self {
        Self::with_black(white, Xyz::default(), 1.0)
    }

    pub fn with_black(white: Xyz, black: Xyz, luminance: f64) -> Self {
        Self {
            white,
            black,
            luminance,
        }
    }

    /// White point given as chromaticity, expanded to XYZ with Y = 1
    pub fn from_chromaticity(white: Chromaticity) -> Self {
        Self::new(white.to_xyz(1.0))
    }

    /// Black is derived as `white / contrast_ratio`
    pub fn with_contrast_ratio(white: Chromaticity, luminance: f64, contrast_ratio: f64) -> Self {
        let white = white.to_xyz(1.0);
        Self::with_black(white, white / contrast_ratio, luminance)
    }

    pub fn white(&self) -> Xyz {
        self.white
    }

    pub fn black(&self) -> Xyz {
        self.black
    }

    /// Absolute luminance of the white point (cd/m² for display spaces)
    pub fn luminance(&self) -> f64 {
        self.luminance
    }

    /// `translate(-black)` followed by the per-axis white scale
    ///
    /// ```text
    /// sx = wx / (wy * (wx - bx))
    /// sy = 1 / (wy - by)
    /// sz = wz / (wy * (wz - bz))
    /// ```
    pub fn normalize_matrix(&self) -> Matrix3x4 {
        let (w, b) = (self.white, self.black);
        Matrix3x4::translate(-b.x, -b.y, -b.z).then(&Matrix3x4::scale(
            w.x / (w.y * (w.x - b.x)),
            1.0 / (w.y - b.y),
            w.z / (w.y * (w.z - b.z)),
        ))
    }

    /// The white point in the normalized frame: `(wx/wy, 1, wz/wy)`
    pub fn normalized_white(&self) -> Xyz {
        Xyz::from_array(self.normalize_matrix().apply(self.white.to_array()))
    }

    /// The black point in the normalized frame, always the origin
    pub fn normalized_black(&self) -> Xyz {
        Xyz::from_array(self.normalize_matrix().apply(self.black.to_array()))
    }

    /// A space with the same white and no black offset
    pub(crate) fn white_only(&self) -> Self {
        Self::new(self.white)
    }

    /// Affine map from absolute XYZ in `self` to absolute XYZ in `other`
    /// that carries `self`'s white and black onto `other`'s.
    ///
    /// Built in the normalized cone space of `method`. `None` if either
    /// space is degenerate.
    pub fn adaptation_matrix_to(
        &self,
        other: &Self,
        method: ChromaticAdaptationMethod,
    ) -> Option<Matrix3x4> {
        let cone = method.cone_matrix();
        let m1 = self.normalize_matrix().then_linear(&cone);
        let m2 = other.normalize_matrix().then_linear(&cone);

        let s = m1.apply(self.white.to_array());
        let d = m2.apply(other.white.to_array());
        let scale = Matrix3x4::scale(d[0] / s[0], d[1] / s[1], d[2] / s[2]);

        Some(m1.then(&scale).then(&m2.inverse()?))
    }
}

/// ICC import and export of the reference points
impl CieXyzColorSpace {
    /// Bradford map from the normalized frame to the D50 PCS
    pub(crate) fn pcs_adaptation(&self) -> Result<Matrix3x3> {
        Self::new(self.normalized_white())
            .adaptation_matrix_to(&Self::new(PCS_ILLUMINANT), ChromaticAdaptationMethod::Bradford)
            .map(|m| m.linear)
            .ok_or(Error::SingularMatrix("PCS adaptation"))
    }

    /// Display profile writer carrying `desc`, `cprt`, `wtpt`, `chad` and,
    /// when they differ from the defaults, `bkpt` and `lumi`
    ///
    /// Also returns the `chad` matrix so colorants can be adapted with it.
    pub(crate) fn icc_writer(
        &self,
        color_space: DataColorSpace,
        description: &str,
    ) -> Result<(ProfileWriter, Matrix3x3)> {
        let chad = self.pcs_adaptation()?;
        let mut writer = ProfileWriter::new(IccHeader::new(
            ProfileClass::Display,
            color_space,
            DataColorSpace::Xyz,
        ));
        writer
            .add_text(TagSignature::DESC, description)
            .add_text(TagSignature::COPYRIGHT, "No copyright, use freely")
            .add_xyz(TagSignature::MEDIA_WHITE, self.normalized_white())
            .add_s15fixed16(TagSignature::CHAD, chad.m.as_flattened());
        if self.black.y != 0.0 {
            writer.add_xyz(TagSignature::MEDIA_BLACK, self.black / self.white.y);
        }
        if self.luminance != 1.0 {
            writer.add_xyz(TagSignature::LUMINANCE, Xyz::new(0.0, self.luminance, 0.0));
        }
        Ok((writer, chad))
    }

    /// Reference space of a matrix/TRC profile, with the matrix that adapts
    /// its normalized frame to the PCS
    ///
    /// The white comes from `chad⁻¹ · D50` when `chad` is present, else from
    /// `wtpt`, else D50. Without `chad`, Bradford adaptation is implied.
    pub(crate) fn from_icc_profile(profile: &IccProfile) -> Result<(Self, Matrix3x3)> {
        let luminance = profile.luminance().filter(|l| *l > 0.0).unwrap_or(1.0);

        let (white, adaptation) = match profile.chromatic_adaptation() {
            Some(chad) => {
                let inverse = chad
                    .inverse()
                    .ok_or(Error::SingularMatrix("chromatic adaptation tag"))?;
                (Xyz::from_array(inverse.multiply_vec(PCS_ILLUMINANT.to_array())), chad)
            }
            None => {
                let white = profile.media_white_point().unwrap_or(PCS_ILLUMINANT);
                if white.y <= 0.0 {
                    return Err(Error::InvalidColorSpace(format!(
                        "media white point {:?} has no luminance",
                        white
                    )));
                }
                let white = white / white.y;
                (white, Self::new(white).pcs_adaptation()?)
            }
        };
        let black = profile.media_black_point().unwrap_or_default();

        Ok((
            Self::with_black(white * luminance, black * luminance, luminance),
            adaptation,
        ))
    }
}

impl PartialEq for CieXyzColorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.white.bits() == other.white.bits()
            && self.black.bits() == other.black.bits()
            && self.luminance.to_bits() == other.luminance.to_bits()
    }
}

impl Eq for CieXyzColorSpace {}

impl Hash for CieXyzColorSpace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white.bits().hash(state);
        self.black.bits().hash(state);
        self.luminance.to_bits().hash(state);
    }
}

impl ColorSpaceBase for CieXyzColorSpace {
    type Model = Xyz;

    const COMPONENTS: usize = 3;

    fn cie_xyz(&self) -> &CieXyzColorSpace {
        self
    }

    fn to_linear(&self, color: Xyz) -> Xyz {
        color
    }

    fn from_linear(&self, color: Xyz) -> Xyz {
        color
    }

    fn linear_to_xyz(&self, color: Xyz) -> Xyz {
        color
    }

    fn linear_from_xyz(&self, xyz: Xyz) -> Xyz {
        xyz
    }

    fn model_from_components(components: &[f64]) -> Xyz {
        Xyz::new(components[0], components[1], components[2])
    }

    fn model_to_components(color: Xyz) -> Vec<f64> {
        color.to_array().to_vec()
    }
}
