//! Calibrated gray: a tone curve over the white point's chromaticity

use crate::color::Xyz;
use crate::error::{Error, Result};
use crate::icc::{DataColorSpace, IccCurve, TagSignature};
use crate::math::Matrix3x4;
use crate::math::gamma::ParametricCurve;

use super::{CieXyzColorSpace, ColorSpaceBase, ToneCurve};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibratedGrayColorSpace {
    cie_xyz: CieXyzColorSpace,
    tone: ToneCurve,
    /// Linear gray, splatted to three channels, to absolute XYZ
    to_xyz: Matrix3x4,
    from_xyz: Matrix3x4,
}

impl CalibratedGrayColorSpace {
    /// Fails when the white and black points leave the normalize matrix
    /// singular
    pub fn new(cie_xyz: CieXyzColorSpace, tone: ToneCurve) -> Result<Self> {
        let normalize = cie_xyz.normalize_matrix();
        let denormalize = normalize
            .inverse()
            .ok_or(Error::SingularMatrix("normalize matrix"))?;
        let white = cie_xyz.normalized_white();

        Ok(Self {
            cie_xyz,
            tone,
            to_xyz: Matrix3x4::scale(white.x, white.y, white.z).then(&denormalize),
            from_xyz: normalize,
        })
    }

    pub fn with_gamma(cie_xyz: CieXyzColorSpace, gamma: f64) -> Result<Self> {
        Self::new(cie_xyz, ToneCurve::Gamma(gamma))
    }

    pub fn tone(&self) -> &ToneCurve {
        &self.tone
    }

    /// Same reference points with an identity tone curve
    pub fn linear_tone(&self) -> Self {
        Self {
            tone: ToneCurve::Linear,
            ..self.clone()
        }
    }

    pub fn icc_curve(&self) -> IccCurve {
        self.tone.icc_curve()
    }

    pub fn icc_parametric_curve(&self) -> Option<ParametricCurve> {
        self.tone.icc_parametric_curve()
    }

    /// Encode as a v4 `GRAY`/`XYZ ` display profile
    pub fn icc_profile(&self, description: &str) -> Result<Vec<u8>> {
        let (mut writer, _) = self.cie_xyz.icc_writer(DataColorSpace::Gray, description)?;
        writer.add_curve(TagSignature::GRAY_TRC, &self.icc_curve());
        Ok(writer.finish())
    }
}

impl ColorSpaceBase for CalibratedGrayColorSpace {
    type Model = f64;

    const COMPONENTS: usize = 1;

    fn cie_xyz(&self) -> &CieXyzColorSpace {
        &self.cie_xyz
    }

    fn to_linear(&self, color: f64) -> f64 {
        self.tone.to_linear(color)
    }

    fn from_linear(&self, color: f64) -> f64 {
        self.tone.from_linear(color)
    }

    /// Scale the normalized white by `color`
    fn linear_to_xyz(&self, color: f64) -> Xyz {
        Xyz::from_array(self.to_xyz.apply([color; 3]))
    }

    /// Normalized luminance
    fn linear_from_xyz(&self, xyz: Xyz) -> f64 {
        self.from_xyz.apply(xyz.to_array())[1]
    }

    fn model_from_components(components: &[f64]) -> f64 {
        components[0]
    }

    fn model_to_components(color: f64) -> Vec<f64> {
        vec![color]
    }
}
