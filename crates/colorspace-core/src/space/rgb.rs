//! Calibrated RGB
//!
//! The primaries matrix maps linear RGB into the normalized XYZ frame of the
//! reference space. It is derived from the three primary chromaticities by
//! scaling each primary so that RGB (1, 1, 1) lands on the normalized white.

use crate::color::{Chromaticity, Rgb, Xyz};
use crate::error::{Error, Result};
use crate::icc::{DataColorSpace, IccCurve, TagSignature};
use crate::math::gamma::ParametricCurve;
use crate::math::{Matrix3x3, Matrix3x4};

use super::{CieXyzColorSpace, ColorSpaceBase, ToneCurve};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibratedRgbColorSpace {
    cie_xyz: CieXyzColorSpace,
    curves: [ToneCurve; 3],
    matrix: Matrix3x3,
    to_xyz: Matrix3x4,
    from_xyz: Matrix3x4,
}

impl CalibratedRgbColorSpace {
    /// One tone curve shared by all channels
    pub fn new(
        cie_xyz: CieXyzColorSpace,
        red: Chromaticity,
        green: Chromaticity,
        blue: Chromaticity,
        tone: ToneCurve,
    ) -> Result<Self> {
        Self::with_curves(cie_xyz, [red, green, blue], [tone.clone(), tone.clone(), tone])
    }

    /// sRGB piecewise curve on every channel
    pub fn srgb_like(
        cie_xyz: CieXyzColorSpace,
        red: Chromaticity,
        green: Chromaticity,
        blue: Chromaticity,
    ) -> Result<Self> {
        Self::new(cie_xyz, red, green, blue, ToneCurve::Srgb)
    }

    /// Per-channel tone curves
    pub fn with_curves(
        cie_xyz: CieXyzColorSpace,
        primaries: [Chromaticity; 3],
        curves: [ToneCurve; 3],
    ) -> Result<Self> {
        let [r, g, b] = primaries.map(|p| p.to_array());
        let p = Matrix3x3::from_columns(r, g, b);
        let p_inv = p
            .inverse()
            .ok_or(Error::SingularMatrix("RGB primaries"))?;
        let scale = p_inv.multiply_vec(cie_xyz.normalized_white().to_array());
        Self::from_matrix(cie_xyz, p.scale_columns(scale), curves)
    }

    /// From a matrix mapping linear RGB into the normalized XYZ frame
    pub fn from_matrix(
        cie_xyz: CieXyzColorSpace,
        matrix: Matrix3x3,
        curves: [ToneCurve; 3],
    ) -> Result<Self> {
        let matrix_inv = matrix
            .inverse()
            .ok_or(Error::SingularMatrix("RGB primaries"))?;
        let normalize = cie_xyz.normalize_matrix();
        let denormalize = normalize
            .inverse()
            .ok_or(Error::SingularMatrix("normalize matrix"))?;

        Ok(Self {
            cie_xyz,
            curves,
            matrix,
            to_xyz: Matrix3x4::from_linear(matrix).then(&denormalize),
            from_xyz: normalize.then_linear(&matrix_inv),
        })
    }

    pub fn curves(&self) -> &[ToneCurve; 3] {
        &self.curves
    }

    /// Linear RGB to normalized XYZ; columns are the scaled primaries
    pub fn primaries_matrix(&self) -> Matrix3x3 {
        self.matrix
    }

    /// Chromaticities of the red, green and blue primaries
    pub fn primaries(&self) -> [Chromaticity; 3] {
        [0, 1, 2].map(|i| Xyz::from_array(self.matrix.column(i)).point())
    }

    /// Same primaries and reference points with identity tone curves
    pub fn linear_tone(&self) -> Self {
        Self {
            curves: [ToneCurve::Linear, ToneCurve::Linear, ToneCurve::Linear],
            ..self.clone()
        }
    }

    /// ICC curve of channel `index`
    ///
    /// # Panics
    ///
    /// If `index` is not 0, 1 or 2.
    pub fn icc_curve(&self, index: usize) -> IccCurve {
        self.curves[index].icc_curve()
    }

    pub fn icc_parametric_curve(&self, index: usize) -> Option<ParametricCurve> {
        self.curves[index].icc_parametric_curve()
    }

    /// Encode as a v4 `RGB `/`XYZ ` display profile with D50-adapted colorants
    pub fn icc_profile(&self, description: &str) -> Result<Vec<u8>> {
        let (mut writer, chad) = self.cie_xyz.icc_writer(DataColorSpace::Rgb, description)?;
        let colorants = chad.multiply(&self.matrix);

        for (i, (colorant, trc)) in [
            (TagSignature::RED_COLORANT, TagSignature::RED_TRC),
            (TagSignature::GREEN_COLORANT, TagSignature::GREEN_TRC),
            (TagSignature::BLUE_COLORANT, TagSignature::BLUE_TRC),
        ]
        .into_iter()
        .enumerate()
        {
            writer
                .add_xyz(colorant, Xyz::from_array(colorants.column(i)))
                .add_curve(trc, &self.icc_curve(i));
        }
        Ok(writer.finish())
    }
}

impl ColorSpaceBase for CalibratedRgbColorSpace {
    type Model = Rgb;

    const COMPONENTS: usize = 3;

    fn cie_xyz(&self) -> &CieXyzColorSpace {
        &self.cie_xyz
    }

    fn to_linear(&self, color: Rgb) -> Rgb {
        color.map_channels(|i, v| self.curves[i].to_linear(v))
    }

    fn from_linear(&self, color: Rgb) -> Rgb {
        color.map_channels(|i, v| self.curves[i].from_linear(v))
    }

    fn linear_to_xyz(&self, color: Rgb) -> Xyz {
        Xyz::from_array(self.to_xyz.apply(color.to_array()))
    }

    fn linear_from_xyz(&self, xyz: Xyz) -> Rgb {
        Rgb::from_array(self.from_xyz.apply(xyz.to_array()))
    }

    fn model_from_components(components: &[f64]) -> Rgb {
        Rgb::new(components[0], components[1], components[2])
    }

    fn model_to_components(color: Rgb) -> Vec<f64> {
        color.to_array().to_vec()
    }
}
