//! Color Spaces
//!
//! Every space converts through absolute CIE XYZ:
//!
//! ```text
//! encoded ──to_linear──▶ linear ──linear_to_xyz──▶ XYZ
//! XYZ ──linear_from_xyz──▶ linear ──from_linear──▶ encoded
//! ```
//!
//! Spaces with different white points meet in raw XYZ. No chromatic
//! adaptation happens unless [`ConversionOptions::adaptation`] asks for it.

mod any;
mod cie_xyz;
mod gray;
pub mod predefined;
mod rgb;
mod tone_curve;

pub use any::AnyColorSpace;
pub use cie_xyz::CieXyzColorSpace;
pub use gray::CalibratedGrayColorSpace;
pub use predefined::{adobe_rgb, display_p3, generic_gamma22_gray, generic_xyz, srgb};
pub use rgb::CalibratedRgbColorSpace;
pub use tone_curve::ToneCurve;

use crate::color::Xyz;
use crate::error::{Error, Result};
use crate::icc::RenderingIntent;
use crate::math::{ChromaticAdaptationMethod, Matrix3x4};

/// How a conversion treats differing white and black points
///
/// The default converts through raw XYZ without adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionOptions {
    /// Adaptation method, `None` to skip adaptation entirely
    pub adaptation: Option<ChromaticAdaptationMethod>,
    /// Selects which reference points the adaptation maps
    pub intent: RenderingIntent,
}

impl ConversionOptions {
    /// Adapt with `method` under `intent`
    pub fn adapted(method: ChromaticAdaptationMethod, intent: RenderingIntent) -> Self {
        Self {
            adaptation: Some(method),
            intent,
        }
    }

    /// Affine XYZ map from `src` to `dst` for these options
    ///
    /// - no adaptation or absolute colorimetric: identity
    /// - perceptual and saturation: white and black points
    /// - relative colorimetric: white points only
    pub fn intent_matrix(&self, src: &CieXyzColorSpace, dst: &CieXyzColorSpace) -> Result<Matrix3x4> {
        let Some(method) = self.adaptation else {
            return Ok(Matrix3x4::identity());
        };

        let matrix = match self.intent {
            RenderingIntent::AbsoluteColorimetric => Some(Matrix3x4::identity()),
            RenderingIntent::Perceptual | RenderingIntent::Saturation => {
                src.adaptation_matrix_to(dst, method)
            }
            RenderingIntent::RelativeColorimetric => src
                .white_only()
                .adaptation_matrix_to(&dst.white_only(), method),
        };

        matrix.ok_or(Error::SingularMatrix("chromatic adaptation"))
    }
}

/// Conversion between a color model and absolute XYZ
pub trait ColorSpaceBase {
    /// The color value this space operates on
    type Model: Copy;

    /// Number of `f64` components in one [`Self::Model`]
    const COMPONENTS: usize;

    /// The reference XYZ space this space is calibrated against
    fn cie_xyz(&self) -> &CieXyzColorSpace;

    /// Remove the tone curve
    fn to_linear(&self, color: Self::Model) -> Self::Model;

    /// Apply the tone curve
    fn from_linear(&self, color: Self::Model) -> Self::Model;

    fn linear_to_xyz(&self, color: Self::Model) -> Xyz;

    fn linear_from_xyz(&self, xyz: Xyz) -> Self::Model;

    /// Build a model value from exactly [`Self::COMPONENTS`] values
    fn model_from_components(components: &[f64]) -> Self::Model;

    fn model_to_components(color: Self::Model) -> Vec<f64>;

    #[inline]
    fn convert_to_xyz(&self, color: Self::Model) -> Xyz {
        self.linear_to_xyz(self.to_linear(color))
    }

    #[inline]
    fn convert_from_xyz(&self, xyz: Xyz) -> Self::Model {
        self.from_linear(self.linear_from_xyz(xyz))
    }

    /// Convert into `other` through raw XYZ
    #[inline]
    fn convert_to<C: ColorSpaceBase + ?Sized>(&self, other: &C, color: Self::Model) -> C::Model {
        other.convert_from_xyz(self.convert_to_xyz(color))
    }

    /// Convert into `other`, applying the adaptation `options` select
    fn convert_to_with<C: ColorSpaceBase + ?Sized>(
        &self,
        other: &C,
        color: Self::Model,
        options: &ConversionOptions,
    ) -> Result<C::Model> {
        let matrix = options.intent_matrix(self.cie_xyz(), other.cie_xyz())?;
        let xyz = matrix.apply(self.convert_to_xyz(color).to_array());
        Ok(other.convert_from_xyz(Xyz::from_array(xyz)))
    }

    /// Convert interleaved components from `src` into `dst`
    ///
    /// Both slices must hold the same number of pixels.
    fn convert_slice<C: ColorSpaceBase + ?Sized>(
        &self,
        other: &C,
        src: &[f64],
        dst: &mut [f64],
        options: &ConversionOptions,
    ) -> Result<()> {
        if src.len() % Self::COMPONENTS != 0 {
            return Err(Error::ComponentCount {
                expected: Self::COMPONENTS,
                actual: src.len(),
            });
        }
        let pixels = src.len() / Self::COMPONENTS;
        if dst.len() != pixels * C::COMPONENTS {
            return Err(Error::ComponentCount {
                expected: pixels * C::COMPONENTS,
                actual: dst.len(),
            });
        }

        let matrix = options.intent_matrix(self.cie_xyz(), other.cie_xyz())?;
        for (input, output) in src
            .chunks_exact(Self::COMPONENTS)
            .zip(dst.chunks_exact_mut(C::COMPONENTS))
        {
            let xyz = self.convert_to_xyz(Self::model_from_components(input));
            let xyz = Xyz::from_array(matrix.apply(xyz.to_array()));
            output.copy_from_slice(&C::model_to_components(other.convert_from_xyz(xyz)));
        }
        Ok(())
    }
}
