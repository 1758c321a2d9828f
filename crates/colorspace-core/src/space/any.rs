//! Type-erased color spaces and ICC import

use crate::color::Xyz;
use crate::error::{Error, Result};
use crate::icc::{DataColorSpace, IccError, IccProfile, TagSignature};
use crate::math::Matrix3x3;

use super::{
    CalibratedGrayColorSpace, CalibratedRgbColorSpace, CieXyzColorSpace, ColorSpaceBase,
    ConversionOptions, ToneCurve,
};

/// Any supported space, with colors passed as component slices
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyColorSpace {
    Xyz(CieXyzColorSpace),
    Gray(CalibratedGrayColorSpace),
    Rgb(CalibratedRgbColorSpace),
}

impl AnyColorSpace {
    /// Import a matrix/TRC RGB profile, a gray TRC profile or an XYZ
    /// color space profile
    pub fn from_icc(data: &[u8]) -> Result<Self> {
        let profile = IccProfile::from_bytes(data)?;
        let header = profile.header();

        match header.color_space {
            DataColorSpace::Rgb => {
                if !profile.is_matrix_shaper() {
                    return Err(IccError::Unsupported(
                        "RGB profile without colorants and TRCs".to_string(),
                    )
                    .into());
                }
                let (cie_xyz, adaptation) = CieXyzColorSpace::from_icc_profile(&profile)?;
                let colorant = |sig: TagSignature, xyz: Option<Xyz>| match xyz {
                    Some(xyz) => Ok(xyz.to_array()),
                    None if profile.has_tag(sig) => Err(IccError::InvalidFormat(format!(
                        "'{}' is not an XYZ colorant",
                        sig
                    ))),
                    None => Err(IccError::MissingTag(sig.0)),
                };
                let r = colorant(TagSignature::RED_COLORANT, profile.red_colorant())?;
                let g = colorant(TagSignature::GREEN_COLORANT, profile.green_colorant())?;
                let b = colorant(TagSignature::BLUE_COLORANT, profile.blue_colorant())?;
                let unadapt = adaptation
                    .inverse()
                    .ok_or(Error::SingularMatrix("chromatic adaptation"))?;
                let matrix = unadapt.multiply(&Matrix3x3::from_columns(r, g, b));

                let curves = [
                    ToneCurve::from_icc(profile.red_trc()?),
                    ToneCurve::from_icc(profile.green_trc()?),
                    ToneCurve::from_icc(profile.blue_trc()?),
                ];
                CalibratedRgbColorSpace::from_matrix(cie_xyz, matrix, curves).map(Self::Rgb)
            }
            DataColorSpace::Gray => {
                let (cie_xyz, _) = CieXyzColorSpace::from_icc_profile(&profile)?;
                let tone = ToneCurve::from_icc(profile.gray_trc()?);
                CalibratedGrayColorSpace::new(cie_xyz, tone).map(Self::Gray)
            }
            DataColorSpace::Xyz => {
                let (cie_xyz, _) = CieXyzColorSpace::from_icc_profile(&profile)?;
                Ok(Self::Xyz(cie_xyz))
            }
            other => Err(IccError::Unsupported(format!("{:?} data color space", other)).into()),
        }
    }

    /// Components per color
    pub fn components(&self) -> usize {
        match self {
            Self::Xyz(_) => CieXyzColorSpace::COMPONENTS,
            Self::Gray(_) => CalibratedGrayColorSpace::COMPONENTS,
            Self::Rgb(_) => CalibratedRgbColorSpace::COMPONENTS,
        }
    }

    pub fn cie_xyz(&self) -> &CieXyzColorSpace {
        match self {
            Self::Xyz(space) => space.cie_xyz(),
            Self::Gray(space) => space.cie_xyz(),
            Self::Rgb(space) => space.cie_xyz(),
        }
    }

    pub fn convert_to_xyz(&self, components: &[f64]) -> Result<Xyz> {
        if components.len() != self.components() {
            return Err(Error::ComponentCount {
                expected: self.components(),
                actual: components.len(),
            });
        }
        Ok(match self {
            Self::Xyz(space) => {
                space.convert_to_xyz(CieXyzColorSpace::model_from_components(components))
            }
            Self::Gray(space) => {
                space.convert_to_xyz(CalibratedGrayColorSpace::model_from_components(components))
            }
            Self::Rgb(space) => {
                space.convert_to_xyz(CalibratedRgbColorSpace::model_from_components(components))
            }
        })
    }

    pub fn convert_from_xyz(&self, xyz: Xyz) -> Vec<f64> {
        match self {
            Self::Xyz(space) => CieXyzColorSpace::model_to_components(space.convert_from_xyz(xyz)),
            Self::Gray(space) => {
                CalibratedGrayColorSpace::model_to_components(space.convert_from_xyz(xyz))
            }
            Self::Rgb(space) => {
                CalibratedRgbColorSpace::model_to_components(space.convert_from_xyz(xyz))
            }
        }
    }

    /// Convert `components` into `other`, adapting as `options` select
    pub fn convert_to(
        &self,
        other: &AnyColorSpace,
        components: &[f64],
        options: &ConversionOptions,
    ) -> Result<Vec<f64>> {
        let matrix = options.intent_matrix(self.cie_xyz(), other.cie_xyz())?;
        let xyz = self.convert_to_xyz(components)?;
        Ok(other.convert_from_xyz(Xyz::from_array(matrix.apply(xyz.to_array()))))
    }

    /// Export Gray and RGB spaces as a v4 display profile
    pub fn icc_profile(&self, description: &str) -> Result<Vec<u8>> {
        match self {
            Self::Gray(space) => space.icc_profile(description),
            Self::Rgb(space) => space.icc_profile(description),
            Self::Xyz(_) => {
                Err(IccError::Unsupported("exporting an XYZ space".to_string()).into())
            }
        }
    }
}

impl From<CieXyzColorSpace> for AnyColorSpace {
    fn from(space: CieXyzColorSpace) -> Self {
        Self::Xyz(space)
    }
}

impl From<CalibratedGrayColorSpace> for AnyColorSpace {
    fn from(space: CalibratedGrayColorSpace) -> Self {
        Self::Gray(space)
    }
}

impl From<CalibratedRgbColorSpace> for AnyColorSpace {
    fn from(space: CalibratedRgbColorSpace) -> Self {
        Self::Rgb(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::space::{adobe_rgb, display_p3, generic_gamma22_gray, generic_xyz, srgb};

    const EPSILON: f64 = 1e-3;

    #[test]
    fn test_rgb_profile_round_trip() {
        for space in [srgb(), display_p3(), adobe_rgb()] {
            let bytes = space.icc_profile("test").unwrap();
            let AnyColorSpace::Rgb(imported) = AnyColorSpace::from_icc(&bytes).unwrap() else {
                panic!("expected an RGB space");
            };

            for color in [Rgb::new(1.0, 1.0, 1.0), Rgb::new(0.8, 0.2, 0.4), Rgb::new(0.0, 0.0, 1.0)] {
                let expected = space.convert_to_xyz(color) / space.cie_xyz().luminance();
                let got = imported.convert_to_xyz(color) / imported.cie_xyz().luminance();
                assert!(got.approx_eq(&expected, EPSILON), "{:?}: {:?} vs {:?}", color, got, expected);
            }
        }
    }

    #[test]
    fn test_undecodable_colorant_is_an_error() {
        let mut bytes = srgb().icc_profile("test").unwrap();
        let count = u32::from_be_bytes(bytes[128..132].try_into().unwrap()) as usize;
        let entry = (0..count)
            .map(|i| 132 + i * 12)
            .find(|&e| bytes[e..e + 4] == TagSignature::GREEN_COLORANT.0.to_be_bytes())
            .expect("gXYZ in tag table");
        let offset = u32::from_be_bytes(bytes[entry + 4..entry + 8].try_into().unwrap()) as usize;
        bytes[offset..offset + 4].copy_from_slice(b"curv");

        assert!(matches!(
            AnyColorSpace::from_icc(&bytes),
            Err(Error::Icc(IccError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_gray_profile_round_trip() {
        let bytes = generic_gamma22_gray().icc_profile("gray").unwrap();
        let imported = AnyColorSpace::from_icc(&bytes).unwrap();
        assert_eq!(imported.components(), 1);

        let xyz = imported.convert_to_xyz(&[0.5]).unwrap();
        let expected = generic_gamma22_gray().convert_to_xyz(0.5);
        assert!(xyz.approx_eq(&expected, EPSILON), "{:?}", xyz);
    }

    #[test]
    fn test_component_count_checked() {
        let space = AnyColorSpace::from(srgb().clone());
        assert!(matches!(
            space.convert_to_xyz(&[0.5]),
            Err(Error::ComponentCount { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_convert_between_any() {
        let rgb = AnyColorSpace::from(srgb().clone());
        let xyz = AnyColorSpace::from(*generic_xyz());
        let out = rgb
            .convert_to(&xyz, &[1.0, 1.0, 1.0], &ConversionOptions::default())
            .unwrap();
        let white = srgb().cie_xyz().white();
        assert!(Xyz::from_array([out[0], out[1], out[2]]).approx_eq(&white, 1e-9));
        assert_eq!(xyz.convert_from_xyz(white), white.to_array().to_vec());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            AnyColorSpace::from_icc(&[0u8; 64]),
            Err(Error::Icc(IccError::TooSmall { .. }))
        ));
        assert!(AnyColorSpace::from(*generic_xyz()).icc_profile("xyz").is_err());
    }
}
