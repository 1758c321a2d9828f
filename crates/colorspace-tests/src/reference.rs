//! Reference implementation wrappers
//!
//! lcms2 builds and reads profiles on the other side of every ICC test;
//! palette provides an independent sRGB pipeline.

use colorspace_core::{Chromaticity, Rgb, Xyz};
use lcms2::{CIExyY, CIExyYTRIPLE, Intent, PixelFormat, Profile, ToneCurve, Transform};
use palette::white_point::D65;
use palette::{FromColor, LinSrgb, Srgb};

fn xy_y(point: Chromaticity) -> CIExyY {
    CIExyY {
        x: point.x,
        y: point.y,
        Y: 1.0,
    }
}

/// Serialized lcms2 built-in sRGB
pub fn lcms2_srgb_icc() -> Result<Vec<u8>, String> {
    Profile::new_srgb()
        .icc()
        .map_err(|e| format!("lcms2 icc: {}", e))
}

/// Serialized lcms2 RGB profile with one gamma curve on every channel
pub fn lcms2_rgb_icc(
    white: Chromaticity,
    primaries: [Chromaticity; 3],
    gamma: f64,
) -> Result<Vec<u8>, String> {
    let [red, green, blue] = primaries;
    let triple = CIExyYTRIPLE {
        Red: xy_y(red),
        Green: xy_y(green),
        Blue: xy_y(blue),
    };
    let curve = ToneCurve::new(gamma);
    let curves = [&curve, &curve, &curve];

    let profile = Profile::new_rgb(&xy_y(white), &triple, &curves)
        .map_err(|e| format!("lcms2 rgb profile: {}", e))?;
    profile.icc().map_err(|e| format!("lcms2 icc: {}", e))
}

/// Serialized lcms2 gray profile
pub fn lcms2_gray_icc(white: Chromaticity, gamma: f64) -> Result<Vec<u8>, String> {
    let curve = ToneCurve::new(gamma);
    let profile =
        Profile::new_gray(&xy_y(white), &curve).map_err(|e| format!("lcms2 gray profile: {}", e))?;
    profile.icc().map_err(|e| format!("lcms2 icc: {}", e))
}

/// Relative colorimetric RGB to D50 PCS XYZ through lcms2
pub fn lcms2_rgb_to_xyz(profile_data: &[u8], colors: &[Rgb]) -> Result<Vec<Xyz>, String> {
    let src = Profile::new_icc(profile_data).map_err(|e| format!("lcms2 src profile: {}", e))?;
    let xyz = Profile::new_xyz();

    let transform = Transform::<[f32; 3], [f32; 3]>::new(
        &src,
        PixelFormat::RGB_FLT,
        &xyz,
        PixelFormat::XYZ_FLT,
        Intent::RelativeColorimetric,
    )
    .map_err(|e| format!("lcms2 transform: {}", e))?;

    let input: Vec<[f32; 3]> = colors
        .iter()
        .map(|c| c.to_array().map(|v| v as f32))
        .collect();
    let mut output = vec![[0.0f32; 3]; input.len()];
    transform.transform_pixels(&input, &mut output);

    Ok(output
        .iter()
        .map(|p| Xyz::from_array(p.map(f64::from)))
        .collect())
}

/// sRGB to D65 XYZ through palette
pub fn palette_srgb_to_xyz(color: Rgb) -> Xyz {
    let linear: LinSrgb<f64> = Srgb::new(color.r, color.g, color.b).into_linear();
    let xyz = palette::Xyz::<D65, f64>::from_color(linear);
    Xyz::new(xyz.x, xyz.y, xyz.z)
}

/// D65 XYZ to sRGB through palette
pub fn palette_xyz_to_srgb(xyz: Xyz) -> Rgb {
    let linear = LinSrgb::<f64>::from_color(palette::Xyz::<D65, f64>::new(xyz.x, xyz.y, xyz.z));
    let encoded: Srgb<f64> = Srgb::from_linear(linear);
    Rgb::new(encoded.red, encoded.green, encoded.blue)
}
