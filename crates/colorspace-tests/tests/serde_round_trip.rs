//! JSON round trips of the serializable types
//!
//! Floats may move by an ulp through JSON text, so spaces are compared by
//! their conversions rather than field by field.

use colorspace_core::{
    AnyColorSpace, ChromaticAdaptationMethod, ColorSpaceBase, ConversionOptions, Rational,
    RenderingIntent, Rgb, space,
};
use colorspace_tests::patterns::random_rgb;

#[test]
fn test_rational_exact() -> anyhow::Result<()> {
    for r in [
        Rational::new(-3, 4),
        Rational::from_f64(0.1),
        Rational::ZERO,
        Rational::NAN,
    ] {
        let json = serde_json::to_string(&r)?;
        let back: Rational = serde_json::from_str(&json)?;
        assert_eq!(back, r, "{}", json);
    }
    Ok(())
}

#[test]
fn test_conversion_options() -> anyhow::Result<()> {
    let options = ConversionOptions::adapted(
        ChromaticAdaptationMethod::Bradford,
        RenderingIntent::RelativeColorimetric,
    );
    let json = serde_json::to_string(&options)?;
    let back: ConversionOptions = serde_json::from_str(&json)?;
    assert_eq!(back, options);

    let default: ConversionOptions =
        serde_json::from_str(&serde_json::to_string(&ConversionOptions::default())?)?;
    assert_eq!(default.adaptation, None);
    Ok(())
}

#[test]
fn test_color_spaces_convert_identically() -> anyhow::Result<()> {
    let spaces = [
        AnyColorSpace::from(space::srgb().clone()),
        AnyColorSpace::from(space::adobe_rgb().clone()),
        AnyColorSpace::from(space::generic_gamma22_gray().clone()),
        AnyColorSpace::from(*space::generic_xyz()),
    ];

    for original in &spaces {
        let json = serde_json::to_string(original)?;
        let back: AnyColorSpace = serde_json::from_str(&json)?;
        assert_eq!(back.components(), original.components());

        for color in random_rgb(21, 32) {
            let components = &color.to_array()[..original.components()];
            let expected = original.convert_to_xyz(components)?;
            let actual = back.convert_to_xyz(components)?;
            assert!(actual.approx_eq(&expected, 1e-12), "{}: {:?} vs {:?}", json, actual, expected);
        }
    }
    Ok(())
}

#[test]
fn test_imported_space_survives() -> anyhow::Result<()> {
    let bytes = space::display_p3().icc_profile("Display P3")?;
    let imported = AnyColorSpace::from_icc(&bytes)?;
    let back: AnyColorSpace = serde_json::from_str(&serde_json::to_string(&imported)?)?;

    let color = Rgb::new(0.25, 0.5, 0.75);
    let expected = imported.convert_to_xyz(&color.to_array())?;
    let actual = back.convert_to_xyz(&color.to_array())?;
    assert!(actual.approx_eq(&expected, 1e-12));
    assert!(space::display_p3().convert_to_xyz(color).approx_eq(&actual, 1e-3));
    Ok(())
}
