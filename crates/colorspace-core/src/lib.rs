//! # colorspace-core
//!
//! Calibrated color spaces that convert through absolute CIE XYZ, the
//! fixed-point and rational numbers ICC profiles are built from, and a
//! decoder for ICC profile tags.
//!
//! ## Conversion model
//!
//! Every space removes its tone curve, maps linear values into absolute
//! XYZ through its reference white and black points, and back out again on
//! the other side. Spaces with different white points meet in raw XYZ;
//! chromatic adaptation is opt-in through [`ConversionOptions`].
//!
//! ## Quick Start
//!
//! ```
//! use colorspace_core::{ColorSpaceBase, Rgb, space};
//!
//! let srgb = space::srgb();
//! let p3 = space::display_p3();
//!
//! let red = srgb.convert_to(p3, Rgb::new(1.0, 0.0, 0.0));
//! assert!(red.r < 1.0 && red.g > 0.0);
//! ```
//!
//! ## ICC profiles
//!
//! ```
//! use colorspace_core::{AnyColorSpace, space};
//!
//! let bytes = space::adobe_rgb().icc_profile("Adobe RGB (1998)")?;
//! let imported = AnyColorSpace::from_icc(&bytes)?;
//! assert_eq!(imported.components(), 3);
//! # Ok::<(), colorspace_core::Error>(())
//! ```

pub mod color;
pub mod error;
pub mod icc;
pub mod math;
pub mod numeric;
pub mod space;

pub use color::{Chromaticity, Rgb, Xyz};
pub use error::{Error, Result};
pub use icc::{IccProfile, RenderingIntent};
pub use math::ChromaticAdaptationMethod;
pub use numeric::{FixedPoint, Rational, S15Fixed16, U8Fixed8, U16Fixed16};
pub use space::{
    AnyColorSpace, CalibratedGrayColorSpace, CalibratedRgbColorSpace, CieXyzColorSpace,
    ColorSpaceBase, ConversionOptions, ToneCurve,
};

/// Version of colorspace-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
