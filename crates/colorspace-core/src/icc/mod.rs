//! ICC Profile Parsing and Writing
//!
//! Native ICC profile decoding according to ICC.1:2022, plus a small
//! writer for v4 display profiles.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may overlap)
//!
//! # Example
//!
//! ```ignore
//! use colorspace_core::icc::IccProfile;
//!
//! let profile = IccProfile::parse(bytes)?;
//! if profile.is_matrix_shaper() {
//!     let red = profile.red_trc()?;
//! }
//! ```

pub mod header;
pub mod tags;

mod error;
mod parser;
pub(crate) mod reader;
mod types;
mod writer;

pub use error::IccError;
pub use header::{DataColorSpace, IccHeader, ProfileClass, ProfileVersion, RenderingIntent};
pub use parser::IccProfile;
pub use tags::{
    IccCurve, LocalizedString, LutTransform, MultiLocalizedUnicode, NamedColorList, TagData,
    TextDescription,
};
pub use types::{DateTimeNumber, TagSignature, TypeSignature};
pub use writer::ProfileWriter;
