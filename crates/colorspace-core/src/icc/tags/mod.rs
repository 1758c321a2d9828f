//! ICC Profile Tag Parsing
//!
//! Tags contain the actual profile data. Each tag has:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! [`TagData`] borrows the tag bytes and decodes on every access.
//!
//! See ICC.1:2022 Section 9.

mod curves;
mod lut;
mod named_color;
mod text;
mod xyz;

pub use curves::IccCurve;
pub use lut::{Clut, ElementLut, LegacyLut, LutTransform};
pub use named_color::{NamedColor, NamedColorList};
pub use text::{LocalizedString, MultiLocalizedUnicode, TextDescription, parse_text};
pub use xyz::{
    encode_s15fixed16, encode_xyz, parse_s15fixed16_array, parse_u16fixed16_array,
    parse_xyz_array,
};

use crate::color::Xyz;

use super::error::IccError;
use super::types::TypeSignature;

/// Borrowed view of one tag's bytes, type header included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagData<'a> {
    raw: &'a [u8],
}

impl<'a> TagData<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    /// `None` when the tag is shorter than a type signature
    pub fn type_signature(&self) -> Option<TypeSignature> {
        let sig = self.raw.get(..4)?;
        Some(TypeSignature(u32::from_be_bytes([sig[0], sig[1], sig[2], sig[3]])))
    }

    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Tag body after the 8-byte type header
    pub fn data(&self) -> &'a [u8] {
        self.raw.get(8..).unwrap_or_default()
    }

    pub fn uint8_array(&self) -> Option<Vec<u8>> {
        xyz::parse_array(self.raw, TypeSignature::UI08, 1, |r| r.u8().ok())
    }

    pub fn uint16_array(&self) -> Option<Vec<u16>> {
        xyz::parse_array(self.raw, TypeSignature::UI16, 2, |r| r.u16().ok())
    }

    pub fn uint32_array(&self) -> Option<Vec<u32>> {
        xyz::parse_array(self.raw, TypeSignature::UI32, 4, |r| r.u32().ok())
    }

    pub fn uint64_array(&self) -> Option<Vec<u64>> {
        xyz::parse_array(self.raw, TypeSignature::UI64, 8, |r| r.u64().ok())
    }

    pub fn xyz_array(&self) -> Option<Vec<Xyz>> {
        parse_xyz_array(self.raw)
    }

    pub fn s15fixed16_array(&self) -> Option<Vec<f64>> {
        parse_s15fixed16_array(self.raw)
    }

    pub fn u16fixed16_array(&self) -> Option<Vec<f64>> {
        parse_u16fixed16_array(self.raw)
    }

    /// `curv` or `para`
    pub fn curve(&self) -> Result<IccCurve, IccError> {
        IccCurve::parse(self.raw)
    }

    pub fn text(&self) -> Result<String, IccError> {
        parse_text(self.raw)
    }

    pub fn text_description(&self) -> Result<TextDescription, IccError> {
        TextDescription::parse(self.raw)
    }

    pub fn multi_localized_unicode(&self) -> Result<MultiLocalizedUnicode, IccError> {
        MultiLocalizedUnicode::parse(self.raw)
    }

    pub fn named_color(&self) -> Result<NamedColorList, IccError> {
        NamedColorList::parse(self.raw)
    }

    /// `mft1`, `mft2`, `mAB ` or `mBA `
    pub fn transform(&self) -> Result<LutTransform, IccError> {
        LutTransform::parse(self.raw)
    }

    /// Human-readable text of a `text`, `desc` or `mluc` tag
    ///
    /// `mluc` prefers English (US), then any English entry, then the first.
    pub fn display_text(&self) -> Option<String> {
        match self.type_signature()? {
            TypeSignature::TEXT => self.text().ok(),
            TypeSignature::DESC => self
                .text_description()
                .ok()
                .map(|desc| desc.text().to_string()),
            TypeSignature::MLUC => self
                .multi_localized_unicode()
                .ok()?
                .best_match("en", "US")
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_signature() {
        let data = encode_xyz(&[Xyz::new(0.5, 0.5, 0.5)]);
        let tag = TagData::new(&data);
        assert_eq!(tag.type_signature(), Some(TypeSignature::XYZ));
        assert_eq!(tag.data().len(), 12);
        assert_eq!(TagData::new(b"XY").type_signature(), None);
        assert!(TagData::new(b"XY").data().is_empty());
    }

    #[test]
    fn test_accessors_gate_on_type() {
        let data = encode_xyz(&[Xyz::new(0.5, 0.5, 0.5)]);
        let tag = TagData::new(&data);
        assert!(tag.xyz_array().is_some());
        assert!(tag.uint16_array().is_none());
        assert!(tag.s15fixed16_array().is_none());
        assert!(matches!(tag.curve(), Err(IccError::InvalidFormat(_))));
        assert!(matches!(tag.text(), Err(IccError::InvalidFormat(_))));
        assert!(matches!(tag.transform(), Err(IccError::InvalidFormat(_))));
        assert!(tag.display_text().is_none());
    }

    #[test]
    fn test_uint_arrays() {
        let mut data = b"ui16\0\0\0\0".to_vec();
        for v in [1u16, 0xFFFF, 42] {
            data.extend_from_slice(&v.to_be_bytes());
        }
        let tag = TagData::new(&data);
        assert_eq!(tag.uint16_array(), Some(vec![1, 0xFFFF, 42]));
        assert!(tag.uint32_array().is_none());

        let mut data = b"ui32\0\0\0\0".to_vec();
        data.extend_from_slice(&7u32.to_be_bytes());
        data.push(0xAA);
        assert_eq!(TagData::new(&data).uint32_array(), Some(vec![7]));
    }

    #[test]
    fn test_display_text() {
        let mluc = MultiLocalizedUnicode {
            entries: vec![
                LocalizedString {
                    language: "de".into(),
                    country: "DE".into(),
                    text: "Farbraum".into(),
                },
                LocalizedString {
                    language: "en".into(),
                    country: "GB".into(),
                    text: "Colour space".into(),
                },
            ],
        }
        .encode();
        assert_eq!(
            TagData::new(&mluc).display_text().as_deref(),
            Some("Colour space")
        );

        let mut text = b"text\0\0\0\0".to_vec();
        text.extend_from_slice(b"Copyright\0");
        assert_eq!(TagData::new(&text).display_text().as_deref(), Some("Copyright"));

        let desc = TextDescription {
            ascii: "sRGB".into(),
            ..Default::default()
        }
        .encode();
        assert_eq!(TagData::new(&desc).display_text().as_deref(), Some("sRGB"));
    }

    #[test]
    fn test_reparse_on_each_access() {
        let data = IccCurve::Gamma(2.2).encode();
        let tag = TagData::new(&data);
        assert_eq!(tag.curve(), tag.curve());
    }
}
