//! ICC Profile Parser
//!
//! An ICC profile consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (may overlap/share data)
//!
//! Parsing validates the header and the tag table bounds only. Tag payloads
//! are decoded on access through [`TagData`].
//!
//! # Usage
//!
//! ```ignore
//! let profile = IccProfile::parse(bytes)?;
//! println!("Profile: {:?}", profile.description());
//! ```

use crate::color::Xyz;
use crate::math::Matrix3x3;

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader, RenderingIntent};
use super::reader::Reader;
use super::tags::{IccCurve, TagData};
use super::types::TagSignature;

const TAG_ENTRY_SIZE: usize = 12;

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagEntry {
    signature: TagSignature,
    offset: usize,
    size: usize,
}

/// An ICC profile that owns its bytes
#[derive(Debug, Clone)]
pub struct IccProfile {
    header: IccHeader,
    entries: Vec<TagEntry>,
    data: Vec<u8>,
}

impl IccProfile {
    /// Parse an ICC profile, taking ownership of the buffer
    pub fn parse(data: Vec<u8>) -> Result<Self, IccError> {
        let header = IccHeader::parse(&data)?;
        header.validate(data.len())?;

        let mut r = Reader::at(&data, HEADER_SIZE).map_err(|_| IccError::TooSmall {
            expected: HEADER_SIZE + 4,
            actual: data.len(),
        })?;
        let count = r.u32().map_err(|_| IccError::TooSmall {
            expected: HEADER_SIZE + 4,
            actual: data.len(),
        })? as usize;

        if r.remaining() / TAG_ENTRY_SIZE < count {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE + 4 + count.saturating_mul(TAG_ENTRY_SIZE),
                actual: data.len(),
            });
        }
        let table_end = r.position() + count * TAG_ENTRY_SIZE;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let signature = TagSignature(r.u32()?);
            let offset = r.u32()?;
            let size = r.u32()?;

            let end = offset as usize + size as usize;
            if end > data.len() {
                return Err(IccError::TagOutOfBounds {
                    tag: signature.0,
                    offset,
                    size,
                    profile_size: data.len(),
                });
            }
            if (offset as usize) < table_end {
                tracing::warn!(tag = %signature, offset, "tag data overlaps the header or tag table");
            }

            entries.push(TagEntry {
                signature,
                offset: offset as usize,
                size: size as usize,
            });
        }

        tracing::debug!(
            tags = entries.len(),
            version = %format_args!("{}.{}", header.version.major, header.version.minor),
            class = ?header.device_class,
            color_space = ?header.color_space,
            "parsed ICC profile"
        );

        Ok(Self {
            header,
            entries,
            data,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, IccError> {
        Self::parse(data.to_vec())
    }

    pub fn header(&self) -> &IccHeader {
        &self.header
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    pub fn tag_count(&self) -> usize {
        self.entries.len()
    }

    /// Tag signatures in table order
    pub fn tag_signatures(&self) -> impl Iterator<Item = TagSignature> + '_ {
        self.entries.iter().map(|e| e.signature)
    }

    /// First tag with the given signature
    pub fn tag(&self, sig: TagSignature) -> Option<TagData<'_>> {
        let entry = self.entries.iter().find(|e| e.signature == sig)?;
        tracing::trace!(tag = %sig, offset = entry.offset, size = entry.size, "tag access");
        self.data
            .get(entry.offset..entry.offset + entry.size)
            .map(TagData::new)
    }

    pub fn has_tag(&self, sig: TagSignature) -> bool {
        self.entries.iter().any(|e| e.signature == sig)
    }

    fn xyz(&self, sig: TagSignature) -> Option<Xyz> {
        self.tag(sig)?.xyz_array()?.first().copied()
    }

    fn required_curve(&self, sig: TagSignature) -> Result<IccCurve, IccError> {
        self.tag(sig).ok_or(IccError::MissingTag(sig.0))?.curve()
    }

    pub fn media_white_point(&self) -> Option<Xyz> {
        self.xyz(TagSignature::MEDIA_WHITE)
    }

    pub fn media_black_point(&self) -> Option<Xyz> {
        self.xyz(TagSignature::MEDIA_BLACK)
    }

    /// Absolute luminance of the white point in cd/m², from `lumi`
    pub fn luminance(&self) -> Option<f64> {
        self.xyz(TagSignature::LUMINANCE).map(|xyz| xyz.y)
    }

    pub fn red_colorant(&self) -> Option<Xyz> {
        self.xyz(TagSignature::RED_COLORANT)
    }

    pub fn green_colorant(&self) -> Option<Xyz> {
        self.xyz(TagSignature::GREEN_COLORANT)
    }

    pub fn blue_colorant(&self) -> Option<Xyz> {
        self.xyz(TagSignature::BLUE_COLORANT)
    }

    pub fn red_trc(&self) -> Result<IccCurve, IccError> {
        self.required_curve(TagSignature::RED_TRC)
    }

    pub fn green_trc(&self) -> Result<IccCurve, IccError> {
        self.required_curve(TagSignature::GREEN_TRC)
    }

    pub fn blue_trc(&self) -> Result<IccCurve, IccError> {
        self.required_curve(TagSignature::BLUE_TRC)
    }

    pub fn gray_trc(&self) -> Result<IccCurve, IccError> {
        self.required_curve(TagSignature::GRAY_TRC)
    }

    pub fn description(&self) -> Option<String> {
        self.tag(TagSignature::DESC)?.display_text()
    }

    pub fn copyright(&self) -> Option<String> {
        self.tag(TagSignature::COPYRIGHT)?.display_text()
    }

    /// `chad` matrix, row-major
    pub fn chromatic_adaptation(&self) -> Option<Matrix3x3> {
        let values = self.tag(TagSignature::CHAD)?.s15fixed16_array()?;
        let v = values.get(..9)?;
        Some(Matrix3x3::new([
            [v[0], v[1], v[2]],
            [v[3], v[4], v[5]],
            [v[6], v[7], v[8]],
        ]))
    }

    /// RGB or gray class with colorants and TRCs present
    pub fn is_matrix_shaper(&self) -> bool {
        use super::header::DataColorSpace;

        if !self.header.is_matrix_shaper() {
            return false;
        }
        match self.header.color_space {
            DataColorSpace::Gray => self.has_tag(TagSignature::GRAY_TRC),
            _ => [
                TagSignature::RED_COLORANT,
                TagSignature::GREEN_COLORANT,
                TagSignature::BLUE_COLORANT,
                TagSignature::RED_TRC,
                TagSignature::GREEN_TRC,
                TagSignature::BLUE_TRC,
            ]
            .into_iter()
            .all(|sig| self.has_tag(sig)),
        }
    }

    pub fn is_lut_based(&self) -> bool {
        self.has_tag(TagSignature::A2B0) || self.has_tag(TagSignature::B2A0)
    }

    /// Device-to-PCS LUT for `intent`, falling back to `A2B0`
    pub fn a2b(&self, intent: RenderingIntent) -> Option<TagData<'_>> {
        let sig = match intent {
            RenderingIntent::Perceptual => TagSignature::A2B0,
            RenderingIntent::RelativeColorimetric | RenderingIntent::AbsoluteColorimetric => {
                TagSignature::A2B1
            }
            RenderingIntent::Saturation => TagSignature::A2B2,
        };
        self.tag(sig).or_else(|| self.tag(TagSignature::A2B0))
    }

    /// PCS-to-device LUT for `intent`, falling back to `B2A0`
    pub fn b2a(&self, intent: RenderingIntent) -> Option<TagData<'_>> {
        let sig = match intent {
            RenderingIntent::Perceptual => TagSignature::B2A0,
            RenderingIntent::RelativeColorimetric | RenderingIntent::AbsoluteColorimetric => {
                TagSignature::B2A1
            }
            RenderingIntent::Saturation => TagSignature::B2A2,
        };
        self.tag(sig).or_else(|| self.tag(TagSignature::B2A0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::header::{DataColorSpace, PROFILE_SIGNATURE, ProfileClass};
    use crate::icc::tags::{LutTransform, MultiLocalizedUnicode, encode_xyz};

    const EPSILON: f64 = 1e-4;

    /// Header plus a tag table pointing at `tags` laid out back to back
    fn build_profile(tags: &[(TagSignature, Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        IccHeader::new(ProfileClass::Display, DataColorSpace::Rgb, DataColorSpace::Xyz)
            .write(&mut data);
        data.extend_from_slice(&(tags.len() as u32).to_be_bytes());

        let mut offset = HEADER_SIZE + 4 + tags.len() * TAG_ENTRY_SIZE;
        let mut body = Vec::new();
        for (sig, payload) in tags {
            data.extend_from_slice(&sig.0.to_be_bytes());
            data.extend_from_slice(&(offset as u32).to_be_bytes());
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            body.extend_from_slice(payload);
            offset += payload.len();
        }
        data.extend_from_slice(&body);
        let size = data.len() as u32;
        data[..4].copy_from_slice(&size.to_be_bytes());
        data
    }

    #[test]
    fn test_parse_minimal_profile() {
        let profile = IccProfile::parse(build_profile(&[])).unwrap();
        assert_eq!(profile.header().version.major, 4);
        assert_eq!(profile.tag_count(), 0);
        assert!(profile.description().is_none());
        assert_eq!(
            profile.red_trc(),
            Err(IccError::MissingTag(TagSignature::RED_TRC.0))
        );
    }

    #[test]
    fn test_profile_too_small() {
        let data = vec![0u8; 100];
        assert!(matches!(
            IccProfile::from_bytes(&data),
            Err(IccError::TooSmall { .. })
        ));
    }

    #[test]
    fn test_bad_signature() {
        let mut data = build_profile(&[]);
        data[36..40].copy_from_slice(b"xxxx");
        assert_eq!(
            IccProfile::parse(data).unwrap_err(),
            IccError::InvalidSignature(u32::from_be_bytes(*b"xxxx"))
        );
        assert_eq!(PROFILE_SIGNATURE, u32::from_be_bytes(*b"acsp"));
    }

    #[test]
    fn test_tag_lookup() {
        let white = Xyz::new(0.9642, 1.0, 0.8249);
        let data = build_profile(&[
            (TagSignature::MEDIA_WHITE, encode_xyz(&[white])),
            (TagSignature::RED_TRC, IccCurve::Gamma(2.2).encode()),
            (
                TagSignature::DESC,
                MultiLocalizedUnicode::single("en", "US", "Test RGB").encode(),
            ),
        ]);
        let profile = IccProfile::parse(data).unwrap();

        assert_eq!(profile.tag_count(), 3);
        assert!(profile.has_tag(TagSignature::RED_TRC));
        assert!(!profile.has_tag(TagSignature::GREEN_TRC));
        assert!(profile.media_white_point().unwrap().approx_eq(&white, EPSILON));
        match profile.red_trc().unwrap() {
            IccCurve::Gamma(g) => assert!((g - 2.2).abs() < EPSILON),
            other => panic!("unexpected curve {:?}", other),
        }
        assert_eq!(profile.description().as_deref(), Some("Test RGB"));
        assert!(!profile.is_matrix_shaper());
        assert_eq!(
            profile.tag_signatures().collect::<Vec<_>>(),
            vec![TagSignature::MEDIA_WHITE, TagSignature::RED_TRC, TagSignature::DESC]
        );
    }

    #[test]
    fn test_tag_out_of_bounds() {
        let mut data = build_profile(&[(TagSignature::MEDIA_WHITE, encode_xyz(&[Xyz::default()]))]);
        // size field of the only entry
        let size_pos = HEADER_SIZE + 4 + 8;
        data[size_pos..size_pos + 4].copy_from_slice(&1000u32.to_be_bytes());
        assert!(matches!(
            IccProfile::parse(data),
            Err(IccError::TagOutOfBounds { size: 1000, .. })
        ));
    }

    #[test]
    fn test_truncated_tag_table() {
        let mut data = build_profile(&[]);
        data[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&5u32.to_be_bytes());
        assert!(matches!(
            IccProfile::parse(data),
            Err(IccError::TooSmall { .. })
        ));
    }

    /// 3-in 3-out `mft2` with a 2-point grid holding the identity
    fn identity_lut16() -> Vec<u8> {
        let mut data = b"mft2\0\0\0\0".to_vec();
        data.extend_from_slice(&[3, 3, 2, 0]);
        for row in 0..3 {
            for col in 0..3 {
                let v: i32 = if row == col { 0x10000 } else { 0 };
                data.extend_from_slice(&v.to_be_bytes());
            }
        }
        data.extend_from_slice(&2u16.to_be_bytes());
        data.extend_from_slice(&2u16.to_be_bytes());
        let ramp = |data: &mut Vec<u8>| {
            for _ in 0..3 {
                data.extend_from_slice(&0u16.to_be_bytes());
                data.extend_from_slice(&0xFFFFu16.to_be_bytes());
            }
        };
        ramp(&mut data);
        for i in 0..8u16 {
            for channel in 0..3 {
                let bit = (i >> (2 - channel)) & 1;
                data.extend_from_slice(&(bit * 0xFFFF).to_be_bytes());
            }
        }
        ramp(&mut data);
        data
    }

    #[test]
    fn test_lut_intent_fallback() {
        let data = build_profile(&[
            (TagSignature::A2B0, identity_lut16()),
            (TagSignature::B2A0, identity_lut16()),
        ]);
        let profile = IccProfile::parse(data).unwrap();
        assert!(profile.is_lut_based());

        let b2a = profile.b2a(RenderingIntent::Perceptual).expect("B2A0 present");
        assert_eq!(profile.b2a(RenderingIntent::RelativeColorimetric), Some(b2a));
        let lut = b2a.transform().unwrap();
        assert!(matches!(lut, LutTransform::Lut16(_)));
        assert_eq!(lut.input_channels(), 3);
        assert_eq!(lut.output_channels(), 3);

        let only_a2b = IccProfile::parse(build_profile(&[(TagSignature::A2B0, identity_lut16())]))
            .unwrap();
        assert!(only_a2b.a2b(RenderingIntent::Saturation).is_some());
        assert!(only_a2b.b2a(RenderingIntent::Perceptual).is_none());
    }

    #[test]
    fn test_chad_matrix() {
        let values = [1.0479, 0.0229, -0.0502, 0.0296, 0.9904, -0.0171, -0.0092, 0.0151, 0.7519];
        let data = build_profile(&[(
            TagSignature::CHAD,
            crate::icc::tags::encode_s15fixed16(&values),
        )]);
        let profile = IccProfile::parse(data).unwrap();
        let chad = profile.chromatic_adaptation().unwrap();
        assert!((chad[1][1] - 0.9904).abs() < EPSILON);
        assert!((chad[2][0] + 0.0092).abs() < EPSILON);
    }
}
