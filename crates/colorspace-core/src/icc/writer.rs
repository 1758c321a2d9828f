//! ICC Profile Writer
//!
//! Assembles a header, a tag table and 4-byte aligned tag payloads. The
//! header's size field is filled in by [`ProfileWriter::finish`].

use crate::color::Xyz;

use super::header::{HEADER_SIZE, IccHeader};
use super::tags::{IccCurve, MultiLocalizedUnicode, encode_s15fixed16, encode_xyz};
use super::types::TagSignature;

#[derive(Debug, Clone)]
pub struct ProfileWriter {
    header: IccHeader,
    tags: Vec<(TagSignature, Vec<u8>)>,
}

impl ProfileWriter {
    pub fn new(header: IccHeader) -> Self {
        Self {
            header,
            tags: Vec::new(),
        }
    }

    pub fn header_mut(&mut self) -> &mut IccHeader {
        &mut self.header
    }

    /// Add a complete tag payload, replacing any earlier tag with `sig`
    pub fn add_tag(&mut self, sig: TagSignature, payload: Vec<u8>) -> &mut Self {
        match self.tags.iter_mut().find(|(s, _)| *s == sig) {
            Some((_, existing)) => *existing = payload,
            None => self.tags.push((sig, payload)),
        }
        self
    }

    /// Single-record `mluc` in English (US)
    pub fn add_text(&mut self, sig: TagSignature, text: &str) -> &mut Self {
        self.add_tag(sig, MultiLocalizedUnicode::single("en", "US", text).encode())
    }

    pub fn add_xyz(&mut self, sig: TagSignature, xyz: Xyz) -> &mut Self {
        self.add_tag(sig, encode_xyz(&[xyz]))
    }

    pub fn add_s15fixed16(&mut self, sig: TagSignature, values: &[f64]) -> &mut Self {
        self.add_tag(sig, encode_s15fixed16(values))
    }

    pub fn add_curve(&mut self, sig: TagSignature, curve: &IccCurve) -> &mut Self {
        self.add_tag(sig, curve.encode())
    }

    pub fn has_tag(&self, sig: TagSignature) -> bool {
        self.tags.iter().any(|(s, _)| *s == sig)
    }

    /// Serialize the profile
    pub fn finish(&self) -> Vec<u8> {
        let table_size = 4 + 12 * self.tags.len();
        let mut offset = align4(HEADER_SIZE + table_size);

        let mut out = Vec::new();
        self.header.write(&mut out);
        out.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());

        for (sig, payload) in &self.tags {
            out.extend_from_slice(&sig.0.to_be_bytes());
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            offset = align4(offset + payload.len());
        }

        for (_, payload) in &self.tags {
            out.resize(align4(out.len()), 0);
            out.extend_from_slice(payload);
        }
        out.resize(align4(out.len()), 0);

        let size = out.len() as u32;
        out[..4].copy_from_slice(&size.to_be_bytes());

        tracing::debug!(tags = self.tags.len(), size, "wrote ICC profile");
        out
    }
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::header::{DataColorSpace, ProfileClass};
    use crate::icc::parser::IccProfile;

    const EPSILON: f64 = 1e-4;

    fn writer() -> ProfileWriter {
        ProfileWriter::new(IccHeader::new(
            ProfileClass::Display,
            DataColorSpace::Gray,
            DataColorSpace::Xyz,
        ))
    }

    #[test]
    fn test_written_profile_parses() {
        let white = Xyz::new(0.9642, 1.0, 0.8249);
        let mut w = writer();
        w.add_text(TagSignature::DESC, "Gray 2.2")
            .add_xyz(TagSignature::MEDIA_WHITE, white)
            .add_curve(TagSignature::GRAY_TRC, &IccCurve::Gamma(2.2));
        let bytes = w.finish();

        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(
            u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize,
            bytes.len()
        );

        let profile = IccProfile::parse(bytes).unwrap();
        assert_eq!(profile.header().version.major, 4);
        assert_eq!(profile.header().version.minor, 3);
        assert_eq!(profile.description().as_deref(), Some("Gray 2.2"));
        assert!(profile.media_white_point().unwrap().approx_eq(&white, EPSILON));
        assert!(profile.is_matrix_shaper());
        assert!(profile.gray_trc().is_ok());
    }

    #[test]
    fn test_tag_offsets_are_aligned() {
        let mut w = writer();
        // 10-byte payload forces padding before the next tag
        w.add_tag(TagSignature::from_bytes(*b"test"), vec![1; 10])
            .add_xyz(TagSignature::MEDIA_WHITE, Xyz::default());
        let bytes = w.finish();

        for i in 0..2 {
            let entry = HEADER_SIZE + 4 + i * 12;
            let offset = u32::from_be_bytes([
                bytes[entry + 4],
                bytes[entry + 5],
                bytes[entry + 6],
                bytes[entry + 7],
            ]);
            assert_eq!(offset % 4, 0);
        }
    }

    #[test]
    fn test_add_tag_replaces() {
        let mut w = writer();
        w.add_text(TagSignature::COPYRIGHT, "first")
            .add_text(TagSignature::COPYRIGHT, "second");
        assert!(w.has_tag(TagSignature::COPYRIGHT));

        let profile = IccProfile::parse(w.finish()).unwrap();
        assert_eq!(profile.tag_count(), 1);
        assert_eq!(profile.copyright().as_deref(), Some("second"));
    }
}
