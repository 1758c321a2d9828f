//! ICC Profile Basic Types
//!
//! Signatures are 4-byte ASCII codes stored as big-endian `u32`.

use std::fmt;

use super::error::IccError;
use super::reader::Reader;

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const A2B0: Self = Self::from_bytes(*b"A2B0");
    pub const A2B1: Self = Self::from_bytes(*b"A2B1");
    pub const A2B2: Self = Self::from_bytes(*b"A2B2");
    pub const B2A0: Self = Self::from_bytes(*b"B2A0");
    pub const B2A1: Self = Self::from_bytes(*b"B2A1");
    pub const B2A2: Self = Self::from_bytes(*b"B2A2");
    pub const BLUE_COLORANT: Self = Self::from_bytes(*b"bXYZ");
    pub const BLUE_TRC: Self = Self::from_bytes(*b"bTRC");
    pub const CHAD: Self = Self::from_bytes(*b"chad");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const DEVICE_MFG_DESC: Self = Self::from_bytes(*b"dmnd");
    pub const DEVICE_MODEL_DESC: Self = Self::from_bytes(*b"dmdd");
    pub const GRAY_TRC: Self = Self::from_bytes(*b"kTRC");
    pub const GREEN_COLORANT: Self = Self::from_bytes(*b"gXYZ");
    pub const GREEN_TRC: Self = Self::from_bytes(*b"gTRC");
    pub const LUMINANCE: Self = Self::from_bytes(*b"lumi");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const NAMED_COLOR2: Self = Self::from_bytes(*b"ncl2");
    pub const RED_COLORANT: Self = Self::from_bytes(*b"rXYZ");
    pub const RED_TRC: Self = Self::from_bytes(*b"rTRC");
    pub const VIEW_COND_DESC: Self = Self::from_bytes(*b"vued");
}

impl fmt::Display for TagSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_bytes()))
    }
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const PARA: Self = Self::from_bytes(*b"para");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const NCL2: Self = Self::from_bytes(*b"ncl2");
    pub const LUT8: Self = Self::from_bytes(*b"mft1");
    pub const LUT16: Self = Self::from_bytes(*b"mft2");
    pub const LUTA2B: Self = Self::from_bytes(*b"mAB ");
    pub const LUTB2A: Self = Self::from_bytes(*b"mBA ");
    pub const SF32: Self = Self::from_bytes(*b"sf32");
    pub const UF32: Self = Self::from_bytes(*b"uf32");
    pub const UI08: Self = Self::from_bytes(*b"ui08");
    pub const UI16: Self = Self::from_bytes(*b"ui16");
    pub const UI32: Self = Self::from_bytes(*b"ui32");
    pub const UI64: Self = Self::from_bytes(*b"ui64");
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0.to_be_bytes()))
    }
}

/// dateTimeNumber - ICC date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self, IccError> {
        Ok(Self {
            year: reader.u16()?,
            month: reader.u16()?,
            day: reader.u16()?,
            hour: reader.u16()?,
            minute: reader.u16()?,
            second: reader.u16()?,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        for field in [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ] {
            out.extend_from_slice(&field.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_signature_display() {
        assert_eq!(TagSignature::DESC.to_string(), "desc");
        assert_eq!(TagSignature::RED_COLORANT.to_string(), "rXYZ");
        assert_eq!(TypeSignature::LUTA2B.to_string(), "mAB ");
    }

    #[test]
    fn test_date_time_layout() {
        let date = DateTimeNumber {
            year: 2024,
            month: 2,
            day: 29,
            hour: 23,
            minute: 59,
            second: 1,
        };
        let mut bytes = Vec::new();
        date.write(&mut bytes);
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[..2], &2024u16.to_be_bytes());

        let parsed = DateTimeNumber::read(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(parsed, date);
    }
}
