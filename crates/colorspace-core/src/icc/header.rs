//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.

use crate::color::{PCS_ILLUMINANT, Xyz};
use crate::numeric::S15Fixed16;

use super::error::IccError;
use super::reader::Reader;
use super::types::DateTimeNumber;

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header size; the tag table starts right after it
pub const HEADER_SIZE: usize = 128;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version (major.minor.patch)
    pub version: ProfileVersion,
    /// Device class (display, input, output, etc.)
    pub device_class: ProfileClass,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: DataColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: DataColorSpace,
    pub creation_date: DateTimeNumber,
    /// Primary platform signature
    pub platform: u32,
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes
    pub attributes: u64,
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (should be D50)
    pub illuminant: Xyz,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl IccHeader {
    /// A v4.3 header with the D50 PCS illuminant and zeroed vendor fields
    pub fn new(device_class: ProfileClass, color_space: DataColorSpace, pcs: DataColorSpace) -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version: ProfileVersion {
                major: 4,
                minor: 3,
                patch: 0,
            },
            device_class,
            color_space,
            pcs,
            creation_date: DateTimeNumber::default(),
            platform: 0,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual,
            illuminant: PCS_ILLUMINANT,
            creator: 0,
            profile_id: [0; 16],
        }
    }

    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let mut r = Reader::new(data);
        let size = r.u32()?;
        let cmm_type = r.u32()?;

        let version = r.bytes(4)?;
        let version = ProfileVersion {
            major: version[0],
            minor: version[1] >> 4,
            patch: version[1] & 0x0F,
        };

        let device_class = ProfileClass::from_u32(r.u32()?)?;
        let color_space = DataColorSpace::from_u32(r.u32()?)?;
        let pcs = DataColorSpace::from_u32(r.u32()?)?;
        let creation_date = DateTimeNumber::read(&mut r)?;

        let signature = r.u32()?;
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let platform = r.u32()?;
        let flags = r.u32()?;
        let manufacturer = r.u32()?;
        let model = r.u32()?;
        let attributes = r.u64()?;

        // only the low 16 bits carry the intent
        let intent_value = r.u32()? & 0xFFFF;
        let rendering_intent = RenderingIntent::from_u32(intent_value).ok_or_else(|| {
            IccError::InvalidFormat(format!("unknown rendering intent {}", intent_value))
        })?;

        let illuminant = r.xyz()?;
        let creator = r.u32()?;

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(r.bytes(16)?);

        Ok(Self {
            size,
            cmm_type,
            version,
            device_class,
            color_space,
            pcs,
            creation_date,
            platform,
            flags,
            manufacturer,
            model,
            attributes,
            rendering_intent,
            illuminant,
            creator,
            profile_id,
        })
    }

    /// Append the 128-byte encoding to `out`
    pub fn write(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.extend_from_slice(&self.size.to_be_bytes());
        out.extend_from_slice(&self.cmm_type.to_be_bytes());
        out.extend_from_slice(&[
            self.version.major,
            (self.version.minor << 4) | (self.version.patch & 0x0F),
            0,
            0,
        ]);
        out.extend_from_slice(&self.device_class.to_u32().to_be_bytes());
        out.extend_from_slice(&self.color_space.to_u32().to_be_bytes());
        out.extend_from_slice(&self.pcs.to_u32().to_be_bytes());
        self.creation_date.write(out);
        out.extend_from_slice(&PROFILE_SIGNATURE.to_be_bytes());
        out.extend_from_slice(&self.platform.to_be_bytes());
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.manufacturer.to_be_bytes());
        out.extend_from_slice(&self.model.to_be_bytes());
        out.extend_from_slice(&self.attributes.to_be_bytes());
        out.extend_from_slice(&self.rendering_intent.to_u32().to_be_bytes());
        for value in self.illuminant.to_array() {
            S15Fixed16::from_f64(value).write_be(out);
        }
        out.extend_from_slice(&self.creator.to_be_bytes());
        out.extend_from_slice(&self.profile_id);
        out.resize(start + HEADER_SIZE, 0);
    }

    /// Check the declared size against the buffer
    pub fn validate(&self, data_len: usize) -> Result<(), IccError> {
        if self.size as usize > data_len {
            return Err(IccError::SizeMismatch {
                header_size: self.size,
                actual_size: data_len,
            });
        }

        Ok(())
    }

    /// Display, input or output class with RGB data
    pub fn is_matrix_shaper(&self) -> bool {
        matches!(
            self.device_class,
            ProfileClass::Display | ProfileClass::Input | ProfileClass::Output
        ) && matches!(self.color_space, DataColorSpace::Rgb | DataColorSpace::Gray)
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    /// Check if version is at least the specified version
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }

    pub fn is_v4(&self) -> bool {
        self.major == 4
    }

    pub fn is_v2(&self) -> bool {
        self.major == 2
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    Abstract,
    NamedColor,
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match &val.to_be_bytes() {
            b"scnr" => Ok(Self::Input),
            b"mntr" => Ok(Self::Display),
            b"prtr" => Ok(Self::Output),
            b"link" => Ok(Self::DeviceLink),
            b"spac" => Ok(Self::ColorSpace),
            b"abst" => Ok(Self::Abstract),
            b"nmcl" => Ok(Self::NamedColor),
            _ => Err(IccError::InvalidProfileClass(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(match self {
            Self::Input => *b"scnr",
            Self::Display => *b"mntr",
            Self::Output => *b"prtr",
            Self::DeviceLink => *b"link",
            Self::ColorSpace => *b"spac",
            Self::Abstract => *b"abst",
            Self::NamedColor => *b"nmcl",
        })
    }
}

/// Data or connection color space signature of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    /// `nCLR` with 2 to 15 channels
    Color(u8),
}

impl DataColorSpace {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        let bytes = val.to_be_bytes();
        match &bytes {
            b"XYZ " => Ok(Self::Xyz),
            b"Lab " => Ok(Self::Lab),
            b"Luv " => Ok(Self::Luv),
            b"YCbr" => Ok(Self::YCbCr),
            b"Yxy " => Ok(Self::Yxy),
            b"RGB " => Ok(Self::Rgb),
            b"GRAY" => Ok(Self::Gray),
            b"HSV " => Ok(Self::Hsv),
            b"HLS " => Ok(Self::Hls),
            b"CMYK" => Ok(Self::Cmyk),
            b"CMY " => Ok(Self::Cmy),
            [digit, b'C', b'L', b'R'] => match (*digit as char).to_digit(16) {
                Some(n @ 2..=15) => Ok(Self::Color(n as u8)),
                _ => Err(IccError::InvalidColorSpace(val)),
            },
            _ => Err(IccError::InvalidColorSpace(val)),
        }
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(match self {
            Self::Xyz => *b"XYZ ",
            Self::Lab => *b"Lab ",
            Self::Luv => *b"Luv ",
            Self::YCbCr => *b"YCbr",
            Self::Yxy => *b"Yxy ",
            Self::Rgb => *b"RGB ",
            Self::Gray => *b"GRAY",
            Self::Hsv => *b"HSV ",
            Self::Hls => *b"HLS ",
            Self::Cmyk => *b"CMYK",
            Self::Cmy => *b"CMY ",
            Self::Color(n) => {
                let digit = char::from_digit(*n as u32, 16)
                    .map(|c| c.to_ascii_uppercase() as u8)
                    .unwrap_or(b'0');
                [digit, b'C', b'L', b'R']
            }
        })
    }

    /// Number of channels for this color space
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Xyz
            | Self::Lab
            | Self::Luv
            | Self::YCbCr
            | Self::Yxy
            | Self::Rgb
            | Self::Hsv
            | Self::Hls
            | Self::Cmy => 3,
            Self::Cmyk => 4,
            Self::Color(n) => *n as usize,
        }
    }
}

/// ICC Rendering Intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderingIntent {
    /// Perceptual - best for photographs
    #[default]
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors
    RelativeColorimetric,
    /// Saturation - maintains saturation
    Saturation,
    /// Absolute colorimetric - preserves white point
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Perceptual),
            1 => Some(Self::RelativeColorimetric),
            2 => Some(Self::Saturation),
            3 => Some(Self::AbsoluteColorimetric),
            _ => None,
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }
}
