//! ICC Profile Error Types

use std::fmt;

/// Errors that can occur when decoding ICC profiles and tags
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Structurally malformed tag or profile data
    InvalidFormat(String),
    /// Buffer is shorter than a field demands
    EndOfData,
    /// Profile data is too small
    TooSmall { expected: usize, actual: usize },
    /// Invalid profile signature (should be 'acsp')
    InvalidSignature(u32),
    /// Profile size in header doesn't match data
    SizeMismatch {
        header_size: u32,
        actual_size: usize,
    },
    /// Tag offset is out of bounds
    TagOutOfBounds {
        tag: u32,
        offset: u32,
        size: u32,
        profile_size: usize,
    },
    /// Required tag is missing
    MissingTag(u32),
    /// Invalid color space
    InvalidColorSpace(u32),
    /// Invalid profile class
    InvalidProfileClass(u32),
    /// Unsupported feature
    Unsupported(String),
}

impl IccError {
    /// Tag type signature did not match what the accessor decodes
    pub(crate) fn type_mismatch(expected: &[u8; 4], actual: u32) -> Self {
        Self::InvalidFormat(format!(
            "expected '{}' tag type, found '{}'",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&actual.to_be_bytes())
        ))
    }
}

impl fmt::Display for IccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Self::EndOfData => write!(f, "Unexpected end of data"),
            Self::TooSmall { expected, actual } => {
                write!(
                    f,
                    "Profile too small: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Self::InvalidSignature(sig) => {
                write!(
                    f,
                    "Invalid profile signature: 0x{:08X} (expected 'acsp')",
                    sig
                )
            }
            Self::SizeMismatch {
                header_size,
                actual_size,
            } => {
                write!(
                    f,
                    "Size mismatch: header says {} bytes, data is {} bytes",
                    header_size, actual_size
                )
            }
            Self::TagOutOfBounds {
                tag,
                offset,
                size,
                profile_size,
            } => {
                write!(
                    f,
                    "Tag '{:08X}' out of bounds: offset {} + size {} > profile size {}",
                    tag, offset, size, profile_size
                )
            }
            Self::MissingTag(tag) => {
                write!(
                    f,
                    "Required tag missing: '{}'",
                    String::from_utf8_lossy(&tag.to_be_bytes())
                )
            }
            Self::InvalidColorSpace(cs) => {
                write!(f, "Invalid color space: 0x{:08X}", cs)
            }
            Self::InvalidProfileClass(class) => {
                write!(f, "Invalid profile class: 0x{:08X}", class)
            }
            Self::Unsupported(msg) => {
                write!(f, "Unsupported feature: {}", msg)
            }
        }
    }
}

impl std::error::Error for IccError {}
