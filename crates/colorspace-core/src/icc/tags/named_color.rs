//! Named color tag (`ncl2`)
//!
//! See ICC.1:2022 Section 10.17

use crate::icc::error::IccError;
use crate::icc::reader::Reader;
use crate::icc::types::TypeSignature;

use super::text::typed_reader;

const NAME_LEN: usize = 32;

/// One entry of a named color list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    /// Root name, without the list prefix and suffix
    pub name: String,
    /// PCS coordinates in the profile's 16-bit PCS encoding
    pub pcs: [u16; 3],
    /// Device coordinates, one per device channel
    pub device: Vec<u16>,
}

/// Decoded `ncl2` tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedColorList {
    pub vendor_flags: u32,
    pub prefix: String,
    pub suffix: String,
    /// Number of device coordinates per color
    pub device_coordinates: usize,
    pub colors: Vec<NamedColor>,
}

impl NamedColorList {
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let mut r = typed_reader(data, TypeSignature::NCL2)?;

        let vendor_flags = r.u32()?;
        let count = r.u32()? as usize;
        let device_coordinates = r.u32()? as usize;
        let prefix = read_name(&mut r)?;
        let suffix = read_name(&mut r)?;

        let entry_size = device_coordinates
            .checked_mul(2)
            .and_then(|d| d.checked_add(NAME_LEN + 6))
            .ok_or_else(|| IccError::InvalidFormat("ncl2 entry size overflows".to_string()))?;
        if r.remaining() / entry_size < count {
            return Err(IccError::EndOfData);
        }

        let colors = (0..count)
            .map(|_| {
                let name = read_name(&mut r)?;
                let pcs = [r.u16()?, r.u16()?, r.u16()?];
                let device = (0..device_coordinates)
                    .map(|_| r.u16())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(NamedColor { name, pcs, device })
            })
            .collect::<Result<Vec<_>, IccError>>()?;

        Ok(Self {
            vendor_flags,
            prefix,
            suffix,
            device_coordinates,
            colors,
        })
    }

    /// `prefix + root + suffix` for the color at `index`
    pub fn full_name(&self, index: usize) -> Option<String> {
        let color = self.colors.get(index)?;
        Some(format!("{}{}{}", self.prefix, color.name, self.suffix))
    }

    /// Look up a color by its root name
    pub fn find(&self, name: &str) -> Option<&NamedColor> {
        self.colors.iter().find(|c| c.name == name)
    }
}

/// 32-byte NUL-padded 7-bit ASCII
fn read_name(r: &mut Reader<'_>) -> Result<String, IccError> {
    Ok(r.bytes(NAME_LEN)?
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> [u8; NAME_LEN] {
        let mut out = [0u8; NAME_LEN];
        out[..s.len()].copy_from_slice(s.as_bytes());
        out
    }

    fn sample() -> Vec<u8> {
        let mut data = b"ncl2\0\0\0\0".to_vec();
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&4u32.to_be_bytes());
        data.extend_from_slice(&name("PANTONE "));
        data.extend_from_slice(&name(" C"));
        for (root, pcs, device) in [
            ("185", [0x4000u16, 0x2000, 0x1000], [0u16, 0xFFFF, 0xCCCC, 0]),
            ("Cool Gray 1", [0xF000, 0xF100, 0xF200], [0x0A00, 0x0800, 0x0A00, 0x1000]),
        ] {
            data.extend_from_slice(&name(root));
            for v in pcs.iter().chain(device.iter()) {
                data.extend_from_slice(&v.to_be_bytes());
            }
        }
        data
    }

    #[test]
    fn test_parse_named_colors() {
        let list = NamedColorList::parse(&sample()).unwrap();
        assert_eq!(list.colors.len(), 2);
        assert_eq!(list.device_coordinates, 4);
        assert_eq!(list.full_name(0).as_deref(), Some("PANTONE 185 C"));

        let gray = list.find("Cool Gray 1").unwrap();
        assert_eq!(gray.pcs, [0xF000, 0xF100, 0xF200]);
        assert_eq!(gray.device, vec![0x0A00, 0x0800, 0x0A00, 0x1000]);
        assert!(list.full_name(2).is_none());
    }

    #[test]
    fn test_truncated_named_colors() {
        let mut data = sample();
        data.truncate(data.len() - 2);
        assert_eq!(NamedColorList::parse(&data), Err(IccError::EndOfData));
    }

    #[test]
    fn test_wrong_type() {
        let mut data = sample();
        data[..4].copy_from_slice(b"text");
        assert!(matches!(
            NamedColorList::parse(&data),
            Err(IccError::InvalidFormat(_))
        ));
    }
}
