//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format)
//! - mluc: Multi-localized Unicode (v4 format)
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.15 (mluc) and ICC.1:2001-04
//! Section 6.5.17 (desc).

use crate::icc::error::IccError;
use crate::icc::reader::Reader;
use crate::icc::types::TypeSignature;

/// Check the type signature and return a reader past the 8-byte type header
pub(super) fn typed_reader<'a>(
    data: &'a [u8],
    expected: TypeSignature,
) -> Result<Reader<'a>, IccError> {
    if data.len() < 8 {
        return Err(IccError::EndOfData);
    }
    let mut r = Reader::new(data);
    let actual = r.type_header()?;
    if actual != expected.0 {
        return Err(IccError::type_mismatch(&expected.0.to_be_bytes(), actual));
    }
    Ok(r)
}

/// Parse a `text` tag: NUL-terminated 7-bit ASCII
pub fn parse_text(data: &[u8]) -> Result<String, IccError> {
    let mut r = typed_reader(data, TypeSignature::TEXT)?;
    let bytes = r.bytes(r.remaining())?;
    Ok(ascii_until_nul(bytes))
}

/// v2 `desc` tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDescription {
    pub ascii: String,
    /// Unicode language code, zero when unset
    pub unicode_language: u32,
    pub unicode: Option<String>,
    pub scriptcode_code: u16,
    /// Raw Macintosh ScriptCode bytes, at most 67
    pub scriptcode: Vec<u8>,
}

impl TextDescription {
    /// Parse a complete `desc` tag
    ///
    /// The ASCII and Unicode sections are required. The trailing ScriptCode
    /// section is read when present.
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let mut r = typed_reader(data, TypeSignature::DESC)?;

        let ascii_count = r.u32()? as usize;
        let ascii = ascii_until_nul(r.bytes(ascii_count)?);

        let unicode_language = r.u32()?;
        let unicode_count = r.u32()? as usize;
        let unicode_bytes = r.bytes(unicode_count.checked_mul(2).ok_or(IccError::EndOfData)?)?;
        let unicode = match unicode_count {
            0 => None,
            _ => Some(decode_utf16be(unicode_bytes).ok_or_else(|| {
                IccError::InvalidFormat("desc unicode is not valid UTF-16".to_string())
            })?),
        };

        let (scriptcode_code, scriptcode) = if r.remaining() >= 3 {
            let code = r.u16()?;
            let count = (r.u8()? as usize).min(67).min(r.remaining());
            (code, r.bytes(count)?.to_vec())
        } else {
            tracing::warn!("desc tag has no scriptcode section");
            (0, Vec::new())
        };

        Ok(Self {
            ascii,
            unicode_language,
            unicode,
            scriptcode_code,
            scriptcode,
        })
    }

    /// ASCII text, or the Unicode text when the ASCII section is empty
    pub fn text(&self) -> &str {
        match (&self.unicode, self.ascii.is_empty()) {
            (Some(unicode), true) => unicode,
            _ => &self.ascii,
        }
    }

    /// Encode as a complete `desc` tag
    pub fn encode(&self) -> Vec<u8> {
        let mut out = b"desc\0\0\0\0".to_vec();

        let ascii: Vec<u8> = self.ascii.bytes().filter(u8::is_ascii).collect();
        out.extend_from_slice(&(ascii.len() as u32 + 1).to_be_bytes());
        out.extend_from_slice(&ascii);
        out.push(0);

        out.extend_from_slice(&self.unicode_language.to_be_bytes());
        match &self.unicode {
            Some(text) => {
                let units: Vec<u16> = text.encode_utf16().chain([0]).collect();
                out.extend_from_slice(&(units.len() as u32).to_be_bytes());
                for unit in units {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
            None => out.extend_from_slice(&0u32.to_be_bytes()),
        }

        out.extend_from_slice(&self.scriptcode_code.to_be_bytes());
        let count = self.scriptcode.len().min(67);
        out.push(count as u8);
        let mut scriptcode = [0u8; 67];
        scriptcode[..count].copy_from_slice(&self.scriptcode[..count]);
        out.extend_from_slice(&scriptcode);
        out
    }
}

/// One record of an `mluc` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedString {
    /// ISO 639-1 language code, e.g. `en`
    pub language: String,
    /// ISO 3166-1 country code, e.g. `US`
    pub country: String,
    pub text: String,
}

/// v4 `mluc` tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiLocalizedUnicode {
    pub entries: Vec<LocalizedString>,
}

impl MultiLocalizedUnicode {
    /// A single-record table
    pub fn single(language: &str, country: &str, text: impl Into<String>) -> Self {
        Self {
            entries: vec![LocalizedString {
                language: language.to_string(),
                country: country.to_string(),
                text: text.into(),
            }],
        }
    }

    /// Parse a complete `mluc` tag
    ///
    /// String offsets are relative to the start of the tag.
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let mut r = typed_reader(data, TypeSignature::MLUC)?;

        let record_count = r.u32()? as usize;
        let record_size = r.u32()? as usize;
        if record_size < 12 {
            return Err(IccError::InvalidFormat(format!(
                "mluc record size {} is smaller than 12",
                record_size
            )));
        }

        let records_start = r.position();
        let mut entries = Vec::with_capacity(record_count.min(r.remaining() / record_size));

        for i in 0..record_count {
            let offset = i
                .checked_mul(record_size)
                .and_then(|o| o.checked_add(records_start))
                .ok_or(IccError::EndOfData)?;
            let mut record = Reader::at(data, offset)?;

            let code = record.bytes(4)?;
            let language = ascii_until_nul(&code[..2]);
            let country = ascii_until_nul(&code[2..]);

            let length = record.u32()? as usize;
            let string_offset = record.u32()? as usize;

            let mut body = Reader::at(data, string_offset)?;
            let text = decode_utf16be(body.bytes(length)?).ok_or_else(|| {
                IccError::InvalidFormat(format!("mluc record {} is not valid UTF-16", i))
            })?;

            entries.push(LocalizedString {
                language,
                country,
                text,
            });
        }

        Ok(Self { entries })
    }

    /// Exact language and country match
    pub fn get(&self, language: &str, country: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.language == language && e.country == country)
            .map(|e| e.text.as_str())
    }

    /// Text for `language`/`country`, falling back to the language alone and
    /// then to the first record
    pub fn best_match(&self, language: &str, country: &str) -> Option<&str> {
        self.get(language, country)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.language == language)
                    .map(|e| e.text.as_str())
            })
            .or_else(|| self.entries.first().map(|e| e.text.as_str()))
    }

    /// Encode as a complete `mluc` tag
    pub fn encode(&self) -> Vec<u8> {
        let mut out = b"mluc\0\0\0\0".to_vec();
        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        out.extend_from_slice(&12u32.to_be_bytes());

        let bodies: Vec<Vec<u8>> = self
            .entries
            .iter()
            .map(|e| e.text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            .collect();

        let mut string_offset = 16 + 12 * self.entries.len();
        for (entry, body) in self.entries.iter().zip(&bodies) {
            out.extend_from_slice(&code_bytes(&entry.language));
            out.extend_from_slice(&code_bytes(&entry.country));
            out.extend_from_slice(&(body.len() as u32).to_be_bytes());
            out.extend_from_slice(&(string_offset as u32).to_be_bytes());
            string_offset += body.len();
        }
        for body in bodies {
            out.extend_from_slice(&body);
        }
        out
    }
}

fn code_bytes(code: &str) -> [u8; 2] {
    let mut bytes = [0u8; 2];
    for (dst, src) in bytes.iter_mut().zip(code.bytes()) {
        *dst = src;
    }
    bytes
}

fn ascii_until_nul(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Decode UTF-16BE, stopping at the first NUL
fn decode_utf16be(data: &[u8]) -> Option<String> {
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();

    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let data = b"text\0\0\0\0Hello, World!\0";
        assert_eq!(parse_text(data).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_parse_desc() {
        let mut data = b"desc\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 0, 0, 5]);
        data.extend_from_slice(b"sRGB\0");
        data.extend_from_slice(&[0; 4]); // language
        data.extend_from_slice(&[0; 4]); // unicode count
        data.extend_from_slice(&[0; 2 + 1 + 67]);

        let desc = TextDescription::parse(&data).unwrap();
        assert_eq!(desc.ascii, "sRGB");
        assert_eq!(desc.unicode, None);
        assert_eq!(desc.text(), "sRGB");
    }

    #[test]
    fn test_desc_roundtrip_with_unicode() {
        let desc = TextDescription {
            ascii: String::new(),
            unicode_language: u32::from_be_bytes(*b"enUS"),
            unicode: Some("Überprüfung".to_string()),
            scriptcode_code: 0,
            scriptcode: Vec::new(),
        };
        let parsed = TextDescription::parse(&desc.encode()).unwrap();
        assert_eq!(parsed.text(), "Überprüfung");
        assert_eq!(parsed, desc);
    }

    #[test]
    fn test_desc_truncated() {
        assert_eq!(TextDescription::parse(b"desc"), Err(IccError::EndOfData));
        assert_eq!(TextDescription::parse(&[]), Err(IccError::EndOfData));

        let mut data = b"desc\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 0, 0, 64]);
        data.extend_from_slice(b"short");
        assert_eq!(TextDescription::parse(&data), Err(IccError::EndOfData));
    }

    #[test]
    fn test_desc_type_mismatch() {
        let data = MultiLocalizedUnicode::single("en", "US", "x").encode();
        assert!(matches!(
            TextDescription::parse(&data),
            Err(IccError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_mluc() {
        let mut data = b"mluc\0\0\0\0".to_vec();
        data.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 12]);
        data.extend_from_slice(&[
            b'e', b'n', b'U', b'S', // locale
            0, 0, 0, 8, // length
            0, 0, 0, 28, // offset from tag start
        ]);
        data.extend_from_slice(&[0x00, b'T', 0x00, b'e', 0x00, b's', 0x00, b't']);

        let mluc = MultiLocalizedUnicode::parse(&data).unwrap();
        assert_eq!(mluc.get("en", "US"), Some("Test"));
        assert_eq!(mluc.best_match("en", "GB"), Some("Test"));
        assert_eq!(mluc.best_match("de", "DE"), Some("Test"));
    }

    #[test]
    fn test_mluc_roundtrip() {
        let mluc = MultiLocalizedUnicode {
            entries: vec![
                LocalizedString {
                    language: "en".into(),
                    country: "US".into(),
                    text: "Display".into(),
                },
                LocalizedString {
                    language: "de".into(),
                    country: "DE".into(),
                    text: "Bildschirm".into(),
                },
            ],
        };
        let parsed = MultiLocalizedUnicode::parse(&mluc.encode()).unwrap();
        assert_eq!(parsed, mluc);
        assert_eq!(parsed.best_match("de", "AT"), Some("Bildschirm"));
    }

    #[test]
    fn test_mluc_string_out_of_bounds() {
        let mut data = MultiLocalizedUnicode::single("en", "US", "abc").encode();
        data.truncate(data.len() - 1);
        assert_eq!(MultiLocalizedUnicode::parse(&data), Err(IccError::EndOfData));
    }
}
