//! Numeric array tag types: `XYZ `, `sf32`, `uf32`, `ui08` to `ui64`
//!
//! Arrays occupy the whole tag body; trailing bytes that do not form a
//! complete element are ignored.
//!
//! See ICC.1:2022 Sections 10.22, 10.26, 10.27 and 10.31

use crate::color::Xyz;
use crate::icc::reader::Reader;
use crate::icc::types::TypeSignature;
use crate::numeric::S15Fixed16;

/// Reader over the body of a tag whose type is `expected`
fn body(data: &[u8], expected: TypeSignature) -> Option<Reader<'_>> {
    let mut r = Reader::new(data);
    (r.type_header().ok()? == expected.0).then_some(r)
}

pub(super) fn parse_array<T>(
    data: &[u8],
    expected: TypeSignature,
    size: usize,
    mut read: impl FnMut(&mut Reader<'_>) -> Option<T>,
) -> Option<Vec<T>> {
    let mut r = body(data, expected)?;
    let count = r.remaining() / size;
    (0..count).map(|_| read(&mut r)).collect()
}

pub fn parse_xyz_array(data: &[u8]) -> Option<Vec<Xyz>> {
    parse_array(data, TypeSignature::XYZ, 12, |r| r.xyz().ok())
}

pub fn parse_s15fixed16_array(data: &[u8]) -> Option<Vec<f64>> {
    parse_array(data, TypeSignature::SF32, 4, |r| r.s15_fixed16().ok())
}

pub fn parse_u16fixed16_array(data: &[u8]) -> Option<Vec<f64>> {
    parse_array(data, TypeSignature::UF32, 4, |r| r.u16_fixed16().ok())
}

/// `XYZ ` tag payload
pub fn encode_xyz(values: &[Xyz]) -> Vec<u8> {
    let mut out = b"XYZ \0\0\0\0".to_vec();
    for xyz in values {
        write_s15fixed16(&mut out, &xyz.to_array());
    }
    out
}

/// `sf32` tag payload
pub fn encode_s15fixed16(values: &[f64]) -> Vec<u8> {
    let mut out = b"sf32\0\0\0\0".to_vec();
    write_s15fixed16(&mut out, values);
    out
}

fn write_s15fixed16(out: &mut Vec<u8>, values: &[f64]) {
    for &v in values {
        S15Fixed16::from_f64(v).write_be(out);
    }
}
