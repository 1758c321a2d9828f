//! LUT Tag Types
//!
//! - mft1 (lut8Type) and mft2 (lut16Type): matrix, input tables, CLUT, output tables
//! - mAB (lutAToBType) and mBA (lutBToAType): v4 element chains
//!
//! Element offsets in v4 LUTs are relative to the start of the tag.
//!
//! See ICC.1:2022 Sections 10.10-10.13

use crate::icc::error::IccError;
use crate::icc::reader::Reader;
use crate::icc::types::TypeSignature;
use crate::math::{Matrix3x3, Matrix3x4};

use super::curves::IccCurve;

/// ICC allows at most 15 input channels in a CLUT
const MAX_CHANNELS: usize = 15;

/// Decoded LUT-based transform tag
#[derive(Debug, Clone, PartialEq)]
pub enum LutTransform {
    Lut8(LegacyLut),
    Lut16(LegacyLut),
    AToB(ElementLut),
    BToA(ElementLut),
}

impl LutTransform {
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let mut r = Reader::new(data);
        match TypeSignature(r.type_header()?) {
            TypeSignature::LUT8 => LegacyLut::read(&mut r, 1).map(Self::Lut8),
            TypeSignature::LUT16 => LegacyLut::read(&mut r, 2).map(Self::Lut16),
            TypeSignature::LUTA2B => ElementLut::read(data, &mut r, false).map(Self::AToB),
            TypeSignature::LUTB2A => ElementLut::read(data, &mut r, true).map(Self::BToA),
            other => Err(IccError::InvalidFormat(format!(
                "expected a LUT tag type, found '{}'",
                other
            ))),
        }
    }

    pub fn input_channels(&self) -> usize {
        match self {
            Self::Lut8(lut) | Self::Lut16(lut) => lut.input_channels,
            Self::AToB(lut) | Self::BToA(lut) => lut.input_channels,
        }
    }

    pub fn output_channels(&self) -> usize {
        match self {
            Self::Lut8(lut) | Self::Lut16(lut) => lut.output_channels,
            Self::AToB(lut) | Self::BToA(lut) => lut.output_channels,
        }
    }
}

/// `mft1` / `mft2` contents, samples normalized to `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyLut {
    pub input_channels: usize,
    pub output_channels: usize,
    pub grid_points: usize,
    /// Applied to XYZ input only
    pub matrix: Matrix3x3,
    pub input_tables: Vec<Vec<f64>>,
    pub clut: Vec<f64>,
    pub output_tables: Vec<Vec<f64>>,
}

impl LegacyLut {
    /// `precision` is the sample width in bytes
    fn read(r: &mut Reader<'_>, precision: usize) -> Result<Self, IccError> {
        let input_channels = r.u8()? as usize;
        let output_channels = r.u8()? as usize;
        let grid_points = r.u8()? as usize;
        r.skip(1)?;
        check_channels(input_channels, output_channels)?;

        let mut rows = [[0.0; 3]; 3];
        for row in rows.iter_mut() {
            for v in row.iter_mut() {
                *v = r.s15_fixed16()?;
            }
        }

        let (input_entries, output_entries) = if precision == 1 {
            (256, 256)
        } else {
            (r.u16()? as usize, r.u16()? as usize)
        };

        let input_tables = (0..input_channels)
            .map(|_| read_samples(r, input_entries, precision))
            .collect::<Result<Vec<_>, _>>()?;
        let clut_len = clut_len(&vec![grid_points; input_channels], output_channels)?;
        let clut = read_samples(r, clut_len, precision)?;
        let output_tables = (0..output_channels)
            .map(|_| read_samples(r, output_entries, precision))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            input_channels,
            output_channels,
            grid_points,
            matrix: Matrix3x3::new(rows),
            input_tables,
            clut,
            output_tables,
        })
    }
}

/// Multidimensional table of an element LUT
#[derive(Debug, Clone, PartialEq)]
pub struct Clut {
    /// Grid points per input dimension
    pub grid_points: Vec<usize>,
    pub output_channels: usize,
    /// Samples normalized to `[0, 1]`
    pub data: Vec<f64>,
}

impl Clut {
    fn read(r: &mut Reader<'_>, input_channels: usize, output_channels: usize) -> Result<Self, IccError> {
        let dims = r.bytes(16)?;
        let grid_points: Vec<usize> = dims[..input_channels].iter().map(|&g| g as usize).collect();
        let precision = r.u8()? as usize;
        r.skip(3)?;
        if precision != 1 && precision != 2 {
            return Err(IccError::InvalidFormat(format!(
                "invalid CLUT precision {}",
                precision
            )));
        }

        let len = clut_len(&grid_points, output_channels)?;
        let data = read_samples(r, len, precision)?;
        Ok(Self {
            grid_points,
            output_channels,
            data,
        })
    }
}

/// `mAB ` / `mBA ` contents
///
/// Elements are stored in file order. For A-to-B the processing order is
/// A curves, CLUT, M curves, matrix, B curves; B-to-A runs the reverse.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLut {
    pub input_channels: usize,
    pub output_channels: usize,
    pub b_curves: Vec<IccCurve>,
    pub matrix: Option<Matrix3x4>,
    pub m_curves: Vec<IccCurve>,
    pub clut: Option<Clut>,
    pub a_curves: Vec<IccCurve>,
}

impl ElementLut {
    fn read(tag: &[u8], r: &mut Reader<'_>, b_to_a: bool) -> Result<Self, IccError> {
        let input_channels = r.u8()? as usize;
        let output_channels = r.u8()? as usize;
        r.skip(2)?;
        check_channels(input_channels, output_channels)?;

        let b_offset = r.u32()? as usize;
        let matrix_offset = r.u32()? as usize;
        let m_offset = r.u32()? as usize;
        let clut_offset = r.u32()? as usize;
        let a_offset = r.u32()? as usize;

        // B and M sit on the PCS side
        let (pcs_channels, device_channels) = if b_to_a {
            (input_channels, output_channels)
        } else {
            (output_channels, input_channels)
        };

        let b_curves = read_curve_set(tag, b_offset, pcs_channels)?;
        let m_curves = read_curve_set(tag, m_offset, pcs_channels)?;
        let a_curves = read_curve_set(tag, a_offset, device_channels)?;

        let matrix = match matrix_offset {
            0 => None,
            offset => Some(read_matrix(&mut Reader::at(tag, offset)?)?),
        };
        let clut = match clut_offset {
            0 => None,
            offset => Some(Clut::read(
                &mut Reader::at(tag, offset)?,
                input_channels,
                output_channels,
            )?),
        };

        Ok(Self {
            input_channels,
            output_channels,
            b_curves,
            matrix,
            m_curves,
            clut,
            a_curves,
        })
    }
}

fn check_channels(input: usize, output: usize) -> Result<(), IccError> {
    if input == 0 || input > MAX_CHANNELS || output == 0 || output > MAX_CHANNELS {
        return Err(IccError::InvalidFormat(format!(
            "unsupported LUT channel counts {}x{}",
            input, output
        )));
    }
    Ok(())
}

fn clut_len(grid_points: &[usize], output_channels: usize) -> Result<usize, IccError> {
    grid_points
        .iter()
        .try_fold(output_channels, |acc, &g| acc.checked_mul(g))
        .ok_or_else(|| IccError::InvalidFormat("CLUT size overflows".to_string()))
}

fn read_samples(r: &mut Reader<'_>, count: usize, precision: usize) -> Result<Vec<f64>, IccError> {
    if r.remaining() / precision < count {
        return Err(IccError::EndOfData);
    }
    (0..count)
        .map(|_| match precision {
            1 => r.u8().map(|v| v as f64 / 255.0),
            _ => r.u16().map(|v| v as f64 / 65535.0),
        })
        .collect()
}

/// 3x3 row-major s15Fixed16 matrix followed by three offsets
fn read_matrix(r: &mut Reader<'_>) -> Result<Matrix3x4, IccError> {
    let mut rows = [[0.0; 3]; 3];
    for row in rows.iter_mut() {
        for v in row.iter_mut() {
            *v = r.s15_fixed16()?;
        }
    }
    let offset = [r.s15_fixed16()?, r.s15_fixed16()?, r.s15_fixed16()?];
    Ok(Matrix3x4::new(Matrix3x3::new(rows), offset))
}

/// Consecutive curve elements, each padded to a 4-byte boundary
fn read_curve_set(tag: &[u8], offset: usize, count: usize) -> Result<Vec<IccCurve>, IccError> {
    if offset == 0 {
        return Ok(Vec::new());
    }
    let mut r = Reader::at(tag, offset)?;
    let mut curves = Vec::with_capacity(count);
    for _ in 0..count {
        curves.push(IccCurve::read(&mut r)?);
        let aligned = (r.position() + 3) & !3;
        r.seek(aligned.min(tag.len()))?;
    }
    Ok(curves)
}
