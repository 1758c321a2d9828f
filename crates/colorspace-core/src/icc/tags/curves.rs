//! Curve Tag Types
//!
//! ICC profiles use curves for tone reproduction (TRC).
//! Two encodings:
//! - curv: identity, a single u8Fixed8 gamma, or a u16 lookup table
//! - para: one of five parametric formulas with s15Fixed16 parameters
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para)

use crate::icc::error::IccError;
use crate::icc::reader::Reader;
use crate::icc::types::TypeSignature;
use crate::math::gamma::{ParametricCurve, ParametricCurveType, extended_pow};
use crate::numeric::S15Fixed16;

/// A decoded `curv` or `para` tag
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IccCurve {
    /// `curv` with no entries
    Identity,
    /// Pure power curve, `y = x^g`
    Gamma(f64),
    /// `para` function types 1 to 4
    Parametric(ParametricCurve),
    /// Sampled curve, values normalized to `[0, 1]`
    Table(Vec<f64>),
}

impl IccCurve {
    /// Parse a complete curve tag, type signature included
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() <= 8 {
            return Err(IccError::EndOfData);
        }
        Self::read(&mut Reader::new(data))
    }

    /// Read one curve element and leave the reader just past it
    pub(crate) fn read(r: &mut Reader<'_>) -> Result<Self, IccError> {
        let type_sig = TypeSignature(r.type_header()?);

        match type_sig {
            TypeSignature::CURVE => {
                let count = r.u32()? as usize;
                match count {
                    0 => Ok(Self::Identity),
                    1 => Ok(Self::Gamma(r.u8_fixed8()?)),
                    _ => {
                        if r.remaining() / 2 < count {
                            return Err(IccError::EndOfData);
                        }
                        let table = (0..count)
                            .map(|_| r.u16().map(|v| v as f64 / 65535.0))
                            .collect::<Result<Vec<_>, _>>()?;
                        Ok(Self::Table(table))
                    }
                }
            }
            TypeSignature::PARA => {
                let function_type = r.u16()?;
                r.skip(2)?;

                let curve_type = ParametricCurveType::from_icc(function_type).ok_or_else(|| {
                    IccError::InvalidFormat(format!("invalid parametric curve type {}", function_type))
                })?;
                let params = (0..curve_type.param_count())
                    .map(|_| r.s15_fixed16())
                    .collect::<Result<Vec<_>, _>>()?;

                let curve = ParametricCurve::from_params(curve_type, &params)
                    .ok_or(IccError::EndOfData)?;
                Ok(match curve_type {
                    ParametricCurveType::Gamma => Self::Gamma(curve.g),
                    _ => Self::Parametric(curve),
                })
            }
            other => Err(IccError::InvalidFormat(format!(
                "unknown curve type '{}'",
                other
            ))),
        }
    }

    /// Encode as a complete tag payload
    ///
    /// Gammas and parametric curves become `para`; identity and tables
    /// become `curv`. Table entries are clamped to `[0, 1]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write(&mut out);
        out
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        match self {
            Self::Identity => {
                out.extend_from_slice(b"curv");
                out.extend_from_slice(&[0; 4]);
                out.extend_from_slice(&0u32.to_be_bytes());
            }
            Self::Gamma(g) => write_para(out, &ParametricCurve::gamma(*g)),
            Self::Parametric(curve) => write_para(out, curve),
            Self::Table(table) => {
                out.extend_from_slice(b"curv");
                out.extend_from_slice(&[0; 4]);
                out.extend_from_slice(&(table.len() as u32).to_be_bytes());
                for &v in table {
                    let encoded = (v * 65535.0).round().clamp(0.0, 65535.0) as u16;
                    out.extend_from_slice(&encoded.to_be_bytes());
                }
            }
        }
    }

    /// Evaluate the curve
    ///
    /// Analytic curves are mirrored for negative input; tables clamp their
    /// input to `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Gamma(g) => extended_pow(x, *g),
            Self::Parametric(curve) => curve.eval(x),
            Self::Table(table) => eval_table(table, x),
        }
    }

    /// The inverse curve
    ///
    /// Closed form for analytic curves. Tables are inverted numerically
    /// into a table with twice as many samples.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Gamma(g) => Self::Gamma(1.0 / g),
            Self::Parametric(curve) => Self::Parametric(curve.inverse()),
            Self::Table(table) => Self::Table(invert_table(table)),
        }
    }

    /// The curve as a parametric formula; `None` for tables
    pub fn to_parametric(&self) -> Option<ParametricCurve> {
        match self {
            Self::Identity => Some(ParametricCurve::gamma(1.0)),
            Self::Gamma(g) => Some(ParametricCurve::gamma(*g)),
            Self::Parametric(curve) => Some(*curve),
            Self::Table(_) => None,
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Gamma(g) => *g == 1.0,
            _ => false,
        }
    }
}

fn write_para(out: &mut Vec<u8>, curve: &ParametricCurve) {
    out.extend_from_slice(b"para");
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&curve.curve_type.to_icc().to_be_bytes());
    out.extend_from_slice(&[0; 2]);
    for param in curve.params() {
        S15Fixed16::from_f64(param).write_be(out);
    }
}

fn eval_table(table: &[f64], x: f64) -> f64 {
    match table.len() {
        0 => x,
        1 => table[0],
        len => {
            let pos = x.clamp(0.0, 1.0) * (len - 1) as f64;
            let idx = (pos.floor() as usize).min(len - 2);
            let frac = pos - idx as f64;
            table[idx] + frac * (table[idx + 1] - table[idx])
        }
    }
}

fn invert_table(table: &[f64]) -> Vec<f64> {
    if table.len() < 2 {
        return table.to_vec();
    }

    let samples = table.len() * 2;
    let ascending = table[table.len() - 1] >= table[0];

    (0..samples)
        .map(|i| {
            let y = i as f64 / (samples - 1) as f64;
            let (mut lo, mut hi) = (0.0f64, 1.0f64);
            for _ in 0..52 {
                let mid = 0.5 * (lo + hi);
                if (eval_table(table, mid) < y) == ascending {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            0.5 * (lo + hi)
        })
        .collect()
}
