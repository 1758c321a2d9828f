//! Big-endian cursor over immutable profile bytes
//!
//! Every read is bounds-checked and fails with [`IccError::EndOfData`].

use crate::color::Xyz;
use crate::numeric::{BitPattern, S15Fixed16, U8Fixed8, U16Fixed16};

use super::error::IccError;

#[derive(Debug, Clone)]
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reader positioned at `offset`
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self, IccError> {
        let mut reader = Self::new(data);
        reader.seek(offset)?;
        Ok(reader)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn seek(&mut self, offset: usize) -> Result<(), IccError> {
        if offset > self.data.len() {
            return Err(IccError::EndOfData);
        }
        self.pos = offset;
        Ok(())
    }

    pub fn skip(&mut self, count: usize) -> Result<(), IccError> {
        self.bytes(count).map(|_| ())
    }

    pub fn bytes(&mut self, count: usize) -> Result<&'a [u8], IccError> {
        let end = self.pos.checked_add(count).ok_or(IccError::EndOfData)?;
        let slice = self.data.get(self.pos..end).ok_or(IccError::EndOfData)?;
        self.pos = end;
        Ok(slice)
    }

    #[inline]
    pub fn read<B: BitPattern>(&mut self) -> Result<B, IccError> {
        let bytes = self.bytes(B::BYTES)?;
        B::read_be(bytes).ok_or(IccError::EndOfData)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, IccError> {
        Ok(self.bytes(1)?[0])
    }

    #[inline]
    pub fn u16(&mut self) -> Result<u16, IccError> {
        self.read()
    }

    #[inline]
    pub fn u32(&mut self) -> Result<u32, IccError> {
        self.read()
    }

    #[inline]
    pub fn u64(&mut self) -> Result<u64, IccError> {
        self.read()
    }

    pub fn s15_fixed16(&mut self) -> Result<f64, IccError> {
        Ok(S15Fixed16::from_bits(self.read()?).to_f64())
    }

    pub fn u16_fixed16(&mut self) -> Result<f64, IccError> {
        Ok(U16Fixed16::from_bits(self.read()?).to_f64())
    }

    pub fn u8_fixed8(&mut self) -> Result<f64, IccError> {
        Ok(U8Fixed8::from_bits(self.read()?).to_f64())
    }

    /// XYZNumber: three s15Fixed16 values
    pub fn xyz(&mut self) -> Result<Xyz, IccError> {
        Ok(Xyz::new(
            self.s15_fixed16()?,
            self.s15_fixed16()?,
            self.s15_fixed16()?,
        ))
    }

    /// Tag type header: 4-byte signature plus 4 reserved bytes
    pub fn type_header(&mut self) -> Result<u32, IccError> {
        let sig = self.u32()?;
        self.skip(4)?;
        Ok(sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_big_endian() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC];
        let mut r = Reader::new(&data);
        assert_eq!(r.u16().unwrap(), 0x1234);
        assert_eq!(r.u32().unwrap(), 0x56789ABC);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_truncation_is_end_of_data() {
        let data = [0u8; 3];
        let mut r = Reader::new(&data);
        assert_eq!(r.u32(), Err(IccError::EndOfData));
        // a failed read does not advance
        assert_eq!(r.position(), 0);
        assert_eq!(r.bytes(usize::MAX), Err(IccError::EndOfData));
        assert!(Reader::at(&data, 4).is_err());
        assert!(Reader::at(&data, 3).is_ok());
    }

    #[test]
    fn test_fixed_point_fields() {
        let data = [
            0x00, 0x00, 0xF6, 0xD6, // 0.9642
            0x00, 0x01, 0x00, 0x00, // 1.0
            0x00, 0x00, 0xD3, 0x2D, // 0.8249
            0x02, 0x33, // 2.19921875
        ];
        let mut r = Reader::new(&data);
        let xyz = r.xyz().unwrap();
        assert!(xyz.approx_eq(&Xyz::new(0.9642, 1.0, 0.8249), 1e-4));
        assert_eq!(r.u8_fixed8().unwrap(), 2.19921875);
    }
}
