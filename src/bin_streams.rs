use crate::endian_aware_io::to_array;
use crate::{ByteReaderError, Endian};

type Result<T> = std::result::Result<T, ByteReaderError>;

/// Cursor over a borrowed byte buffer. Every read is bounds checked and
/// leaves the position untouched when it fails.
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        ByteReader {
            data,
            position: 0,
            endian,
        }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn out_of_bounds(&self, position: usize, requested: usize) -> ByteReaderError {
        ByteReaderError::OutOfBounds {
            position,
            requested,
            size: self.data.len(),
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| self.out_of_bounds(self.position, count))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let position = self.position;
        let slice = self.take(N)?;
        to_array::<N>(slice).ok_or_else(|| self.out_of_bounds(position, N))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take_array::<4>()?;
        Ok(self.endian.decode_u32(bytes))
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        Ok(self.take(count)?.to_vec())
    }
}
