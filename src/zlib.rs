use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::CompressionError;

type Result<T> = std::result::Result<T, CompressionError>;

#[derive(Debug, Clone)]
pub struct ZlibCompressionFormat;

impl ZlibCompressionFormat {
    #[cfg(test)]
    pub fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(bytes)
            .map_err(|_| CompressionError::InvalidInput("zlib".to_string()))?;
        encoder
            .finish()
            .map_err(|_| CompressionError::InvalidInput("zlib".to_string()))
    }

    /// Inflates a zlib stream that must produce exactly `expected_length` bytes.
    pub fn decompress(&self, bytes: &[u8], expected_length: usize) -> Result<Vec<u8>> {
        // One byte past the expected length is enough to detect an oversized stream.
        let limit = (expected_length as u64).saturating_add(1);
        let mut decoder = ZlibDecoder::new(bytes).take(limit);
        let mut decompressed: Vec<u8> = Vec::new();
        decompressed
            .try_reserve_exact(expected_length)
            .map_err(|_| CompressionError::AllocationFailure(expected_length))?;
        match decoder.read_to_end(&mut decompressed) {
            Ok(_) => {}
            Err(_) => return Err(CompressionError::InvalidInput("zlib".to_string())),
        }
        if decompressed.len() != expected_length {
            return Err(CompressionError::SizeMismatch {
                expected: expected_length,
                actual: decompressed.len(),
            });
        }
        Ok(decompressed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zlib_round_trip_success() {
        let decompressed: Vec<u8> = b"hello hello hello hello".to_vec();
        let zlib = ZlibCompressionFormat {};
        let compressed = zlib.compress(&decompressed).unwrap();
        assert_eq!(0x78, compressed[0]);
        let actual = zlib.decompress(&compressed, decompressed.len()).unwrap();
        assert_eq!(decompressed, actual);
    }

    #[test]
    fn short_stream_is_size_mismatch() {
        let zlib = ZlibCompressionFormat {};
        let compressed = zlib.compress(b"hello").unwrap();
        let result = zlib.decompress(&compressed, 8);
        assert!(matches!(
            result,
            Err(CompressionError::SizeMismatch {
                expected: 8,
                actual: 5
            })
        ));
    }

    #[test]
    fn unreservable_length_is_allocation_failure() {
        let zlib = ZlibCompressionFormat {};
        let compressed = zlib.compress(b"hello").unwrap();
        let result = zlib.decompress(&compressed, usize::MAX);
        assert!(matches!(
            result,
            Err(CompressionError::AllocationFailure(usize::MAX))
        ));
    }

    #[test]
    fn long_stream_is_size_mismatch() {
        let zlib = ZlibCompressionFormat {};
        let compressed = zlib.compress(b"hello").unwrap();
        let result = zlib.decompress(&compressed, 3);
        assert!(matches!(
            result,
            Err(CompressionError::SizeMismatch {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn garbage_is_invalid_input() {
        let zlib = ZlibCompressionFormat {};
        let result = zlib.decompress(&[0x12, 0x34, 0x56, 0x78], 5);
        assert!(matches!(result, Err(CompressionError::InvalidInput(_))));
    }
}
