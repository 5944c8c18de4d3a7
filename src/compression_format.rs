use crate::errors::CompressionError;
use crate::ZlibCompressionFormat;

type Result<T> = std::result::Result<T, CompressionError>;

#[derive(Debug, Clone)]
pub enum CompressionFormat {
    Stored,
    Zlib(ZlibCompressionFormat),
}

impl CompressionFormat {
    pub fn from_flag(compressed: bool) -> Self {
        if compressed {
            CompressionFormat::Zlib(ZlibCompressionFormat {})
        } else {
            CompressionFormat::Stored
        }
    }

    /// Returns exactly `expected_length` bytes or fails.
    pub fn decompress(&self, bytes: Vec<u8>, expected_length: usize) -> Result<Vec<u8>> {
        match self {
            CompressionFormat::Stored => {
                if bytes.len() != expected_length {
                    return Err(CompressionError::SizeMismatch {
                        expected: expected_length,
                        actual: bytes.len(),
                    });
                }
                Ok(bytes)
            }
            CompressionFormat::Zlib(c) => c.decompress(&bytes, expected_length),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stored_passes_through() {
        let format = CompressionFormat::from_flag(false);
        assert!(matches!(format, CompressionFormat::Stored));
        assert_eq!(b"abc".to_vec(), format.decompress(b"abc".to_vec(), 3).unwrap());
        assert!(format.decompress(b"abc".to_vec(), 4).is_err());
    }

    #[test]
    fn zlib_from_flag() {
        let format = CompressionFormat::from_flag(true);
        assert!(matches!(format, CompressionFormat::Zlib(_)));
        let compressed = ZlibCompressionFormat {}.compress(b"hello").unwrap();
        assert_eq!(b"hello".to_vec(), format.decompress(compressed, 5).unwrap());
    }
}
