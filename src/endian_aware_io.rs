use std::convert::TryFrom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

// Callers hand in exactly-sized slices taken from a bounds-checked reader.
impl Endian {
    pub fn decode_u32(&self, bytes: [u8; 4]) -> u32 {
        match self {
            Endian::Little => u32::from_le_bytes(bytes),
            Endian::Big => u32::from_be_bytes(bytes),
        }
    }

    #[cfg(test)]
    pub fn encode_u16(&self, value: u16) -> [u8; 2] {
        match self {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        }
    }

    #[cfg(test)]
    pub fn encode_u32(&self, value: u32) -> [u8; 4] {
        match self {
            Endian::Little => value.to_le_bytes(),
            Endian::Big => value.to_be_bytes(),
        }
    }

    #[cfg(test)]
    pub fn encode_i16(&self, value: i16) -> [u8; 2] {
        self.encode_u16(value as u16)
    }
}

/// Copies a slice into a fixed-size array, returning `None` if the lengths differ.
pub fn to_array<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    <[u8; N]>::try_from(bytes).ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_u32() {
        assert_eq!(0xFE131415, Endian::Little.decode_u32([0x15, 0x14, 0x13, 0xFE]));
        assert_eq!(0xFE131415, Endian::Big.decode_u32([0xFE, 0x13, 0x14, 0x15]));
    }

    #[test]
    fn encode_u32() {
        assert_eq!([0x13, 0x12, 0x14, 0xFE], Endian::Little.encode_u32(0xFE141213));
        assert_eq!([0xFE, 0x14, 0x12, 0x13], Endian::Big.encode_u32(0xFE141213));
    }

    #[test]
    fn encode_i16() {
        assert_eq!([0xFF, 0xFE], Endian::Big.encode_i16(-2));
        assert_eq!([0x12, 0x11], Endian::Little.encode_i16(0x1112));
    }

    #[test]
    fn to_array_checks_length() {
        assert_eq!(Some([1, 2]), to_array::<2>(&[1, 2]));
        assert_eq!(None, to_array::<4>(&[1, 2]));
    }
}
