// Binary-coded decimal packing: one decimal digit per nibble.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BcdError {
    #[error("invalid BCD digit in byte {0:#04x}")]
    InvalidDigit(u8),

    #[error("{value} does not fit in {digits} BCD digits")]
    Overflow { value: u64, digits: usize },
}

pub type Result<T> = std::result::Result<T, BcdError>;

/// Decode one BCD byte to its value 0..=99.
pub fn bcd_byte(byte: u8) -> Result<u8> {
    let tens = byte >> 4;
    let ones = byte & 0x0f;
    if tens > 9 || ones > 9 {
        return Err(BcdError::InvalidDigit(byte));
    }
    Ok(tens * 10 + ones)
}

/// Encode a value 0..=99 as one BCD byte.
pub fn to_bcd_byte(value: u8) -> u8 {
    debug_assert!(value < 100);
    ((value / 10) << 4) | (value % 10)
}

/// Decode a big-endian BCD array: [0x12, 0x34, 0x56] -> 123456.
pub fn bcd_to_int_be(bytes: &[u8]) -> Result<u64> {
    let mut value: u64 = 0;
    for &b in bytes {
        value = value * 100 + bcd_byte(b)? as u64;
    }
    Ok(value)
}

/// Decode a little-endian BCD array: [0x56, 0x34, 0x12] -> 123456.
pub fn bcd_to_int_le(bytes: &[u8]) -> Result<u64> {
    let mut value: u64 = 0;
    for &b in bytes.iter().rev() {
        value = value * 100 + bcd_byte(b)? as u64;
    }
    Ok(value)
}

/// Encode an integer as a big-endian BCD array of exactly `num_bytes` bytes.
pub fn int_to_bcd_be(value: u64, num_bytes: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; num_bytes];
    let mut rest = value;
    for slot in out.iter_mut().rev() {
        *slot = to_bcd_byte((rest % 100) as u8);
        rest /= 100;
    }
    if rest > 0 {
        return Err(BcdError::Overflow {
            value,
            digits: num_bytes * 2,
        });
    }
    Ok(out)
}

/// Encode an integer as a little-endian BCD array of exactly `num_bytes` bytes.
pub fn int_to_bcd_le(value: u64, num_bytes: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; num_bytes];
    let mut rest = value;
    for slot in out.iter_mut() {
        *slot = to_bcd_byte((rest % 100) as u8);
        rest /= 100;
    }
    if rest > 0 {
        return Err(BcdError::Overflow {
            value,
            digits: num_bytes * 2,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_byte() {
        assert_eq!(bcd_byte(0x00).unwrap(), 0);
        assert_eq!(bcd_byte(0x12).unwrap(), 12);
        assert_eq!(bcd_byte(0x99).unwrap(), 99);
        assert!(bcd_byte(0x9a).is_err());
        assert!(bcd_byte(0xf0).is_err());

        assert_eq!(to_bcd_byte(7), 0x07);
        assert_eq!(to_bcd_byte(95), 0x95);
    }

    #[test]
    fn test_bcd_arrays() {
        assert_eq!(bcd_to_int_be(&[0x12, 0x34, 0x56]).unwrap(), 123456);
        assert_eq!(bcd_to_int_le(&[0x56, 0x34, 0x12]).unwrap(), 123456);
        assert_eq!(bcd_to_int_be(&[0x01, 0x46, 0x52]).unwrap(), 14652);

        assert_eq!(int_to_bcd_be(123456, 3).unwrap(), vec![0x12, 0x34, 0x56]);
        assert_eq!(int_to_bcd_le(123456, 3).unwrap(), vec![0x56, 0x34, 0x12]);
        assert_eq!(int_to_bcd_be(7, 2).unwrap(), vec![0x00, 0x07]);
    }

    #[test]
    fn test_overflow() {
        assert!(int_to_bcd_be(1234567, 3).is_err());
        assert!(int_to_bcd_le(100, 1).is_err());
        assert_eq!(int_to_bcd_le(99, 1).unwrap(), vec![0x99]);
    }
}
