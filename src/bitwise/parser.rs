// nom parsers for the primitive encodings the field codec consumes.

use super::bcd::{bcd_to_int_be, bcd_to_int_le};
use nom::{
    bytes::complete::take,
    error::{Error, ErrorKind},
    IResult,
};

/// Parse an unsigned little-endian integer of `num_bytes` bytes (up to 8).
pub fn parse_uint_le(num_bytes: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (input, bytes) = take(num_bytes)(input)?;
        let mut value: u64 = 0;
        for &b in bytes.iter().rev() {
            value = (value << 8) | b as u64;
        }
        Ok((input, value))
    }
}

/// Parse an unsigned big-endian integer of `num_bytes` bytes (up to 8).
pub fn parse_uint_be(num_bytes: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (input, bytes) = take(num_bytes)(input)?;
        let mut value: u64 = 0;
        for &b in bytes {
            value = (value << 8) | b as u64;
        }
        Ok((input, value))
    }
}

/// Parse a BCD-encoded value (big-endian) of `num_bytes` bytes.
pub fn parse_bcd_be(num_bytes: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (input, bytes) = take(num_bytes)(input)?;
        let value = bcd_to_int_be(bytes)
            .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Verify)))?;
        Ok((input, value))
    }
}

/// Parse a BCD-encoded value (little-endian) of `num_bytes` bytes.
pub fn parse_bcd_le(num_bytes: usize) -> impl Fn(&[u8]) -> IResult<&[u8], u64> {
    move |input: &[u8]| {
        let (input, bytes) = take(num_bytes)(input)?;
        let value = bcd_to_int_le(bytes)
            .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Verify)))?;
        Ok((input, value))
    }
}

/// Parse a fixed-length character array (not null-terminated).
pub fn parse_chars(len: usize) -> impl Fn(&[u8]) -> IResult<&[u8], String> {
    move |input: &[u8]| {
        let (input, bytes) = take(len)(input)?;
        let s = String::from_utf8_lossy(bytes).to_string();
        Ok((input, s))
    }
}
