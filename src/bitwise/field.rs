// Field descriptors and the scalar field codec: get/set one packed field
// inside a record window. Encoding is read-modify-write on the touched
// bytes; bits outside a field's declared range are never altered.

use super::bcd::{int_to_bcd_be, int_to_bcd_le};
use super::parser::{parse_bcd_be, parse_bcd_le, parse_chars, parse_uint_be, parse_uint_le};
use super::{CodecError, Result};
use serde::{Deserialize, Serialize};

/// One bit-field location inside a record window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSlot {
    /// Byte offset within the record.
    pub offset: usize,
    /// Bit offset within the byte, 0 = LSB.
    pub bit: u8,
    /// Width in bits; `bit + width` never exceeds 8.
    pub width: u8,
}

impl BitSlot {
    pub const fn new(offset: usize, bit: u8, width: u8) -> Self {
        Self { offset, bit, width }
    }

    fn mask(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    fn read(&self, window: &[u8]) -> u64 {
        ((window[self.offset] >> self.bit) & self.mask()) as u64
    }

    fn write(&self, window: &mut [u8], value: u8) {
        let mask = self.mask() << self.bit;
        window[self.offset] = (window[self.offset] & !mask) | ((value << self.bit) & mask);
    }
}

/// Encoding of one field within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Unsigned little-endian integer, `len` bytes.
    UintLe,
    /// Unsigned big-endian integer, `len` bytes.
    UintBe,
    /// BCD digits, two per byte, little-endian byte order.
    BcdLe,
    /// BCD digits, two per byte, big-endian byte order.
    BcdBe,
    /// Bit-field within the single byte at `offset`; `bit` 0 = LSB.
    Bits { bit: u8, width: u8 },
    /// Value stored non-contiguously: `low | (high << low.width)`.
    /// Part widths are model data and need not be symmetric.
    Split { low: BitSlot, high: BitSlot },
    /// Fixed-width ASCII characters, space padded.
    Chars,
}

/// A named field at a fixed position within a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: &'static str,
    /// Byte offset within the record (ignored for `Split`, which carries
    /// its own slot offsets).
    pub offset: usize,
    /// Byte length (1 for bit-fields).
    pub len: usize,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, offset: usize, len: usize, kind: FieldKind) -> Self {
        Self {
            name,
            offset,
            len,
            kind,
        }
    }

    pub const fn bits(name: &'static str, offset: usize, bit: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            len: 1,
            kind: FieldKind::Bits { bit, width },
        }
    }

    pub const fn split(name: &'static str, low: BitSlot, high: BitSlot) -> Self {
        Self {
            name,
            offset: low.offset,
            len: 1,
            kind: FieldKind::Split { low, high },
        }
    }

    /// Exclusive end of the byte range this field touches.
    pub fn end(&self) -> usize {
        match self.kind {
            FieldKind::Split { low, high } => low.offset.max(high.offset) + 1,
            FieldKind::Bits { .. } => self.offset + 1,
            _ => self.offset + self.len,
        }
    }

    /// Maximum value representable by an integer-like field.
    fn max_value(&self) -> Option<u64> {
        match self.kind {
            FieldKind::UintLe | FieldKind::UintBe => {
                if self.len >= 8 {
                    Some(u64::MAX)
                } else {
                    Some((1u64 << (8 * self.len)) - 1)
                }
            }
            FieldKind::Bits { width, .. } => Some((1u64 << width) - 1),
            FieldKind::Split { low, high } => Some((1u64 << (low.width + high.width)) - 1),
            _ => None,
        }
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Uint(u64),
    Text(String),
}

impl Value {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Uint(_) => None,
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

fn check_span(window: &[u8], def: &FieldDef) -> Result<()> {
    if def.end() > window.len() {
        return Err(CodecError::Layout {
            name: def.name.to_string(),
            expected: def.end(),
            actual: window.len(),
        });
    }
    Ok(())
}

fn encoding_err(def: &FieldDef, reason: impl Into<String>) -> CodecError {
    CodecError::Encoding {
        field: def.name.to_string(),
        reason: reason.into(),
    }
}

/// Decode one field from a record window.
pub fn decode_field(window: &[u8], def: &FieldDef) -> Result<Value> {
    check_span(window, def)?;
    let slice = &window[def.offset..];
    match def.kind {
        FieldKind::UintLe => {
            let (_, v) = parse_uint_le(def.len)(slice)
                .map_err(|e| encoding_err(def, e.to_string()))?;
            Ok(Value::Uint(v))
        }
        FieldKind::UintBe => {
            let (_, v) = parse_uint_be(def.len)(slice)
                .map_err(|e| encoding_err(def, e.to_string()))?;
            Ok(Value::Uint(v))
        }
        FieldKind::BcdLe => {
            let (_, v) = parse_bcd_le(def.len)(slice)
                .map_err(|_| encoding_err(def, "non-decimal BCD digit"))?;
            Ok(Value::Uint(v))
        }
        FieldKind::BcdBe => {
            let (_, v) = parse_bcd_be(def.len)(slice)
                .map_err(|_| encoding_err(def, "non-decimal BCD digit"))?;
            Ok(Value::Uint(v))
        }
        FieldKind::Bits { bit, width } => {
            let slot = BitSlot::new(def.offset, bit, width);
            Ok(Value::Uint(slot.read(window)))
        }
        FieldKind::Split { low, high } => {
            let v = low.read(window) | (high.read(window) << low.width);
            Ok(Value::Uint(v))
        }
        FieldKind::Chars => {
            let (_, s) = parse_chars(def.len)(slice)
                .map_err(|e| encoding_err(def, e.to_string()))?;
            Ok(Value::Text(s.trim_end().to_string()))
        }
    }
}

/// Encode one field into a record window, leaving every bit outside the
/// field's declared range untouched.
pub fn encode_field(window: &mut [u8], def: &FieldDef, value: &Value) -> Result<()> {
    check_span(window, def)?;
    match def.kind {
        FieldKind::UintLe | FieldKind::UintBe | FieldKind::Bits { .. } | FieldKind::Split { .. } => {
            let v = value
                .as_uint()
                .ok_or_else(|| encoding_err(def, "expected an integer value"))?;
            let max = def.max_value().unwrap_or(u64::MAX);
            if v > max {
                return Err(encoding_err(def, format!("{} exceeds maximum {}", v, max)));
            }
            match def.kind {
                FieldKind::UintLe => {
                    let mut rest = v;
                    for b in window[def.offset..def.offset + def.len].iter_mut() {
                        *b = (rest & 0xff) as u8;
                        rest >>= 8;
                    }
                }
                FieldKind::UintBe => {
                    let mut rest = v;
                    for b in window[def.offset..def.offset + def.len].iter_mut().rev() {
                        *b = (rest & 0xff) as u8;
                        rest >>= 8;
                    }
                }
                FieldKind::Bits { bit, width } => {
                    BitSlot::new(def.offset, bit, width).write(window, v as u8);
                }
                FieldKind::Split { low, high } => {
                    low.write(window, (v & (low.mask() as u64)) as u8);
                    high.write(window, (v >> low.width) as u8);
                }
                _ => unreachable!(),
            }
            Ok(())
        }
        FieldKind::BcdLe => {
            let v = value
                .as_uint()
                .ok_or_else(|| encoding_err(def, "expected an integer value"))?;
            let bytes = int_to_bcd_le(v, def.len).map_err(|e| encoding_err(def, e.to_string()))?;
            window[def.offset..def.offset + def.len].copy_from_slice(&bytes);
            Ok(())
        }
        FieldKind::BcdBe => {
            let v = value
                .as_uint()
                .ok_or_else(|| encoding_err(def, "expected an integer value"))?;
            let bytes = int_to_bcd_be(v, def.len).map_err(|e| encoding_err(def, e.to_string()))?;
            window[def.offset..def.offset + def.len].copy_from_slice(&bytes);
            Ok(())
        }
        FieldKind::Chars => {
            let s = value
                .as_text()
                .ok_or_else(|| encoding_err(def, "expected a text value"))?;
            if !s.is_ascii() {
                return Err(encoding_err(def, format!("'{}' is not ASCII", s)));
            }
            if s.len() > def.len {
                return Err(encoding_err(
                    def,
                    format!("'{}' longer than {} characters", s, def.len),
                ));
            }
            let padded = format!("{:<width$}", s, width = def.len);
            window[def.offset..def.offset + def.len].copy_from_slice(padded.as_bytes());
            Ok(())
        }
    }
}
