// Owned byte buffer holding a radio's full clone image.
// One driver instance owns one image at a time; record codecs borrow
// windows for the duration of a single parse/build call only.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryMapError {
    #[error("range {start:#06x}..{end:#06x} outside {size}-byte image")]
    OutOfBounds {
        start: usize,
        end: usize,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, MemoryMapError>;

/// A radio's clone image: a contiguous byte buffer of fixed total length.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryMap {
    data: Vec<u8>,
}

impl MemoryMap {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// A zero-filled image of the given size.
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn check(&self, start: usize, len: usize) -> Result<()> {
        let end = start + len;
        if end > self.data.len() {
            return Err(MemoryMapError::OutOfBounds {
                start,
                end,
                size: self.data.len(),
            });
        }
        Ok(())
    }

    /// Borrow `len` bytes starting at `start`.
    pub fn window(&self, start: usize, len: usize) -> Result<&[u8]> {
        self.check(start, len)?;
        Ok(&self.data[start..start + len])
    }

    /// Mutably borrow `len` bytes starting at `start`.
    pub fn window_mut(&mut self, start: usize, len: usize) -> Result<&mut [u8]> {
        self.check(start, len)?;
        Ok(&mut self.data[start..start + len])
    }

    pub fn byte(&self, pos: usize) -> Result<u8> {
        self.check(pos, 1)?;
        Ok(self.data[pos])
    }

    pub fn set_byte(&mut self, pos: usize, value: u8) -> Result<()> {
        self.check(pos, 1)?;
        self.data[pos] = value;
        Ok(())
    }

    pub fn set_bytes(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        self.check(pos, bytes.len())?;
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// The whole image as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Hex dump of a region, for diagnostics.
    pub fn printable(&self, start: usize, end: usize) -> String {
        hexdump(&self.data[start.min(self.data.len())..end.min(self.data.len())])
    }
}

impl From<Vec<u8>> for MemoryMap {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemoryMap {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl AsRef<[u8]> for MemoryMap {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for MemoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryMap({} bytes)", self.data.len())
    }
}

fn hexdump(data: &[u8]) -> String {
    let mut output = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        output.push_str(&format!("{:08x}  ", i * 16));

        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                output.push(' ');
            }
            output.push_str(&format!("{:02x} ", byte));
        }
        for j in chunk.len()..16 {
            if j == 8 {
                output.push(' ');
            }
            output.push_str("   ");
        }

        output.push_str(" |");
        for byte in chunk {
            if (0x20..=0x7e).contains(byte) {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let mmap = MemoryMap::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(mmap.len(), 5);

        let sized = MemoryMap::with_size(10);
        assert_eq!(sized.len(), 10);
        assert_eq!(sized.window(0, 10).unwrap(), &[0u8; 10]);
    }

    #[test]
    fn test_windows() {
        let mut mmap = MemoryMap::with_size(32);
        mmap.set_bytes(16, &[0xde, 0xad]).unwrap();
        assert_eq!(mmap.window(16, 2).unwrap(), &[0xde, 0xad]);

        mmap.window_mut(16, 16).unwrap()[0] = 0xbe;
        assert_eq!(mmap.byte(16).unwrap(), 0xbe);
    }

    #[test]
    fn test_bounds_checking() {
        let mut mmap = MemoryMap::with_size(8);
        assert!(mmap.window(4, 8).is_err());
        assert!(mmap.set_byte(8, 0).is_err());
        assert!(mmap.set_bytes(7, &[1, 2]).is_err());
    }

    #[test]
    fn test_hexdump() {
        let mmap = MemoryMap::new(b"ABCDEFGHIJKLMNOPQ".to_vec());
        let dump = mmap.printable(0, 17);
        assert!(dump.contains("41 42 43"));
        assert!(dump.contains("|ABCDEFGH"));
    }
}
