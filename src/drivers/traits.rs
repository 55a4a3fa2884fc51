// Radio driver traits

use crate::bitwise::CodecError;
use crate::core::{Memory, RadioFeatures};
use crate::memmap::{MemoryMap, MemoryMapError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("No image loaded; call load_mmap first")]
    NoImage,

    #[error("Invalid memory location: {0}")]
    InvalidMemory(i32),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("{kind} index {index} outside table of {len}")]
    Lookup {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unsupported {field}: {value}")]
    Unsupported { field: &'static str, value: String },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Image(#[from] MemoryMapError),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Base trait for all radio drivers
pub trait Radio: Send {
    /// Get the radio vendor name
    fn vendor(&self) -> &str;

    /// Get the radio model name
    fn model(&self) -> &str;

    /// Get the radio's feature set
    fn get_features(&self) -> RadioFeatures;

    /// Get a printable name for this radio
    fn get_name(&self) -> String {
        format!("{} {}", self.vendor(), self.model())
    }

    /// Get a memory from the radio's image.
    ///
    /// An empty location still returns a `Memory` (with `empty` set); an
    /// out-of-range number is an error.
    fn get_memory(&self, number: i32) -> DriverResult<Memory>;

    /// Set a memory in the radio's image
    fn set_memory(&mut self, memory: &Memory) -> DriverResult<()>;

    /// Delete a memory (mark as empty)
    fn erase_memory(&mut self, number: i32) -> DriverResult<()>;

    /// Get all regular memories that are not empty
    fn get_memories(&self) -> DriverResult<Vec<Memory>> {
        let (start, end) = self.get_features().memory_bounds;
        let mut memories = Vec::new();

        for i in start..=end {
            let mem = self.get_memory(i)?;
            if !mem.empty {
                memories.push(mem);
            }
        }

        Ok(memories)
    }
}

/// Trait for radios programmed through a full memory image (clone mode)
pub trait CloneModeRadio: Radio {
    /// Size of the radio's memory image in bytes
    fn get_memsize(&self) -> usize;

    /// Adopt a memory image loaded from a file
    fn load_mmap(&mut self, mmap: MemoryMap) -> DriverResult<()>;

    /// The current image, for saving back to a file
    fn get_mmap(&self) -> DriverResult<&MemoryMap>;

    /// Check whether an image file belongs to this model
    fn match_model(data: &[u8], filename: &str) -> bool
    where
        Self: Sized;
}

/// Trait for radios whose banks are selected by letter index
pub trait IndexedBankRadio: Radio {
    /// Bank letters, in stored-index order
    fn bank_letters(&self) -> &[&'static str];

    /// Display names, "BANK-A" style
    fn bank_names(&self) -> Vec<String> {
        self.bank_letters()
            .iter()
            .map(|l| format!("BANK-{}", l))
            .collect()
    }

    /// Bank letter index a channel belongs to, if banked
    fn get_bank(&self, number: i32) -> DriverResult<Option<usize>>;

    /// Assign or clear a channel's bank membership
    fn set_bank(&mut self, number: i32, bank: Option<usize>) -> DriverResult<()>;

    /// Position of a channel within its bank (0..99)
    fn get_bank_position(&self, number: i32) -> DriverResult<Option<u8>>;

    fn set_bank_position(&mut self, number: i32, position: u8) -> DriverResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::Lookup {
            kind: "tone",
            index: 55,
            len: 50,
        };
        assert_eq!(err.to_string(), "tone index 55 outside table of 50");

        let err = DriverError::Unsupported {
            field: "tone_mode",
            value: "5".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported tone_mode: 5");
    }
}
