// Normalized model of a single memory channel, as consumed by the host UI.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}

pub type Result<T> = std::result::Result<T, MemoryError>;

/// A single radio memory channel.
///
/// This is a value, not a view: it is materialized from the clone image on
/// demand, and writing it back re-encodes the full record at the same
/// offset. Special channels (scan edges, call channels, VFO presets) carry
/// a negative `number` and their symbolic name in `extd_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Channel number; negative for special channels.
    pub number: i32,

    /// Symbolic name for special channels (e.g. "Scan edge: 00A").
    pub extd_number: String,

    /// Channel name
    pub name: String,

    /// Frequency in Hz
    pub freq: u64,

    /// Transmit tone (CTCSS) in Hz
    pub rtone: f32,

    /// Receive tone (CTCSS) in Hz
    pub ctone: f32,

    /// DTCS code
    pub dtcs: u16,

    /// DTCS polarity ("NN", "NR", "RN", "RR")
    pub dtcs_polarity: String,

    /// Tone mode ("", "Tone", "TSQL", "DTCS")
    pub tmode: String,

    /// Duplex ("", "+", "-")
    pub duplex: String,

    /// Offset frequency in Hz
    pub offset: u64,

    /// Mode ("FM", "WFM", "AM")
    pub mode: String,

    /// Tuning step in kHz
    pub tuning_step: f32,

    /// Skip flag ("", "S" for skip, "P" for program skip)
    pub skip: String,

    /// Bank letter index (into the model's bank-letter table), if banked
    pub bank: Option<usize>,

    /// Position within the bank (0..99), if banked
    pub bank_pos: Option<u8>,

    /// Whether this memory is empty
    pub empty: bool,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Memory {
    /// Create a new memory with default values
    pub fn new(number: i32) -> Self {
        Self {
            number,
            extd_number: String::new(),
            name: String::new(),
            freq: 0,
            rtone: 88.5,
            ctone: 88.5,
            dtcs: 23,
            dtcs_polarity: "NN".to_string(),
            tmode: String::new(),
            duplex: String::new(),
            offset: 600_000,
            mode: "FM".to_string(),
            tuning_step: 5.0,
            skip: String::new(),
            bank: None,
            bank_pos: None,
            empty: false,
        }
    }

    /// Create an empty memory
    pub fn new_empty(number: i32) -> Self {
        let mut mem = Self::new(number);
        mem.empty = true;
        mem
    }

    /// Parse a frequency string and return Hz.
    /// Supports "146.520", "146.520 MHz" and "146520 kHz".
    pub fn parse_freq(freqstr: &str) -> Result<u64> {
        let freqstr = freqstr.trim();

        if freqstr.is_empty() {
            return Ok(0);
        }

        if let Some(stripped) = freqstr.strip_suffix(" MHz") {
            return Self::parse_freq(stripped);
        }

        if let Some(stripped) = freqstr.strip_suffix(" kHz") {
            let khz: u64 = stripped
                .parse()
                .map_err(|_| MemoryError::InvalidFrequency(freqstr.to_string()))?;
            return Ok(khz * 1000);
        }

        if freqstr.contains('.') {
            let parts: Vec<&str> = freqstr.split('.').collect();
            if parts.len() != 2 {
                return Err(MemoryError::InvalidFrequency(freqstr.to_string()));
            }

            let mhz_str = if parts[0].is_empty() { "0" } else { parts[0] };
            let khz_str = format!("{:0<6}", parts[1]);

            if khz_str.len() > 6 {
                return Err(MemoryError::InvalidFrequency(freqstr.to_string()));
            }

            let mhz: u64 = mhz_str
                .parse()
                .map_err(|_| MemoryError::InvalidFrequency(freqstr.to_string()))?;
            let khz: u64 = khz_str
                .parse()
                .map_err(|_| MemoryError::InvalidFrequency(freqstr.to_string()))?;

            Ok(mhz * 1_000_000 + khz)
        } else {
            let mhz: u64 = freqstr
                .parse()
                .map_err(|_| MemoryError::InvalidFrequency(freqstr.to_string()))?;
            Ok(mhz * 1_000_000)
        }
    }

    /// Format frequency in Hz as a string (e.g., "146.520000")
    pub fn format_freq(freq: u64) -> String {
        format!("{}.{:06}", freq / 1_000_000, freq % 1_000_000)
    }

    /// Get formatted frequency string
    pub fn freq_str(&self) -> String {
        Self::format_freq(self.freq)
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = if self.extd_number.is_empty() {
            self.number.to_string()
        } else {
            self.extd_number.clone()
        };

        if self.empty {
            return write!(f, "Memory {}: empty", number);
        }

        let dup = if self.duplex.is_empty() {
            "/"
        } else {
            &self.duplex
        };

        write!(
            f,
            "Memory {}: {}{}{} {} ({}) r{:.1} c{:.1} d{:03}{} [{:.2}]",
            number,
            Self::format_freq(self.freq),
            dup,
            Self::format_freq(self.offset),
            self.mode,
            self.name,
            self.rtone,
            self.ctone,
            self.dtcs,
            self.dtcs_polarity,
            self.tuning_step
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_freq() {
        assert_eq!(Memory::parse_freq("146.520").unwrap(), 146_520_000);
        assert_eq!(Memory::parse_freq("146.520 MHz").unwrap(), 146_520_000);
        assert_eq!(Memory::parse_freq("146520 kHz").unwrap(), 146_520_000);
        assert_eq!(Memory::parse_freq("146").unwrap(), 146_000_000);
        assert_eq!(Memory::parse_freq(".520").unwrap(), 520_000);
        assert_eq!(Memory::parse_freq("").unwrap(), 0);
        assert!(Memory::parse_freq("bogus").is_err());
    }

    #[test]
    fn test_format_freq() {
        assert_eq!(Memory::format_freq(146_520_000), "146.520000");
        assert_eq!(Memory::format_freq(520_000), "0.520000");
    }

    #[test]
    fn test_memory_creation() {
        let mem = Memory::new(1);
        assert_eq!(mem.number, 1);
        assert_eq!(mem.mode, "FM");
        assert_eq!(mem.rtone, 88.5);
        assert!(!mem.empty);
        assert!(mem.bank.is_none());

        let empty = Memory::new_empty(2);
        assert!(empty.empty);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut mem = Memory::new(42);
        mem.freq = 146_520_000;
        mem.name = "CALL".to_string();
        mem.bank = Some(3);
        mem.bank_pos = Some(17);

        let json = serde_json::to_string(&mem).unwrap();
        let back: Memory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.number, 42);
        assert_eq!(back.freq, 146_520_000);
        assert_eq!(back.bank, Some(3));
        assert_eq!(back.bank_pos, Some(17));
    }
}
