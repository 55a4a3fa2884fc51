// Feature-capability descriptor the host queries before editing memories.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// What a radio model supports: symbol sets, value ranges and capability
/// flags. Populated per model by its driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadioFeatures {
    pub has_settings: bool,
    pub has_name: bool,
    pub has_bank: bool,
    pub has_bank_index: bool,
    pub has_bank_names: bool,
    pub has_dtcs: bool,
    pub has_dtcs_polarity: bool,
    pub has_tuning_step: bool,
    pub can_delete: bool,

    pub valid_modes: Vec<String>,
    pub valid_tmodes: Vec<String>,
    pub valid_duplexes: Vec<String>,
    pub valid_tuning_steps: Vec<f32>,
    /// (low_hz, high_hz) pairs
    pub valid_bands: Vec<(u64, u64)>,
    pub valid_skips: Vec<String>,
    pub valid_characters: String,
    pub valid_name_length: usize,
    pub valid_tones: Vec<f32>,
    pub valid_dtcs_codes: Vec<u16>,
    pub valid_dtcs_pols: Vec<String>,
    pub valid_special_chans: Vec<String>,

    /// Memory bounds (min, max), inclusive
    pub memory_bounds: (i32, i32),
}

impl Default for RadioFeatures {
    fn default() -> Self {
        Self {
            has_settings: false,
            has_name: true,
            has_bank: true,
            has_bank_index: false,
            has_bank_names: false,
            has_dtcs: true,
            has_dtcs_polarity: true,
            has_tuning_step: true,
            can_delete: true,

            valid_modes: vec!["FM".to_string()],
            valid_tmodes: Vec::new(),
            valid_duplexes: vec!["".to_string(), "-".to_string(), "+".to_string()],
            valid_tuning_steps: vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 50.0, 100.0],
            valid_bands: Vec::new(),
            valid_skips: vec!["".to_string(), "S".to_string()],
            valid_characters: CHARSET.to_string(),
            valid_name_length: 6,
            valid_tones: TONES.to_vec(),
            valid_dtcs_codes: DTCS_CODES.to_vec(),
            valid_dtcs_pols: DTCS_POLARITIES.iter().map(|s| s.to_string()).collect(),
            valid_special_chans: Vec::new(),
            memory_bounds: (0, 1),
        }
    }
}

impl RadioFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concise human-readable band list, e.g. "0.495-999.99MHz".
    pub fn concise_bands(&self) -> String {
        use super::memory::Memory;
        self.valid_bands
            .iter()
            .map(|(lo, hi)| {
                format!(
                    "{}-{}MHz",
                    Memory::format_freq(*lo)
                        .trim_end_matches('0')
                        .trim_end_matches('.'),
                    Memory::format_freq(*hi)
                        .trim_end_matches('0')
                        .trim_end_matches('.')
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
