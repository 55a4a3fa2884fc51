// Shared channel-memory model for the Icom IC-E90/T90 family.
//
// Both variants use the same 16-byte channel record and differ only in
// image geometry, bank encoding and settings surface; everything
// model-specific comes in through `ModelConfig`.

use super::dtmf;
use super::traits::{
    CloneModeRadio, DriverError, DriverResult, IndexedBankRadio, Radio,
};
use crate::bitwise::{
    decode_field, encode_field, record, BitSlot, CodecError, FieldDef, FieldKind, FieldMap,
    Layout, Value,
};
use crate::core::constants::{DTCS_CODES, DTCS_POLARITIES, TONES};
use crate::core::{Memory, RadioFeatures};
use crate::memmap::MemoryMap;
use lazy_static::lazy_static;
use tracing::warn;

pub const MEM_ITEM_SIZE: usize = 16;
pub const BANK_POSITIONS: u8 = 100;

pub const ICX90_DUPLEXES: [&str; 4] = ["", "-", "+", ""];
pub const ICX90_TONE_MODES: [&str; 4] = ["", "Tone", "TSQL", "DTCS"];
pub const ICX90_MODES: [&str; 3] = ["FM", "WFM", "AM"];
pub const ICX90_TUNE_STEPS: [f32; 13] = [
    5.0, 6.25, 8.33, 9.0, 10.0, 12.5, 15.0, 20.0, 25.0, 30.0, 50.0, 100.0, 200.0,
];

/// Bank letters in stored-index order; note the gaps (no I, K, M, S...).
pub static BANK_INDEXES: [&str; 18] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "J", "L", "N", "O", "P", "Q", "R", "T", "U", "Y",
];

// Stored in the 5-bit indexed bank field for "no bank".
const UNBANKED: u64 = 0x1F;

lazy_static! {
    /// 16-byte channel record, shared by regular memories, scan edges,
    /// call channels and VFO presets.
    pub static ref MEM_ITEM: Layout = Layout::record(
        "mem_item",
        MEM_ITEM_SIZE,
        vec![
            FieldDef::new("freq", 0, 3, FieldKind::UintLe),
            FieldDef::bits("dtcs_polarity", 3, 6, 2),
            FieldDef::bits("offset_freq_mult", 3, 3, 1),
            FieldDef::bits("freq_mult", 3, 0, 1),
            FieldDef::bits("duplex", 4, 5, 2),
            FieldDef::bits("mode", 4, 3, 2),
            FieldDef::bits("tone_mode", 4, 0, 3),
            FieldDef::new("offset_freq", 5, 2, FieldKind::UintLe),
            FieldDef::new("dtcs", 7, 1, FieldKind::UintLe),
            FieldDef::bits("tune_step", 8, 0, 4),
            // Transmit tone index is stored split: low nibble in byte 8,
            // high two bits in byte 9.
            FieldDef::split("tx_tone", BitSlot::new(8, 4, 4), BitSlot::new(9, 0, 2)),
            FieldDef::bits("rx_tone", 9, 2, 6),
            FieldDef::new("name", 10, 6, FieldKind::Chars),
        ],
    );

    /// 2-byte bank record carrying the 5-bit bank index and skip flags.
    pub static ref BANK_ITEM: Layout = Layout::record(
        "bank_item",
        2,
        vec![
            FieldDef::bits("prog_skip", 0, 6, 1),
            FieldDef::bits("mem_skip", 0, 5, 1),
            FieldDef::bits("bank_index", 0, 0, 5),
            FieldDef::new("bank_channel", 1, 1, FieldKind::UintLe),
        ],
    );

    /// 2-byte bank record of the legacy variant: the index is a nibble
    /// and skip lives in a separate flags table.
    pub static ref BANK_ITEM_PACKED: Layout = Layout::record(
        "bank_item",
        2,
        vec![
            FieldDef::bits("bank_index", 0, 0, 4),
            FieldDef::new("bank_channel", 1, 1, FieldKind::UintLe),
        ],
    );

    /// Per-channel flags byte of the legacy variant.
    pub static ref CHANNEL_FLAGS: Layout = Layout::record(
        "channel_flags",
        1,
        vec![
            FieldDef::bits("skip", 0, 4, 1),
            FieldDef::bits("unused", 0, 5, 1),
        ],
    );

    /// 16-digit DTMF autodial slot; accessed as raw bytes.
    pub static ref DTMF_CODE: Layout = Layout::record("dtmf_code", 16, vec![]);
}

/// How a model stores bank membership on disk. Fixed per model, never
/// auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankScheme {
    /// 5-bit bank index plus skip flags inside the bank record; 0x1F
    /// means unbanked.
    Indexed,
    /// 4-bit bank index packed into the low nibble; skip and slot-used
    /// flags in a separate per-channel flags table. No unbanked encoding.
    Packed,
}

/// Everything that varies between the family's model variants.
pub struct ModelConfig {
    pub vendor: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub memsize: usize,
    pub image: &'static Layout,
    pub num_memories: usize,
    pub scan_edge_pairs: usize,
    pub call_channels: usize,
    pub vfo_channels: usize,
    pub bank_scheme: BankScheme,
    pub bank_letters: &'static [&'static str],
    pub skips: &'static [&'static str],
    pub band: (u64, u64),
    pub name_length: usize,
    pub has_settings: bool,
    pub squelch_levels: &'static [&'static str],
    pub dtmf_slots: usize,
}

/// One entry of a model's special-channel table.
#[derive(Debug, Clone)]
pub struct SpecialChannel {
    /// Symbolic name shown to the user, e.g. "Scan edge: 00A".
    pub name: String,
    /// Exposed channel number (negative).
    pub number: i32,
    array: &'static str,
    index: usize,
}

fn build_specials(config: &ModelConfig) -> Vec<SpecialChannel> {
    let mut entries: Vec<(String, &'static str, usize)> = Vec::new();

    for x in 0..config.scan_edge_pairs {
        entries.push((format!("Scan edge: {:02}A", x), "scan_edges", x * 2));
        entries.push((format!("Scan edge: {:02}B", x), "scan_edges", x * 2 + 1));
    }
    for x in 0..config.call_channels {
        entries.push((format!("Call ch: {}", x), "call_channels", x));
    }
    for x in 0..config.vfo_channels {
        entries.push((format!("VFO A: {}", x), "vfo_a_band", x));
    }
    for x in 0..config.vfo_channels {
        entries.push((format!("VFO B: {}", x), "vfo_b_band", x));
    }

    let total = entries.len() as i32;
    entries
        .into_iter()
        .enumerate()
        .map(|(uid, (name, array, index))| SpecialChannel {
            name,
            number: uid as i32 - total,
            array,
            index,
        })
        .collect()
}

fn decode_freq(raw: u64, fractional: bool) -> u64 {
    raw * if fractional { 6250 } else { 5000 }
}

/// Raw stored value and multiplier flag for a frequency in Hz. A value
/// on neither the 5 kHz nor the 6.25 kHz grid cannot be stored.
fn encode_freq(freq: u64) -> DriverResult<(u64, u64)> {
    let fractional = freq % 5000 != 0;
    let mult = if fractional { 6250 } else { 5000 };
    if freq % mult != 0 {
        return Err(DriverError::InvalidData(format!(
            "frequency {} Hz is on neither the 5 kHz nor the 6.25 kHz grid",
            freq
        )));
    }
    Ok((freq / mult, fractional as u64))
}

fn lookup<T: Copy>(table: &[T], index: u64, kind: &'static str) -> DriverResult<T> {
    table.get(index as usize).copied().ok_or_else(|| {
        warn!(kind, index, len = table.len(), "stored index outside table");
        DriverError::Lookup {
            kind,
            index: index as usize,
            len: table.len(),
        }
    })
}

fn index_of<T: PartialEq + std::fmt::Display>(
    table: &[T],
    value: &T,
    field: &'static str,
) -> DriverResult<u64> {
    table
        .iter()
        .position(|t| t == value)
        .map(|i| i as u64)
        .ok_or_else(|| DriverError::Unsupported {
            field,
            value: value.to_string(),
        })
}

fn uint(fields: &FieldMap, name: &str) -> DriverResult<u64> {
    fields
        .get(name)
        .and_then(Value::as_uint)
        .ok_or_else(|| DriverError::InvalidData(format!("missing field {}", name)))
}

fn text<'a>(fields: &'a FieldMap, name: &str) -> DriverResult<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_text)
        .ok_or_else(|| DriverError::InvalidData(format!("missing field {}", name)))
}

/// A clone-mode radio of the IC-E90/T90 family, parameterized by model.
pub struct IcxRadio {
    config: &'static ModelConfig,
    specials: Vec<SpecialChannel>,
    mmap: Option<MemoryMap>,
}

impl IcxRadio {
    pub fn new(config: &'static ModelConfig) -> Self {
        Self {
            config,
            specials: build_specials(config),
            mmap: None,
        }
    }

    pub fn config(&self) -> &'static ModelConfig {
        self.config
    }

    /// The model's special channels in numbering order.
    pub fn list_special_channels(&self) -> &[SpecialChannel] {
        &self.specials
    }

    fn require_mmap(&self) -> DriverResult<&MemoryMap> {
        self.mmap.as_ref().ok_or(DriverError::NoImage)
    }

    fn require_mmap_mut(&mut self) -> DriverResult<&mut MemoryMap> {
        self.mmap.as_mut().ok_or(DriverError::NoImage)
    }

    /// Map an exposed channel number to its record array and index.
    /// Negative numbers address the special table.
    fn resolve_number(&self, number: i32) -> DriverResult<(&'static str, usize, Option<&SpecialChannel>)> {
        if number >= 0 {
            if (number as usize) < self.config.num_memories {
                return Ok(("memory", number as usize, None));
            }
            return Err(DriverError::InvalidMemory(number));
        }
        let uid = number + self.specials.len() as i32;
        if uid < 0 {
            return Err(DriverError::InvalidMemory(number));
        }
        let special = &self.specials[uid as usize];
        Ok((special.array, special.index, Some(special)))
    }

    fn record_window(&self, array: &str, index: usize) -> DriverResult<(usize, usize)> {
        Ok(self.config.image.element_window(array, index)?)
    }

    /// The raw 16 bytes of a channel record.
    pub fn get_raw_memory(&self, number: i32) -> DriverResult<Vec<u8>> {
        let (array, index, _) = self.resolve_number(number)?;
        let (offset, len) = self.record_window(array, index)?;
        Ok(self.require_mmap()?.window(offset, len)?.to_vec())
    }

    fn read_memory(&self, number: i32) -> DriverResult<Memory> {
        let (array, index, special) = self.resolve_number(number)?;
        let (offset, len) = self.record_window(array, index)?;
        let window = self.require_mmap()?.window(offset, len)?;
        let fields = record::parse(&MEM_ITEM, window)?;

        let raw_freq = uint(&fields, "freq")?;
        if raw_freq == 0 {
            // Empty slot; the remaining record bytes may be garbage.
            let mut mem = Memory::new_empty(number);
            if let Some(sp) = special {
                mem.extd_number = sp.name.clone();
            }
            return Ok(mem);
        }

        let mut mem = Memory::new(number);
        mem.freq = decode_freq(raw_freq, uint(&fields, "freq_mult")? != 0);
        mem.offset = decode_freq(
            uint(&fields, "offset_freq")?,
            uint(&fields, "offset_freq_mult")? != 0,
        );
        mem.rtone = lookup(&TONES, uint(&fields, "tx_tone")?, "tone")?;
        mem.ctone = lookup(&TONES, uint(&fields, "rx_tone")?, "tone")?;
        mem.dtcs = lookup(&DTCS_CODES, uint(&fields, "dtcs")?, "DTCS code")?;
        mem.dtcs_polarity =
            lookup(DTCS_POLARITIES, uint(&fields, "dtcs_polarity")?, "DTCS polarity")?.to_string();
        mem.duplex = lookup(&ICX90_DUPLEXES, uint(&fields, "duplex")?, "duplex")?.to_string();
        mem.tmode =
            lookup(&ICX90_TONE_MODES, uint(&fields, "tone_mode")?, "tone mode")?.to_string();
        mem.mode = lookup(&ICX90_MODES, uint(&fields, "mode")?, "mode")?.to_string();
        mem.tuning_step = lookup(&ICX90_TUNE_STEPS, uint(&fields, "tune_step")?, "tuning step")?;

        if let Some(sp) = special {
            mem.extd_number = sp.name.clone();
        } else {
            mem.name = text(&fields, "name")?.to_string();
            mem.skip = self.read_skip(index)?;
            mem.bank = self.read_bank(index)?;
            mem.bank_pos = self.read_bank_position(index)?;
        }
        Ok(mem)
    }

    fn write_memory(&mut self, memory: &Memory) -> DriverResult<()> {
        let (array, index, special) = self.resolve_number(memory.number)?;
        let is_special = special.is_some();

        if memory.empty {
            return self.wipe_record(memory.number);
        }

        let config = self.config;
        let (raw_freq, freq_mult) = encode_freq(memory.freq)?;
        let (raw_offset, offset_mult) = encode_freq(memory.offset)?;

        let mut fields = FieldMap::new();
        fields.insert("freq".into(), Value::Uint(raw_freq));
        fields.insert("freq_mult".into(), Value::Uint(freq_mult));
        fields.insert("offset_freq".into(), Value::Uint(raw_offset));
        fields.insert("offset_freq_mult".into(), Value::Uint(offset_mult));
        fields.insert(
            "tx_tone".into(),
            Value::Uint(index_of(&TONES, &memory.rtone, "tone")?),
        );
        fields.insert(
            "rx_tone".into(),
            Value::Uint(index_of(&TONES, &memory.ctone, "tone")?),
        );
        fields.insert(
            "dtcs".into(),
            Value::Uint(index_of(&DTCS_CODES, &memory.dtcs, "DTCS code")?),
        );
        fields.insert(
            "dtcs_polarity".into(),
            Value::Uint(index_of(
                DTCS_POLARITIES,
                &memory.dtcs_polarity.as_str(),
                "DTCS polarity",
            )?),
        );
        fields.insert(
            "duplex".into(),
            Value::Uint(index_of(
                &ICX90_DUPLEXES[..3],
                &memory.duplex.as_str(),
                "duplex",
            )?),
        );
        fields.insert(
            "tone_mode".into(),
            Value::Uint(index_of(
                &ICX90_TONE_MODES,
                &memory.tmode.as_str(),
                "tone mode",
            )?),
        );
        fields.insert(
            "mode".into(),
            Value::Uint(index_of(&ICX90_MODES, &memory.mode.as_str(), "mode")?),
        );
        fields.insert(
            "tune_step".into(),
            Value::Uint(index_of(&ICX90_TUNE_STEPS, &memory.tuning_step, "tuning step")?),
        );

        let name = if is_special {
            // Special channels carry no name.
            String::new()
        } else {
            memory.name.chars().take(config.name_length).collect()
        };
        fields.insert("name".into(), Value::Text(name));

        let (offset, len) = self.record_window(array, index)?;
        let mmap = self.require_mmap_mut()?;
        record::build(&MEM_ITEM, mmap.window_mut(offset, len)?, &fields)?;

        if !is_special {
            self.write_skip(index, &memory.skip)?;
            self.mark_used(index, true)?;
            if let Some(bank) = memory.bank {
                self.write_bank(index, Some(bank))?;
            }
            if let Some(pos) = memory.bank_pos {
                self.write_bank_position(index, pos)?;
            }
        }
        Ok(())
    }

    /// Zero the whole record; on the legacy variant also flag the slot
    /// unused.
    fn wipe_record(&mut self, number: i32) -> DriverResult<()> {
        let (array, index, special) = self.resolve_number(number)?;
        let is_special = special.is_some();
        let (offset, len) = self.record_window(array, index)?;
        self.require_mmap_mut()?.set_bytes(offset, &vec![0u8; len])?;
        if !is_special {
            self.mark_used(index, false)?;
        }
        Ok(())
    }

    // ---- bank table and skip flags ------------------------------------

    fn bank_layout(&self) -> &'static Layout {
        match self.config.bank_scheme {
            BankScheme::Indexed => &BANK_ITEM,
            BankScheme::Packed => &BANK_ITEM_PACKED,
        }
    }

    fn parse_bank_item(&self, index: usize) -> DriverResult<FieldMap> {
        let (offset, len) = self.record_window("banks", index)?;
        let window = self.require_mmap()?.window(offset, len)?;
        Ok(record::parse(self.bank_layout(), window)?)
    }

    fn build_bank_item(&mut self, index: usize, fields: &FieldMap) -> DriverResult<()> {
        let layout = self.bank_layout();
        let (offset, len) = self.record_window("banks", index)?;
        let mmap = self.require_mmap_mut()?;
        record::build(layout, mmap.window_mut(offset, len)?, fields)?;
        Ok(())
    }

    fn read_skip(&self, index: usize) -> DriverResult<String> {
        match self.config.bank_scheme {
            BankScheme::Indexed => {
                let fields = self.parse_bank_item(index)?;
                if uint(&fields, "prog_skip")? != 0 {
                    Ok("P".to_string())
                } else if uint(&fields, "mem_skip")? != 0 {
                    Ok("S".to_string())
                } else {
                    Ok(String::new())
                }
            }
            BankScheme::Packed => {
                let fields = self.parse_flags(index)?;
                if uint(&fields, "skip")? != 0 {
                    Ok("S".to_string())
                } else {
                    Ok(String::new())
                }
            }
        }
    }

    fn write_skip(&mut self, index: usize, skip: &str) -> DriverResult<()> {
        if !self.config.skips.contains(&skip) {
            return Err(DriverError::Unsupported {
                field: "skip",
                value: skip.to_string(),
            });
        }
        match self.config.bank_scheme {
            BankScheme::Indexed => {
                let mut fields = FieldMap::new();
                let (prog, mem) = match skip {
                    "P" => (1, 1),
                    "S" => (0, 1),
                    _ => (0, 0),
                };
                fields.insert("prog_skip".into(), Value::Uint(prog));
                fields.insert("mem_skip".into(), Value::Uint(mem));
                self.build_bank_item(index, &fields)
            }
            BankScheme::Packed => {
                let mut fields = FieldMap::new();
                fields.insert("skip".into(), Value::Uint((skip == "S") as u64));
                self.build_flags(index, &fields)
            }
        }
    }

    fn parse_flags(&self, index: usize) -> DriverResult<FieldMap> {
        let (offset, len) = self.record_window("flags", index)?;
        let window = self.require_mmap()?.window(offset, len)?;
        Ok(record::parse(&CHANNEL_FLAGS, window)?)
    }

    fn build_flags(&mut self, index: usize, fields: &FieldMap) -> DriverResult<()> {
        let (offset, len) = self.record_window("flags", index)?;
        let mmap = self.require_mmap_mut()?;
        record::build(&CHANNEL_FLAGS, mmap.window_mut(offset, len)?, fields)?;
        Ok(())
    }

    /// Slot-used flag; only the legacy variant stores one.
    fn mark_used(&mut self, index: usize, used: bool) -> DriverResult<()> {
        if self.config.bank_scheme == BankScheme::Packed {
            let mut fields = FieldMap::new();
            fields.insert("unused".into(), Value::Uint(!used as u64));
            self.build_flags(index, &fields)?;
        }
        Ok(())
    }

    fn read_bank(&self, index: usize) -> DriverResult<Option<usize>> {
        let fields = self.parse_bank_item(index)?;
        let stored = uint(&fields, "bank_index")? as usize;
        if stored < self.config.bank_letters.len() {
            Ok(Some(stored))
        } else {
            Ok(None)
        }
    }

    fn write_bank(&mut self, index: usize, bank: Option<usize>) -> DriverResult<()> {
        let stored = match bank {
            Some(b) => {
                if b >= self.config.bank_letters.len() {
                    return Err(DriverError::Lookup {
                        kind: "bank",
                        index: b,
                        len: self.config.bank_letters.len(),
                    });
                }
                b as u64
            }
            None => match self.config.bank_scheme {
                BankScheme::Indexed => UNBANKED,
                // The packed nibble has no unbanked encoding.
                BankScheme::Packed => {
                    return Err(DriverError::Unsupported {
                        field: "bank",
                        value: "none".to_string(),
                    })
                }
            },
        };
        let mut fields = FieldMap::new();
        fields.insert("bank_index".into(), Value::Uint(stored));
        self.build_bank_item(index, &fields)
    }

    fn read_bank_position(&self, index: usize) -> DriverResult<Option<u8>> {
        let fields = self.parse_bank_item(index)?;
        let pos = uint(&fields, "bank_channel")? as u8;
        if pos < BANK_POSITIONS {
            Ok(Some(pos))
        } else {
            Ok(None)
        }
    }

    fn write_bank_position(&mut self, index: usize, position: u8) -> DriverResult<()> {
        if position >= BANK_POSITIONS {
            return Err(DriverError::Lookup {
                kind: "bank position",
                index: position as usize,
                len: BANK_POSITIONS as usize,
            });
        }
        let mut fields = FieldMap::new();
        fields.insert("bank_channel".into(), Value::Uint(position as u64));
        self.build_bank_item(index, &fields)
    }

    fn channel_index(&self, number: i32) -> DriverResult<usize> {
        if number < 0 || number as usize >= self.config.num_memories {
            return Err(DriverError::InvalidMemory(number));
        }
        Ok(number as usize)
    }

    // ---- settings ------------------------------------------------------

    fn read_setting(&self, path: &str) -> DriverResult<u64> {
        let mmap = self.require_mmap()?;
        let (field, base) = self.config.image.resolve(path)?;
        let window = mmap.window(base, mmap.len() - base)?;
        decode_field(window, field)?
            .as_uint()
            .ok_or_else(|| DriverError::InvalidData(format!("{} is not an integer", path)))
    }

    fn write_setting(&mut self, path: &str, value: u64) -> DriverResult<()> {
        let (field, base) = self.config.image.resolve(path)?;
        let field = *field;
        let mmap = self.require_mmap_mut()?;
        let len = mmap.len() - base;
        encode_field(mmap.window_mut(base, len)?, &field, &Value::Uint(value))?;
        Ok(())
    }

    /// Currently selected memory channel.
    pub fn mem_channel(&self) -> DriverResult<u16> {
        Ok(self.read_setting("mem_channel")? as u16)
    }

    pub fn set_mem_channel(&mut self, channel: u16) -> DriverResult<()> {
        if channel as usize >= self.config.num_memories {
            return Err(DriverError::InvalidMemory(channel as i32));
        }
        self.write_setting("mem_channel", channel as u64)
    }

    /// Squelch level index; see the model's level-name table.
    pub fn squelch_level(&self) -> DriverResult<u8> {
        Ok(self.read_setting("squelch_level")? as u8)
    }

    pub fn set_squelch_level(&mut self, level: u8) -> DriverResult<()> {
        if level as usize >= self.config.squelch_levels.len() {
            return Err(DriverError::Lookup {
                kind: "squelch level",
                index: level as usize,
                len: self.config.squelch_levels.len(),
            });
        }
        self.write_setting("squelch_level", level as u64)
    }

    /// One of the DTMF autodial codes, as a digit string.
    pub fn dtmf_autodial(&self, slot: usize) -> DriverResult<String> {
        if slot >= self.config.dtmf_slots {
            return Err(DriverError::Lookup {
                kind: "DTMF slot",
                index: slot,
                len: self.config.dtmf_slots,
            });
        }
        let (offset, len) = self.record_window("dtmf_codes", slot)?;
        let code = dtmf::radio_to_dtmf(self.require_mmap()?.window(offset, len)?);
        // Unprogrammed trailing slots read back as spaces; drop them here.
        Ok(code.trim_end().to_string())
    }

    pub fn set_dtmf_autodial(&mut self, slot: usize, code: &str) -> DriverResult<()> {
        if slot >= self.config.dtmf_slots {
            return Err(DriverError::Lookup {
                kind: "DTMF slot",
                index: slot,
                len: self.config.dtmf_slots,
            });
        }
        let (offset, len) = self.record_window("dtmf_codes", slot)?;
        let bytes = dtmf::dtmf_to_radio(code, len)?;
        self.require_mmap_mut()?.set_bytes(offset, &bytes)?;
        Ok(())
    }
}

impl Radio for IcxRadio {
    fn vendor(&self) -> &str {
        self.config.vendor
    }

    fn model(&self) -> &str {
        self.config.model
    }

    fn get_features(&self) -> RadioFeatures {
        let config = self.config;
        let mut rf = RadioFeatures::new();
        rf.has_settings = config.has_settings;
        rf.has_name = true;
        rf.has_bank = false;
        rf.has_bank_index = true;
        rf.has_bank_names = false;
        rf.has_dtcs = true;
        rf.has_dtcs_polarity = true;
        rf.has_tuning_step = true;
        rf.can_delete = true;
        rf.valid_modes = ICX90_MODES.iter().map(|s| s.to_string()).collect();
        rf.valid_tmodes = ICX90_TONE_MODES.iter().map(|s| s.to_string()).collect();
        // The duplex table's trailing entry duplicates "".
        rf.valid_duplexes = ICX90_DUPLEXES[..3].iter().map(|s| s.to_string()).collect();
        rf.valid_tuning_steps = ICX90_TUNE_STEPS.to_vec();
        rf.valid_bands = vec![config.band];
        rf.valid_skips = config.skips.iter().map(|s| s.to_string()).collect();
        rf.valid_name_length = config.name_length;
        rf.valid_special_chans = {
            let mut names: Vec<String> = self.specials.iter().map(|s| s.name.clone()).collect();
            names.sort();
            names
        };
        rf.memory_bounds = (0, config.num_memories as i32 - 1);
        rf
    }

    fn get_memory(&self, number: i32) -> DriverResult<Memory> {
        self.read_memory(number)
    }

    fn set_memory(&mut self, memory: &Memory) -> DriverResult<()> {
        self.write_memory(memory)
    }

    fn erase_memory(&mut self, number: i32) -> DriverResult<()> {
        self.wipe_record(number)
    }
}

impl CloneModeRadio for IcxRadio {
    fn get_memsize(&self) -> usize {
        self.config.memsize
    }

    fn load_mmap(&mut self, mmap: MemoryMap) -> DriverResult<()> {
        if mmap.len() != self.config.memsize {
            return Err(DriverError::Codec(CodecError::Layout {
                name: self.config.image.name().to_string(),
                expected: self.config.memsize,
                actual: mmap.len(),
            }));
        }
        self.mmap = Some(mmap);
        Ok(())
    }

    fn get_mmap(&self) -> DriverResult<&MemoryMap> {
        self.require_mmap()
    }

    fn match_model(data: &[u8], _filename: &str) -> bool {
        data.len() == 0x2D40
    }
}

impl IndexedBankRadio for IcxRadio {
    fn bank_letters(&self) -> &[&'static str] {
        self.config.bank_letters
    }

    fn get_bank(&self, number: i32) -> DriverResult<Option<usize>> {
        let index = self.channel_index(number)?;
        self.read_bank(index)
    }

    fn set_bank(&mut self, number: i32, bank: Option<usize>) -> DriverResult<()> {
        let index = self.channel_index(number)?;
        self.write_bank(index, bank)
    }

    fn get_bank_position(&self, number: i32) -> DriverResult<Option<u8>> {
        let index = self.channel_index(number)?;
        self.read_bank_position(index)
    }

    fn set_bank_position(&mut self, number: i32, position: u8) -> DriverResult<()> {
        let index = self.channel_index(number)?;
        self.write_bank_position(index, position)
    }
}
