// Icom IC-E90 / IC-T90 driver (indexed bank table, settings area).

use super::icx::{
    BankScheme, IcxRadio, ModelConfig, BANK_INDEXES, BANK_ITEM, DTMF_CODE, MEM_ITEM,
};
use crate::bitwise::{FieldKind, Layout, LayoutBuilder};
use lazy_static::lazy_static;

pub const MEMSIZE: usize = 0x2D40;
pub const MEM_NUM: usize = 500;

pub static ICX90_SQUELCH_LEVELS: [&str; 11] = [
    "Open", "Auto", "Level 1", "Level 2", "Level 3", "Level 4", "Level 5", "Level 6", "Level 7",
    "Level 8", "Level 9",
];

lazy_static! {
    // Image geometry. The gaps skipped by seek() hold TV memories and
    // per-set flags this driver does not model; they are preserved
    // verbatim by the read-modify-write codec.
    static ref ICX90_IMAGE: Layout = LayoutBuilder::new("icx90")
        .array("memory", &MEM_ITEM, MEM_NUM)
        .array("scan_edges", &MEM_ITEM, 50)
        .array("banks", &BANK_ITEM, MEM_NUM)
        .seek(0x26C0)
        .array("vfo_a_band", &MEM_ITEM, 10)
        .array("vfo_b_band", &MEM_ITEM, 10)
        .array("call_channels", &MEM_ITEM, 5)
        .seek(0x2A93)
        .field("mem_channel", 2, FieldKind::UintLe)
        .seek(0x2A9F)
        .field("squelch_level", 1, FieldKind::UintLe)
        .array("dtmf_codes", &DTMF_CODE, 10)
        .build(MEMSIZE);

    pub static ref ICX90: ModelConfig = ModelConfig {
        vendor: "Icom",
        model: "IC-E90/T90",
        description: "Quad-band HT (indexed bank table)",
        memsize: MEMSIZE,
        image: &ICX90_IMAGE,
        num_memories: MEM_NUM,
        scan_edge_pairs: 25,
        call_channels: 5,
        vfo_channels: 10,
        bank_scheme: BankScheme::Indexed,
        bank_letters: &BANK_INDEXES,
        skips: &["", "S", "P"],
        band: (495_000, 999_990_000),
        name_length: 6,
        has_settings: true,
        squelch_levels: &ICX90_SQUELCH_LEVELS,
        dtmf_slots: 10,
    };
}

pub fn new_radio() -> IcxRadio {
    IcxRadio::new(&ICX90)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Memory;
    use crate::drivers::traits::{CloneModeRadio, DriverError, IndexedBankRadio, Radio};
    use crate::memmap::MemoryMap;

    fn radio_with_blank_image() -> IcxRadio {
        let mut radio = new_radio();
        radio.load_mmap(MemoryMap::with_size(MEMSIZE)).unwrap();
        radio
    }

    #[test]
    fn test_image_geometry() {
        assert_eq!(ICX90_IMAGE.element_window("memory", 0).unwrap(), (0, 16));
        assert_eq!(
            ICX90_IMAGE.element_window("scan_edges", 0).unwrap(),
            (0x1F40, 16)
        );
        assert_eq!(ICX90_IMAGE.element_window("banks", 0).unwrap(), (0x2260, 2));
        assert_eq!(
            ICX90_IMAGE.element_window("vfo_a_band", 0).unwrap(),
            (0x26C0, 16)
        );
        assert_eq!(
            ICX90_IMAGE.element_window("vfo_b_band", 0).unwrap(),
            (0x2760, 16)
        );
        assert_eq!(
            ICX90_IMAGE.element_window("call_channels", 0).unwrap(),
            (0x2800, 16)
        );
        assert_eq!(
            ICX90_IMAGE.element_window("dtmf_codes", 0).unwrap(),
            (0x2AA0, 16)
        );
    }

    #[test]
    fn test_load_mmap_size_check() {
        let mut radio = new_radio();
        assert!(radio.load_mmap(MemoryMap::with_size(100)).is_err());
        assert!(radio.get_mmap().is_err());
        assert!(radio.load_mmap(MemoryMap::with_size(MEMSIZE)).is_ok());
        assert_eq!(radio.get_mmap().unwrap().len(), MEMSIZE);
    }

    #[test]
    fn test_no_image_is_an_error() {
        let radio = new_radio();
        assert!(matches!(radio.get_memory(0), Err(DriverError::NoImage)));
    }

    #[test]
    fn test_all_zero_record_is_empty() {
        let radio = radio_with_blank_image();
        let mem = radio.get_memory(0).unwrap();
        assert!(mem.empty);
        assert_eq!(mem.number, 0);
    }

    #[test]
    fn test_zero_freq_with_garbage_is_empty() {
        // An erased slot only guarantees zeroed frequency bytes; the rest
        // of the record can hold values outside every lookup table.
        let mut image = MemoryMap::with_size(MEMSIZE);
        image.set_bytes(7 * 16 + 3, &[0xFF; 13]).unwrap();

        let mut radio = new_radio();
        radio.load_mmap(image).unwrap();
        let mem = radio.get_memory(7).unwrap();
        assert!(mem.empty);
    }

    #[test]
    fn test_memory_roundtrip() {
        let mut radio = radio_with_blank_image();

        let mut mem = Memory::new(42);
        mem.freq = 146_520_000;
        mem.name = "CALL".to_string();
        mem.mode = "FM".to_string();
        mem.tmode = "Tone".to_string();
        mem.rtone = 103.5;
        mem.ctone = 88.5;
        mem.duplex = "-".to_string();
        mem.offset = 600_000;
        mem.tuning_step = 12.5;
        mem.dtcs = 23;
        mem.dtcs_polarity = "NR".to_string();
        mem.skip = "S".to_string();
        radio.set_memory(&mem).unwrap();

        let back = radio.get_memory(42).unwrap();
        assert!(!back.empty);
        assert_eq!(back.freq, 146_520_000);
        assert_eq!(back.name, "CALL");
        assert_eq!(back.tmode, "Tone");
        assert_eq!(back.rtone, 103.5);
        assert_eq!(back.ctone, 88.5);
        assert_eq!(back.duplex, "-");
        assert_eq!(back.offset, 600_000);
        assert_eq!(back.tuning_step, 12.5);
        assert_eq!(back.dtcs, 23);
        assert_eq!(back.dtcs_polarity, "NR");
        assert_eq!(back.skip, "S");
    }

    #[test]
    fn test_fractional_step_frequency() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(7);
        mem.freq = 145_431_250;
        radio.set_memory(&mem).unwrap();
        assert_eq!(radio.get_memory(7).unwrap().freq, 145_431_250);

        // Raw image check: mult flag set, stored value on the 6.25 kHz grid
        let raw = radio.get_raw_memory(7).unwrap();
        assert_eq!(raw[3] & 0x01, 0x01);
        let stored = u32::from_le_bytes([raw[0], raw[1], raw[2], 0]);
        assert_eq!(stored as u64 * 6250, 145_431_250);
    }

    #[test]
    fn test_off_grid_frequency_rejected() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(0);
        mem.freq = 146_520_001;
        assert!(matches!(
            radio.set_memory(&mem),
            Err(DriverError::InvalidData(_))
        ));
    }

    #[test]
    fn test_erase_wipes_whole_record() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(3);
        mem.freq = 446_000_000;
        mem.name = "UHF".to_string();
        radio.set_memory(&mem).unwrap();

        radio.erase_memory(3).unwrap();
        assert!(radio.get_memory(3).unwrap().empty);
        assert_eq!(radio.get_raw_memory(3).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_empty_set_memory_wipes() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(5);
        mem.freq = 146_520_000;
        radio.set_memory(&mem).unwrap();

        radio.set_memory(&Memory::new_empty(5)).unwrap();
        assert_eq!(radio.get_raw_memory(5).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_special_channels() {
        let radio = radio_with_blank_image();
        let specials = radio.list_special_channels();
        assert_eq!(specials.len(), 75);
        assert_eq!(specials[0].name, "Scan edge: 00A");
        assert_eq!(specials[0].number, -75);
        assert_eq!(specials[1].name, "Scan edge: 00B");
        assert_eq!(specials[49].name, "Scan edge: 24B");
        assert_eq!(specials[50].name, "Call ch: 0");
        assert_eq!(specials[55].name, "VFO A: 0");
        assert_eq!(specials[65].name, "VFO B: 0");
        assert_eq!(specials[74].number, -1);

        // Numbering is dense and unique
        let mut numbers: Vec<i32> = specials.iter().map(|s| s.number).collect();
        numbers.dedup();
        assert_eq!(numbers.len(), 75);
        assert_eq!((numbers[0], numbers[74]), (-75, -1));
    }

    #[test]
    fn test_special_channel_roundtrip() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(-75); // Scan edge: 00A
        mem.freq = 430_000_000;
        mem.name = "IGNORED".to_string();
        radio.set_memory(&mem).unwrap();

        let back = radio.get_memory(-75).unwrap();
        assert_eq!(back.freq, 430_000_000);
        assert_eq!(back.extd_number, "Scan edge: 00A");
        // Special channels carry no name
        assert_eq!(back.name, "");

        // Written to the scan-edge array, not the channel array
        assert!(radio.get_memory(0).unwrap().empty);
        let (offset, _) = ICX90_IMAGE.element_window("scan_edges", 0).unwrap();
        assert_ne!(radio.get_mmap().unwrap().byte(offset).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_numbers() {
        let radio = radio_with_blank_image();
        assert!(matches!(
            radio.get_memory(500),
            Err(DriverError::InvalidMemory(500))
        ));
        assert!(matches!(
            radio.get_memory(-76),
            Err(DriverError::InvalidMemory(-76))
        ));
    }

    #[test]
    fn test_skip_in_bank_item() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(10);
        mem.freq = 146_520_000;
        mem.skip = "P".to_string();
        radio.set_memory(&mem).unwrap();
        assert_eq!(radio.get_memory(10).unwrap().skip, "P");

        // prog_skip and mem_skip both set in the bank record
        let flags = radio.get_mmap().unwrap().byte(0x2260 + 2 * 10).unwrap();
        assert_eq!(flags & 0x60, 0x60);

        mem.skip = "S".to_string();
        radio.set_memory(&mem).unwrap();
        assert_eq!(radio.get_memory(10).unwrap().skip, "S");

        mem.skip = String::new();
        radio.set_memory(&mem).unwrap();
        assert_eq!(radio.get_memory(10).unwrap().skip, "");

        mem.skip = "X".to_string();
        assert!(matches!(
            radio.set_memory(&mem),
            Err(DriverError::Unsupported { field: "skip", .. })
        ));
    }

    #[test]
    fn test_bank_assignment() {
        let mut radio = radio_with_blank_image();
        radio.set_bank(20, Some(8)).unwrap(); // bank "J"
        radio.set_bank_position(20, 17).unwrap();
        assert_eq!(radio.get_bank(20).unwrap(), Some(8));
        assert_eq!(radio.get_bank_position(20).unwrap(), Some(17));
        assert_eq!(radio.bank_letters()[8], "J");

        // Unbanked stores the all-ones sentinel
        radio.set_bank(20, None).unwrap();
        assert_eq!(radio.get_bank(20).unwrap(), None);
        let stored = radio.get_mmap().unwrap().byte(0x2260 + 2 * 20).unwrap();
        assert_eq!(stored & 0x1F, 0x1F);

        assert!(radio.set_bank(20, Some(18)).is_err());
        assert!(radio.set_bank_position(20, 100).is_err());
    }

    #[test]
    fn test_bank_write_preserves_skip_bits() {
        let mut radio = radio_with_blank_image();
        let mut mem = Memory::new(11);
        mem.freq = 146_520_000;
        mem.skip = "S".to_string();
        radio.set_memory(&mem).unwrap();

        radio.set_bank(11, Some(3)).unwrap();
        assert_eq!(radio.get_memory(11).unwrap().skip, "S");
        assert_eq!(radio.get_bank(11).unwrap(), Some(3));
    }

    #[test]
    fn test_settings() {
        let mut radio = radio_with_blank_image();

        radio.set_mem_channel(42).unwrap();
        assert_eq!(radio.mem_channel().unwrap(), 42);
        assert_eq!(radio.get_mmap().unwrap().byte(0x2A93).unwrap(), 42);
        assert!(radio.set_mem_channel(500).is_err());

        radio.set_squelch_level(10).unwrap();
        assert_eq!(radio.squelch_level().unwrap(), 10);
        assert_eq!(radio.get_mmap().unwrap().byte(0x2A9F).unwrap(), 10);
        assert!(radio.set_squelch_level(11).is_err());
    }

    #[test]
    fn test_dtmf_autodial() {
        let mut radio = radio_with_blank_image();
        radio.set_dtmf_autodial(0, "12*3#A").unwrap();
        assert_eq!(radio.dtmf_autodial(0).unwrap(), "12*3#A");

        let window = radio.get_mmap().unwrap().window(0x2AA0, 6).unwrap();
        assert_eq!(window, &[0x1, 0x2, 0xE, 0x3, 0xF, 0xA]);

        assert!(radio.set_dtmf_autodial(10, "1").is_err());
        assert!(radio.dtmf_autodial(10).is_err());
    }

    #[test]
    fn test_features() {
        let radio = new_radio();
        let rf = radio.get_features();
        assert!(rf.has_settings);
        assert!(rf.has_bank_index);
        assert_eq!(rf.memory_bounds, (0, 499));
        assert_eq!(rf.valid_name_length, 6);
        assert_eq!(rf.valid_duplexes, vec!["", "-", "+"]);
        assert_eq!(rf.valid_skips, vec!["", "S", "P"]);
        assert_eq!(rf.valid_tuning_steps.len(), 13);
        assert_eq!(rf.valid_bands, vec![(495_000, 999_990_000)]);
        assert_eq!(rf.valid_special_chans.len(), 75);
    }

    #[test]
    fn test_unmodeled_bytes_preserved() {
        // Bytes in the regions seek() skips must survive a channel write.
        let mut radio = new_radio();
        let mut image = vec![0u8; MEMSIZE];
        image[0x2650] = 0xA5; // inside the unmodeled gap after the banks
        radio.load_mmap(MemoryMap::new(image)).unwrap();

        let mut mem = Memory::new(0);
        mem.freq = 146_520_000;
        radio.set_memory(&mem).unwrap();

        assert_eq!(radio.get_mmap().unwrap().byte(0x2650).unwrap(), 0xA5);
    }
}
