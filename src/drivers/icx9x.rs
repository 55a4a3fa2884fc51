// Early Icom IC-E90/T90 firmware variant: the bank index is packed into
// a nibble and skip/used flags live in a separate per-channel table.

use super::icx::{
    BankScheme, IcxRadio, ModelConfig, BANK_INDEXES, BANK_ITEM_PACKED, CHANNEL_FLAGS, MEM_ITEM,
};
use crate::bitwise::{Layout, LayoutBuilder};
use lazy_static::lazy_static;

pub const MEMSIZE: usize = 0x2D40;
pub const MEM_NUM: usize = 500;

lazy_static! {
    static ref ICX9X_IMAGE: Layout = LayoutBuilder::new("icx9x")
        .array("memory", &MEM_ITEM, MEM_NUM)
        .seek(0x2260)
        .array("banks", &BANK_ITEM_PACKED, MEM_NUM)
        .array("flags", &CHANNEL_FLAGS, MEM_NUM)
        .build(MEMSIZE);

    pub static ref ICX9X: ModelConfig = ModelConfig {
        vendor: "Icom",
        model: "IC-E90/T90 (early)",
        description: "Quad-band HT (packed bank byte, flags table)",
        memsize: MEMSIZE,
        image: &ICX9X_IMAGE,
        num_memories: MEM_NUM,
        scan_edge_pairs: 0,
        call_channels: 0,
        vfo_channels: 0,
        bank_scheme: BankScheme::Packed,
        // The nibble can only address the first 16 of the family letters.
        bank_letters: &BANK_INDEXES[..16],
        skips: &["", "S"],
        band: (495_000, 999_990_000),
        name_length: 6,
        has_settings: false,
        squelch_levels: &[],
        dtmf_slots: 0,
    };
}

pub fn new_radio() -> IcxRadio {
    IcxRadio::new(&ICX9X)
}
