// icx-rs: clone-image drivers for the Icom IC-E90/T90 handheld family

pub mod bitwise;
pub mod core;
pub mod drivers;
pub mod memmap;

// Re-export commonly used types
pub use bitwise::{CodecError, FieldDef, FieldKind, Layout, LayoutBuilder, Value};
pub use crate::core::{constants::*, features::RadioFeatures, memory::Memory};
pub use drivers::{
    init_drivers, list_drivers, CloneModeRadio, DriverError, DriverResult, IndexedBankRadio,
    Radio,
};
pub use memmap::MemoryMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
