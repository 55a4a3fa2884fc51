// Radio driver framework
pub mod dtmf;
pub mod registry;
pub mod traits;

// Drivers
pub mod icx;
pub mod icx90;
pub mod icx9x;

pub use registry::{get_driver, list_drivers, register_driver, DriverInfo};
pub use traits::{CloneModeRadio, DriverError, DriverResult, IndexedBankRadio, Radio};

/// Initialize and register all available radio drivers
///
/// This function must be called once at application startup to populate
/// the driver registry with all available radio drivers.
pub fn init_drivers() {
    register_driver(DriverInfo::new(
        icx90::ICX90.vendor,
        icx90::ICX90.model,
        icx90::ICX90.description,
        icx90::ICX90.memsize,
    ));

    register_driver(DriverInfo::new(
        icx9x::ICX9X.vendor,
        icx9x::ICX9X.model,
        icx9x::ICX9X.description,
        icx9x::ICX9X.memsize,
    ));
}
