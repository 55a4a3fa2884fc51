// Core data structures shared between drivers and the host application.
pub mod constants;
pub mod features;
pub mod memory;

pub use constants::*;
pub use features::RadioFeatures;
pub use memory::Memory;
