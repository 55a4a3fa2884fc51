// Driver registry for managing radio drivers

use std::collections::HashMap;
use std::sync::Mutex;

/// Information about a radio driver
#[derive(Debug, Clone)]
pub struct DriverInfo {
    pub vendor: String,
    pub model: String,
    pub description: String,
    pub memsize: usize,
}

impl DriverInfo {
    pub fn new(
        vendor: impl Into<String>,
        model: impl Into<String>,
        description: impl Into<String>,
        memsize: usize,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            model: model.into(),
            description: description.into(),
            memsize,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.vendor, self.model)
    }
}

/// Global driver registry
lazy_static::lazy_static! {
    static ref DRIVER_REGISTRY: Mutex<HashMap<String, DriverInfo>> = Mutex::new(HashMap::new());
}

/// Register a driver in the global registry
pub fn register_driver(info: DriverInfo) {
    let key = format!("{}::{}", info.vendor, info.model);
    DRIVER_REGISTRY.lock().unwrap().insert(key, info);
}

/// Get information about a specific driver
pub fn get_driver(vendor: &str, model: &str) -> Option<DriverInfo> {
    let key = format!("{}::{}", vendor, model);
    DRIVER_REGISTRY.lock().unwrap().get(&key).cloned()
}

/// List all registered drivers
pub fn list_drivers() -> Vec<DriverInfo> {
    DRIVER_REGISTRY.lock().unwrap().values().cloned().collect()
}
