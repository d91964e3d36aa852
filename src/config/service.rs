use serde::Deserialize;

use crate::config::{settings::SettingsConfig, vendor::VendorConfig};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub vendor: VendorConfig,
}
