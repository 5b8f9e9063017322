//! Application configuration
//!
//! Renderer defaults plus the settings of the headless host, stored together
//! in one RON file.

mod manager;

pub use manager::ConfigManager;

use edgeview_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

/// Headless host settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Logical surface width
    pub width: u32,
    /// Logical surface height
    pub height: u32,
    pub device_pixel_ratio: f32,
    /// How long to wait for outstanding model loads, in milliseconds
    pub load_timeout_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            device_pixel_ratio: 1.0,
            load_timeout_ms: 10_000,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Headless host settings
    #[serde(default)]
    pub headless: HeadlessConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}
