//! Renderer configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so a config file only
//! needs to name the values it overrides.

use std::path::PathBuf;

use edgeview_core::{Color, EdgeOptions};
use glam::Vec3;
use serde::{Deserialize, Serialize};

const DEFAULT_TRANSLUCENT_OPACITY: f32 = 0.85;

/// Display defaults for a new session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial surface opacity, restored when opacity is toggled back
    pub opacity: f32,
    pub lit: bool,
    pub thickness: f32,
    pub use_thick_lines: bool,
    pub line_color: Color,
    /// Tint of the background and shadow proxies
    pub fill_color: Color,
    pub shadow_roughness: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_TRANSLUCENT_OPACITY,
            lit: false,
            thickness: 1.5,
            use_thick_lines: true,
            line_color: Color::from_hex(0xbbddff),
            fill_color: Color::from_hex(0x0066dd),
            shadow_roughness: 1.0,
        }
    }
}

impl DisplayConfig {
    /// Opacity to return to when toggling off fully opaque. A session that
    /// starts opaque falls back to the stock translucency.
    pub fn translucent_opacity(&self) -> f32 {
        if self.opacity < 1.0 {
            self.opacity
        } else {
            DEFAULT_TRANSLUCENT_OPACITY
        }
    }
}

/// Perspective camera settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 40.0,
            near: 0.1,
            far: 2000.0,
            position: Vec3::new(-3.0, 3.0, 8.0),
            target: Vec3::ZERO,
        }
    }
}

/// Scene lights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub directional_color: Color,
    pub directional_intensity: f32,
    pub directional_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::WHITE,
            ambient_intensity: 1.0,
            directional_color: Color::WHITE,
            directional_intensity: 0.25,
            directional_position: Vec3::new(50.0, 50.0, 0.0),
        }
    }
}

/// Interactive view control limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 15.0,
        }
    }
}

/// Edge extraction and initial line widths
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EdgeConfig {
    pub options: EdgeOptions,
    pub thin_linewidth: f32,
    pub thick_linewidth: f32,
    pub conditional_thick_linewidth: f32,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            options: EdgeOptions::default(),
            thin_linewidth: 1.0,
            thick_linewidth: 3.0,
            conditional_thick_linewidth: 2.0,
        }
    }
}

/// What to do with a load completion that is no longer the latest request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StaleLoadPolicy {
    /// Every completion is applied in arrival order; the last one processed wins
    #[default]
    Apply,
    /// Only the completion of the most recent request is applied
    Discard,
}

/// Model sources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelsConfig {
    /// Model loaded on `Init`
    pub default_model: PathBuf,
    /// Models cycled by next/previous
    pub catalogue: Vec<PathBuf>,
    /// Offset applied to loaded models
    pub offset: Vec3,
    pub stale_loads: StaleLoadPolicy,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default_model: PathBuf::from("models/drawer.obj"),
            catalogue: Vec::new(),
            offset: Vec3::new(0.0, -2.0, 0.0),
            stale_loads: StaleLoadPolicy::Apply,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RendererConfig {
    pub display: DisplayConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub controls: ControlsConfig,
    pub edges: EdgeConfig,
    pub models: ModelsConfig,
}
