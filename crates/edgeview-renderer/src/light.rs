//! Scene lights

use edgeview_core::Color;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::LightingConfig;

/// A light registered in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    /// Uniform light from every direction
    Ambient { color: Color, intensity: f32 },
    /// Parallel rays shining from `position` towards the origin
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. } | Light::Directional { intensity, .. } => *intensity,
        }
    }

    /// Direction the light travels, for directional lights
    pub fn direction(&self) -> Option<Vec3> {
        match self {
            Light::Ambient { .. } => None,
            Light::Directional { position, .. } => (-*position).try_normalize(),
        }
    }
}

/// The ambient and directional lights described by the configuration
pub fn lights_from_config(config: &LightingConfig) -> [Light; 2] {
    [
        Light::Ambient {
            color: config.ambient_color,
            intensity: config.ambient_intensity,
        },
        Light::Directional {
            color: config.directional_color,
            intensity: config.directional_intensity,
            position: config.directional_position,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lights_from_default_config() {
        let [ambient, directional] = lights_from_config(&LightingConfig::default());
        assert_eq!(ambient.intensity(), 1.0);
        assert!(ambient.direction().is_none());
        assert_eq!(directional.intensity(), 0.25);
        let dir = directional.direction().unwrap();
        assert!(dir.x < 0.0 && dir.y < 0.0);
    }
}
