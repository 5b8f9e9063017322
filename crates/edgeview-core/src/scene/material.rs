//! Surface and line materials

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Lighting model of a surface material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shading {
    /// Flat color, ignores lights
    Unlit,
    /// Physically based, reacts to lights
    Standard { roughness: f32, metalness: f32 },
}

/// Depth bias applied when rasterizing a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonOffset {
    pub factor: f32,
    pub units: f32,
}

impl Default for PolygonOffset {
    fn default() -> Self {
        Self {
            factor: 1.0,
            units: 1.0,
        }
    }
}

/// Material of a filled surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    pub shading: Shading,
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub polygon_offset: Option<PolygonOffset>,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self::standard(Color::WHITE, 1.0)
    }
}

impl SurfaceMaterial {
    /// Unlit flat-color material
    pub fn unlit(color: Color) -> Self {
        Self {
            shading: Shading::Unlit,
            color,
            opacity: 1.0,
            transparent: false,
            polygon_offset: None,
        }
    }

    /// Light-reactive material
    pub fn standard(color: Color, roughness: f32) -> Self {
        Self {
            shading: Shading::Standard {
                roughness,
                metalness: 0.0,
            },
            color,
            opacity: 1.0,
            transparent: false,
            polygon_offset: None,
        }
    }

    /// Sets the polygon offset.
    pub fn with_polygon_offset(mut self, offset: PolygonOffset) -> Self {
        self.polygon_offset = Some(offset);
        self
    }

    /// Set opacity; blending is enabled for anything but fully opaque
    pub fn set_opacity(&mut self, opacity: f32) {
        self.transparent = opacity != 1.0;
        self.opacity = opacity;
    }
}

/// Material of a line node.
///
/// Screen-space (thick) line materials carry a `resolution` uniform in
/// physical pixels; plain lines do not and ignore `linewidth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMaterial {
    pub color: Color,
    pub linewidth: f32,
    pub resolution: Option<Vec2>,
}

impl LineMaterial {
    /// One-pixel hardware lines
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            linewidth: 1.0,
            resolution: None,
        }
    }

    /// Screen-space lines of the given width in pixels
    pub fn screen_space(color: Color, linewidth: f32) -> Self {
        Self {
            color,
            linewidth,
            resolution: Some(Vec2::ONE),
        }
    }

    pub fn has_resolution(&self) -> bool {
        self.resolution.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_opacity_transparency_rule() {
        let mut material = SurfaceMaterial::unlit(Color::from_hex(0x0066dd));
        material.set_opacity(0.85);
        assert!(material.transparent);
        assert_eq!(material.opacity, 0.85);

        material.set_opacity(1.0);
        assert!(!material.transparent);
        assert_eq!(material.opacity, 1.0);
    }

    #[test]
    fn test_line_material_resolution() {
        assert!(!LineMaterial::basic(Color::WHITE).has_resolution());
        assert!(LineMaterial::screen_space(Color::WHITE, 3.0).has_resolution());
    }
}
