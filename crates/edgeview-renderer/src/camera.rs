//! Perspective camera and viewport description.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Perspective camera looking at a target point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 1.0)
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.position,
            target: config.target,
            up: Vec3::Y,
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            aspect,
        }
    }

    /// Distance between the eye and the target
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Move the eye along its current view ray so the distance lies in `[min, max]`
    pub fn clamp_distance(&mut self, min: f32, max: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }
        let clamped = distance.clamp(min, max);
        if clamped != distance {
            self.position = self.target + offset * (clamped / distance);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Size of the render target as reported by the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: u32,
    /// Logical height
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Physical pixel size used by screen-space line materials
    pub fn resolution(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.device_pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}
