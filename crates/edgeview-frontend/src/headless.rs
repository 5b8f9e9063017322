//! Headless collaborators: a fixed-size surface, a renderer that records
//! frame statistics instead of drawing, and view controls driven by scripts.

use std::sync::Arc;

use edgeview_core::{LineGeometry, Node, NodeKind};
use edgeview_renderer::{
    Camera, DistanceLimits, Event, EventSender, InteractiveViewControl, RenderSurface, Renderer,
    Scene,
};
use glam::{Mat4, Quat, Vec3};
use parking_lot::Mutex;
use serde::Serialize;

use crate::config::HeadlessConfig;

/// Off-screen surface with a fixed size
#[derive(Debug, Clone, Copy)]
pub struct HeadlessSurface {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl From<&HeadlessConfig> for HeadlessSurface {
    fn from(config: &HeadlessConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            device_pixel_ratio: config.device_pixel_ratio,
        }
    }
}

impl RenderSurface for HeadlessSurface {
    fn render_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }
}

/// What one frame would have drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub frame: usize,
    pub roots: usize,
    pub visible_meshes: usize,
    pub visible_triangles: usize,
    /// Visible meshes whose bounds center lies inside the view frustum
    pub meshes_in_view: usize,
    pub visible_hard_segments: usize,
    pub visible_conditional_segments: usize,
    /// Largest screen-space line width among visible thick lines
    pub line_width: Option<f32>,
    pub camera_position: [f32; 3],
}

impl FrameStats {
    fn collect(frame: usize, scene: &Scene, camera: &Camera) -> Self {
        let mut stats = Self {
            frame,
            roots: scene.len(),
            visible_meshes: 0,
            visible_triangles: 0,
            meshes_in_view: 0,
            visible_hard_segments: 0,
            visible_conditional_segments: 0,
            line_width: None,
            camera_position: camera.position.to_array(),
        };

        scene.traverse_visible(&mut |node| match &node.kind {
            NodeKind::Group => {}
            NodeKind::Mesh(mesh) => {
                stats.visible_meshes += 1;
                stats.visible_triangles += mesh.geometry.triangle_count();
            }
            NodeKind::Line(line) => {
                let count = line.geometry.segment_count();
                match line.geometry {
                    LineGeometry::Segments(_) | LineGeometry::SegmentInstances(_) => {
                        stats.visible_hard_segments += count;
                    }
                    LineGeometry::Conditional(_) | LineGeometry::ConditionalInstances(_) => {
                        stats.visible_conditional_segments += count;
                    }
                }
                if line.material.resolution.is_some() {
                    let width = line.material.linewidth;
                    stats.line_width = Some(stats.line_width.map_or(width, |w| w.max(width)));
                }
            }
        });

        let view_projection = camera.view_projection();
        for root in scene.roots() {
            count_meshes_in_view(root, Mat4::IDENTITY, view_projection, &mut stats.meshes_in_view);
        }

        stats
    }
}

fn count_meshes_in_view(node: &Node, parent: Mat4, view_projection: Mat4, count: &mut usize) {
    if !node.visible {
        return;
    }
    let world = parent * node.transform.to_mat4();

    if let NodeKind::Mesh(mesh) = &node.kind {
        if let Some((min, max)) = mesh.geometry.bounds() {
            let center = world.transform_point3((min + max) * 0.5);
            let clip = view_projection * center.extend(1.0);
            if clip.w > 0.0 && (clip.truncate() / clip.w).abs().cmple(Vec3::ONE).all() {
                *count += 1;
            }
        }
    }

    for child in &node.children {
        count_meshes_in_view(child, world, view_projection, count);
    }
}

/// Shared list of recorded frames
pub type FrameLog = Arc<Mutex<Vec<FrameStats>>>;

/// Renderer that records [`FrameStats`] for every render call
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: FrameLog,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the frame log, readable after the renderer is handed off
    pub fn frames(&self) -> FrameLog {
        Arc::clone(&self.frames)
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let mut frames = self.frames.lock();
        let stats = FrameStats::collect(frames.len(), scene, camera);
        tracing::debug!(
            "Frame {}: {} meshes, {} hard + {} conditional segments",
            stats.frame,
            stats.visible_meshes,
            stats.visible_hard_segments,
            stats.visible_conditional_segments
        );
        frames.push(stats);
    }
}

#[derive(Debug)]
struct Attachment {
    camera: Camera,
    limits: DistanceLimits,
    notify: EventSender,
}

/// View control moved by script steps rather than a pointer
#[derive(Debug, Clone, Default)]
pub struct ScriptedControls {
    attachment: Arc<Mutex<Option<Attachment>>>,
}

impl ScriptedControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orbit the camera around its target about the vertical axis and post
    /// the new view. Returns false if the control is not attached.
    pub fn orbit(&self, degrees: f32) -> bool {
        let mut attachment = self.attachment.lock();
        let Some(attachment) = attachment.as_mut() else {
            tracing::debug!("View control not attached, ignoring orbit");
            return false;
        };

        let camera = &mut attachment.camera;
        let offset = Quat::from_rotation_y(degrees.to_radians()) * (camera.position - camera.target);
        camera.position = camera.target + offset;
        camera.clamp_distance(attachment.limits.min, attachment.limits.max);

        attachment.notify.send(Event::ViewChanged(*camera))
    }

    /// Move the camera towards (negative) or away from (positive) its target
    pub fn dolly(&self, distance: f32) -> bool {
        let mut attachment = self.attachment.lock();
        let Some(attachment) = attachment.as_mut() else {
            tracing::debug!("View control not attached, ignoring dolly");
            return false;
        };

        let camera = &mut attachment.camera;
        let Some(direction) = (camera.position - camera.target).try_normalize() else {
            return false;
        };
        camera.position += direction * distance;
        camera.clamp_distance(attachment.limits.min, attachment.limits.max);

        attachment.notify.send(Event::ViewChanged(*camera))
    }
}

impl InteractiveViewControl for ScriptedControls {
    fn attach(&mut self, mut camera: Camera, limits: DistanceLimits, notify: EventSender) {
        camera.clamp_distance(limits.min, limits.max);
        *self.attachment.lock() = Some(Attachment {
            camera,
            limits,
            notify,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeview_core::{PrimitiveKind, SurfaceMaterial, Transform, generate_primitive};

    #[test]
    fn test_frame_stats_counts_visible_only() {
        let mut scene = Scene::new();
        let mesh = generate_primitive(PrimitiveKind::Octahedron);
        scene.add_root(Node::group("shown").with_child(Node::mesh(
            "a",
            mesh.clone(),
            SurfaceMaterial::default(),
        )));
        scene.add_root(
            Node::group("hidden")
                .with_visible(false)
                .with_child(Node::mesh("b", mesh, SurfaceMaterial::default())),
        );

        let mut renderer = HeadlessRenderer::new();
        let frames = renderer.frames();
        renderer.render(&scene, &Camera::default());
        renderer.render(&scene, &Camera::default());

        let frames = frames.lock();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].frame, 1);
        assert_eq!(frames[0].roots, 2);
        assert_eq!(frames[0].visible_meshes, 1);
        assert_eq!(frames[0].visible_triangles, 8);
        assert_eq!(frames[0].meshes_in_view, 1);
        assert_eq!(frames[0].line_width, None);
        assert_eq!(frames[0].camera_position, [-3.0, 3.0, 8.0]);
    }

    #[test]
    fn test_meshes_in_view_follow_parent_transforms() {
        let camera = Camera::default();
        let mesh = generate_primitive(PrimitiveKind::Octahedron);
        let behind_eye = camera.position + (camera.position - camera.target) * 2.0;

        let mut scene = Scene::new();
        scene.add_root(Node::group("front").with_child(Node::mesh(
            "a",
            mesh.clone(),
            SurfaceMaterial::default(),
        )));
        scene.add_root(
            Node::group("behind")
                .with_transform(Transform::from_position(behind_eye))
                .with_child(Node::mesh("b", mesh.clone(), SurfaceMaterial::default())),
        );
        scene.add_root(
            Node::group("far")
                .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, -5000.0)))
                .with_child(Node::mesh("c", mesh, SurfaceMaterial::default())),
        );

        let mut renderer = HeadlessRenderer::new();
        let frames = renderer.frames();
        renderer.render(&scene, &camera);

        let frames = frames.lock();
        assert_eq!(frames[0].visible_meshes, 3);
        assert_eq!(frames[0].meshes_in_view, 1);
    }

    #[test]
    fn test_surface_from_config() {
        let surface = HeadlessSurface::from(&HeadlessConfig::default());
        assert_eq!(surface.render_size(), (1280, 720));
        assert_eq!(surface.viewport().resolution().x, 1280.0);
    }

    #[test]
    fn test_orbit_requires_attachment() {
        let controls = ScriptedControls::new();
        assert!(!controls.orbit(10.0));
        assert!(!controls.dolly(1.0));
    }
}
