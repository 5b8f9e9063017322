//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use edgeview_core::{PrimitiveKind, SurfaceMesh, generate_primitive};
use edgeview_renderer::traits::complete;
use edgeview_renderer::{
    Camera, Collaborators, Dispatcher, DistanceLimits, EventSender, InteractiveViewControl,
    LoadRequest, LoadResult, LoadedMesh, ModelLoader, RenderSurface, Renderer, RendererConfig,
    Scene,
};
use parking_lot::Mutex;

/// Loader that parks requests until the test completes them
#[derive(Clone, Default)]
pub struct DeferredLoader {
    pub pending: Arc<Mutex<Vec<(LoadRequest, EventSender)>>>,
}

impl DeferredLoader {
    /// Complete the `index`-th parked request (in request order)
    pub fn complete(&self, index: usize, result: LoadResult) {
        let (request, sender) = self.pending.lock()[index].clone();
        complete(&sender, request, result);
    }

    pub fn requests(&self) -> Vec<LoadRequest> {
        self.pending.lock().iter().map(|(r, _)| r.clone()).collect()
    }
}

impl ModelLoader for DeferredLoader {
    fn load(&mut self, request: LoadRequest, completion: EventSender) {
        self.pending.lock().push((request, completion));
    }
}

/// Loader that answers every request inline with the same meshes
pub struct InstantLoader {
    pub meshes: Vec<LoadedMesh>,
}

impl ModelLoader for InstantLoader {
    fn load(&mut self, request: LoadRequest, completion: EventSender) {
        complete(&completion, request, Ok(self.meshes.clone()));
    }
}

pub struct FixedSurface {
    pub size: (u32, u32),
    pub device_pixel_ratio: f32,
}

impl RenderSurface for FixedSurface {
    fn render_size(&self) -> (u32, u32) {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }
}

/// What the renderer saw in one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub roots: usize,
    pub visible_lines: usize,
    pub visible_meshes: usize,
    pub camera: Camera,
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingRenderer {
    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn last(&self) -> Option<Frame> {
        self.frames.lock().last().cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let mut visible_lines = 0;
        let mut visible_meshes = 0;
        scene.traverse_visible(&mut |node| {
            if node.as_line().is_some() {
                visible_lines += 1;
            }
            if node.is_mesh() {
                visible_meshes += 1;
            }
        });
        self.frames.lock().push(Frame {
            roots: scene.len(),
            visible_lines,
            visible_meshes,
            camera: *camera,
        });
    }
}

/// View control that remembers how it was attached
#[derive(Clone, Default)]
pub struct RecordingControls {
    pub attached: Arc<Mutex<Vec<(Camera, DistanceLimits)>>>,
    pub notify: Arc<Mutex<Option<EventSender>>>,
}

impl InteractiveViewControl for RecordingControls {
    fn attach(&mut self, camera: Camera, limits: DistanceLimits, notify: EventSender) {
        self.attached.lock().push((camera, limits));
        *self.notify.lock() = Some(notify);
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub renderer: RecordingRenderer,
    pub controls: RecordingControls,
}

pub fn harness(config: RendererConfig, loader: Box<dyn ModelLoader>) -> Harness {
    let renderer = RecordingRenderer::default();
    let controls = RecordingControls::default();
    let dispatcher = Dispatcher::new(
        config,
        Collaborators {
            loader,
            surface: Box::new(FixedSurface {
                size: (800, 600),
                device_pixel_ratio: 2.0,
            }),
            renderer: Box::new(renderer.clone()),
            controls: Box::new(controls.clone()),
        },
    );
    Harness {
        dispatcher,
        renderer,
        controls,
    }
}

pub fn primitive_meshes(kind: PrimitiveKind) -> Vec<LoadedMesh> {
    vec![LoadedMesh::new(kind.name(), generate_primitive(kind))]
}

pub fn smooth_sphere() -> Vec<LoadedMesh> {
    vec![LoadedMesh::new(
        "sphere",
        edgeview_core::generate_icosahedron(2.0, 2),
    )]
}

pub fn empty_mesh() -> Vec<LoadedMesh> {
    vec![LoadedMesh::new("empty", SurfaceMesh::new())]
}
