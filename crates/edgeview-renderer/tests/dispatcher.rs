mod common;

use std::time::Duration;

use common::*;
use edgeview_core::{Color, Node, PrimitiveKind};
use edgeview_renderer::{
    DispatchOutcome, Dispatcher, Event, LoadError, Representation, RendererConfig,
    StaleLoadPolicy,
};
use glam::{Vec2, Vec3};

fn root(dispatcher: &Dispatcher, representation: Representation) -> Node {
    dispatcher
        .representations()
        .get(dispatcher.scene(), representation)
        .cloned()
        .unwrap_or_else(|| panic!("{representation} missing"))
}

fn loaded(kind: PrimitiveKind) -> Harness {
    let mut h = harness(
        RendererConfig::default(),
        Box::new(InstantLoader {
            meshes: primitive_meshes(kind),
        }),
    );
    h.dispatcher.init();
    h.dispatcher.pump();
    h
}

fn mesh_materials(node: &Node) -> Vec<(f32, bool)> {
    let mut out = Vec::new();
    node.traverse(&mut |n| {
        if let Some(mesh) = n.as_mesh() {
            out.push((mesh.material.opacity, mesh.material.transparent));
        }
    });
    out
}

#[test]
fn test_init_builds_and_renders() {
    let h = loaded(PrimitiveKind::Octahedron);
    let dispatcher = &h.dispatcher;

    assert!(dispatcher.is_world_ready());
    assert_eq!(dispatcher.pending_loads(), 0);
    assert_eq!(dispatcher.scene().len(), 4);
    assert_eq!(dispatcher.scene().lights().len(), 2);

    let original = root(dispatcher, Representation::Original);
    assert_eq!(original.name, "drawer");
    assert_eq!(original.transform.position, Vec3::new(0.0, -2.0, 0.0));
    assert!(!dispatcher.scene().contains(original.id));

    let attached = h.controls.attached.lock().clone();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].0.position, Vec3::new(-3.0, 3.0, 8.0));
    assert_eq!(attached[0].1.min, 5.0);
    assert_eq!(attached[0].1.max, 15.0);

    // Default state: unlit background fill, thick lines for MODEL and CONDITIONAL
    let frame = h.renderer.last().unwrap();
    assert_eq!(frame.roots, 4);
    assert_eq!(frame.visible_meshes, 1);
    assert_eq!(frame.visible_lines, 2);
    assert!(!dispatcher.scene().is_dirty());
}

#[test]
fn test_set_up_world_runs_once() {
    let mut h = harness(RendererConfig::default(), Box::new(DeferredLoader::default()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::SetUpWorld);

    assert_eq!(h.controls.attached.lock().len(), 1);
    assert_eq!(h.dispatcher.scene().lights().len(), 2);
}

#[test]
fn test_toggle_light_scenario() {
    let mut h = loaded(PrimitiveKind::Cylinder);
    assert!(!h.dispatcher.state().lit);

    let outcome = h.dispatcher.dispatch(Event::ToggleLight);
    assert_eq!(outcome, DispatchOutcome::Flag(true));
    assert!(h.dispatcher.state().lit);
    assert!(root(&h.dispatcher, Representation::Shadow).visible);
    assert!(!root(&h.dispatcher, Representation::Background).visible);

    assert_eq!(h.dispatcher.dispatch(Event::ToggleLight).flag(), Some(false));
    assert!(!root(&h.dispatcher, Representation::Shadow).visible);
    assert!(root(&h.dispatcher, Representation::Background).visible);
}

#[test]
fn test_opacity_round_trip() {
    let mut h = loaded(PrimitiveKind::Cone);
    let proxies = [Representation::Background, Representation::Shadow];

    for r in proxies {
        assert_eq!(mesh_materials(&root(&h.dispatcher, r)), vec![(0.85, true)]);
    }

    assert_eq!(h.dispatcher.dispatch(Event::ToggleOpacity).flag(), Some(true));
    for r in proxies {
        assert_eq!(mesh_materials(&root(&h.dispatcher, r)), vec![(1.0, false)]);
    }

    assert_eq!(h.dispatcher.dispatch(Event::ToggleOpacity).flag(), Some(false));
    for r in proxies {
        assert_eq!(mesh_materials(&root(&h.dispatcher, r)), vec![(0.85, true)]);
    }
}

#[test]
fn test_opacity_toggle_restores_configured_value() {
    let mut config = RendererConfig::default();
    config.display.opacity = 0.5;
    let mut h = harness(
        config,
        Box::new(InstantLoader {
            meshes: primitive_meshes(PrimitiveKind::Cone),
        }),
    );
    h.dispatcher.init();
    h.dispatcher.pump();

    let background = Representation::Background;
    assert_eq!(mesh_materials(&root(&h.dispatcher, background)), vec![(0.5, true)]);

    assert_eq!(h.dispatcher.dispatch(Event::ToggleOpacity).flag(), Some(true));
    assert_eq!(h.dispatcher.state().opacity, 1.0);

    assert_eq!(h.dispatcher.dispatch(Event::ToggleOpacity).flag(), Some(false));
    assert_eq!(h.dispatcher.state().opacity, 0.5);
    assert_eq!(mesh_materials(&root(&h.dispatcher, background)), vec![(0.5, true)]);
}

#[test]
fn test_line_thickness_and_color() {
    let mut h = loaded(PrimitiveKind::Torus);

    let outcome = h.dispatcher.dispatch(Event::LineThickness(2.5));
    assert_eq!(outcome.scalar(), Some(2.5));
    let red = Color::from_hex(0xff0000);
    assert_eq!(h.dispatcher.dispatch(Event::LineColors(red)).color(), Some(red));

    for r in [Representation::Model, Representation::Conditional] {
        root(&h.dispatcher, r).traverse(&mut |node| {
            let Some(line) = node.as_line() else { return };
            assert_eq!(line.material.color, red);
            if line.is_thick() {
                assert_eq!(line.material.linewidth, 2.5);
                assert_eq!(line.material.resolution, Some(Vec2::new(1600.0, 1200.0)));
            }
        });
    }
}

#[test]
fn test_toggle_thick_lines() {
    let mut h = loaded(PrimitiveKind::Dodecahedron);
    assert_eq!(h.dispatcher.dispatch(Event::ToggleThickLines).flag(), Some(false));

    for r in [Representation::Model, Representation::Conditional] {
        root(&h.dispatcher, r).traverse(&mut |node| {
            if let Some(line) = node.as_line() {
                assert_eq!(node.visible, !line.is_thick());
            }
        });
    }
}

#[test]
fn test_post_process_is_idempotent() {
    let mut h = loaded(PrimitiveKind::Icosahedron);
    h.dispatcher.dispatch(Event::PostProcessModels);
    let once: Vec<Node> = h.dispatcher.scene().roots().cloned().collect();
    h.dispatcher.dispatch(Event::PostProcessModels);
    let twice: Vec<Node> = h.dispatcher.scene().roots().cloned().collect();
    assert_eq!(once, twice);
}

#[test]
fn test_smooth_model_has_empty_model_lines() {
    let mut h = harness(
        RendererConfig::default(),
        Box::new(InstantLoader {
            meshes: smooth_sphere(),
        }),
    );
    h.dispatcher.init();
    h.dispatcher.pump();

    let model = root(&h.dispatcher, Representation::Model);
    assert_eq!(model.line_count(), 2);
    model.traverse(&mut |node| {
        if let Some(line) = node.as_line() {
            assert!(line.geometry.is_empty());
        }
    });
    assert!(root(&h.dispatcher, Representation::Conditional).visible);
}

#[test]
fn test_zero_face_mesh_renders_nothing() {
    let mut h = harness(
        RendererConfig::default(),
        Box::new(InstantLoader {
            meshes: empty_mesh(),
        }),
    );
    h.dispatcher.init();
    h.dispatcher.pump();

    assert_eq!(h.dispatcher.scene().len(), 4);
    for r in [Representation::Model, Representation::Conditional] {
        root(&h.dispatcher, r).traverse(&mut |node| {
            if let Some(line) = node.as_line() {
                assert_eq!(line.geometry.segment_count(), 0);
            }
        });
    }
}

#[test]
fn test_guarded_events_without_model() {
    let mut h = harness(RendererConfig::default(), Box::new(DeferredLoader::default()));

    h.dispatcher.dispatch(Event::Render);
    h.dispatcher.dispatch(Event::PreProcessModels);
    assert!(h.dispatcher.scene().is_empty());
    assert_eq!(h.renderer.frame_count(), 0);

    // Toggles still update state and report it
    assert_eq!(h.dispatcher.dispatch(Event::ToggleLight).flag(), Some(true));
    assert!(h.dispatcher.scene().is_empty());
}

#[test]
fn test_add_primitive() {
    let mut h = harness(RendererConfig::default(), Box::new(DeferredLoader::default()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::AddPrimitive(PrimitiveKind::Torus));

    let original = root(&h.dispatcher, Representation::Original);
    assert_eq!(original.name, "torus");
    assert_eq!(original.transform.position, Vec3::ZERO);
    assert_eq!(h.dispatcher.scene().len(), 4);
    assert_eq!(h.renderer.frame_count(), 1);
}

#[test]
fn test_failed_load_keeps_previous_model() {
    let loader = DeferredLoader::default();
    let mut h = harness(RendererConfig::default(), Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::AddPrimitive(PrimitiveKind::Cone));
    let before: Vec<_> = h.dispatcher.scene().root_ids().to_vec();

    h.dispatcher.dispatch(Event::load_model("missing.obj"));
    loader.complete(0, Err(LoadError::Empty("missing.obj".into())));
    h.dispatcher.pump();

    assert_eq!(h.dispatcher.pending_loads(), 0);
    assert_eq!(root(&h.dispatcher, Representation::Original).name, "cone");
    assert_eq!(h.dispatcher.scene().root_ids(), before.as_slice());

    // An empty mesh list is treated the same way
    h.dispatcher.dispatch(Event::load_model("nothing.obj"));
    loader.complete(1, Ok(Vec::new()));
    h.dispatcher.pump();
    assert_eq!(root(&h.dispatcher, Representation::Original).name, "cone");
}

#[test]
fn test_overlapping_loads_last_processed_wins() {
    for first_to_finish in [0, 1] {
        let loader = DeferredLoader::default();
        let mut h = harness(RendererConfig::default(), Box::new(loader.clone()));
        h.dispatcher.dispatch(Event::SetUpWorld);
        h.dispatcher.dispatch(Event::load_model("models/cone.obj"));
        h.dispatcher.dispatch(Event::load_model("models/torus.obj"));
        assert_eq!(h.dispatcher.pending_loads(), 2);

        let results = [
            primitive_meshes(PrimitiveKind::Cone),
            primitive_meshes(PrimitiveKind::Torus),
        ];
        let second_to_finish = 1 - first_to_finish;

        loader.complete(first_to_finish, Ok(results[first_to_finish].clone()));
        h.dispatcher.pump();
        let earlier_roots: Vec<_> = h.dispatcher.scene().root_ids().to_vec();
        assert_eq!(earlier_roots.len(), 4);

        loader.complete(second_to_finish, Ok(results[second_to_finish].clone()));
        h.dispatcher.pump();

        let expected = ["cone", "torus"][second_to_finish];
        assert_eq!(root(&h.dispatcher, Representation::Original).name, expected);
        assert_eq!(h.dispatcher.scene().len(), 4);
        for id in earlier_roots {
            assert!(!h.dispatcher.scene().contains(id));
        }
        assert_eq!(h.dispatcher.pending_loads(), 0);
    }
}

#[test]
fn test_stale_loads_discarded_when_configured() {
    let mut config = RendererConfig::default();
    config.models.stale_loads = StaleLoadPolicy::Discard;

    let loader = DeferredLoader::default();
    let mut h = harness(config, Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::load_model("models/cone.obj"));
    h.dispatcher.dispatch(Event::load_model("models/torus.obj"));

    loader.complete(1, Ok(primitive_meshes(PrimitiveKind::Torus)));
    loader.complete(0, Ok(primitive_meshes(PrimitiveKind::Cone)));
    assert_eq!(h.dispatcher.pump(), 2);

    assert_eq!(root(&h.dispatcher, Representation::Original).name, "torus");
    assert_eq!(h.dispatcher.pending_loads(), 0);
}

#[test]
fn test_add_primitive_supersedes_pending_load() {
    let mut config = RendererConfig::default();
    config.models.stale_loads = StaleLoadPolicy::Discard;

    let loader = DeferredLoader::default();
    let mut h = harness(config, Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::load_model("models/cone.obj"));
    h.dispatcher.dispatch(Event::AddPrimitive(PrimitiveKind::Octahedron));

    loader.complete(0, Ok(primitive_meshes(PrimitiveKind::Cone)));
    h.dispatcher.pump();
    assert_eq!(root(&h.dispatcher, Representation::Original).name, "octahedron");
}

#[test]
fn test_cycle_catalogue() {
    let mut config = RendererConfig::default();
    config.models.catalogue = vec!["a.obj".into(), "b.obj".into(), "c.obj".into()];

    let loader = DeferredLoader::default();
    let mut h = harness(config, Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::NextModel);
    h.dispatcher.dispatch(Event::NextModel);
    h.dispatcher.dispatch(Event::PreviousModel);
    h.dispatcher.dispatch(Event::PreviousModel);
    h.dispatcher.dispatch(Event::PreviousModel);

    let paths: Vec<_> = loader
        .requests()
        .into_iter()
        .map(|r| r.path.to_string_lossy().into_owned())
        .collect();
    assert_eq!(paths, vec!["a.obj", "b.obj", "a.obj", "c.obj", "b.obj"]);

    let ids: Vec<_> = loader.requests().into_iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_cycle_empty_catalogue_is_noop() {
    let loader = DeferredLoader::default();
    let mut h = harness(RendererConfig::default(), Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::NextModel);
    h.dispatcher.dispatch(Event::PreviousModel);
    assert!(loader.requests().is_empty());
    assert_eq!(h.dispatcher.pending_loads(), 0);
}

#[test]
fn test_view_change_re_renders() {
    let mut h = loaded(PrimitiveKind::Cylinder);
    let frames = h.renderer.frame_count();

    let notify = h.controls.notify.lock().clone().unwrap();
    let mut camera = *h.dispatcher.camera();
    camera.position = Vec3::new(0.0, 0.0, 10.0);
    assert!(notify.send(Event::ViewChanged(camera)));
    assert_eq!(h.dispatcher.pump(), 1);

    assert_eq!(h.renderer.frame_count(), frames + 1);
    assert_eq!(h.renderer.last().unwrap().camera.position, Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(h.dispatcher.camera().position, Vec3::new(0.0, 0.0, 10.0));
}

#[test]
fn test_pump_wait_for_threaded_completion() {
    let loader = DeferredLoader::default();
    let mut h = harness(RendererConfig::default(), Box::new(loader.clone()));
    h.dispatcher.dispatch(Event::SetUpWorld);
    h.dispatcher.dispatch(Event::load_model("models/cone.obj"));

    let worker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        loader.complete(0, Ok(primitive_meshes(PrimitiveKind::Cone)));
    });

    let processed = h.dispatcher.pump_wait(Duration::from_secs(5));
    worker.join().unwrap();

    assert_eq!(processed, 1);
    assert_eq!(h.dispatcher.pending_loads(), 0);
    assert_eq!(root(&h.dispatcher, Representation::Original).name, "cone");
}

#[test]
fn test_pump_wait_times_out() {
    let mut h = harness(RendererConfig::default(), Box::new(DeferredLoader::default()));
    h.dispatcher.dispatch(Event::load_model("never.obj"));

    let processed = h.dispatcher.pump_wait(Duration::from_millis(10));
    assert_eq!(processed, 0);
    assert_eq!(h.dispatcher.pending_loads(), 1);
}
