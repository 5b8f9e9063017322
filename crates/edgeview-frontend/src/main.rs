//! edgeview headless host
//!
//! Runs the edge-rendering pipeline without a window: loads a model (or a
//! stock primitive), replays a script of display toggles and prints what
//! each rendered frame contained.

mod config;
mod headless;
mod script;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use edgeview_core::PrimitiveKind;
use edgeview_renderer::{Collaborators, Dispatcher, Event, ObjModelLoader, Representation};
use serde::Serialize;

use config::ConfigManager;
use headless::{FrameStats, HeadlessRenderer, HeadlessSurface, ScriptedControls};
use script::ScriptStep;

/// Surface size given as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Size {
    width: u32,
    height: u32,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: u32 = width.trim().parse().map_err(|e| format!("bad width: {e}"))?;
        let height: u32 = height.trim().parse().map_err(|e| format!("bad height: {e}"))?;
        if width == 0 || height == 0 {
            return Err("size must be non-zero".to_string());
        }
        Ok(Self { width, height })
    }
}

#[derive(Parser, Debug)]
#[command(name = "edgeview", version, about = "Headless edge-rendering pipeline driver")]
struct Cli {
    /// Model to load instead of the configured default
    model: Option<PathBuf>,
    /// Config file (defaults to the OS config directory)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show a stock primitive instead of loading a model
    #[arg(long)]
    primitive: Option<PrimitiveKind>,
    /// Comma-separated steps, e.g. "toggle-light,line-thickness=2.5"
    #[arg(long)]
    script: Option<String>,
    /// Surface size as WIDTHxHEIGHT
    #[arg(long)]
    size: Option<Size>,
    /// Device pixel ratio
    #[arg(long)]
    dpr: Option<f32>,
    /// Write the effective config (file values plus overrides) and continue
    #[arg(long)]
    write_config: bool,
}

/// Printed to stdout when the run finishes
#[derive(Debug, Serialize)]
struct Report {
    model: Option<String>,
    opacity: f32,
    lit: bool,
    thickness: f32,
    use_thick_lines: bool,
    line_color: String,
    frames: Vec<FrameStats>,
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edgeview=debug,edgeview_renderer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting edgeview");

    let mut manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigManager::new(),
    };

    let overrides = manager.config_mut();
    if let Some(model) = cli.model {
        overrides.renderer.models.default_model = model;
    }
    if let Some(size) = cli.size {
        overrides.headless.width = size.width;
        overrides.headless.height = size.height;
    }
    if let Some(dpr) = cli.dpr {
        overrides.headless.device_pixel_ratio = dpr;
    }

    if cli.write_config {
        manager
            .write()
            .with_context(|| format!("failed to write {}", manager.config_file_path().display()))?;
    }
    let app = manager.config().clone();

    let steps = match cli.script.as_deref() {
        Some(script) => script::parse_script(script).context("invalid --script")?,
        None => Vec::new(),
    };
    let timeout = Duration::from_millis(app.headless.load_timeout_ms);

    let renderer = HeadlessRenderer::new();
    let frames = renderer.frames();
    let controls = ScriptedControls::new();

    let mut dispatcher = Dispatcher::new(
        app.renderer.clone(),
        Collaborators {
            loader: Box::new(ObjModelLoader::new()),
            surface: Box::new(HeadlessSurface::from(&app.headless)),
            renderer: Box::new(renderer),
            controls: Box::new(controls.clone()),
        },
    );

    match cli.primitive {
        Some(kind) => {
            dispatcher.dispatch(Event::SetUpWorld);
            dispatcher.dispatch(Event::AddPrimitive(kind));
        }
        None => dispatcher.init(),
    }
    dispatcher.pump_wait(timeout);

    for step in steps {
        match step {
            ScriptStep::Dispatch(event) => {
                let name = event.name();
                let outcome = dispatcher.dispatch(event);
                tracing::info!("{} -> {:?}", name, outcome);
            }
            ScriptStep::Orbit(degrees) => {
                if !controls.orbit(degrees) {
                    tracing::warn!("orbit={} ignored", degrees);
                }
            }
            ScriptStep::Dolly(distance) => {
                if !controls.dolly(distance) {
                    tracing::warn!("dolly={} ignored", distance);
                }
            }
        }
        dispatcher.pump_wait(timeout);
    }

    if dispatcher.pending_loads() > 0 {
        tracing::warn!("{} model load(s) never completed", dispatcher.pending_loads());
    }

    let state = *dispatcher.state();
    let report = Report {
        model: dispatcher
            .representations()
            .get(dispatcher.scene(), Representation::Original)
            .map(|node| node.name.clone()),
        opacity: state.opacity,
        lit: state.lit,
        thickness: state.thickness,
        use_thick_lines: state.use_thick_lines,
        line_color: state.line_color.to_string(),
        frames: frames.lock().clone(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
