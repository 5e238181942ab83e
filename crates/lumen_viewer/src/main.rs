use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{FrameBuffer, RenderSettings, Renderer, Scene};

mod cli;
mod config;
mod scenes;
mod script;

use cli::Args;
use config::ViewerConfig;
use script::frame_input;

/// Frame loop state
struct App {
    config: ViewerConfig,
    scene: Scene,
    spinning: Vec<usize>,
    renderer: Renderer,
    settings: RenderSettings,
    buffer: FrameBuffer,

    frame: u32,
    elapsed: f32,
}

impl App {
    fn new(config: ViewerConfig, scene: scenes::ReferenceScene) -> Self {
        let renderer = Renderer::new(config.threads());
        let buffer = FrameBuffer::new(config.width, config.height);
        Self {
            settings: config.render,
            renderer,
            buffer,
            scene: scene.scene,
            spinning: scene.spinning,
            config,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Apply this frame's input, settle the scene and render it.
    fn step(&mut self) {
        let dt = self.config.dt;
        let input = frame_input(&self.config.script, self.frame);

        if input.toggle_shadows {
            self.settings.toggle_shadows();
        }
        if input.cycle_lighting {
            self.settings.cycle_lighting_mode();
        }

        self.scene.camera_mut().update(&input.camera, dt);

        self.elapsed += dt;
        let angle = self.elapsed * self.config.mesh_spin;
        for &index in &self.spinning {
            if let Some(mesh) = self.scene.mesh_mut(index) {
                mesh.rotate_y(angle);
            }
        }

        // Mesh caches and camera matrix must be final before the parallel pass
        self.scene.update();

        let start = Instant::now();
        self.renderer.render(&self.scene, &self.settings, &mut self.buffer);
        let frame_time = start.elapsed();

        log::info!(
            "Frame {}: {:.2} ms ({:.1} fps) | {}",
            self.frame,
            frame_time.as_secs_f64() * 1000.0,
            1.0 / frame_time.as_secs_f64().max(1e-6),
            self.settings.status_line()
        );
        self.frame += 1;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen Viewer");

    let config = ViewerConfig::resolve(&args)?;
    log::info!(
        "Rendering {}x{} for {} frame(s), threads: {:?}",
        config.width,
        config.height,
        config.frames,
        config.threads()
    );

    let reference = scenes::build(args.scene, args.obj.as_deref(), &config);
    let mut app = App::new(config, reference);

    for _ in 0..app.config.frames.max(1) {
        app.step();
    }

    app.buffer
        .save(&args.output)
        .with_context(|| format!("Failed to save snapshot to {}", args.output.display()))?;

    Ok(())
}
