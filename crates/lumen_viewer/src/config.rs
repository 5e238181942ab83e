//! Viewer configuration: defaults, JSON file, then command line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::{RenderSettings, Threads};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::script::ScriptStep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    /// Frames to run before the snapshot
    pub frames: u32,
    /// Fixed time step per frame in seconds
    pub dt: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub movement_speed: f32,
    pub rotation_speed: f32,
    /// Mesh spin in radians per second (mesh scene only)
    pub mesh_spin: f32,
    /// `None` uses every core, `Some(0)` renders sequentially
    pub threads: Option<usize>,
    pub render: RenderSettings,
    pub script: Vec<ScriptStep>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frames: 1,
            dt: 1.0 / 30.0,
            fov: 45.0,
            movement_speed: 20.0,
            rotation_speed: 2.0,
            mesh_spin: 1.0,
            threads: None,
            render: RenderSettings::default(),
            script: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        for step in &config.script {
            step.warn_unknown_keys();
        }
        Ok(config)
    }

    /// Defaults, overlaid with the config file (if any) and the flags.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_args(args);
        Ok(config)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(frames) = args.frames {
            self.frames = frames;
        }
        if args.threads.is_some() {
            self.threads = args.threads;
        }
        if args.no_shadows {
            self.render.shadows = false;
        }
        if let Some(lighting) = args.lighting {
            self.render.lighting_mode = lighting.into();
        }
    }

    pub fn threads(&self) -> Threads {
        match self.threads {
            None => Threads::Global,
            Some(0) => Threads::Sequential,
            Some(n) => Threads::Fixed(n),
        }
    }
}
