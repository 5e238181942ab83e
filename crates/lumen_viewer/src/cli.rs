use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::LightingMode;

use crate::scenes::SceneKind;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Lighting modes as command line values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LightingArg {
    ObservedArea,
    Radiance,
    Brdf,
    Combined,
}

impl From<LightingArg> for LightingMode {
    fn from(arg: LightingArg) -> Self {
        match arg {
            LightingArg::ObservedArea => LightingMode::ObservedArea,
            LightingArg::Radiance => LightingMode::Radiance,
            LightingArg::Brdf => LightingMode::Brdf,
            LightingArg::Combined => LightingMode::Combined,
        }
    }
}

/// Command line arguments. Flags override the JSON config file.
#[derive(Debug, Parser)]
#[command(name = "lumen_viewer")]
#[command(about = "Whitted-style CPU ray tracer")]
pub struct Args {
    /// Reference scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneKind,

    /// OBJ file for the mesh scene (a built-in mesh is used otherwise)
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// JSON viewer config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of frames to run before the snapshot is written
    #[arg(long)]
    pub frames: Option<u32>,

    /// Worker threads (0 renders sequentially; default uses every core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Disable shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Initial lighting mode
    #[arg(long, value_enum)]
    pub lighting: Option<LightingArg>,

    /// Snapshot path; the format follows the extension
    #[arg(short, long, default_value = "lumen.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
