use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::renderer::Playback;

/// How the 3D view is produced each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Full traversal straight to the framebuffer.
    #[default]
    Direct,
    /// Replay a recorded traversal a few strips per frame.
    Slomo,
}

#[derive(Parser, Clone, Debug)]
#[command(about = "Sector/portal 2.5D renderer", version)]
pub struct Config {
    /// Map file to load
    #[arg(default_value = "assets/demo.map")]
    pub map: PathBuf,

    /// Rendering mode
    #[arg(long, value_enum, default_value_t = RenderMode::Direct)]
    pub mode: RenderMode,

    /// Window width in pixels
    #[arg(long, default_value_t = 608)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: usize,

    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// Records replayed per frame in slomo mode
    #[arg(
        long,
        default_value_t = Playback::DEFAULT_SPEED,
        value_parser = clap::value_parser!(u32).range(1..=20)
    )]
    pub playback_speed: u32,

    /// Start with the map overlay visible
    #[arg(long)]
    pub show_map: bool,

    /// Log the parsed map after loading
    #[arg(long)]
    pub dump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: PathBuf::from("assets/demo.map"),
            mode: RenderMode::Direct,
            width: 608,
            height: 480,
            fps: 60,
            playback_speed: Playback::DEFAULT_SPEED,
            show_map: false,
            dump: false,
        }
    }
}
