//! Command-line arguments
//!
//! `coin-flap game [options]` runs a headless session; `coin-flap help`
//! prints usage.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::consts::TARGET_FPS;
use crate::settings::QualityPreset;

/// Frames run when `--frames` is not given (one minute at 30 FPS)
pub const DEFAULT_FRAMES: u64 = 60 * TARGET_FPS as u64;

#[derive(Parser, Debug)]
#[command(name = "coin-flap")]
#[command(about = "Flap the wallet through the gates and stack up BTC")]
#[command(after_help = "Log output is controlled with RUST_LOG (e.g. RUST_LOG=debug).")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a headless session
    Game(GameArgs),
}

/// Options for the `game` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GameArgs {
    /// Asset directory (images, sounds, optional font); built-in dimensions when absent
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Settings JSON
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Game balance JSON
    #[arg(long)]
    pub tuning: Option<PathBuf>,

    /// Overrides the quality preset from the settings file
    #[arg(long, value_enum)]
    pub quality: Option<QualityPreset>,

    /// RNG seed (default: time based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames to run
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    pub frames: u64,

    /// Disable the autopilot
    #[arg(long)]
    pub manual: bool,

    /// Do not wait between frames
    #[arg(long)]
    pub unpaced: bool,

    /// Print a JSON run report on exit
    #[arg(long)]
    pub report: bool,
}

impl Default for GameArgs {
    fn default() -> Self {
        Self {
            assets: None,
            settings: None,
            tuning: None,
            quality: None,
            seed: None,
            frames: DEFAULT_FRAMES,
            manual: false,
            unpaced: false,
            report: false,
        }
    }
}
