//! Coin Flap entry point
//!
//! Parses the command line and runs a headless session.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use coin_flap::assets::{AssetDir, AssetProvider, BuiltinAssets, Sprites};
use coin_flap::audio::AudioManager;
use coin_flap::cli::{Cli, Command, GameArgs};
use coin_flap::consts::{FRAME_DT, TARGET_FPS};
use coin_flap::platform::{FixedRate, FramePacer, HeadlessSurface, ScriptedInput, Unpaced};
use coin_flap::{Game, GameError, Settings, Tuning};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Game(args) => run_game(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("coin-flap: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_game(args: &GameArgs) -> Result<(), GameError> {
    log::info!("Coin Flap (headless) starting...");

    let sprites = match &args.assets {
        Some(dir) => load_sprites(&AssetDir::new(dir))?,
        None => load_sprites(&BuiltinAssets)?,
    };
    let mut settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(quality) = args.quality {
        settings.apply_preset(quality);
    }
    let tuning = match args.tuning.as_deref() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);

    let mut game = Game::new(seed, tuning, settings, sprites, AudioManager::default());
    game.autopilot = !args.manual;

    let mut input = ScriptedInput::new();
    let mut surface = HeadlessSurface::new();
    let mut pacer: Box<dyn FramePacer> = if args.unpaced {
        Box::new(Unpaced::new(FRAME_DT))
    } else {
        Box::new(FixedRate::new(TARGET_FPS))
    };

    let report = game.run(&mut input, &mut surface, pacer.as_mut(), Some(args.frames));
    log::debug!(
        "Presented {} frames, {} bytes of mesh data",
        surface.frames,
        surface.mesh_bytes
    );
    if args.report {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Failed to serialize run report: {}", e),
        }
    }
    Ok(())
}

fn load_sprites(provider: &dyn AssetProvider) -> Result<Sprites, GameError> {
    Ok(Sprites::load(provider)?)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
