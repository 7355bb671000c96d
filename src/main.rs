//! Gnome Smash entry point
//!
//! Native headless demo: the autopilot plays a seeded run through the full render path
//! and the run summary is printed as JSON.
//!
//! Usage: `gnome-smash [SEED] [MAX_FRAMES] [--tuning FILE] [--vocab FILE]`

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use gnome_smash::render::SceneRenderer;
use gnome_smash::sim::autopilot_input;
use gnome_smash::{Game, RunSummary, Tuning, VocabPool};

const DEFAULT_SEED: u64 = 12345;
/// Ten minutes at 60 fps
const DEFAULT_MAX_FRAMES: u64 = 36_000;

/// Headless autopilot run of Gnome Smash
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the run's random source
    #[arg(default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Stop after this many frames if the run is still going
    #[arg(
        default_value_t = DEFAULT_MAX_FRAMES,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_frames: u64,
    /// Balance overrides as JSON
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Vocabulary pool as a JSON array of items
    #[arg(long, value_name = "FILE")]
    vocab: Option<PathBuf>,
}

fn run(args: Args) -> Result<RunSummary, Box<dyn Error>> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };
    let pool = match &args.vocab {
        Some(path) => VocabPool::from_json(&std::fs::read_to_string(path)?)?,
        None => VocabPool::builtin(),
    };
    log::info!(
        "Seed {}, {} words, layout {}",
        args.seed,
        pool.len(),
        tuning.layout.as_str()
    );

    let mut game = Game::new(pool, tuning, args.seed)?;
    game.on_run_end(|summary| {
        log::info!("Run over: {} points on sector {}", summary.score, summary.level);
    });
    let mut scene = SceneRenderer::new(args.seed);

    for frame in 0..args.max_frames {
        let input = autopilot_input(game.world());
        game.step(&input, &mut scene);
        if !game.is_running() {
            break;
        }
        if frame % 600 == 0 {
            let world = game.world();
            log::debug!(
                "frame {}: sector {} score {} lives {} | {}",
                frame,
                world.level,
                world.score,
                world.lives,
                world.log
            );
        }
    }

    let summary = game.summary().cloned().unwrap_or_else(|| {
        let world = game.world();
        log::info!("Frame budget spent with the run still going");
        RunSummary {
            score: world.score,
            level: world.level,
            remark: gnome_smash::sim::closing_remark(world.score).to_string(),
        }
    });
    log::info!("{} frames presented", scene.frames_presented());
    Ok(summary)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Gnome Smash (native, headless) starting...");

    match run(args) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Could not encode summary: {}", err),
        },
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the wasm surface; this binary is native only
}
