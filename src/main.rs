//! dama draughts engine main entry point.

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dama::config::{Difficulty, GameConfig};
use dama::eval::Heuristic;
use dama::Side;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SideArg {
    Dark,
    Light,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Dark => Side::Dark,
            SideArg::Light => Side::Light,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    OnFire,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::OnFire => Difficulty::OnFire,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side with the first move
    #[arg(long, value_enum, default_value_t = SideArg::Light)]
    first: SideArg,

    /// Side played by the engine
    #[arg(long, value_enum, default_value_t = SideArg::Dark)]
    computer: SideArg,

    /// Allow quiet moves while a capture is available
    #[arg(long)]
    no_forced_captures: bool,

    /// Named search strength
    #[arg(long, value_enum, default_value_t = DifficultyArg::Hard)]
    difficulty: DifficultyArg,

    /// Explicit search depth (overrides --difficulty)
    #[arg(short, long)]
    depth: Option<u8>,

    /// Evaluation mode: 1 = difference, 2 = ratio
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    eval: u8,

    /// Depth of hint searches
    #[arg(long, default_value_t = 10)]
    hint_depth: u8,

    /// States kept for undo
    #[arg(long, default_value_t = 20)]
    undo_capacity: usize,

    /// Minimum delay before an engine move is reported, in milliseconds
    #[arg(long, default_value_t = 800)]
    min_pause_ms: u64,

    /// Seed for tie-breaks between equal moves
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> GameConfig {
        let config = GameConfig::new()
            .first_mover(self.first.into())
            .computer(self.computer.into())
            .forced_captures(!self.no_forced_captures)
            .difficulty(self.difficulty.into())
            .eval_mode(Heuristic::from_mode(self.eval).unwrap_or_default())
            .hint_depth(self.hint_depth)
            .undo_capacity(self.undo_capacity)
            .min_pause_ms(self.min_pause_ms)
            .seed(self.seed);
        match self.depth {
            Some(depth) => config.search_depth(depth),
            None => config,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Args::parse().into_config();

    if let Err(e) = dama::protocol::run_loop(config) {
        tracing::error!("protocol loop failed: {}", e);
        std::process::exit(1);
    }
}
