use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use snake_arena::app::App;
use snake_arena::assets;
use snake_arena::game::{GameConfig, GameEngine};
use snake_arena::score::HighScores;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Terminal snake against AI rival snakes")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: usize,

    /// Directory scanned for rival *_logo.png files
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// High-score file
    #[arg(long, default_value = "high_scores.json")]
    scores: PathBuf,

    /// Fix the RNG seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = GameConfig::new(cli.width, cli.height);
    let roster = assets::load_roster(&cli.assets);
    let scores = HighScores::load(&cli.scores);

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, roster, seed),
        None => GameEngine::new(config, roster),
    };

    let mut app = App::new(engine, scores);
    app.run().await?;

    Ok(())
}

fn init_tracing() {
    // The TUI owns stderr, so log output goes to stdout, filtered by RUST_LOG
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stdout)
        .try_init();
}
