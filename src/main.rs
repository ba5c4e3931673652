use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::stderr;
use std::path::{Path, PathBuf};

use wormy::audio::{AudioSink, Muted, TerminalBell};
use wormy::game::GameConfig;
use wormy::modes::PlayMode;

#[derive(Parser)]
#[command(name = "wormy")]
#[command(version, about = "A Nibbles clone with rocks and a rising pace")]
struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The terminal UI owns stderr, so logs only go to a file when asked for
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialise logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    log::info!(
        "starting wormy on a {}x{} grid",
        config.grid_width,
        config.grid_height
    );

    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(stderr()))
    };

    let mut play_mode = PlayMode::new(config, audio)?;
    play_mode.run().await?;

    Ok(())
}
