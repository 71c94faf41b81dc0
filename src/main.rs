use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use term_life::{
    application::{Config, DEFAULT_PRESET_DIR, DEFAULT_TICK_RATE, GameState, PresetStore, session},
    domain::{Engine, Rules, library},
    input::{self, InputDecoder},
    rendering::{TerminalCanvas, TerminalGuard},
    ui::{self, Theme},
};

/// Conway's Game of Life in the terminal
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Exact neighbor count that brings a dead cell to life
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=8))]
    birth: u8,

    /// Fewest neighbors an alive cell needs to survive
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=8))]
    under: u8,

    /// Most neighbors an alive cell can have and survive
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=8))]
    over: u8,

    /// Join opposite edges of the board
    #[arg(short, long)]
    wrap: bool,

    /// Directory holding one JSON file per preset
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PRESET_DIR)]
    presets: PathBuf,

    /// Generations per second while playing
    #[arg(
        long,
        value_name = "GEN/S",
        default_value_t = DEFAULT_TICK_RATE,
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    tick_rate: u32,

    /// Write the built-in patterns into the preset directory before loading
    #[arg(long)]
    seed_presets: bool,

    /// Write logs to this file; nothing is logged otherwise
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl CliArgs {
    fn config(&self) -> Config {
        Config {
            rules: Rules::new(self.birth, self.under, self.over),
            wrap: self.wrap,
            tick_rate: self.tick_rate,
            preset_dir: self.presets.clone(),
            theme: Theme::default(),
        }
    }
}

/// The terminal is taken over while running, so logs only go to a file
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let config = args.config();
    info!(rules = %config.rules.notation(), wrap = config.wrap, tick_rate = config.tick_rate, "starting");

    if args.seed_presets {
        let written = PresetStore::write_missing(&config.preset_dir, &library::all())
            .context("failed to seed the preset directory")?;
        info!(written, "built-in presets written");
    }

    // A broken catalog is fatal, and must be reported before raw mode
    let presets = PresetStore::fetch_presets(&config.preset_dir).with_context(|| {
        format!(
            "failed to load presets from {} (use --seed-presets to create it)",
            config.preset_dir.display()
        )
    })?;

    let (cols, rows) = terminal::size().context("failed to read the terminal size")?;
    let (width, height) = ui::board_size(cols, rows);
    let engine = Engine::new(width.max(1), height.max(1), config.rules, config.wrap)?;
    let state = GameState::new(engine, presets);

    let guard = TerminalGuard::enter().context("failed to prepare the terminal")?;
    let (tx, rx) = mpsc::unbounded_channel();
    let input = tokio::task::spawn_blocking(move || input::run_input_loop(InputDecoder::new(), tx));

    let mut canvas = TerminalCanvas::new(BufWriter::new(io::stdout()), config.theme);
    let finished = session::run(state, rx, &mut canvas, config.tick_interval()).await;

    // The receiver is gone, so the input loop stops at its next poll
    let input = input.await;
    drop(guard);

    let state = finished.context("rendering failed")?;
    input.context("input task panicked")?.context("reading terminal input failed")?;
    info!(generation = state.engine.generation(), "bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = CliArgs::try_parse_from(["term_life"]).unwrap();
        assert_eq!(args.config(), Config::default());
        assert!(!args.seed_presets);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_custom_rules() {
        let args =
            CliArgs::try_parse_from(["term_life", "-b", "2", "-u", "1", "-o", "5", "-w"]).unwrap();
        let config = args.config();
        assert_eq!(config.rules, Rules::new(2, 1, 5));
        assert!(config.wrap);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(CliArgs::try_parse_from(["term_life", "-b", "9"]).is_err());
        assert!(CliArgs::try_parse_from(["term_life", "--tick-rate", "0"]).is_err());
    }
}
