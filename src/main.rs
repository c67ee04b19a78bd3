use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use std::{
    fs::File,
    io::stdout,
    panic,
    path::{Path, PathBuf},
    sync::{mpsc, Mutex},
    time::Duration,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

use snake::config::{SessionConfig, DEFAULT_INITIAL_LENGTH, DEFAULT_TICK_MS};
use snake::game::Game;
use snake::geometry::Board;
use snake::input::{DirectionLatch, Listener, TerminalEvents};
use snake::render::TerminalRenderer;
use snake::session::{self, SessionEnd};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal. Arrows or WASD to steer, q/Esc/Ctrl-C to quit")]
struct Cli {
    /// Initial snake length
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    length: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Board height in cells (defaults to the terminal height)
    #[arg(long)]
    height: Option<i32>,

    /// Board width in cells (defaults to the terminal width)
    #[arg(long)]
    width: Option<i32>,

    /// Write logs to this file; filter with RUST_LOG
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
        let mut config = SessionConfig::for_terminal(cols, rows);
        config.board = Board::new(
            self.height.unwrap_or(config.board.height),
            self.width.unwrap_or(config.board.width),
        );
        config.initial_length = self.length;
        config.tick = Duration::from_millis(self.tick_ms);
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ============================================================================
// Terminal Setup
// ============================================================================

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide).context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(stdout(), cursor::Show, LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));
}

// ============================================================================
// Main Loop
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = cli.session_config()?;
    let mut game = Game::new(&config).context("Failed to set up the game")?;

    install_panic_hook();
    let guard = TerminalGuard::enter()?;
    let mut renderer = TerminalRenderer::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")?;

    let latch = DirectionLatch::new(game.direction);
    let (quit_tx, quit_rx) = mpsc::channel();
    let listener = Listener::spawn(TerminalEvents, latch.clone(), quit_tx).context("Failed to start input listener")?;

    let outcome = session::run(&mut game, &mut renderer, &latch, &quit_rx, &config);
    let listener_result = listener.stop();
    drop(guard);

    let end = outcome.context("Session failed")?;
    listener_result.context("Input listener failed")?;

    if let SessionEnd::GameOver { .. } = end {
        println!("game over.");
    }

    Ok(())
}
