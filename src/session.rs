use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::game::{Game, TickOutcome};
use crate::input::DirectionLatch;
use crate::render::Renderer;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionEnd {
    /// The snake crashed and the flash sequence ran to completion.
    GameOver { length: usize },
    /// A quit request arrived before the session finished.
    Quit,
}

/// Tick driver. Owns the cadence and is the only writer of `game`.
///
/// Every `config.tick` the latched direction is sampled once and the game
/// advanced; committed states are rendered. On game over the frozen state is
/// flashed `config.flash_frames` times. A message on `quit` ends the session
/// at the next wait, without finishing the current sequence.
pub fn run<R: Renderer>(
    game: &mut Game,
    renderer: &mut R,
    latch: &DirectionLatch,
    quit: &Receiver<()>,
    config: &SessionConfig,
) -> Result<SessionEnd> {
    info!(tick_ms = config.tick.as_millis() as u64, "session started");
    renderer.render(&game.frame())?;

    let mut next_tick = Instant::now() + config.tick;
    loop {
        if wait_until(next_tick, quit) {
            info!(ticks = game.ticks, "session quit");
            return Ok(SessionEnd::Quit);
        }
        next_tick += config.tick;
        let now = Instant::now();
        if next_tick < now {
            debug!(behind_ms = (now - next_tick).as_millis() as u64, "tick overran");
            next_tick = now + config.tick;
        }

        match game.tick(latch.current())? {
            TickOutcome::Moved { .. } => renderer.render(&game.frame())?,
            TickOutcome::GameOver => break,
        }
    }

    for frame in game.flash_frames(config.flash_frames) {
        renderer.render(&frame)?;
        if wait_for(config.flash_delay, quit) {
            return Ok(SessionEnd::Quit);
        }
    }

    Ok(SessionEnd::GameOver {
        length: game.snake.len(),
    })
}

/// Sleeps until `deadline`; true if a quit arrived first.
fn wait_until(deadline: Instant, quit: &Receiver<()>) -> bool {
    wait_for(deadline.saturating_duration_since(Instant::now()), quit)
}

fn wait_for(timeout: Duration, quit: &Receiver<()>) -> bool {
    match quit.recv_timeout(timeout) {
        Ok(()) => true,
        Err(RecvTimeoutError::Timeout) => false,
        Err(RecvTimeoutError::Disconnected) => {
            // Nobody left to ask for a quit; keep the cadence anyway.
            thread::sleep(timeout);
            false
        }
    }
}
