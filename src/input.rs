use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::geometry::Direction;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ============================================================================
// Key Mapping
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Steer(Direction),
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Steer(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

// ============================================================================
// Direction Latch
// ============================================================================

/// Single-slot holder for the most recently requested direction.
///
/// The input thread publishes, the tick driver samples once per tick. Only
/// the newest value matters, so there is no queue: each side is one atomic
/// store or load.
#[derive(Clone, Debug)]
pub struct DirectionLatch {
    slot: Arc<AtomicU8>,
}

impl DirectionLatch {
    pub fn new(initial: Direction) -> Self {
        Self {
            slot: Arc::new(AtomicU8::new(encode(initial))),
        }
    }

    pub fn publish(&self, direction: Direction) {
        self.slot.store(encode(direction), Ordering::Release);
    }

    pub fn current(&self) -> Direction {
        decode(self.slot.load(Ordering::Acquire))
    }
}

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

fn decode(raw: u8) -> Direction {
    match raw {
        0 => Direction::Up,
        1 => Direction::Down,
        2 => Direction::Left,
        _ => Direction::Right,
    }
}

// ============================================================================
// Listener
// ============================================================================

/// Where the listener reads terminal events from.
pub trait EventSource {
    /// Waits up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the real terminal through crossterm.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Background thread feeding key presses into a [`DirectionLatch`].
pub struct Listener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl Listener {
    /// Spawns the listener. Quit keys send on `quit`; so does a failing
    /// event source, after which the thread exits with the error.
    pub fn spawn<S>(mut source: S, latch: DirectionLatch, quit: Sender<()>) -> io::Result<Self>
    where
        S: EventSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new().name("input".into()).spawn(move || {
            debug!("input listener started");
            let result = listen(&mut source, &latch, &thread_stop);
            if let Err(err) = &result {
                warn!(%err, "input listener failed");
            }
            if thread_stop.load(Ordering::Acquire) {
                debug!("input listener stopped");
            } else {
                // Quit key or a dead event source; either way the session ends.
                let _ = quit.send(());
            }
            result
        })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the thread and reports how it ended.
    pub fn stop(mut self) -> io::Result<()> {
        self.stop.store(true, Ordering::Release);
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(io::Error::new(io::ErrorKind::Other, "input listener panicked")),
            None => Ok(()),
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// Returns `Ok` on a quit key or when asked to stop.
fn listen<S: EventSource>(source: &mut S, latch: &DirectionLatch, stop: &AtomicBool) -> io::Result<()> {
    while !stop.load(Ordering::Acquire) {
        let Some(Event::Key(key)) = source.next_event(POLL_INTERVAL)? else {
            continue;
        };
        match command_for(key) {
            Some(Command::Steer(direction)) => latch.publish(direction),
            Some(Command::Quit) => {
                debug!("quit requested");
                return Ok(());
            }
            None => {}
        }
    }
    Ok(())
}
