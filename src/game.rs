use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{SessionConfig, FRESH_FOOD_FRAMES};
use crate::error::Result;
use crate::food::place_food;
use crate::geometry::{Board, Cell, Direction};
use crate::init::init_snake;
use crate::movement::step_snake;
use crate::snake::Snake;
use crate::validity::is_valid;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Snake,
    Food,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    Moved { ate_food: bool },
    GameOver,
}

/// What a renderer needs to draw one frame. Glyphs and colours are the
/// renderer's business; the flags only say which mode the frame is in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Frame<'a> {
    pub snake: &'a Snake,
    pub food: Cell,
    pub board: Board,
    pub highlight_food: bool,
    pub alert: bool,
}

impl Frame<'_> {
    /// Row-major board contents, food drawn over the snake.
    pub fn grid(&self) -> Vec<Vec<CellState>> {
        let rows = self.board.height.max(0) as usize;
        let cols = self.board.width.max(0) as usize;
        let mut grid = vec![vec![CellState::Empty; cols]; rows];

        for &cell in self.snake.cells().iter().chain(std::iter::once(&self.food)) {
            if self.board.contains(cell) {
                grid[cell.row as usize][cell.col as usize] = if cell == self.food {
                    CellState::Food
                } else {
                    CellState::Snake
                };
            }
        }

        grid
    }
}

// ============================================================================
// Game
// ============================================================================

pub struct Game {
    pub board: Board,
    pub snake: Snake,
    pub food: Cell,
    pub direction: Direction,
    pub phase: Phase,
    pub ticks: u64,
    fresh_food_frames: u32,
    fresh_food_left: u32,
    highlight_food: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: &SessionConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SessionConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let (snake, direction) = init_snake(config.board, config.initial_length, &mut rng)?;
        let food = place_food(&snake, config.board, &mut rng)?;
        info!(
            height = config.board.height,
            width = config.board.width,
            length = snake.len(),
            ?direction,
            "new game"
        );

        let mut game = Self::with_state(config.board, snake, food, direction, rng);
        game.fresh_food_frames = config.fresh_food_frames;
        Ok(game)
    }

    /// Starts from an explicit position instead of a generated one.
    pub fn with_state(board: Board, snake: Snake, food: Cell, direction: Direction, rng: StdRng) -> Self {
        Self {
            board,
            snake,
            food,
            direction,
            phase: Phase::Running,
            ticks: 0,
            fresh_food_frames: FRESH_FOOD_FRAMES,
            fresh_food_left: 0,
            highlight_food: false,
            rng,
        }
    }

    /// Advances one tick towards `requested`.
    ///
    /// An invalid candidate ends the game and is discarded: the last valid
    /// snake and the food it was chasing stay in place for the game-over
    /// display. Ticking a finished game does nothing.
    pub fn tick(&mut self, requested: Direction) -> Result<TickOutcome> {
        if self.phase == Phase::GameOver {
            return Ok(TickOutcome::GameOver);
        }

        let (advanced, food) = step_snake(requested, &self.snake, self.food, self.board, &mut self.rng)?;
        self.ticks += 1;

        if !is_valid(&advanced.snake, self.board) {
            self.phase = Phase::GameOver;
            info!(
                ticks = self.ticks,
                length = self.snake.len(),
                head = ?advanced.snake.head(),
                "game over"
            );
            return Ok(TickOutcome::GameOver);
        }

        if advanced.ate_food {
            debug!(length = advanced.snake.len(), ?food, "food eaten");
            self.fresh_food_left = self.fresh_food_frames;
        }
        self.highlight_food = self.fresh_food_left > 0;
        self.fresh_food_left = self.fresh_food_left.saturating_sub(1);

        self.snake = advanced.snake;
        self.food = food;
        self.direction = advanced.direction;

        Ok(TickOutcome::Moved {
            ate_food: advanced.ate_food,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The committed state as of the last tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            snake: &self.snake,
            food: self.food,
            board: self.board,
            highlight_food: self.highlight_food,
            alert: false,
        }
    }

    /// The game-over flash: `count` frames of the frozen state, alternating
    /// between alert and normal, starting with alert.
    pub fn flash_frames(&self, count: usize) -> impl Iterator<Item = Frame<'_>> + '_ {
        (0..count).map(move |i| Frame {
            alert: i % 2 == 0,
            highlight_food: false,
            ..self.frame()
        })
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_cells(cells.iter().copied()).expect("test snake must not be empty")
    }

    pub fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    pub fn game_at(board: Board, cells: &[(i32, i32)], food: (i32, i32), direction: Direction) -> Game {
        Game::with_state(board, snake(cells), food.into(), direction, seeded_rng(7))
    }
}
