use rand::Rng;
use tracing::debug;

use crate::config::MIN_BOARD_SIDE;
use crate::error::{ConfigError, Result};
use crate::geometry::{step, Board, Cell, Direction};
use crate::movement::advance;
use crate::snake::Snake;

/// Order in which the initial body turns away from an approaching wall.
pub const TURN_CYCLE: [Direction; 4] = [Direction::Right, Direction::Up, Direction::Left, Direction::Down];

/// Cells kept between the start cell and the top/left edges.
const START_MARGIN: i32 = 2;
/// Distance from the wall at which the growing body turns.
const WALL_CLEARANCE: i32 = 4;
/// Growth steps allowed per requested cell.
pub const INIT_ITERATION_FACTOR: usize = 4;
/// Fresh start cells tried before giving up.
pub const INIT_ATTEMPTS: usize = 32;

/// Builds a starting snake of exactly `length` cells and the direction it faces.
///
/// The body is grown from a random start cell in the upper-left quadrant by
/// feeding the movement engine a phantom food cell directly ahead of the
/// head, so every step is a real move and the result is always a chain of
/// adjacent cells. The body turns through [`TURN_CYCLE`] whenever the next
/// cell gets close to the wall it is heading for, and if the body boxes
/// itself in the layout starts over from another cell. The returned
/// direction always leads onto a free cell.
pub fn init_snake<R: Rng>(board: Board, length: usize, rng: &mut R) -> Result<(Snake, Direction)> {
    if board.height < MIN_BOARD_SIDE || board.width < MIN_BOARD_SIDE {
        return Err(ConfigError::BoardTooSmall {
            height: board.height,
            width: board.width,
            min: MIN_BOARD_SIDE,
        }
        .into());
    }
    if length == 0 {
        return Err(ConfigError::ZeroLength.into());
    }
    if length > board.area() {
        return Err(ConfigError::LengthExceedsBoard {
            length,
            area: board.area(),
        }
        .into());
    }

    let iterations = INIT_ITERATION_FACTOR * length;
    for attempt in 0..INIT_ATTEMPTS {
        if let Some((snake, direction)) = lay_out(board, length, iterations, rng) {
            debug!(head = ?snake.head(), ?direction, length, attempt, "laid out initial snake");
            return Ok((snake, direction));
        }
    }

    Err(ConfigError::InitializerStalled {
        length,
        attempts: INIT_ATTEMPTS,
    }
    .into())
}

/// One layout attempt from a fresh start cell. `None` when the body boxes
/// itself in or runs out of growth steps.
fn lay_out<R: Rng>(board: Board, length: usize, iterations: usize, rng: &mut R) -> Option<(Snake, Direction)> {
    let start = Cell {
        row: rng.gen_range(0..(board.height / 2).max(1)) + START_MARGIN,
        col: rng.gen_range(0..(board.width / 2).max(1)) + START_MARGIN,
    };
    let mut snake = Snake::new(start);
    let mut rotations = 0;

    for _ in 0..iterations {
        if snake.len() >= length {
            return facing(&snake, board, rotations).map(|direction| (snake, direction));
        }

        // Turn away from anything the next cell would hit.
        let mut turns = 0;
        while !is_open(&snake, board, step(TURN_CYCLE[rotations % 4], snake.head())) {
            if turns == 3 {
                return None;
            }
            rotations += 1;
            turns += 1;
        }

        let direction = TURN_CYCLE[rotations % 4];
        let phantom_food = step(direction, snake.head());
        snake = advance(direction, &snake, phantom_food).snake;

        let peek = step(direction, snake.head());
        if near_wall(direction, peek, board) {
            rotations += 1;
        }
    }

    if snake.len() < length {
        return None;
    }
    facing(&snake, board, rotations).map(|direction| (snake, direction))
}

/// First direction from `rotations` on whose next cell is free, so the first
/// real tick cannot end the game. `None` when the head is boxed in.
fn facing(snake: &Snake, board: Board, rotations: usize) -> Option<Direction> {
    (0..4)
        .map(|turn| TURN_CYCLE[(rotations + turn) % 4])
        .find(|&direction| is_open(snake, board, step(direction, snake.head())))
}

fn is_open(snake: &Snake, board: Board, cell: Cell) -> bool {
    board.contains(cell) && !snake.contains(cell)
}

fn near_wall(direction: Direction, peek: Cell, board: Board) -> bool {
    match direction {
        Direction::Down => peek.row > board.height - WALL_CLEARANCE,
        Direction::Up => peek.row < WALL_CLEARANCE,
        Direction::Right => peek.col > board.width - WALL_CLEARANCE,
        Direction::Left => peek.col < WALL_CLEARANCE,
    }
}
