use rand::Rng;

use crate::error::Result;
use crate::food::place_food;
use crate::geometry::{step, Board, Cell, Direction};
use crate::snake::Snake;

/// Outcome of moving the snake one cell, before any food is replaced.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Advance {
    pub snake: Snake,
    /// Direction actually travelled after the anti-reversal correction.
    pub direction: Direction,
    pub ate_food: bool,
}

/// Swaps a direct reversal for its opposite so the head never turns back into
/// the segment right behind it. Deeper segments are not considered.
pub fn resolve_direction(requested: Direction, snake: &Snake) -> Direction {
    match snake.second() {
        Some(second) if step(requested, snake.head()) == second => requested.opposite(),
        _ => requested,
    }
}

/// Moves the snake one cell towards `requested`.
///
/// The new head is prepended and the tail dropped, unless the head lands on
/// `food`, in which case the tail stays and the snake grows by one. No bounds
/// or self-collision checks happen here.
pub fn advance(requested: Direction, snake: &Snake, food: Cell) -> Advance {
    let direction = resolve_direction(requested, snake);
    let head = step(direction, snake.head());
    let ate_food = head == food;

    Advance {
        snake: snake.advanced(head, ate_food),
        direction,
        ate_food,
    }
}

/// Tick-level move: [`advance`] plus a fresh food cell when the old one was eaten.
pub fn step_snake<R: Rng>(
    requested: Direction,
    snake: &Snake,
    food: Cell,
    board: Board,
    rng: &mut R,
) -> Result<(Advance, Cell)> {
    let advanced = advance(requested, snake, food);
    let food = if advanced.ate_food {
        place_food(&advanced.snake, board, rng)?
    } else {
        food
    };
    Ok((advanced, food))
}
