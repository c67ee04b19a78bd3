use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Board, Cell};
use crate::snake::Snake;

/// Random draws allowed per board cell before placement gives up.
pub const FOOD_PLACEMENT_ATTEMPTS_PER_CELL: usize = 64;

/// Draws uniformly random cells until one is free of the snake.
///
/// The board is expected to stay mostly empty, so rejection sampling finishes
/// in a handful of draws. A full board exhausts the attempt cap and errors.
pub fn place_food<R: Rng>(snake: &Snake, board: Board, rng: &mut R) -> Result<Cell> {
    debug_assert!(snake.len() < board.area(), "no free cell left for food");

    let attempts = FOOD_PLACEMENT_ATTEMPTS_PER_CELL * board.area().max(1);
    for _ in 0..attempts {
        let cell = Cell {
            row: rng.gen_range(0..board.height),
            col: rng.gen_range(0..board.width),
        };
        if !snake.contains(cell) {
            debug!(row = cell.row, col = cell.col, "placed food");
            return Ok(cell);
        }
    }

    Err(Error::FoodPlacementExhausted { attempts })
}
