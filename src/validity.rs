use crate::geometry::Board;
use crate::snake::Snake;

/// A snake is valid when its head is on the board and overlaps no other segment.
///
/// Only the head is compared: the rest of the body came from earlier valid
/// states and is taken to be self-consistent.
pub fn is_valid(snake: &Snake, board: Board) -> bool {
    let head = snake.head();
    board.contains(head) && !snake.rest().contains(&head)
}
