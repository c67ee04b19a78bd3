// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// The 180° rotation of this direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Rectangular board bounds, fixed for a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    pub height: i32,
    pub width: i32,
}

impl Board {
    pub const fn new(height: i32, width: i32) -> Self {
        Self { height, width }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.height && cell.col >= 0 && cell.col < self.width
    }

    pub fn area(&self) -> usize {
        self.height.max(0) as usize * self.width.max(0) as usize
    }
}

// ============================================================================
// Stepping
// ============================================================================

/// The cell adjacent to `cell` in `direction`. Bounds are not checked.
pub fn step(direction: Direction, cell: Cell) -> Cell {
    let (dr, dc) = direction.delta();
    Cell {
        row: cell.row + dr,
        col: cell.col + dc,
    }
}
