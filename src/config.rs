use std::time::Duration;

use crate::error::ConfigError;
use crate::geometry::Board;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_INITIAL_LENGTH: usize = 20;
pub const MIN_BOARD_SIDE: i32 = 8;
/// Keeps the bordered board within a `u16` terminal area and the grid small.
pub const MAX_BOARD_SIDE: i32 = 1024;

// Timing (in milliseconds)
pub const DEFAULT_TICK_MS: u64 = 50;
pub const FLASH_DELAY_MS: u64 = 400;

pub const FLASH_FRAMES: usize = 5;
pub const FRESH_FOOD_FRAMES: u32 = 4;

// Terminal rows/columns eaten by the border and the trailing prompt line.
const TERMINAL_ROW_MARGIN: u16 = 3;
const TERMINAL_COL_MARGIN: u16 = 3;
const CELL_COLUMNS: u16 = 2;

/// Everything fixed at session start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub board: Board,
    pub initial_length: usize,
    pub tick: Duration,
    pub flash_frames: usize,
    pub flash_delay: Duration,
    pub fresh_food_frames: u32,
}

impl SessionConfig {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            initial_length: DEFAULT_INITIAL_LENGTH,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            flash_frames: FLASH_FRAMES,
            flash_delay: Duration::from_millis(FLASH_DELAY_MS),
            fresh_food_frames: FRESH_FOOD_FRAMES,
        }
    }

    /// Sizes the board to fill a terminal of `cols` x `rows` characters.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        let height = rows.saturating_sub(TERMINAL_ROW_MARGIN);
        let width = cols.saturating_sub(TERMINAL_COL_MARGIN) / CELL_COLUMNS;
        Self::new(Board::new(height as i32, width as i32))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Board { height, width } = self.board;
        if height < MIN_BOARD_SIDE || width < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                height,
                width,
                min: MIN_BOARD_SIDE,
            });
        }
        if height > MAX_BOARD_SIDE || width > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                height,
                width,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.initial_length > self.board.area() {
            return Err(ConfigError::LengthExceedsBoard {
                length: self.initial_length,
                area: self.board.area(),
            });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }
}
