use std::io;

use thiserror::Error;

/// Session parameters that cannot produce a playable game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board {height}x{width} is smaller than the {min}x{min} minimum")]
    BoardTooSmall { height: i32, width: i32, min: i32 },
    #[error("board {height}x{width} is larger than the {max}x{max} maximum")]
    BoardTooLarge { height: i32, width: i32, max: i32 },
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("initial snake length {length} does not fit on a board of {area} cells")]
    LengthExceedsBoard { length: usize, area: usize },
    #[error("could not lay out a snake of length {length} in {attempts} attempts")]
    InitializerStalled { length: usize, attempts: usize },
    #[error("tick period must be non-zero")]
    ZeroTickPeriod,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("no free cell for food after {attempts} attempts")]
    FoodPlacementExhausted { attempts: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
