pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod init;
pub mod input;
pub mod movement;
pub mod render;
pub mod session;
pub mod snake;
pub mod validity;

pub use error::{ConfigError, Error, Result};
