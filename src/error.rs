//! Centralized error types for the simulation core.
//!
//! This module defines all error types used throughout the crate,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors detected while validating arena and entity geometry at construction.
///
/// These are fatal: a malformed configuration must abort startup rather than
/// produce a sim that can wedge itself at runtime.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Rectangle at ({x}, {y}) has non-positive size {width}x{height}")]
    ZeroSizeRect { x: f32, y: f32, width: f32, height: f32 },

    #[error("Playfield bounds {width}x{height} leave no room below the HUD margin {hud_margin}")]
    InvalidBounds { width: f32, height: f32, hud_margin: f32 },

    #[error("Spawn rectangle for {name} intersects static geometry")]
    BlockedSpawn { name: &'static str },

    #[error("Spawn rectangle for {name} lies outside the playfield bounds")]
    SpawnOutOfBounds { name: &'static str },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
