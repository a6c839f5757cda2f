//! Burger Invaders - a burger-themed Space Invaders arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game loop)
//! - `session`: Orchestrator shell wiring input, persistence and the sim
//! - `highscore`: High score persistence (LocalStorage on web)
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod highscore;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscore::{HighScoreStore, MemoryStore};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Default playfield size (4:3 retro aspect)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player/projectile speeds are expressed per 60 Hz frame
    pub const FRAME_SCALE: f32 = 60.0;

    /// Minimum time between two player shots
    pub const SHOT_COOLDOWN_MS: f64 = 250.0;

    /// Invader mouth animation flips at this interval (seconds)
    pub const ANIMATION_INTERVAL: f32 = 0.05;

    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;

    /// Largest frame delta the driver should feed the sim (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
