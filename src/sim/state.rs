//! Game state and core simulation types
//!
//! Everything the render layer reads each frame lives here.

use serde::{Deserialize, Serialize};

use super::invader::InvaderType;
use super::phase::PhaseMachine;
use super::player::Player;
use super::swarm::Swarm;
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, STARTING_LIVES};
use crate::tuning::Tuning;

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    InvaderDestroyed { kind: InvaderType, points: u64 },
    /// Swarm reached the player line but lives remain
    LifeLost { lives_left: u32 },
    /// Swarm wiped out; `level` is the new level
    LevelCleared { level: u32 },
    /// Last life lost
    GameOver { score: u64 },
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Playfield,
    pub tuning: Tuning,
    pub phase: PhaseMachine,
    pub player: Player,
    pub swarm: Swarm,
    pub score: u64,
    pub high_score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Set when the finished run beat the previous high score
    pub new_high_score: bool,
}

impl GameState {
    /// Fresh state sitting at the menu
    pub fn new(field: Playfield, tuning: Tuning) -> Self {
        let player = Player::new(&field, &tuning);
        let swarm = Swarm::new(&field, &tuning, 1);
        Self {
            field,
            tuning,
            phase: PhaseMachine::new(),
            player,
            swarm,
            score: 0,
            high_score: 0,
            level: 1,
            lives: STARTING_LIVES,
            new_high_score: false,
        }
    }

    /// Reset score/level/lives and rebuild all entities for a new run
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.new_high_score = false;
        self.player = Player::new(&self.field, &self.tuning);
        self.swarm = Swarm::new(&self.field, &self.tuning, self.level);
    }

    /// Rebuild the swarm at the current level and recenter the player.
    /// Score, level and lives are preserved.
    pub fn soft_reset(&mut self) {
        self.swarm.initialize(self.level);
        self.player.reset_position();
    }

    /// Advance to the next level with a fresh, faster swarm
    pub fn next_level(&mut self) {
        self.level += 1;
        self.swarm.initialize(self.level);
        self.player.reset_position();
    }

    /// Record the final score against the high score. Returns true if it was beaten.
    pub fn settle_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            return true;
        }
        false
    }

    /// Apply new playfield dimensions to all entities
    pub fn resize(&mut self, field: Playfield) {
        self.field = field;
        self.player.resize(&field);
        self.swarm.resize(&field);
    }
}
