//! Top-level game phase and its guarded transitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }

    /// Whether `self -> to` is an allowed edge
    pub fn can_transition_to(self, to: GamePhase) -> bool {
        use GamePhase::*;
        matches!(
            (self, to),
            (Menu, Playing)
                | (Playing, Paused)
                | (Paused, Playing)
                | (Playing, GameOver)
                | (GameOver, Playing)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GamePhase {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(GamePhase::Menu),
            "playing" => Ok(GamePhase::Playing),
            "paused" => Ok(GamePhase::Paused),
            "gameOver" | "game_over" => Ok(GamePhase::GameOver),
            other => Err(PhaseError::UnknownState(other.to_string())),
        }
    }
}

/// Rejected phase change. Never fatal: the phase is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("unknown game state `{0}`")]
    UnknownState(String),
    #[error("cannot go from {from} to {to}")]
    InvalidTransition { from: GamePhase, to: GamePhase },
}

/// Holds the current phase and enforces the transition table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: GamePhase,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is(&self, phase: GamePhase) -> bool {
        self.phase == phase
    }

    /// Move to `to` if the edge is allowed
    pub fn transition(&mut self, to: GamePhase) -> Result<(), PhaseError> {
        if !self.phase.can_transition_to(to) {
            return Err(PhaseError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }

    /// Transition by state name (e.g. from a UI layer)
    pub fn transition_named(&mut self, name: &str) -> Result<(), PhaseError> {
        let to = name.parse()?;
        self.transition(to)
    }

    /// Playing <-> Paused; a no-op in any other phase
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Return to the title screen (session teardown)
    pub fn reset(&mut self) {
        self.phase = GamePhase::Menu;
    }
}
