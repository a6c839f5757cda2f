//! Data-driven game balance
//!
//! Defaults reproduce the classic burger invaders feel. A JSON document can
//! override any subset of fields; missing fields keep their default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("`{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("swarm grid must have at least one row and one column")]
    EmptyGrid,
}

/// Balance and layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Player width as a fraction of playfield width
    pub player_width_frac: f32,
    /// Player height as a fraction of playfield height
    pub player_height_frac: f32,
    /// Gap between player bottom and playfield bottom
    pub player_bottom_margin: f32,
    /// Pixels per 60 Hz frame
    pub player_speed: f32,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    /// Pixels per 60 Hz frame
    pub projectile_speed: f32,

    // === Swarm ===
    pub rows: usize,
    pub columns: usize,
    /// Invader edge length as a fraction of playfield width (invaders are square)
    pub invader_size_frac: f32,
    pub invader_padding: f32,
    pub swarm_top_offset: f32,
    /// Horizontal speed at level 1, pixels per second
    pub swarm_base_speed: f32,
    /// Added horizontal speed per level above 1
    pub swarm_speed_per_level: f32,
    /// Descent applied when the swarm bounces off an edge
    pub swarm_step_down: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width_frac: 0.06,
            player_height_frac: 0.06,
            player_bottom_margin: 20.0,
            player_speed: 5.0,

            projectile_width: 4.0,
            projectile_height: 10.0,
            projectile_speed: 7.0,

            rows: 5,
            columns: 8,
            invader_size_frac: 0.05,
            invader_padding: 10.0,
            swarm_top_offset: 50.0,
            swarm_base_speed: 30.0,
            swarm_speed_per_level: 5.0,
            swarm_step_down: 20.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Json(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Tuning from an optional JSON document, falling back to the defaults
    /// when it is absent or rejected
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_width_frac", self.player_width_frac),
            ("player_height_frac", self.player_height_frac),
            ("player_speed", self.player_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("invader_size_frac", self.invader_size_frac),
            ("swarm_base_speed", self.swarm_base_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(TuningError::EmptyGrid);
        }
        Ok(())
    }
}
