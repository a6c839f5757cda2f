//! The player's chef cannon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::projectile::{Projectile, ProjectileKind};
use super::state::Playfield;
use crate::consts::{FRAME_SCALE, SHOT_COOLDOWN_MS};
use crate::tuning::Tuning;

/// Player entity with movement intents and its live projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per 60 Hz frame
    pub speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    /// Timestamp (ms) of the last accepted shot
    pub last_shot_ms: Option<f64>,
    pub next_kind: ProjectileKind,
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    projectile_size: Vec2,
    projectile_speed: f32,
    /// Right bound used for clamping
    field_width: f32,
    bottom_margin: f32,
}

impl Player {
    /// Spawn centered at the bottom of the playfield
    pub fn new(field: &Playfield, tuning: &Tuning) -> Self {
        let size = Vec2::new(
            field.width * tuning.player_width_frac,
            field.height * tuning.player_height_frac,
        );
        let pos = Vec2::new(
            field.width / 2.0 - size.x / 2.0,
            field.height - size.y - tuning.player_bottom_margin,
        );
        Self {
            pos,
            size,
            speed: tuning.player_speed,
            moving_left: false,
            moving_right: false,
            last_shot_ms: None,
            next_kind: ProjectileKind::Primary,
            projectiles: Vec::new(),
            projectile_size: Vec2::new(tuning.projectile_width, tuning.projectile_height),
            projectile_speed: tuning.projectile_speed,
            field_width: field.width,
            bottom_margin: tuning.player_bottom_margin,
        }
    }

    /// Largest x the player may occupy
    #[inline]
    fn max_x(&self) -> f32 {
        (self.field_width - self.size.x).max(0.0)
    }

    /// Apply movement intents, then move projectiles and drop those off the top.
    ///
    /// Left is applied before right, each clamped independently. Holding both
    /// keys cancels out, except when the left move was clamped at 0: then the
    /// right move wins and the player drifts right.
    pub fn advance(&mut self, dt: f32) {
        let step = self.speed * dt * FRAME_SCALE;
        if self.moving_left {
            self.pos.x = (self.pos.x - step).max(0.0);
        }
        if self.moving_right {
            self.pos.x = (self.pos.x + step).min(self.max_x());
        }

        self.projectiles.retain_mut(|p| {
            p.advance(dt);
            !p.is_off_screen()
        });
    }

    /// Fire a projectile unless still cooling down. Returns whether a shot was fired.
    pub fn shoot(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_shot_ms {
            if now_ms - last < SHOT_COOLDOWN_MS {
                return false;
            }
        }

        let pos = Vec2::new(
            self.pos.x + self.size.x / 2.0 - self.projectile_size.x / 2.0,
            self.pos.y,
        );
        self.projectiles.push(Projectile::new(
            pos,
            self.projectile_size,
            self.projectile_speed,
            self.next_kind,
        ));
        self.next_kind = self.next_kind.alternate();
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Recenter horizontally and clear projectiles (level start / life lost)
    pub fn reset_position(&mut self) {
        self.pos.x = self.field_width / 2.0 - self.size.x / 2.0;
        self.projectiles.clear();
    }

    /// Keep the player on the bottom edge of a resized playfield
    pub fn resize(&mut self, field: &Playfield) {
        self.field_width = field.width;
        self.pos.y = field.height - self.size.y - self.bottom_margin;
        self.pos.x = self.pos.x.min(self.max_x());
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}
