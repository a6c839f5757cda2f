//! The invader swarm
//!
//! The swarm moves as one rigid formation: every invader shares the same
//! horizontal displacement. When the next step would carry the formation's
//! bounding box across either playfield edge, the swarm reverses, descends one
//! step, and skips horizontal motion for that frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::invader::{Invader, InvaderType};
use super::state::Playfield;
use crate::tuning::Tuning;

/// Grid geometry and speed parameters captured from tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Formation {
    rows: usize,
    columns: usize,
    /// Invader edge as a fraction of playfield width
    size_frac: f32,
    invader_size: Vec2,
    padding: f32,
    top_offset: f32,
    base_speed: f32,
    speed_per_level: f32,
}

impl Formation {
    fn size_for(&self, width: f32) -> Vec2 {
        Vec2::splat(width * self.size_frac)
    }

    fn speed_for(&self, level: u32) -> f32 {
        self.base_speed + level.saturating_sub(1) as f32 * self.speed_per_level
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swarm {
    pub invaders: Vec<Invader>,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Horizontal speed, pixels per second
    pub speed: f32,
    /// Descent per edge bounce
    pub step_down: f32,
    pub level: u32,
    /// Invaders destroyed since the last (re)initialization or level change
    pub destroyed: u32,
    field_width: f32,
    formation: Formation,
}

impl Swarm {
    /// Build a full grid for `level`
    pub fn new(field: &Playfield, tuning: &Tuning, level: u32) -> Self {
        let mut formation = Formation {
            rows: tuning.rows,
            columns: tuning.columns,
            size_frac: tuning.invader_size_frac,
            invader_size: Vec2::ZERO,
            padding: tuning.invader_padding,
            top_offset: tuning.swarm_top_offset,
            base_speed: tuning.swarm_base_speed,
            speed_per_level: tuning.swarm_speed_per_level,
        };
        formation.invader_size = formation.size_for(field.width);
        let mut swarm = Self {
            invaders: Vec::with_capacity(tuning.rows * tuning.columns),
            direction: 1.0,
            speed: formation.speed_for(level),
            step_down: tuning.swarm_step_down,
            level,
            destroyed: 0,
            field_width: field.width,
            formation,
        };
        swarm.initialize(level);
        swarm
    }

    /// Rebuild the grid, horizontally centered, and reset movement for `level`
    pub fn initialize(&mut self, level: u32) {
        let f = &self.formation;
        let cell = f.invader_size + Vec2::splat(f.padding);
        let grid_width = cell.x * f.columns as f32 - f.padding;
        let start_x = (self.field_width - grid_width) / 2.0;

        self.invaders.clear();
        for row in 0..f.rows {
            let kind = InvaderType::for_row(row);
            for col in 0..f.columns {
                let pos = Vec2::new(
                    start_x + col as f32 * cell.x,
                    f.top_offset + row as f32 * cell.y,
                );
                self.invaders.push(Invader::new(pos, f.invader_size, kind));
            }
        }

        self.direction = 1.0;
        self.destroyed = 0;
        self.set_level(level);
    }

    /// Update level-derived speed and reset the destroyed counter.
    ///
    /// Does not rebuild the grid; call `initialize` for that.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.speed = self.formation.speed_for(level);
        self.destroyed = 0;
    }

    /// Animate every invader, then move the formation (or bounce off an edge)
    pub fn advance(&mut self, dt: f32) {
        if self.invaders.is_empty() {
            return;
        }

        for invader in &mut self.invaders {
            invader.animate(dt);
        }

        let (leftmost, rightmost) = self.extents();
        let dx = self.direction * self.speed * dt;

        let hit_right = rightmost + dx >= self.field_width;
        let hit_left = leftmost + dx <= 0.0;

        if hit_right || hit_left {
            self.direction = -self.direction;
            for invader in &mut self.invaders {
                invader.pos.y += self.step_down;
            }
        } else {
            for invader in &mut self.invaders {
                invader.pos.x += dx;
            }
        }
    }

    /// Leftmost x and rightmost x + width over all invaders
    pub fn extents(&self) -> (f32, f32) {
        self.invaders.iter().fold(
            (self.field_width, 0.0f32),
            |(left, right), inv| (left.min(inv.pos.x), right.max(inv.pos.x + inv.size.x)),
        )
    }

    /// Remove the invader at `index`; out-of-range indices are ignored
    pub fn remove_at(&mut self, index: usize) -> Option<Invader> {
        if index >= self.invaders.len() {
            return None;
        }
        self.destroyed += 1;
        Some(self.invaders.remove(index))
    }

    /// True if any invader's bottom edge has reached `threshold_y`
    pub fn check_bottom_breach(&self, threshold_y: f32) -> bool {
        self.invaders
            .iter()
            .any(|inv| inv.pos.y + inv.size.y >= threshold_y)
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    /// Track a new playfield width. Live invaders keep their positions and
    /// size; grids built afterwards use the invader size for the new width.
    pub fn resize(&mut self, field: &Playfield) {
        self.field_width = field.width;
        self.formation.invader_size = self.formation.size_for(field.width);
    }
}
