//! A single burger invader

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::ANIMATION_INTERVAL;

/// Burger variety; decides score value and how the burger is stacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvaderType {
    #[default]
    Regular,
    Cheese,
    Double,
}

/// One layer of a burger, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Part {
    Bun,
    Patty,
    Cheese,
}

impl InvaderType {
    /// Points awarded for destroying this burger
    pub fn score_value(self) -> u64 {
        match self {
            InvaderType::Regular => 10,
            InvaderType::Cheese => 20,
            InvaderType::Double => 30,
        }
    }

    /// Burger type for a grid row (row 0 is the top)
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => InvaderType::Double,
            1 => InvaderType::Cheese,
            _ => InvaderType::Regular,
        }
    }

    /// Layers to paint, top to bottom
    pub fn parts(self) -> &'static [Part] {
        const REGULAR: &[Part] = &[Part::Bun, Part::Patty, Part::Bun];
        const CHEESE: &[Part] = &[Part::Bun, Part::Cheese, Part::Patty, Part::Bun];
        const DOUBLE: &[Part] = &[Part::Bun, Part::Patty, Part::Cheese, Part::Patty, Part::Bun];
        match self {
            InvaderType::Regular => REGULAR,
            InvaderType::Cheese => CHEESE,
            InvaderType::Double => DOUBLE,
        }
    }
}

/// An invader in the swarm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: InvaderType,
    /// Mouth animation phase (0 = happy, 1 = surprised)
    pub frame: u8,
    anim_timer: f32,
}

impl Invader {
    pub fn new(pos: Vec2, size: Vec2, kind: InvaderType) -> Self {
        Self {
            pos,
            size,
            kind,
            frame: 0,
            anim_timer: 0.0,
        }
    }

    /// Advance the mouth animation; the timer restarts from zero on each flip
    pub fn animate(&mut self, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer >= ANIMATION_INTERVAL {
            self.frame = (self.frame + 1) % 2;
            self.anim_timer = 0.0;
        }
    }

    /// Vertical offsets (from the top of the invader) of each part, evenly spaced
    pub fn part_offsets(&self) -> impl Iterator<Item = (Part, f32)> + '_ {
        let parts = self.kind.parts();
        let spacing = self.size.y / (parts.len() + 1) as f32;
        parts
            .iter()
            .enumerate()
            .map(move |(i, part)| (*part, spacing * (i + 1) as f32))
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}
