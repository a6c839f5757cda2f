//! Player projectiles (ketchup and mustard shots)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::FRAME_SCALE;

/// Projectile flavor; the player alternates between the two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Ketchup
    Primary,
    /// Mustard
    Secondary,
}

impl ProjectileKind {
    /// The kind fired after this one
    pub fn alternate(self) -> Self {
        match self {
            ProjectileKind::Primary => ProjectileKind::Secondary,
            ProjectileKind::Secondary => ProjectileKind::Primary,
        }
    }
}

/// A projectile travelling straight up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per 60 Hz frame
    pub speed: f32,
    pub kind: ProjectileKind,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, size: Vec2, speed: f32, kind: ProjectileKind) -> Self {
        Self {
            pos,
            size,
            speed,
            kind,
            active: true,
        }
    }

    /// Move upward by `speed * dt * 60`
    pub fn advance(&mut self, dt: f32) {
        self.pos.y -= self.speed * dt * FRAME_SCALE;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// True once the projectile has reached the top of the playfield
    pub fn is_off_screen(&self) -> bool {
        self.pos.y <= 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(y: f32) -> Projectile {
        Projectile::new(Vec2::new(10.0, y), Vec2::new(4.0, 10.0), 7.0, ProjectileKind::Primary)
    }

    #[test]
    fn test_advance_moves_up_scaled_to_60hz() {
        let mut p = shot(100.0);
        p.advance(1.0 / 60.0);
        assert!((p.pos.y - 93.0).abs() < 1e-4);
        assert_eq!(p.pos.x, 10.0);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut p = shot(100.0);
        p.deactivate();
        p.deactivate();
        assert!(!p.active);
    }

    #[test]
    fn test_off_screen_at_top_edge() {
        assert!(shot(0.0).is_off_screen());
        assert!(shot(-3.0).is_off_screen());
        assert!(!shot(0.5).is_off_screen());
    }

    #[test]
    fn test_kind_alternates() {
        let k = ProjectileKind::Primary;
        assert_eq!(k.alternate(), ProjectileKind::Secondary);
        assert_eq!(k.alternate().alternate(), ProjectileKind::Primary);
    }
}
