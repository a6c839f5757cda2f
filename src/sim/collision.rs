//! Axis-aligned collision detection
//!
//! Every entity in the game is a screen-space rectangle (top-left origin,
//! y growing downward), so a single strict AABB test covers all hit checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Right edge (x + width)
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge (y + height)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap test between two boxes.
///
/// Touching edges do not count as a hit: `a.right() == b.pos.x` is a miss.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_hit() {
        let a = Aabb::new(100.0, 100.0, 5.0, 10.0);
        let b = Aabb::new(100.0, 100.0, 40.0, 40.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_contained_box_hits() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 2.0, 2.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Right edge of a touches left edge of b
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        // Bottom edge of a touches top edge of c
        let c = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(50.0, 50.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.0f32..200.0,
            0.0f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_adjacent_boxes_never_overlap(a in arb_box(), w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let b = Aabb { pos: glam::Vec2::new(a.right(), a.pos.y), size: glam::Vec2::new(w, h) };
            prop_assert!(!overlaps(&a, &b));
        }
    }
}
