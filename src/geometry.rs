//! Axis-aligned rectangles and the speculative-move collision resolver.

use glam::Vec2;

/// An axis-aligned rectangle, the spatial unit for every entity and obstacle.
///
/// Positions are top-left corners in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Repositions the rect so its center lands on `center`.
    pub fn with_center(&self, center: Vec2) -> Rect {
        Rect {
            min: center - self.size / 2.0,
            size: self.size,
        }
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            min: self.min + delta,
            size: self.size,
        }
    }

    /// Standard AABB overlap test. Touching edges do not count as overlapping.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max().x
            && other.min.x < self.max().x
            && self.min.y < other.max().y
            && other.min.y < self.max().y
    }
}

/// Applies `delta` to `rect` speculatively, reverting in full if the moved
/// rect intersects any obstacle. Returns the delta that was actually applied.
///
/// There is no sliding or partial penetration correction: the move either
/// lands whole or not at all.
pub fn resolve_move(rect: &mut Rect, delta: Vec2, obstacles: impl IntoIterator<Item = Rect>) -> Vec2 {
    if delta == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let moved = rect.translated(delta);
    for obstacle in obstacles {
        if moved.intersects(&obstacle) {
            return Vec2::ZERO;
        }
    }

    *rect = moved;
    delta
}
