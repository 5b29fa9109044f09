//! Shared translate/clamp/wrap logic used by every animate-capable entity.

use glam::Vec2;

use crate::arena::{Arena, Bounds, ScreenMode};
use crate::geometry::{resolve_move, Rect};

/// Keeps `rect` inside `bounds`: the top clamp reserves the HUD margin, the
/// bottom always clamps, and the sides either clamp or wrap to the opposite
/// edge depending on `mode`.
///
/// Wrapping triggers only once a rect has fully left a side edge, and shifts
/// it by the field span so repeated application is stable.
pub fn apply_bounds(rect: &mut Rect, bounds: &Bounds, mode: ScreenMode) {
    match mode {
        ScreenMode::Clamped => {
            rect.min.x = rect.min.x.clamp(bounds.left(), bounds.right() - rect.size.x);
        }
        ScreenMode::Wrapped => {
            let span = bounds.right() - bounds.left() + rect.size.x;
            if rect.min.x >= bounds.right() {
                rect.min.x -= span;
            } else if rect.max().x <= bounds.left() {
                rect.min.x += span;
            }
        }
    }
    rect.min.y = rect.min.y.clamp(bounds.top(), bounds.bottom() - rect.size.y);
}

/// Advances `rect` by `velocity` with the speculative-move-and-reject policy,
/// then applies the playfield bounds. Returns the delta actually applied.
///
/// A zero velocity is a no-op: neither the resolver nor the clamp runs.
pub fn move_entity(rect: &mut Rect, velocity: Vec2, arena: &Arena) -> Vec2 {
    if velocity == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let applied = resolve_move(rect, velocity, arena.blocking_rects());
    apply_bounds(rect, &arena.bounds, arena.screen_mode);
    applied
}
