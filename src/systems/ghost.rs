//! Autonomous ghost behavior: randomized direction selection with an explicit
//! per-ghost cooldown, shared frightened mode, and directional animation.

use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::arena::Arena;
use crate::constants::{
    FrameRange, GHOST_FRAMES_DOWN, GHOST_FRAMES_FRIGHTENED, GHOST_FRAMES_LEFT, GHOST_FRAMES_RIGHT, GHOST_FRAMES_UP,
};
use crate::direction::{Direction, DIRECTIONS};
use crate::systems::components::{Body, GameStage, Ghost, GhostAi, GhostState, MoveSpeed, PowerMode, Renderable, SimRng, Tuning, Velocity};
use crate::systems::movement::move_entity;

/// The animation sub-range for a movement direction.
pub fn direction_frames(direction: Direction) -> FrameRange {
    match direction {
        Direction::Right => GHOST_FRAMES_RIGHT,
        Direction::Left => GHOST_FRAMES_LEFT,
        Direction::Down => GHOST_FRAMES_DOWN,
        Direction::Up => GHOST_FRAMES_UP,
    }
}

/// Rolls each ghost's direction change and keeps its state in sync with the
/// shared power mode flag.
///
/// Direction changes are governed by a tick cooldown and a change
/// probability, both from [`Tuning`]; nothing here reads the wall clock, so a
/// fixed RNG seed reproduces every walk exactly.
pub fn ghost_ai_system(
    stage: Res<GameStage>,
    power: Res<PowerMode>,
    tuning: Res<Tuning>,
    mut rng: ResMut<SimRng>,
    mut ghosts: Query<(&Ghost, &mut GhostState, &mut GhostAi, &mut Velocity, &MoveSpeed)>,
) {
    if !stage.is_playing() {
        return;
    }

    for (ghost, mut state, mut ai, mut velocity, speed) in ghosts.iter_mut() {
        if ai.cooldown > 0 {
            ai.cooldown -= 1;
        } else {
            ai.cooldown = tuning.ghost_cooldown;
            if rng.0.random_bool(tuning.ghost_change_probability) {
                let heading = Direction::from_velocity(velocity.0);
                let mut candidates: SmallVec<[Direction; 4]> = SmallVec::new();
                for direction in DIRECTIONS {
                    // Avoid immediate backtracking while on the move.
                    if heading.map(|h| direction != h.opposite()).unwrap_or(true) {
                        candidates.push(direction);
                    }
                }
                if let Some(direction) = candidates.choose(&mut rng.0) {
                    trace!(ghost = ?ghost, direction = ?direction, "Ghost changed direction");
                    velocity.0 = direction.as_vec2() * speed.0;
                }
            }
        }

        // Moving <-> Frightened follows the global flag, never a local timer.
        *state = if power.is_active() {
            GhostState::Frightened
        } else if velocity.0 != Vec2::ZERO {
            GhostState::Moving
        } else {
            GhostState::Idle
        };
    }
}

/// Moves each ghost with the same speculative-move-and-reject policy as the
/// player. A rejected move leaves the ghost stationary for this tick; it does
/// not force a new direction choice.
pub fn ghost_movement_system(
    stage: Res<GameStage>,
    arena: Res<Arena>,
    mut ghosts: Query<(&mut Body, &Velocity), With<Ghost>>,
) {
    if !stage.is_playing() {
        return;
    }
    for (mut body, velocity) in ghosts.iter_mut() {
        move_entity(&mut body.0, velocity.0, &arena);
    }
}

/// Advances each ghost's frame within the sub-range selected by its state:
/// the directional range while moving, the frightened range while power mode
/// is active. Idle ghosts hold their frame.
pub fn ghost_animation_system(stage: Res<GameStage>, mut ghosts: Query<(&GhostState, &Velocity, &mut Renderable), With<Ghost>>) {
    if !stage.is_playing() {
        return;
    }
    for (state, velocity, mut renderable) in ghosts.iter_mut() {
        let range = match state {
            GhostState::Frightened => GHOST_FRAMES_FRIGHTENED,
            GhostState::Moving => match Direction::from_velocity(velocity.0) {
                Some(direction) => direction_frames(direction),
                None => continue,
            },
            GhostState::Idle => continue,
        };
        renderable.frame = range.advance(renderable.frame);
        if let Some(direction) = Direction::from_velocity(velocity.0) {
            renderable.angle = direction.angle_degrees();
        }
    }
}
