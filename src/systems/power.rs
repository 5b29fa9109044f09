//! Power mode countdown shared by all ghosts and the player's collision
//! outcome table.

use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::debug;

use crate::constants::GHOST_FRAMES_RIGHT;
use crate::direction::Direction;
use crate::systems::components::{GameStage, Ghost, GhostState, PowerMode, Renderable, Velocity};
use crate::systems::ghost::direction_frames;

/// Decrements the power mode countdown. On the expiry tick every frightened
/// ghost returns to its normal state and directional animation range.
pub fn power_mode_system(
    stage: Res<GameStage>,
    mut power: ResMut<PowerMode>,
    mut ghosts: Query<(&mut GhostState, &Velocity, &mut Renderable), With<Ghost>>,
) {
    if !stage.is_playing() {
        return;
    }
    if !power.tick() {
        return;
    }

    debug!("Power mode expired");
    for (mut state, velocity, mut renderable) in ghosts.iter_mut() {
        if *state != GhostState::Frightened {
            continue;
        }
        match Direction::from_velocity(velocity.0) {
            Some(direction) => {
                *state = GhostState::Moving;
                renderable.frame = direction_frames(direction).start;
            }
            None => {
                *state = GhostState::Idle;
                renderable.frame = GHOST_FRAMES_RIGHT.start;
            }
        }
    }
}
