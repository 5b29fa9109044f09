//! Player-controlled entity: intent consumption, movement, animation, and
//! the collision checks that feed the lifecycle manager.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use tracing::{debug, trace};

use crate::arena::Arena;
use crate::constants::PLAYER_FRAMES;
use crate::direction::Direction;
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::systems::components::{
    Body, GameStage, Ghost, MoveSpeed, PlayerAnimation, PlayerControlled, PortalSlot, PortalState, PowerMode, Renderable,
    Velocity,
};
use crate::systems::movement::{apply_bounds, move_entity};

/// Consumes a fully armed portal pair when the player overlaps an endpoint:
/// the player jumps to the paired endpoint and both ends disarm off-field.
pub fn player_teleport_system(
    stage: Res<GameStage>,
    arena: Res<Arena>,
    mut players: Query<&mut Body, With<PlayerControlled>>,
    mut portals: Query<(&PortalSlot, &mut PortalState, &mut Body), Without<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(mut player_body) = players.single_mut() else {
        return;
    };

    // Teleporting requires both endpoints landed.
    if portals.iter().filter(|(_, state, _)| matches!(**state, PortalState::Landed)).count() != 2 {
        return;
    }

    let mut destination = None;
    for (slot, _, body) in portals.iter() {
        if player_body.0.intersects(&body.0) {
            let exit = portals
                .iter()
                .find(|(other, _, _)| **other != *slot)
                .map(|(_, _, exit_body)| exit_body.0.center());
            destination = exit;
            break;
        }
    }

    let Some(exit_center) = destination else {
        return;
    };

    debug!(?exit_center, "Player teleported through portal pair");
    player_body.0 = player_body.0.with_center(exit_center);
    apply_bounds(&mut player_body.0, &arena.bounds, arena.screen_mode);

    // Consumption disarms both ends and parks them off-field.
    for (slot, mut state, mut body) in portals.iter_mut() {
        *state = PortalState::Resting;
        body.0.min = crate::constants::PORTAL_REST_POSITIONS[slot.index()];
    }
    audio.write(AudioEvent::PortalClosed);
}

/// Applies directional intent to the player's velocity, then advances it with
/// the shared speculative-move policy.
pub fn player_movement_system(
    stage: Res<GameStage>,
    arena: Res<Arena>,
    mut events: EventReader<GameEvent>,
    mut players: Query<(&mut Body, &mut Velocity, &MoveSpeed), With<PlayerControlled>>,
) {
    let Ok((mut body, mut velocity, speed)) = players.single_mut() else {
        return;
    };

    for event in events.read() {
        if let GameEvent::Command(GameCommand::Move(direction)) = event {
            if stage.is_playing() {
                velocity.0 = direction.as_vec2() * speed.0;
            }
        }
    }

    if !stage.is_playing() {
        return;
    }

    let applied = move_entity(&mut body.0, velocity.0, &arena);
    if applied != velocity.0 {
        trace!(attempted = ?velocity.0, "Player move rejected by static geometry");
    }
}

/// Advances the ping-pong movement animation and sets the facing angle from
/// the dominant velocity axis. Stationary players hold their frame.
pub fn player_animation_system(
    stage: Res<GameStage>,
    mut players: Query<(&Velocity, &mut Renderable, &mut PlayerAnimation), With<PlayerControlled>>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok((velocity, mut renderable, mut animation)) = players.single_mut() else {
        return;
    };
    if velocity.0 == glam::Vec2::ZERO {
        return;
    }

    let last = PLAYER_FRAMES.start + PLAYER_FRAMES.len - 1;
    if renderable.frame >= last {
        animation.reversing = true;
    } else if renderable.frame <= PLAYER_FRAMES.start {
        animation.reversing = false;
    }
    renderable.frame = if animation.reversing {
        renderable.frame - 1
    } else {
        renderable.frame + 1
    };

    if let Some(direction) = Direction::from_velocity(velocity.0) {
        renderable.angle = direction.angle_degrees();
    }
}

/// Checks the player against every ghost and reports the outcome as events.
///
/// The outcome table lives on the shared power mode flag: active means the
/// ghost is caught, inactive means the player is. Relocation and scoring are
/// the lifecycle manager's job, so only events leave this system.
pub fn player_collision_system(
    stage: Res<GameStage>,
    power: Res<PowerMode>,
    players: Query<&Body, With<PlayerControlled>>,
    ghosts: Query<(Entity, &Body), With<Ghost>>,
    mut events: EventWriter<GameEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(player_body) = players.single() else {
        return;
    };

    for (ghost_entity, ghost_body) in ghosts.iter() {
        if !player_body.0.intersects(&ghost_body.0) {
            continue;
        }
        if power.is_active() {
            events.write(GameEvent::GhostCaught(ghost_entity));
        } else {
            events.write(GameEvent::PlayerCaught);
            break;
        }
    }
}
