//! Paired teleport endpoints: launch, flight, and landing.
//!
//! Teleport consumption itself lives with the player systems; this module
//! owns the projectile half of the mechanic.

use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;
use tracing::debug;

use crate::arena::{Arena, ObstacleKind};
use crate::constants::{PORTAL_LAUNCH_GAP, PORTAL_SIZE, PORTAL_SPEED};
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::geometry::Rect;
use crate::systems::components::{Body, GameStage, PlayerControlled, PortalSlot, PortalState, Renderable};

/// Facing angle (degrees) back to a unit vector in screen coordinates.
fn angle_to_vec(angle: f32) -> Vec2 {
    if angle == 180.0 {
        -Vec2::X
    } else if angle == 90.0 {
        -Vec2::Y
    } else if angle == -90.0 {
        Vec2::Y
    } else {
        Vec2::X
    }
}

/// Launches portal endpoints in response to fire commands.
///
/// Firing an endpoint that is already in flight is a no-op; firing a landed
/// or resting endpoint (re)launches it from just ahead of the player along
/// the player's facing angle.
pub fn portal_fire_system(
    stage: Res<GameStage>,
    mut events: EventReader<GameEvent>,
    players: Query<(&Body, &Renderable), With<PlayerControlled>>,
    mut portals: Query<(&PortalSlot, &mut PortalState, &mut Body), Without<PlayerControlled>>,
    mut audio: EventWriter<AudioEvent>,
) {
    for event in events.read() {
        let GameEvent::Command(GameCommand::FirePortal(fired_slot)) = event else {
            continue;
        };
        if !stage.is_playing() {
            continue;
        }
        let Ok((player_body, player_renderable)) = players.single() else {
            continue;
        };

        for (slot, mut state, mut body) in portals.iter_mut() {
            if slot != fired_slot {
                continue;
            }
            if matches!(*state, PortalState::InFlight { .. }) {
                // Repeated fire on an in-flight endpoint does nothing.
                continue;
            }

            let direction = angle_to_vec(player_renderable.angle);
            let offset = direction * ((player_body.0.size + PORTAL_SIZE) / 2.0 + Vec2::splat(PORTAL_LAUNCH_GAP));
            let center = player_body.0.center() + offset;
            body.0 = Rect::from_min_size(center - PORTAL_SIZE / 2.0, PORTAL_SIZE);
            *state = PortalState::InFlight {
                velocity: direction * PORTAL_SPEED,
            };
            debug!(slot = ?slot, ?center, "Portal endpoint fired");
            audio.write(AudioEvent::PortalFired);
        }
    }
}

/// Advances in-flight endpoints. An endpoint lands (becomes an armed teleport
/// node) when it contacts an obstacle or reaches the top/bottom extremes of
/// the playfield; landing on a brick destroys the brick.
pub fn portal_flight_system(
    stage: Res<GameStage>,
    mut arena: ResMut<Arena>,
    mut portals: Query<(&PortalSlot, &mut PortalState, &mut Body)>,
) {
    if !stage.is_playing() {
        return;
    }

    for (slot, mut state, mut body) in portals.iter_mut() {
        let PortalState::InFlight { velocity } = *state else {
            continue;
        };

        let moved = body.0.translated(velocity);
        if let Some(index) = arena.obstacle_hit(&moved) {
            // Stop short of the obstacle; the endpoint becomes usable here.
            let hit_brick = arena.obstacles()[index].kind == ObstacleKind::Brick;
            if hit_brick {
                arena.destroy_brick(index);
                debug!(slot = ?slot, "Portal endpoint shattered a brick and landed");
            } else {
                debug!(slot = ?slot, "Portal endpoint landed on a wall");
            }
            *state = PortalState::Landed;
            continue;
        }

        body.0 = moved;

        let bounds = arena.bounds;
        let at_vertical_extreme = body.0.min.y <= bounds.top() || body.0.max().y >= bounds.bottom();
        let out_of_sides = body.0.max().x <= bounds.left() || body.0.min.x >= bounds.right();
        if at_vertical_extreme || out_of_sides {
            body.0.min.x = body.0.min.x.clamp(bounds.left(), bounds.right() - body.0.size.x);
            body.0.min.y = body.0.min.y.clamp(bounds.top(), bounds.bottom() - body.0.size.y);
            debug!(slot = ?slot, position = ?body.0.min, "Portal endpoint landed at field extreme");
            *state = PortalState::Landed;
        }
    }
}
