//! The pellet grid: lattice construction, consumption, brick erosion, and the
//! board-clear trigger that advances the level.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::With;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use tracing::{debug, trace};

use crate::arena::Arena;
use crate::constants::{GHOST_FRAMES_FRIGHTENED, GHOST_SPEED_STEP, POWER_PELLET_SIZE};
use crate::events::AudioEvent;
use crate::geometry::Rect;
use crate::systems::components::{
    Body, GameStage, Ghost, GhostState, MoveSpeed, PelletBundle, PelletKind, PelletsRemaining, PlayerControlled, PowerMode,
    Renderable, RoundState, Tuning,
};

/// Builds the full pellet population for a fresh board: the normal lattice
/// plus the four fixed power pellets. Returns the bundles so callers can
/// spawn them through whichever interface they have.
pub fn pellet_bundles(arena: &Arena, spacing: f32) -> Vec<PelletBundle> {
    let mut bundles: Vec<PelletBundle> = arena
        .pellet_lattice(spacing)
        .into_iter()
        .map(|rect| PelletBundle {
            kind: PelletKind::Normal,
            body: Body(rect),
            renderable: Renderable::new(0, 0),
        })
        .collect();

    for &pos in &arena.power_pellet_spawns {
        bundles.push(PelletBundle {
            kind: PelletKind::Power,
            body: Body(Rect::from_min_size(pos, POWER_PELLET_SIZE)),
            renderable: Renderable::new(1, 0),
        });
    }
    bundles
}

/// Per-tick grid maintenance: bricks passively erode the pellets they cover,
/// the player consumes the pellets it overlaps, and an emptied grid advances
/// the level.
#[allow(clippy::too_many_arguments)]
pub fn pellet_system(
    mut commands: Commands,
    stage: Res<GameStage>,
    arena: Res<Arena>,
    tuning: Res<Tuning>,
    mut round: ResMut<RoundState>,
    mut power: ResMut<PowerMode>,
    mut remaining: ResMut<PelletsRemaining>,
    players: Query<&Body, With<PlayerControlled>>,
    pellets: Query<(Entity, &PelletKind, &Body)>,
    mut ghosts: Query<(&mut GhostState, &mut Renderable, &mut MoveSpeed), With<Ghost>>,
    mut audio: EventWriter<AudioEvent>,
) {
    if !stage.is_playing() {
        return;
    }
    let Ok(player_body) = players.single() else {
        return;
    };

    let mut removed_any = false;
    for (pellet_entity, kind, body) in pellets.iter() {
        // Bricks erode the grid passively, without scoring.
        if arena.brick_rects().any(|brick| brick.intersects(&body.0)) {
            commands.entity(pellet_entity).despawn();
            remaining.0 = remaining.0.saturating_sub(1);
            removed_any = true;
            continue;
        }

        if !player_body.0.intersects(&body.0) {
            continue;
        }

        commands.entity(pellet_entity).despawn();
        remaining.0 = remaining.0.saturating_sub(1);
        removed_any = true;
        round.score += kind.score();
        trace!(kind = ?kind, score = round.score, remaining = remaining.0, "Pellet consumed");

        match kind {
            PelletKind::Normal => {
                audio.write(AudioEvent::PelletEaten);
            }
            PelletKind::Power => {
                audio.write(AudioEvent::PowerPelletEaten);
                power.activate(tuning.power_mode_ticks);
                debug!(duration_ticks = tuning.power_mode_ticks, "Power mode armed, frightening ghosts");
                for (mut state, mut renderable, _) in ghosts.iter_mut() {
                    *state = GhostState::Frightened;
                    renderable.frame = GHOST_FRAMES_FRIGHTENED.start;
                }
            }
        }
    }

    // Board cleared: pellet exhaustion is the round-advance trigger.
    if removed_any && remaining.0 == 0 {
        round.level += 1;
        for (_, _, mut speed) in ghosts.iter_mut() {
            speed.0 += GHOST_SPEED_STEP;
        }

        let bundles = pellet_bundles(&arena, tuning.pellet_spacing);
        remaining.0 = bundles.len() as u32;
        debug!(level = round.level, pellets = remaining.0, "Board cleared, grid rebuilt");
        for bundle in bundles {
            commands.spawn(bundle);
        }
    }
}
