//! The round/lifecycle manager.
//!
//! Runs at the end of the tick, after every entity has moved and every
//! collision has been reported, and owns the transitions the rest of the
//! sim only requests: death sequencing, entity relocation, session reset,
//! and score persistence.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::{EventReader, EventWriter};
use bevy_ecs::query::{With, Without};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Commands, Query, Res, ResMut};
use glam::Vec2;
use tracing::{debug, info};

use crate::arena::Arena;
use crate::constants::{
    GHOST_BASE_SPEED, GHOST_FRAMES_FRIGHTENED, GHOST_FRAMES_RIGHT, GHOST_SCORE, PLAYER_DEATH_FRAMES,
    PLAYER_DEATH_FRAME_TICKS, PLAYER_FRAMES, PORTAL_REST_POSITIONS,
};
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::highscores::ScoreStore;
use crate::systems::components::{
    Body, GameStage, Ghost, GhostAi, GhostState, MoveSpeed, PelletKind, PelletsRemaining, PlayerAnimation,
    PlayerControlled, PortalSlot, PortalState, PowerMode, Renderable, RoundState, SpawnPoint, Tuning, Velocity,
};
use crate::systems::item::pellet_bundles;

/// The persistence collaborator, reachable by the lifecycle manager only.
#[derive(Resource)]
pub struct ScoreStoreHandle(pub Box<dyn ScoreStore>);

/// Total length of the death animation, in ticks.
pub fn death_sequence_ticks() -> u32 {
    PLAYER_DEATH_FRAMES.len as u32 * PLAYER_DEATH_FRAME_TICKS
}

#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn stage_system(
    mut commands: Commands,
    mut stage: ResMut<GameStage>,
    mut round: ResMut<RoundState>,
    mut power: ResMut<PowerMode>,
    mut remaining: ResMut<PelletsRemaining>,
    arena: Res<Arena>,
    tuning: Res<Tuning>,
    mut store: ResMut<ScoreStoreHandle>,
    mut events: EventReader<GameEvent>,
    mut audio: EventWriter<AudioEvent>,
    mut players: Query<
        (&mut Body, &mut Velocity, &mut Renderable, &mut PlayerAnimation, &SpawnPoint),
        With<PlayerControlled>,
    >,
    mut ghosts: Query<
        (
            &mut Body,
            &mut Velocity,
            &mut GhostState,
            &mut GhostAi,
            &mut Renderable,
            &mut MoveSpeed,
            &SpawnPoint,
        ),
        (With<Ghost>, Without<PlayerControlled>),
    >,
    mut portals: Query<(&PortalSlot, &mut PortalState, &mut Body), (Without<PlayerControlled>, Without<Ghost>)>,
    pellets: Query<Entity, With<PelletKind>>,
) {
    let mut respawn = false;
    let mut full_reset = false;
    let mut game_over = false;

    for event in events.read() {
        match event {
            GameEvent::GhostCaught(ghost_entity) => {
                round.score += GHOST_SCORE;
                audio.write(AudioEvent::GhostEaten);
                relocate_ghost(&mut ghosts, *ghost_entity, power.is_active());
                debug!(ghost = ?ghost_entity, score = round.score, "Ghost caught and relocated");
            }
            GameEvent::PlayerCaught => {
                if stage.is_playing() {
                    *stage = GameStage::PlayerDying {
                        remaining_ticks: death_sequence_ticks(),
                    };
                    if let Ok((_, mut velocity, mut renderable, _, _)) = players.single_mut() {
                        velocity.0 = Vec2::ZERO;
                        renderable.frame = PLAYER_DEATH_FRAMES.start;
                    }
                    audio.write(AudioEvent::LifeLost);
                    info!(lives = round.lives, "Player caught, death sequence started");
                }
            }
            GameEvent::Command(GameCommand::Reset) => {
                full_reset = true;
            }
            GameEvent::Command(_) => {}
        }
    }

    if let GameStage::PlayerDying { remaining_ticks } = *stage {
        if remaining_ticks > 0 {
            let remaining_ticks = remaining_ticks - 1;
            *stage = GameStage::PlayerDying { remaining_ticks };

            // Step through the death frames as the countdown elapses.
            let elapsed = death_sequence_ticks() - remaining_ticks;
            let index = (elapsed / PLAYER_DEATH_FRAME_TICKS).min(PLAYER_DEATH_FRAMES.len as u32 - 1);
            if let Ok((_, _, mut renderable, _, _)) = players.single_mut() {
                renderable.frame = PLAYER_DEATH_FRAMES.start + index as u8;
            }
        } else {
            round.lives = round.lives.saturating_sub(1);
            if round.lives > 0 {
                debug!(lives = round.lives, "Death sequence complete, respawning");
                respawn = true;
                *stage = GameStage::Playing;
            } else {
                info!(score = round.score, "Lives exhausted, persisting score");
                store.0.append(round.score);
                full_reset = true;
                game_over = true;
            }
        }
    }

    if full_reset {
        round.top_score = round.top_score.max(round.score);
        round.score = 0;
        round.level = 1;
        round.lives = tuning.starting_lives;

        for entity in pellets.iter() {
            commands.entity(entity).despawn();
        }
        let bundles = pellet_bundles(&arena, tuning.pellet_spacing);
        remaining.0 = bundles.len() as u32;
        for bundle in bundles {
            commands.spawn(bundle);
        }

        for (_, _, _, _, _, mut speed, _) in ghosts.iter_mut() {
            speed.0 = GHOST_BASE_SPEED;
        }

        respawn = true;
        *stage = if game_over { GameStage::GameOver } else { GameStage::Playing };
        debug!(game_over, "Session reset to baseline");
    }

    if respawn {
        *power = PowerMode::Inactive;

        if let Ok((mut body, mut velocity, mut renderable, mut animation, spawn)) = players.single_mut() {
            body.0.min = spawn.0;
            velocity.0 = Vec2::ZERO;
            renderable.frame = PLAYER_FRAMES.start;
            renderable.angle = 0.0;
            animation.reversing = false;
        }

        for (mut body, mut velocity, mut state, mut ai, mut renderable, _, spawn) in ghosts.iter_mut() {
            body.0.min = spawn.0;
            velocity.0 = Vec2::ZERO;
            *state = GhostState::Idle;
            ai.cooldown = 0;
            renderable.frame = GHOST_FRAMES_RIGHT.start;
        }

        for (slot, mut state, mut body) in portals.iter_mut() {
            *state = PortalState::Resting;
            body.0.min = PORTAL_REST_POSITIONS[slot.index()];
        }
    }

    round.top_score = round.top_score.max(round.score);
}

fn relocate_ghost(
    ghosts: &mut Query<
        (
            &mut Body,
            &mut Velocity,
            &mut GhostState,
            &mut GhostAi,
            &mut Renderable,
            &mut MoveSpeed,
            &SpawnPoint,
        ),
        (With<Ghost>, Without<PlayerControlled>),
    >,
    entity: Entity,
    still_frightened: bool,
) {
    let Ok((mut body, mut velocity, mut state, mut ai, mut renderable, _, spawn)) = ghosts.get_mut(entity) else {
        return;
    };
    body.0.min = spawn.0;
    velocity.0 = Vec2::ZERO;
    ai.cooldown = 0;
    if still_frightened {
        *state = GhostState::Frightened;
        renderable.frame = GHOST_FRAMES_FRIGHTENED.start;
    } else {
        *state = GhostState::Idle;
        renderable.frame = GHOST_FRAMES_RIGHT.start;
    }
}
