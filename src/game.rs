//! Game construction and the per-tick entry point.
//!
//! A [`Game`] wires the validated arena, the entity population, and the fixed
//! system chain into a `bevy_ecs` world, then exposes a single
//! [`Game::tick`] to the external tick driver.

use bevy_ecs::event::EventRegistry;
use bevy_ecs::query::With;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::{schedule::Schedule, world::World};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum::IntoEnumIterator;

use crate::arena::{Arena, ArenaConfig};
use crate::constants::{
    GHOST_BASE_SPEED, GHOST_CHANGE_PROBABILITY, GHOST_DIRECTION_COOLDOWN, GHOST_FRAMES_RIGHT, GHOST_SIZE,
    PELLET_SPACING, PLAYER_FRAMES, PLAYER_SIZE, PLAYER_SPEED, PORTAL_REST_POSITIONS, PORTAL_SIZE, POWER_MODE_TICKS,
    STARTING_LIVES,
};
use crate::error::GameResult;
use crate::events::{Actions, AudioEvent, GameCommand, GameEvent, TickInput};
use crate::geometry::Rect;
use crate::highscores::{MemoryScoreStore, ScoreStore};
use crate::systems::audio::{AudioOutput, AudioSink, NullAudio};
use crate::systems::components::{
    AudioState, Body, GameStage, Ghost, GhostAi, GhostBundle, GhostState, MoveSpeed, PelletKind, PelletsRemaining,
    PlayerAnimation, PlayerBundle, PlayerControlled, PortalBundle, PortalSlot, PortalState, PowerMode, Renderable,
    RoundState, SimRng, SpawnPoint, Tuning, Velocity,
};
use crate::systems::state::ScoreStoreHandle;
use crate::systems::{
    audio_system, event_flush_system, ghost_ai_system, ghost_animation_system, ghost_movement_system, pellet_bundles,
    pellet_system, player_animation_system, player_collision_system, player_movement_system, player_teleport_system,
    portal_fire_system, portal_flight_system, power_mode_system, stage_system,
};

/// Session construction input. `Default` matches the reference 60 Hz game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    /// Seed for the simulation RNG; identical seeds replay identical sessions.
    pub seed: u64,
    pub power_mode_ticks: u32,
    pub ghost_cooldown: u32,
    pub ghost_change_probability: f64,
    pub pellet_spacing: f32,
    pub starting_lives: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            seed: 0,
            power_mode_ticks: POWER_MODE_TICKS,
            ghost_cooldown: GHOST_DIRECTION_COOLDOWN,
            ghost_change_probability: GHOST_CHANGE_PROBABILITY,
            pellet_spacing: PELLET_SPACING,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// What kind of entity a sprite snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Ghost(Ghost),
    Pellet(PelletKind),
    Portal(PortalSlot),
}

/// One entity's worth of render state: a rect and a frame identifier.
/// The rendering collaborator turns these into pixels; the core never does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSnapshot {
    pub kind: SpriteKind,
    pub rect: Rect,
    pub frame: u8,
    pub angle: f32,
    pub layer: u8,
    pub visible: bool,
}

/// The simulation core behind the single `tick` entry point.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a session with an in-memory score list and no audio output.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        Self::with_collaborators(config, Box::new(MemoryScoreStore::default()), Box::new(NullAudio))
    }

    /// Builds a session wired to the given persistence and audio collaborators.
    pub fn with_collaborators(
        config: GameConfig,
        score_store: Box<dyn ScoreStore>,
        audio_sink: Box<dyn AudioSink>,
    ) -> GameResult<Game> {
        let arena = Arena::new(config.arena.clone())?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);

        world.insert_resource(RoundState::new(config.starting_lives));
        world.insert_resource(PowerMode::default());
        world.insert_resource(GameStage::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.seed)));
        world.insert_resource(Tuning {
            power_mode_ticks: config.power_mode_ticks,
            ghost_cooldown: config.ghost_cooldown,
            ghost_change_probability: config.ghost_change_probability,
            pellet_spacing: config.pellet_spacing,
            starting_lives: config.starting_lives,
        });
        world.insert_resource(ScoreStoreHandle(score_store));
        world.insert_non_send_resource(AudioOutput(audio_sink));

        world.spawn(PlayerBundle {
            player: PlayerControlled,
            body: Body(Rect::from_min_size(arena.player_spawn, PLAYER_SIZE)),
            velocity: Velocity(Vec2::ZERO),
            speed: MoveSpeed(PLAYER_SPEED),
            spawn: SpawnPoint(arena.player_spawn),
            renderable: Renderable::new(PLAYER_FRAMES.start, 3),
            animation: PlayerAnimation::default(),
        });

        for ghost in Ghost::iter() {
            let spawn = arena.ghost_spawns[ghost.spawn_index()];
            world.spawn(GhostBundle {
                ghost,
                state: GhostState::Idle,
                // Stagger the first direction rolls so the four walks diverge
                // immediately even under a shared RNG.
                ai: GhostAi {
                    cooldown: ghost.spawn_index() as u32 * 3,
                },
                body: Body(Rect::from_min_size(spawn, GHOST_SIZE)),
                velocity: Velocity(Vec2::ZERO),
                speed: MoveSpeed(GHOST_BASE_SPEED),
                spawn: SpawnPoint(spawn),
                renderable: Renderable::new(GHOST_FRAMES_RIGHT.start, 2),
            });
        }

        for slot in [PortalSlot::A, PortalSlot::B] {
            world.spawn(PortalBundle {
                slot,
                state: PortalState::Resting,
                body: Body(Rect::from_min_size(PORTAL_REST_POSITIONS[slot.index()], PORTAL_SIZE)),
                renderable: Renderable::new(0, 1),
            });
        }

        let bundles = pellet_bundles(&arena, config.pellet_spacing);
        world.insert_resource(PelletsRemaining(bundles.len() as u32));
        for bundle in bundles {
            world.spawn(bundle);
        }

        world.insert_resource(arena);

        schedule.add_systems(
            (
                player_teleport_system,
                player_movement_system,
                player_animation_system,
                player_collision_system,
                ghost_ai_system,
                ghost_movement_system,
                ghost_animation_system,
                portal_fire_system,
                portal_flight_system,
                pellet_system,
                power_mode_system,
                stage_system,
                audio_system,
                event_flush_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Advances the simulation one tick and returns the round snapshot.
    ///
    /// This is the only entry point the tick driver needs; the input
    /// collaborator's per-tick intent and one-shot actions come in through
    /// `input`.
    pub fn tick(&mut self, input: TickInput) -> RoundState {
        if let Some(direction) = input.direction {
            self.world.send_event(GameEvent::Command(GameCommand::Move(direction)));
        }
        if input.actions.contains(Actions::FIRE_PORTAL_A) {
            self.world.send_event(GameEvent::Command(GameCommand::FirePortal(PortalSlot::A)));
        }
        if input.actions.contains(Actions::FIRE_PORTAL_B) {
            self.world.send_event(GameEvent::Command(GameCommand::FirePortal(PortalSlot::B)));
        }
        if input.actions.contains(Actions::TOGGLE_AUDIO) {
            self.world.send_event(GameEvent::Command(GameCommand::ToggleAudio));
        }
        if input.actions.contains(Actions::RESET) {
            self.world.send_event(GameEvent::Command(GameCommand::Reset));
        }

        self.schedule.run(&mut self.world);

        *self.world.resource::<RoundState>()
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn round(&self) -> RoundState {
        *self.world.resource::<RoundState>()
    }

    /// Prior session scores, descending, as loaded from the persistence
    /// collaborator plus anything appended this session.
    pub fn high_scores(&self) -> Vec<u32> {
        self.world.resource::<ScoreStoreHandle>().0.scores().to_vec()
    }

    /// Per-entity render state for the rendering collaborator.
    pub fn sprites(&mut self) -> Vec<SpriteSnapshot> {
        let mut sprites = Vec::new();

        let mut players = self.world.query_filtered::<(&Body, &Renderable), With<PlayerControlled>>();
        for (body, renderable) in players.iter(&self.world) {
            sprites.push(SpriteSnapshot {
                kind: SpriteKind::Player,
                rect: body.0,
                frame: renderable.frame,
                angle: renderable.angle,
                layer: renderable.layer,
                visible: renderable.visible,
            });
        }

        let mut ghosts = self.world.query::<(&Ghost, &Body, &Renderable)>();
        for (ghost, body, renderable) in ghosts.iter(&self.world) {
            sprites.push(SpriteSnapshot {
                kind: SpriteKind::Ghost(*ghost),
                rect: body.0,
                frame: renderable.frame,
                angle: renderable.angle,
                layer: renderable.layer,
                visible: renderable.visible,
            });
        }

        let mut pellets = self.world.query::<(&PelletKind, &Body, &Renderable)>();
        for (kind, body, renderable) in pellets.iter(&self.world) {
            sprites.push(SpriteSnapshot {
                kind: SpriteKind::Pellet(*kind),
                rect: body.0,
                frame: renderable.frame,
                angle: renderable.angle,
                layer: renderable.layer,
                visible: renderable.visible,
            });
        }

        let mut portals = self.world.query::<(&PortalSlot, &PortalState, &Body, &Renderable)>();
        for (slot, state, body, renderable) in portals.iter(&self.world) {
            sprites.push(SpriteSnapshot {
                kind: SpriteKind::Portal(*slot),
                rect: body.0,
                frame: renderable.frame,
                angle: renderable.angle,
                layer: renderable.layer,
                visible: renderable.visible && !matches!(state, PortalState::Resting),
            });
        }

        sprites
    }
}
