#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use glam::Vec2;

use muncher::arena::{ArenaConfig, ScreenMode};
use muncher::events::AudioEvent;
use muncher::game::{Game, GameConfig};
use muncher::geometry::Rect;
use muncher::highscores::ScoreStore;
use muncher::systems::audio::AudioSink;
use muncher::systems::components::{
    Body, Ghost, GhostState, MoveSpeed, PelletKind, PlayerControlled, PortalSlot, PortalState, Renderable, Velocity,
};
use bevy_ecs::query::With;

/// A small open arena with no interior geometry, for scenario setups that
/// position entities by hand.
pub fn open_arena_config() -> ArenaConfig {
    ArenaConfig {
        size: Vec2::new(400.0, 400.0),
        hud_margin: 0.0,
        screen_mode: ScreenMode::Clamped,
        walls: vec![],
        bricks: vec![],
        player_spawn: Vec2::new(175.0, 175.0),
        // Mid-edge spawns keep the ghosts clear of the corners and power
        // pellet positions scenario tests park the player on.
        ghost_spawns: [
            Vec2::new(178.0, 5.0),
            Vec2::new(351.0, 178.0),
            Vec2::new(178.0, 351.0),
            Vec2::new(5.0, 178.0),
        ],
        power_pellet_spawns: [
            Vec2::new(40.0, 120.0),
            Vec2::new(330.0, 120.0),
            Vec2::new(40.0, 250.0),
            Vec2::new(330.0, 250.0),
        ],
    }
}

/// Config with stationary ghosts (their direction rolls never pass), so
/// scenarios control every overlap explicitly.
pub fn frozen_config() -> GameConfig {
    GameConfig {
        arena: open_arena_config(),
        ghost_change_probability: 0.0,
        ..GameConfig::default()
    }
}

pub fn player_rect(game: &mut Game) -> Rect {
    let mut query = game.world.query_filtered::<&Body, With<PlayerControlled>>();
    query.iter(&game.world).next().expect("player exists").0
}

pub fn player_velocity(game: &mut Game) -> Vec2 {
    let mut query = game.world.query_filtered::<&Velocity, With<PlayerControlled>>();
    query.iter(&game.world).next().expect("player exists").0
}

pub fn player_frame(game: &mut Game) -> u8 {
    let mut query = game.world.query_filtered::<&Renderable, With<PlayerControlled>>();
    query.iter(&game.world).next().expect("player exists").frame
}

pub fn place_player(game: &mut Game, min: Vec2) {
    let mut query = game.world.query_filtered::<&mut Body, With<PlayerControlled>>();
    let mut body = query.iter_mut(&mut game.world).next().expect("player exists");
    body.0.min = min;
}

pub fn ghost_rects(game: &mut Game) -> Vec<(Ghost, Rect)> {
    let mut query = game.world.query::<(&Ghost, &Body)>();
    query.iter(&game.world).map(|(ghost, body)| (*ghost, body.0)).collect()
}

pub fn ghost_states(game: &mut Game) -> Vec<(Ghost, GhostState, u8)> {
    let mut query = game.world.query::<(&Ghost, &GhostState, &Renderable)>();
    query
        .iter(&game.world)
        .map(|(ghost, state, renderable)| (*ghost, *state, renderable.frame))
        .collect()
}

pub fn ghost_speeds(game: &mut Game) -> Vec<f32> {
    let mut query = game.world.query_filtered::<&MoveSpeed, With<Ghost>>();
    query.iter(&game.world).map(|speed| speed.0).collect()
}

/// Moves the ghost with the given persona on top of `min`.
pub fn place_ghost(game: &mut Game, persona: Ghost, min: Vec2) {
    let mut query = game.world.query::<(&Ghost, &mut Body)>();
    for (ghost, mut body) in query.iter_mut(&mut game.world) {
        if *ghost == persona {
            body.0.min = min;
        }
    }
}

pub fn pellet_rects(game: &mut Game) -> Vec<(PelletKind, Rect)> {
    let mut query = game.world.query::<(&PelletKind, &Body)>();
    query.iter(&game.world).map(|(kind, body)| (*kind, body.0)).collect()
}

pub fn portal_states(game: &mut Game) -> Vec<(PortalSlot, PortalState, Rect)> {
    let mut query = game.world.query::<(&PortalSlot, &PortalState, &Body)>();
    query
        .iter(&game.world)
        .map(|(slot, state, body)| (*slot, *state, body.0))
        .collect()
}

/// Forces a portal endpoint into a specific state and position.
pub fn set_portal(game: &mut Game, slot: PortalSlot, state: PortalState, min: Vec2) {
    let mut query = game.world.query::<(&PortalSlot, &mut PortalState, &mut Body)>();
    for (other, mut portal_state, mut body) in query.iter_mut(&mut game.world) {
        if *other == slot {
            *portal_state = state;
            body.0.min = min;
        }
    }
}

/// Audio sink that records every event it receives.
#[derive(Clone, Default)]
pub struct RecordingAudio(pub Rc<RefCell<Vec<AudioEvent>>>);

impl AudioSink for RecordingAudio {
    fn play(&mut self, event: AudioEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Score store that mirrors every append into a shared log.
#[derive(Default)]
pub struct RecordingStore {
    scores: Vec<u32>,
    pub log: Arc<Mutex<Vec<u32>>>,
}

impl RecordingStore {
    pub fn new(log: Arc<Mutex<Vec<u32>>>) -> Self {
        Self { scores: Vec::new(), log }
    }
}

impl ScoreStore for RecordingStore {
    fn append(&mut self, score: u32) {
        self.log.lock().unwrap().push(score);
        let pos = self.scores.iter().position(|&s| score > s).unwrap_or(self.scores.len());
        self.scores.insert(pos, score);
    }

    fn scores(&self) -> &[u32] {
        &self.scores
    }
}
