//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components,
//! systems, and resources.

pub mod audio;
pub mod components;
pub mod ghost;
pub mod item;
pub mod movement;
pub mod player;
pub mod portal;
pub mod power;
pub mod state;

pub use audio::{audio_system, AudioOutput, AudioSink, NullAudio};
pub use components::*;
pub use ghost::{direction_frames, ghost_ai_system, ghost_animation_system, ghost_movement_system};
pub use item::{pellet_bundles, pellet_system};
pub use movement::{apply_bounds, move_entity};
pub use player::{player_animation_system, player_collision_system, player_movement_system, player_teleport_system};
pub use portal::{portal_fire_system, portal_flight_system};
pub use power::power_mode_system;
pub use state::{death_sequence_ticks, stage_system, ScoreStoreHandle};

use bevy_ecs::event::Events;
use bevy_ecs::system::ResMut;

use crate::events::{AudioEvent, GameEvent};

/// Advances the double-buffered event queues at the end of each tick so
/// events written this tick are dropped once every reader has seen them.
pub fn event_flush_system(mut game_events: ResMut<Events<GameEvent>>, mut audio_events: ResMut<Events<AudioEvent>>) {
    game_events.update();
    audio_events.update();
}
