//! Audio event forwarding.
//!
//! The core never plays sound; it emits [`AudioEvent`]s and hands them to
//! whatever [`AudioSink`] the embedder supplied, honoring the mute toggle.

use bevy_ecs::event::EventReader;
use bevy_ecs::system::{NonSendMut, ResMut};
use tracing::{info, trace};

use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::systems::components::AudioState;

/// Receives discrete playback notifications. No return value is expected;
/// the sink may drop events freely.
pub trait AudioSink {
    fn play(&mut self, event: AudioEvent);
}

/// A sink that discards everything; the default when no audio collaborator
/// is wired up.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: AudioEvent) {}
}

/// Non-send resource wrapper for the embedder's audio backend.
///
/// Audio backends are frequently tied to the main thread, so the sink is a
/// NonSend resource rather than a regular one.
pub struct AudioOutput(pub Box<dyn AudioSink>);

/// Forwards queued audio events to the sink and processes the mute toggle.
pub fn audio_system(
    mut output: NonSendMut<AudioOutput>,
    mut state: ResMut<AudioState>,
    mut commands: EventReader<GameEvent>,
    mut events: EventReader<AudioEvent>,
) {
    for event in commands.read() {
        if matches!(event, GameEvent::Command(GameCommand::ToggleAudio)) {
            state.muted = !state.muted;
            info!("Audio {}", if state.muted { "muted" } else { "unmuted" });
        }
    }

    for event in events.read() {
        if state.muted {
            trace!(event = ?event, "Skipping audio event while muted");
            continue;
        }
        output.0.play(*event);
    }
}
