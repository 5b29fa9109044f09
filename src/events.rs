use bevy_ecs::entity::Entity;
use bevy_ecs::event::Event;
use bitflags::bitflags;

use crate::direction::Direction;
use crate::systems::components::PortalSlot;

bitflags! {
    /// One-shot actions delivered alongside the directional intent each tick.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Actions: u8 {
        const FIRE_PORTAL_A = 1 << 0;
        const FIRE_PORTAL_B = 1 << 1;
        const TOGGLE_AUDIO = 1 << 2;
        const RESET = 1 << 3;
    }
}

/// Per-tick input from the input collaborator.
///
/// `direction: None` leaves the player's current velocity untouched; there is
/// no way to express an invalid intent through this surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub direction: Option<Direction>,
    pub actions: Actions,
}

impl TickInput {
    pub fn direction(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    pub fn actions(actions: Actions) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Move(Direction),
    FirePortal(PortalSlot),
    ToggleAudio,
    Reset,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
    /// The player overlapped this ghost while power mode was active.
    GhostCaught(Entity),
    /// The player overlapped a ghost while power mode was inactive.
    PlayerCaught,
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Discrete notifications forwarded to the audio collaborator.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    PelletEaten,
    PowerPelletEaten,
    GhostEaten,
    PortalFired,
    PortalClosed,
    LifeLost,
}
