use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rand::rngs::SmallRng;
use strum_macros::EnumIter;

use crate::constants::{PELLET_SCORE, POWER_PELLET_SCORE};
use crate::geometry::Rect;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// The four ghost personas. They share one AI; the persona picks the spawn
/// corner and gives logs and renderers a stable identity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// Index into the arena's ghost spawn table.
    pub fn spawn_index(&self) -> usize {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Clyde => 3,
        }
    }
}

/// Per-ghost behavioral state.
///
/// `Moving` and `Frightened` swap on the global power mode flag, never on a
/// per-ghost timer; all four ghosts share one expiry.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostState {
    Idle,
    Moving,
    Frightened,
}

/// Per-ghost direction-change scheduling, decoupled from wall-clock time.
#[derive(Component, Debug, Clone, Copy)]
pub struct GhostAi {
    /// Ticks until the next direction-change roll.
    pub cooldown: u32,
}

/// An entity's bounding rectangle in playfield coordinates.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body(pub Rect);

/// Displacement applied per tick. Zero means stationary and short-circuits
/// most update paths.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec2);

/// Scalar speed used when a direction choice is converted into a velocity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MoveSpeed(pub f32);

/// Fixed position an entity returns to on relocation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec2);

/// What the rendering collaborator needs per entity: a frame identifier, a
/// facing angle in degrees, and a draw layer. The core never computes pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub frame: u8,
    pub angle: f32,
    pub layer: u8,
    pub visible: bool,
}

impl Renderable {
    pub fn new(frame: u8, layer: u8) -> Self {
        Self {
            frame,
            angle: 0.0,
            layer,
            visible: true,
        }
    }
}

/// Ping-pong playback state for the player's movement animation
/// (0 → 1 → 2 → 1 → 0 → …). The current frame lives in [`Renderable`].
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerAnimation {
    pub reversing: bool,
}

/// Consumable token variants on the pellet grid.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PelletKind {
    Normal,
    Power,
}

impl PelletKind {
    pub fn score(&self) -> u32 {
        match self {
            PelletKind::Normal => PELLET_SCORE,
            PelletKind::Power => POWER_PELLET_SCORE,
        }
    }
}

/// Which endpoint of the portal pair an entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalSlot {
    A,
    B,
}

impl PortalSlot {
    pub fn index(&self) -> usize {
        match self {
            PortalSlot::A => 0,
            PortalSlot::B => 1,
        }
    }
}

/// Portal endpoint lifecycle. The enum is the invariant: an endpoint is
/// resting, in-flight, or landed, and can never be two of those at once.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum PortalState {
    /// Parked off-field, not teleporting.
    Resting,
    /// Traveling; not yet usable.
    InFlight { velocity: Vec2 },
    /// Stationary and armed.
    Landed,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub body: Body,
    pub velocity: Velocity,
    pub speed: MoveSpeed,
    pub spawn: SpawnPoint,
    pub renderable: Renderable,
    pub animation: PlayerAnimation,
}

#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub state: GhostState,
    pub ai: GhostAi,
    pub body: Body,
    pub velocity: Velocity,
    pub speed: MoveSpeed,
    pub spawn: SpawnPoint,
    pub renderable: Renderable,
}

#[derive(Bundle)]
pub struct PelletBundle {
    pub kind: PelletKind,
    pub body: Body,
    pub renderable: Renderable,
}

#[derive(Bundle)]
pub struct PortalBundle {
    pub slot: PortalSlot,
    pub state: PortalState,
    pub body: Body,
    pub renderable: Renderable,
}

/// Score, lives, and level counters, snapshotted back to the tick driver.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    /// Best score seen this session, monotone until the process exits.
    pub top_score: u32,
}

impl RoundState {
    pub fn new(lives: u8) -> Self {
        Self {
            score: 0,
            lives,
            level: 1,
            top_score: 0,
        }
    }
}

/// The process-wide power mode flag, owned by the lifecycle layer.
///
/// Expiry is an explicit tick countdown armed on activation; the legacy
/// behavior of expiring on the next normal ghost collision is intentionally
/// not reproduced.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerMode {
    #[default]
    Inactive,
    Active {
        remaining_ticks: u32,
    },
}

impl PowerMode {
    pub fn is_active(&self) -> bool {
        matches!(self, PowerMode::Active { .. })
    }

    pub fn activate(&mut self, ticks: u32) {
        *self = PowerMode::Active { remaining_ticks: ticks };
    }

    /// Advance one tick. Returns true on the tick the mode expires.
    pub fn tick(&mut self) -> bool {
        if let PowerMode::Active { remaining_ticks } = self {
            *remaining_ticks = remaining_ticks.saturating_sub(1);
            if *remaining_ticks == 0 {
                *self = PowerMode::Inactive;
                return true;
            }
        }
        false
    }
}

/// High-level stage of the round, driving which systems are live on a tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStage {
    #[default]
    Playing,
    /// The death animation is in progress; gameplay is frozen.
    PlayerDying { remaining_ticks: u32 },
    /// Lives are exhausted; the menu collaborator owns the next move.
    GameOver,
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

/// Authoritative count of pellets still on the grid.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PelletsRemaining(pub u32);

/// Seeded simulation RNG; all randomness flows through this resource so a
/// fixed seed reproduces a session exactly.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Resource for tracking audio state.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AudioState {
    /// Whether audio is currently muted.
    pub muted: bool,
}

/// Session tuning knobs, validated once at game construction.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Tuning {
    pub power_mode_ticks: u32,
    pub ghost_cooldown: u32,
    pub ghost_change_probability: f64,
    pub pellet_spacing: f32,
    pub starting_lives: u8,
}
