//! This module contains all the constants used by the simulation.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the window, in pixels.
pub const WINDOW_SIZE: Vec2 = Vec2::new(550.0, 700.0);
/// Vertical space at the top of the window reserved for the HUD; entities clamp below it.
pub const HUD_MARGIN: f32 = 46.0;

/// The size of the player's bounding rectangle, in pixels.
pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
/// The player's starting position (top-left corner).
pub const PLAYER_SPAWN: Vec2 = Vec2::new(259.0, 363.0);
/// Distance the player travels per tick.
pub const PLAYER_SPEED: f32 = 6.0;

/// The size of a ghost's bounding rectangle, in pixels.
pub const GHOST_SIZE: Vec2 = Vec2::new(44.0, 44.0);
/// Distance a ghost travels per tick on level 1.
pub const GHOST_BASE_SPEED: f32 = 4.0;
/// Speed added to every ghost each time the board is cleared.
pub const GHOST_SPEED_STEP: f32 = 1.0;
/// Starting positions for the four ghosts, one per corner of the playfield.
pub const GHOST_SPAWNS: [Vec2; 4] = [
    Vec2::new(40.0, 50.0),
    Vec2::new(466.0, 50.0),
    Vec2::new(40.0, 606.0),
    Vec2::new(466.0, 606.0),
];

/// The size of a normal pellet, in pixels.
pub const PELLET_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// The size of a power pellet, in pixels.
pub const POWER_PELLET_SIZE: Vec2 = Vec2::new(28.0, 28.0);
/// Default lattice spacing used when laying out the pellet grid.
pub const PELLET_SPACING: f32 = 50.0;
/// Fixed positions of the four power pellets (top-left corners), symmetric about the field center.
pub const POWER_PELLET_SPAWNS: [Vec2; 4] = [
    Vec2::new(50.0, 100.0),
    Vec2::new(472.0, 100.0),
    Vec2::new(50.0, 572.0),
    Vec2::new(472.0, 572.0),
];

/// Score awarded for a normal pellet.
pub const PELLET_SCORE: u32 = 10;
/// Score awarded for a power pellet.
pub const POWER_PELLET_SCORE: u32 = 50;
/// Score awarded for catching a ghost while power mode is active.
pub const GHOST_SCORE: u32 = 200;

/// Duration of power mode, in ticks (5 seconds at 60 Hz).
pub const POWER_MODE_TICKS: u32 = 300;

/// Number of lives the player starts a session with.
pub const STARTING_LIVES: u8 = 3;

/// Ticks between ghost direction-change rolls.
pub const GHOST_DIRECTION_COOLDOWN: u32 = 12;
/// Probability that a ghost actually changes direction when its cooldown expires.
pub const GHOST_CHANGE_PROBABILITY: f64 = 0.35;

/// The size of a portal endpoint, in pixels.
pub const PORTAL_SIZE: Vec2 = Vec2::new(30.0, 30.0);
/// Distance an in-flight portal endpoint travels per tick.
pub const PORTAL_SPEED: f32 = 8.0;
/// Gap between the firing entity and a freshly launched endpoint.
pub const PORTAL_LAUNCH_GAP: f32 = 4.0;
/// Resting positions for the two endpoints while disarmed; both are outside the playfield.
pub const PORTAL_REST_POSITIONS: [Vec2; 2] = [Vec2::new(-200.0, -200.0), Vec2::new(-300.0, -300.0)];

/// Player movement animation frames, advanced in a ping-pong sequence.
pub const PLAYER_FRAMES: FrameRange = FrameRange { start: 0, len: 3 };
/// Player death animation frames, played once.
pub const PLAYER_DEATH_FRAMES: FrameRange = FrameRange { start: 3, len: 7 };
/// Ticks each death frame is held for.
pub const PLAYER_DEATH_FRAME_TICKS: u32 = 6;

/// Ghost animation sub-ranges, one disjoint range per movement direction.
pub const GHOST_FRAMES_RIGHT: FrameRange = FrameRange { start: 0, len: 2 };
pub const GHOST_FRAMES_LEFT: FrameRange = FrameRange { start: 2, len: 2 };
pub const GHOST_FRAMES_DOWN: FrameRange = FrameRange { start: 4, len: 2 };
pub const GHOST_FRAMES_UP: FrameRange = FrameRange { start: 6, len: 2 };
/// Ghost animation sub-range used while frightened, regardless of direction.
pub const GHOST_FRAMES_FRIGHTENED: FrameRange = FrameRange { start: 8, len: 2 };

/// A contiguous run of animation frame identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u8,
    pub len: u8,
}

impl FrameRange {
    /// Whether `frame` falls inside this range.
    pub fn contains(&self, frame: u8) -> bool {
        frame >= self.start && frame < self.start + self.len
    }

    /// The frame after `frame`, wrapping back to the range start.
    ///
    /// A frame outside the range snaps to the range start.
    pub fn advance(&self, frame: u8) -> u8 {
        if !self.contains(frame) {
            return self.start;
        }
        let next = frame + 1;
        if self.contains(next) {
            next
        } else {
            self.start
        }
    }
}
