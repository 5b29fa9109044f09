//! Static playfield geometry: bounds, walls, bricks, and spawn layout.
//!
//! An [`Arena`] is validated once at construction and then shared read-only by
//! every system. The single exception is brick destruction, which is routed
//! through [`Arena::destroy_brick`] so obstacle mutation has exactly one door.

use glam::Vec2;

use crate::constants::{
    GHOST_SIZE, GHOST_SPAWNS, HUD_MARGIN, PELLET_SIZE, PLAYER_SIZE, PLAYER_SPAWN, POWER_PELLET_SIZE,
    POWER_PELLET_SPAWNS, WINDOW_SIZE,
};
use crate::error::ConfigError;
use crate::geometry::Rect;

/// How the two side boundaries behave during movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Entities clamp against the left/right edges.
    Clamped,
    /// Entities that fully exit a side edge re-enter from the opposite side.
    /// Top and bottom always clamp.
    Wrapped,
}

/// The playfield rectangle entities are kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub size: Vec2,
    /// Vertical space reserved at the top for the HUD; the effective top edge.
    pub hud_margin: f32,
}

impl Bounds {
    pub fn left(&self) -> f32 {
        0.0
    }

    pub fn right(&self) -> f32 {
        self.size.x
    }

    pub fn top(&self) -> f32 {
        self.hud_margin
    }

    pub fn bottom(&self) -> f32 {
        self.size.y
    }

    /// Whether `rect` lies entirely inside the playfield.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.min.x >= self.left() && rect.max().x <= self.right() && rect.min.y >= self.top() && rect.max().y <= self.bottom()
    }
}

/// Static geometry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Blocks movement permanently.
    Wall,
    /// Blocks movement until destroyed; erodes pellets it covers.
    Brick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// Arena construction input. `Default` produces the standard board layout.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub size: Vec2,
    pub hud_margin: f32,
    pub screen_mode: ScreenMode,
    pub walls: Vec<Rect>,
    pub bricks: Vec<Rect>,
    pub player_spawn: Vec2,
    pub ghost_spawns: [Vec2; 4],
    pub power_pellet_spawns: [Vec2; 4],
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            size: WINDOW_SIZE,
            hud_margin: HUD_MARGIN,
            screen_mode: ScreenMode::Wrapped,
            walls: vec![
                // Side walls, split to leave the wrap corridor open at mid-height.
                Rect::new(0.0, 46.0, 29.0, 254.0),
                Rect::new(0.0, 360.0, 29.0, 294.0),
                Rect::new(521.0, 46.0, 29.0, 254.0),
                Rect::new(521.0, 360.0, 29.0, 294.0),
                // Inner blocks, leaving 70px corridors on either side of the
                // center column.
                Rect::new(90.0, 140.0, 100.0, 60.0),
                Rect::new(360.0, 140.0, 100.0, 60.0),
                Rect::new(90.0, 500.0, 100.0, 60.0),
                Rect::new(360.0, 500.0, 100.0, 60.0),
                Rect::new(245.0, 220.0, 60.0, 90.0),
            ],
            bricks: vec![Rect::new(260.0, 46.0, 30.0, 40.0), Rect::new(260.0, 614.0, 30.0, 40.0)],
            player_spawn: PLAYER_SPAWN,
            ghost_spawns: GHOST_SPAWNS,
            power_pellet_spawns: POWER_PELLET_SPAWNS,
        }
    }
}

/// Validated, immutable-after-construction playfield geometry.
#[derive(Debug, Clone, bevy_ecs::resource::Resource)]
pub struct Arena {
    pub bounds: Bounds,
    pub screen_mode: ScreenMode,
    obstacles: Vec<Obstacle>,
    pub player_spawn: Vec2,
    pub ghost_spawns: [Vec2; 4],
    pub power_pellet_spawns: [Vec2; 4],
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Result<Arena, ConfigError> {
        if config.size.x <= 0.0 || config.size.y <= 0.0 || config.hud_margin < 0.0 || config.hud_margin >= config.size.y {
            return Err(ConfigError::InvalidBounds {
                width: config.size.x,
                height: config.size.y,
                hud_margin: config.hud_margin,
            });
        }

        let bounds = Bounds {
            size: config.size,
            hud_margin: config.hud_margin,
        };

        let mut obstacles = Vec::with_capacity(config.walls.len() + config.bricks.len());
        for (rects, kind) in [(&config.walls, ObstacleKind::Wall), (&config.bricks, ObstacleKind::Brick)] {
            for rect in rects {
                if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
                    return Err(ConfigError::ZeroSizeRect {
                        x: rect.min.x,
                        y: rect.min.y,
                        width: rect.size.x,
                        height: rect.size.y,
                    });
                }
                obstacles.push(Obstacle { rect: *rect, kind });
            }
        }

        let arena = Arena {
            bounds,
            screen_mode: config.screen_mode,
            obstacles,
            player_spawn: config.player_spawn,
            ghost_spawns: config.ghost_spawns,
            power_pellet_spawns: config.power_pellet_spawns,
        };

        arena.validate_spawn("player", Rect::from_min_size(config.player_spawn, PLAYER_SIZE))?;
        for spawn in config.ghost_spawns {
            arena.validate_spawn("ghost", Rect::from_min_size(spawn, GHOST_SIZE))?;
        }

        Ok(arena)
    }

    fn validate_spawn(&self, name: &'static str, rect: Rect) -> Result<(), ConfigError> {
        if !self.bounds.contains(&rect) {
            return Err(ConfigError::SpawnOutOfBounds { name });
        }
        if self.obstacles.iter().any(|o| o.rect.intersects(&rect)) {
            return Err(ConfigError::BlockedSpawn { name });
        }
        Ok(())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Rectangles that block movement, for the speculative-move resolver.
    pub fn blocking_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(|o| o.rect)
    }

    pub fn brick_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Brick)
            .map(|o| o.rect)
    }

    /// Index of the first obstacle intersecting `rect`, if any.
    pub fn obstacle_hit(&self, rect: &Rect) -> Option<usize> {
        self.obstacles.iter().position(|o| o.rect.intersects(rect))
    }

    /// Removes the obstacle at `index` if it is a brick. Returns whether
    /// anything was destroyed; walls are never removable.
    pub fn destroy_brick(&mut self, index: usize) -> bool {
        match self.obstacles.get(index) {
            Some(o) if o.kind == ObstacleKind::Brick => {
                self.obstacles.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Deterministic pellet lattice: cell centers on a regular grid, skipping
    /// cells covered by walls or by the fixed power pellet positions.
    ///
    /// Bricks are deliberately not skipped; pellets under a brick are eroded
    /// by the grid's per-tick brick check instead.
    pub fn pellet_lattice(&self, spacing: f32) -> Vec<Rect> {
        let power_rects: Vec<Rect> = self
            .power_pellet_spawns
            .iter()
            .map(|&pos| Rect::from_min_size(pos, POWER_PELLET_SIZE))
            .collect();

        let mut pellets = Vec::new();
        let mut y = self.bounds.top() + spacing / 2.0;
        while y + PELLET_SIZE.y / 2.0 <= self.bounds.bottom() {
            let mut x = self.bounds.left() + spacing / 2.0;
            while x + PELLET_SIZE.x / 2.0 <= self.bounds.right() {
                let rect = Rect::from_min_size(Vec2::new(x, y) - PELLET_SIZE / 2.0, PELLET_SIZE);
                let on_wall = self
                    .obstacles
                    .iter()
                    .any(|o| o.kind == ObstacleKind::Wall && o.rect.intersects(&rect));
                let on_power = power_rects.iter().any(|p| p.intersects(&rect));
                if !on_wall && !on_power {
                    pellets.push(rect);
                }
                x += spacing;
            }
            y += spacing;
        }
        pellets
    }
}
