use glam::Vec2;
use pretty_assertions::assert_eq;

use muncher::arena::{ArenaConfig, ScreenMode};
use muncher::constants::{GHOST_BASE_SPEED, GHOST_SPEED_STEP, PELLET_SCORE, POWER_PELLET_SCORE};
use muncher::events::TickInput;
use muncher::game::{Game, GameConfig};
use muncher::geometry::Rect;
use muncher::systems::components::{PelletKind, PelletsRemaining, PowerMode};

mod common;

fn pellet_count(game: &mut Game) -> usize {
    common::pellet_rects(game).len()
}

/// Pellets the player currently covers, with their total score value.
fn overlapped_pellets(game: &mut Game) -> (usize, u32) {
    let player = common::player_rect(game);
    let mut count = 0;
    let mut score = 0;
    for (kind, rect) in common::pellet_rects(game) {
        if player.intersects(&rect) {
            count += 1;
            score += kind.score();
        }
    }
    (count, score)
}

#[test]
fn test_normal_pellet_scores_ten() {
    let mut game = Game::new(common::frozen_config()).unwrap();
    let before = pellet_count(&mut game);

    // The top-left lattice cell is the only pellet under a player parked in
    // the corner.
    common::place_player(&mut game, Vec2::ZERO);
    let (count, expected) = overlapped_pellets(&mut game);
    assert_eq!(count, 1);
    assert_eq!(expected, PELLET_SCORE);

    let snapshot = game.tick(TickInput::default());

    assert_eq!(snapshot.score, PELLET_SCORE);
    assert_eq!(pellet_count(&mut game), before - 1);
    assert_eq!(*game.world.resource::<PowerMode>(), PowerMode::Inactive);
}

#[test]
fn test_power_pellet_scores_fifty_and_arms_power_mode() {
    let mut game = Game::new(common::frozen_config()).unwrap();

    let power = common::pellet_rects(&mut game)
        .into_iter()
        .find(|(kind, _)| *kind == PelletKind::Power)
        .expect("power pellets exist")
        .1;
    common::place_player(&mut game, power.min - Vec2::splat(5.0));
    let (_, expected) = overlapped_pellets(&mut game);
    assert!(expected >= POWER_PELLET_SCORE);

    let snapshot = game.tick(TickInput::default());

    assert_eq!(snapshot.score, expected);
    assert!(game.world.resource::<PowerMode>().is_active());
}

#[test]
fn test_pellet_count_resource_tracks_population() {
    let mut game = Game::new(common::frozen_config()).unwrap();

    let counted = game.world.resource::<PelletsRemaining>().0 as usize;
    assert_eq!(counted, pellet_count(&mut game));

    common::place_player(&mut game, Vec2::ZERO);
    game.tick(TickInput::default());

    assert_eq!(game.world.resource::<PelletsRemaining>().0 as usize, pellet_count(&mut game));
}

#[test]
fn test_bricks_erode_covering_pellets_without_scoring() {
    // A brick dropped onto the open field; the lattice runs under it and the
    // first tick erodes the covered pellets silently.
    let brick = Rect::new(60.0, 60.0, 40.0, 40.0);
    let mut arena = common::open_arena_config();
    arena.bricks = vec![brick];
    let mut game = Game::new(GameConfig {
        arena,
        ghost_change_probability: 0.0,
        ..GameConfig::default()
    })
    .unwrap();

    let covered = common::pellet_rects(&mut game)
        .into_iter()
        .filter(|(_, rect)| rect.intersects(&brick))
        .count();
    assert!(covered > 0, "the lattice should run under the brick");

    // The player sits over some pellets of its own, far from the brick.
    let (eaten, eaten_score) = overlapped_pellets(&mut game);
    let before = pellet_count(&mut game);

    let snapshot = game.tick(TickInput::default());

    assert_eq!(snapshot.score, eaten_score, "brick erosion must not score");
    assert_eq!(pellet_count(&mut game), before - covered - eaten);
}

#[test]
fn test_exhaustion_advances_level_once_and_rebuilds() {
    // A cramped arena so the whole grid is a handful of pellets: one lattice
    // cell plus the four power pellets.
    let arena = ArenaConfig {
        size: Vec2::new(200.0, 200.0),
        hud_margin: 0.0,
        screen_mode: ScreenMode::Clamped,
        walls: vec![],
        bricks: vec![],
        player_spawn: Vec2::new(75.0, 75.0),
        ghost_spawns: [
            Vec2::new(78.0, 5.0),
            Vec2::new(151.0, 78.0),
            Vec2::new(78.0, 151.0),
            Vec2::new(5.0, 78.0),
        ],
        power_pellet_spawns: [
            Vec2::new(20.0, 20.0),
            Vec2::new(150.0, 20.0),
            Vec2::new(20.0, 150.0),
            Vec2::new(150.0, 150.0),
        ],
    };
    let mut game = Game::new(GameConfig {
        arena,
        ghost_change_probability: 0.0,
        pellet_spacing: 150.0,
        ..GameConfig::default()
    })
    .unwrap();

    let initial_count = pellet_count(&mut game);
    assert!(initial_count > 0);
    assert!(initial_count < 12, "arena should be cramped, got {} pellets", initial_count);

    // Walk the player over every pellet; the board clears and the level
    // advances exactly once.
    let mut safety = 0;
    while game.round().level == 1 {
        let next = common::pellet_rects(&mut game).first().map(|(_, rect)| rect.min);
        let Some(min) = next else {
            panic!("grid emptied without advancing the level");
        };
        common::place_player(&mut game, min - Vec2::splat(5.0));
        game.tick(TickInput::default());

        safety += 1;
        assert!(safety < 50, "board never cleared");
    }

    assert_eq!(game.round().level, 2);
    assert_eq!(pellet_count(&mut game), initial_count, "grid must rebuild to its full count");
    assert_eq!(game.world.resource::<PelletsRemaining>().0 as usize, initial_count);
    for speed in common::ghost_speeds(&mut game) {
        assert_eq!(speed, GHOST_BASE_SPEED + GHOST_SPEED_STEP);
    }
    // Lives and score carry across a cleared board.
    assert_eq!(game.round().lives, 3);
    assert!(game.round().score > 0);
}
