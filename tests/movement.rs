use glam::Vec2;
use pretty_assertions::assert_eq;

use muncher::arena::{Arena, ArenaConfig, ScreenMode};
use muncher::direction::Direction;
use muncher::events::TickInput;
use muncher::game::{Game, GameConfig};
use muncher::geometry::Rect;
use muncher::systems::movement::{apply_bounds, move_entity};

mod common;

#[test]
fn test_zero_velocity_leaves_rect_unchanged() {
    let arena = Arena::new(ArenaConfig::default()).unwrap();
    let mut rect = Rect::new(100.0, 100.0, 50.0, 50.0);
    let before = rect;

    let applied = move_entity(&mut rect, Vec2::ZERO, &arena);

    assert_eq!(applied, Vec2::ZERO);
    assert_eq!(rect, before);
}

#[test]
fn test_move_rejected_by_wall_is_total() {
    let config = ArenaConfig {
        walls: vec![Rect::new(200.0, 0.0, 10.0, 400.0)],
        ..common::open_arena_config()
    };
    let arena = Arena::new(config).unwrap();

    let mut rect = Rect::new(145.0, 100.0, 50.0, 50.0);
    let applied = move_entity(&mut rect, Vec2::new(6.0, 0.0), &arena);

    // 145 + 50 + 6 would penetrate the wall at x=200; nothing moves.
    assert_eq!(applied, Vec2::ZERO);
    assert_eq!(rect.min, Vec2::new(145.0, 100.0));
}

#[test]
fn test_entities_never_intersect_obstacles_over_many_ticks() {
    let mut game = Game::new(GameConfig {
        seed: 7,
        ..GameConfig::default()
    })
    .unwrap();

    let arena = Arena::new(ArenaConfig::default()).unwrap();
    let directions = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    for tick in 0u32..400 {
        game.tick(TickInput::direction(directions[(tick / 25) as usize % 4]));

        let player = common::player_rect(&mut game);
        for obstacle in arena.obstacles() {
            assert!(
                !player.intersects(&obstacle.rect),
                "player {:?} intersects obstacle {:?} at tick {}",
                player,
                obstacle.rect,
                tick
            );
        }
        for (ghost, rect) in common::ghost_rects(&mut game) {
            for obstacle in arena.obstacles() {
                assert!(
                    !rect.intersects(&obstacle.rect),
                    "{:?} at {:?} intersects obstacle {:?} at tick {}",
                    ghost,
                    rect,
                    obstacle.rect,
                    tick
                );
            }
        }
    }
}

#[test]
fn test_player_clamps_below_hud_margin() {
    let mut game = Game::new(GameConfig {
        ghost_change_probability: 0.0,
        ..GameConfig::default()
    })
    .unwrap();

    // Start in the clear corridor left of the center column and head up.
    common::place_player(&mut game, Vec2::new(190.0, 363.0));
    for _ in 0..200 {
        game.tick(TickInput::direction(Direction::Up));
    }

    let player = common::player_rect(&mut game);
    assert_eq!(player.min.y, 46.0, "player should rest exactly on the HUD margin");
}

#[test]
fn test_wrap_mode_carries_entity_across_side_edge() {
    // A thin strip with no walls and wrapping sides.
    let config = ArenaConfig {
        screen_mode: ScreenMode::Wrapped,
        ..common::open_arena_config()
    };
    let mut game = Game::new(GameConfig {
        arena: config,
        ghost_change_probability: 0.0,
        ..GameConfig::default()
    })
    .unwrap();

    // A row clear of the parked ghosts.
    common::place_player(&mut game, Vec2::new(175.0, 100.0));
    for _ in 0..80 {
        game.tick(TickInput::direction(Direction::Right));
    }

    // 80 ticks at 6 px/tick covers more than one field width (400 + 50 wrap
    // span), so the player must have wrapped at least once and still be
    // inside the wrap window.
    let player = common::player_rect(&mut game);
    assert!(player.min.x < 400.0);
    assert!(player.max().x > 0.0);
}

#[test]
fn test_clamp_mode_stops_at_side_edge() {
    let mut game = Game::new(common::frozen_config()).unwrap();

    // A row clear of the parked ghosts.
    common::place_player(&mut game, Vec2::new(175.0, 100.0));
    for _ in 0..120 {
        game.tick(TickInput::direction(Direction::Right));
    }

    let player = common::player_rect(&mut game);
    assert_eq!(player.max().x, 400.0);
}

#[test]
fn test_apply_bounds_wrap_is_reversible() {
    let bounds = Arena::new(ArenaConfig::default()).unwrap().bounds;

    let mut rect = Rect::new(551.0, 300.0, 50.0, 50.0);
    apply_bounds(&mut rect, &bounds, ScreenMode::Wrapped);
    let wrapped_once = rect;
    assert!(wrapped_once.min.x < 0.0);

    // Push it fully out the other side and wrap back.
    rect.min.x -= 2.0;
    apply_bounds(&mut rect, &bounds, ScreenMode::Wrapped);
    assert_eq!(rect.min.x, 551.0 - 2.0);
}
