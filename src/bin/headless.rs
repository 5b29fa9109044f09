//! Headless demo driver: runs a seeded session at a fixed tick count and
//! prints the round snapshots, standing in for the rendering/menu shell.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use muncher::direction::Direction;
use muncher::events::{Actions, AudioEvent, TickInput};
use muncher::game::{Game, GameConfig};
use muncher::highscores::JsonScoreStore;
use muncher::systems::audio::AudioSink;

/// Logs audio notifications instead of playing them.
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, event: AudioEvent) {
        info!(event = ?event, "audio");
    }
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = JsonScoreStore::load("high_scores.json");
    let mut game = Game::with_collaborators(GameConfig::default(), Box::new(store), Box::new(LogAudio))?;

    info!(prior_scores = ?game.high_scores(), "Session started");

    // A scripted walk: sweep through the four directions and lob both portals.
    let directions = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
    let mut snapshot = game.round();
    for tick in 0u32..1800 {
        let mut input = TickInput::direction(directions[(tick / 40) as usize % directions.len()]);
        if tick == 100 {
            input.actions |= Actions::FIRE_PORTAL_A;
        }
        if tick == 160 {
            input.actions |= Actions::FIRE_PORTAL_B;
        }
        snapshot = game.tick(input);

        if tick % 600 == 0 {
            info!(
                tick,
                score = snapshot.score,
                lives = snapshot.lives,
                level = snapshot.level,
                stage = ?game.stage(),
                "progress"
            );
        }
    }

    info!(
        score = snapshot.score,
        top_score = snapshot.top_score,
        level = snapshot.level,
        sprites = game.sprites().len(),
        high_scores = ?game.high_scores(),
        "Session finished"
    );
    Ok(())
}
