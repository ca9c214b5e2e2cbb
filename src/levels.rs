//! Level progression, board freezing and the swarm's bounds.
//!
//! Each function is one stage of the per-tick pipeline: it takes a
//! snapshot and returns the next one, appending anything it removes to
//! `exited`.

use crate::config::GameConfig;
use crate::entities::{Body, Collection, Formation, GameState, GameStatus};
use crate::factory::{alien_spawner, shield_spawner, Spawner};
use crate::grid::{generate_formation, generate_shields};

/// Empty every live collection into `exited` and park the ship off-screen.
///
/// Freezing an already frozen board changes nothing.
pub fn freeze(state: &GameState, config: &GameConfig) -> GameState {
    let mut exited = state.exited.clone();
    exited.extend(state.aliens.iter().cloned());
    exited.extend(state.bullets.iter().cloned());
    exited.extend(state.shields.iter().cloned());

    GameState {
        ship: Body {
            y: config.ship.offscreen_y,
            xspeed: 0.0,
            ..state.ship.clone()
        },
        aliens: Vec::new(),
        bullets: Vec::new(),
        shields: Vec::new(),
        exited,
        level_formation: Default::default(),
        ..state.clone()
    }
}

/// Fixed campaign finished: no aliens left and nothing queued.
pub fn check_campaign_complete(state: &GameState, config: &GameConfig) -> GameState {
    let done = state.status == GameStatus::Playing
        && !state.endless
        && state.aliens.is_empty()
        && state.level_formation.is_empty();
    if !done {
        return state.clone();
    }
    log::info!("Campaign cleared at level {} with score {}", state.level, state.score);
    GameState {
        status: GameStatus::Win,
        ..freeze(state, config)
    }
}

/// When the swarm is wiped out, spawn the next formation.
pub fn check_new_level(state: &GameState, config: &GameConfig) -> GameState {
    if state.status != GameStatus::Playing || !state.aliens.is_empty() {
        return state.clone();
    }
    let formation = match state.level_formation.front() {
        Some(formation) => formation.clone(),
        None if state.endless => match draw_formation(state, config) {
            Some(formation) => formation.clone(),
            None => return state.clone(),
        },
        // The win check runs first; an empty campaign queue means nothing to spawn.
        None => return state.clone(),
    };

    let mut next = if state.endless {
        advance_endless(state, config)
    } else {
        advance_campaign(state, config)
    };

    // Fresh shield wall every level.
    next.exited.extend(next.shields.drain(..));
    let next = generate_shields(&next, &config.shield_grid, &shield_spawner(config));

    log::debug!("Level {} spawned with {} rows", next.level, formation.len());
    spawn_formation(&next, &formation, config)
}

/// Pop the campaign queue, pay the level bonus and clear bullets in flight.
fn advance_campaign(state: &GameState, config: &GameConfig) -> GameState {
    let mut level_formation = state.level_formation.clone();
    level_formation.pop_front();

    let mut exited = state.exited.clone();
    exited.extend(state.bullets.iter().cloned());

    GameState {
        bullets: Vec::new(),
        exited,
        level: state.level + 1,
        score: state.score + state.level as u64 * config.level_bonus,
        level_formation,
        ..state.clone()
    }
}

/// Consume the look-ahead draw and queue a new one.
fn advance_endless(state: &GameState, config: &GameConfig) -> GameState {
    let mut level_formation = state.level_formation.clone();
    level_formation.pop_front();
    level_formation.extend(draw_formation(state, config).cloned());

    GameState {
        level: state.level + 1,
        level_formation,
        ..state.clone()
    }
}

/// Pick an endless formation from the last random sample and the clock.
/// `None` only for an empty catalog, which leaves endless mode with nothing
/// to spawn.
pub fn draw_formation<'a>(state: &GameState, config: &'a GameConfig) -> Option<&'a Formation> {
    let catalog = &config.endless_catalog;
    if catalog.is_empty() {
        return None;
    }
    let index = (state.random_value as u64).wrapping_mul(state.elapsed) % catalog.len() as u64;
    log::debug!("Endless draw: formation {index} of {}", catalog.len());
    catalog.get(index as usize)
}

pub fn spawn_formation(state: &GameState, formation: &Formation, config: &GameConfig) -> GameState {
    let rows: Vec<Spawner> = formation.iter().map(|&kind| alien_spawner(config, kind)).collect();
    generate_formation(state, &config.alien_grid, &rows)
}

/// Turn the whole swarm around and drop it one step when any alien
/// strays past the side margins.
pub fn reverse_aliens_at_bounds(state: &GameState, config: &GameConfig) -> GameState {
    let left = config.aliens.margin;
    let right = config.canvas_size - config.aliens.margin;
    let out_of_bounds = state.aliens.iter().any(|a| a.x < left || a.x > right);
    if !out_of_bounds {
        return state.clone();
    }
    let aliens = state
        .aliens
        .iter()
        .map(|a| Body {
            xspeed: -a.xspeed,
            y: a.y + config.aliens.drop_step,
            ..a.clone()
        })
        .collect();
    GameState {
        aliens,
        ..state.clone()
    }
}

/// Aliens reaching the bottom, a dead ship, or a ram flagged by collision
/// all end the game the same way.
pub fn check_loss(state: &GameState, config: &GameConfig) -> GameState {
    let bottom = config.canvas_size - config.aliens.bottom_margin;
    let landed = state.aliens.iter().any(|a| a.y > bottom);
    let lost = state.status == GameStatus::Loss || landed || state.ship.lives == 0;
    if !lost {
        return state.clone();
    }
    log::info!("Game lost at level {} with score {}", state.level, state.score);
    let frozen = freeze(state, config);
    GameState {
        status: GameStatus::Loss,
        ship: Body {
            lives: 0,
            ..frozen.ship.clone()
        },
        ..frozen
    }
}

/// Move zero-life bodies of `which` to `exited`.
pub fn remove_dead(state: &GameState, which: Collection) -> GameState {
    let (dead, alive): (Vec<Body>, Vec<Body>) = state
        .collection(which)
        .iter()
        .cloned()
        .partition(|b| b.lives == 0);
    if dead.is_empty() {
        return state.clone();
    }
    let mut next = state.with_collection(which, alive);
    next.exited.extend(dead);
    next
}
