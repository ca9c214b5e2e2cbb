//! Collision detection and damage.
//!
//! One pass over the snapshot finds every overlapping pair between the
//! categories that interact, then all damage is applied at once so the
//! result does not depend on the order bodies are stored in.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::entities::{Body, Category, GameState, GameStatus};
use crate::geometry::{cut, overlaps};

/// Everything that collided in one step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionReport {
    /// Enemy bullets that struck the ship.
    pub ship_hits: u32,
    /// Whether any alien touched the ship.
    pub ship_rammed: bool,
    /// Hits taken by each alien, parallel to `GameState::aliens`.
    pub alien_hits: Vec<u32>,
    /// Hits taken by each shield, parallel to `GameState::shields`.
    pub shield_hits: Vec<u32>,
    /// Ids of every bullet consumed this step, each listed once.
    pub spent_bullets: Vec<String>,
    /// Points earned by aliens destroyed this step.
    pub score_gain: u64,
}

/// Find every interacting pair in `state`.
pub fn detect(state: &GameState, config: &GameConfig) -> CollisionReport {
    let (player_bullets, enemy_bullets): (Vec<&Body>, Vec<&Body>) = state
        .bullets
        .iter()
        .partition(|b| b.category == Category::PlayerBullet);

    let mut spent: HashSet<&str> = HashSet::new();

    // ── Ship ↔ enemy bullets / aliens ────────────────────────────────────────
    let mut ship_hits = 0;
    for bullet in enemy_bullets.iter().filter(|b| overlaps(&state.ship, b)) {
        ship_hits += 1;
        spent.insert(bullet.id.as_str());
    }
    let ship_rammed = state.aliens.iter().any(|a| overlaps(&state.ship, a));

    // ── Shields ↔ enemy bullets / aliens ─────────────────────────────────────
    let mut shield_hits = Vec::with_capacity(state.shields.len());
    for shield in &state.shields {
        let mut hits = 0;
        for bullet in enemy_bullets.iter().filter(|b| overlaps(shield, b)) {
            hits += 1;
            spent.insert(bullet.id.as_str());
        }
        // aliens wear shields down but are not hurt by them
        hits += state.aliens.iter().filter(|a| overlaps(shield, a)).count() as u32;
        shield_hits.push(hits);
    }

    // ── Aliens ↔ player bullets ──────────────────────────────────────────────
    let mut alien_hits = Vec::with_capacity(state.aliens.len());
    let mut score_gain = 0;
    for alien in &state.aliens {
        let mut hits = 0;
        for bullet in player_bullets.iter().filter(|b| overlaps(alien, b)) {
            hits += 1;
            spent.insert(bullet.id.as_str());
        }
        if killed_by(alien, hits) {
            score_gain += config.scores.reward(alien.category);
        }
        alien_hits.push(hits);
    }

    let spent_bullets = state
        .bullets
        .iter()
        .filter(|b| spent.contains(b.id.as_str()))
        .map(|b| b.id.clone())
        .collect();

    CollisionReport {
        ship_hits,
        ship_rammed,
        alien_hits,
        shield_hits,
        spent_bullets,
        score_gain,
    }
}

/// True when `hits` take a living body down to zero.  A tank earns its
/// reward only on the hit that finishes it.
fn killed_by(body: &Body, hits: u32) -> bool {
    hits > 0 && body.lives > 0 && body.lives <= hits
}

/// Apply every collision in `state` and return the next snapshot.
///
/// Damaged aliens and shields keep their id and position with fewer lives;
/// zero-life ones stay in place for the removal stage of the same tick.
/// Spent bullets move to `exited`.  Ramming the ship only flags `Loss`;
/// the loss check freezes the board afterwards.
pub fn resolve_collisions(state: &GameState, config: &GameConfig) -> GameState {
    let report = detect(state, config);

    let aliens = state
        .aliens
        .iter()
        .zip(&report.alien_hits)
        .map(|(alien, &hits)| damaged(alien, hits))
        .collect();
    let shields = state
        .shields
        .iter()
        .zip(&report.shield_hits)
        .map(|(shield, &hits)| damaged(shield, hits))
        .collect();

    let gone: Vec<Body> = state
        .bullets
        .iter()
        .filter(|b| report.spent_bullets.contains(&b.id))
        .cloned()
        .collect();
    let bullets = cut(&state.bullets, &gone);

    let mut exited = state.exited.clone();
    exited.extend(gone);

    GameState {
        ship: damaged(&state.ship, report.ship_hits),
        aliens,
        bullets,
        shields,
        exited,
        status: if report.ship_rammed {
            GameStatus::Loss
        } else {
            state.status
        },
        score: state.score + report.score_gain,
        ..state.clone()
    }
}

fn damaged(body: &Body, hits: u32) -> Body {
    Body {
        lives: body.lives.saturating_sub(hits),
        ..body.clone()
    }
}
