//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the static `GameConfig`) and returns a brand-new
//! `GameState`.  There are no side effects: randomness arrives as
//! `Event::RandomSample` values drawn by whoever owns the event stream.

use std::collections::VecDeque;

use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::entities::{Category, Collection, Direction, Event, GameState, GameStatus};
use crate::factory::{create_ship, enemy_bullet, player_bullet};
use crate::geometry::advance;
use crate::levels::{
    check_campaign_complete, check_loss, check_new_level, draw_formation, freeze, remove_dead,
    reverse_aliens_at_bounds,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Start of the fixed campaign.  Nothing is spawned yet: the first tick
/// sees an empty swarm and brings in level 1.
pub fn initial_state(config: &GameConfig) -> GameState {
    GameState {
        elapsed: 0,
        ship: create_ship(config),
        aliens: Vec::new(),
        bullets: Vec::new(),
        shields: Vec::new(),
        exited: Vec::new(),
        obj_count: 0,
        level_formation: config.campaign.iter().cloned().collect(),
        status: GameStatus::Playing,
        score: 0,
        level: 0,
        endless: false,
        random_value: 0,
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Fold one event into the game.
///
/// `exited` is per transition: the result only lists bodies removed by
/// this event, so the previous snapshot's list is dropped up front.
pub fn reduce(state: &GameState, event: &Event, config: &GameConfig) -> GameState {
    let state = GameState {
        exited: Vec::new(),
        ..state.clone()
    };
    match *event {
        Event::Move(speed) => move_ship(&state, speed),
        Event::StopMoving(direction) => stop_ship(&state, direction),
        Event::Shoot => player_shoot(&state, config),
        Event::RandomSample(sample) => GameState {
            random_value: sample,
            ..alien_shot(&state, sample, config)
        },
        Event::Play { endless } => play(&state, endless, config),
        Event::Tick(elapsed) => tick(&state, elapsed, config),
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

pub fn move_ship(state: &GameState, speed: f64) -> GameState {
    let mut next = state.clone();
    next.ship.xspeed = speed;
    next
}

/// Releasing a key only stops the ship if it is still moving that way,
/// so letting go of ← while → is held keeps the ship going right.
pub fn stop_ship(state: &GameState, direction: Direction) -> GameState {
    let moving_that_way = match direction {
        Direction::Left => state.ship.xspeed < 0.0,
        Direction::Right => state.ship.xspeed > 0.0,
    };
    if !moving_that_way {
        return state.clone();
    }
    move_ship(state, 0.0)
}

/// Fire a bullet from the tip of the ship.
pub fn player_shoot(state: &GameState, config: &GameConfig) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    let bullet = player_bullet(config).build(state, &state.ship);
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        obj_count: state.obj_count + 1,
        ..state.clone()
    }
}

/// A random sample below the number of live shooters makes one of them fire.
pub fn alien_shot(state: &GameState, sample: u32, config: &GameConfig) -> GameState {
    let shooters: Vec<_> = state
        .aliens
        .iter()
        .filter(|a| a.category == Category::Shooter)
        .collect();
    if sample as usize >= shooters.len() {
        return state.clone();
    }
    let index = (sample as u64).wrapping_mul(state.elapsed) % shooters.len() as u64;
    let bullet = enemy_bullet(config).build(state, shooters[index as usize]);
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        obj_count: state.obj_count + 1,
        ..state.clone()
    }
}

/// Full reset.  Everything still on the board goes to `exited`; the clock
/// and last random sample carry over since they belong to the host.
pub fn play(state: &GameState, endless: bool, config: &GameConfig) -> GameState {
    let mut exited = state.exited.clone();
    exited.extend(state.aliens.iter().cloned());
    exited.extend(state.bullets.iter().cloned());
    exited.extend(state.shields.iter().cloned());

    let fresh = GameState {
        elapsed: state.elapsed,
        random_value: state.random_value,
        exited,
        ..initial_state(config)
    };
    if !endless {
        log::info!("New campaign");
        return fresh;
    }

    log::info!("New endless run");
    let level_formation: VecDeque<_> = draw_formation(&fresh, config)
        .cloned()
        .into_iter()
        .collect();
    GameState {
        endless: true,
        level_formation,
        ..fresh
    }
}

// ── Per-tick simulation ─────────────────────────────────────────────────────

/// Advance the simulation to `elapsed`.
///
/// A finished game stays frozen until the next `Play`.  Otherwise the stages
/// run in a fixed order; collisions come before the life-based removals so
/// a body destroyed this tick lands in `exited` exactly once.
pub fn tick(state: &GameState, elapsed: u64, config: &GameConfig) -> GameState {
    let s = GameState {
        elapsed,
        ..state.clone()
    };
    if s.status != GameStatus::Playing {
        return freeze(&s, config);
    }

    let s = move_objects(&s, config);
    let s = handle_bullets(&s, config);
    let s = check_campaign_complete(&s, config);
    let s = check_new_level(&s, config);
    let s = resolve_collisions(&s, config);
    let s = reverse_aliens_at_bounds(&s, config);
    let s = check_loss(&s, config);
    let s = remove_dead(&s, Collection::Shields);
    remove_dead(&s, Collection::Aliens)
}

/// Move the ship and every alien by one step of their velocity.
pub fn move_objects(state: &GameState, config: &GameConfig) -> GameState {
    let size = config.canvas_size;
    GameState {
        ship: advance(&state.ship, size),
        aliens: state.aliens.iter().map(|a| advance(a, size)).collect(),
        ..state.clone()
    }
}

/// Retire bullets older than the expiry threshold and move the rest.
pub fn handle_bullets(state: &GameState, config: &GameConfig) -> GameState {
    let size = config.canvas_size;
    let (expired, active): (Vec<_>, Vec<_>) = state
        .bullets
        .iter()
        .cloned()
        .partition(|b| state.elapsed.saturating_sub(b.create_time) > config.bullets.expiry);

    let mut exited = state.exited.clone();
    exited.extend(expired);
    GameState {
        bullets: active.iter().map(|b| advance(b, size)).collect(),
        exited,
        ..state.clone()
    }
}
