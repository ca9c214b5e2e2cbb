//! Game entity types.  Plain data; the rules live in `compute` and friends.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Ship,
    PlayerBullet,
    EnemyBullet,
    /// Plain alien, one hit.
    Basic,
    /// Alien that can return fire when a random sample selects it.
    Shooter,
    /// Armoured alien, takes several hits.
    Tank,
    Shield,
}

impl Category {
    /// Prefix used for entity ids.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Ship => "ship",
            Category::PlayerBullet => "player-bullet",
            Category::EnemyBullet => "enemy-bullet",
            Category::Basic => "alien",
            Category::Shooter => "shooter",
            Category::Tank => "tank",
            Category::Shield => "shield",
        }
    }

    pub fn is_alien(&self) -> bool {
        matches!(self, Category::Basic | Category::Shooter | Category::Tank)
    }
}

/// The alien constructors a level formation may name, one per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlienKind {
    Basic,
    Shooter,
    Tank,
}

impl AlienKind {
    pub fn category(&self) -> Category {
        match self {
            AlienKind::Basic => Category::Basic,
            AlienKind::Shooter => Category::Shooter,
            AlienKind::Tank => Category::Tank,
        }
    }
}

/// One level's enemy layout.  Row 0 is the row nearest the player.
pub type Formation = Vec<AlienKind>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Win,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed horizontal speed for a ship moving this way.
    pub fn signed(&self, speed: f64) -> f64 {
        match self {
            Direction::Left => -speed,
            Direction::Right => speed,
        }
    }
}

/// Which live collection of the snapshot a grid or cleanup targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Aliens,
    Bullets,
    Shields,
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// Any simulated object: ship, bullet, alien or shield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub xspeed: f64,
    pub yspeed: f64,
    /// Tick at which the body was created.
    pub create_time: u64,
    pub category: Category,
    pub radius: f64,
    /// Remaining hit points.
    pub lives: u32,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Discrete inputs folded into the game, in arrival order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Clock tick carrying the elapsed simulation time in ticks.
    Tick(u64),
    /// Set the ship's horizontal speed (signed).
    Move(f64),
    /// Release of a direction key.
    StopMoving(Direction),
    Shoot,
    /// A value sampled from the seeded generator, in `0..random_range`.
    RandomSample(u32),
    /// Full reset into the fixed campaign or endless mode.
    Play { endless: bool },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub elapsed: u64,
    pub ship: Body,
    pub aliens: Vec<Body>,
    pub bullets: Vec<Body>,
    pub shields: Vec<Body>,
    /// Bodies removed during the transition that produced this snapshot.
    /// Only the renderer reads it.
    pub exited: Vec<Body>,
    /// Seeds the next entity id.
    pub obj_count: u64,
    /// Formations not yet spawned.  In endless mode it holds the next draw.
    pub level_formation: VecDeque<Formation>,
    pub status: GameStatus,
    pub score: u64,
    pub level: u32,
    pub endless: bool,
    pub random_value: u32,
}

impl GameState {
    pub fn collection(&self, which: Collection) -> &[Body] {
        match which {
            Collection::Aliens => &self.aliens,
            Collection::Bullets => &self.bullets,
            Collection::Shields => &self.shields,
        }
    }

    /// Copy of `self` with `which` replaced by `bodies`.
    pub fn with_collection(&self, which: Collection, bodies: Vec<Body>) -> GameState {
        let mut next = self.clone();
        match which {
            Collection::Aliens => next.aliens = bodies,
            Collection::Bullets => next.bullets = bodies,
            Collection::Shields => next.shields = bodies,
        }
        next
    }

    /// Every live body, ship first.
    pub fn live_bodies(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.ship)
            .chain(self.aliens.iter())
            .chain(self.bullets.iter())
            .chain(self.shields.iter())
    }
}
