//! Entity constructors.
//!
//! A `Spawner` or `BulletSpawner` is a preconfigured constructor: all the
//! category-specific numbers are fixed up front so callers only supply a
//! position (or an owner).  Ids come from the category name plus the
//! snapshot's object counter; whoever calls `build` must bump the counter
//! in the same transition.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::entities::{AlienKind, Body, Category, GameState};

/// Builds positioned bodies: aliens and shields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub category: Category,
    pub xspeed: f64,
    pub lives: u32,
    pub radius: f64,
}

impl Spawner {
    pub fn build(&self, state: &GameState, x: f64, y: f64) -> Body {
        Body {
            id: format!("{}{}", self.category.name(), state.obj_count),
            x,
            y,
            xspeed: self.xspeed,
            yspeed: 0.0,
            create_time: state.elapsed,
            category: self.category,
            radius: self.radius,
            lives: self.lives,
        }
    }
}

/// Builds bullets relative to the body that fired them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletSpawner {
    pub category: Category,
    pub yspeed: f64,
    /// Vertical distance between the owner's centre and the spawn point.
    pub start_offset: f64,
    pub radius: f64,
}

impl BulletSpawner {
    pub fn build(&self, state: &GameState, owner: &Body) -> Body {
        Body {
            id: format!("{}{}", self.category.name(), state.obj_count),
            x: owner.x,
            y: owner.y + self.start_offset,
            xspeed: 0.0,
            yspeed: self.yspeed,
            create_time: state.elapsed,
            category: self.category,
            radius: self.radius,
            lives: 1,
        }
    }
}

pub fn alien_spawner(config: &GameConfig, kind: AlienKind) -> Spawner {
    Spawner {
        category: kind.category(),
        xspeed: config.aliens.xspeed,
        lives: config.aliens.lives(kind),
        radius: config.aliens.radius,
    }
}

pub fn shield_spawner(config: &GameConfig) -> Spawner {
    Spawner {
        category: Category::Shield,
        xspeed: 0.0,
        lives: config.shield_lives,
        radius: config.aliens.radius,
    }
}

pub fn player_bullet(config: &GameConfig) -> BulletSpawner {
    BulletSpawner {
        category: Category::PlayerBullet,
        yspeed: -config.bullets.speed,
        start_offset: config.bullets.player_offset,
        radius: config.bullets.radius,
    }
}

pub fn enemy_bullet(config: &GameConfig) -> BulletSpawner {
    BulletSpawner {
        category: Category::EnemyBullet,
        yspeed: config.bullets.speed,
        start_offset: 0.0,
        radius: config.bullets.radius,
    }
}

/// A fresh ship at the bottom centre of the playfield.
pub fn create_ship(config: &GameConfig) -> Body {
    Body {
        id: Category::Ship.name().to_string(),
        x: config.canvas_size / 2.0,
        y: config.ship.start_y,
        xspeed: 0.0,
        yspeed: 0.0,
        create_time: 0,
        category: Category::Ship,
        radius: config.ship.radius,
        lives: config.ship.lives,
    }
}
