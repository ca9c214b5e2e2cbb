#![allow(dead_code)]

use space_invaders::entities::{Body, Category, GameState};
use space_invaders::{initial_state, GameConfig};

pub fn config() -> GameConfig {
    GameConfig::default()
}

/// Campaign start with nothing spawned yet.  Ship at (300, 550).
pub fn make_state() -> GameState {
    initial_state(&config())
}

/// A stationary body with the default radius and lives for its category.
pub fn body(id: &str, category: Category, x: f64, y: f64) -> Body {
    let cfg = config();
    let (radius, lives) = match category {
        Category::Ship => (cfg.ship.radius, cfg.ship.lives),
        Category::PlayerBullet | Category::EnemyBullet => (cfg.bullets.radius, 1),
        Category::Tank => (cfg.aliens.radius, cfg.aliens.tank_lives),
        Category::Shield => (cfg.aliens.radius, cfg.shield_lives),
        Category::Basic | Category::Shooter => (cfg.aliens.radius, 1),
    };
    Body {
        id: id.to_string(),
        x,
        y,
        xspeed: 0.0,
        yspeed: 0.0,
        create_time: 0,
        category,
        radius,
        lives,
    }
}

/// A state with one motionless alien far from everything, so ticks do not
/// trigger a level change.
pub fn parked_state() -> GameState {
    let mut s = make_state();
    s.aliens.push(body("alien900", Category::Basic, 300.0, 100.0));
    s.obj_count = 1000;
    s
}

pub fn ids(bodies: &[Body]) -> Vec<&str> {
    bodies.iter().map(|b| b.id.as_str()).collect()
}
