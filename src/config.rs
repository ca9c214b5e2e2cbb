//! Static game configuration.
//!
//! Every tunable number lives here.  `GameConfig::default()` is the classic
//! game; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{AlienKind, Category, Collection, Formation};
use crate::error::ConfigError;
use crate::grid::{GridSpec, Spacing};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Horizontal speed while a direction key is held.
    pub speed: f64,
    pub radius: f64,
    pub start_y: f64,
    pub lives: u32,
    /// Where the ship is parked once the board is frozen.
    pub offscreen_y: f64,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            radius: 20.0,
            start_y: 550.0,
            lives: 3,
            offscreen_y: -700.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Vertical speed magnitude; player bullets go up, enemy bullets down.
    pub speed: f64,
    pub radius: f64,
    /// Ticks a bullet lives before it is force-removed.
    pub expiry: u64,
    /// Vertical spawn offset of player bullets relative to the ship.
    pub player_offset: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            speed: 7.0,
            radius: 3.0,
            expiry: 150,
            player_offset: -20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    pub radius: f64,
    pub xspeed: f64,
    pub basic_lives: u32,
    pub shooter_lives: u32,
    pub tank_lives: u32,
    /// Distance from either side wall that makes the swarm turn around.
    pub margin: f64,
    /// How far the swarm drops on every turn.
    pub drop_step: f64,
    /// Distance from the bottom edge that ends the game.
    pub bottom_margin: f64,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            xspeed: 1.5,
            basic_lives: 1,
            shooter_lives: 1,
            tank_lives: 2,
            margin: 50.0,
            drop_step: 15.0,
            bottom_margin: 20.0,
        }
    }
}

impl AlienConfig {
    pub fn lives(&self, kind: AlienKind) -> u32 {
        match kind {
            AlienKind::Basic => self.basic_lives,
            AlienKind::Shooter => self.shooter_lives,
            AlienKind::Tank => self.tank_lives,
        }
    }
}

/// Points for destroying each alien category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub basic: u64,
    pub shooter: u64,
    pub tank: u64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            basic: 1247,
            shooter: 3333,
            tank: 4451,
        }
    }
}

impl ScoreTable {
    pub fn reward(&self, category: Category) -> u64 {
        match category {
            Category::Basic => self.basic,
            Category::Shooter => self.shooter,
            Category::Tank => self.tank,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square playfield.
    pub canvas_size: f64,
    /// Wall-clock length of one tick in the interactive host.
    pub tick_ms: u64,
    /// Ticks between two random samples.
    pub random_interval: u64,
    /// Random samples are drawn from `0..random_range`.
    pub random_range: u32,
    pub rng_seed: u32,
    pub ship: ShipConfig,
    pub bullets: BulletConfig,
    pub aliens: AlienConfig,
    pub shield_lives: u32,
    /// Bonus per finished level, multiplied by the level number.
    pub level_bonus: u64,
    pub scores: ScoreTable,
    pub alien_grid: GridSpec,
    pub shield_grid: GridSpec,
    pub campaign: Vec<Formation>,
    pub endless_catalog: Vec<Formation>,
}

impl Default for GameConfig {
    fn default() -> Self {
        use AlienKind::{Basic, Shooter, Tank};

        Self {
            canvas_size: 600.0,
            tick_ms: 10,
            random_interval: 10,
            random_range: 100,
            rng_seed: crate::rng::DEFAULT_SEED,
            ship: ShipConfig::default(),
            bullets: BulletConfig::default(),
            aliens: AlienConfig::default(),
            shield_lives: 3,
            level_bonus: 2000,
            scores: ScoreTable::default(),
            alien_grid: GridSpec {
                row_offset: 35.0,
                column_offset: 35.0,
                vertical_start: 40.0,
                horizontal_start: 50.0,
                row_size: 10,
                target: Collection::Aliens,
                spacing: Spacing::Uniform,
            },
            shield_grid: GridSpec {
                row_offset: 25.0,
                column_offset: 0.0,
                vertical_start: 500.0,
                horizontal_start: 50.0,
                row_size: 12,
                target: Collection::Shields,
                spacing: Spacing::Clustered {
                    cluster: 3,
                    gap: 60.0,
                    lead: 20.0,
                },
            },
            campaign: vec![
                vec![Basic, Basic, Tank],
                vec![Basic, Tank, Shooter],
                vec![Basic, Shooter, Basic, Shooter, Tank],
            ],
            endless_catalog: vec![
                vec![Basic, Basic, Basic],
                vec![Shooter, Basic, Basic, Basic],
                vec![Tank, Shooter, Basic, Shooter, Shooter],
                vec![Basic, Shooter, Shooter, Shooter],
                vec![Basic, Shooter, Basic],
                vec![Basic; 8],
                vec![Shooter, Tank, Basic, Shooter, Shooter, Basic],
                vec![Tank, Tank, Shooter, Tank, Tank],
                vec![Shooter, Shooter, Shooter, Shooter, Shooter, Tank],
                vec![Tank, Tank, Tank, Tank, Shooter, Tank],
                vec![Shooter],
            ],
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the reducer cannot run safely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));

        if self.canvas_size <= 2.0 * self.aliens.margin {
            return invalid("canvas_size must exceed twice the alien margin");
        }
        if self.ship.radius <= 0.0 || self.bullets.radius <= 0.0 || self.aliens.radius <= 0.0 {
            return invalid("collision radii must be positive");
        }
        if self.random_range == 0 {
            return invalid("random_range must be positive");
        }
        if self.random_interval == 0 {
            return invalid("random_interval must be positive");
        }
        if self.alien_grid.row_size == 0 || self.shield_grid.row_size == 0 {
            return invalid("grid row_size must be positive");
        }
        if let Spacing::Clustered { cluster: 0, .. } = self.shield_grid.spacing {
            return invalid("shield cluster size must be positive");
        }
        if self.aliens.basic_lives == 0
            || self.aliens.shooter_lives == 0
            || self.aliens.tank_lives == 0
        {
            return invalid("alien lives must be positive");
        }
        if self.ship.lives == 0 {
            return invalid("ship lives must be positive");
        }
        if self.shield_lives == 0 {
            return invalid("shield lives must be positive");
        }
        if self.campaign.is_empty() {
            return invalid("campaign needs at least one formation");
        }
        if self.campaign.iter().any(|f| f.is_empty()) {
            return invalid("campaign formations must have at least one row");
        }
        if self.endless_catalog.is_empty() {
            return invalid("endless catalog needs at least one formation");
        }
        if self.endless_catalog.iter().any(|f| f.is_empty()) {
            return invalid("endless formations must have at least one row");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json_str(r#"{ "level_bonus": 10, "scores": { "tank": 4453 } }"#)
            .expect("config should parse");
        assert_eq!(cfg.level_bonus, 10);
        assert_eq!(cfg.scores.tank, 4453);
        assert_eq!(cfg.scores.basic, 1247);
        assert_eq!(cfg.campaign.len(), 3);
    }

    #[test]
    fn formations_parse_from_names() {
        let cfg = GameConfig::from_json_str(r#"{ "campaign": [["shooter", "tank"]] }"#)
            .expect("config should parse");
        assert_eq!(cfg.campaign, vec![vec![AlienKind::Shooter, AlienKind::Tank]]);
    }

    #[test]
    fn empty_endless_formation_rejected() {
        let err = GameConfig::from_json_str(r#"{ "endless_catalog": [["basic"], []] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn zero_life_ship_or_shields_rejected() {
        for text in [r#"{ "ship": { "lives": 0 } }"#, r#"{ "shield_lives": 0 }"#] {
            let err = GameConfig::from_json_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: got {err:?}");
        }
    }

    #[test]
    fn bad_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
