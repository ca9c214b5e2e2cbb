//! Space Invaders core.
//!
//! The game is a fold of discrete events over immutable snapshots:
//! `compute::reduce(&state, &event, &config)` always returns a brand-new
//! `GameState`.  Rendering and input live in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod levels;
pub mod rng;
pub mod stream;

pub use compute::{initial_state, reduce};
pub use config::GameConfig;
pub use entities::{Body, Category, Direction, Event, GameState, GameStatus};
pub use error::ConfigError;
