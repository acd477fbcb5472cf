//! Aircraft bubble shooter.
//!
//! Core modules:
//! - `store`, `spawner`, `input`, `movement`, `collision`: the per-frame simulation
//! - `controller`: match lifecycle and the event queue that drives it
//! - `schedule`: frame and one-second cadences
//! - `render`: frame snapshot and vector line art for renderers
//! - `config`, `error`, `logging`: tunables, edge errors, log setup

pub mod collision;
pub mod config;
pub mod controller;
pub mod entities;
pub mod error;
pub mod input;
pub mod logging;
pub mod movement;
pub mod render;
pub mod schedule;
pub mod spawner;
pub mod store;

pub use config::GameConfig;
pub use controller::{Game, MatchEvent};
pub use entities::Phase;
pub use error::GameError;
