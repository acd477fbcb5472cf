//! Tunable game constants.
//!
//! The defaults reproduce the classic pacing (900×600 arena, 60 second
//! match, 3% spawn chance per frame).  A JSON file may override any subset
//! of fields; missing fields fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Aircraft ===
    pub aircraft_width: f32,
    pub aircraft_height: f32,
    /// Gap between the aircraft and the bottom edge.
    pub aircraft_bottom_margin: f32,
    /// Horizontal pixels per frame while a direction is held.
    pub aircraft_step: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Upward pixels per frame.
    pub bullet_speed: f32,
    /// Frames between shots while fire is held.
    pub fire_cooldown_frames: u32,

    // === Bubbles ===
    pub bubble_min_radius: f32,
    pub bubble_radius_jitter: f32,
    pub bubble_min_speed: f32,
    pub bubble_speed_jitter: f32,
    /// Chance per frame that a new bubble appears.
    pub spawn_probability: f64,

    // === Match ===
    pub match_seconds: u32,
    pub frames_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 900.0,
            arena_height: 600.0,

            aircraft_width: 40.0,
            aircraft_height: 40.0,
            aircraft_bottom_margin: 10.0,
            aircraft_step: 7.0,

            bullet_width: 8.0,
            bullet_height: 16.0,
            bullet_speed: 12.0,
            fire_cooldown_frames: 15,

            bubble_min_radius: 15.0,
            bubble_radius_jitter: 10.0,
            bubble_min_speed: 1.0,
            bubble_speed_jitter: 1.5,
            spawn_probability: 0.03,

            match_seconds: 60,
            frames_per_second: 60,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: GameConfig =
            serde_json::from_str(&json).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("aircraft_width", self.aircraft_width),
            ("aircraft_height", self.aircraft_height),
            ("aircraft_step", self.aircraft_step),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("bullet_speed", self.bullet_speed),
            ("bubble_min_radius", self.bubble_min_radius),
            ("bubble_min_speed", self.bubble_min_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("aircraft_bottom_margin", self.aircraft_bottom_margin),
            ("bubble_radius_jitter", self.bubble_radius_jitter),
            ("bubble_speed_jitter", self.bubble_speed_jitter),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(invalid(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        if self.aircraft_width > self.arena_width {
            return Err(invalid("aircraft is wider than the arena".to_string()));
        }
        if self.aircraft_height + self.aircraft_bottom_margin > self.arena_height {
            return Err(invalid("aircraft does not fit the arena height".to_string()));
        }
        if 2.0 * self.max_bubble_radius() > self.arena_width {
            return Err(invalid("largest bubble is wider than the arena".to_string()));
        }
        if self.match_seconds == 0 {
            return Err(invalid("match_seconds must be at least 1".to_string()));
        }
        if self.frames_per_second == 0 {
            return Err(invalid("frames_per_second must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn max_bubble_radius(&self) -> f32 {
        self.bubble_min_radius + self.bubble_radius_jitter
    }

    /// Largest legal aircraft x.
    pub fn aircraft_max_x(&self) -> f32 {
        self.arena_width - self.aircraft_width
    }

    /// Aircraft x at match start: horizontally centred.
    pub fn aircraft_start_x(&self) -> f32 {
        self.arena_width / 2.0 - self.aircraft_width / 2.0
    }

    /// Fixed aircraft y.
    pub fn aircraft_y(&self) -> f32 {
        self.arena_height - self.aircraft_height - self.aircraft_bottom_margin
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidConfig(msg)
}
