/// All game entity types — pure data, no logic.

use serde::{Deserialize, Serialize};

/// Stable identity of a bullet or bubble.  Allocated from a per-pool counter
/// and never reused, so it stays valid across removals and restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Over,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The player's aircraft.  `x` is the left edge, `y` the top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Aircraft {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aircraft {
    /// Horizontal centre, where bullets leave the nose.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

// ── Projectiles & targets ─────────────────────────────────────────────────────

/// A player bullet.  `x` is the left edge of the 8-wide body; `y` is the
/// trailing (bottom) edge, the tip sits one bullet-height above it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

/// A falling circular target.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    /// Centre, horizontal.
    pub x: f32,
    /// Centre, vertical.
    pub y: f32,
    pub radius: f32,
    /// Pixels fallen per frame.
    pub speed: f32,
}

// ── Match bookkeeping ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct MatchState {
    pub score: u32,
    /// Whole seconds remaining, never negative.
    pub time_left: u32,
    pub phase: Phase,
}

impl MatchState {
    pub fn new(match_seconds: u32) -> Self {
        Self {
            score: 0,
            time_left: match_seconds,
            phase: Phase::Running,
        }
    }
}
