/// Bubble spawning.  All randomness comes through the injected `rng` so
/// callers control determinism (tests pass a seeded `StdRng`).

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bubble, EntityId};
use crate::store::EntityStore;

/// Roll the per-frame spawn chance and, on success, drop one bubble in just
/// above the top edge.  There is no cap on live bubbles.
pub fn maybe_spawn_bubble(
    store: &mut EntityStore,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<EntityId> {
    if rng.gen::<f64>() >= config.spawn_probability {
        return None;
    }

    let bubble = random_bubble(config, rng);
    log::trace!(
        "spawn bubble x={:.1} r={:.1} speed={:.2}",
        bubble.x,
        bubble.radius,
        bubble.speed
    );
    Some(store.bubbles.push(bubble))
}

/// Build a bubble with randomised radius, fall speed and column.
pub fn random_bubble(config: &GameConfig, rng: &mut impl Rng) -> Bubble {
    let radius = config.bubble_min_radius + rng.gen::<f32>() * config.bubble_radius_jitter;
    let speed = config.bubble_min_speed + rng.gen::<f32>() * config.bubble_speed_jitter;
    // Keep the whole circle inside the side walls.
    let span = (config.arena_width - 2.0 * radius).max(0.0);
    let x = radius + rng.gen::<f32>() * span;

    Bubble {
        x,
        y: -radius,
        radius,
        speed,
    }
}
