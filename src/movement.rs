/// Per-frame movement: aircraft steering, firing, projectile and target
/// motion, and culling of anything that has left the arena.

use crate::config::GameConfig;
use crate::entities::{Aircraft, Bullet};
use crate::input::Intents;
use crate::store::EntityStore;

/// Frames remaining before the next shot is allowed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FireCooldown(pub u32);

impl FireCooldown {
    pub fn ready(&self) -> bool {
        self.0 == 0
    }
}

/// Run one full movement step in the fixed order: aircraft, fire, bullets,
/// bubbles.
pub fn step(
    store: &mut EntityStore,
    intents: Intents,
    cooldown: &mut FireCooldown,
    config: &GameConfig,
) {
    steer_aircraft(&mut store.aircraft, intents, config);
    if let Some(bullet) = try_fire(&store.aircraft, intents, cooldown, config) {
        store.bullets.push(bullet);
    }
    advance_bullets(store, config);
    advance_bubbles(store, config);
}

/// Apply left/right intents.  Each direction is checked on its own and the
/// result is clamped to `[0, arena_width - aircraft_width]`.
pub fn steer_aircraft(aircraft: &mut Aircraft, intents: Intents, config: &GameConfig) {
    let max_x = config.aircraft_max_x();
    if intents.move_left && aircraft.x > 0.0 {
        aircraft.x = (aircraft.x - config.aircraft_step).max(0.0);
    }
    if intents.move_right && aircraft.x < max_x {
        aircraft.x = (aircraft.x + config.aircraft_step).min(max_x);
    }
}

/// Fire from the nose if the cooldown allows it.  The cooldown ticks down by
/// one every call whether or not fire is held.
pub fn try_fire(
    aircraft: &Aircraft,
    intents: Intents,
    cooldown: &mut FireCooldown,
    config: &GameConfig,
) -> Option<Bullet> {
    let mut fired = None;
    if intents.fire && cooldown.ready() {
        let bullet = Bullet {
            x: aircraft.center_x() - config.bullet_width / 2.0,
            y: aircraft.y - config.bullet_height / 2.0,
        };
        log::trace!("fire bullet at x={:.1}", bullet.x);
        fired = Some(bullet);
        cooldown.0 = config.fire_cooldown_frames;
    }
    cooldown.0 = cooldown.0.saturating_sub(1);
    fired
}

/// Move bullets up and drop those whose trailing edge is past the top.
pub fn advance_bullets(store: &mut EntityStore, config: &GameConfig) {
    for (_, bullet) in store.bullets.iter_mut() {
        bullet.y -= config.bullet_speed;
    }
    let height = config.bullet_height;
    store.bullets.retain(|b| b.y + height > 0.0);
}

/// Move bubbles down by their own speed and drop those fully below the arena.
pub fn advance_bubbles(store: &mut EntityStore, config: &GameConfig) {
    for (_, bubble) in store.bubbles.iter_mut() {
        bubble.y += bubble.speed;
    }
    let floor = config.arena_height;
    store.bubbles.retain(|b| b.y - b.radius < floor);
}
