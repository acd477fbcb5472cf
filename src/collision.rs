//! Bullet ↔ bubble collision.
//!
//! Two phases: `find_hits` scans the store without touching it, then
//! `resolve_collisions` removes every matched entity by id in one go.
//! Each bullet pops at most one bubble and each bubble is popped at most once.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::entities::{Bubble, Bullet, EntityId};
use crate::store::EntityStore;

/// A matched pair from one collision pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub bullet: EntityId,
    pub bubble: EntityId,
}

/// True when the bullet's centre point lies strictly inside the bubble.
pub fn bullet_hits_bubble(bullet: &Bullet, bubble: &Bubble, config: &GameConfig) -> bool {
    let dx = bullet.x + config.bullet_width / 2.0 - bubble.x;
    let dy = bullet.y - bubble.y;
    (dx * dx + dy * dy).sqrt() < bubble.radius
}

/// Collect hits, bullets outer and bubbles inner, both in store order.  The
/// first bubble that qualifies and is not already claimed wins.
pub fn find_hits(store: &EntityStore, config: &GameConfig) -> Vec<Hit> {
    let mut claimed: HashSet<EntityId> = HashSet::new();
    let mut hits = Vec::new();

    for (bullet_id, bullet) in store.bullets.iter() {
        let target = store
            .bubbles
            .iter()
            .find(|(bubble_id, bubble)| {
                !claimed.contains(bubble_id) && bullet_hits_bubble(bullet, bubble, config)
            })
            .map(|(bubble_id, _)| bubble_id);

        if let Some(bubble_id) = target {
            claimed.insert(bubble_id);
            hits.push(Hit {
                bullet: bullet_id,
                bubble: bubble_id,
            });
        }
    }

    hits
}

/// Remove every matched pair and return the number of bubbles destroyed,
/// which is the score to award.
pub fn resolve_collisions(store: &mut EntityStore, config: &GameConfig) -> u32 {
    let hits = find_hits(store, config);
    if hits.is_empty() {
        return 0;
    }

    let bullets: HashSet<EntityId> = hits.iter().map(|h| h.bullet).collect();
    let bubbles: HashSet<EntityId> = hits.iter().map(|h| h.bubble).collect();
    store.bullets.remove_ids(&bullets);
    let popped = store.bubbles.remove_ids(&bubbles);

    log::debug!("{} bubble(s) popped", popped);
    popped as u32
}
