//! Entity storage.
//!
//! Bullets and bubbles live in `Pool`s that keep insertion order and tag each
//! entry with an `EntityId`.  Removal goes through ids rather than indices, so
//! a pass that collects matches first and removes afterwards can never hit a
//! stale slot.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::entities::{Aircraft, Bubble, Bullet, EntityId};

/// An ordered, id-tagged collection.
#[derive(Clone, Debug)]
pub struct Pool<T> {
    entries: Vec<(EntityId, T)>,
    next_id: u64,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its fresh id.
    pub fn push(&mut self, item: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, item));
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, item)| item)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, item)| (*id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(id, item)| (*id, item))
    }

    /// Iterate the entities without their ids.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, item)| item)
    }

    /// Keep only the entities for which `keep` returns true.  Order is kept.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|(_, item)| keep(item));
    }

    /// Remove every entity whose id is in `ids`; returns how many were removed.
    pub fn remove_ids(&mut self, ids: &HashSet<EntityId>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| !ids.contains(id));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entities.  The id counter keeps running.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Everything the renderer draws: the aircraft plus live bubbles and bullets.
#[derive(Clone, Debug)]
pub struct EntityStore {
    pub aircraft: Aircraft,
    pub bubbles: Pool<Bubble>,
    pub bullets: Pool<Bullet>,
}

impl EntityStore {
    /// Empty arena with the aircraft at its start position.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            aircraft: starting_aircraft(config),
            bubbles: Pool::new(),
            bullets: Pool::new(),
        }
    }

    /// Clear all projectiles and targets and recentre the aircraft.
    pub fn reset(&mut self, config: &GameConfig) {
        self.bubbles.clear();
        self.bullets.clear();
        self.aircraft = starting_aircraft(config);
    }
}

fn starting_aircraft(config: &GameConfig) -> Aircraft {
    Aircraft {
        x: config.aircraft_start_x(),
        y: config.aircraft_y(),
        width: config.aircraft_width,
        height: config.aircraft_height,
    }
}
