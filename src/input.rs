/// Key tracking and per-frame intents.
///
/// Key events arrive asynchronously and only flip a held flag.  Once per
/// frame the simulation asks for the `Intents` implied by whatever is held
/// at that moment; nothing about earlier frames is remembered.

use std::collections::HashMap;

/// Logical key identifiers the game understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Char(char),
}

/// What the player wants to do this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Live held-set: key → currently pressed.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
    held: HashMap<Key, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.insert(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Forget every key, e.g. when the terminal loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Intents for the current frame.  Left and right are independent, so
    /// holding both yields both (and they cancel out in movement).
    pub fn intents(&self) -> Intents {
        Intents {
            move_left: self.is_held(Key::ArrowLeft),
            move_right: self.is_held(Key::ArrowRight),
            fire: self.is_held(Key::Space),
        }
    }
}
