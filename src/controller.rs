//! Match controller: the single owner of all simulation state.
//!
//! Everything that changes the game arrives as a `MatchEvent` and is applied
//! by `pump`, in the order it was posted.  The one-second timer does not
//! flip flags directly; it posts `SecondElapsed` like any other event, so the
//! ordering between timeouts and frames is whatever order the events were
//! queued in.

use std::collections::VecDeque;

use rand::Rng;

use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::entities::{MatchState, Phase};
use crate::input::{Key, KeyState};
use crate::movement::{self, FireCooldown};
use crate::render::FrameView;
use crate::spawner::maybe_spawn_bubble;
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// One animation frame is due.
    Frame,
    /// One second of match time has passed.
    SecondElapsed,
    Restart,
}

/// The simulation context.  Constructed once, reset by `Restart`, torn down
/// by `dispose`.
pub struct Game<R: Rng> {
    config: GameConfig,
    store: EntityStore,
    state: MatchState,
    cooldown: FireCooldown,
    keys: KeyState,
    rng: R,
    queue: VecDeque<MatchEvent>,
    frame: u64,
    disposed: bool,
}

impl<R: Rng> Game<R> {
    /// Start a fresh match.
    pub fn new(config: GameConfig, rng: R) -> Self {
        log::info!(
            "Match started: {}s on a {}x{} arena",
            config.match_seconds,
            config.arena_width,
            config.arena_height
        );
        Self {
            store: EntityStore::new(&config),
            state: MatchState::new(config.match_seconds),
            cooldown: FireCooldown::default(),
            keys: KeyState::new(),
            rng,
            queue: VecDeque::new(),
            frame: 0,
            disposed: false,
            config,
        }
    }

    // ── Event intake ──────────────────────────────────────────────────────────

    /// Queue an event for the next `pump`.  Ignored after `dispose`.
    pub fn post(&mut self, event: MatchEvent) {
        if !self.disposed {
            self.queue.push_back(event);
        }
    }

    /// Apply every queued event in order; returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.queue.pop_front() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Post one event and apply the queue immediately.
    pub fn dispatch(&mut self, event: MatchEvent) -> usize {
        self.post(event);
        self.pump()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn apply(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::KeyDown(key) => self.keys.key_down(key),
            MatchEvent::KeyUp(key) => self.keys.key_up(key),
            MatchEvent::Frame => self.run_frame(),
            MatchEvent::SecondElapsed => self.count_down(),
            MatchEvent::Restart => self.restart(),
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────────────

    /// Input → movement → collision → spawn, only while the match is running.
    fn run_frame(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        let intents = self.keys.intents();
        movement::step(&mut self.store, intents, &mut self.cooldown, &self.config);
        let popped = resolve_collisions(&mut self.store, &self.config);
        self.state.score += popped;
        maybe_spawn_bubble(&mut self.store, &self.config, &mut self.rng);
        self.frame += 1;
    }

    fn count_down(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        if self.state.time_left <= 1 {
            self.state.time_left = 0;
            self.state.phase = Phase::Over;
            log::info!("Time up! Final score: {}", self.state.score);
        } else {
            self.state.time_left -= 1;
            log::debug!("{}s left, score {}", self.state.time_left, self.state.score);
        }
    }

    /// Reset everything in one step; no frame can see a partial reset since
    /// frames are applied by the same `pump`.
    fn restart(&mut self) {
        self.state = MatchState::new(self.config.match_seconds);
        self.store.reset(&self.config);
        self.cooldown = FireCooldown::default();
        self.frame = 0;
        log::info!("Match restarted");
    }

    /// Tear down: drop pending events and all entities.  Later events are
    /// ignored.  Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.queue.clear();
        self.store.bubbles.clear();
        self.store.bullets.clear();
        self.keys.release_all();
        log::info!("Game disposed after {} frames", self.frame);
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_left(&self) -> u32 {
        self.state.time_left
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Direct store access for setting up scenarios.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cooldown(&self) -> FireCooldown {
        self.cooldown
    }

    /// Frames simulated since the match (re)started.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Snapshot for the renderer.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            bullet_width: self.config.bullet_width,
            bullet_height: self.config.bullet_height,
            store: &self.store,
            score: self.state.score,
            time_left: self.state.time_left,
            phase: self.state.phase,
        }
    }
}
