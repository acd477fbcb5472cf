use bubble_shooter::config::GameConfig;
use bubble_shooter::entities::{Bubble, Bullet, Phase};
use bubble_shooter::input::Key;
use bubble_shooter::{Game, MatchEvent};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A game with spawning switched off so scenarios stay fully scripted.
fn quiet_game() -> Game<StdRng> {
    let config = GameConfig {
        spawn_probability: 0.0,
        ..GameConfig::default()
    };
    Game::new(config, StdRng::seed_from_u64(42))
}

fn run_seconds(game: &mut Game<StdRng>, n: u32) {
    for _ in 0..n {
        game.post(MatchEvent::SecondElapsed);
    }
    game.pump();
}

/// Put a stationary bubble and a bullet that reaches its centre next frame.
fn stage_hit(game: &mut Game<StdRng>) {
    let store = game.store_mut();
    store.bubbles.push(Bubble { x: 200.0, y: 300.0, radius: 20.0, speed: 0.0 });
    store.bullets.push(Bullet { x: 196.0, y: 312.0 });
}

// ── Start ─────────────────────────────────────────────────────────────────────

#[test]
fn new_game_is_running_with_full_clock() {
    let game = quiet_game();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.time_left(), 60);
    assert_eq!(game.store().aircraft.x, 430.0);
}

// ── Event queue ───────────────────────────────────────────────────────────────

#[test]
fn posted_events_wait_for_pump() {
    let mut game = quiet_game();
    game.post(MatchEvent::KeyDown(Key::ArrowLeft));
    game.post(MatchEvent::Frame);
    assert_eq!(game.pending(), 2);
    assert_eq!(game.store().aircraft.x, 430.0);

    assert_eq!(game.pump(), 2);
    assert_eq!(game.pending(), 0);
    assert_eq!(game.store().aircraft.x, 423.0);
}

#[test]
fn key_events_drive_intents() {
    let mut game = quiet_game();
    game.dispatch(MatchEvent::KeyDown(Key::ArrowRight));
    game.dispatch(MatchEvent::Frame);
    game.dispatch(MatchEvent::KeyUp(Key::ArrowRight));
    game.dispatch(MatchEvent::Frame);
    assert_eq!(game.store().aircraft.x, 437.0);
}

#[test]
fn holding_fire_respects_cooldown() {
    let mut game = quiet_game();
    game.dispatch(MatchEvent::KeyDown(Key::Space));
    for _ in 0..14 {
        game.post(MatchEvent::Frame);
    }
    game.pump();
    assert_eq!(game.store().bullets.len(), 1);
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[test]
fn hit_during_frame_scores() {
    let mut game = quiet_game();
    stage_hit(&mut game);
    game.dispatch(MatchEvent::Frame);
    assert_eq!(game.score(), 1);
    assert!(game.store().bubbles.is_empty());
    assert!(game.store().bullets.is_empty());
    assert_eq!(game.frame(), 1);
}

#[test]
fn frames_spawn_bubbles_with_certain_probability() {
    let config = GameConfig {
        spawn_probability: 1.0,
        ..GameConfig::default()
    };
    let mut game = Game::new(config, StdRng::seed_from_u64(7));
    for _ in 0..10 {
        game.post(MatchEvent::Frame);
    }
    game.pump();
    assert_eq!(game.store().bubbles.len(), 10);
}

#[test]
fn same_seed_same_match() {
    let config = GameConfig {
        spawn_probability: 0.3,
        ..GameConfig::default()
    };
    let mut a = Game::new(config.clone(), StdRng::seed_from_u64(9));
    let mut b = Game::new(config, StdRng::seed_from_u64(9));
    for _ in 0..120 {
        a.post(MatchEvent::Frame);
        b.post(MatchEvent::Frame);
    }
    a.pump();
    b.pump();
    let xa: Vec<_> = a.store().bubbles.values().cloned().collect();
    let xb: Vec<_> = b.store().bubbles.values().cloned().collect();
    assert_eq!(xa, xb);
}

// ── Timer ─────────────────────────────────────────────────────────────────────

#[test]
fn sixty_seconds_end_the_match() {
    let mut game = quiet_game();
    run_seconds(&mut game, 59);
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.time_left(), 1);

    run_seconds(&mut game, 1);
    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.time_left(), 0);
}

#[test]
fn extra_seconds_after_timeout_change_nothing() {
    let mut game = quiet_game();
    run_seconds(&mut game, 75);
    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.time_left(), 0);
}

#[test]
fn timeout_is_seen_by_the_next_frame() {
    let mut game = quiet_game();
    game.store_mut().bullets.push(Bullet { x: 100.0, y: 300.0 });
    game.dispatch(MatchEvent::KeyDown(Key::ArrowLeft));

    for _ in 0..60 {
        game.post(MatchEvent::SecondElapsed);
    }
    game.post(MatchEvent::Frame);
    game.pump();

    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.store().bullets.values().next().map(|b| b.y), Some(300.0));
    assert_eq!(game.store().aircraft.x, 430.0);
    assert_eq!(game.frame(), 0);
}

#[test]
fn frames_after_game_over_are_ignored() {
    let mut game = quiet_game();
    run_seconds(&mut game, 60);
    stage_hit(&mut game);
    game.dispatch(MatchEvent::Frame);
    assert_eq!(game.score(), 0);
    assert_eq!(game.store().bubbles.len(), 1);
}

// ── Restart ───────────────────────────────────────────────────────────────────

#[test]
fn restart_after_game_over_resets_everything() {
    let mut game = quiet_game();
    for _ in 0..5 {
        stage_hit(&mut game);
        game.dispatch(MatchEvent::Frame);
    }
    game.dispatch(MatchEvent::KeyDown(Key::ArrowRight));
    for _ in 0..10 {
        game.post(MatchEvent::Frame);
    }
    game.post(MatchEvent::KeyUp(Key::ArrowRight));
    game.pump();
    run_seconds(&mut game, 60);
    for x in [100.0, 200.0, 300.0] {
        game.store_mut()
            .bubbles
            .push(Bubble { x, y: 50.0, radius: 15.0, speed: 1.0 });
    }

    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.score(), 5);
    assert_eq!(game.time_left(), 0);
    assert_eq!(game.store().bubbles.len(), 3);

    game.dispatch(MatchEvent::Restart);

    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.time_left(), 60);
    assert!(game.store().bubbles.is_empty());
    assert!(game.store().bullets.is_empty());
    assert_eq!(game.store().aircraft.x, 430.0);
    assert_eq!(game.store().aircraft.y, 550.0);
    assert!(game.cooldown().ready());
}

#[test]
fn restart_is_applied_between_frames_only() {
    let mut game = quiet_game();
    game.dispatch(MatchEvent::KeyDown(Key::ArrowLeft));
    game.post(MatchEvent::Frame);
    game.post(MatchEvent::Restart);
    game.post(MatchEvent::Frame);
    game.pump();
    // One frame after a full reset, not a mix of both.
    assert_eq!(game.store().aircraft.x, 423.0);
    assert_eq!(game.frame(), 1);
}

#[test]
fn rapid_restarts_are_harmless() {
    let mut game = quiet_game();
    for _ in 0..100 {
        game.post(MatchEvent::Restart);
    }
    game.pump();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.time_left(), 60);
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[test]
fn dispose_twice_is_harmless_and_freezes_state() {
    let mut game = quiet_game();
    game.post(MatchEvent::Frame);
    game.dispose();
    game.dispose();

    assert!(game.is_disposed());
    assert_eq!(game.pending(), 0);

    game.post(MatchEvent::KeyDown(Key::ArrowLeft));
    game.post(MatchEvent::Frame);
    game.post(MatchEvent::SecondElapsed);
    assert_eq!(game.pump(), 0);
    assert_eq!(game.time_left(), 60);
    assert_eq!(game.frame(), 0);
}

#[test]
fn view_mirrors_match_state() {
    let mut game = quiet_game();
    stage_hit(&mut game);
    game.dispatch(MatchEvent::Frame);
    run_seconds(&mut game, 3);

    let view = game.view();
    assert_eq!(view.score, 1);
    assert_eq!(view.time_left, 57);
    assert_eq!(view.phase, Phase::Running);
    assert_eq!(view.arena_width, 900.0);
    assert_eq!(view.bubbles().count(), 0);
    assert_eq!(view.aircraft().x, 430.0);
}
