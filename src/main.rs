mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bubble_shooter::input::Key;
use bubble_shooter::schedule::{LoopSchedule, ONE_SECOND};
use bubble_shooter::{logging, Game, GameConfig, MatchEvent, Phase};

/// On terminals that never report key releases, a key counts as held for
/// this long after its last press/repeat event.  Long enough to bridge the
/// OS key-repeat delay.
const HOLD_WINDOW: Duration = Duration::from_millis(300);

/// Aircraft bubble shooter for the terminal
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding any of the default game constants
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for bubble spawning; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: Option<u32>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("could not load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.frames_per_second = fps;
    }
    config.validate()?;
    Ok(config)
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Terminal key → game key.  Arrows and A/D steer, space fires.
fn to_game_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::ArrowLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::ArrowRight),
        KeyCode::Char(' ') => Some(Key::Space),
        _ => None,
    }
}

/// Tracks which terminal keys are down and turns terminal events into
/// `KeyDown` / `KeyUp` events for the game.
///
/// Held state is kept per terminal key, since several of them map to one
/// game key (← and A both steer left).  A game key goes up only when the
/// last terminal key mapped to it is released.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are released on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` of silence.
struct HeldKeys {
    last_seen: HashMap<KeyCode, Instant>,
    hold_window: Option<Duration>,
}

/// Release timeout to use: none when the terminal reports releases.
fn hold_window_for(keyboard_enhanced: bool) -> Option<Duration> {
    if keyboard_enhanced {
        None
    } else {
        Some(HOLD_WINDOW)
    }
}

impl HeldKeys {
    fn new(hold_window: Option<Duration>) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    /// Whether any terminal key mapped to `key` is down.
    fn is_down(&self, key: Key) -> bool {
        self.last_seen
            .keys()
            .any(|code| to_game_key(code) == Some(key))
    }

    fn press<R: Rng>(&mut self, code: KeyCode, now: Instant, game: &mut Game<R>) {
        let Some(key) = to_game_key(&code) else {
            return;
        };
        let was_down = self.is_down(key);
        self.last_seen.insert(code, now);
        if !was_down {
            game.post(MatchEvent::KeyDown(key));
        }
    }

    fn release<R: Rng>(&mut self, code: KeyCode, game: &mut Game<R>) {
        let Some(key) = to_game_key(&code) else {
            return;
        };
        if self.last_seen.remove(&code).is_some() && !self.is_down(key) {
            game.post(MatchEvent::KeyUp(key));
        }
    }

    fn expire<R: Rng>(&mut self, now: Instant, game: &mut Game<R>) {
        let Some(window) = self.hold_window else {
            return;
        };
        let stale: Vec<KeyCode> = self
            .last_seen
            .iter()
            .filter(|&(_, &seen)| now.duration_since(seen) > window)
            .map(|(&code, _)| code)
            .collect();
        for code in stale {
            self.release(code, game);
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Outcome of feeding one terminal event to the game.
enum Control {
    Continue,
    Quit,
}

fn handle_event<R: Rng>(
    ev: Event,
    now: Instant,
    held: &mut HeldKeys,
    game: &mut Game<R>,
    schedule: &mut LoopSchedule,
) -> Control {
    let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
        return Control::Continue;
    };

    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Control::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Control::Quit;
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if kind == KeyEventKind::Press && game.phase() == Phase::Over =>
                {
                    game.post(MatchEvent::Restart);
                    schedule.rearm_timer(now);
                }
                _ => {}
            }
            held.press(code, now, game);
        }
        KeyEventKind::Release => {
            held.release(code, game);
        }
    }
    Control::Continue
}

/// Runs until the player quits.  The loop thread is the only owner of the
/// game: input, frames and the match timer all reach it as queued events.
fn game_loop<W: Write, R: Rng>(
    out: &mut W,
    game: &mut Game<R>,
    rx: &mpsc::Receiver<Event>,
    held: &mut HeldKeys,
    schedule: &mut LoopSchedule,
) -> std::io::Result<()> {
    display::render(out, &game.view())?;

    loop {
        // Sleep until the next cadence is due or input arrives.
        let wait = schedule
            .next_due()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO);
        let first = match rx.recv_timeout(wait) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        };

        let now = Instant::now();
        for ev in first.into_iter().chain(rx.try_iter()) {
            if let Control::Quit = handle_event(ev, now, held, game, schedule) {
                return Ok(());
            }
        }
        held.expire(now, game);

        let due = schedule.poll(now);
        let frame_due = due.contains(&MatchEvent::Frame);
        for event in due {
            game.post(event);
        }
        game.pump();

        if frame_due {
            display::render(out, &game.view())?;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.log_file.as_deref()).context("could not open log file")?;

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Writing the flags succeeds on any Unix terminal, so ask the terminal
    // first; it must be answered before the input thread starts reading.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("Keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut game = Game::new(config, rng);
    let frame_period = LoopSchedule::frame_period(game.config().frames_per_second);
    let mut schedule = LoopSchedule::start(Instant::now(), frame_period, ONE_SECOND);
    let mut held = HeldKeys::new(hold_window_for(keyboard_enhanced));

    let result = game_loop(&mut out, &mut game, &rx, &mut held, &mut schedule);

    // Tear down both cadences and the game before the terminal.
    schedule.cancel();
    game.dispose();

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> Game<StdRng> {
        let config = GameConfig {
            spawn_probability: 0.0,
            ..GameConfig::default()
        };
        Game::new(config, StdRng::seed_from_u64(42))
    }

    fn run_frames(game: &mut Game<StdRng>, n: usize) {
        for _ in 0..n {
            game.post(MatchEvent::Frame);
        }
        game.pump();
    }

    #[test]
    fn classic_terminal_tap_expires_after_silence() {
        let mut game = quiet_game();
        let mut held = HeldKeys::new(hold_window_for(false));
        let t0 = Instant::now();

        held.press(KeyCode::Left, t0, &mut game);
        game.pump();
        assert!(game.keys().is_held(Key::ArrowLeft));

        // No release event ever arrives on these terminals.
        held.expire(t0 + Duration::from_secs(10), &mut game);
        run_frames(&mut game, 30);

        assert!(!game.keys().is_held(Key::ArrowLeft));
        assert_eq!(game.store().aircraft.x, game.config().aircraft_start_x());
    }

    #[test]
    fn repeats_keep_a_key_alive_on_classic_terminals() {
        let mut game = quiet_game();
        let mut held = HeldKeys::new(hold_window_for(false));
        let t0 = Instant::now();

        held.press(KeyCode::Char(' '), t0, &mut game);
        held.press(KeyCode::Char(' '), t0 + Duration::from_millis(250), &mut game);
        held.expire(t0 + Duration::from_millis(400), &mut game);
        game.pump();

        assert!(game.keys().is_held(Key::Space));
    }

    #[test]
    fn enhanced_terminal_holds_until_release() {
        let mut game = quiet_game();
        let mut held = HeldKeys::new(hold_window_for(true));
        let t0 = Instant::now();

        held.press(KeyCode::Right, t0, &mut game);
        held.expire(t0 + Duration::from_secs(10), &mut game);
        game.pump();
        assert!(game.keys().is_held(Key::ArrowRight));

        held.release(KeyCode::Right, &mut game);
        game.pump();
        assert!(!game.keys().is_held(Key::ArrowRight));
    }

    #[test]
    fn aliased_keys_release_only_when_both_are_up() {
        let mut game = quiet_game();
        let mut held = HeldKeys::new(hold_window_for(true));
        let t0 = Instant::now();

        held.press(KeyCode::Left, t0, &mut game);
        held.press(KeyCode::Char('a'), t0, &mut game);
        assert_eq!(game.pump(), 1); // one KeyDown for the shared game key

        held.release(KeyCode::Left, &mut game);
        game.pump();
        assert!(game.keys().is_held(Key::ArrowLeft));

        held.release(KeyCode::Char('a'), &mut game);
        game.pump();
        assert!(!game.keys().is_held(Key::ArrowLeft));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut game = quiet_game();
        let mut held = HeldKeys::new(hold_window_for(false));

        held.press(KeyCode::Char('x'), Instant::now(), &mut game);
        held.release(KeyCode::Char('x'), &mut game);

        assert_eq!(game.pending(), 0);
    }
}
