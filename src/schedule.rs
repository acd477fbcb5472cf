//! The two periodic cadences that drive a match.
//!
//! Frames fire at display rate and never catch up: a late poll yields one
//! frame, not a burst.  The match timer fires once per second and does catch
//! up, one `SecondElapsed` per elapsed period, so match time stays honest
//! even if the loop stalls.

use std::time::{Duration, Instant};

use crate::controller::MatchEvent;

pub const ONE_SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
struct Cadence {
    period: Duration,
    next_due: Instant,
}

impl Cadence {
    fn new(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }
}

/// Frame and timer cadences, cancelled together.
#[derive(Clone, Debug)]
pub struct LoopSchedule {
    frame: Option<Cadence>,
    timer: Option<Cadence>,
}

impl LoopSchedule {
    /// Arm both cadences; the first frame is due one frame period after `now`.
    pub fn start(now: Instant, frame_period: Duration, timer_period: Duration) -> Self {
        Self {
            frame: Some(Cadence::new(now, frame_period)),
            timer: Some(Cadence::new(now, timer_period)),
        }
    }

    /// Frame period for a target rate.
    pub fn frame_period(frames_per_second: u32) -> Duration {
        Duration::from_secs(1) / frames_per_second.max(1)
    }

    /// Events due at `now`.  Timer events come first so a timeout is already
    /// applied when the frame in the same batch checks the phase.
    pub fn poll(&mut self, now: Instant) -> Vec<MatchEvent> {
        let mut due = Vec::new();

        if let Some(timer) = self.timer.as_mut() {
            while now >= timer.next_due {
                due.push(MatchEvent::SecondElapsed);
                timer.next_due += timer.period;
            }
        }

        if let Some(frame) = self.frame.as_mut() {
            if now >= frame.next_due {
                due.push(MatchEvent::Frame);
                frame.next_due = now + frame.period;
            }
        }

        due
    }

    /// Earliest instant at which `poll` can return something.
    pub fn next_due(&self) -> Option<Instant> {
        match (self.frame, self.timer) {
            (Some(f), Some(t)) => Some(f.next_due.min(t.next_due)),
            (Some(f), None) => Some(f.next_due),
            (None, Some(t)) => Some(t.next_due),
            (None, None) => None,
        }
    }

    /// Restart the one-second cadence from `now`, e.g. after a restart.
    /// Does nothing once cancelled.
    pub fn rearm_timer(&mut self, now: Instant) {
        if let Some(timer) = self.timer.as_mut() {
            timer.next_due = now + timer.period;
        }
    }

    /// Stop both cadences.  Returns whether anything was still running;
    /// calling it again is harmless.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.frame.is_some() || self.timer.is_some();
        self.frame = None;
        self.timer = None;
        was_active
    }

    pub fn is_cancelled(&self) -> bool {
        self.frame.is_none() && self.timer.is_none()
    }
}
