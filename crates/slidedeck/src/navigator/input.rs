//! Input normalization: keyboard, wheel and touch all reduce to [`Intent`].

use std::time::{Duration, Instant};

use tracing::trace;

use super::Intent;

pub const DEFAULT_WHEEL_THRESHOLD: f32 = 50.0;
pub const DEFAULT_WHEEL_COOLDOWN: Duration = Duration::from_millis(500);
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(350);

/// Tunables for input handling. All thresholds are in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    pub wheel_threshold: f32,
    pub wheel_cooldown: Duration,
    pub swipe_threshold: f32,
    pub transition_duration: Duration,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_cooldown: DEFAULT_WHEEL_COOLDOWN,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            transition_duration: DEFAULT_TRANSITION,
        }
    }
}

/// Keys the navigator cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowDown,
    Space,
    ArrowLeft,
    ArrowUp,
    Home,
    End,
    Other,
}

impl Key {
    pub fn intent(self) -> Option<Intent> {
        match self {
            Key::ArrowRight | Key::ArrowDown | Key::Space => Some(Intent::Next),
            Key::ArrowLeft | Key::ArrowUp => Some(Intent::Previous),
            Key::Home => Some(Intent::First),
            Key::End => Some(Intent::Last),
            Key::Other => None,
        }
    }
}

/// Turns a stream of wheel ticks into discrete steps.
///
/// Once a tick crosses the threshold, further ticks are swallowed until the
/// cooldown has elapsed, so one physical flick moves a single slide.
#[derive(Debug, Clone)]
pub struct WheelGate {
    threshold: f32,
    cooldown: Duration,
    locked_until: Option<Instant>,
}

impl WheelGate {
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            locked_until: None,
        }
    }

    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn feed(&mut self, delta_x: f32, delta_y: f32, now: Instant) -> Option<Intent> {
        if self.is_cooling_down(now) {
            trace!(delta_x, delta_y, "wheel tick swallowed by cooldown");
            return None;
        }

        let over_x = delta_x.abs() > self.threshold;
        let over_y = delta_y.abs() > self.threshold;
        if !over_x && !over_y {
            return None;
        }

        // The dominant axis decides the direction of a diagonal flick.
        let delta = if delta_y.abs() >= delta_x.abs() {
            delta_y
        } else {
            delta_x
        };

        self.locked_until = Some(now + self.cooldown);
        if delta > 0.0 {
            Some(Intent::Next)
        } else {
            Some(Intent::Previous)
        }
    }
}

/// Start and latest horizontal position of the touch in progress.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    start: f32,
    end: f32,
}

/// Horizontal swipe detection. Vertical travel is not considered.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    gesture: Option<Gesture>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            gesture: None,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.gesture = Some(Gesture { start: x, end: x });
    }

    pub fn track(&mut self, x: f32) {
        if let Some(g) = &mut self.gesture {
            g.end = x;
        }
    }

    #[cfg(test)]
    fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    /// Resolve the gesture into at most one intent and discard it.
    pub fn finish(&mut self) -> Option<Intent> {
        let g = self.gesture.take()?;
        let travel = g.start - g.end;
        if travel.abs() <= self.threshold {
            return None;
        }
        // Finger moved left: content follows it, so the next slide comes in.
        if travel > 0.0 {
            Some(Intent::Next)
        } else {
            Some(Intent::Previous)
        }
    }

    pub fn cancel(&mut self) {
        self.gesture = None;
    }
}
