//! Slide navigation state machine.
//!
//! The [`Navigator`] owns the current slide index and the direction of the
//! most recent move. Keyboard, wheel and touch input are normalized into
//! [`Intent`]s and applied here; nothing else mutates the index.

pub mod input;
pub mod scope;
pub mod transition;

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::DeckError;

use input::{InputSettings, Key, SwipeTracker, WheelGate};
use transition::{ActiveTransition, ViewPhase};

/// Sign of the most recent navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    pub fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Self::Forward,
            std::cmp::Ordering::Less => Self::Backward,
            std::cmp::Ordering::Equal => Self::Still,
        }
    }

    pub fn signum(self) -> i8 {
        match self {
            Self::Backward => -1,
            Self::Still => 0,
            Self::Forward => 1,
        }
    }
}

/// A single navigation request, whatever input produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    GoTo(usize),
    First,
    Last,
}

pub struct Navigator {
    current: usize,
    total: usize,
    direction: Direction,
    transition: Option<ActiveTransition>,
    transition_duration: Duration,
    wheel: WheelGate,
    swipe: SwipeTracker,
}

impl Navigator {
    /// A navigator over `total` slides, mounted on the first one.
    pub fn new(total: usize) -> Result<Self, DeckError> {
        if total == 0 {
            return Err(DeckError::EmptyDeck);
        }
        let settings = InputSettings::default();
        Ok(Self {
            current: 0,
            total,
            direction: Direction::Still,
            transition: None,
            transition_duration: settings.transition_duration,
            wheel: WheelGate::new(settings.wheel_threshold, settings.wheel_cooldown),
            swipe: SwipeTracker::new(settings.swipe_threshold),
        })
    }

    pub fn with_settings(mut self, settings: &InputSettings) -> Self {
        self.transition_duration = settings.transition_duration;
        self.wheel = WheelGate::new(settings.wheel_threshold, settings.wheel_cooldown);
        self.swipe = SwipeTracker::new(settings.swipe_threshold);
        self
    }

    /// Mount on `index` instead of the first slide, clamped to the deck.
    /// This is not a navigation: no transition runs and direction stays still.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.current = index.min(self.total - 1);
        self.direction = Direction::Still;
        self.transition = None;
        self
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn total_slides(&self) -> usize {
        self.total
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.total
    }

    /// Filled fraction of the progress bar, `(current + 1) / total`.
    pub fn progress(&self) -> f32 {
        (self.current + 1) as f32 / self.total as f32
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.total {
            self.move_to(self.current + 1, Direction::Forward);
        } else {
            trace!(index = self.current, "next ignored at last slide");
        }
    }

    pub fn previous(&mut self) {
        if self.current > 0 {
            self.move_to(self.current - 1, Direction::Backward);
        } else {
            trace!("previous ignored at first slide");
        }
    }

    /// Jump to `index`. Indices outside the deck are ignored.
    pub fn go_to_slide(&mut self, index: usize) {
        if index >= self.total {
            debug!(index, total = self.total, "ignoring out-of-range jump");
            return;
        }
        self.move_to(index, Direction::between(self.current, index));
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::GoTo(index) => self.go_to_slide(index),
            Intent::First => self.go_to_slide(0),
            Intent::Last => self.go_to_slide(self.total - 1),
        }
    }

    fn move_to(&mut self, index: usize, direction: Direction) {
        debug!(from = self.current, to = index, ?direction, "navigate");
        // Any in-flight transition is replaced, never queued.
        self.transition = Some(ActiveTransition::new(
            self.current,
            index,
            direction,
            self.transition_duration,
        ));
        self.direction = direction;
        self.current = index;
    }

    /// Map a key press. Returns true when the key belongs to the navigator,
    /// in which case the host must not apply its own default for it.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match key.intent() {
            Some(intent) => {
                self.apply(intent);
                true
            }
            None => false,
        }
    }

    /// Feed one wheel/trackpad tick. Positive deltas point forward.
    pub fn handle_wheel(&mut self, delta_x: f32, delta_y: f32, now: Instant) -> Option<Intent> {
        let intent = self.wheel.feed(delta_x, delta_y, now)?;
        self.apply(intent);
        Some(intent)
    }

    pub fn touch_start(&mut self, x: f32) {
        self.swipe.begin(x);
    }

    pub fn touch_move(&mut self, x: f32) {
        self.swipe.track(x);
    }

    pub fn touch_end(&mut self) -> Option<Intent> {
        let intent = self.swipe.finish()?;
        self.apply(intent);
        Some(intent)
    }

    pub fn touch_cancel(&mut self) {
        self.swipe.cancel();
    }

    #[cfg(test)]
    pub fn transition(&self) -> Option<&ActiveTransition> {
        self.transition.as_ref()
    }

    /// Drop the transition once it has run its course. Returns whether one
    /// is still animating at `now`.
    pub fn settle(&mut self, now: Instant) -> bool {
        if self.transition.as_ref().is_some_and(|t| t.is_complete_at(now)) {
            self.transition = None;
        }
        self.transition.is_some()
    }

    /// Views that should be painted at `now`, with their phase.
    pub fn visible_views(&self, now: Instant) -> Vec<(usize, ViewPhase, f32)> {
        match &self.transition {
            Some(t) if !t.is_complete_at(now) => t.phases(now),
            _ => vec![(self.current, ViewPhase::Active, 1.0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_slides_is_rejected() {
        assert!(matches!(Navigator::new(0), Err(DeckError::EmptyDeck)));
    }

    #[test]
    fn starts_at_first_slide() {
        let nav = Navigator::new(3).unwrap();
        assert_eq!(nav.current_slide(), 0);
        assert_eq!(nav.direction(), Direction::Still);
        assert_eq!(nav.total_slides(), 3);
        assert!(nav.transition().is_none());
    }

    #[test]
    fn starting_slide_mounts_without_transition() {
        let nav = Navigator::new(12).unwrap().starting_at(4);
        assert_eq!(nav.current_slide(), 4);
        assert_eq!(nav.direction(), Direction::Still);
        assert!(nav.transition().is_none());
        assert_eq!(
            nav.visible_views(Instant::now()),
            vec![(4, ViewPhase::Active, 1.0)]
        );

        let clamped = Navigator::new(3).unwrap().starting_at(99);
        assert_eq!(clamped.current_slide(), 2);
        assert!(clamped.is_last());
    }

    #[test]
    fn settings_reach_the_input_normalizers() {
        let settings = InputSettings {
            wheel_threshold: 10.0,
            ..InputSettings::default()
        };
        let mut nav = Navigator::new(3).unwrap().with_settings(&settings);
        assert_eq!(nav.handle_wheel(0.0, 20.0, Instant::now()), Some(Intent::Next));
        assert_eq!(nav.current_slide(), 1);
    }

    #[test]
    fn next_at_last_slide_is_noop() {
        let mut nav = Navigator::new(2).unwrap();
        nav.next();
        assert_eq!(nav.current_slide(), 1);
        nav.next();
        assert_eq!(nav.current_slide(), 1);
        assert_eq!(nav.direction(), Direction::Forward);
    }

    #[test]
    fn previous_at_first_slide_is_noop() {
        let mut nav = Navigator::new(4).unwrap();
        nav.previous();
        assert_eq!(nav.current_slide(), 0);
        assert_eq!(nav.direction(), Direction::Still);
        assert!(nav.transition().is_none());
    }

    #[test]
    fn out_of_range_jump_changes_nothing() {
        let mut nav = Navigator::new(5).unwrap();
        nav.next();
        nav.go_to_slide(5);
        nav.go_to_slide(usize::MAX);
        assert_eq!(nav.current_slide(), 1);
        assert_eq!(nav.direction(), Direction::Forward);
    }

    #[test]
    fn jump_sets_direction_from_sign() {
        let mut nav = Navigator::new(6).unwrap();
        nav.go_to_slide(4);
        assert_eq!((nav.current_slide(), nav.direction()), (4, Direction::Forward));
        nav.go_to_slide(1);
        assert_eq!((nav.current_slide(), nav.direction()), (1, Direction::Backward));
    }

    #[test]
    fn self_jump_is_legal_and_still() {
        let mut nav = Navigator::new(3).unwrap();
        nav.go_to_slide(2);
        nav.go_to_slide(2);
        assert_eq!(nav.current_slide(), 2);
        assert_eq!(nav.direction(), Direction::Still);
        assert!(nav.transition().is_some());
    }

    #[test]
    fn five_slide_walkthrough() {
        let mut nav = Navigator::new(5).unwrap();
        nav.next();
        nav.next();
        nav.next();
        assert_eq!(nav.current_slide(), 3);
        assert_eq!(nav.direction().signum(), 1);
        nav.previous();
        assert_eq!(nav.current_slide(), 2);
        assert_eq!(nav.direction().signum(), -1);
        nav.go_to_slide(4);
        assert_eq!(nav.current_slide(), 4);
        assert_eq!(nav.direction().signum(), 1);
        nav.next();
        assert_eq!(nav.current_slide(), 4);
    }

    #[test]
    fn home_and_end_keys() {
        let mut nav = Navigator::new(7).unwrap();
        assert!(nav.handle_key(Key::End));
        assert_eq!(nav.current_slide(), 6);
        assert!(nav.handle_key(Key::Home));
        assert_eq!(nav.current_slide(), 0);
        assert!(!nav.handle_key(Key::Other));
    }

    #[test]
    fn progress_fraction() {
        let mut nav = Navigator::new(4).unwrap();
        assert_eq!(nav.progress(), 0.25);
        nav.apply(Intent::Last);
        assert_eq!(nav.progress(), 1.0);
        assert!(nav.is_last());
        assert!(!nav.is_first());
    }

    #[test]
    fn touch_swipe_left_advances_once() {
        let mut nav = Navigator::new(3).unwrap();
        nav.touch_start(300.0);
        nav.touch_move(260.0);
        nav.touch_move(230.0);
        assert_eq!(nav.touch_end(), Some(Intent::Next));
        assert_eq!(nav.current_slide(), 1);
        // The gesture buffer is gone; a stray end does nothing.
        assert_eq!(nav.touch_end(), None);
        assert_eq!(nav.current_slide(), 1);
    }

    #[test]
    fn wheel_cooldown_suppresses_burst() {
        let mut nav = Navigator::new(5).unwrap();
        let t0 = Instant::now();
        assert_eq!(nav.handle_wheel(0.0, 80.0, t0), Some(Intent::Next));
        assert_eq!(
            nav.handle_wheel(0.0, 80.0, t0 + Duration::from_millis(100)),
            None
        );
        assert_eq!(nav.current_slide(), 1);
        assert_eq!(
            nav.handle_wheel(0.0, 80.0, t0 + Duration::from_millis(600)),
            Some(Intent::Next)
        );
        assert_eq!(nav.current_slide(), 2);
    }

    #[test]
    fn rapid_intents_supersede_transition() {
        let mut nav = Navigator::new(5).unwrap();
        nav.next();
        nav.next();
        let t = nav.transition().unwrap();
        assert_eq!((t.from, t.to), (1, 2));
        assert_eq!(nav.current_slide(), 2);
    }

    #[test]
    fn settle_clears_finished_transition() {
        let mut nav = Navigator::new(2).unwrap();
        nav.next();
        let start = nav.transition().unwrap().start;
        assert!(nav.settle(start));
        assert!(!nav.settle(start + Duration::from_secs(5)));
        let views = nav.visible_views(start + Duration::from_secs(5));
        assert_eq!(views, vec![(1, ViewPhase::Active, 1.0)]);
    }

    fn intent_strategy() -> impl Strategy<Value = Intent> {
        prop_oneof![
            Just(Intent::Next),
            Just(Intent::Previous),
            Just(Intent::First),
            Just(Intent::Last),
            (0usize..40).prop_map(Intent::GoTo),
        ]
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(
            total in 1usize..20,
            intents in proptest::collection::vec(intent_strategy(), 0..100),
        ) {
            let mut nav = Navigator::new(total).unwrap();
            for intent in intents {
                let before = (nav.current_slide(), nav.direction());
                nav.apply(intent);
                prop_assert!(nav.current_slide() < total);
                if let Intent::GoTo(k) = intent {
                    if k >= total {
                        prop_assert_eq!((nav.current_slide(), nav.direction()), before);
                    } else {
                        prop_assert_eq!(nav.current_slide(), k);
                        prop_assert_eq!(nav.direction(), Direction::between(before.0, k));
                    }
                }
            }
        }
    }
}
