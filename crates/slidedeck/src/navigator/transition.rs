use std::time::{Duration, Instant};

use super::Direction;

/// Lifecycle of one painted view during a slide change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewPhase {
    Entering(Direction),
    Active,
    Exiting(Direction),
}

/// Where to paint a view: horizontal offset as a fraction of the slide
/// width, and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub offset: f32,
    pub opacity: f32,
}

impl ViewPhase {
    /// `progress` is the eased transition progress in `[0, 1]`.
    pub fn placement(self, progress: f32) -> Placement {
        let p = progress.clamp(0.0, 1.0);
        match self {
            ViewPhase::Active => Placement {
                offset: 0.0,
                opacity: 1.0,
            },
            ViewPhase::Entering(direction) => Placement {
                offset: f32::from(direction.signum()) * (1.0 - p),
                opacity: p,
            },
            ViewPhase::Exiting(direction) => Placement {
                offset: -f32::from(direction.signum()) * p,
                opacity: 1.0 - p,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub start: Instant,
    pub duration: Duration,
}

impl ActiveTransition {
    pub fn new(from: usize, to: usize, direction: Direction, duration: Duration) -> Self {
        Self {
            from,
            to,
            direction,
            start: Instant::now(),
            duration,
        }
    }

    pub fn raw_progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn progress_at(&self, now: Instant) -> f32 {
        ease_in_out(self.raw_progress_at(now))
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        self.raw_progress_at(now) >= 1.0
    }

    /// The outgoing and incoming views with their eased progress. A jump to
    /// the current slide only has an incoming view.
    pub fn phases(&self, now: Instant) -> Vec<(usize, ViewPhase, f32)> {
        let p = self.progress_at(now);
        if self.from == self.to {
            return vec![(self.to, ViewPhase::Entering(Direction::Still), p)];
        }
        vec![
            (self.from, ViewPhase::Exiting(self.direction), p),
            (self.to, ViewPhase::Entering(self.direction), p),
        ]
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: usize, to: usize, direction: Direction) -> ActiveTransition {
        ActiveTransition::new(from, to, direction, Duration::from_millis(400))
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
    }

    #[test]
    fn forward_enters_from_right_and_exits_left() {
        let entering = ViewPhase::Entering(Direction::Forward).placement(0.0);
        assert_eq!(entering.offset, 1.0);
        assert_eq!(entering.opacity, 0.0);

        let exiting = ViewPhase::Exiting(Direction::Forward).placement(1.0);
        assert_eq!(exiting.offset, -1.0);
        assert_eq!(exiting.opacity, 0.0);
    }

    #[test]
    fn backward_mirrors_forward() {
        assert_eq!(
            ViewPhase::Entering(Direction::Backward).placement(0.0).offset,
            -1.0
        );
        assert_eq!(
            ViewPhase::Exiting(Direction::Backward).placement(1.0).offset,
            1.0
        );
    }

    #[test]
    fn still_only_fades() {
        let half = ViewPhase::Entering(Direction::Still).placement(0.5);
        assert_eq!(half.offset, 0.0);
        assert_eq!(half.opacity, 0.5);
    }

    #[test]
    fn settled_views_are_centered() {
        let end = ViewPhase::Entering(Direction::Forward).placement(1.0);
        assert_eq!(end, ViewPhase::Active.placement(0.3));
    }

    #[test]
    fn phases_for_move_and_self_jump() {
        let t = transition(1, 2, Direction::Forward);
        let phases = t.phases(t.start);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].0, 1);
        assert_eq!(phases[0].1, ViewPhase::Exiting(Direction::Forward));
        assert_eq!(phases[1].1, ViewPhase::Entering(Direction::Forward));

        let t = transition(3, 3, Direction::Still);
        assert_eq!(
            t.phases(t.start),
            vec![(3, ViewPhase::Entering(Direction::Still), 0.0)]
        );
    }

    #[test]
    fn completes_after_duration() {
        let t = transition(0, 1, Direction::Forward);
        assert!(!t.is_complete_at(t.start + Duration::from_millis(200)));
        assert!(t.is_complete_at(t.start + Duration::from_millis(400)));
        assert_eq!(t.progress_at(t.start + Duration::from_secs(9)), 1.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let t = ActiveTransition::new(0, 1, Direction::Forward, Duration::ZERO);
        assert!(t.is_complete_at(t.start));
    }
}
