#![forbid(unsafe_code)]

//! Deterministic interval timer.
//!
//! The timer never reads the clock. The owner passes `now` to every
//! operation, which makes auto-advance behavior reproducible in tests and
//! lets the host drive it from `requestAnimationFrame` or a native loop.
//!
//! # Invariants
//!
//! 1. A cancelled timer never fires, no matter how late the next `poll`.
//! 2. `poll` fires at most once per call.
//! 3. After a fire the next deadline is `previous_deadline + interval`, so
//!    cadence does not drift with poll jitter. If the host fell a whole
//!    interval behind, the next deadline is `now + interval` instead of a
//!    burst of catch-up fires.
//! 4. A zero interval disables the timer: `start` leaves it disarmed.

use web_time::{Duration, Instant};

/// A re-armable periodic deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl IntervalTimer {
    /// Create a disarmed timer.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Configured period.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the timer can ever fire.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Arm for a full interval from `now`, replacing any pending deadline.
    pub fn start(&mut self, now: Instant) {
        self.deadline = self.is_enabled().then(|| now + self.interval);
    }

    /// Drop the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the next fire.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Change the period. An armed timer is restarted from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_armed() {
            self.start(now);
        }
    }

    /// Returns `true` when the deadline has passed, and schedules the next.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let next = deadline + self.interval;
        self.deadline = Some(if next <= now { now + self.interval } else { next });
        tracing::trace!(
            late_us = now.saturating_duration_since(deadline).as_micros() as u64,
            "interval timer fired"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn new_timer_is_disarmed() {
        let mut timer = IntervalTimer::new(SEC);
        assert!(!timer.is_armed());
        assert!(!timer.poll(Instant::now() + SEC * 10));
    }

    #[test]
    fn fires_on_deadline_not_before() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        assert!(!timer.poll(t0 + Duration::from_millis(999)));
        assert!(timer.poll(t0 + SEC));
        assert_eq!(timer.deadline(), Some(t0 + SEC * 2));
    }

    #[test]
    fn cadence_ignores_poll_jitter() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        assert!(timer.poll(t0 + Duration::from_millis(1100)));
        assert_eq!(timer.deadline(), Some(t0 + SEC * 2));
    }

    #[test]
    fn falling_behind_does_not_burst() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        let late = t0 + SEC * 5;
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.deadline(), Some(late + SEC));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        timer.cancel();
        assert!(!timer.poll(t0 + SEC * 3));
        assert_eq!(timer.remaining(t0), None);
    }

    #[test]
    fn restart_gives_full_interval() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        let mid = t0 + Duration::from_millis(800);
        timer.start(mid);
        assert!(!timer.poll(t0 + SEC));
        assert_eq!(timer.remaining(t0 + SEC), Some(Duration::from_millis(800)));
        assert!(timer.poll(mid + SEC));
    }

    #[test]
    fn zero_interval_is_disabled() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(Duration::ZERO);
        timer.start(t0);
        assert!(!timer.is_enabled());
        assert!(!timer.is_armed());
        assert!(!timer.poll(t0 + SEC));
    }

    #[test]
    fn set_interval_restarts_armed_timer() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new(SEC);
        timer.start(t0);
        timer.set_interval(SEC * 2, t0 + SEC);
        assert_eq!(timer.deadline(), Some(t0 + SEC * 3));

        let mut idle = IntervalTimer::new(SEC);
        idle.set_interval(SEC * 2, t0);
        assert!(!idle.is_armed());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_fires_ahead_of_cadence(
                interval_ms in 1u64..5_000,
                steps in prop::collection::vec(0u64..3_000, 1..120),
            ) {
                let t0 = Instant::now();
                let interval = Duration::from_millis(interval_ms);
                let mut timer = IntervalTimer::new(interval);
                timer.start(t0);

                let mut now = t0;
                let mut fires = 0u32;
                for step in steps {
                    now += Duration::from_millis(step);
                    if timer.poll(now) {
                        fires += 1;
                        prop_assert!(now >= t0 + interval * fires);
                    }
                    prop_assert!(timer.deadline().is_some_and(|d| d > now));
                }
            }
        }
    }
}
