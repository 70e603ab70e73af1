//! Quiet-window debouncing
//!
//! Rapid input (slider drags, typing) reschedules the deadline; the work runs
//! once the input has been quiet for the whole window. Time is always passed
//! in so callers decide the clock.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record an input at `now`, pushing the deadline out by one window
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the quiet window has elapsed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true if work was pending, clearing it regardless of the clock
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Drop pending work without running it
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(50);

        debouncer.schedule(start);
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(49)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(50)));
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_rescheduling_coalesces() {
        let start = Instant::now();
        let mut debouncer = Debouncer::from_millis(50);

        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(40));
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(60)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(90)));
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut debouncer = Debouncer::from_millis(10);
        assert!(!debouncer.flush());

        debouncer.schedule(Instant::now());
        assert!(debouncer.flush());
        assert!(!debouncer.is_pending());

        debouncer.schedule(Instant::now());
        debouncer.cancel();
        assert!(!debouncer.flush());
    }
}
