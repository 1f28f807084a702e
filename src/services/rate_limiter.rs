use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

const MAX_PREALLOCATED: usize = 64;

/// Sliding-window limiter: at most `max_calls` attempts within `window`.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    calls: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            calls: VecDeque::with_capacity(max_calls.min(MAX_PREALLOCATED)),
        }
    }

    pub fn attempt(&mut self) -> bool {
        self.attempt_at(Instant::now())
    }

    /// Record an attempt made at `now`, returning false when the window is full
    pub fn attempt_at(&mut self, now: Instant) -> bool {
        while let Some(oldest) = self.calls.front() {
            if now.duration_since(*oldest) < self.window {
                break;
            }
            self.calls.pop_front();
        }

        if self.calls.len() >= self.max_calls {
            return false;
        }

        self.calls.push_back(now);
        true
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}
