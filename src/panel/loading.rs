use std::time::{Duration, Instant};

pub const LOADING_PERIOD: Duration = Duration::from_millis(500);

pub const LOADING_VARIANTS: [&str; 4] = [
    "Loading meetings",
    "Loading meetings.",
    "Loading meetings..",
    "Loading meetings...",
];

/// Periodic indicator shown while a fetch is outstanding. Holds its own
/// deadline; dropping it is what stops the timer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingIndicator {
    frame: usize,
    next_change: Instant,
}

impl LoadingIndicator {
    pub fn start(now: Instant) -> Self {
        Self { frame: 0, next_change: now + LOADING_PERIOD }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn text(&self) -> &'static str {
        LOADING_VARIANTS[self.frame]
    }

    pub fn next_change(&self) -> Instant {
        self.next_change
    }

    /// Advances one variant per elapsed period. Returns true if the frame changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while now >= self.next_change {
            self.frame = (self.frame + 1) % LOADING_VARIANTS.len();
            self.next_change += LOADING_PERIOD;
            changed = true;
        }
        changed
    }
}
