use soroban_sdk::contracttype;

/// Owner liveness tracking: the timestamp of the latest proof of life and the
/// inactivity window after which the owner counts as gone.
///
/// Nothing flips state in the background. Every question is answered from the
/// stored timestamp and the `now` the caller passes in, so the clock is only
/// ever written when the owner pings.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LivenessClock {
    pub last_activity: u64,
    pub waiting_period: u64,
}

impl LivenessClock {
    pub fn start(now: u64, waiting_period: u64) -> Self {
        Self {
            last_activity: now,
            waiting_period,
        }
    }

    /// Records a fresh proof of life.
    pub fn reset(&mut self, now: u64) {
        self.last_activity = now;
    }

    /// Seconds since the last proof of life. Zero if `now` is behind it.
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_activity)
    }

    /// `true` while fewer than `waiting_period` seconds have passed.
    pub fn is_alive(&self, now: u64) -> bool {
        self.elapsed(now) < self.waiting_period
    }

    /// First instant at which `is_alive` turns false.
    pub fn expires_at(&self) -> u64 {
        self.last_activity.saturating_add(self.waiting_period)
    }
}
