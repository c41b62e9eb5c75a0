//! Per-question countdown
//!
//! The countdown is advanced one second at a time by the caller's clock
//! (an interval timer in the interactive command, a loop in tests). It
//! reports expiry exactly once per armed question.

/// Result of advancing the countdown by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The question has no time limit
    Unlimited,
    /// Seconds left after this tick
    Running(u32),
    /// The limit was reached on this tick
    Expired,
    /// Expiry was already reported for this question
    Elapsed,
}

/// Countdown over a question's time limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    expired: bool,
}

impl Countdown {
    /// Arm a countdown for `limit` seconds; 0 disables it
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
            expired: false,
        }
    }

    /// A countdown that never expires
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    /// Re-arm for a new question
    pub fn reset(&mut self, limit: u32) {
        *self = Self::new(limit);
    }

    /// Whether a time limit applies
    pub fn is_limited(&self) -> bool {
        self.limit > 0
    }

    /// Configured limit in seconds
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Seconds left
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether expiry has been reported
    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Advance by one second
    ///
    /// # Examples
    ///
    /// ```
    /// use interview_agent::lifecycle::{Countdown, Tick};
    ///
    /// let mut countdown = Countdown::new(2);
    /// assert_eq!(countdown.tick(), Tick::Running(1));
    /// assert_eq!(countdown.tick(), Tick::Expired);
    /// assert_eq!(countdown.tick(), Tick::Elapsed);
    /// ```
    pub fn tick(&mut self) -> Tick {
        if !self.is_limited() {
            return Tick::Unlimited;
        }
        if self.expired {
            return Tick::Elapsed;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::unlimited()
    }
}
