//! Nullable clock: deterministic time for testing.

use lop_types::{Clock, Timestamp};
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to, and never moves backwards.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().saturating_add(secs));
    }

    /// Jump to a specific time. Earlier values are ignored.
    pub fn set(&self, secs: u64) {
        self.current.set(self.current.get().max(secs));
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
