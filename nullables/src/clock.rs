//! Nullable clock — deterministic time for testing.

use credence_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for testing timestamp-sensitive logic.
///
/// Time only advances when you tell it to, which makes rules like the
/// rapid-submission check reproducible.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds and return the new time.
    pub fn advance(&self, secs: u64) -> Timestamp {
        self.current.set(self.current.get() + secs);
        self.now()
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}
