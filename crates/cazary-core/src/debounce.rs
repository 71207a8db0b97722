//! Deferred re-checks for keystroke and paste handlers.
//!
//! Handlers schedule a check a few milliseconds out instead of reading input
//! synchronously, since the new value is not visible until the event has been
//! processed. Pending checks are never cancelled; a check that sees the same
//! value as the previous one does nothing.

/// Delay before a deferred check runs.
pub const DEBOUNCE_MS: u32 = 10;

/// Remembers the last observed value of an input.
#[derive(Debug, Clone, Default)]
pub struct ValueWatch {
    last: Option<String>,
}

impl ValueWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value`, returning whether it differs from the last one seen.
    ///
    /// The first observation always counts as a change.
    pub fn observe(&mut self, value: &str) -> bool {
        if self.last.as_deref() == Some(value) {
            return false;
        }
        self.last = Some(value.to_string());
        true
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
