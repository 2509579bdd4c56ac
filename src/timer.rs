//! A component's single pending timeout.

use leptos::prelude::TimeoutHandle;

pub trait Cancel {
    fn cancel(self);
}

impl Cancel for TimeoutHandle {
    fn cancel(self) {
        self.clear();
    }
}

/// Holds at most one pending timeout. Scheduling a new one cancels the old,
/// and the owning component cancels whatever is left in `on_cleanup`.
#[derive(Debug)]
pub struct TimerSlot<H> {
    pending: Option<H>,
}

impl<H> Default for TimerSlot<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Cancel> TimerSlot<H> {
    pub fn replace(&mut self, handle: H) {
        if let Some(old) = self.pending.replace(handle) {
            old.cancel();
        }
    }

    /// Called by the timeout itself once it has run.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
