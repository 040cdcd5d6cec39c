//! Flush scheduling: one debounced deferred flush.
//!
//! Every touch (re)arms a single fire-once timer; touches landing
//! before expiry collapse into one flush pass. The timer itself is a
//! platform capability (`DeferredTimer`), so on hardware it is a real
//! deferred-work slot and in tests a recording mock.

use tftfb_hal::{DeferredTimer, FlushDelay};

pub struct FlushScheduler<T: DeferredTimer> {
    timer: T,
    delay: FlushDelay,
}

impl<T: DeferredTimer> FlushScheduler<T> {
    pub fn new(timer: T, delay: FlushDelay) -> Self {
        FlushScheduler { timer, delay }
    }

    /// Push the pending flush out to `now + delay`. Re-arming an armed
    /// timer replaces the deadline, which is the debounce.
    pub fn kick(&mut self) {
        self.timer.arm(self.delay);
    }

    /// Drop any pending flush (teardown path).
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn delay(&self) -> FlushDelay {
        self.delay
    }

    pub fn into_timer(self) -> T {
        self.timer
    }
}
