#![no_std]

//! Platform abstraction for the tftfb paged framebuffer driver.
//!
//! Two capabilities are required of a platform: a blocking byte-oriented
//! bus to the display controller ([`BusTransport`]) and a fire-once
//! deferred timer used for flush debouncing ([`DeferredTimer`]). Both are
//! strictly synchronous; neither queues work.

pub use fugit;

/// Debounce delay unit used throughout the driver.
pub type FlushDelay = fugit::MillisDurationU32;

/// Blocking command/data bus to a display controller.
///
/// Implementations own whatever framing the controller needs (a
/// data/command select line, chip select, write strobe). A call returns
/// only once the bytes have left the bus; there is no cancellation, so a
/// stalled bus stalls the caller.
pub trait BusTransport {
    type Error: core::fmt::Debug;

    /// True when a usable bus handle is bound. Probed once at driver
    /// setup; the default assumes the transport was constructed from
    /// live peripherals.
    fn ready(&mut self) -> bool {
        true
    }

    /// Send a single command byte with command framing.
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send a buffer of parameter/pixel bytes with data framing.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Fire-once deferred timer backing the flush debounce.
///
/// `arm` while already armed MUST replace the pending deadline rather
/// than queue a second expiry; that replacement is the whole debounce
/// mechanism. On expiry the platform invokes the driver's flush exactly
/// once and the timer returns to idle.
pub trait DeferredTimer {
    /// Schedule (or reschedule) a single expiry `delay` from now.
    fn arm(&mut self, delay: FlushDelay);

    /// Discard any pending expiry.
    fn cancel(&mut self);
}
