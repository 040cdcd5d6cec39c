//! Concrete bus transports behind the `BusTransport` capability.
//!
//! Two interchangeable flavors: a message transport that hands whole
//! byte buffers to a blocking SPI bus, and a strobed transport that
//! bit-bangs one byte at a time over parallel data lines. Both are
//! strictly synchronous.

pub mod parallel;
pub mod spi;

pub use parallel::{ParallelStrobeBus, StrobeError, StrobePins};
pub use spi::{SpiBusError, SpiMessageBus};
