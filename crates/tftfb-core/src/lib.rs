#![no_std]

//! Platform-agnostic paged framebuffer driver for small TFT controllers.
//!
//! The core turns a linear raster buffer into controller command/pixel
//! streams over a narrow blocking bus. Drawing code writes into the
//! buffer and reports the touched rectangle; the driver tracks which
//! fixed-capacity pages were hit, debounces a deferred flush, and on
//! expiry streams each dirty page through the controller's address
//! window protocol.
//!
//! Everything hardware-facing is behind the `tftfb-hal` traits plus
//! `embedded-hal` at the pin/bus seams, so the whole pipeline runs
//! unmodified against mock transports on a host.

pub mod bus;
pub mod chip;
pub mod driver;
pub mod frame;
pub mod geometry;
pub mod init;
pub mod page;
pub mod pixel;
pub mod sched;
pub mod window;

pub use driver::{DriverConfig, FlushReport, TftDriver};
pub use geometry::{ColorOrder, FrameGeometry, Rotation};

/// Driver error, generic over the transport error like the hal it wraps.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E: core::fmt::Debug> {
    /// No usable bus handle was bound at setup.
    TransportUnavailable,
    /// The bus reported a failure mid-transaction.
    Transfer(E),
    /// The geometry's pixel format does not match the controller's.
    PixelFormat { expected: u8, got: u8 },
    /// Frame buffer or page table could not be sized at setup.
    Allocation { needed: usize, got: usize },
}

impl<E: core::fmt::Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Transfer(e)
    }
}
