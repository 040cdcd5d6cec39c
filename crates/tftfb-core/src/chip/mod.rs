//! Controller protocol drivers.
//!
//! A controller variant owns its init table and its page-to-wire
//! mapping; the lifecycle driver stays generic over it. Both supported
//! chips speak the DCS-style command set for windowing (column address,
//! page address, memory write), they differ in pixel format and in how
//! a page run must be windowed.

use embedded_hal::delay::DelayNs;
use tftfb_hal::BusTransport;

use crate::frame::FrameStore;
use crate::geometry::FrameGeometry;
use crate::page::Page;
use crate::window::AddressWindow;

pub mod ili9341;
pub mod ssd1963;

pub use ili9341::Ili9341;
pub use ssd1963::Ssd1963;

/// Shared DCS-style command bytes.
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// One controller variant: fixed pixel format, bring-up table and
/// page streaming strategy.
pub trait Controller {
    /// Source bits per pixel in frame memory.
    const BPP: u8;
    /// Debounce delay when the caller does not override it.
    const DEFAULT_FLUSH_DELAY: tftfb_hal::FlushDelay;
    const NAME: &'static str;

    /// Replay the power-up sequence and apply the orientation register
    /// for `geom` (whose axis swap has already happened).
    fn init<B: BusTransport, D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        geom: &FrameGeometry,
    ) -> Result<(), B::Error>;

    /// Stream one page: one or more address windows, each followed by
    /// its pixel bytes. Returns the number of windows emitted.
    fn write_page<B: BusTransport>(
        bus: &mut B,
        frame: &FrameStore<'_>,
        page: &Page,
    ) -> Result<usize, B::Error>;
}

/// Program an address window and open the pixel stream. Start/end
/// bytes go out big-endian, columns first.
pub(crate) fn set_window<B: BusTransport>(
    bus: &mut B,
    win: &AddressWindow,
) -> Result<(), B::Error> {
    bus.send_command(cmd::CASET)?;
    bus.send_data(&[
        (win.x_start >> 8) as u8,
        win.x_start as u8,
        (win.x_end >> 8) as u8,
        win.x_end as u8,
    ])?;
    bus.send_command(cmd::PASET)?;
    bus.send_data(&[
        (win.y_start >> 8) as u8,
        win.y_start as u8,
        (win.y_end >> 8) as u8,
        win.y_end as u8,
    ])?;
    bus.send_command(cmd::RAMWR)
}
