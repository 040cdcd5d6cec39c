//! ILI9341: serial controller, 16 bpp RGB565, contiguous-run windows.
//!
//! The chip's write pointer auto-increments across the whole panel, so
//! a page run that straddles row boundaries still goes out as a single
//! window plus one big-endian pixel stream.

use embedded_hal::delay::DelayNs;
use tftfb_hal::{BusTransport, FlushDelay};

use super::{cmd, set_window, Controller};
use crate::frame::FrameStore;
use crate::geometry::{ColorOrder, FrameGeometry, Rotation};
use crate::init::{run_sequence, SeqOp};
use crate::page::Page;
use crate::pixel::rgb565_be;
use crate::window::run_window;

// MADCTL bit positions.
const MEM_Y: u8 = 7; // row address order
const MEM_X: u8 = 6; // column address order
const MEM_V: u8 = 5; // row/column exchange
const MEM_L: u8 = 4; // vertical refresh order
const MEM_BGR: u8 = 3; // RGB-BGR order

/// Power-up replay through the pixel format, before MADCTL.
/// Values from the vendor reference sequence.
const INIT_HEAD: &[SeqOp] = &[
    SeqOp::Cmd(cmd::SWRESET),
    SeqOp::DelayMs(120), // reset settle
    SeqOp::Cmd(cmd::DISPOFF),
    SeqOp::Cmd(0xEF),
    SeqOp::Data(&[0x03, 0x80, 0x02]),
    SeqOp::Cmd(0xCF), // power control B
    SeqOp::Data(&[0x00, 0xC1, 0x30]),
    SeqOp::Cmd(0xED), // power-on sequence control
    SeqOp::Data(&[0x64, 0x03, 0x12, 0x81]),
    SeqOp::Cmd(0xE8), // driver timing control A
    SeqOp::Data(&[0x85, 0x00, 0x78]),
    SeqOp::Cmd(0xCB), // power control A
    SeqOp::Data(&[0x39, 0x2C, 0x00, 0x34, 0x02]),
    SeqOp::Cmd(0xF7), // pump ratio control
    SeqOp::Data(&[0x20]),
    SeqOp::Cmd(0xEA), // driver timing control B
    SeqOp::Data(&[0x00, 0x00]),
    SeqOp::Cmd(0xC0), // power control 1
    SeqOp::Data(&[0x23]),
    SeqOp::Cmd(0xC1), // power control 2
    SeqOp::Data(&[0x10]),
    SeqOp::Cmd(0xC5), // VCOM control 1
    SeqOp::Data(&[0x3E, 0x28]),
    SeqOp::Cmd(0xC7), // VCOM control 2
    SeqOp::Data(&[0x86]),
    SeqOp::Cmd(cmd::COLMOD),
    SeqOp::Data(&[0x55]), // 16 bpp
    SeqOp::Cmd(0xB1), // frame rate: fosc, 79 Hz
    SeqOp::Data(&[0x00, 0x18]),
    SeqOp::Cmd(0xB6), // display function control
    SeqOp::Data(&[0x08, 0x82, 0x27]),
];

/// Gamma setup and wake, after MADCTL.
const INIT_TAIL: &[SeqOp] = &[
    SeqOp::Cmd(0xF2), // 3-gamma function disable
    SeqOp::Data(&[0x00]),
    SeqOp::Cmd(0x26), // gamma curve 1
    SeqOp::Data(&[0x01]),
    SeqOp::Cmd(0xE0), // positive gamma correction
    SeqOp::Data(&[
        0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
    ]),
    SeqOp::Cmd(0xE1), // negative gamma correction
    SeqOp::Data(&[
        0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
    ]),
    SeqOp::Cmd(cmd::SLPOUT),
    SeqOp::DelayMs(120), // sleep-out settle
    SeqOp::Cmd(cmd::DISPON),
];

/// MADCTL value for the four fixed orientations plus the color order
/// bit. The 90/270 entries set row/column exchange; the matching
/// width/height swap happens in `FrameGeometry::oriented`.
pub fn madctl(rotation: Rotation, order: ColorOrder) -> u8 {
    let base = match rotation {
        Rotation::Deg0 => 1 << MEM_X,
        Rotation::Deg90 => (1 << MEM_Y) | (1 << MEM_X) | (1 << MEM_V),
        Rotation::Deg180 => 1 << MEM_Y,
        Rotation::Deg270 => (1 << MEM_V) | (1 << MEM_L),
    };
    match order {
        ColorOrder::Bgr => base | (1 << MEM_BGR),
        ColorOrder::Rgb => base,
    }
}

pub struct Ili9341;

impl Controller for Ili9341 {
    const BPP: u8 = 16;
    // Reference timing: ~1/35 s between deferred updates.
    const DEFAULT_FLUSH_DELAY: FlushDelay = FlushDelay::millis(28);
    const NAME: &'static str = "ili9341";

    fn init<B: BusTransport, D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        geom: &FrameGeometry,
    ) -> Result<(), B::Error> {
        run_sequence(bus, delay, INIT_HEAD)?;
        bus.send_command(cmd::MADCTL)?;
        bus.send_data(&[madctl(geom.rotation, geom.color_order)])?;
        run_sequence(bus, delay, INIT_TAIL)?;
        log::debug!(
            "{}: init done, {}x{} rotation {:?} order {:?}",
            Self::NAME,
            geom.width,
            geom.height,
            geom.rotation,
            geom.color_order
        );
        Ok(())
    }

    fn write_page<B: BusTransport>(
        bus: &mut B,
        frame: &FrameStore<'_>,
        page: &Page,
    ) -> Result<usize, B::Error> {
        set_window(bus, &run_window(page))?;

        // 64 pixels of RGB565 per bus message.
        let mut chunk = [0u8; 128];
        let mut filled = 0;
        for i in 0..page.len as usize {
            let be = rgb565_be(frame.pixel16(page.offset + i));
            chunk[filled] = be[0];
            chunk[filled + 1] = be[1];
            filled += 2;
            if filled == chunk.len() {
                bus.send_data(&chunk)?;
                filled = 0;
            }
        }
        if filled > 0 {
            bus.send_data(&chunk[..filled])?;
        }
        Ok(1)
    }
}
