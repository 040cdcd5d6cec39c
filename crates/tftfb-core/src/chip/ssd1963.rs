//! SSD1963: parallel controller, 32 bpp source, row-aligned windows.
//!
//! The chip only accepts rectangular windows aligned to whole
//! scanlines, and a 4 KiB page (1024 pixels at 32 bpp) does not divide
//! a row evenly, so each page run is split into 1-3 row-aligned
//! rectangles before streaming. Pixels go out as 8-bit R/G/B triples.

use embedded_hal::delay::DelayNs;
use tftfb_hal::{BusTransport, FlushDelay};

use super::{cmd, set_window, Controller};
use crate::frame::FrameStore;
use crate::geometry::FrameGeometry;
use crate::init::{run_sequence, SeqOp};
use crate::page::Page;
use crate::pixel::rgb888_triple;
use crate::window::split_row_aligned;

/// Bring-up through the PLL. The panel timing block follows with the
/// geometry patched in.
const INIT_HEAD: &[SeqOp] = &[
    SeqOp::Cmd(cmd::SWRESET),
    SeqOp::Cmd(cmd::SWRESET),
    SeqOp::Cmd(cmd::SWRESET),
    SeqOp::DelayUs(10), // reset settle
    SeqOp::Cmd(0xE0), // start PLL
    SeqOp::Data(&[0x01]),
    SeqOp::DelayUs(100), // PLL settle
    SeqOp::Cmd(0xE0), // lock PLL
    SeqOp::Data(&[0x03]),
];

/// Interface format and panel timing, after the LCD mode block.
const INIT_TAIL: &[SeqOp] = &[
    SeqOp::Cmd(0xF0), // pixel data interface: 8 bit
    SeqOp::Data(&[0x00]),
    SeqOp::Cmd(cmd::COLMOD),
    SeqOp::Data(&[0x70]), // R G B 8:8:8
    SeqOp::Cmd(0xE6), // pixel clock 6.4 MHz
    SeqOp::Data(&[0x00, 0xE7, 0x4F]),
    SeqOp::Cmd(0xB4), // HSYNC total 440, HBP 68
    SeqOp::Data(&[0x01, 0xB8, 0x00, 0x44, 0x0F, 0x00, 0x00, 0x00]),
    SeqOp::Cmd(0xB6), // VSYNC total 265, VBP 19, pulse 8
    SeqOp::Data(&[0x01, 0x08, 0x00, 0x13, 0x07, 0x00, 0x00]),
];

pub struct Ssd1963;

impl Controller for Ssd1963 {
    const BPP: u8 = 32;
    // Reference timing: 1/20 s between deferred updates.
    const DEFAULT_FLUSH_DELAY: FlushDelay = FlushDelay::millis(50);
    const NAME: &'static str = "ssd1963";

    fn init<B: BusTransport, D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        geom: &FrameGeometry,
    ) -> Result<(), B::Error> {
        run_sequence(bus, delay, INIT_HEAD)?;

        // LCD mode: 24-bit TFT, sync+DE, panel size. The chip has no
        // orientation register; rotation is purely the geometry swap.
        let hsize = geom.width - 1;
        let vsize = geom.height - 1;
        bus.send_command(0xB0)?;
        bus.send_data(&[
            0x0C,
            0x80,
            (hsize >> 8) as u8,
            hsize as u8,
            (vsize >> 8) as u8,
            vsize as u8,
            0x00, // even/odd line RGB sequence
        ])?;

        run_sequence(bus, delay, INIT_TAIL)?;

        // Open the full-screen window once, then light up.
        bus.send_command(cmd::CASET)?;
        bus.send_data(&[0x00, 0x00, (hsize >> 8) as u8, hsize as u8])?;
        bus.send_command(cmd::PASET)?;
        bus.send_data(&[0x00, 0x00, (vsize >> 8) as u8, vsize as u8])?;
        bus.send_command(cmd::DISPON)?;

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
        let geom = frame.geometry();
        let slices = split_row_aligned(page, geom.width);

        for slice in &slices {
            set_window(bus, &slice.window)?;

            // 64 pixels of channel triples per bus message.
            let mut chunk = [0u8; 192];
            let mut filled = 0;
            for i in 0..slice.len as usize {
                let px = frame.pixel32(page.offset + slice.offset as usize + i);
                chunk[filled..filled + 3].copy_from_slice(&rgb888_triple(px, geom.color_order));
                filled += 3;
                if filled == chunk.len() {
                    bus.send_data(&chunk)?;
                    filled = 0;
                }
            }
            if filled > 0 {
                bus.send_data(&chunk[..filled])?;
            }
        }
        Ok(slices.len())
    }
}
