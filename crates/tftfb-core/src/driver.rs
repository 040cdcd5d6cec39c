//! Driver handle: setup, touch, flush, teardown.
//!
//! One `TftDriver` owns the frame store, the page table, the bus and
//! the debounce scheduler. Drawing code writes into `frame_mut()` and
//! reports the touched rectangle; the platform calls `flush()` when the
//! deferred timer fires.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use tftfb_hal::{BusTransport, DeferredTimer, FlushDelay};

use crate::chip::{cmd, Controller};
use crate::frame::FrameStore;
use crate::geometry::FrameGeometry;
use crate::page::PageTable;
use crate::sched::FlushScheduler;
use crate::Error;

/// Setup-time knobs that are not part of the frame geometry.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Debounce delay; `None` takes the controller's reference value.
    pub flush_delay: Option<FlushDelay>,
    /// Host memory page size the partitioner divides by.
    pub page_bytes: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            flush_delay: None,
            page_bytes: 4096,
        }
    }
}

/// Outcome of one flush pass. Failures are already logged and their
/// pages re-armed by the time the report is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Pages streamed completely.
    pub pages_flushed: usize,
    /// Address windows emitted.
    pub windows_sent: usize,
    /// Pages abandoned on a transport error and re-marked dirty.
    pub pages_failed: usize,
}

pub struct TftDriver<'b, C, B, T>
where
    C: Controller,
    B: BusTransport,
    T: DeferredTimer,
{
    frame: FrameStore<'b>,
    pages: PageTable,
    bus: B,
    sched: FlushScheduler<T>,
    _chip: PhantomData<C>,
}

impl<'b, C, B, T> TftDriver<'b, C, B, T>
where
    C: Controller,
    B: BusTransport,
    T: DeferredTimer,
{
    /// Bring the controller up and build the page table.
    ///
    /// Acquisition order is frame store, page table, controller init;
    /// a failure at any step drops whatever was already built in
    /// reverse order and returns the error. Finishes by marking the
    /// whole buffer dirty and arming the timer, so the first expiry
    /// paints the initial (cleared) frame.
    pub fn initialize<D: DelayNs>(
        buf: &'b mut [u8],
        geometry: FrameGeometry,
        config: DriverConfig,
        mut bus: B,
        timer: T,
        delay: &mut D,
    ) -> Result<Self, Error<B::Error>> {
        if !bus.ready() {
            return Err(Error::TransportUnavailable);
        }
        // The controller's pixel format is fixed; a mismatched buffer
        // would be sized for the wrong depth and over-read at flush.
        if geometry.bits_per_pixel != C::BPP {
            return Err(Error::PixelFormat {
                expected: C::BPP,
                got: geometry.bits_per_pixel,
            });
        }

        let oriented = geometry.oriented();
        let frame = FrameStore::new(buf, oriented)?;
        let pages = PageTable::partition(&oriented, config.page_bytes)?;
        C::init(&mut bus, delay, &oriented)?;

        let delay_ms = config.flush_delay.unwrap_or(C::DEFAULT_FLUSH_DELAY);
        log::info!(
            "{}: {}x{} at {} bpp, {} pages of {} px, flush delay {}",
            C::NAME,
            oriented.width,
            oriented.height,
            oriented.bits_per_pixel,
            pages.len(),
            pages.pixels_per_page(),
            delay_ms
        );

        let mut driver = TftDriver {
            frame,
            pages,
            bus,
            sched: FlushScheduler::new(timer, delay_ms),
            _chip: PhantomData,
        };
        driver.touch_all();
        Ok(driver)
    }

    /// Writable raster surface.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        self.frame.buffer_mut()
    }

    pub fn geometry(&self) -> &FrameGeometry {
        self.frame.geometry()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.pages
    }

    /// Report a drawn rectangle. Marks the pages whose rows it hits and
    /// pushes the pending flush out by the debounce delay. Fire and
    /// forget; nothing blocks here.
    pub fn touch(&mut self, x: u16, y: u16, w: u16, h: u16) {
        self.pages.touch(x, y, w, h);
        self.sched.kick();
    }

    /// Full-buffer write: dirty everything, arm the timer once.
    pub fn touch_all(&mut self) {
        self.pages.touch_all();
        self.sched.kick();
    }

    /// One flush pass over the current dirty set, run to completion on
    /// the caller's context when the deferred timer fires.
    ///
    /// Per page the dirty flag is cleared first and the pixels read
    /// after, so a touch racing the stream re-marks the page for the
    /// next cycle; a touch landing exactly between the flag read and
    /// the clear is lost until the next touch re-arms the timer. Known
    /// weak point, accepted: the display has no pixel-exact latency
    /// requirement.
    ///
    /// A transport failure abandons the current page's transfer, logs
    /// it, re-marks the page dirty and re-arms the timer (retry policy:
    /// re-arm and log, never assume success); remaining pages are still
    /// attempted.
    pub fn flush(&mut self) -> FlushReport {
        let mut report = FlushReport::default();

        for index in 0..self.pages.len() {
            if !self.pages.take_dirty(index) {
                continue;
            }
            match C::write_page(&mut self.bus, &self.frame, self.pages.page(index)) {
                Ok(windows) => {
                    report.pages_flushed += 1;
                    report.windows_sent += windows;
                }
                Err(e) => {
                    log::warn!(
                        "{}: page {} transfer failed ({:?}), re-arming",
                        C::NAME,
                        index,
                        e
                    );
                    self.pages.mark_dirty(index);
                    report.pages_failed += 1;
                }
            }
        }

        if report.pages_failed > 0 {
            self.sched.kick();
        }
        log::trace!(
            "flush: {} pages, {} windows, {} failed",
            report.pages_flushed,
            report.windows_sent,
            report.pages_failed
        );
        report
    }

    /// Cancel any pending flush, blank the panel and hand the hardware
    /// back. Resources release in reverse acquisition order as the
    /// driver is consumed.
    pub fn teardown(mut self) -> (B, T) {
        self.sched.cancel();
        if let Err(e) = self.bus.send_command(cmd::DISPOFF) {
            log::warn!("{}: display-off failed on teardown: {:?}", C::NAME, e);
        }
        (self.bus, self.sched.into_timer())
    }
}
