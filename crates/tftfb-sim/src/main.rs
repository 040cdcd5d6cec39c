//! Host demo harness for the tftfb core.
//!
//! Runs the full touch -> debounce -> flush pipeline against a
//! simulated bus that just counts traffic, and a manual timer the loop
//! fires by hand. Useful for eyeballing the wire traffic a drawing
//! pattern produces without any hardware attached.

use tftfb_core::chip::Ili9341;
use tftfb_core::{ColorOrder, DriverConfig, FrameGeometry, Rotation, TftDriver};
use tftfb_hal::{BusTransport, DeferredTimer, FlushDelay};

/// Bus that counts transactions instead of sending them anywhere.
#[derive(Default)]
struct CountingBus {
    commands: u64,
    data_bytes: u64,
}

impl BusTransport for CountingBus {
    type Error = std::convert::Infallible;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        log::trace!("cmd {:#04x}", cmd);
        self.commands += 1;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.data_bytes += data.len() as u64;
        Ok(())
    }
}

/// Timer the main loop polls and fires by hand.
#[derive(Default)]
struct ManualTimer {
    armed: std::rc::Rc<std::cell::Cell<bool>>,
}

impl DeferredTimer for ManualTimer {
    fn arm(&mut self, _delay: FlushDelay) {
        self.armed.set(true);
    }

    fn cancel(&mut self) {
        self.armed.set(false);
    }
}

struct NoopDelay;

impl embedded_hal::delay::DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn main() {
    env_logger::init();

    let geometry = FrameGeometry {
        width: 240,
        height: 320,
        bits_per_pixel: 16,
        rotation: Rotation::Deg0,
        color_order: ColorOrder::Bgr,
    };

    let mut buf = vec![0u8; geometry.frame_bytes()];
    let armed = std::rc::Rc::new(std::cell::Cell::new(false));
    let timer = ManualTimer {
        armed: armed.clone(),
    };

    let mut driver = TftDriver::<Ili9341, _, _>::initialize(
        &mut buf,
        geometry,
        DriverConfig::default(),
        CountingBus::default(),
        timer,
        &mut NoopDelay,
    )
    .expect("driver setup");

    // Initial full paint queued by setup.
    if armed.replace(false) {
        let report = driver.flush();
        log::info!("initial paint: {:?}", report);
    }

    // A small dirty rectangle: one page's worth of traffic.
    let frame = driver.frame_mut();
    let stride: usize = 240 * 2;
    for y in 10usize..20 {
        for x in 10usize..20 {
            let at = y * stride + x * 2;
            frame[at] = 0xFF;
            frame[at + 1] = 0x07;
        }
    }
    driver.touch(10, 10, 10, 10);

    // Three touches inside the debounce window still mean one flush.
    driver.touch(12, 12, 2, 2);
    driver.touch(14, 14, 2, 2);

    if armed.replace(false) {
        let report = driver.flush();
        log::info!("incremental paint: {:?}", report);
    }

    let (bus, _timer) = driver.teardown();
    log::info!(
        "bus totals: {} commands, {} data bytes",
        bus.commands,
        bus.data_bytes
    );
}
