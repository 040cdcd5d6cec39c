//! Transport framing tests over mock embedded-hal pins and SPI.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::OutputPin;
use tftfb_core::bus::{ParallelStrobeBus, SpiMessageBus};
use tftfb_core::bus::parallel::StrobePins;
use tftfb_hal::BusTransport;

type PinLog = Rc<RefCell<Vec<(String, bool)>>>;

/// Output pin that records every level change into a shared log.
#[derive(Clone)]
struct RecPin {
    name: String,
    log: PinLog,
}

impl RecPin {
    fn new(name: &str, log: &PinLog) -> Self {
        RecPin {
            name: name.to_string(),
            log: log.clone(),
        }
    }
}

impl embedded_hal::digital::ErrorType for RecPin {
    type Error = Infallible;
}

impl OutputPin for RecPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.name.clone(), false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().push((self.name.clone(), true));
        Ok(())
    }
}

/// SPI bus that records write buffers.
#[derive(Default)]
struct RecSpi {
    writes: Vec<Vec<u8>>,
}

impl embedded_hal::spi::ErrorType for RecSpi {
    type Error = Infallible;
}

impl embedded_hal::spi::SpiBus<u8> for RecSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
        self.writes.push(words.to_vec());
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

fn events_for(log: &[(String, bool)], name: &str) -> Vec<bool> {
    log.iter()
        .filter(|(n, _)| n == name)
        .map(|(_, level)| *level)
        .collect()
}

#[test]
fn spi_command_framing_drops_dc_around_the_byte() {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let dc = RecPin::new("dc", &log);
    let mut bus = SpiMessageBus::new(RecSpi::default(), dc).unwrap();
    log.borrow_mut().clear(); // drop the constructor's idle-high

    bus.send_command(0x2A).unwrap();
    assert_eq!(events_for(&log.borrow(), "dc"), vec![false, true]);

    let (spi, _dc) = bus.release();
    assert_eq!(spi.writes, vec![vec![0x2A]]);
}

#[test]
fn spi_data_goes_out_in_one_message_with_dc_untouched() {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let dc = RecPin::new("dc", &log);
    let mut bus = SpiMessageBus::new(RecSpi::default(), dc).unwrap();
    log.borrow_mut().clear();

    bus.send_data(&[1, 2, 3, 4]).unwrap();
    assert!(log.borrow().is_empty());

    let (spi, _dc) = bus.release();
    assert_eq!(spi.writes, vec![vec![1, 2, 3, 4]]);
}

fn strobe_pins(log: &PinLog) -> StrobePins<RecPin, RecPin, RecPin, RecPin, RecPin> {
    StrobePins {
        data: std::array::from_fn(|i| RecPin::new(&format!("d{i}"), log)),
        wr: RecPin::new("wr", log),
        dc: RecPin::new("dc", log),
        cs: RecPin::new("cs", log),
        rst: RecPin::new("rst", log),
    }
}

#[test]
fn strobe_presents_bits_lsb_first_and_pulses_wr_cs() {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let mut bus = ParallelStrobeBus::new(strobe_pins(&log)).unwrap();
    log.borrow_mut().clear();

    bus.send_command(0b1010_0101).unwrap();

    let events = log.borrow();
    // Data lines carry the byte LSB-first.
    for (bit, want) in [true, false, true, false, false, true, false, true]
        .into_iter()
        .enumerate()
    {
        assert_eq!(events_for(&events, &format!("d{bit}")), vec![want]);
    }
    // Command framing pulls DC low.
    assert_eq!(events_for(&events, "dc"), vec![false]);
    // Latch order: WR down, CS pulse, WR up.
    let control: Vec<(&str, bool)> = events
        .iter()
        .filter(|(n, _)| n == "wr" || n == "cs")
        .map(|(n, l)| (n.as_str(), *l))
        .collect();
    assert_eq!(
        control,
        vec![("wr", false), ("cs", false), ("cs", true), ("wr", true)]
    );
}

#[test]
fn strobe_data_byte_keeps_dc_high_and_strobes_per_byte() {
    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let mut bus = ParallelStrobeBus::new(strobe_pins(&log)).unwrap();
    log.borrow_mut().clear();

    bus.send_data(&[0xFF, 0x00]).unwrap();

    let events = log.borrow();
    assert_eq!(events_for(&events, "dc"), vec![true, true]);
    // One WR pulse per byte.
    assert_eq!(events_for(&events, "wr"), vec![false, true, false, true]);
}

#[test]
fn hard_reset_pulses_the_reset_line() {
    struct NoopDelay;
    impl embedded_hal::delay::DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    let log: PinLog = Rc::new(RefCell::new(Vec::new()));
    let mut bus = ParallelStrobeBus::new(strobe_pins(&log)).unwrap();
    log.borrow_mut().clear();

    bus.hard_reset(&mut NoopDelay).unwrap();
    assert_eq!(events_for(&log.borrow(), "rst"), vec![false, true]);
}
