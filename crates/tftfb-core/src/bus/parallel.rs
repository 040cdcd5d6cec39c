//! Strobed transport: 8-bit parallel data bus, bit-banged.
//!
//! Each byte is presented on eight data lines and latched with a
//! write-strobe pulse while chip select is asserted; a mode line
//! distinguishes command from data framing. Pin assignments are a
//! construction-time table, not compiled-in constants.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use tftfb_hal::BusTransport;

/// A control or data line refused to switch.
#[derive(Debug, PartialEq, Eq)]
pub struct StrobeError;

/// Pin table for one strobed bus instance.
pub struct StrobePins<P, WR, DC, CS, RST> {
    /// D0..D7, least significant bit first.
    pub data: [P; 8],
    pub wr: WR,
    pub dc: DC,
    pub cs: CS,
    pub rst: RST,
}

pub struct ParallelStrobeBus<P, WR, DC, CS, RST> {
    pins: StrobePins<P, WR, DC, CS, RST>,
}

impl<P, WR, DC, CS, RST> ParallelStrobeBus<P, WR, DC, CS, RST>
where
    P: OutputPin,
    WR: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Take ownership of the pin table and park every line in its idle
    /// (high) state.
    pub fn new(mut pins: StrobePins<P, WR, DC, CS, RST>) -> Result<Self, StrobeError> {
        for line in pins.data.iter_mut() {
            line.set_high().map_err(|_| StrobeError)?;
        }
        pins.wr.set_high().map_err(|_| StrobeError)?;
        pins.dc.set_high().map_err(|_| StrobeError)?;
        pins.cs.set_high().map_err(|_| StrobeError)?;
        pins.rst.set_high().map_err(|_| StrobeError)?;
        Ok(ParallelStrobeBus { pins })
    }

    /// Pulse the reset line low. The settle times come from the chip's
    /// init table; this only covers the pulse itself.
    pub fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), StrobeError> {
        self.pins.rst.set_low().map_err(|_| StrobeError)?;
        delay.delay_us(5);
        self.pins.rst.set_high().map_err(|_| StrobeError)?;
        delay.delay_us(100);
        Ok(())
    }

    pub fn release(self) -> StrobePins<P, WR, DC, CS, RST> {
        self.pins
    }

    fn put_byte(&mut self, value: u8, command: bool) -> Result<(), StrobeError> {
        for (bit, line) in self.pins.data.iter_mut().enumerate() {
            if (value >> bit) & 1 == 1 {
                line.set_high().map_err(|_| StrobeError)?;
            } else {
                line.set_low().map_err(|_| StrobeError)?;
            }
        }

        if command {
            self.pins.dc.set_low().map_err(|_| StrobeError)?;
        } else {
            self.pins.dc.set_high().map_err(|_| StrobeError)?;
        }

        // Latch: WR low, CS pulse, WR high.
        self.pins.wr.set_low().map_err(|_| StrobeError)?;
        self.pins.cs.set_low().map_err(|_| StrobeError)?;
        self.pins.cs.set_high().map_err(|_| StrobeError)?;
        self.pins.wr.set_high().map_err(|_| StrobeError)?;
        Ok(())
    }
}

impl<P, WR, DC, CS, RST> BusTransport for ParallelStrobeBus<P, WR, DC, CS, RST>
where
    P: OutputPin,
    WR: OutputPin,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    type Error = StrobeError;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.put_byte(cmd, true)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.put_byte(byte, false)?;
        }
        Ok(())
    }
}
