//! Message transport: blocking SPI bus plus a data/command select line.
//!
//! A command byte is framed by dropping DC around a one-byte transfer;
//! data buffers go out in a single blocking write with DC left high.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use tftfb_hal::BusTransport;

#[derive(Debug, PartialEq, Eq)]
pub enum SpiBusError<S: core::fmt::Debug, P: core::fmt::Debug> {
    /// The SPI peripheral reported a transfer failure.
    Spi(S),
    /// The DC line could not be driven.
    Pin(P),
}

pub struct SpiMessageBus<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiMessageBus<SPI, DC>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
{
    /// DC high means data; the constructor leaves the line in the data
    /// state so pixel streaming needs no toggling.
    pub fn new(spi: SPI, mut dc: DC) -> Result<Self, SpiBusError<SPI::Error, DC::Error>> {
        dc.set_high().map_err(SpiBusError::Pin)?;
        Ok(SpiMessageBus { spi, dc })
    }

    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> BusTransport for SpiMessageBus<SPI, DC>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
{
    type Error = SpiBusError<SPI::Error, DC::Error>;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(SpiBusError::Pin)?;
        let res = self.spi.write(&[cmd]).map_err(SpiBusError::Spi);
        // Return to data framing even when the transfer failed.
        self.dc.set_high().map_err(SpiBusError::Pin)?;
        res
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(SpiBusError::Spi)
    }
}
