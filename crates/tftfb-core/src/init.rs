//! Initialization sequence engine.
//!
//! Controller bring-up is pure data replay: a fixed ordered list of
//! commands, parameter bytes and settle delays. Chip modules hold their
//! tables as consts; this engine walks one against a transport and a
//! delay provider.

use embedded_hal::delay::DelayNs;
use tftfb_hal::BusTransport;

/// One step of an init table.
#[derive(Debug, Clone, Copy)]
pub enum SeqOp {
    /// Command byte.
    Cmd(u8),
    /// Parameter bytes for the preceding command.
    Data(&'static [u8]),
    /// Blocking settle delay.
    DelayMs(u32),
    /// Short blocking settle delay for sub-millisecond steps.
    DelayUs(u32),
}

/// Replay `seq` in order. Any transport failure aborts the replay;
/// bring-up errors are fatal to setup, there is nothing to retry.
pub fn run_sequence<B: BusTransport, D: DelayNs>(
    bus: &mut B,
    delay: &mut D,
    seq: &[SeqOp],
) -> Result<(), B::Error> {
    for op in seq {
        match *op {
            SeqOp::Cmd(cmd) => bus.send_command(cmd)?,
            SeqOp::Data(data) => bus.send_data(data)?,
            SeqOp::DelayMs(ms) => delay.delay_ms(ms),
            SeqOp::DelayUs(us) => delay.delay_us(us),
        }
    }
    Ok(())
}
