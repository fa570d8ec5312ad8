//! Software I2C master
//!
//! [`SoftI2c`] speaks I2C by switching the two [`Lines`] in a strict order, waiting [`Timing`] between each step.
//! It only writes: one address byte, one data byte, per transaction.
//!
//! The engine is single-threaded by construction, and a transaction can't be interrupted.
//! If the lines are shared, lock around a whole [`SoftI2c::write_byte_to_device()`], not around a primitive.

use embedded_hal::{
    delay::DelayNs,
    i2c::{NoAcknowledgeSource, SevenBitAddress},
};

use crate::{
    line::{Line, LinePort, LineState, Lines},
    utils::{BitOps, BitState},
};

mod error;
mod timing;

pub use error::BusError;
pub use timing::Timing;

/// What the device answered on the 9th clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acknowledge {
    /// DATA was pulled low
    Ack,
    /// DATA stayed high
    Nack,
}

impl Acknowledge {
    #[allow(missing_docs)]
    pub fn is_nack(self) -> bool {
        self == Acknowledge::Nack
    }
}

/// Bit-banged I2C master bound to one device address
pub struct SoftI2c<P: LinePort, D: DelayNs> {
    lines: Lines<P>,
    delayer: D,
    address: SevenBitAddress,
    timing: Timing,
}

impl<P: LinePort, D: DelayNs> SoftI2c<P, D> {
    /// Take the lines, put them into idle state, and bind to `address`
    pub fn new(
        port: P,
        delayer: D,
        address: SevenBitAddress,
        timing: Timing,
    ) -> Result<Self, BusError<P::Error>> {
        if address > 0x7F {
            return Err(BusError::InvalidAddress(address));
        }

        Ok(Self {
            lines: Lines::new(port)?,
            delayer,
            address,
            timing,
        })
    }

    /// Write one byte to the device: start, address, data, stop
    ///
    /// Whatever the device answers, the bus is back to idle when this returns,
    /// a missing ACK is reported only after the stop condition is sent.
    /// Data byte is not sent when the address is not acknowledged.
    pub fn write_byte_to_device(&mut self, data: u8) -> Result<(), BusError<P::Error>> {
        log_trace!("i2c write {:#x} to {:#x}", data, self.address);

        self.start()?;

        if self.write_byte(self.address << 1)?.is_nack() {
            self.stop()?;
            log_debug!("no ack for address {:#x}", self.address);
            return Err(BusError::NoAck(NoAcknowledgeSource::Address));
        }

        let ack = self.write_byte(data)?;
        self.stop()?;

        if ack.is_nack() {
            log_debug!("no ack for data {:#x} at {:#x}", data, self.address);
            return Err(BusError::NoAck(NoAcknowledgeSource::Data));
        }

        Ok(())
    }

    /// DATA falls while CLOCK is high
    ///
    /// Expects the bus to be idle, both lines released
    pub fn start(&mut self) -> Result<(), BusError<P::Error>> {
        self.lines.drive_low(Line::Data)?;
        self.delay(self.timing.get_start_hold_ns());
        self.lines.drive_low(Line::Clock)?;
        self.delay(self.timing.get_clock_low_ns());
        Ok(())
    }

    /// DATA rises while CLOCK is high, both lines end released
    pub fn stop(&mut self) -> Result<(), BusError<P::Error>> {
        // after an ACK cycle DATA is already high, pull it down first
        // so that the release below is an edge the device can see
        if self.lines.state(Line::Clock) == LineState::DrivenLow {
            self.lines.drive_low(Line::Data)?;
            self.delay(self.timing.get_data_setup_ns());
        }

        self.lines.release(Line::Clock)?;
        self.delay(self.timing.get_stop_setup_ns());
        self.lines.release(Line::Data)?;
        self.delay(self.timing.get_bus_free_ns());
        Ok(())
    }

    /// A start condition without a stop before it
    pub fn repeated_start(&mut self) -> Result<(), BusError<P::Error>> {
        // CLOCK must rise with DATA high, or the device sees a stop instead
        if self.lines.state(Line::Data) == LineState::DrivenLow {
            self.lines.release(Line::Data)?;
            self.delay(self.timing.get_data_setup_ns());
        }

        self.lines.release(Line::Clock)?;
        self.delay(self.timing.get_start_setup_ns());
        self.lines.drive_low(Line::Data)?;
        self.delay(self.timing.get_start_hold_ns());
        self.lines.drive_low(Line::Clock)?;
        self.delay(self.timing.get_clock_low_ns());
        Ok(())
    }

    /// Shift out 8 bits MSB first, then sample ACK on the 9th clock
    ///
    /// CLOCK must be low when called, it is low again on return and DATA is released
    pub fn write_byte(&mut self, byte: u8) -> Result<Acknowledge, BusError<P::Error>> {
        for pos in (0..8).rev() {
            let bit = byte.check_bit(pos) == BitState::Set;
            self.lines.set(Line::Data, LineState::from(bit))?;
            self.delay(self.timing.get_data_setup_ns());
            self.lines.release(Line::Clock)?;
            self.delay(self.timing.get_clock_high_ns());
            self.lines.drive_low(Line::Clock)?;
            self.delay(self.timing.get_clock_low_ns());
        }

        // hand DATA to the device
        self.lines.release(Line::Data)?;
        self.delay(self.timing.get_data_setup_ns());
        self.lines.release(Line::Clock)?;
        self.delay(self.timing.get_clock_high_ns());
        let high = self.lines.sample(Line::Data)?;
        self.lines.drive_low(Line::Clock)?;
        self.delay(self.timing.get_clock_low_ns());

        Ok(match high {
            true => Acknowledge::Nack,
            false => Acknowledge::Ack,
        })
    }

    /// The 7-bit device address
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    #[allow(missing_docs)]
    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[allow(missing_docs)]
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    /// Last state the master put a line in
    pub fn line_state(&self, line: Line) -> LineState {
        self.lines.state(line)
    }

    /// Give back the port and the delay provider
    pub fn free(self) -> (P, D) {
        (self.lines.free(), self.delayer)
    }

    fn delay(&mut self, ns: u32) {
        self.delayer.delay_ns(ns);
    }
}
