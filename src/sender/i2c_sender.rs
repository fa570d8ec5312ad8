use embedded_hal::delay::DelayNs;

use crate::{
    bus::{BusError, SoftI2c},
    command::{Command, RegisterSelection, State},
    line::LinePort,
    sender::SendCommand,
    utils::BitOps,
};

// I2C to parallel:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS

const RS_BIT: u8 = 0;
const EN_BIT: u8 = 2;
const BL_BIT: u8 = 3;

/// Sends [`Command`]s to a PCF8574 adapter through a borrowed [`SoftI2c`]
///
/// Every LCD byte is cut into 2 nibbles, and each nibble is latched by an EN high then EN low write,
/// that is 4 bus transactions per byte.
pub struct I2cSender<'a, P: LinePort, D: DelayNs> {
    i2c: &'a mut SoftI2c<P, D>,
    backlight: State,
    settle_us: u32,
    strobe_us: u32,
}

impl<'a, P: LinePort, D: DelayNs> I2cSender<'a, P, D> {
    #[allow(missing_docs)]
    pub fn new(i2c: &'a mut SoftI2c<P, D>) -> Self {
        Self {
            i2c,
            backlight: State::On,
            settle_us: 300,
            strobe_us: 1,
        }
    }

    /// Wait before and after each byte, so the LCD can finish last instruction
    pub fn set_settle_us(mut self, us: u32) -> Self {
        self.settle_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_settle_us(&self) -> u32 {
        self.settle_us
    }

    /// Wait between the 4 writes of a byte
    pub fn set_strobe_us(mut self, us: u32) -> Self {
        self.strobe_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_strobe_us(&self) -> u32 {
        self.strobe_us
    }

    fn frame(&self, command: &Command) -> [u8; 4] {
        let mut base = 0u8;
        if command.get_register_selection() == RegisterSelection::Data {
            base.set_bit(RS_BIT);
        }
        if self.backlight == State::On {
            base.set_bit(BL_BIT);
        }

        let data = command.get_data();
        let high = base | (data & 0xF0);
        let low = base | (data << 4);

        let mut high_en = high;
        high_en.set_bit(EN_BIT);
        let mut low_en = low;
        low_en.set_bit(EN_BIT);

        [high_en, high, low_en, low]
    }
}

impl<'a, P: LinePort, D: DelayNs> SendCommand for I2cSender<'a, P, D> {
    type Error = BusError<P::Error>;

    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Self::Error> {
        let command = command.into();
        let seq = self.frame(&command);

        delayer.delay_us(self.settle_us);

        for (index, &byte) in seq.iter().enumerate() {
            if index > 0 {
                delayer.delay_us(self.strobe_us);
            }
            if let Err(err) = self.i2c.write_byte_to_device(byte) {
                log_warn!("LCD byte {:#x} aborted at write {}", command.get_data(), index);
                return Err(err);
            }
        }

        delayer.delay_us(self.settle_us);

        Ok(())
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.backlight = backlight;

        let mut raw = 0u8;
        if backlight == State::On {
            raw.set_bit(BL_BIT);
        }

        self.i2c.write_byte_to_device(raw)
    }
}
