//! Built-in sender
//! If you want to drive the LCD in another way, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, State};

mod i2c_sender;

pub use i2c_sender::I2cSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
pub trait SendCommand {
    /// Error of the underlying transport
    type Error;

    /// Push one [`Command`] to hardware
    ///
    /// `delayer` is for the waits inside the framing of a single command
    fn send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
    ) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut impl DelayNs,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command, delayer)
    }

    /// Get the current backlight
    fn get_backlight(&self) -> State;

    /// Set the backlight
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error>;
}
