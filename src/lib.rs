/*!
# LCD 1602 over bit-banged I2C

Drive a LCD1602 through a PCF8574 adapter board, using two plain GPIO lines instead of an I2C peripheral.

Basic Usage:

1. Implement [`line::LinePort`] for your two GPIO lines <br/>
    or wrap two open-drain pins with [`line::OpenDrainPins`]
<br/>
<br/>
2. Create a [`bus::SoftI2c`] with the device address and a [`bus::Timing`]
<br/>
<br/>
3. Borrow it into a [`sender::I2cSender`], then use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`] and initialize LCD1602 hardware
<br/>
<br/>
4. use any methods provide by [`lcd::Lcd`] to control LCD1602
*/

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod bus;
pub mod command;
pub mod lcd;
pub mod line;
pub mod sender;
mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod mock;
