use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::{Direction, Line, LinePort};

/// [`LinePort`] over two `embedded-hal` pins already configured as open-drain outputs
///
/// With an open-drain pin, `set_low()` sinks the line and `set_high()` lets it float,
/// which is exactly "output" and "input" of the bus engine.
/// The pins must also implement [`InputPin`] so the data line can be read back.
pub struct OpenDrainPins<Scl, Sda> {
    scl: Scl,
    sda: Sda,
}

impl<Scl, Sda, E> OpenDrainPins<Scl, Sda>
where
    Scl: OutputPin + InputPin + ErrorType<Error = E>,
    Sda: OutputPin + InputPin + ErrorType<Error = E>,
    E: core::fmt::Debug,
{
    /// Combine clock and data pins
    pub fn new(scl: Scl, sda: Sda) -> Self {
        Self { scl, sda }
    }

    /// Give back both pins
    pub fn free(self) -> (Scl, Sda) {
        (self.scl, self.sda)
    }
}

impl<Scl, Sda, E> LinePort for OpenDrainPins<Scl, Sda>
where
    Scl: OutputPin + InputPin + ErrorType<Error = E>,
    Sda: OutputPin + InputPin + ErrorType<Error = E>,
    E: core::fmt::Debug,
{
    type Error = E;

    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), E> {
        match (line, direction) {
            (Line::Clock, Direction::Output) => self.scl.set_low(),
            (Line::Clock, Direction::Input) => self.scl.set_high(),
            (Line::Data, Direction::Output) => self.sda.set_low(),
            (Line::Data, Direction::Input) => self.sda.set_high(),
        }
    }

    // latch and drive are the same register on an open-drain pin,
    // the line is already released by `set_direction(.., Input)`
    fn clear(&mut self, _line: Line) -> Result<(), E> {
        Ok(())
    }

    fn read_level(&mut self, line: Line) -> Result<bool, E> {
        match line {
            Line::Clock => self.scl.is_high(),
            Line::Data => self.sda.is_high(),
        }
    }
}
