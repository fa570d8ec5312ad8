//! The two bus lines, driven the open-drain way
//!
//! A line is never pushed high. It is either sunk to ground ([`LineState::DrivenLow`], pin as output)
//! or let go ([`LineState::Released`], pin as input, external pull-up takes it high).
//!
//! If you want to run the bus on a new platform, you will need to implement [`LinePort`] trait,
//! or wrap two open-drain pins with [`OpenDrainPins`]

mod open_drain;

pub use open_drain::OpenDrainPins;

/// One of the two I2C lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// SCL
    Clock,
    /// SDA
    Data,
}

/// Pin direction, as the GPIO layer sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Floating, pulled high externally
    Input,
    /// Sinking to ground
    Output,
}

/// What the master is doing to a line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Pin is an output, line is low
    DrivenLow,
    /// Pin is an input, line is high unless some device holds it low
    #[default]
    Released,
}

impl LineState {
    /// The pin direction that produces this state
    pub fn direction(self) -> Direction {
        match self {
            LineState::DrivenLow => Direction::Output,
            LineState::Released => Direction::Input,
        }
    }

    /// Level the master asks for; a released line can still be pulled low by a device
    pub fn is_high(self) -> bool {
        matches!(self, LineState::Released)
    }
}

impl From<bool> for LineState {
    /// `true` releases the line, `false` drives it low
    fn from(high: bool) -> Self {
        match high {
            true => LineState::Released,
            false => LineState::DrivenLow,
        }
    }
}

/// The GPIO boundary the bus engine drives
///
/// Implementors only switch pin direction, clear the output latch and read the pin level,
/// everything above that lives in [`Lines`] and [`SoftI2c`](crate::bus::SoftI2c)
pub trait LinePort {
    /// Error from the GPIO layer, use [`core::convert::Infallible`] if it can't fail
    type Error: core::fmt::Debug;

    /// Switch a pin between input and output
    fn set_direction(&mut self, line: Line, direction: Direction) -> Result<(), Self::Error>;

    /// Write the output latch low, so that any later switch to output drives the line low
    fn clear(&mut self, line: Line) -> Result<(), Self::Error>;

    /// Read current level of a line, `true` is high
    fn read_level(&mut self, line: Line) -> Result<bool, Self::Error>;
}

/// Both lines of the bus, with the state the master last put them in
pub struct Lines<P: LinePort> {
    port: P,
    clock: LineState,
    data: LineState,
}

impl<P: LinePort> Lines<P> {
    /// Take ownership of the port, and put both lines into idle state
    ///
    /// Both pins become inputs first, then their latches are cleared,
    /// so the lines stay released and a later switch to output goes straight to low
    pub fn new(mut port: P) -> Result<Self, P::Error> {
        port.set_direction(Line::Clock, Direction::Input)?;
        port.set_direction(Line::Data, Direction::Input)?;
        port.clear(Line::Clock)?;
        port.clear(Line::Data)?;

        Ok(Self {
            port,
            clock: LineState::Released,
            data: LineState::Released,
        })
    }

    /// Sink a line to ground
    pub fn drive_low(&mut self, line: Line) -> Result<(), P::Error> {
        self.set(line, LineState::DrivenLow)
    }

    /// Let go of a line, the pull-up takes it high
    pub fn release(&mut self, line: Line) -> Result<(), P::Error> {
        self.set(line, LineState::Released)
    }

    /// Put a line into `state`
    pub fn set(&mut self, line: Line, state: LineState) -> Result<(), P::Error> {
        self.port.set_direction(line, state.direction())?;
        match line {
            Line::Clock => self.clock = state,
            Line::Data => self.data = state,
        }
        Ok(())
    }

    /// Last state the master put a line in
    pub fn state(&self, line: Line) -> LineState {
        match line {
            Line::Clock => self.clock,
            Line::Data => self.data,
        }
    }

    /// Read the real level of a line
    ///
    /// Only meaningful on a released line, a driven line always reads low
    pub fn sample(&mut self, line: Line) -> Result<bool, P::Error> {
        self.port.read_level(line)
    }

    /// Give the port back
    pub fn free(self) -> P {
        self.port
    }

    #[cfg(test)]
    pub(crate) fn port(&self) -> &P {
        &self.port
    }
}
