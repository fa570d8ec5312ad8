//! LCD1602 instruction set, and how each instruction encodes into one byte

use crate::utils::BitOps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum CommandSet {
    // not commands from datasheet, they are the power-on sequence of 4 pin mode
    // packed 2 nibbles per byte, we name them, to make things tidy
    /// `0x3`, `0x3`: 8 bit function set, twice
    Wake,
    /// `0x3`, `0x2`: a last 8 bit function set, then switch to 4 bit
    EnterFourBit,

    ClearDisplay,
    ReturnHome,
    EntryModeSet(MoveDirection, ShiftType),
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    FunctionSet(LineMode, Font),
    SetDDRAM(u8),
    WriteDataToRAM(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum State {
    Off,
    #[default]
    On,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Font {
    #[default]
    Font5x8,
    Font5x11,
}

/// Which LCD register a byte goes to, it's the RS pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelection {
    /// Instruction register
    Command,
    /// Data register, a character to display
    Data,
}

/// One byte for the LCD, and where it goes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: u8) -> Self {
        Self { rs, data }
    }

    #[allow(missing_docs)]
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    #[allow(missing_docs)]
    pub fn get_data(&self) -> u8 {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::Wake => Self::new(RegisterSelection::Command, 0b0011_0011),

            CommandSet::EnterFourBit => Self::new(RegisterSelection::Command, 0b0011_0010),

            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::ReturnHome => Self::new(RegisterSelection::Command, 0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                for (pos, state) in [(2, display), (1, cursor), (0, cursor_blink)] {
                    match state {
                        State::Off => raw_bits.clear_bit(pos),
                        State::On => raw_bits.set_bit(pos),
                    };
                }

                Self::new(RegisterSelection::Command, raw_bits)
            }

            // data width is always 4 bit, PCF8574 only wires DB4~DB7
            CommandSet::FunctionSet(line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::SetDDRAM(addr) => {
                assert!(addr < 2u8.pow(7), "DDRAM address out of range");

                Self::new(RegisterSelection::Command, 0b1000_0000 | addr)
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}
