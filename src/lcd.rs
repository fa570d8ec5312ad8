//! The LCD1602 driver, built on any [`SendCommand`]

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    sender::SendCommand,
    state::LcdState,
};

mod init;

pub use init::Config;

/// A LCD1602 that has been initialized
pub struct Lcd<'a, 'b, Sender: SendCommand, Delayer: DelayNs> {
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
    clear_us: u32,
}

#[allow(missing_docs)]
impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand,
    Delayer: DelayNs,
{
    /// Note:
    /// With a PCF8574 adapter, the backlight bit rides along every later byte
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Sender::Error> {
        self.sender.set_backlight(backlight)?;
        self.state.set_backlight(backlight);
        Ok(())
    }

    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    /// Clear the whole display, cursor goes back to (0, 0)
    pub fn clean_display(&mut self) -> Result<(), Sender::Error> {
        self.sender.send(CommandSet::ClearDisplay, self.delayer)?;
        self.delayer.delay_us(self.clear_us);
        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.sender.send(CommandSet::ReturnHome, self.delayer)?;
        self.delayer.delay_us(self.clear_us);
        self.state.set_cursor_pos((0, 0));
        Ok(())
    }

    pub fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Sender::Error> {
        self.sender
            .send(CommandSet::WriteDataToRAM(byte), self.delayer)?;

        // since AC of LCD controller will automaticlly increase, we only need to update LCD struct
        self.state.step_cursor();
        Ok(())
    }

    /// In this implementation, character only support
    /// from ASCII 0x20 (white space) to ASCII 0x7D (`}`)
    pub fn write_char_to_cur(&mut self, char: char) -> Result<(), Sender::Error> {
        // map char out side of ASCII 0x20 and 0x7D to full rectangle
        let out_byte = match char.is_ascii() {
            true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
            _ => 0xFF,
        };

        self.write_u8_to_cur(out_byte)
    }

    pub fn write_str_to_cur(&mut self, str: &str) -> Result<(), Sender::Error> {
        str.chars()
            .try_for_each(|char| self.write_char_to_cur(char))
    }

    pub fn write_char_to_pos(&mut self, char: char, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.set_cursor_pos(pos)?;
        self.write_char_to_cur(char)
    }

    pub fn write_str_to_pos(&mut self, str: &str, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.set_cursor_pos(pos)?;
        self.write_str_to_cur(str)
    }

    /// `pos` is (column, line)
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.state.set_cursor_pos(pos);

        self.sender.send(
            CommandSet::SetDDRAM(LcdState::ddram_addr(pos)),
            self.delayer,
        )
    }

    pub fn get_cursor_pos(&self) -> (u8, u8) {
        self.state.get_cursor_pos()
    }

    pub fn set_display_state(&mut self, display: State) -> Result<(), Sender::Error> {
        self.state.set_display_state(display);
        self.send_display_on_off()
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn toggle_display(&mut self) -> Result<(), Sender::Error> {
        match self.get_display_state() {
            State::Off => self.set_display_state(State::On),
            State::On => self.set_display_state(State::Off),
        }
    }

    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_state(cursor);
        self.send_display_on_off()
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_blink(blink);
        self.send_display_on_off()
    }

    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Sender::Error> {
        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Sender::Error> {
        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn get_line_capacity(&self) -> u8 {
        self.state.get_line_capacity()
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }

    fn send_display_on_off(&mut self) -> Result<(), Sender::Error> {
        self.sender.send(
            CommandSet::DisplayOnOff {
                display: self.state.get_display_state(),
                cursor: self.state.get_cursor_state(),
                cursor_blink: self.state.get_cursor_blink(),
            },
            self.delayer,
        )
    }

    fn send_entry_mode(&mut self) -> Result<(), Sender::Error> {
        self.sender.send(
            CommandSet::EntryModeSet(self.state.get_direction(), self.state.get_shift_type()),
            self.delayer,
        )
    }
}

impl<'a, 'b, Sender, Delayer> fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_str_to_cur(s).map_err(|_| fmt::Error)
    }
}
