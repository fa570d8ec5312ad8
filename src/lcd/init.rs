use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

/// [`Config`] is the init config of a [`Lcd`]
///
/// Default is 2 lines, 5x8 font, display on, no cursor, left to right, backlight on
#[derive(Clone, Copy)]
pub struct Config {
    state: LcdState,
    power_on_us: u32,
    clear_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state: LcdState::default(),
            power_on_us: 500,
            clear_us: 500,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    pub fn get_backlight(&self) -> State {
        self.state.get_backlight()
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.state.set_backlight(backlight);
        self
    }

    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    pub fn set_line_mode(mut self, line: LineMode) -> Self {
        self.state.set_line_mode(line);
        self
    }

    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    pub fn set_display_state(mut self, display: State) -> Self {
        self.state.set_display_state(display);
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.state.set_cursor_state(cursor);
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.state.get_cursor_blink()
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.state.set_cursor_blink(blink);
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.state.set_direction(dir);
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.state.set_shift_type(shift);
        self
    }

    /// Wait before the first command, LCD controller needs it after power on
    pub fn get_power_on_us(&self) -> u32 {
        self.power_on_us
    }

    pub fn set_power_on_us(mut self, us: u32) -> Self {
        self.power_on_us = us;
        self
    }

    /// Wait after clear display and return home, they are the slow instructions
    pub fn get_clear_us(&self) -> u32 {
        self.clear_us
    }

    pub fn set_clear_us(mut self, us: u32) -> Self {
        self.clear_us = us;
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    pub fn new(
        sender: &'a mut Sender,
        delayer: &'b mut Delayer,
        config: Config,
    ) -> Result<Self, Sender::Error> {
        let state = config.state;

        // in initialization process, we'd better use "raw command", to strictly follow datasheet
        // controller may be in 8 bit or 4 bit mode here, the 3 nibbles of 0x3 bring it back to 8 bit
        sender.delay_and_send(CommandSet::Wake, delayer, config.power_on_us)?;
        sender.send(CommandSet::EnterFourBit, delayer)?;

        sender.send(
            CommandSet::EntryModeSet(state.get_direction(), state.get_shift_type()),
            delayer,
        )?;

        sender.send(
            CommandSet::DisplayOnOff {
                display: state.get_display_state(),
                cursor: state.get_cursor_state(),
                cursor_blink: state.get_cursor_blink(),
            },
            delayer,
        )?;

        sender.send(
            CommandSet::FunctionSet(state.get_line_mode(), state.get_font()),
            delayer,
        )?;

        sender.send(CommandSet::ClearDisplay, delayer)?;
        delayer.delay_us(config.clear_us);

        // set backlight after LCD init
        sender.set_backlight(state.get_backlight())?;

        log_debug!("LCD ready");

        Ok(Lcd {
            sender,
            delayer,
            state,
            clear_us: config.clear_us,
        })
    }
}
