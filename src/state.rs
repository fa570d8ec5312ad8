use crate::command::{Font, LineMode, MoveDirection, ShiftType, State};

#[derive(Clone, Copy)]
pub(crate) struct LcdState {
    line: LineMode,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    cursor_pos: (u8, u8),
    backlight: State,
}

impl Default for LcdState {
    fn default() -> Self {
        Self {
            line: LineMode::TwoLine,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            cursor_pos: (0, 0),
            backlight: State::On,
        }
    }
}

impl LcdState {
    pub(crate) fn get_backlight(&self) -> State {
        self.backlight
    }

    pub(crate) fn set_backlight(&mut self, backlight: State) {
        self.backlight = backlight;
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        self.line
    }

    pub(crate) fn set_line_mode(&mut self, line: LineMode) {
        assert!(
            !(self.font == Font::Font5x11 && line == LineMode::TwoLine),
            "font is 5x11, line cannot be 2"
        );

        self.line = line;
    }

    pub(crate) fn get_line_count(&self) -> u8 {
        match self.line {
            LineMode::OneLine => 1,
            LineMode::TwoLine => 2,
        }
    }

    pub(crate) fn get_line_capacity(&self) -> u8 {
        match self.line {
            LineMode::OneLine => 80,
            LineMode::TwoLine => 40,
        }
    }

    pub(crate) fn get_font(&self) -> Font {
        self.font
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        assert!(
            !(self.line == LineMode::TwoLine && font == Font::Font5x11),
            "there is 2 line, font cannot be 5x11"
        );

        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_cursor_pos(&self) -> (u8, u8) {
        self.cursor_pos
    }

    pub(crate) fn set_cursor_pos(&mut self, pos: (u8, u8)) {
        assert!(
            pos.0 < self.get_line_capacity(),
            "x offset too big, should less than line capacity"
        );
        assert!(
            pos.1 < self.get_line_count(),
            "y offset too big, should less than line count"
        );

        self.cursor_pos = pos;
    }

    /// DDRAM address counter steps after each data write, and wraps around
    pub(crate) fn step_cursor(&mut self) {
        let (x, y) = self.cursor_pos;
        let last_x = self.get_line_capacity() - 1;
        let last_y = self.get_line_count() - 1;

        self.cursor_pos = match self.direction {
            MoveDirection::LeftToRight if x < last_x => (x + 1, y),
            MoveDirection::LeftToRight if y < last_y => (0, y + 1),
            MoveDirection::LeftToRight => (0, 0),
            MoveDirection::RightToLeft if x > 0 => (x - 1, y),
            MoveDirection::RightToLeft if y > 0 => (last_x, y - 1),
            MoveDirection::RightToLeft => (last_x, last_y),
        };
    }

    /// DDRAM address of a cursor position, the second line starts at 0x40
    pub(crate) fn ddram_addr(pos: (u8, u8)) -> u8 {
        pos.1 * 0x40 + pos.0
    }
}
