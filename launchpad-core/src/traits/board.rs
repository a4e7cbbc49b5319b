//! Board capability interface
//!
//! Everything the launch controller may do to the outside world. The
//! controller is the only writer; no other component touches these outputs.

use core::fmt::Write;

use heapless::String;
use launchpad_hal::ToneChannel;

use crate::config::LCD_COLUMNS;
use crate::state::OutputLevels;
use crate::time::Millis;

/// Hardware the controller drives
///
/// Pin modes are fixed when the board is constructed; by the time a
/// `Board` exists its outputs are outputs and its clock is running.
pub trait Board: ToneChannel {
    /// Monotonic wrapping millisecond clock
    fn millis(&self) -> Millis;

    /// Drive the four indicator/relay lines together
    ///
    /// Levels are logical (`true` = lit / energized); relay polarity is the
    /// board's concern.
    fn set_outputs(&mut self, levels: OutputLevels);

    /// Clear the LCD and home the cursor
    fn lcd_clear(&mut self);

    /// Move the LCD cursor
    fn lcd_set_cursor(&mut self, col: u8, row: u8);

    /// Print text at the cursor
    fn lcd_print(&mut self, text: &str);

    /// Print a decimal number at the cursor
    fn lcd_print_number(&mut self, value: u32) {
        let mut digits: String<10> = String::new();
        // u32::MAX has 10 digits, so this cannot overflow the buffer
        let _ = write!(digits, "{}", value);
        self.lcd_print(&digits);
    }
}

/// Helpers for drawing whole screens and lines
pub trait BoardExt: Board {
    /// Replace both LCD lines
    fn show_lines(&mut self, line1: &str, line2: &str) {
        self.lcd_clear();
        self.lcd_set_cursor(0, 0);
        self.lcd_print(line1);
        self.lcd_set_cursor(0, 1);
        self.lcd_print(line2);
    }

    /// Overwrite one LCD row, blanking whatever the new text does not cover
    fn print_row(&mut self, row: u8, text: &str) {
        let mut line: String<LCD_COLUMNS> = String::new();
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        while line.push(' ').is_ok() {}

        self.lcd_set_cursor(0, row);
        self.lcd_print(&line);
    }
}

// Blanket implementation for all Board types
impl<T: Board> BoardExt for T {}
