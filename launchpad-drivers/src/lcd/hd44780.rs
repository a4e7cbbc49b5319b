//! HD44780 character LCD, 4-bit parallel bus
//!
//! Write-only wiring (R/W tied to ground), so the busy flag cannot be read
//! and every command is followed by a fixed settle delay instead.
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = Hd44780::new(rs, en, [d4, d5, d6, d7], Delay);
//! lcd.init()?;
//! lcd.set_cursor(0, 1)?;
//! lcd.print("Hold LAUNCH")?;
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use launchpad_hal::CharLcd;

/// Instruction set subset used by the driver
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    /// Entry mode: cursor moves right, no display shift
    pub const ENTRY_INCREMENT: u8 = 0x02;
    /// Display control: display on, cursor and blink off
    pub const DISPLAY_ON: u8 = 0x04;
    /// Function set: two lines, 5x8 font, 4-bit bus
    pub const TWO_LINES: u8 = 0x08;
}

/// Visible columns
const COLUMNS: u8 = 16;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Command execution time for most instructions (datasheet: 37 us)
const COMMAND_US: u32 = 50;
/// Clear/home execution time (datasheet: 1.52 ms)
const CLEAR_US: u32 = 2_000;

/// 16x2 HD44780 display on a 4-bit bus
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4..D7
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Take ownership of the bus lines
    ///
    /// The display is not touched until [`init`](Self::init).
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
        }
    }

    /// Power-on initialization by instruction
    ///
    /// Forces the controller into 4-bit mode regardless of the state it
    /// woke up in, then clears the screen.
    pub fn init(&mut self) -> Result<(), P::Error> {
        self.rs.set_low()?;
        self.en.set_low()?;
        self.delay.delay_ms(50);

        // Three 8-bit function sets resynchronize the nibble phase
        self.write_nibble(0x03)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;
        self.delay.delay_us(150);

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT)
    }

    /// Clear the display and home the cursor
    pub fn clear(&mut self) -> Result<(), P::Error> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_us(CLEAR_US);
        Ok(())
    }

    /// Move the cursor, clamping to the visible area
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), P::Error> {
        self.command(cmd::SET_DDRAM_ADDR | ddram_address(col, row))
    }

    /// Write text at the cursor
    ///
    /// Characters outside printable ASCII are shown as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), P::Error> {
        for c in text.chars() {
            self.write_data(glyph(c))?;
        }
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), P::Error> {
        self.rs.set_low()?;
        self.write_byte(value)
    }

    fn write_data(&mut self, value: u8) -> Result<(), P::Error> {
        self.rs.set_high()?;
        self.write_byte(value)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), P::Error> {
        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)?;
        self.delay.delay_us(COMMAND_US);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), P::Error> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(nibble & (1 << bit) != 0))?;
        }
        // Data latches on the falling edge; 450 ns minimum pulse width
        self.en.set_high()?;
        self.delay.delay_us(1);
        self.en.set_low()?;
        self.delay.delay_us(1);
        Ok(())
    }
}

/// DDRAM address for a cursor position
fn ddram_address(col: u8, row: u8) -> u8 {
    let row = (row as usize).min(ROW_OFFSETS.len() - 1);
    let col = col.min(COLUMNS - 1);
    ROW_OFFSETS[row] + col
}

/// ROM code for a character
fn glyph(c: char) -> u8 {
    if c.is_ascii() && !c.is_ascii_control() {
        c as u8
    } else {
        b'?'
    }
}

impl<P, D> CharLcd for Hd44780<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
{
    const COLUMNS: u8 = COLUMNS;
    const ROWS: u8 = ROW_OFFSETS.len() as u8;

    fn clear(&mut self) {
        Hd44780::clear(self).unwrap_or_else(|never| match never {});
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        Hd44780::set_cursor(self, col, row).unwrap_or_else(|never| match never {});
    }

    fn write_str(&mut self, text: &str) {
        self.print(text).unwrap_or_else(|never| match never {});
    }
}
