//! Character LCD abstraction
//!
//! Models a HD44780-style text module: a cursor addressed by column and
//! row, and ASCII text written from the cursor onward.

/// Character display (e.g. 16x2)
pub trait CharLcd {
    /// Number of visible columns
    const COLUMNS: u8;

    /// Number of visible rows
    const ROWS: u8;

    /// Clear the screen and home the cursor
    fn clear(&mut self);

    /// Move the cursor
    ///
    /// Positions outside the visible area are clamped by the implementation.
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write ASCII text at the cursor
    fn write_str(&mut self, text: &str);
}
