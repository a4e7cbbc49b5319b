//! Recording test doubles

use heapless::Vec;
use launchpad_hal::ToneChannel;

use super::{Board, ControlInputs};
use crate::config::LCD_COLUMNS;
use crate::state::OutputLevels;
use crate::time::Millis;

const ROWS: usize = 2;

/// Board double with a virtual clock and a simulated 16x2 LCD
#[derive(Debug)]
pub struct MockBoard {
    /// Virtual clock
    pub now: Millis,
    /// Last output levels written
    pub outputs: OutputLevels,
    /// Number of `set_outputs` calls
    pub output_writes: usize,
    /// Currently sounding frequency
    pub tone: Option<u16>,
    /// Every frequency started, in order
    tones_started: Vec<u16, 256>,
    /// Number of `lcd_clear` calls
    pub lcd_clears: usize,
    lcd: [[u8; LCD_COLUMNS]; ROWS],
    cursor: (usize, usize),
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            now: 0,
            outputs: OutputLevels::ALL_OFF,
            output_writes: 0,
            tone: None,
            tones_started: Vec::new(),
            lcd_clears: 0,
            lcd: [[b' '; LCD_COLUMNS]; ROWS],
            cursor: (0, 0),
        }
    }

    /// LCD row with trailing blanks removed
    pub fn line(&self, row: usize) -> &str {
        core::str::from_utf8(&self.lcd[row])
            .unwrap_or("")
            .trim_end()
    }

    /// Frequencies started so far
    pub fn started_tones(&self) -> &[u16] {
        &self.tones_started
    }
}

impl ToneChannel for MockBoard {
    fn start(&mut self, freq_hz: u16, _duration_ms: Option<u16>) {
        self.tone = Some(freq_hz);
        let _ = self.tones_started.push(freq_hz);
    }

    fn stop(&mut self) {
        self.tone = None;
    }
}

impl Board for MockBoard {
    fn millis(&self) -> Millis {
        self.now
    }

    fn set_outputs(&mut self, levels: OutputLevels) {
        self.outputs = levels;
        self.output_writes += 1;
    }

    fn lcd_clear(&mut self) {
        self.lcd = [[b' '; LCD_COLUMNS]; ROWS];
        self.cursor = (0, 0);
        self.lcd_clears += 1;
    }

    fn lcd_set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (
            (col as usize).min(LCD_COLUMNS),
            (row as usize).min(ROWS - 1),
        );
    }

    fn lcd_print(&mut self, text: &str) {
        let (mut col, row) = self.cursor;
        for b in text.bytes() {
            if col >= LCD_COLUMNS {
                break;
            }
            self.lcd[row][col] = b;
            col += 1;
        }
        self.cursor = (col, row);
    }
}

/// Directly settable control levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockInputs {
    pub armed: bool,
    pub reset: bool,
    pub launch: bool,
}

impl ControlInputs for MockInputs {
    fn is_armed(&self) -> bool {
        self.armed
    }

    fn is_reset_held(&self) -> bool {
        self.reset
    }

    fn is_launch_held(&self) -> bool {
        self.launch
    }
}
