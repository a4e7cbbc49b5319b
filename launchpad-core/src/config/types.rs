//! Launcher configuration
//!
//! Wiring polarity and display text that vary between builds of the
//! launch box, plus the timing block.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::timing::LaunchTiming;

/// Characters per LCD line
pub const LCD_COLUMNS: usize = 16;

/// One line of LCD text
pub type LcdLine = String<LCD_COLUMNS>;

/// Default splash title
pub const DEFAULT_SPLASH_TITLE: &str = "Rocket Launcher";
/// Default splash subtitle, carrying the firmware version
pub const DEFAULT_SPLASH_SUBTITLE: &str = concat!("Firmware v", env!("CARGO_PKG_VERSION"));

/// Complete launcher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LauncherConfig {
    /// Sequence timings
    pub timing: LaunchTiming,
    /// Relay driver is energized by driving its input LOW
    ///
    /// Discrete NPN drivers are active-high; many relay modules are
    /// active-low.
    pub relay_active_low: bool,
    /// Switches pull their line LOW when engaged (pull-up wiring)
    pub inputs_active_low: bool,
    /// Splash screen, first line
    pub splash_title: LcdLine,
    /// Splash screen, second line
    pub splash_subtitle: LcdLine,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            timing: LaunchTiming::default(),
            relay_active_low: false,
            inputs_active_low: true,
            splash_title: lcd_line(DEFAULT_SPLASH_TITLE),
            splash_subtitle: lcd_line(DEFAULT_SPLASH_SUBTITLE),
        }
    }
}

impl LauncherConfig {
    /// Electrical level that keeps the relay de-energized
    ///
    /// Boards must create the relay pin at this level so it is never
    /// energized, even briefly, while the rest of the hardware comes up.
    pub fn relay_idle_high(&self) -> bool {
        self.relay_active_low
    }
}

/// Copy `text` into a fixed LCD line, dropping what does not fit
pub fn lcd_line(text: &str) -> LcdLine {
    let mut line = LcdLine::new();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}
