//! Boot self-check sequence
//!
//! A fixed list of check items shown one at a time while the controller is
//! locked in STARTUP, followed by a completion message. Progress restarts
//! from the first item on every entry into STARTUP.

use crate::time::{elapsed, Millis};

/// Check item labels, at most one LCD line each
pub const SELF_CHECK_ITEMS: [&str; 20] = [
    "Ignition circuit",
    "Relay contacts",
    "Power supply",
    "Button debounce",
    "LCD display",
    "Buzzer tones",
    "ARM switch",
    "RESET button",
    "LAUNCH button",
    "Status LEDs",
    "Relay driver",
    "Safety locks",
    "Countdown timer",
    "Abort circuits",
    "Fault detection",
    "Cooldown timer",
    "ARM interlock",
    "Reset hold",
    "Global fault",
    "Final check",
];

/// Number of check items
pub const SELF_CHECK_COUNT: usize = SELF_CHECK_ITEMS.len();

/// What the self-check wants displayed this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfCheckStep {
    /// Show item `number` of [`SELF_CHECK_COUNT`] (1-based)
    Item {
        /// 1-based item number
        number: usize,
        /// Item label
        label: &'static str,
    },
    /// All items shown
    Complete,
}

/// Self-check progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfCheck {
    /// Next item to show
    index: usize,
    /// When the last item (or the completion message) was shown
    last_shown: Option<Millis>,
    /// When the completion message was shown
    completed_at: Option<Millis>,
}

impl SelfCheck {
    /// Fresh progress, nothing shown yet
    pub const fn new() -> Self {
        Self {
            index: 0,
            last_shown: None,
            completed_at: None,
        }
    }

    /// Restart from the first item
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance if the next step is due
    ///
    /// The first item is due immediately, later ones every `interval_ms`;
    /// the completion message follows the last item after one more
    /// interval. Returns `None` when nothing new should be shown.
    pub fn poll(&mut self, now: Millis, interval_ms: u32) -> Option<SelfCheckStep> {
        if self.completed_at.is_some() {
            return None;
        }
        if let Some(last) = self.last_shown {
            if elapsed(now, last) < interval_ms {
                return None;
            }
        }
        self.last_shown = Some(now);

        match SELF_CHECK_ITEMS.get(self.index) {
            Some(&label) => {
                self.index += 1;
                Some(SelfCheckStep::Item {
                    number: self.index,
                    label,
                })
            }
            None => {
                self.completed_at = Some(now);
                Some(SelfCheckStep::Complete)
            }
        }
    }

    /// Completion message has been held for `hold_ms`
    pub fn hold_elapsed(&self, now: Millis, hold_ms: u32) -> bool {
        self.completed_at
            .is_some_and(|at| elapsed(now, at) >= hold_ms)
    }

    /// Number of items shown so far
    pub fn items_shown(&self) -> usize {
        self.index
    }

    /// Check if every item and the completion message have been shown
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// When the last step was shown
    pub fn last_shown(&self) -> Option<Millis> {
        self.last_shown
    }
}
