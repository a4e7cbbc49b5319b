//! Launch sequence timing
//!
//! Every delay the controller observes lives here. The `Default` values are
//! the reference timings and must not drift: external test rigs time the
//! launch box against them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::loader::ConfigError;

/// Launch button must be held this long while armed to start the countdown
pub const LAUNCH_CONFIRM_MS: u32 = 250;
/// Launch button hold required through the countdown
pub const HOLD_TO_LAUNCH_MS: u32 = 5000;
/// Relay energized duration
pub const RELAY_ON_MS: u32 = 5000;
/// Post-fire inhibit before the controller drops into FAULT
pub const COOLDOWN_MS: u32 = 5000;
/// Inhibit after an aborted countdown
pub const ABORT_INHIBIT_MS: u32 = 1500;
/// Disarm + hold reset this long to clear FAULT
pub const RESET_HOLD_MS: u32 = 2500;
/// Splash screen duration
pub const SPLASH_MS: u32 = 5000;
/// Total self-check display time
pub const SELF_CHECK_TOTAL_MS: u32 = 5000;
/// "COMPLETE!" hold before READY
pub const SELF_CHECK_HOLD_MS: u32 = 1000;
/// Minimum interval between live LCD refreshes
pub const DISPLAY_REFRESH_MS: u32 = 250;
/// Input debounce interval
pub const DEBOUNCE_MS: u32 = 10;

/// Longest relay pulse the configuration may request
pub const MAX_RELAY_ON_MS: u32 = 10_000;

/// Timing parameters for the launch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaunchTiming {
    /// Launch hold needed in ARMED before the countdown starts (ms)
    pub launch_confirm_ms: u32,
    /// Countdown length; launch must stay held the whole time (ms)
    pub hold_to_launch_ms: u32,
    /// Relay energized time (ms)
    pub relay_on_ms: u32,
    /// Cooldown after firing (ms)
    pub cooldown_ms: u32,
    /// Abort inhibit (ms)
    pub abort_inhibit_ms: u32,
    /// Reset hold to clear FAULT (ms)
    pub reset_hold_ms: u32,
    /// Splash screen (ms)
    pub splash_ms: u32,
    /// Whole self-check sequence, split evenly across the items (ms)
    pub self_check_total_ms: u32,
    /// Completion message hold (ms)
    pub self_check_hold_ms: u32,
    /// Live display refresh period (ms)
    pub display_refresh_ms: u32,
    /// Input debounce interval (ms)
    pub debounce_ms: u32,
}

impl Default for LaunchTiming {
    fn default() -> Self {
        Self {
            launch_confirm_ms: LAUNCH_CONFIRM_MS,
            hold_to_launch_ms: HOLD_TO_LAUNCH_MS,
            relay_on_ms: RELAY_ON_MS,
            cooldown_ms: COOLDOWN_MS,
            abort_inhibit_ms: ABORT_INHIBIT_MS,
            reset_hold_ms: RESET_HOLD_MS,
            splash_ms: SPLASH_MS,
            self_check_total_ms: SELF_CHECK_TOTAL_MS,
            self_check_hold_ms: SELF_CHECK_HOLD_MS,
            display_refresh_ms: DISPLAY_REFRESH_MS,
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

impl LaunchTiming {
    /// Interval between self-check items
    pub fn self_check_interval_ms(&self, items: usize) -> u32 {
        self.self_check_total_ms / (items.max(1) as u32)
    }

    /// Reject timings that would weaken the interlocks
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launch_confirm_ms == 0
            || self.hold_to_launch_ms < self.launch_confirm_ms
            || self.relay_on_ms == 0
            || self.relay_on_ms > MAX_RELAY_ON_MS
            || self.reset_hold_ms == 0
        {
            return Err(ConfigError::UnsafeTiming);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_timings() {
        let t = LaunchTiming::default();
        assert_eq!(t.launch_confirm_ms, 250);
        assert_eq!(t.hold_to_launch_ms, 5000);
        assert_eq!(t.relay_on_ms, 5000);
        assert_eq!(t.cooldown_ms, 5000);
        assert_eq!(t.abort_inhibit_ms, 1500);
        assert_eq!(t.reset_hold_ms, 2500);
        assert_eq!(t.self_check_interval_ms(20), 250);
        assert_eq!(t.debounce_ms, 10);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_unsafe_timings_rejected() {
        let base = LaunchTiming::default();

        let t = LaunchTiming { launch_confirm_ms: 0, ..base };
        assert_eq!(t.validate(), Err(ConfigError::UnsafeTiming));

        let t = LaunchTiming { hold_to_launch_ms: 100, ..base };
        assert_eq!(t.validate(), Err(ConfigError::UnsafeTiming));

        let t = LaunchTiming { relay_on_ms: MAX_RELAY_ON_MS + 1, ..base };
        assert_eq!(t.validate(), Err(ConfigError::UnsafeTiming));

        let t = LaunchTiming { reset_hold_ms: 0, ..base };
        assert_eq!(t.validate(), Err(ConfigError::UnsafeTiming));
    }
}
