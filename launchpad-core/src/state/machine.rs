//! State and fault definitions

use crate::config::LaunchTiming;

/// Launch controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaunchState {
    /// Self-check sequence; any active control is a fault
    Startup,
    /// Welcome screen shown at power-on
    Splash,
    /// Disarmed and idle
    Ready,
    /// Arm switch engaged; waiting for a confirmed launch press
    Armed,
    /// Launch held; ignition fires if held for the full countdown
    LaunchCountdown,
    /// Relay energized
    Launching,
    /// Post-fire inhibit
    Cooldown,
    /// Countdown released early; short inhibit
    Abort,
    /// Locked out until disarm + timed reset
    Fault,
}

/// Why the controller last entered FAULT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCause {
    /// A control was active during the self-check
    StartupInputActive,
    /// Arm switch released mid-countdown
    InterlockBroken,
    /// Cooldown finished; every firing ends in lockout
    PostLaunchLockout,
    /// The global fault predicate reported an anomaly
    GlobalFault,
    /// Host requested FAULT directly
    Commanded,
}

impl LaunchState {
    /// Check if the relay may be energized in this state
    pub fn relay_allowed(&self) -> bool {
        matches!(self, LaunchState::Launching)
    }

    /// Check if this is the fault sink
    pub fn is_fault(&self) -> bool {
        matches!(self, LaunchState::Fault)
    }

    /// Fixed time after entry at which this state exits on its own
    ///
    /// `None` for states that only leave on operator input.
    pub fn time_box_ms(&self, timing: &LaunchTiming) -> Option<u32> {
        match self {
            LaunchState::Splash => Some(timing.splash_ms),
            LaunchState::LaunchCountdown => Some(timing.hold_to_launch_ms),
            LaunchState::Launching => Some(timing.relay_on_ms),
            LaunchState::Cooldown => Some(timing.cooldown_ms),
            LaunchState::Abort => Some(timing.abort_inhibit_ms),
            LaunchState::Startup
            | LaunchState::Ready
            | LaunchState::Armed
            | LaunchState::Fault => None,
        }
    }
}
