//! Per-state entry configuration
//!
//! Each state owns the full output picture on entry: lamps, relay, LCD
//! text, buzzer and input lock. The controller applies an entry in one
//! pass so no output ever shows a mix of old and new state.

use crate::tone::{sounds, ToneSequence};

use super::LaunchState;

/// Logical levels of the indicator and relay lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputLevels {
    /// Green "ready" LED
    pub ready_led: bool,
    /// Amber "armed" LED
    pub armed_led: bool,
    /// Launch lamp on the pad
    pub launch_lamp: bool,
    /// Igniter relay
    pub relay: bool,
}

impl OutputLevels {
    /// Everything off, relay de-energized
    pub const ALL_OFF: Self = Self::new(false, false, false, false);

    /// Create an output configuration
    pub const fn new(ready_led: bool, armed_led: bool, launch_lamp: bool, relay: bool) -> Self {
        Self {
            ready_led,
            armed_led,
            launch_lamp,
            relay,
        }
    }
}

/// LCD content on entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryText {
    /// Fixed two-line message
    Fixed(&'static str, &'static str),
    /// The configured splash lines
    Splash,
}

/// Buzzer action on entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTone {
    /// Start a sequence
    Play(ToneSequence, bool),
    /// Silence the buzzer
    Stop,
}

/// Effect on the input lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockChange {
    /// Ignore operator inputs
    Lock,
    /// Accept operator inputs
    Unlock,
    /// Leave the lock as it is
    Keep,
}

/// Complete entry configuration for one state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    /// Indicator and relay levels
    pub outputs: OutputLevels,
    /// LCD content
    pub text: EntryText,
    /// Buzzer action
    pub tone: EntryTone,
    /// Input lock
    pub lock: LockChange,
}

/// Entry configuration for `state`
pub fn entry(state: LaunchState) -> StateEntry {
    use EntryText::{Fixed, Splash};
    use EntryTone::{Play, Stop};
    use LockChange::{Keep, Lock, Unlock};

    let off = OutputLevels::ALL_OFF;

    let (outputs, text, tone, lock) = match state {
        LaunchState::Startup => (
            off,
            Fixed("STARTUP", "Self-check..."),
            Play(&sounds::CHIRP, false),
            Lock,
        ),
        LaunchState::Splash => (off, Splash, Play(&sounds::CHIRP, false), Lock),
        LaunchState::Ready => (
            OutputLevels::new(true, false, false, false),
            Fixed("READY", "Disarmed"),
            Stop,
            Unlock,
        ),
        LaunchState::Armed => (
            OutputLevels::new(false, true, false, false),
            Fixed("ARMED", "Hold LAUNCH"),
            Play(&sounds::ARMED, true),
            Keep,
        ),
        LaunchState::LaunchCountdown => (
            OutputLevels::new(false, true, false, false),
            Fixed("COUNTDOWN", "Hold..."),
            Play(&sounds::COUNTDOWN_SIREN, true),
            Keep,
        ),
        LaunchState::Launching => (
            OutputLevels::new(false, false, true, true),
            Fixed("LAUNCHING", "Relay ON"),
            Play(&sounds::LAUNCH, true),
            Keep,
        ),
        LaunchState::Cooldown => (off, Fixed("COOLDOWN", "Post-fire"), Stop, Keep),
        LaunchState::Abort => (
            off,
            Fixed("ABORT", "Inhibit..."),
            Play(&sounds::ABORT, false),
            Keep,
        ),
        LaunchState::Fault => (
            off,
            Fixed("FAULT", "Disarm + Reset"),
            Play(&sounds::FAULT, true),
            Unlock,
        ),
    };

    StateEntry {
        outputs,
        text,
        tone,
        lock,
    }
}
