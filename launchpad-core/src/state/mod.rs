//! Launch state machine definition
//!
//! Defines the authoritative lifecycle of the launch box. The state set is
//! explicit, finite and deterministic; [`entry`] gives the complete output
//! configuration each state imposes on entry.

pub mod entry;
pub mod machine;

pub use entry::{entry, EntryText, EntryTone, LockChange, OutputLevels, StateEntry};
pub use machine::{FaultCause, LaunchState};
