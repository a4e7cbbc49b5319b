//! Non-blocking buzzer sequencer
//!
//! Feedback patterns are fixed lists of notes played by a [`TonePlayer`]
//! that advances once per loop pass. Nothing here ever waits.

pub mod player;
pub mod sounds;

pub use player::TonePlayer;

/// One step of a tone sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Frequency in Hz; 0 is a rest
    pub freq_hz: u16,
    /// Sounding time (ms)
    pub on_ms: u16,
    /// Silence after the note (ms)
    pub gap_ms: u16,
}

impl Note {
    /// Create a note
    pub const fn new(freq_hz: u16, on_ms: u16, gap_ms: u16) -> Self {
        Self {
            freq_hz,
            on_ms,
            gap_ms,
        }
    }

    /// Create a silent rest
    pub const fn rest(ms: u16) -> Self {
        Self::new(0, ms, 0)
    }

    /// Check if this note is a deliberate rest
    pub const fn is_rest(&self) -> bool {
        self.freq_hz == 0
    }

    /// Note plus gap (ms)
    pub const fn period_ms(&self) -> u32 {
        self.on_ms as u32 + self.gap_ms as u32
    }
}

/// Immutable, statically stored note list
pub type ToneSequence = &'static [Note];
