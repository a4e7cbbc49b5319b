//! Tone sequence player
//!
//! At most one sequence is active at a time. Starting a sequence silences
//! and replaces whatever was playing; the new sequence starts from its
//! first note on the next [`TonePlayer::update`].

use launchpad_hal::ToneChannel;

use super::{Note, ToneSequence};
use crate::time::{deadline_after, deadline_reached, Millis};

/// Non-blocking sequence player
#[derive(Debug, Clone, Default)]
pub struct TonePlayer {
    /// Sequence being played (borrowed, never copied)
    sequence: Option<ToneSequence>,
    /// Index of the current note
    index: usize,
    /// Restart at the end instead of going idle
    looping: bool,
    /// Player is producing output
    active: bool,
    /// Current note has finished sounding and its gap is running
    in_gap: bool,
    /// End of the current note or gap; `None` until the step has started
    step_deadline: Option<Millis>,
}

impl TonePlayer {
    /// Create an idle player
    pub const fn new() -> Self {
        Self {
            sequence: None,
            index: 0,
            looping: false,
            active: false,
            in_gap: false,
            step_deadline: None,
        }
    }

    /// Replace the current sequence
    ///
    /// An empty sequence leaves the player idle.
    pub fn play<T: ToneChannel>(&mut self, sequence: ToneSequence, looping: bool, channel: &mut T) {
        channel.stop();
        self.sequence = Some(sequence).filter(|s| !s.is_empty());
        self.index = 0;
        self.looping = looping;
        self.in_gap = false;
        self.active = self.sequence.is_some();
        self.step_deadline = None;
    }

    /// Halt output immediately
    pub fn stop<T: ToneChannel>(&mut self, channel: &mut T) {
        self.active = false;
        self.sequence = None;
        self.step_deadline = None;
        channel.stop();
    }

    /// Advance the sequence; call once per loop pass
    pub fn update<T: ToneChannel>(&mut self, now: Millis, channel: &mut T) {
        let Some(sequence) = self.sequence else {
            return;
        };

        // Zero-length notes and gaps complete within the same pass, bounded
        // so an all-zero looping sequence cannot spin forever.
        for _ in 0..=2 * sequence.len() {
            if !self.active {
                return;
            }
            match self.step_deadline {
                None => self.begin_step(now, sequence[self.index], channel),
                Some(deadline) if deadline_reached(now, deadline) => {
                    self.finish_step(sequence, channel)
                }
                Some(_) => return,
            }
        }
    }

    fn begin_step<T: ToneChannel>(&mut self, now: Millis, note: Note, channel: &mut T) {
        if self.in_gap {
            channel.stop();
            self.step_deadline = Some(deadline_after(now, note.gap_ms as u32));
        } else {
            if note.is_rest() {
                channel.stop();
            } else {
                channel.start(note.freq_hz, Some(note.on_ms));
            }
            self.step_deadline = Some(deadline_after(now, note.on_ms as u32));
        }
    }

    fn finish_step<T: ToneChannel>(&mut self, sequence: ToneSequence, channel: &mut T) {
        self.step_deadline = None;

        if !self.in_gap && sequence[self.index].gap_ms > 0 {
            self.in_gap = true;
            return;
        }

        self.in_gap = false;
        self.index += 1;
        if self.index >= sequence.len() {
            if self.looping {
                self.index = 0;
            } else {
                self.active = false;
                channel.stop();
            }
        }
    }

    /// Check if a sequence is playing
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check if the current sequence loops
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Check if the current note's gap is running
    pub fn is_in_gap(&self) -> bool {
        self.in_gap
    }

    /// Index of the current note
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sequence currently loaded (even if it has finished)
    pub fn sequence(&self) -> Option<ToneSequence> {
        self.sequence
    }
}
