//! Stock feedback patterns
//!
//! Each looping pattern is framed to roughly one second so the operator
//! can count along.

use super::Note;

/// Rising double chirp: boot and splash
pub static CHIRP: [Note; 2] = [Note::new(2000, 80, 40), Note::new(2500, 80, 0)];

/// Slow two-tone siren while ARMED (loops)
pub static ARMED: [Note; 2] = [Note::new(1200, 180, 120), Note::new(1600, 180, 700)];

/// Single pip per second
pub static COUNTDOWN: [Note; 1] = [Note::new(1200, 90, 910)];

/// Louder two-tone burst per second during the countdown (loops)
pub static COUNTDOWN_SIREN: [Note; 2] = [Note::new(1400, 120, 40), Note::new(2600, 120, 720)];

/// Continuous tone while the relay is energized (loops)
pub static LAUNCH: [Note; 1] = [Note::new(1800, 500, 0)];

/// Falling double beep on abort
pub static ABORT: [Note; 2] = [Note::new(900, 120, 60), Note::new(700, 120, 60)];

/// Low warble while faulted (loops)
pub static FAULT: [Note; 2] = [Note::new(800, 200, 50), Note::new(600, 200, 150)];

/// Short tick per self-check item
pub static CHECK: [Note; 1] = [Note::new(1500, 100, 0)];
