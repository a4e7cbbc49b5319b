//! Launchpad Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific board crates. The launch controller core only ever
//! talks to hardware through these traits, so the same safety logic runs
//! on a real board and against a host-side test double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  launchpad-firmware (board wiring)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  launchpad-core (FSM, tones, debounce)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  launchpad-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`tone::ToneChannel`] - Square-wave buzzer output
//! - [`clock::MonotonicClock`] - Wrapping millisecond clock
//! - [`lcd::CharLcd`] - Character display

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod lcd;
pub mod tone;

// Re-export key traits at crate root for convenience
pub use clock::MonotonicClock;
pub use gpio::{ActiveLow, InputPin, OutputPin, Polarized};
pub use lcd::CharLcd;
pub use tone::ToneChannel;
