//! Board-agnostic core logic for the rocket launch controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Launch state machine with its safety interlocks
//! - Cooperative loop scheduler
//! - Non-blocking tone sequencer
//! - Debounced operator inputs
//! - Boot self-check sequence
//! - Configuration types and text parser
//! - Board capability traits

#![no_std]
#![deny(unsafe_code)]

mod log;

pub mod board;
pub mod config;
pub mod controller;
pub mod input;
pub mod safety;
pub mod scheduler;
pub mod selfcheck;
pub mod state;
pub mod time;
pub mod tone;
pub mod traits;

pub use board::{OutputPins, PinBoard};
pub use controller::LaunchController;
pub use scheduler::Scheduler;
