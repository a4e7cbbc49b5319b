//! Capability interfaces
//!
//! These traits define the boundary between the launch controller and the
//! hardware. The controller owns a [`Board`] and reads a [`ControlInputs`];
//! tests substitute both with recording doubles and a virtual clock.

pub mod board;
pub mod inputs;

#[cfg(test)]
pub mod mock;

pub use board::{Board, BoardExt};
pub use inputs::ControlInputs;
