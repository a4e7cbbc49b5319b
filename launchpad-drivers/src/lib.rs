//! Peripheral driver implementations
//!
//! Chip-agnostic drivers built on `embedded-hal` 1.0 that implement the
//! `launchpad-hal` traits consumed by the core:
//!
//! - Character LCD (HD44780, 4-bit parallel)

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
