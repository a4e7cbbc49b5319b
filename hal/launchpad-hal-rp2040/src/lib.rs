//! RP2040-specific HAL for the launch controller firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `launchpad-hal` traits:
//!
//! - GPIO outputs and inputs (embassy-rp `Output` / `Input`)
//! - Millisecond clock (embassy-time)
//! - PWM square-wave buzzer

#![no_std]

pub mod clock;
pub mod gpio;
pub mod tone;

pub use clock::EmbassyClock;
pub use gpio::{GpioInput, GpioOutput};
pub use tone::PwmBuzzer;
