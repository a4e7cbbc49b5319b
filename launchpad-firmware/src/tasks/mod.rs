//! Firmware loops

pub mod launcher;

pub use launcher::run_launcher;
