//! Global fault integration point
//!
//! The controller consults a [`FaultMonitor`] at the top of every tick,
//! before any state logic, and forces FAULT whenever it reports an anomaly.

pub mod monitor;

pub use monitor::{FaultFlag, FaultMonitor, NoFaultMonitor};
