//! Fault monitor implementations
//!
//! The reference hardware has no fault sensing (igniter continuity, supply
//! brown-out and the like would plug in here), so the default monitor never
//! reports a fault. The priority of the check over every other transition
//! is enforced by the controller regardless of the monitor used.

/// Global anomaly predicate
pub trait FaultMonitor {
    /// True while an anomaly is present
    fn fault_active(&self) -> bool;
}

/// Monitor for boards without fault sensing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFaultMonitor;

impl FaultMonitor for NoFaultMonitor {
    fn fault_active(&self) -> bool {
        false
    }
}

/// Fault line set by the host
///
/// For boards whose fault detection lives outside the controller: the host
/// raises and clears the flag, the controller reacts on its next tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultFlag {
    active: bool,
}

impl FaultFlag {
    /// Create a cleared flag
    pub const fn new() -> Self {
        Self { active: false }
    }

    /// Report an anomaly
    pub fn raise(&mut self) {
        self.active = true;
    }

    /// Withdraw the report
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Set the flag from a sensed condition
    pub fn set(&mut self, active: bool) {
        self.active = active;
    }
}

impl FaultMonitor for FaultFlag {
    fn fault_active(&self) -> bool {
        self.active
    }
}
