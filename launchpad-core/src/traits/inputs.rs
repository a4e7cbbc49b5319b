//! Operator control queries

/// Debounced operator controls as seen by the state machine
///
/// Pure reads of the last committed levels: implementations never sample
/// hardware or block inside these calls.
pub trait ControlInputs {
    /// Arm switch engaged
    fn is_armed(&self) -> bool;

    /// Reset button held
    fn is_reset_held(&self) -> bool;

    /// Launch button held
    fn is_launch_held(&self) -> bool;

    /// Any control active
    fn any_active(&self) -> bool {
        self.is_armed() || self.is_reset_held() || self.is_launch_held()
    }
}
