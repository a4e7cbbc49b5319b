//! Monotonic time source

/// Free-running millisecond counter
///
/// The counter wraps at `u32::MAX` (about 49.7 days). Consumers must compare
/// readings with wrapping subtraction, never with `<` / `>`.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch, wrapping
    fn now_ms(&self) -> u32;
}
