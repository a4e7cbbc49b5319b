//! Wrap-safe millisecond arithmetic
//!
//! The board clock is a `u32` that wraps roughly every 49.7 days. All
//! comparisons go through these helpers, which use wrapping subtraction so
//! a deadline that straddles the wrap still fires on time.

/// Millisecond timestamp from the board clock
pub type Millis = u32;

/// Milliseconds from `since` to `now`
#[inline]
pub const fn elapsed(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}

/// Absolute tick `delay_ms` after `now`
#[inline]
pub const fn deadline_after(now: Millis, delay_ms: u32) -> Millis {
    now.wrapping_add(delay_ms)
}

/// True once `now` is at or past `deadline`
///
/// Signed difference: valid while the two values are less than 2^31 ms
/// (about 24.8 days) apart.
#[inline]
pub const fn deadline_reached(now: Millis, deadline: Millis) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}

/// Remaining whole seconds of a `total_ms` window after `held_ms`
///
/// Floors, clamps at zero.
#[inline]
pub const fn remaining_secs(total_ms: u32, held_ms: u32) -> u32 {
    total_ms.saturating_sub(held_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_elapsed_across_wrap() {
        assert_eq!(elapsed(5, u32::MAX - 4), 10);
        assert_eq!(elapsed(1000, 250), 750);
    }

    #[test]
    fn test_deadline_across_wrap() {
        let deadline = deadline_after(u32::MAX - 100, 5000);
        assert_eq!(deadline, 4899);
        assert!(!deadline_reached(u32::MAX, deadline));
        assert!(!deadline_reached(4898, deadline));
        assert!(deadline_reached(4899, deadline));
        assert!(deadline_reached(6000, deadline));
    }

    #[test]
    fn test_remaining_secs() {
        assert_eq!(remaining_secs(5000, 0), 5);
        assert_eq!(remaining_secs(5000, 1), 4);
        assert_eq!(remaining_secs(5000, 4999), 0);
        assert_eq!(remaining_secs(5000, 9000), 0);
    }

    proptest! {
        #[test]
        fn prop_deadline_fires_exactly(base in any::<u32>(), delay in 1u32..0x7FFF_FFFF) {
            let deadline = deadline_after(base, delay);
            prop_assert!(!deadline_reached(base.wrapping_add(delay - 1), deadline));
            prop_assert!(deadline_reached(base.wrapping_add(delay), deadline));
            prop_assert_eq!(elapsed(deadline, base), delay);
        }
    }
}
