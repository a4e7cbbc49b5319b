//! Debounced control inputs
//!
//! Mechanical switches chatter for a few milliseconds when they change.
//! Each line is sampled once per loop pass and a new level is committed
//! only after the raw signal has held steady for the debounce interval.

use launchpad_hal::InputPin;

use crate::time::{elapsed, Millis};
use crate::traits::ControlInputs;

/// Stable-interval debouncer for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Last committed level
    stable: bool,
    /// Most recent raw sample
    last_raw: bool,
    /// When the raw level last changed
    changed_at: Millis,
    /// Required steady time (ms)
    interval_ms: u32,
}

impl Debouncer {
    /// Create a debouncer already settled at `initial`
    pub const fn new(initial: bool, interval_ms: u32) -> Self {
        Self {
            stable: initial,
            last_raw: initial,
            changed_at: 0,
            interval_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns `true` when the committed level changed.
    pub fn update(&mut self, raw: bool, now: Millis) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.changed_at = now;
            return false;
        }

        if raw != self.stable && elapsed(now, self.changed_at) >= self.interval_ms {
            self.stable = raw;
            return true;
        }

        false
    }

    /// Last committed level
    pub fn state(&self) -> bool {
        self.stable
    }
}

/// A raw input pin paired with its debouncer
#[derive(Debug)]
pub struct DebouncedInput<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> DebouncedInput<P> {
    /// Wrap `pin`, taking its current level as the settled state
    pub fn new(pin: P, interval_ms: u32) -> Self {
        let initial = pin.is_high();
        Self {
            pin,
            debouncer: Debouncer::new(initial, interval_ms),
        }
    }

    /// Sample the pin; returns `true` if the committed level changed
    pub fn refresh(&mut self, now: Millis) -> bool {
        let raw = self.pin.is_high();
        self.debouncer.update(raw, now)
    }

    /// Last committed level
    pub fn is_active(&self) -> bool {
        self.debouncer.state()
    }
}

/// The launcher's three operator controls
///
/// Pins report *logical* engagement: wrap pull-up switches in
/// [`launchpad_hal::ActiveLow`] (or [`launchpad_hal::Polarized`] when the
/// polarity is configured) before handing them over.
#[derive(Debug)]
pub struct DebouncedInputs<A, R, L> {
    arm: DebouncedInput<A>,
    reset: DebouncedInput<R>,
    launch: DebouncedInput<L>,
}

impl<A: InputPin, R: InputPin, L: InputPin> DebouncedInputs<A, R, L> {
    /// Create the reader; levels at construction are taken as settled
    pub fn new(arm: A, reset: R, launch: L, interval_ms: u32) -> Self {
        Self {
            arm: DebouncedInput::new(arm, interval_ms),
            reset: DebouncedInput::new(reset, interval_ms),
            launch: DebouncedInput::new(launch, interval_ms),
        }
    }

    /// Sample all three lines; call once per loop pass before the FSM tick
    pub fn refresh(&mut self, now: Millis) {
        self.arm.refresh(now);
        self.reset.refresh(now);
        self.launch.refresh(now);
    }
}

impl<A: InputPin, R: InputPin, L: InputPin> ControlInputs for DebouncedInputs<A, R, L> {
    fn is_armed(&self) -> bool {
        self.arm.is_active()
    }

    fn is_reset_held(&self) -> bool {
        self.reset.is_active()
    }

    fn is_launch_held(&self) -> bool {
        self.launch.is_active()
    }
}
