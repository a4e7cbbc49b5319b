//! GPIO pin abstractions
//!
//! Logic levels here are *electrical* levels. Whether "high" means
//! "engaged" depends on the wiring, which is what [`ActiveLow`] is for:
//! pull-up switches and many relay modules are asserted by driving or
//! reading LOW.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Polarity adapter for active-low wiring
///
/// Wrapping a pin in `ActiveLow` flips its sense so that callers can think
/// in "asserted / not asserted": `set_high` drives the wire LOW, and an
/// input reads high while the wire is pulled LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLow<P>(pub P);

impl<P> ActiveLow<P> {
    /// Unwrap the underlying pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    fn set_high(&mut self) {
        self.0.set_low();
    }

    fn set_low(&mut self) {
        self.0.set_high();
    }

    fn is_set_high(&self) -> bool {
        !self.0.is_set_high()
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}

/// Pin whose polarity is chosen at runtime
///
/// Used for the igniter relay and the operator switches, whose polarity
/// comes from the launcher configuration rather than from the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarized<P> {
    pin: P,
    active_low: bool,
}

impl<P: OutputPin> Polarized<P> {
    /// Wrap output `pin`, inverting it when `active_low` is set
    ///
    /// The pin is immediately driven to its inactive level.
    pub fn new(mut pin: P, active_low: bool) -> Self {
        pin.set_state(active_low);
        Self { pin, active_low }
    }
}

impl<P: InputPin> Polarized<P> {
    /// Wrap input `pin`, reading it inverted when `active_low` is set
    pub fn input(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }
}

impl<P> Polarized<P> {
    /// Whether asserting drives the wire LOW
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// The wrapped pin
    pub fn inner(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> OutputPin for Polarized<P> {
    fn set_high(&mut self) {
        self.pin.set_state(!self.active_low);
    }

    fn set_low(&mut self) {
        self.pin.set_state(self.active_low);
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.active_low
    }
}

impl<P: InputPin> InputPin for Polarized<P> {
    fn is_high(&self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Wire {
        high: bool,
    }

    impl OutputPin for Wire {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl InputPin for Wire {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_low_output_inverts() {
        let mut pin = ActiveLow(Wire::default());
        pin.set_high();
        assert!(!pin.0.high);
        assert!(pin.is_set_high());

        pin.set_state(false);
        assert!(pin.0.high);
    }

    #[test]
    fn test_active_low_input_inverts() {
        let pin = ActiveLow(Wire { high: false });
        assert!(pin.is_high());
        assert!(!pin.into_inner().is_high());
    }

    #[test]
    fn test_polarized_starts_inactive() {
        let relay = Polarized::new(Wire { high: false }, true);
        assert!(relay.pin.high, "active-low relay must idle with the wire high");
        assert!(!relay.is_set_high());

        let relay = Polarized::new(Wire { high: true }, false);
        assert!(!relay.pin.high);
    }

    #[test]
    fn test_polarized_assert() {
        let mut relay = Polarized::new(Wire::default(), true);
        relay.set_high();
        assert!(!relay.pin.high);
        assert!(relay.is_set_high());
        relay.set_low();
        assert!(relay.pin.high);
    }

    #[test]
    fn test_polarized_input() {
        assert!(Polarized::input(Wire { high: false }, true).is_high());
        assert!(!Polarized::input(Wire { high: true }, true).is_high());
        assert!(Polarized::input(Wire { high: true }, false).is_high());
    }
}
