//! GPIO wrappers implementing the HAL pin traits

use embassy_rp::gpio::{Input, Output};
use launchpad_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct GpioOutput<'d>(pub Output<'d>);

impl OutputPin for GpioOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input with whatever pull the caller configured
pub struct GpioInput<'d>(pub Input<'d>);

impl InputPin for GpioInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
