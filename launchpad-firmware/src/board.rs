//! Pin assignments and concrete types for the launch box
//!
//! | Function        | GPIO | Notes                         |
//! |-----------------|------|-------------------------------|
//! | ARM toggle      | 2    | pull-up, closes to ground     |
//! | RESET button    | 3    | pull-up, closes to ground     |
//! | LAUNCH button   | 4    | pull-up, closes to ground     |
//! | Ready LED       | 5    |                               |
//! | Armed LED       | 6    |                               |
//! | Launch lamp     | 7    |                               |
//! | Igniter relay   | 8    | polarity from `[relay]`       |
//! | Buzzer          | 9    | PWM slice 4, channel B        |
//! | LCD RS / E      | 10/11|                               |
//! | LCD D4..D7      | 12-15|                               |

use embassy_rp::gpio::Output;
use embassy_time::Delay;
use launchpad_core::{PinBoard, Scheduler};
use launchpad_drivers::lcd::Hd44780;
use launchpad_hal::Polarized;
use launchpad_hal_rp2040::{EmbassyClock, GpioInput, GpioOutput, PwmBuzzer};

/// LED, lamp or relay driver
pub type Lamp = GpioOutput<'static>;

/// Operator switch with configured polarity
pub type Switch = Polarized<GpioInput<'static>>;

/// 16x2 character display
pub type Display = Hd44780<Output<'static>, Delay>;

/// Everything the controller drives
pub type LaunchBoard = PinBoard<Lamp, Lamp, Lamp, Lamp, PwmBuzzer<'static>, Display, EmbassyClock>;

/// Main loop for this board
pub type LaunchScheduler = Scheduler<LaunchBoard, Switch, Switch, Switch>;
