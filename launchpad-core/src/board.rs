//! Board assembled from HAL parts
//!
//! [`PinBoard`] implements [`Board`] for any set of HAL pins, tone channel,
//! character LCD and clock. Firmware crates only need to implement the
//! HAL traits for their chip; the wiring lives here.

use launchpad_hal::{CharLcd, MonotonicClock, OutputPin, Polarized, ToneChannel};

use crate::state::OutputLevels;
use crate::time::Millis;
use crate::traits::Board;

/// Indicator and relay outputs
///
/// Pins take logical levels: `set_high` lights a lamp. Only the relay has
/// configurable polarity.
#[derive(Debug)]
pub struct OutputPins<R, A, L, Y> {
    /// Ready LED
    pub ready_led: R,
    /// Armed LED
    pub armed_led: A,
    /// Launch lamp
    pub launch_lamp: L,
    /// Igniter relay driver
    pub relay: Y,
}

/// [`Board`] built out of HAL trait implementations
#[derive(Debug)]
pub struct PinBoard<R, A, L, Y, T, D, C> {
    ready_led: R,
    armed_led: A,
    launch_lamp: L,
    relay: Polarized<Y>,
    buzzer: T,
    lcd: D,
    clock: C,
}

impl<R, A, L, Y, T, D, C> PinBoard<R, A, L, Y, T, D, C>
where
    R: OutputPin,
    A: OutputPin,
    L: OutputPin,
    Y: OutputPin,
    T: ToneChannel,
    D: CharLcd,
    C: MonotonicClock,
{
    /// Assemble a board
    ///
    /// The relay is driven to its inactive level before anything else, then
    /// the remaining outputs are switched off and the buzzer silenced.
    pub fn new(
        pins: OutputPins<R, A, L, Y>,
        relay_active_low: bool,
        buzzer: T,
        lcd: D,
        clock: C,
    ) -> Self {
        let relay = Polarized::new(pins.relay, relay_active_low);
        let mut board = Self {
            ready_led: pins.ready_led,
            armed_led: pins.armed_led,
            launch_lamp: pins.launch_lamp,
            relay,
            buzzer,
            lcd,
            clock,
        };
        board.set_outputs(OutputLevels::ALL_OFF);
        board.buzzer.stop();
        board
    }

    /// Levels currently driven, read back from the pins
    pub fn driven_levels(&self) -> OutputLevels {
        OutputLevels::new(
            self.ready_led.is_set_high(),
            self.armed_led.is_set_high(),
            self.launch_lamp.is_set_high(),
            self.relay.is_set_high(),
        )
    }

    /// The LCD
    pub fn lcd(&self) -> &D {
        &self.lcd
    }

    /// The tone channel
    pub fn buzzer(&self) -> &T {
        &self.buzzer
    }
}

impl<R, A, L, Y, T, D, C> ToneChannel for PinBoard<R, A, L, Y, T, D, C>
where
    T: ToneChannel,
{
    fn start(&mut self, freq_hz: u16, duration_ms: Option<u16>) {
        self.buzzer.start(freq_hz, duration_ms);
    }

    fn stop(&mut self) {
        self.buzzer.stop();
    }

    fn service(&mut self, now_ms: u32) {
        self.buzzer.service(now_ms);
    }
}

impl<R, A, L, Y, T, D, C> Board for PinBoard<R, A, L, Y, T, D, C>
where
    R: OutputPin,
    A: OutputPin,
    L: OutputPin,
    Y: OutputPin,
    T: ToneChannel,
    D: CharLcd,
    C: MonotonicClock,
{
    fn millis(&self) -> Millis {
        self.clock.now_ms()
    }

    fn set_outputs(&mut self, levels: OutputLevels) {
        // Relay first so it never outlives the lamp on the way down
        self.relay.set_state(levels.relay);
        self.ready_led.set_state(levels.ready_led);
        self.armed_led.set_state(levels.armed_led);
        self.launch_lamp.set_state(levels.launch_lamp);
    }

    fn lcd_clear(&mut self) {
        self.lcd.clear();
    }

    fn lcd_set_cursor(&mut self, col: u8, row: u8) {
        self.lcd.set_cursor(col, row);
    }

    fn lcd_print(&mut self, text: &str) {
        self.lcd.write_str(text);
    }
}
