//! Launchpad - Model Rocket Launch Controller Firmware
//!
//! Main firmware binary for RP2040-based launch boxes. All launch logic
//! lives in `launchpad-core`; this crate wires the board's pins, buzzer
//! and LCD to it and runs the cooperative loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use launchpad_core::input::DebouncedInputs;
use launchpad_core::{LaunchController, OutputPins, PinBoard, Scheduler};
use launchpad_drivers::lcd::Hd44780;
use launchpad_hal::Polarized;
use launchpad_hal_rp2040::{EmbassyClock, GpioInput, GpioOutput, PwmBuzzer};

mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Launchpad firmware starting...");

    // Leaves every GPIO at its reset state
    let p = embassy_rp::init(Default::default());

    // Read before any pin is configured: the relay's idle level depends on it
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            halt().await
        }
    };

    // Relay first, created at its idle level so it never pulses
    let relay_idle = if config.relay_idle_high() {
        Level::High
    } else {
        Level::Low
    };
    let relay = Output::new(p.PIN_8, relay_idle);
    info!("Peripherals initialized");

    let outputs = OutputPins {
        ready_led: GpioOutput(Output::new(p.PIN_5, Level::Low)),
        armed_led: GpioOutput(Output::new(p.PIN_6, Level::Low)),
        launch_lamp: GpioOutput(Output::new(p.PIN_7, Level::Low)),
        relay: GpioOutput(relay),
    };

    // Passive buzzer on PWM slice 4 channel B
    let pwm = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_9, PwmConfig::default());
    let buzzer = PwmBuzzer::new(pwm);

    let mut lcd = Hd44780::new(
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        [
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
            Output::new(p.PIN_14, Level::Low),
            Output::new(p.PIN_15, Level::Low),
        ],
        Delay,
    );
    lcd.init().unwrap_or_else(|never| match never {});
    info!("LCD initialized");

    let board = PinBoard::new(
        outputs,
        config.relay_active_low,
        buzzer,
        lcd,
        EmbassyClock,
    );

    let switch = |input: Input<'static>| Polarized::input(GpioInput(input), config.inputs_active_low);
    let inputs = DebouncedInputs::new(
        switch(Input::new(p.PIN_2, Pull::Up)),
        switch(Input::new(p.PIN_3, Pull::Up)),
        switch(Input::new(p.PIN_4, Pull::Up)),
        config.timing.debounce_ms,
    );

    let controller = LaunchController::new(board, &config);
    let scheduler: board::LaunchScheduler = Scheduler::new(controller, inputs);

    info!("Launcher assembled, entering main loop");
    tasks::run_launcher(scheduler).await
}

/// Stop with every GPIO left at its reset state
///
/// Only reached when the embedded configuration is unusable, in which case
/// no output level is known to be safe.
async fn halt() -> ! {
    loop {
        error!("Halted: launcher.toml rejected, rebuild with a valid file");
        Timer::after_secs(60).await;
    }
}
