//! PWM buzzer
//!
//! Drives a passive piezo with a 50% square wave from one PWM channel.
//! Timed tones are ended by [`ToneChannel::service`], which the main loop
//! calls every pass.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Instant;
use fixed::types::U12F4;
use launchpad_hal::ToneChannel;

/// Requests below this frequency are treated as a rest
pub const MIN_TONE_HZ: u16 = 20;

/// Largest integer clock divider
const MAX_DIVIDER: u32 = 255;

/// PWM divider and wrap value for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneSettings {
    /// Integer clock divider (1..=255)
    pub divider: u8,
    /// Counter wrap value; period is `top + 1` counts
    pub top: u16,
}

/// Calculate PWM settings for `freq_hz` from the system clock
///
/// Picks the smallest integer divider that lets the 16-bit counter span
/// one period, which keeps frequency error lowest.
pub fn calc_tone_settings(sys_clk_hz: u32, freq_hz: u16) -> ToneSettings {
    let freq = freq_hz.max(MIN_TONE_HZ) as u32;
    let counts_per_period = sys_clk_hz / freq;

    let divider = (counts_per_period / 65_536 + 1).clamp(1, MAX_DIVIDER);
    let top = (counts_per_period / divider).clamp(2, 65_536) - 1;

    ToneSettings {
        divider: divider as u8,
        top: top as u16,
    }
}

/// Square-wave buzzer on one PWM output
pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
    config: Config,
    /// Currently sounding frequency
    freq_hz: Option<u16>,
    /// Absolute ms at which a timed tone ends
    stop_at: Option<u32>,
}

impl<'d> PwmBuzzer<'d> {
    /// Take a PWM output configured for channel B, starting silent
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = Config::default();
        config.compare_b = 0;
        config.enable = true;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            freq_hz: None,
            stop_at: None,
        }
    }

    /// Frequency currently sounding
    pub fn frequency(&self) -> Option<u16> {
        self.freq_hz
    }
}

impl ToneChannel for PwmBuzzer<'_> {
    fn start(&mut self, freq_hz: u16, duration_ms: Option<u16>) {
        if freq_hz < MIN_TONE_HZ {
            self.stop();
            return;
        }

        let settings = calc_tone_settings(clk_sys_freq(), freq_hz);
        self.config.divider = U12F4::from_num(settings.divider);
        self.config.top = settings.top;
        self.config.compare_b = settings.top / 2;
        self.pwm.set_config(&self.config);

        self.freq_hz = Some(freq_hz);
        let now = Instant::now().as_millis() as u32;
        self.stop_at = duration_ms.map(|ms| now.wrapping_add(ms as u32));
    }

    fn stop(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
        self.freq_hz = None;
        self.stop_at = None;
    }

    fn service(&mut self, now_ms: u32) {
        if let Some(stop_at) = self.stop_at {
            if now_ms.wrapping_sub(stop_at) as i32 >= 0 {
                self.stop();
            }
        }
    }
}
