//! Buzzer tone output
//!
//! A tone channel drives a passive piezo with a square wave. Only one
//! frequency can sound at a time; starting a new tone replaces the old one.

/// Square-wave tone generator
pub trait ToneChannel {
    /// Start sounding `freq_hz`
    ///
    /// With `duration_ms` set, the channel silences itself after that many
    /// milliseconds (implementations that cannot time out on their own may
    /// rely on [`ToneChannel::service`] being called every loop pass).
    fn start(&mut self, freq_hz: u16, duration_ms: Option<u16>);

    /// Silence the channel immediately
    fn stop(&mut self);

    /// Give time-limited tones a chance to expire
    ///
    /// Default does nothing, for hardware with a native one-shot mode.
    fn service(&mut self, _now_ms: u32) {}
}
