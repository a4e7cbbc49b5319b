//! Configuration loading
//!
//! The launcher has no writable storage; its configuration is the
//! `launcher.toml` embedded at build time.

use defmt::*;

use launchpad_core::config::{parse_config, ConfigError, LauncherConfig};

/// Embedded configuration (compiled into firmware)
/// Edit launcher.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../launcher.toml");

/// Parse the embedded configuration
///
/// No fallback to defaults: the relay polarity lives in this file, and a
/// wrong polarity energizes the igniter.
pub fn load_config() -> Result<LauncherConfig, ConfigError> {
    let config = parse_config(EMBEDDED_CONFIG)?;
    info!(
        "Parsed embedded configuration: relay_active_low={}, inputs_active_low={}",
        config.relay_active_low, config.inputs_active_low
    );
    Ok(config)
}
