//! Launcher configuration parser
//!
//! A minimal TOML reader for `launcher.toml`. It handles only the subset
//! the launcher needs and does NOT support the full TOML grammar.
//!
//! Supported:
//! - `[timing]`, `[relay]`, `[inputs]`, `[display]` section headers
//! - `key = value` with unsigned integers, booleans and "quoted strings"
//! - `#` comments, on their own line or trailing a value
//!
//! Unknown sections and keys are rejected so that a typo can never leave a
//! safety timing at a value the author did not intend.

use super::timing::LaunchTiming;
use super::types::{lcd_line, LauncherConfig, LCD_COLUMNS};
use crate::log::{debug, error};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or does not parse
    InvalidValue,
    /// String longer than one LCD line
    TextTooLong,
    /// Timing combination that weakens an interlock
    UnsafeTiming,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Relay,
    Inputs,
    Display,
}

/// Parsed right-hand side of a `key = value` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Integer(u32),
    Bool(bool),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn integer(self) -> Result<u32, ConfigError> {
        match self {
            Value::Integer(v) => Ok(v),
            _ => Err(ConfigError::InvalidValue),
        }
    }

    fn boolean(self) -> Result<bool, ConfigError> {
        match self {
            Value::Bool(v) => Ok(v),
            _ => Err(ConfigError::InvalidValue),
        }
    }

    fn text(self) -> Result<&'a str, ConfigError> {
        match self {
            Value::Str(v) if v.chars().count() <= LCD_COLUMNS => Ok(v),
            Value::Str(_) => Err(ConfigError::TextTooLong),
            _ => Err(ConfigError::InvalidValue),
        }
    }
}

/// Parse `launcher.toml` text into a validated configuration
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<LauncherConfig, ConfigError> {
    let mut config = LauncherConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            section = parse_section_header(header).inspect_err(|_| {
                error!("launcher.toml:{}: bad section header", index + 1);
            })?;
            continue;
        }

        let (key, value) = split_key_value(line)?;
        apply(&mut config, section, key, value).inspect_err(|e| {
            error!("launcher.toml:{}: {}", index + 1, e);
        })?;
    }

    config.timing.validate()?;
    debug!("launcher config parsed");
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    let name = header
        .strip_suffix(']')
        .ok_or(ConfigError::InvalidSection)?
        .trim();

    match name {
        "timing" => Ok(Section::Timing),
        "relay" => Ok(Section::Relay),
        "inputs" => Ok(Section::Inputs),
        "display" => Ok(Section::Display),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Remove a trailing `# comment`, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_key_value(line: &str) -> Result<(&str, Value<'_>), ConfigError> {
    let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidValue)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::UnknownKey);
    }
    Ok((key, parse_value(value.trim())?))
}

fn parse_value(value: &str) -> Result<Value<'_>, ConfigError> {
    match value {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if let Some(inner) = value.strip_prefix('"') {
        let text = inner.strip_suffix('"').ok_or(ConfigError::InvalidValue)?;
        if text.contains('"') {
            return Err(ConfigError::InvalidValue);
        }
        return Ok(Value::Str(text));
    }

    // TOML allows `_` as a digit separator (5_000)
    let mut number: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => {
                number = number
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(c as u32 - '0' as u32))
                    .ok_or(ConfigError::InvalidValue)?;
                digits += 1;
            }
            '_' if digits > 0 => {}
            _ => return Err(ConfigError::InvalidValue),
        }
    }
    if digits == 0 {
        return Err(ConfigError::InvalidValue);
    }
    Ok(Value::Integer(number))
}

fn apply(
    config: &mut LauncherConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => Err(ConfigError::UnknownKey),
        Section::Timing => apply_timing(&mut config.timing, key, value.integer()?),
        Section::Relay => match key {
            "active_low" => {
                config.relay_active_low = value.boolean()?;
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey),
        },
        Section::Inputs => match key {
            "active_low" => {
                config.inputs_active_low = value.boolean()?;
                Ok(())
            }
            "debounce_ms" => {
                config.timing.debounce_ms = value.integer()?;
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey),
        },
        Section::Display => match key {
            "splash_title" => {
                config.splash_title = lcd_line(value.text()?);
                Ok(())
            }
            "splash_subtitle" => {
                config.splash_subtitle = lcd_line(value.text()?);
                Ok(())
            }
            "refresh_ms" => {
                config.timing.display_refresh_ms = value.integer()?;
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey),
        },
    }
}

fn apply_timing(timing: &mut LaunchTiming, key: &str, ms: u32) -> Result<(), ConfigError> {
    let field = match key {
        "launch_confirm_ms" => &mut timing.launch_confirm_ms,
        "hold_to_launch_ms" => &mut timing.hold_to_launch_ms,
        "relay_on_ms" => &mut timing.relay_on_ms,
        "cooldown_ms" => &mut timing.cooldown_ms,
        "abort_inhibit_ms" => &mut timing.abort_inhibit_ms,
        "reset_hold_ms" => &mut timing.reset_hold_ms,
        "splash_ms" => &mut timing.splash_ms,
        "self_check_total_ms" => &mut timing.self_check_total_ms,
        "self_check_hold_ms" => &mut timing.self_check_hold_ms,
        _ => return Err(ConfigError::UnknownKey),
    };
    *field = ms;
    Ok(())
}
