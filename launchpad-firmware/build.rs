//! Build script for launchpad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates launcher.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use launchpad_core::config::{parse_config, LAUNCH_CONFIRM_MS, LCD_COLUMNS, MAX_RELAY_ON_MS};

const TIMING_KEYS: &[&str] = &[
    "launch_confirm_ms",
    "hold_to_launch_ms",
    "relay_on_ms",
    "cooldown_ms",
    "abort_inhibit_ms",
    "reset_hold_ms",
    "splash_ms",
    "self_check_total_ms",
    "self_check_hold_ms",
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate launcher.toml at compile time
///
/// The firmware refuses to start when the embedded file does not parse, so
/// every file accepted here must also pass the firmware's own parser.
fn validate_config() {
    println!("cargo:rerun-if-changed=launcher.toml");

    let config_path = Path::new("launcher.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: launcher.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds launcher.toml at build time.                ║\n\
            ║  Please create one in the launchpad-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read launcher.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in launcher.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_flag(&config, "relay", &mut errors);
    validate_inputs(&config, &mut errors);
    validate_display(&config, &mut errors);
    report("Invalid launcher configuration", &errors);

    // The firmware halts on any file its own parser rejects
    if let Err(e) = parse_config(&config_content) {
        report(
            "launcher.toml rejected by firmware parser",
            &[format!("{:?} (hex, signed and 'literal' values are not supported)", e)],
        );
    }

    println!("cargo:warning=launcher.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected error, if any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only known sections, each a table; no top-level keys
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("launcher.toml must be a table".to_string());
        return;
    };

    for (name, value) in root {
        if !["timing", "relay", "inputs", "display"].contains(&name.as_str()) {
            errors.push(format!("unknown section or key '{}'", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Millisecond value that fits the firmware's u32 fields
fn millis(value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Integer(ms) if (0..=u32::MAX as i64).contains(ms) => Some(*ms),
        _ => None,
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in timing {
        if !TIMING_KEYS.contains(&key.as_str()) {
            errors.push(format!("[timing] unknown key '{}'", key));
        } else if millis(value).is_none() {
            errors.push(format!("[timing] {} must be a non-negative integer", key));
        }
    }

    let get = |key: &str| timing.get(key).and_then(millis);

    if get("launch_confirm_ms") == Some(0) {
        errors.push("[timing] launch_confirm_ms must be above 0".to_string());
    }
    // An absent key keeps the firmware default
    let confirm = get("launch_confirm_ms").unwrap_or(LAUNCH_CONFIRM_MS as i64);
    if let Some(hold) = get("hold_to_launch_ms") {
        if hold < confirm {
            errors.push("[timing] hold_to_launch_ms shorter than launch_confirm_ms".to_string());
        }
    }
    if let Some(relay) = get("relay_on_ms") {
        if relay == 0 || relay > MAX_RELAY_ON_MS as i64 {
            errors.push(format!("[timing] relay_on_ms must be 1-{}", MAX_RELAY_ON_MS));
        }
    }
    if get("reset_hold_ms") == Some(0) {
        errors.push("[timing] reset_hold_ms must be above 0".to_string());
    }
}

/// Section whose only key is a boolean `active_low`
fn validate_flag(config: &toml::Value, section: &str, errors: &mut Vec<String>) {
    let Some(table) = config.get(section).and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in table {
        match key.as_str() {
            "active_low" if value.is_bool() => {}
            "active_low" => errors.push(format!("[{}] active_low must be true or false", section)),
            _ => errors.push(format!("[{}] unknown key '{}'", section, key)),
        }
    }
}

fn validate_inputs(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(inputs) = config.get("inputs").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in inputs {
        match key.as_str() {
            "active_low" if value.is_bool() => {}
            "active_low" => errors.push("[inputs] active_low must be true or false".to_string()),
            "debounce_ms" if millis(value).is_some() => {}
            "debounce_ms" => errors.push("[inputs] debounce_ms must be a non-negative integer".to_string()),
            _ => errors.push(format!("[inputs] unknown key '{}'", key)),
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in display {
        match (key.as_str(), value) {
            ("splash_title" | "splash_subtitle", toml::Value::String(text)) => {
                if text.chars().count() > LCD_COLUMNS {
                    errors.push(format!("[display] {} longer than {} characters", key, LCD_COLUMNS));
                }
                if !text.is_ascii() {
                    errors.push(format!("[display] {} must be plain ASCII", key));
                }
            }
            ("splash_title" | "splash_subtitle", _) => {
                errors.push(format!("[display] {} must be a string", key));
            }
            ("refresh_ms", v) if millis(v).is_some() => {}
            ("refresh_ms", _) => {
                errors.push("[display] refresh_ms must be a non-negative integer".to_string());
            }
            _ => errors.push(format!("[display] unknown key '{}'", key)),
        }
    }
}
