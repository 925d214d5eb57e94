//! Build script for bathy-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
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
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Expected value type of a configuration key
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Non-negative integer below the given bound
    Int(i64),
    /// Finite positive number, integer or float
    Float,
    Bool,
}

/// Keys the firmware parser understands, per section
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "radar",
        &[
            ("center_x", Kind::Int(i16::MAX as i64)),
            ("center_y", Kind::Int(i16::MAX as i64)),
            ("radius", Kind::Int(u16::MAX as i64)),
            ("sweep_period_ms", Kind::Int(u32::MAX as i64)),
            ("sweep_half_width_rad", Kind::Float),
        ],
    ),
    (
        "lock",
        &[
            ("blink_ms", Kind::Int(u32::MAX as i64)),
            ("mark_size", Kind::Int(u8::MAX as i64)),
        ],
    ),
    (
        "arrow",
        &[
            ("center_x", Kind::Int(i16::MAX as i64)),
            ("center_y", Kind::Int(i16::MAX as i64)),
            ("size", Kind::Float),
            ("wing_rad", Kind::Float),
            ("back_ratio", Kind::Float),
        ],
    ),
    (
        "audio",
        &[
            ("base_interval_ms", Kind::Int(u32::MAX as i64)),
            ("min_interval_ms", Kind::Int(u32::MAX as i64)),
            ("max_interval_ms", Kind::Int(u32::MAX as i64)),
            ("pulse_ms", Kind::Int(u32::MAX as i64)),
            ("base_frequency_hz", Kind::Int(u32::MAX as i64)),
            ("frequency_step_hz", Kind::Int(u32::MAX as i64)),
            ("manual_frequency_hz", Kind::Int(u32::MAX as i64)),
        ],
    ),
    (
        "link",
        &[
            ("baud_rate", Kind::Int(u32::MAX as i64)),
            ("timeout_ms", Kind::Int(u32::MAX as i64)),
            ("telemetry_enabled", Kind::Bool),
            ("telemetry_period_ms", Kind::Int(u32::MAX as i64)),
        ],
    ),
    ("loop", &[("cycle_ms", Kind::Int(u32::MAX as i64))]),
];

/// Validate device.toml configuration at compile time
fn validate_config() {
    // Re-run if device.toml changes
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml at compile time.                ║\n\
            ║  Please create one in the bathy-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = validate_sections(&config);
    errors.extend(validate_relations(&config));

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check every section and key against the schema
fn validate_sections(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let root = match config.as_table() {
        Some(t) => t,
        None => return errors,
    };

    for (name, section) in root {
        let Some((_, keys)) = SCHEMA.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };

        let section = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in section {
            let Some((_, kind)) = keys.iter().find(|(k, _)| k == key) else {
                // The firmware ignores it; worth a note anyway
                println!("cargo:warning=device.toml: [{}] {} is not used", name, key);
                continue;
            };

            if let Err(msg) = check_value(*kind, value) {
                errors.push(format!("[{}] {} {}", name, key, msg));
            }
        }
    }

    errors
}

fn check_value(kind: Kind, value: &toml::Value) -> Result<(), &'static str> {
    match (kind, value) {
        (Kind::Int(max), toml::Value::Integer(v)) => {
            if *v < 0 || *v > max {
                Err("is out of range")
            } else {
                Ok(())
            }
        }
        (Kind::Int(_), _) => Err("must be an integer"),
        (Kind::Float, toml::Value::Float(v)) if !v.is_finite() => Err("must be finite"),
        (Kind::Float, toml::Value::Float(_) | toml::Value::Integer(_)) => Ok(()),
        (Kind::Float, _) => Err("must be a number"),
        (Kind::Bool, toml::Value::Boolean(_)) => Ok(()),
        (Kind::Bool, _) => Err("must be true or false"),
    }
}

/// Cross-field rules the firmware would otherwise reject at boot
fn validate_relations(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let int = |section: &str, key: &str| -> Option<i64> {
        config.get(section)?.get(key)?.as_integer()
    };

    for (section, key) in [
        ("radar", "sweep_period_ms"),
        ("radar", "radius"),
        ("lock", "blink_ms"),
        ("audio", "pulse_ms"),
        ("link", "baud_rate"),
        ("link", "telemetry_period_ms"),
        ("loop", "cycle_ms"),
    ] {
        if int(section, key) == Some(0) {
            errors.push(format!("[{}] {} must not be zero", section, key));
        }
    }

    if let (Some(min), Some(max)) = (
        int("audio", "min_interval_ms"),
        int("audio", "max_interval_ms"),
    ) {
        if min > max {
            errors.push("[audio] min_interval_ms exceeds max_interval_ms".to_string());
        }
    }

    // The shortest interval is the base clamped into [min, max]
    let audio = |key: &str, default: i64| int("audio", key).unwrap_or(default);
    let (min, max) = (audio("min_interval_ms", 50), audio("max_interval_ms", 1000));
    if min <= max {
        let shortest = audio("base_interval_ms", 100).clamp(min, max);
        if audio("pulse_ms", 50) >= shortest {
            errors.push(format!(
                "[audio] pulse_ms must be below the shortest interval ({} ms)",
                shortest
            ));
        }
    }

    errors
}
