//! Minimal TOML parser for the device configuration
//!
//! Handles only the subset `device.toml` needs, without an allocator.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, float, boolean)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Unknown keys are ignored so newer files still load on older firmware.
//! The build script checks the same file with the full `toml` crate.

use super::types::DeviceConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection,
    /// Value does not parse as the key's type
    InvalidValue,
    /// Line is neither a header nor `key = value`
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Radar,
    Lock,
    Arrow,
    Audio,
    Link,
    Loop,
}

/// Parse TOML text into a [`DeviceConfig`]
///
/// Keys that are not present keep their default value.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "radar" => Ok(Section::Radar),
        "lock" => Ok(Section::Lock),
        "arrow" => Ok(Section::Arrow),
        "audio" => Ok(Section::Audio),
        "link" => Ok(Section::Link),
        "loop" => Ok(Section::Loop),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Radar => {
            let radar = &mut config.radar;
            match key {
                "center_x" => radar.center_x = parse_int(value)?,
                "center_y" => radar.center_y = parse_int(value)?,
                "radius" => radar.radius = parse_int(value)?,
                "sweep_period_ms" => radar.sweep_period_ms = parse_int(value)?,
                "sweep_half_width_rad" => radar.sweep_half_width_rad = parse_float(value)?,
                _ => {}
            }
        }
        Section::Lock => {
            let lock = &mut config.lock;
            match key {
                "blink_ms" => lock.blink_ms = parse_int(value)?,
                "mark_size" => lock.mark_size = parse_int(value)?,
                _ => {}
            }
        }
        Section::Arrow => {
            let arrow = &mut config.arrow;
            match key {
                "center_x" => arrow.center_x = parse_int(value)?,
                "center_y" => arrow.center_y = parse_int(value)?,
                "size" => arrow.size = parse_float(value)?,
                "wing_rad" => arrow.wing_rad = parse_float(value)?,
                "back_ratio" => arrow.back_ratio = parse_float(value)?,
                _ => {}
            }
        }
        Section::Audio => {
            let audio = &mut config.audio;
            match key {
                "base_interval_ms" => audio.base_interval_ms = parse_int(value)?,
                "min_interval_ms" => audio.min_interval_ms = parse_int(value)?,
                "max_interval_ms" => audio.max_interval_ms = parse_int(value)?,
                "pulse_ms" => audio.pulse_ms = parse_int(value)?,
                "base_frequency_hz" => audio.base_frequency_hz = parse_int(value)?,
                "frequency_step_hz" => audio.frequency_step_hz = parse_int(value)?,
                "manual_frequency_hz" => audio.manual_frequency_hz = parse_int(value)?,
                _ => {}
            }
        }
        Section::Link => {
            let link = &mut config.link;
            match key {
                "baud_rate" => link.baud_rate = parse_int(value)?,
                "timeout_ms" => link.timeout_ms = parse_int(value)?,
                "telemetry_enabled" => link.telemetry_enabled = parse_bool(value)?,
                "telemetry_period_ms" => link.telemetry_period_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Loop => {
            if key == "cycle_ms" {
                config.control.cycle_ms = parse_int(value)?;
            }
        }
        Section::Root => {}
    }

    Ok(())
}

/// Parse an integer value, accepting TOML's `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let parsed: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
