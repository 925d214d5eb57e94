//! Companion Link Protocol
//!
//! This crate defines the text protocol spoken over the handheld's serial
//! link. The companion (a sonar or fish-finder data source) streams one
//! newline-terminated ASCII line per update; the handheld answers with one
//! CSV telemetry line per reporting period.
//!
//! # Protocol Overview
//!
//! Inbound sonar update:
//! ```text
//! S:<dist>,<count>[,<navx>,<navy>]|<x>,<y>[,<size>[,<rank>]]:<x>,<y>...
//! S:<dist>,<count>[,<navx>,<navy>]|OUT
//! ```
//!
//! Outbound telemetry:
//! ```text
//! <roll>,<pitch>,<stickX>,<stickY>,<button1>,<button2>
//! ```
//!
//! The link has no acknowledgement or flow control. The decoder is
//! fail-soft: a bad header drops the whole line, a bad entry drops only
//! that entry.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod sonar;
pub mod telemetry;

pub use line::{AssemblyError, LineAssembler, MAX_LINE_LEN};
pub use sonar::{
    decode_line, parse_entry, Detection, Detections, EntryError, LineError, NavigationState,
    SonarUpdate, MAX_DETECTIONS,
};
pub use telemetry::{TelemetryError, TelemetryFrame, TelemetryLine};
