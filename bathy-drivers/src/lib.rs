//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in bathy-core, on top of the bathy-hal traits and
//! embedded-hal:
//!
//! - PWM piezo buzzer (tone output)
//! - ADXL345 accelerometer over I2C
//! - Serial link to the companion (line source, telemetry writer)

#![no_std]
#![deny(unsafe_code)]

pub mod adxl345;
pub mod buzzer;
pub mod link;

pub use adxl345::{Adxl345, Adxl345Error};
pub use buzzer::PwmBuzzer;
pub use link::{LinkStats, SerialLink, TelemetryWriteError, TelemetryWriter};
