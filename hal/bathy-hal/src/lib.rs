//! Bathy Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that are implemented
//! by the board firmware (RP2040 today). The drivers and the radar core
//! only ever see these traits, which keeps them testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (bathy-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bathy-drivers (buzzer, serial link)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bathy-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (buttons)
//! - [`uart::SerialRx`], [`uart::SerialTx`] - Non-blocking serial link
//! - [`pwm::PwmOutput`] - Square-wave output for the piezo buzzer

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use pwm::PwmOutput;
pub use uart::{SerialRx, SerialTx};
