//! Board-agnostic core logic for the handheld radar
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (tone output, line source, clock)
//! - Sweep tracking and the afterglow set
//! - Target ranking and navigation geometry
//! - Audio cadence control
//! - Control-cycle orchestration and link health
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod angle;
pub mod audio;
pub mod config;
pub mod cycle;
pub mod geometry;
pub mod input;
pub mod link;
pub mod radar;
pub mod tilt;
pub mod traits;

pub use bathy_protocol::{Detection, NavigationState};
