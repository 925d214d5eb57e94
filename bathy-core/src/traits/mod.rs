//! Collaborator traits
//!
//! These traits define the interface between the radar engine and the
//! hardware-specific implementations in the drivers and firmware.

pub mod clock;
pub mod link;
pub mod tone;

pub use clock::Clock;
pub use link::LineSource;
pub use tone::ToneOutput;
