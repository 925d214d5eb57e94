//! Display surface and radar renderer for Bathy
//!
//! This crate provides:
//! - `DisplaySurface` trait: the drawing primitives the renderer needs
//! - `render_frame`: draws one radar frame from the core's `RadarFrame`
//! - `GraphicsSurface`: a `DisplaySurface` over any monochrome
//!   `embedded-graphics` draw target
//!
//! # Architecture
//!
//! The renderer only issues primitives at coordinates the core computed.
//! Buffer management and flush timing stay with the display driver in the
//! firmware.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod graphics;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayError, DisplaySurface};
pub use graphics::GraphicsSurface;
pub use renderer::render_frame;
