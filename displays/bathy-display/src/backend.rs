//! Display surface trait
//!
//! Defines the drawing primitives the radar renderer uses. All
//! coordinates are display pixels, origin top-left.

use bathy_core::geometry::Point;

/// Display surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Text did not fit the formatting buffer
    BufferOverflow,
}

/// Monochrome drawing surface
///
/// Every primitive draws in the "on" color. Drawing outside the surface
/// is clipped by the implementation, not reported.
pub trait DisplaySurface {
    /// Clear the entire surface to "off"
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Set a single pixel
    fn set_pixel(&mut self, at: Point) -> Result<(), DisplayError>;

    /// Draw a one pixel wide line, both ends inclusive
    fn line(&mut self, from: Point, to: Point) -> Result<(), DisplayError>;

    /// Draw a circle outline
    fn circle(&mut self, center: Point, radius: u32) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, top_left: Point, width: u32, height: u32) -> Result<(), DisplayError>;

    /// Draw a rectangle outline
    fn rect(&mut self, top_left: Point, width: u32, height: u32) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at `at`
    fn text(&mut self, at: Point, text: &str) -> Result<(), DisplayError>;
}
