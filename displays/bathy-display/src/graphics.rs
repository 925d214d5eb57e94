//! `DisplaySurface` over an `embedded-graphics` draw target

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point as GfxPoint, Size};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{Circle, Line, Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};

use bathy_core::geometry::Point;

use crate::backend::{DisplayError, DisplaySurface};

/// Adapter drawing radar primitives onto a monochrome draw target
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    /// Access the target, e.g. to flush a framebuffer
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }
}

fn gfx(at: Point) -> GfxPoint {
    GfxPoint::new(at.x, at.y)
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

impl<D> DisplaySurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Communication)
    }

    fn set_pixel(&mut self, at: Point) -> Result<(), DisplayError> {
        Pixel(gfx(at), BinaryColor::On)
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn line(&mut self, from: Point, to: Point) -> Result<(), DisplayError> {
        Line::new(gfx(from), gfx(to))
            .into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn circle(&mut self, center: Point, radius: u32) -> Result<(), DisplayError> {
        Circle::with_center(gfx(center), radius * 2 + 1)
            .into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_rect(&mut self, top_left: Point, width: u32, height: u32) -> Result<(), DisplayError> {
        Rectangle::new(gfx(top_left), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn rect(&mut self, top_left: Point, width: u32, height: u32) -> Result<(), DisplayError> {
        Rectangle::new(gfx(top_left), Size::new(width, height))
            .into_styled(stroke())
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn text(&mut self, at: Point, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, gfx(at), style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }
}
