//! Radar frame renderer
//!
//! Layout on the 128×64 panel: radar on the left, distance, fish count
//! and button presses top right, navigation arrow bottom right with the
//! die temperature in the corner.

use core::fmt::Write;

use heapless::String;

use bathy_core::cycle::RadarFrame;
use bathy_core::geometry::Point;
use bathy_core::input::PanelStatus;
use bathy_core::radar::NavIndicator;

use crate::backend::{DisplayError, DisplaySurface};

/// Distance readout, top-left of the text
pub const DISTANCE_AT: Point = Point::new(68, 0);
/// Fish count readout
pub const COUNT_AT: Point = Point::new(68, 12);
/// Button 2 press count, right of the fish count
pub const PRESSES_AT: Point = Point::new(98, 12);
/// Die temperature, right of the link marker
pub const TEMPERATURE_AT: Point = Point::new(104, 54);
/// Stale link marker box
pub const LINK_BOX_AT: Point = Point::new(66, 52);
const LINK_BOX_WIDTH: u32 = 34;
const LINK_BOX_HEIGHT: u32 = 12;
const LINK_MARKER: &str = "LINK?";

/// Glyph cell of the text font
const GLYPH_WIDTH: i32 = 6;
const GLYPH_HEIGHT: i32 = 10;

/// Largest distance the readout shows
const MAX_DISTANCE_M: f32 = 999.9;
/// Largest press count the readout shows
const MAX_PRESSES: u32 = 999;
/// Temperature readout range, whole degrees
const TEMPERATURE_RANGE_C: (f32, f32) = (-99.0, 99.0);

/// Draw one complete frame
pub fn render_frame<S: DisplaySurface>(
    surface: &mut S,
    frame: &RadarFrame<'_>,
) -> Result<(), DisplayError> {
    surface.clear()?;
    draw_radar(surface, frame)?;
    draw_header(surface, frame)?;
    draw_status(surface, &frame.status)?;
    draw_indicator(surface, &frame.indicator)?;

    if frame.link_stale {
        surface.rect(LINK_BOX_AT, LINK_BOX_WIDTH, LINK_BOX_HEIGHT)?;
        surface.text(Point::new(LINK_BOX_AT.x + 2, LINK_BOX_AT.y + 1), LINK_MARKER)?;
    }

    Ok(())
}

fn draw_radar<S: DisplaySurface>(
    surface: &mut S,
    frame: &RadarFrame<'_>,
) -> Result<(), DisplayError> {
    let radar = &frame.config.radar;
    let center = radar.center();

    surface.circle(center, u32::from(radar.radius))?;
    surface.set_pixel(center)?;
    surface.line(center, frame.sweep_end)?;

    for detection in frame.detections {
        let at = center.offset(detection.offset_x, detection.offset_y);
        if !inside_inset(center, radar.radius, at) {
            continue;
        }
        draw_dot(surface, at, detection.size)?;
    }

    if let Some(mark) = frame.lock_mark {
        draw_dot(surface, mark, frame.config.lock.mark_size)?;
    }

    Ok(())
}

/// Single pixel for size 1, centered filled square otherwise
fn draw_dot<S: DisplaySurface>(surface: &mut S, at: Point, size: u8) -> Result<(), DisplayError> {
    if size <= 1 {
        return surface.set_pixel(at);
    }
    let half = i32::from(size / 2);
    surface.fill_rect(
        Point::new(at.x - half, at.y - half),
        u32::from(size),
        u32::from(size),
    )
}

/// Check if `at` lies strictly inside the square bounding the radar circle
pub fn inside_inset(center: Point, radius: u16, at: Point) -> bool {
    let radius = i32::from(radius);
    at.x > center.x - radius
        && at.x < center.x + radius
        && at.y > center.y - radius
        && at.y < center.y + radius
}

fn draw_header<S: DisplaySurface>(
    surface: &mut S,
    frame: &RadarFrame<'_>,
) -> Result<(), DisplayError> {
    let mut text: String<16> = String::new();

    let distance = frame.nav.target_distance.min(MAX_DISTANCE_M);
    write!(text, "{:.1}m", distance).map_err(|_| DisplayError::BufferOverflow)?;
    surface.text(DISTANCE_AT, &text)?;

    text.clear();
    write!(text, "F:{}", frame.nav.active_count).map_err(|_| DisplayError::BufferOverflow)?;
    surface.text(COUNT_AT, &text)
}

fn draw_status<S: DisplaySurface>(
    surface: &mut S,
    status: &PanelStatus,
) -> Result<(), DisplayError> {
    let mut text: String<16> = String::new();

    write!(text, "#{}", status.press_count.min(MAX_PRESSES))
        .map_err(|_| DisplayError::BufferOverflow)?;
    surface.text(PRESSES_AT, &text)?;

    // Nothing until the sensor has been read once
    let Some(celsius) = status.temperature_c else {
        return Ok(());
    };
    let (low, high) = TEMPERATURE_RANGE_C;
    // NaN reads as the low bound
    let celsius = celsius.max(low).min(high);
    text.clear();
    write!(text, "{:.0}C", celsius).map_err(|_| DisplayError::BufferOverflow)?;
    surface.text(TEMPERATURE_AT, &text)
}

fn draw_indicator<S: DisplaySurface>(
    surface: &mut S,
    indicator: &NavIndicator,
) -> Result<(), DisplayError> {
    match indicator {
        NavIndicator::Arrow(glyph) => {
            surface.line(glyph.tip, glyph.left)?;
            surface.line(glyph.left, glyph.right)?;
            surface.line(glyph.right, glyph.tip)
        }
        NavIndicator::Placeholder(center) => surface.text(
            Point::new(center.x - GLYPH_WIDTH / 2, center.y - GLYPH_HEIGHT / 2),
            "?",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bathy_core::config::DeviceConfig;
    use bathy_core::radar::ArrowGlyph;
    use bathy_core::{Detection, NavigationState};
    use heapless::Vec;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Pixel(Point),
        Line(Point, Point),
        Circle(Point, u32),
        Fill(Point, u32, u32),
        Rect(Point, u32, u32),
        Text(Point, String<16>),
    }

    /// Surface that records every primitive
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op, 64>,
    }

    impl Recorder {
        fn record(&mut self, op: Op) -> Result<(), DisplayError> {
            self.ops.push(op).map_err(|_| DisplayError::BufferOverflow)
        }

        fn texts(&self) -> impl Iterator<Item = &str> {
            self.ops.iter().filter_map(|op| match op {
                Op::Text(_, text) => Some(text.as_str()),
                _ => None,
            })
        }

        fn lines(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Line(..))).count()
        }
    }

    impl DisplaySurface for Recorder {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.record(Op::Clear)
        }
        fn set_pixel(&mut self, at: Point) -> Result<(), DisplayError> {
            self.record(Op::Pixel(at))
        }
        fn line(&mut self, from: Point, to: Point) -> Result<(), DisplayError> {
            self.record(Op::Line(from, to))
        }
        fn circle(&mut self, center: Point, radius: u32) -> Result<(), DisplayError> {
            self.record(Op::Circle(center, radius))
        }
        fn fill_rect(
            &mut self,
            top_left: Point,
            width: u32,
            height: u32,
        ) -> Result<(), DisplayError> {
            self.record(Op::Fill(top_left, width, height))
        }
        fn rect(&mut self, top_left: Point, width: u32, height: u32) -> Result<(), DisplayError> {
            self.record(Op::Rect(top_left, width, height))
        }
        fn text(&mut self, at: Point, text: &str) -> Result<(), DisplayError> {
            let text = String::try_from(text).map_err(|_| DisplayError::BufferOverflow)?;
            self.record(Op::Text(at, text))
        }
    }

    fn frame<'a>(
        config: &'a DeviceConfig,
        nav: &'a NavigationState,
        detections: &'a [Detection],
        indicator: NavIndicator,
    ) -> RadarFrame<'a> {
        RadarFrame {
            config,
            nav,
            sweep_end: Point::new(62, 32),
            detections,
            lock_mark: None,
            indicator,
            link_stale: false,
            status: PanelStatus::default(),
        }
    }

    #[test]
    fn test_radar_base() {
        let config = DeviceConfig::default();
        let nav = NavigationState::default();
        let mut surface = Recorder::default();

        render_frame(
            &mut surface,
            &frame(&config, &nav, &[], NavIndicator::Placeholder(Point::new(100, 40))),
        )
        .unwrap();

        assert_eq!(surface.ops[0], Op::Clear);
        assert_eq!(surface.ops[1], Op::Circle(Point::new(32, 32), 30));
        assert_eq!(surface.ops[2], Op::Pixel(Point::new(32, 32)));
        assert_eq!(
            surface.ops[3],
            Op::Line(Point::new(32, 32), Point::new(62, 32))
        );
    }

    #[test]
    fn test_detections_are_clipped_to_inset() {
        let config = DeviceConfig::default();
        let nav = NavigationState::default();
        let detections = [
            Detection::new(5, 5, 1, 1),
            Detection::new(-10, 0, 3, 1),
            // On the inset edge: kept by the tracker, not drawn
            Detection::new(30, 0, 1, 1),
        ];
        let mut surface = Recorder::default();

        render_frame(
            &mut surface,
            &frame(&config, &nav, &detections, NavIndicator::Placeholder(Point::new(100, 40))),
        )
        .unwrap();

        assert!(surface.ops.contains(&Op::Pixel(Point::new(37, 37))));
        assert!(surface.ops.contains(&Op::Fill(Point::new(21, 31), 3, 3)));
        assert!(!surface.ops.contains(&Op::Pixel(Point::new(62, 32))));
    }

    #[test]
    fn test_header_text() {
        let config = DeviceConfig::default();
        let nav = NavigationState {
            target_distance: 12.34,
            active_count: 3,
            nav_offset_x: 0,
            nav_offset_y: 0,
        };
        let mut surface = Recorder::default();

        render_frame(
            &mut surface,
            &frame(&config, &nav, &[], NavIndicator::Placeholder(Point::new(100, 40))),
        )
        .unwrap();

        let texts: Vec<&str, 8> = surface.texts().collect();
        assert_eq!(texts.as_slice(), &["12.3m", "F:3", "#0", "?"]);
    }

    #[test]
    fn test_press_count_and_temperature() {
        let config = DeviceConfig::default();
        let nav = NavigationState::default();
        let mut frame = frame(&config, &nav, &[], NavIndicator::Placeholder(Point::new(100, 40)));
        frame.status = PanelStatus {
            press_count: 7,
            temperature_c: Some(26.6),
        };
        let mut surface = Recorder::default();

        render_frame(&mut surface, &frame).unwrap();

        assert!(surface
            .ops
            .contains(&Op::Text(PRESSES_AT, String::try_from("#7").unwrap())));
        assert!(surface
            .ops
            .contains(&Op::Text(TEMPERATURE_AT, String::try_from("27C").unwrap())));

        frame.status = PanelStatus {
            press_count: 12_345,
            temperature_c: Some(-300.0),
        };
        let mut surface = Recorder::default();
        render_frame(&mut surface, &frame).unwrap();
        let texts: Vec<&str, 8> = surface.texts().collect();
        assert!(texts.contains(&"#999"));
        assert!(texts.contains(&"-99C"));
    }

    #[test]
    fn test_huge_distance_is_capped() {
        let config = DeviceConfig::default();
        let nav = NavigationState {
            target_distance: 1.0e30,
            ..Default::default()
        };
        let mut surface = Recorder::default();

        render_frame(
            &mut surface,
            &frame(&config, &nav, &[], NavIndicator::Placeholder(Point::new(100, 40))),
        )
        .unwrap();
        assert_eq!(surface.texts().next(), Some("999.9m"));
    }

    #[test]
    fn test_arrow_replaces_placeholder() {
        let config = DeviceConfig::default();
        let nav = NavigationState {
            active_count: 1,
            ..Default::default()
        };
        let glyph = ArrowGlyph {
            tip: Point::new(112, 40),
            left: Point::new(94, 35),
            right: Point::new(94, 45),
        };
        let mut surface = Recorder::default();

        render_frame(&mut surface, &frame(&config, &nav, &[], NavIndicator::Arrow(glyph))).unwrap();

        // Sweep line plus three arrow edges
        assert_eq!(surface.lines(), 4);
        assert!(surface.ops.contains(&Op::Line(glyph.tip, glyph.left)));
        assert!(surface.texts().all(|t| t != "?"));
    }

    #[test]
    fn test_lock_mark_and_link_marker() {
        let config = DeviceConfig::default();
        let nav = NavigationState::default();
        let mut frame = frame(&config, &nav, &[], NavIndicator::Placeholder(Point::new(100, 40)));
        frame.lock_mark = Some(Point::new(2, 32));
        frame.link_stale = true;
        let mut surface = Recorder::default();

        render_frame(&mut surface, &frame).unwrap();

        assert!(surface.ops.contains(&Op::Fill(Point::new(1, 31), 3, 3)));
        assert!(surface.ops.contains(&Op::Rect(LINK_BOX_AT, 34, 12)));
        assert!(surface.texts().any(|t| t == "LINK?"));
    }
}
