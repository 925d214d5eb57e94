//! Sonar update lines
//!
//! Line format:
//! - `S:` prefix
//! - header: `dist,count` or `dist,count,navx,navy`
//! - `|` separator
//! - body: `OUT`, or `:`-separated entries of `x,y[,size[,rank]]`

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prefix every sonar line starts with
pub const LINE_PREFIX: &str = "S:";

/// Body marker for "no targets in range"
pub const OUT_MARKER: &str = "OUT";

/// Maximum detections kept from one line
pub const MAX_DETECTIONS: usize = 16;

/// Raw detection set carried by one update
pub type Detections = Vec<Detection, MAX_DETECTIONS>;

/// A single sonar contact, relative to the radar center in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// Horizontal offset (positive = right)
    pub offset_x: i16,
    /// Vertical offset (positive = down)
    pub offset_y: i16,
    /// Rendered dot diameter (>= 1)
    pub size: u8,
    /// Proximity/strength class (>= 1)
    pub rank: u8,
}

impl Detection {
    /// Create a detection with explicit size and rank
    pub const fn new(offset_x: i16, offset_y: i16, size: u8, rank: u8) -> Self {
        Self {
            offset_x,
            offset_y,
            size,
            rank,
        }
    }

    /// Squared distance from the radar center
    pub fn distance_sq(&self) -> u32 {
        let x = u32::from(self.offset_x.unsigned_abs());
        let y = u32::from(self.offset_y.unsigned_abs());
        x * x + y * y
    }
}

/// Navigation summary sent with every update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationState {
    /// Distance to the most relevant target in meters
    pub target_distance: f32,
    /// Number of fish still active
    pub active_count: u16,
    /// Direction vector to the most relevant target
    pub nav_offset_x: i16,
    pub nav_offset_y: i16,
}

impl NavigationState {
    /// Returns true if the arrow should be drawn
    pub fn has_targets(&self) -> bool {
        self.active_count > 0
    }
}

/// Header-level rejection; the whole line is discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line does not start with `S:`
    MissingPrefix,
    /// No `|` between header and body
    MissingBody,
    /// Header has neither 2 nor 4 fields
    HeaderArity,
    /// Distance is not a finite, non-negative decimal
    InvalidDistance,
    /// Count is not an unsigned integer
    InvalidCount,
    /// Nav offset is not a signed integer
    InvalidNavOffset,
    /// Line bytes are not valid UTF-8
    InvalidUtf8,
}

/// Entry-level rejection; only that entry is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryError {
    /// Entry has fewer than 2 or more than 4 fields
    Arity,
    /// Coordinate is not a signed 16-bit integer
    InvalidCoordinate,
    /// Size is not an integer in 1..=255
    InvalidSize,
    /// Rank is not an integer in 1..=255
    InvalidRank,
}

/// One successfully decoded line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SonarUpdate {
    /// Navigation state replacing the previous one
    pub nav: NavigationState,
    /// Raw detections replacing the previous set
    pub detections: Detections,
    /// Entries dropped as malformed or over capacity
    pub skipped: u8,
}

/// Decode one line from the companion
///
/// `previous` supplies the nav offset when the header omits it. On error
/// nothing is returned, so the caller's state stays untouched.
pub fn decode_line(line: &str, previous: &NavigationState) -> Result<SonarUpdate, LineError> {
    let line = line.trim();
    let rest = line
        .strip_prefix(LINE_PREFIX)
        .ok_or(LineError::MissingPrefix)?;
    let (header, body) = rest.split_once('|').ok_or(LineError::MissingBody)?;

    let nav = parse_header(header, previous)?;

    let body = body.trim();
    let (detections, skipped) = if body == OUT_MARKER || body.is_empty() {
        (Detections::new(), 0)
    } else {
        parse_body(body)
    };

    Ok(SonarUpdate {
        nav,
        detections,
        skipped,
    })
}

/// Parse `dist,count[,navx,navy]`
fn parse_header(header: &str, previous: &NavigationState) -> Result<NavigationState, LineError> {
    let mut fields: Vec<&str, 4> = Vec::new();
    for field in header.split(',') {
        fields
            .push(field.trim())
            .map_err(|_| LineError::HeaderArity)?;
    }

    let (dist, count, offset) = match fields.as_slice() {
        [dist, count] => (*dist, *count, None),
        [dist, count, x, y] => (*dist, *count, Some((*x, *y))),
        _ => return Err(LineError::HeaderArity),
    };

    let target_distance: f32 = dist.parse().map_err(|_| LineError::InvalidDistance)?;
    if !target_distance.is_finite() || target_distance < 0.0 {
        return Err(LineError::InvalidDistance);
    }

    let active_count: u16 = count.parse().map_err(|_| LineError::InvalidCount)?;

    let (nav_offset_x, nav_offset_y) = match offset {
        Some((x, y)) => (
            x.parse().map_err(|_| LineError::InvalidNavOffset)?,
            y.parse().map_err(|_| LineError::InvalidNavOffset)?,
        ),
        None => (previous.nav_offset_x, previous.nav_offset_y),
    };

    Ok(NavigationState {
        target_distance,
        active_count,
        nav_offset_x,
        nav_offset_y,
    })
}

/// Parse every entry, keeping the valid ones in order
fn parse_body(body: &str) -> (Detections, u8) {
    body.split(':').map(parse_entry).fold(
        (Detections::new(), 0u8),
        |(mut detections, mut skipped), entry| {
            match entry {
                Ok(detection) => {
                    if detections.push(detection).is_err() {
                        skipped = skipped.saturating_add(1);
                    }
                }
                Err(_) => skipped = skipped.saturating_add(1),
            }
            (detections, skipped)
        },
    )
}

/// Parse one `x,y[,size[,rank]]` entry
///
/// Missing size and rank default to 1.
pub fn parse_entry(entry: &str) -> Result<Detection, EntryError> {
    let mut fields: Vec<&str, 4> = Vec::new();
    for field in entry.split(',') {
        fields.push(field.trim()).map_err(|_| EntryError::Arity)?;
    }

    let (x, y, size, rank) = match fields.as_slice() {
        [x, y] => (*x, *y, None, None),
        [x, y, size] => (*x, *y, Some(*size), None),
        [x, y, size, rank] => (*x, *y, Some(*size), Some(*rank)),
        _ => return Err(EntryError::Arity),
    };

    let offset_x = x.parse().map_err(|_| EntryError::InvalidCoordinate)?;
    let offset_y = y.parse().map_err(|_| EntryError::InvalidCoordinate)?;
    let size = parse_class(size, EntryError::InvalidSize)?;
    let rank = parse_class(rank, EntryError::InvalidRank)?;

    Ok(Detection {
        offset_x,
        offset_y,
        size,
        rank,
    })
}

/// Parse an optional field that must be at least 1
fn parse_class(field: Option<&str>, error: EntryError) -> Result<u8, EntryError> {
    match field {
        None => Ok(1),
        Some(text) => match text.parse::<u8>() {
            Ok(0) | Err(_) => Err(error),
            Ok(value) => Ok(value),
        },
    }
}
