// ============================================================================
// DIMENSIONS
// ============================================================================

// Layout of the rose, the speed bars and the corner readouts. A calculator is
// built once per configuration or bucket change; afterwards every accessor is
// a pure function of the stored numbers.

mod bar_bottom;
mod bar_right;
mod rose;

use std::fmt;

pub use bar_bottom::BarBottom;
pub use bar_right::BarRight;
pub use rose::RoseDimensions;

use crate::config::{BarLayoutConfig, BarLocation, WindSpeedEntityConfig};
use crate::corner_info::CornerPosition;
use crate::error::LayoutError;
use crate::measure::TextMeasure;
use crate::speed_range::SpeedRange;

/// Text used to reserve room for the widest percentage label.
pub const WIDEST_PERCENTAGE: &str = "99%";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectCoordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectCoordinates {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the interiors intersect; touching edges do not count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Canvas bounding box, displayed as `"0 0 W H"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0 0 {} {}", self.width, self.height)
    }
}

/// Coordinates of everything drawn around the rose.
///
/// Per-bar accessors take the bar's position index. Orientations that keep
/// a value constant across bars ignore the index.
pub trait DimensionCalculator {
    fn rose(&self) -> &RoseDimensions;

    fn bar_count(&self) -> usize;

    /// Start of the bars along their growth axis.
    fn bar_start(&self) -> f64;
    /// Length of the bars along their growth axis.
    fn bar_length(&self) -> f64;
    fn bar_width(&self, index: usize) -> f64;
    fn bar_height(&self, index: usize) -> f64;
    fn bar_start_x(&self, index: usize) -> f64;
    fn bar_start_y(&self, index: usize) -> f64;
    fn bar_label_x(&self, index: usize) -> f64;
    fn bar_label_y(&self, index: usize) -> f64;
    fn bar_speed_label_x(&self, index: usize) -> f64;
    fn bar_speed_label_y(&self, index: usize) -> f64;
    fn bar_perc_label_x(&self, index: usize) -> f64;
    /// `None` when the orientation has no fixed percentage label row.
    fn bar_perc_label_y(&self, index: usize) -> Option<f64>;
    /// Hoverable region of a bar, from its name label through its speed labels.
    fn touch_face_bar(&self, index: usize) -> RectCoordinates;
    fn view_box(&self) -> ViewBox;

    fn rose_diameter(&self) -> f64 {
        self.rose().diameter
    }

    fn rose_center(&self) -> Coordinate {
        self.rose().center
    }

    fn direction_letter_margin(&self) -> f64 {
        self.rose().direction_letter_margin
    }

    fn info_corner_value(&self, position: CornerPosition) -> Coordinate {
        self.rose().corner_value(position)
    }

    fn info_corner_label(&self, position: CornerPosition) -> Coordinate {
        self.rose().corner_label(position)
    }
}

/// Width or size reserved for each bar, shared by both orientations.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BarSpaces {
    pub widths: Vec<f64>,
    pub name_label_space: Vec<f64>,
    pub speed_label_space: Vec<f64>,
}

pub(crate) fn checked_measure(
    measure: &dyn TextMeasure,
    text: &str,
    font_size: f64,
) -> Result<f64, LayoutError> {
    let width = measure.measure(text, font_size);
    if width.is_nan() || width < 0.0 {
        return Err(LayoutError::InvariantViolation(format!(
            "measured width {width} for {text:?} at size {font_size}"
        )));
    }
    Ok(width)
}

/// Widest lower bound label across a bucket list.
pub(crate) fn speed_label_length(
    measure: &dyn TextMeasure,
    ranges: &[SpeedRange],
    font_size: f64,
) -> Result<f64, LayoutError> {
    ranges.iter().try_fold(0.0_f64, |widest, range| {
        let width = checked_measure(measure, &range.min_speed.to_string(), font_size)?;
        Ok(widest.max(width))
    })
}

pub(crate) fn check_counts(
    entities: &[WindSpeedEntityConfig],
    ranges: &[Vec<SpeedRange>],
) -> Result<(), LayoutError> {
    if entities.is_empty() {
        return Err(LayoutError::InvariantViolation("no windspeed entities to lay out".into()));
    }
    if entities.len() != ranges.len() {
        return Err(LayoutError::InvariantViolation(format!(
            "{} entities but {} bucket lists",
            entities.len(),
            ranges.len()
        )));
    }
    Ok(())
}

/// Running offsets along the stacking axis: each bar advances past the
/// previous bar, its speed labels, the spacing and the next name label.
pub(crate) fn stacked_offsets(spaces: &BarSpaces, first: f64, layout: &BarLayoutConfig) -> Vec<f64> {
    let mut offset = first + spaces.name_label_space[0];
    let mut offsets = Vec::with_capacity(spaces.widths.len());
    for index in 0..spaces.widths.len() {
        offsets.push(offset);
        if let Some(next_name) = spaces.name_label_space.get(index + 1) {
            offset += spaces.widths[index]
                + layout.speed_label_margin
                + spaces.speed_label_space[index]
                + layout.multi_bar_spacing
                + next_name;
        }
    }
    offsets
}

/// Builds the calculator for the configured bar orientation.
pub fn build_calculator(
    bar_location: BarLocation,
    rose: RoseDimensions,
    entities: &[WindSpeedEntityConfig],
    ranges: &[Vec<SpeedRange>],
    layout: &BarLayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<Box<dyn DimensionCalculator>, LayoutError> {
    Ok(match bar_location {
        BarLocation::Right => Box::new(BarRight::new(rose, entities, ranges, layout, measure)?),
        BarLocation::Bottom => Box::new(BarBottom::new(rose, entities, ranges, layout, measure)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_box_display() {
        let view_box = ViewBox {
            width: 1234.5,
            height: 900.0,
        };
        assert_eq!(view_box.to_string(), "0 0 1234.5 900");
    }

    #[test]
    fn test_rect_overlap() {
        let a = RectCoordinates::new(0.0, 0.0, 10.0, 10.0);
        let b = RectCoordinates::new(10.0, 0.0, 10.0, 10.0);
        let c = RectCoordinates::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_negative_measurement_rejected() {
        let broken = |_: &str, _: f64| -1.0;
        assert!(checked_measure(&broken, "99%", 40.0).is_err());
    }
}
