use tracing::trace;

use super::{checked_measure, Coordinate};
use crate::config::{DirectionLabels, RoseLayoutConfig};
use crate::corner_info::{CornerInfo, CornerPosition, CornersInfo};
use crate::error::LayoutError;
use crate::measure::TextMeasure;

/// Geometry of the rose and the corner readouts around it. The bar
/// calculators place their content relative to these numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct RoseDimensions {
    pub diameter: f64,
    pub direction_letter_margin: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub complete_width: f64,
    pub complete_height: f64,
    pub center: Coordinate,
    label_heights: [f64; 4],
    value_heights: [f64; 4],
}

/// Vertical space a corner takes: its label line plus its value line.
fn corner_heights(info: &CornerInfo) -> (f64, f64) {
    let label = if info.label.is_some() { info.label_text_size } else { 0.0 };
    let value = if info.show { info.value_text_size } else { 0.0 };
    (label, value)
}

impl RoseDimensions {
    pub fn new(
        direction_labels: &DirectionLabels,
        corners: &CornersInfo,
        layout: &RoseLayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Result<Self, LayoutError> {
        let widest_letter = direction_labels
            .cardinals()
            .iter()
            .try_fold(0.0_f64, |widest, letter| {
                let width = checked_measure(measure, &letter.to_string(), direction_labels.text_size)?;
                Ok::<_, LayoutError>(widest.max(width))
            })?;
        let direction_letter_margin =
            widest_letter.max(direction_labels.text_size) + layout.direction_letter_padding;

        let mut label_heights = [0.0; 4];
        let mut value_heights = [0.0; 4];
        for position in CornerPosition::ALL {
            let (label, value) = corner_heights(corners.get(position));
            label_heights[position.index()] = label;
            value_heights[position.index()] = value;
        }
        let total = |position: CornerPosition| label_heights[position.index()] + value_heights[position.index()];
        let margin_top = total(CornerPosition::TopLeft).max(total(CornerPosition::TopRight));
        let margin_bottom = total(CornerPosition::BottomLeft).max(total(CornerPosition::BottomRight));

        let diameter = layout.rose_diameter;
        let complete_width = diameter + 2.0 * direction_letter_margin;
        let complete_height = margin_top + diameter + 2.0 * direction_letter_margin + margin_bottom;
        let center = Coordinate::new(
            direction_letter_margin + diameter / 2.0,
            margin_top + direction_letter_margin + diameter / 2.0,
        );
        trace!(diameter, direction_letter_margin, margin_top, margin_bottom, "rose dimensions");

        Ok(Self {
            diameter,
            direction_letter_margin,
            margin_top,
            margin_bottom,
            complete_width,
            complete_height,
            center,
            label_heights,
            value_heights,
        })
    }

    fn corner_x(&self, position: CornerPosition) -> f64 {
        if position.is_left() {
            0.0
        } else {
            self.complete_width
        }
    }

    /// Top corners hang below their label; bottom corners sit on the canvas edge.
    pub fn corner_value(&self, position: CornerPosition) -> Coordinate {
        let y = if position.is_top() {
            self.label_heights[position.index()]
        } else {
            self.complete_height
        };
        Coordinate::new(self.corner_x(position), y)
    }

    pub fn corner_label(&self, position: CornerPosition) -> Coordinate {
        let y = if position.is_top() {
            0.0
        } else {
            self.complete_height - self.value_heights[position.index()]
        };
        Coordinate::new(self.corner_x(position), y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedAdvance;

    #[test]
    fn test_rose_without_corners() {
        let rose = RoseDimensions::new(
            &DirectionLabels::default(),
            &CornersInfo::default(),
            &RoseLayoutConfig::default(),
            &FixedAdvance::default(),
        )
        .unwrap();
        assert_eq!(rose.direction_letter_margin, 60.0);
        assert_eq!(rose.margin_top, 0.0);
        assert_eq!(rose.complete_width, 920.0);
        assert_eq!(rose.complete_height, 920.0);
        assert_eq!(rose.center, Coordinate::new(460.0, 460.0));
    }

    #[test]
    fn test_corner_coordinates() {
        let corners = CornersInfo {
            top_left: CornerInfo::builder().show(true).label("Dir").build(),
            bottom_right: CornerInfo::builder().show(true).value_text_size(40.0).build(),
            ..Default::default()
        };
        let rose = RoseDimensions::new(
            &DirectionLabels::default(),
            &corners,
            &RoseLayoutConfig::default(),
            &FixedAdvance::default(),
        )
        .unwrap();
        assert_eq!(rose.margin_top, 80.0);
        assert_eq!(rose.margin_bottom, 40.0);
        assert_eq!(rose.complete_height, 80.0 + 800.0 + 120.0 + 40.0);
        assert_eq!(rose.corner_label(CornerPosition::TopLeft), Coordinate::new(0.0, 0.0));
        assert_eq!(rose.corner_value(CornerPosition::TopLeft), Coordinate::new(0.0, 30.0));
        assert_eq!(
            rose.corner_value(CornerPosition::BottomRight),
            Coordinate::new(920.0, 1040.0)
        );
        assert_eq!(
            rose.corner_label(CornerPosition::BottomRight),
            Coordinate::new(920.0, 1000.0)
        );
    }
}
