use tracing::debug;

use super::{
    check_counts, checked_measure, speed_label_length, stacked_offsets, BarSpaces,
    DimensionCalculator, RectCoordinates, RoseDimensions, ViewBox, WIDEST_PERCENTAGE,
};
use crate::config::{BarLayoutConfig, WindSpeedEntityConfig};
use crate::error::LayoutError;
use crate::measure::TextMeasure;
use crate::speed_range::SpeedRange;

/// Vertical bars placed left to right beside the rose.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRight {
    rose: RoseDimensions,
    layout: BarLayoutConfig,
    bar_height: f64,
    bar_start_y: f64,
    spaces: BarSpaces,
    start_xs: Vec<f64>,
}

impl BarRight {
    pub fn new(
        rose: RoseDimensions,
        entities: &[WindSpeedEntityConfig],
        ranges: &[Vec<SpeedRange>],
        layout: &BarLayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Result<Self, LayoutError> {
        check_counts(entities, ranges)?;

        let bar_height = rose.diameter + rose.direction_letter_margin;
        let bar_start_y = rose.margin_top + rose.direction_letter_margin + bar_height;

        let mut spaces = BarSpaces {
            widths: Vec::with_capacity(entities.len()),
            name_label_space: Vec::with_capacity(entities.len()),
            speed_label_space: Vec::with_capacity(entities.len()),
        };
        for (entity, entity_ranges) in entities.iter().zip(ranges) {
            let percentage = checked_measure(measure, WIDEST_PERCENTAGE, entity.bar_percentage_text_size)?;
            spaces.widths.push(percentage + layout.percentage_padding);
            spaces.name_label_space.push(entity.bar_label_text_size);
            spaces
                .speed_label_space
                .push(speed_label_length(measure, entity_ranges, entity.bar_speed_text_size)?);
        }

        let first = rose.complete_width + layout.block_margin_left;
        let start_xs = stacked_offsets(&spaces, first, layout);
        debug!(widths = ?spaces.widths, start_xs = ?start_xs, "bars right of rose");

        Ok(Self {
            rose,
            layout: layout.clone(),
            bar_height,
            bar_start_y,
            spaces,
            start_xs,
        })
    }

    pub fn bar_widths(&self) -> &[f64] {
        &self.spaces.widths
    }

    pub fn bar_name_label_space(&self) -> &[f64] {
        &self.spaces.name_label_space
    }

    pub fn bar_speed_label_space(&self) -> &[f64] {
        &self.spaces.speed_label_space
    }
}

impl DimensionCalculator for BarRight {
    fn rose(&self) -> &RoseDimensions {
        &self.rose
    }

    fn bar_count(&self) -> usize {
        self.start_xs.len()
    }

    fn bar_start(&self) -> f64 {
        self.bar_start_y
    }

    fn bar_length(&self) -> f64 {
        self.bar_height
    }

    fn bar_width(&self, index: usize) -> f64 {
        self.spaces.widths[index]
    }

    fn bar_height(&self, _index: usize) -> f64 {
        self.bar_height
    }

    fn bar_start_x(&self, index: usize) -> f64 {
        self.start_xs[index]
    }

    fn bar_start_y(&self, _index: usize) -> f64 {
        self.bar_start_y
    }

    fn bar_label_x(&self, index: usize) -> f64 {
        self.bar_start_x(index) - self.layout.name_label_margin
    }

    fn bar_label_y(&self, _index: usize) -> f64 {
        0.0
    }

    fn bar_speed_label_x(&self, index: usize) -> f64 {
        self.bar_start_x(index) + self.spaces.widths[index] + self.layout.speed_label_margin
    }

    fn bar_speed_label_y(&self, index: usize) -> f64 {
        self.bar_start_y(index)
    }

    fn bar_perc_label_x(&self, index: usize) -> f64 {
        self.bar_start_x(index) + self.bar_width(index) / 2.0
    }

    /// Percentages follow each segment vertically, there is no fixed row.
    fn bar_perc_label_y(&self, _index: usize) -> Option<f64> {
        None
    }

    fn touch_face_bar(&self, index: usize) -> RectCoordinates {
        let name_space = self.spaces.name_label_space[index];
        RectCoordinates::new(
            self.bar_start_x(index) - name_space,
            0.0,
            name_space
                + self.spaces.widths[index]
                + self.layout.speed_label_margin
                + self.spaces.speed_label_space[index],
            self.bar_start_y,
        )
    }

    fn view_box(&self) -> ViewBox {
        let last = self.bar_count() - 1;
        let width = self.bar_speed_label_x(last)
            + self.spaces.speed_label_space[last]
            + self.layout.block_margin_right;
        ViewBox {
            width,
            height: self.rose.complete_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DirectionLabels, RoseLayoutConfig};
    use crate::corner_info::CornersInfo;
    use crate::measure::FixedAdvance;
    use crate::speed_range::stepped_ranges;

    fn rose(measure: &dyn TextMeasure) -> RoseDimensions {
        RoseDimensions::new(
            &DirectionLabels::default(),
            &CornersInfo::default(),
            &RoseLayoutConfig::default(),
            measure,
        )
        .unwrap()
    }

    fn entity(label_size: f64) -> WindSpeedEntityConfig {
        WindSpeedEntityConfig::builder()
            .entity("sensor.wind")
            .bar_label_text_size(label_size)
            .build()
    }

    #[test]
    fn test_bar_width_from_percentage_measurement() {
        let measure = |text: &str, size: f64| if text == "99%" && size == 40.0 { 34.0 } else { 10.0 };
        let calc = BarRight::new(
            rose(&measure),
            &[entity(40.0)],
            &[stepped_ranges(5.0, 20.0)],
            &BarLayoutConfig::default(),
            &measure,
        )
        .unwrap();
        assert_eq!(calc.bar_widths(), &[40.0]);
        assert_eq!(calc.bar_width(0), 40.0);
    }

    #[test]
    fn test_running_bar_offsets() {
        let measure = FixedAdvance { ratio: 0.5 };
        let layout = BarLayoutConfig::default();
        let ranges = vec![stepped_ranges(5.0, 20.0), stepped_ranges(2.0, 10.0)];
        let calc = BarRight::new(rose(&measure), &[entity(40.0), entity(30.0)], &ranges, &layout, &measure)
            .unwrap();

        // "99%" at 40 → 60 + 6; widest speed label "20"/"10" at 40 → 40
        assert_eq!(calc.bar_widths(), &[66.0, 66.0]);
        assert_eq!(calc.bar_speed_label_space(), &[40.0, 40.0]);
        let first = calc.rose().complete_width + 50.0 + 40.0;
        assert_eq!(calc.bar_start_x(0), first);
        assert_eq!(calc.bar_start_x(1), first + 66.0 + 10.0 + 40.0 + 20.0 + 30.0);
        assert_eq!(calc.bar_label_x(1), calc.bar_start_x(1) - 10.0);
        assert_eq!(calc.bar_perc_label_x(0), first + 33.0);
        assert_eq!(calc.bar_perc_label_y(0), None);

        let view_box = calc.view_box();
        assert_eq!(view_box.width, calc.bar_speed_label_x(1) + 40.0);
        assert_eq!(view_box.height, calc.rose().complete_height);
    }

    #[test]
    fn test_touch_faces_do_not_overlap() {
        let measure = FixedAdvance::default();
        let ranges = vec![stepped_ranges(5.0, 20.0), stepped_ranges(5.0, 100.0)];
        let calc = BarRight::new(
            rose(&measure),
            &[entity(40.0), entity(60.0)],
            &ranges,
            &BarLayoutConfig::default(),
            &measure,
        )
        .unwrap();
        let a = calc.touch_face_bar(0);
        let b = calc.touch_face_bar(1);
        assert!(!a.overlaps(&b));
        assert_eq!(b.x - a.right(), 20.0);
        assert_eq!(a.height, calc.bar_start_y(0));
    }

    #[test]
    fn test_mismatched_bucket_lists_rejected() {
        let measure = FixedAdvance::default();
        let result = BarRight::new(
            rose(&measure),
            &[entity(40.0)],
            &[],
            &BarLayoutConfig::default(),
            &measure,
        );
        assert!(result.is_err());
    }
}
