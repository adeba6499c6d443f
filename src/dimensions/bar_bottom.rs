use tracing::debug;

use super::{
    check_counts, speed_label_length, stacked_offsets, BarSpaces,
    DimensionCalculator, RectCoordinates, RoseDimensions, ViewBox,
};
use crate::config::{BarLayoutConfig, WindSpeedEntityConfig};
use crate::error::LayoutError;
use crate::measure::TextMeasure;
use crate::speed_range::SpeedRange;

/// Horizontal bars stacked top to bottom below the rose. Each bar has its
/// name label above it and its speed labels below it.
#[derive(Debug, Clone, PartialEq)]
pub struct BarBottom {
    rose: RoseDimensions,
    layout: BarLayoutConfig,
    bar_left: f64,
    bar_length: f64,
    spaces: BarSpaces,
    /// Widest speed label per bar; the label at the bar's end may overhang it.
    speed_label_widths: Vec<f64>,
    start_ys: Vec<f64>,
}

impl BarBottom {
    pub fn new(
        rose: RoseDimensions,
        entities: &[WindSpeedEntityConfig],
        ranges: &[Vec<SpeedRange>],
        layout: &BarLayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Result<Self, LayoutError> {
        check_counts(entities, ranges)?;

        let bar_length = rose.diameter;
        let bar_left = rose.center.x - bar_length / 2.0;

        let mut spaces = BarSpaces {
            widths: Vec::with_capacity(entities.len()),
            name_label_space: Vec::with_capacity(entities.len()),
            speed_label_space: Vec::with_capacity(entities.len()),
        };
        let mut speed_label_widths = Vec::with_capacity(entities.len());
        for (entity, entity_ranges) in entities.iter().zip(ranges) {
            spaces
                .widths
                .push(entity.bar_percentage_text_size + layout.percentage_padding);
            spaces.name_label_space.push(entity.bar_label_text_size);
            spaces.speed_label_space.push(entity.bar_speed_text_size);
            speed_label_widths.push(speed_label_length(measure, entity_ranges, entity.bar_speed_text_size)?);
        }

        let first = rose.complete_height + layout.block_margin_top;
        let start_ys = stacked_offsets(&spaces, first, layout);
        debug!(heights = ?spaces.widths, start_ys = ?start_ys, "bars below rose");

        Ok(Self {
            rose,
            layout: layout.clone(),
            bar_left,
            bar_length,
            spaces,
            speed_label_widths,
            start_ys,
        })
    }
}

impl DimensionCalculator for BarBottom {
    fn rose(&self) -> &RoseDimensions {
        &self.rose
    }

    fn bar_count(&self) -> usize {
        self.start_ys.len()
    }

    fn bar_start(&self) -> f64 {
        self.bar_left
    }

    fn bar_length(&self) -> f64 {
        self.bar_length
    }

    fn bar_width(&self, _index: usize) -> f64 {
        self.bar_length
    }

    fn bar_height(&self, index: usize) -> f64 {
        self.spaces.widths[index]
    }

    fn bar_start_x(&self, _index: usize) -> f64 {
        self.bar_left
    }

    fn bar_start_y(&self, index: usize) -> f64 {
        self.start_ys[index]
    }

    fn bar_label_x(&self, _index: usize) -> f64 {
        self.bar_left
    }

    fn bar_label_y(&self, index: usize) -> f64 {
        self.bar_start_y(index) - self.layout.name_label_margin
    }

    fn bar_speed_label_x(&self, _index: usize) -> f64 {
        self.bar_left
    }

    fn bar_speed_label_y(&self, index: usize) -> f64 {
        self.bar_start_y(index) + self.spaces.widths[index] + self.layout.speed_label_margin
    }

    fn bar_perc_label_x(&self, _index: usize) -> f64 {
        self.bar_left + self.bar_length / 2.0
    }

    fn bar_perc_label_y(&self, index: usize) -> Option<f64> {
        Some(self.bar_start_y(index) + self.spaces.widths[index] / 2.0)
    }

    fn touch_face_bar(&self, index: usize) -> RectCoordinates {
        let name_space = self.spaces.name_label_space[index];
        RectCoordinates::new(
            self.bar_left,
            self.bar_start_y(index) - name_space,
            self.bar_length,
            name_space
                + self.spaces.widths[index]
                + self.layout.speed_label_margin
                + self.spaces.speed_label_space[index],
        )
    }

    fn view_box(&self) -> ViewBox {
        let last = self.bar_count() - 1;
        let widest_label = self
            .speed_label_widths
            .iter()
            .fold(0.0_f64, |widest, width| widest.max(*width));
        let width = self
            .rose
            .complete_width
            .max(self.bar_left + self.bar_length + widest_label)
            + self.layout.block_margin_right;
        let height = self.bar_speed_label_y(last)
            + self.spaces.speed_label_space[last]
            + self.layout.block_margin_bottom;
        ViewBox { width, height }
    }
}
