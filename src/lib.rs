// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod corner_info;
pub mod dimensions;
pub mod error;
pub mod forecast;
pub mod measure;
pub mod scene;
pub mod speed_range;
pub mod state;
pub mod units;

use tracing::debug;

pub use config::{BarLocation, CardConfig, WindRoseConfig, WindSpeedEntityConfig};
pub use corner_info::{CornerInfo, CornerInfoPlanner, CornerPosition, CornersInfo};
pub use dimensions::{Coordinate, DimensionCalculator, RectCoordinates, ViewBox};
pub use error::{ConfigError, Error, LayoutError, Result};
pub use measure::{FixedAdvance, FontMeasure, TextMeasure};
pub use scene::{DrawCommand, Layer, Scene};
pub use speed_range::{SpeedRange, SpeedRangeMode, SpeedRangeService};
pub use state::{EntityState, StateValue};
pub use units::SpeedUnit;

use corner_info::{Baseline, TextAnchor, TextAttributes};
use dimensions::{build_calculator, RoseDimensions};

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for generated bucket colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// `hue` in degrees, `saturation` and `lightness` in `0..=1`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hue = hue.rem_euclid(360.0);
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = lightness - chroma / 2.0;
        let (r, g, b) = match hue {
            h if h < 60.0 => (chroma, x, 0.0),
            h if h < 120.0 => (x, chroma, 0.0),
            h if h < 180.0 => (0.0, chroma, x),
            h if h < 240.0 => (0.0, x, chroma),
            h if h < 300.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Evenly spaced hue from blue (first) to red (last).
    pub fn gradient(index: usize, count: usize) -> Self {
        let hue = if count <= 1 {
            240.0
        } else {
            240.0 * (1.0 - index.min(count - 1) as f64 / (count - 1) as f64)
        };
        Self::from_hsl(hue, 1.0, 0.5)
    }

    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Resolved card plus everything derived from it for one render pass.
#[derive(Debug, Clone)]
pub struct WindRose {
    config: WindRoseConfig,
    services: Vec<SpeedRangeService>,
}

/// Output of [`WindRose::frame`]: geometry and the retained draw list.
pub struct RoseFrame {
    pub view_box: ViewBox,
    pub ranges: Vec<Vec<SpeedRange>>,
    pub dimensions: Box<dyn DimensionCalculator>,
    pub planner: CornerInfoPlanner,
    pub scene: Scene,
}

impl RoseFrame {
    /// Replaces the corner values with the ones for `states`.
    pub fn update_corners(&mut self, states: &[EntityState]) {
        self.planner.draw_values(&mut self.scene, states);
    }
}

impl WindRose {
    pub fn new(config: WindRoseConfig) -> Self {
        let services = config
            .entities
            .iter()
            .map(WindSpeedEntityConfig::speed_range_service)
            .collect();
        Self { config, services }
    }

    pub fn from_card(card: &CardConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(card.resolve()?))
    }

    /// Parses and resolves a card configuration document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let card = CardConfig::from_yaml(text)?;
        Ok(Self::from_card(&card)?)
    }

    pub fn config(&self) -> &WindRoseConfig {
        &self.config
    }

    /// True when any entity's buckets depend on its rolling average, so a
    /// new average may require a new layout.
    pub fn has_dynamic_ranges(&self) -> bool {
        self.services.iter().any(|service| service.mode().is_dynamic())
    }

    /// Bucket list per entity. `averages` is indexed like the entities;
    /// missing entries count as no average.
    pub fn speed_ranges(&self, averages: &[Option<f64>]) -> Vec<Vec<SpeedRange>> {
        self.services
            .iter()
            .enumerate()
            .map(|(index, service)| service.speed_ranges(averages.get(index).copied().flatten()))
            .collect()
    }

    pub fn layout(
        &self,
        measure: &dyn TextMeasure,
        ranges: &[Vec<SpeedRange>],
    ) -> std::result::Result<Box<dyn DimensionCalculator>, LayoutError> {
        let rose = RoseDimensions::new(
            &self.config.direction_labels,
            &self.config.corners,
            &self.config.layout.rose,
            measure,
        )?;
        build_calculator(
            self.config.bar_location,
            rose,
            &self.config.entities,
            ranges,
            &self.config.layout.bars,
            measure,
        )
    }

    pub fn corner_planner(&self, dimensions: &dyn DimensionCalculator) -> CornerInfoPlanner {
        CornerInfoPlanner::new(&self.config.corners, dimensions)
    }

    /// Lays out the rose for the given averages and fills a scene with the
    /// bar names, touch faces and corner texts.
    pub fn frame(
        &self,
        measure: &dyn TextMeasure,
        averages: &[Option<f64>],
        corner_states: &[EntityState],
    ) -> std::result::Result<RoseFrame, LayoutError> {
        let ranges = self.speed_ranges(averages);
        let dimensions = self.layout(measure, &ranges)?;
        let planner = self.corner_planner(dimensions.as_ref());

        let mut scene = Scene::new();
        for (index, entity) in self.config.entities.iter().enumerate() {
            scene.add(
                Layer::BarLabel(index),
                DrawCommand::Text {
                    coordinate: Coordinate::new(dimensions.bar_label_x(index), dimensions.bar_label_y(index)),
                    text: entity.name.clone(),
                    attributes: bar_label_attributes(self.config.bar_location, entity.bar_label_text_size),
                },
            );
            scene.add(
                Layer::TouchFace(index),
                DrawCommand::TouchFace {
                    bar: index,
                    rect: dimensions.touch_face_bar(index),
                },
            );
        }
        planner.draw_labels(&mut scene);
        planner.draw_values(&mut scene, corner_states);

        let view_box = dimensions.view_box();
        debug!(%view_box, bars = dimensions.bar_count(), commands = scene.len(), "rose frame");
        Ok(RoseFrame {
            view_box,
            ranges,
            dimensions,
            planner,
            scene,
        })
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn bar_label_attributes(location: BarLocation, font_size: f64) -> TextAttributes {
    // Right-side names are rotated and read bottom-up from the bar's base.
    let (anchor, class) = match location {
        BarLocation::Right => (TextAnchor::End, "bar-label-vertical"),
        BarLocation::Bottom => (TextAnchor::Start, "bar-label-horizontal"),
    };
    TextAttributes {
        color: "black".to_string(),
        font_size,
        anchor,
        baseline: Baseline::Auto,
        class: class.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(yaml: &str) -> WindRose {
        WindRose::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_from_yaml_errors() {
        assert!(matches!(WindRose::from_yaml("windspeed_entities: 3"), Err(Error::Yaml(_))));
        assert!(matches!(
            WindRose::from_yaml("windspeed_entities: []"),
            Err(Error::Config(ConfigError::NoWindSpeedEntities))
        ));
    }

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(Color::gradient(0, 5), Color::new(0, 0, 255));
        assert_eq!(Color::gradient(4, 5), Color::new(255, 0, 0));
        assert_eq!(Color::gradient(0, 1), Color::new(0, 0, 255));
        assert_eq!(Color::new(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_dynamic_ranges_follow_average() {
        let rose = card(
            r#"
windspeed_entities:
  - entity: sensor.wind
    dynamic_speed_ranges:
      - average_above: 0
        step: 2
        max: 10
      - average_above: 10
        step: 5
        max: 30
"#,
        );
        assert!(rose.has_dynamic_ranges());
        let calm = rose.speed_ranges(&[Some(3.0)]);
        let windy = rose.speed_ranges(&[Some(12.0)]);
        assert_eq!(calm[0].len(), 6);
        assert_eq!(windy[0].len(), 7);
        assert_eq!(windy[0][6].min_speed, 30.0);
        assert_eq!(rose.speed_ranges(&[])[0], calm[0]);
    }

    #[test]
    fn test_frame_redraws_corner_values() {
        let rose = card(
            r#"
windspeed_entities:
  - entity: sensor.wind
    name: Wind
corner_info:
  top_left:
    show: true
    label: Direction
    input_unit: degrees
    output_unit: letters
"#,
        );
        let mut frame = rose
            .frame(&FixedAdvance::default(), &[None], &[EntityState::active(90.0)])
            .unwrap();
        assert_eq!(frame.view_box, frame.dimensions.view_box());
        assert_eq!(frame.scene.layer(Layer::CornerLabel(CornerPosition::TopLeft)).count(), 1);
        assert_eq!(frame.scene.layer(Layer::BarLabel(0)).count(), 1);

        frame.update_corners(&[EntityState::active(180.0)]);
        let values: Vec<_> = frame
            .scene
            .layer(Layer::CornerValue(CornerPosition::TopLeft))
            .collect();
        assert_eq!(values.len(), 1);
        assert!(matches!(values[0], DrawCommand::Text { text, .. } if text == "S"));

        frame.update_corners(&[EntityState::inactive()]);
        assert_eq!(frame.scene.layer(Layer::CornerValue(CornerPosition::TopLeft)).count(), 0);
    }
}
