// ============================================================================
// CARD CONFIGURATION
// ============================================================================

// Raw, user-authored card shape and its resolution into immutable
// per-entity and per-corner structs.

use bon::Builder;
use serde::Deserialize;
use tracing::debug;

use crate::corner_info::{CornerInfo, CornerUnit, CornersInfo, MAX_PRECISION};
use crate::error::ConfigError;
use crate::speed_range::{
    resolve_mode, DynamicSpeedRange, SpeedRangeMode, SpeedRangeService, SpeedRangeSources,
    SpeedRangeThreshold,
};
use crate::units::{convert_speed, DirectionLetters, SpeedUnit};

pub const DEFAULT_INPUT_SPEED_UNIT: SpeedUnit = SpeedUnit::Mps;
pub const DEFAULT_OUTPUT_SPEED_UNIT: SpeedUnit = SpeedUnit::Mps;
pub const DEFAULT_TEXT_SIZE: f64 = 40.0;
pub const DEFAULT_STATISTICS_PERIOD: &str = "5minute";
const STATISTICS_PERIODS: [&str; 5] = ["5minute", "hour", "day", "week", "month"];

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

/// Geometry of the rose itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoseLayoutConfig {
    pub rose_diameter: f64,
    pub direction_letter_padding: f64,
}

impl Default for RoseLayoutConfig {
    fn default() -> Self {
        Self {
            rose_diameter: 800.0,
            direction_letter_padding: 10.0,
        }
    }
}

/// Spacing of the speed bars around the rose.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarLayoutConfig {
    pub block_margin_left: f64,
    pub block_margin_right: f64,
    pub block_margin_top: f64,
    pub block_margin_bottom: f64,
    pub speed_label_margin: f64,
    pub multi_bar_spacing: f64,
    pub name_label_margin: f64,
    pub percentage_padding: f64,
}

impl Default for BarLayoutConfig {
    fn default() -> Self {
        Self {
            block_margin_left: 50.0,
            block_margin_right: 0.0,
            block_margin_top: 40.0,
            block_margin_bottom: 0.0,
            speed_label_margin: 10.0,
            multi_bar_spacing: 20.0,
            name_label_margin: 10.0,
            percentage_padding: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rose: RoseLayoutConfig,
    pub bars: BarLayoutConfig,
}

// ============================================================================
// RAW CARD CONFIGURATION
// ============================================================================

/// One entry of `windspeed_entities`. The same shape is used for the
/// card-level defaults every entity inherits from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfigWindSpeedEntity {
    pub entity: Option<String>,
    pub attribute: Option<String>,
    pub name: Option<String>,
    pub use_statistics: Option<bool>,
    pub statistics_period: Option<String>,
    pub render_relative_scale: Option<bool>,
    pub windspeed_bar_full: Option<bool>,
    pub speed_unit: Option<String>,
    pub output_speed_unit: Option<String>,
    pub output_speed_unit_label: Option<String>,
    pub speed_range_beaufort: Option<bool>,
    pub speed_range_step: Option<f64>,
    pub speed_range_max: Option<f64>,
    pub speed_ranges: Option<Vec<SpeedRangeThreshold>>,
    pub dynamic_speed_ranges: Option<Vec<DynamicSpeedRange>>,
    pub current_speed_arrow: Option<bool>,
    pub current_speed_arrow_size: Option<f64>,
    pub current_speed_arrow_location: Option<String>,
    pub bar_label_text_size: Option<f64>,
    pub bar_speed_text_size: Option<f64>,
    pub bar_percentage_text_size: Option<f64>,
    pub speed_compensation_factor: Option<f64>,
    pub speed_compensation_absolute: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfigCornerInfo {
    pub show: Option<bool>,
    pub label: Option<String>,
    pub unit: Option<String>,
    pub color: Option<String>,
    pub label_text_size: Option<f64>,
    pub value_text_size: Option<f64>,
    pub input_unit: Option<String>,
    pub output_unit: Option<String>,
    pub direction_letters: Option<String>,
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfigCornersInfo {
    pub top_left: CardConfigCornerInfo,
    pub top_right: CardConfigCornerInfo,
    pub bottom_left: CardConfigCornerInfo,
    pub bottom_right: CardConfigCornerInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfigDirectionLabels {
    pub cardinal_direction_letters: Option<String>,
    pub text_size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub title: Option<String>,
    pub windspeed_entities: Vec<CardConfigWindSpeedEntity>,
    pub windspeed_bar_location: Option<String>,
    pub direction_labels: CardConfigDirectionLabels,
    pub corner_info: CardConfigCornersInfo,
    pub layout: LayoutConfig,
    /// Card-level keys act as defaults for every wind speed entity.
    #[serde(flatten)]
    pub defaults: CardConfigWindSpeedEntity,
}

// ============================================================================
// RESOLVED CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLocation {
    Right,
    Bottom,
}

impl BarLocation {
    pub fn parse(location: Option<&str>) -> Result<Self, ConfigError> {
        match location.unwrap_or("right") {
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            other => Err(ConfigError::InvalidBarLocation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowLocation {
    Left,
    Right,
    Above,
    Below,
}

impl ArrowLocation {
    /// Vertical bars take `left`/`right`, horizontal bars `above`/`below`.
    pub fn parse(location: Option<&str>, bars: BarLocation) -> Result<Self, ConfigError> {
        let location = location.filter(|l| !l.is_empty());
        match (bars, location) {
            (BarLocation::Right, None) => Ok(Self::Left),
            (BarLocation::Right, Some("left")) => Ok(Self::Left),
            (BarLocation::Right, Some("right")) => Ok(Self::Right),
            (BarLocation::Bottom, None) => Ok(Self::Above),
            (BarLocation::Bottom, Some("above")) => Ok(Self::Above),
            (BarLocation::Bottom, Some("below")) => Ok(Self::Below),
            (BarLocation::Right, Some(other)) => Err(ConfigError::InvalidArrowLocation {
                location: other.to_string(),
                valid: "left or right",
                orientation: "vertical",
            }),
            (BarLocation::Bottom, Some(other)) => Err(ConfigError::InvalidArrowLocation {
                location: other.to_string(),
                valid: "above or below",
                orientation: "horizontal",
            }),
        }
    }
}

/// Fully resolved configuration of one wind speed entity.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct WindSpeedEntityConfig {
    #[builder(into)]
    pub entity: String,
    #[builder(into)]
    pub attribute: Option<String>,
    #[builder(into, default)]
    pub name: String,
    #[builder(default)]
    pub use_statistics: bool,
    #[builder(into, default = DEFAULT_STATISTICS_PERIOD.to_string())]
    pub statistics_period: String,
    #[builder(default = true)]
    pub render_relative_scale: bool,
    #[builder(default = true)]
    pub windspeed_bar_full: bool,
    #[builder(default = DEFAULT_INPUT_SPEED_UNIT)]
    pub input_unit: SpeedUnit,
    #[builder(default = DEFAULT_OUTPUT_SPEED_UNIT)]
    pub output_unit: SpeedUnit,
    #[builder(into)]
    pub output_unit_label: Option<String>,
    #[builder(default = SpeedRangeMode::Beaufort)]
    pub speed_range_mode: SpeedRangeMode,
    #[builder(default)]
    pub current_speed_arrow: bool,
    #[builder(default = 40.0)]
    pub current_speed_arrow_size: f64,
    #[builder(default = ArrowLocation::Left)]
    pub current_speed_arrow_location: ArrowLocation,
    #[builder(default = DEFAULT_TEXT_SIZE)]
    pub bar_label_text_size: f64,
    #[builder(default = DEFAULT_TEXT_SIZE)]
    pub bar_speed_text_size: f64,
    #[builder(default = DEFAULT_TEXT_SIZE)]
    pub bar_percentage_text_size: f64,
    #[builder(default = 1.0)]
    pub compensation_factor: f64,
    #[builder(default = 0.0)]
    pub compensation_absolute: f64,
}

fn check_text_size(field: &'static str, value: Option<f64>) -> Result<f64, ConfigError> {
    match value {
        Some(v) if v.is_nan() || v <= 0.0 => Err(ConfigError::NotPositive { field, value: v }),
        Some(v) => Ok(v),
        None => Ok(DEFAULT_TEXT_SIZE),
    }
}

impl WindSpeedEntityConfig {
    /// Resolves one entity against the card-level defaults.
    pub fn from_config(
        entity: &CardConfigWindSpeedEntity,
        parent: &CardConfigWindSpeedEntity,
        bar_location: BarLocation,
    ) -> Result<Self, ConfigError> {
        let entity_id = entity.entity.clone().unwrap_or_default();

        let input_unit = match entity.speed_unit.as_deref() {
            Some(token) => SpeedUnit::parse_input(token)?,
            None => DEFAULT_INPUT_SPEED_UNIT,
        };
        let output_unit = match entity
            .output_speed_unit
            .as_deref()
            .or(parent.output_speed_unit.as_deref())
        {
            Some(token) => SpeedUnit::parse_output(token)?,
            None => DEFAULT_OUTPUT_SPEED_UNIT,
        };
        let output_unit_label = entity
            .output_speed_unit_label
            .clone()
            .or_else(|| parent.output_speed_unit_label.clone())
            .filter(|label| !label.is_empty());

        let use_statistics = entity.use_statistics.unwrap_or(false);
        let attribute = entity.attribute.clone().filter(|a| !a.is_empty());
        if use_statistics && attribute.is_some() {
            return Err(ConfigError::StatisticsWithAttribute(entity_id));
        }
        let statistics_period = entity
            .statistics_period
            .clone()
            .filter(|p| STATISTICS_PERIODS.contains(&p.as_str()))
            .unwrap_or_else(|| DEFAULT_STATISTICS_PERIOD.to_string());

        let sources = SpeedRangeSources {
            beaufort: entity.speed_range_beaufort.or(parent.speed_range_beaufort),
            step: entity.speed_range_step.or(parent.speed_range_step),
            max: entity.speed_range_max.or(parent.speed_range_max),
            speed_ranges: entity
                .speed_ranges
                .clone()
                .or_else(|| parent.speed_ranges.clone())
                .unwrap_or_default(),
            dynamic_speed_ranges: entity
                .dynamic_speed_ranges
                .clone()
                .or_else(|| parent.dynamic_speed_ranges.clone())
                .unwrap_or_default(),
        };
        let speed_range_mode = resolve_mode(sources)?;

        let current_speed_arrow_location = ArrowLocation::parse(
            entity.current_speed_arrow_location.as_deref(),
            bar_location,
        )?;

        let resolved = Self {
            name: entity.name.clone().unwrap_or_else(|| entity_id.clone()),
            entity: entity_id,
            attribute,
            use_statistics,
            statistics_period,
            render_relative_scale: entity.render_relative_scale.unwrap_or(true),
            windspeed_bar_full: entity
                .windspeed_bar_full
                .or(parent.windspeed_bar_full)
                .unwrap_or(true),
            input_unit,
            output_unit,
            output_unit_label,
            speed_range_mode,
            current_speed_arrow: entity.current_speed_arrow.unwrap_or(false),
            current_speed_arrow_size: entity.current_speed_arrow_size.unwrap_or(40.0),
            current_speed_arrow_location,
            bar_label_text_size: check_text_size("bar_label_text_size", entity.bar_label_text_size)?,
            bar_speed_text_size: check_text_size("bar_speed_text_size", entity.bar_speed_text_size)?,
            bar_percentage_text_size: check_text_size(
                "bar_percentage_text_size",
                entity.bar_percentage_text_size,
            )?,
            compensation_factor: entity.speed_compensation_factor.unwrap_or(1.0),
            compensation_absolute: entity.speed_compensation_absolute.unwrap_or(0.0),
        };
        debug!(entity = %resolved.entity, input = %resolved.input_unit, output = %resolved.output_unit, "resolved windspeed entity");
        Ok(resolved)
    }

    /// Applies `v * factor + offset` to a raw reading.
    pub fn compensate(&self, raw: f64) -> f64 {
        raw * self.compensation_factor + self.compensation_absolute
    }

    /// Compensated reading in the output unit. `None` while the input unit is
    /// still `auto`.
    pub fn to_output_speed(&self, raw: f64) -> Option<f64> {
        convert_speed(self.compensate(raw), self.input_unit, self.output_unit)
    }

    /// Replaces an `auto` input unit with the one the host reports.
    pub fn with_detected_unit(mut self, unit_of_measurement: &str) -> Self {
        if self.input_unit == SpeedUnit::Auto {
            if let Some(unit) = SpeedUnit::from_unit_of_measurement(unit_of_measurement) {
                self.input_unit = unit;
            }
        }
        self
    }

    pub fn output_label(&self) -> &str {
        self.output_unit_label
            .as_deref()
            .unwrap_or_else(|| self.output_unit.label())
    }

    pub fn speed_range_service(&self) -> SpeedRangeService {
        SpeedRangeService::new(self.speed_range_mode.clone(), self.output_unit)
    }
}

/// Letters around the rose.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionLabels {
    pub letters: DirectionLetters,
    pub text_size: f64,
}

impl Default for DirectionLabels {
    fn default() -> Self {
        Self {
            letters: DirectionLetters::default(),
            text_size: 50.0,
        }
    }
}

impl DirectionLabels {
    pub fn from_config(config: &CardConfigDirectionLabels) -> Result<Self, ConfigError> {
        let letters = match config.cardinal_direction_letters.as_deref() {
            Some(letters) => DirectionLetters::parse(letters)?,
            None => DirectionLetters::default(),
        };
        let text_size = match config.text_size {
            Some(size) if size.is_nan() || size <= 0.0 => {
                return Err(ConfigError::NotPositive {
                    field: "direction_labels.text_size",
                    value: size,
                })
            }
            Some(size) => size,
            None => 50.0,
        };
        Ok(Self { letters, text_size })
    }

    /// The four cardinal letters, clockwise from north.
    pub fn cardinals(&self) -> [char; 4] {
        [
            self.letters.north,
            self.letters.east,
            self.letters.south,
            self.letters.west,
        ]
    }
}

fn resolve_corner(
    config: &CardConfigCornerInfo,
    card_letters: &DirectionLetters,
) -> Result<CornerInfo, ConfigError> {
    let parse_unit = |unit: &Option<String>| -> Result<Option<CornerUnit>, ConfigError> {
        unit.as_deref()
            .filter(|u| !u.is_empty())
            .map(CornerUnit::parse)
            .transpose()
    };
    let direction_letters = match config.direction_letters.as_deref() {
        Some(letters) => DirectionLetters::parse(letters)?,
        None => card_letters.clone(),
    };
    let label_text_size = check_text_size("label_text_size", config.label_text_size.or(Some(30.0)))?;
    let value_text_size = check_text_size("value_text_size", config.value_text_size.or(Some(50.0)))?;
    Ok(CornerInfo::builder()
        .show(config.show.unwrap_or(false))
        .maybe_label(config.label.clone().filter(|l| !l.is_empty()))
        .maybe_unit(config.unit.clone().filter(|u| !u.is_empty()))
        .maybe_color(config.color.clone())
        .label_text_size(label_text_size)
        .value_text_size(value_text_size)
        .maybe_input_unit(parse_unit(&config.input_unit)?)
        .maybe_output_unit(parse_unit(&config.output_unit)?)
        .direction_letters(direction_letters)
        .maybe_precision(config.precision.map(|p| p.min(MAX_PRECISION)))
        .build())
}

/// Everything the layout and corner planners need, resolved and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRoseConfig {
    pub entities: Vec<WindSpeedEntityConfig>,
    pub bar_location: BarLocation,
    pub direction_labels: DirectionLabels,
    pub corners: CornersInfo,
    pub layout: LayoutConfig,
}

impl CardConfig {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn resolve(&self) -> Result<WindRoseConfig, ConfigError> {
        if self.windspeed_entities.is_empty() {
            return Err(ConfigError::NoWindSpeedEntities);
        }
        let bar_location = BarLocation::parse(self.windspeed_bar_location.as_deref())?;
        let entities = self
            .windspeed_entities
            .iter()
            .map(|entity| WindSpeedEntityConfig::from_config(entity, &self.defaults, bar_location))
            .collect::<Result<Vec<_>, _>>()?;
        let direction_labels = DirectionLabels::from_config(&self.direction_labels)?;
        let letters = &direction_labels.letters;
        let corners = CornersInfo {
            top_left: resolve_corner(&self.corner_info.top_left, letters)?,
            top_right: resolve_corner(&self.corner_info.top_right, letters)?,
            bottom_left: resolve_corner(&self.corner_info.bottom_left, letters)?,
            bottom_right: resolve_corner(&self.corner_info.bottom_right, letters)?,
        };
        Ok(WindRoseConfig {
            entities,
            bar_location,
            direction_labels,
            corners,
            layout: self.layout.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed_range::SpeedRange;

    fn entity(id: &str) -> CardConfigWindSpeedEntity {
        CardConfigWindSpeedEntity {
            entity: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_entity_defaults() {
        let resolved =
            WindSpeedEntityConfig::from_config(&entity("sensor.wind"), &Default::default(), BarLocation::Right)
                .unwrap();
        assert_eq!(resolved.name, "sensor.wind");
        assert_eq!(resolved.input_unit, SpeedUnit::Mps);
        assert_eq!(resolved.speed_range_mode, SpeedRangeMode::Beaufort);
        assert_eq!(resolved.bar_percentage_text_size, 40.0);
        assert_eq!(resolved.current_speed_arrow_location, ArrowLocation::Left);
        assert!(resolved.windspeed_bar_full);
        assert_eq!(resolved.output_label(), "m/s");
    }

    #[test]
    fn test_entity_inherits_from_parent() {
        let parent = CardConfigWindSpeedEntity {
            output_speed_unit: Some("kph".into()),
            speed_range_step: Some(5.0),
            speed_range_max: Some(30.0),
            windspeed_bar_full: Some(false),
            ..Default::default()
        };
        let resolved =
            WindSpeedEntityConfig::from_config(&entity("sensor.wind"), &parent, BarLocation::Right).unwrap();
        assert_eq!(resolved.output_unit, SpeedUnit::Kph);
        assert!(!resolved.windspeed_bar_full);
        assert_eq!(
            resolved.speed_range_mode,
            SpeedRangeMode::SteppedMax { step: 5.0, max: 30.0 }
        );
    }

    #[test]
    fn test_entity_override_conflicts_with_inherited_mode() {
        let parent = CardConfigWindSpeedEntity {
            speed_range_step: Some(5.0),
            speed_range_max: Some(30.0),
            ..Default::default()
        };
        let child = CardConfigWindSpeedEntity {
            speed_ranges: Some(vec![SpeedRangeThreshold {
                from_value: 0.0,
                color: "blue".into(),
            }]),
            ..entity("sensor.gust")
        };
        assert_eq!(
            WindSpeedEntityConfig::from_config(&child, &parent, BarLocation::Right),
            Err(ConfigError::ConflictingSpeedRangeModes)
        );
    }

    #[test]
    fn test_explicit_beaufort_rejects_any_override() {
        let child = CardConfigWindSpeedEntity {
            speed_range_beaufort: Some(true),
            speed_range_step: Some(1.0),
            speed_range_max: Some(12.0),
            ..entity("sensor.wind")
        };
        assert_eq!(
            WindSpeedEntityConfig::from_config(&child, &Default::default(), BarLocation::Right),
            Err(ConfigError::BeaufortWithOverrides)
        );
    }

    #[test]
    fn test_invalid_units_and_locations() {
        let bad_unit = CardConfigWindSpeedEntity {
            speed_unit: Some("lightyears".into()),
            ..entity("sensor.wind")
        };
        assert!(matches!(
            WindSpeedEntityConfig::from_config(&bad_unit, &Default::default(), BarLocation::Right),
            Err(ConfigError::InvalidSpeedUnit { .. })
        ));
        let bft_output = CardConfigWindSpeedEntity {
            output_speed_unit: Some("bft".into()),
            ..entity("sensor.wind")
        };
        assert!(WindSpeedEntityConfig::from_config(&bft_output, &Default::default(), BarLocation::Right).is_err());

        let arrow = CardConfigWindSpeedEntity {
            current_speed_arrow_location: Some("above".into()),
            ..entity("sensor.wind")
        };
        assert!(matches!(
            WindSpeedEntityConfig::from_config(&arrow, &Default::default(), BarLocation::Right),
            Err(ConfigError::InvalidArrowLocation { .. })
        ));
        let resolved =
            WindSpeedEntityConfig::from_config(&arrow, &Default::default(), BarLocation::Bottom).unwrap();
        assert_eq!(resolved.current_speed_arrow_location, ArrowLocation::Above);
    }

    #[test]
    fn test_statistics_with_attribute_rejected() {
        let child = CardConfigWindSpeedEntity {
            use_statistics: Some(true),
            attribute: Some("wind_speed".into()),
            ..entity("weather.home")
        };
        assert_eq!(
            WindSpeedEntityConfig::from_config(&child, &Default::default(), BarLocation::Right),
            Err(ConfigError::StatisticsWithAttribute("weather.home".into()))
        );
    }

    #[test]
    fn test_compensation_before_conversion() {
        let config = WindSpeedEntityConfig::builder()
            .entity("sensor.wind")
            .output_unit(SpeedUnit::Kph)
            .compensation_factor(2.0)
            .compensation_absolute(1.0)
            .build();
        let kph = config.to_output_speed(2.0).unwrap();
        assert!((kph - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_unit_detection() {
        let config = WindSpeedEntityConfig::builder()
            .entity("sensor.wind")
            .input_unit(SpeedUnit::Auto)
            .build();
        assert_eq!(config.to_output_speed(3.0), None);
        let detected = config.with_detected_unit("km/h");
        assert_eq!(detected.input_unit, SpeedUnit::Kph);
    }

    #[test]
    fn test_card_from_yaml() {
        let yaml = r#"
windspeed_bar_location: right
output_speed_unit: knots
speed_ranges:
  - from_value: 0
    color: white
  - from_value: 10
    color: orange
windspeed_entities:
  - entity: sensor.wind_speed
    name: Wind
  - entity: sensor.gust
    bar_label_text_size: 30
corner_info:
  top_left:
    show: true
    label: Direction
    input_unit: degrees
    output_unit: letters
"#;
        let card = CardConfig::from_yaml(yaml).unwrap();
        let resolved = card.resolve().unwrap();
        assert_eq!(resolved.entities.len(), 2);
        assert_eq!(resolved.entities[1].bar_label_text_size, 30.0);
        assert_eq!(resolved.entities[0].output_unit, SpeedUnit::Knots);
        let ranges = resolved.entities[0].speed_range_service().speed_ranges(None);
        assert_eq!(ranges[1], SpeedRange::new(1, 10.0, -1.0, "orange"));
        assert!(resolved.corners.top_left.show);
        assert_eq!(resolved.corners.top_left.input_unit, Some(CornerUnit::Degrees));
    }

    #[test]
    fn test_corner_precision_clamped() {
        let yaml = r#"
windspeed_entities:
  - entity: sensor.wind_speed
corner_info:
  top_right:
    show: true
    precision: 400
  bottom_right:
    precision: 2
"#;
        let resolved = CardConfig::from_yaml(yaml).unwrap().resolve().unwrap();
        assert_eq!(resolved.corners.top_right.precision, Some(MAX_PRECISION));
        assert_eq!(resolved.corners.bottom_right.precision, Some(2));
    }

    #[test]
    fn test_card_without_entities_rejected() {
        assert_eq!(CardConfig::default().resolve(), Err(ConfigError::NoWindSpeedEntities));
    }
}
