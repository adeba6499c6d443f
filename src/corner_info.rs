// ============================================================================
// CORNER INFO
// ============================================================================

use bon::Builder;
use tracing::warn;

use crate::dimensions::{Coordinate, DimensionCalculator};
use crate::error::ConfigError;
use crate::scene::{DrawCommand, Layer, Scene};
use crate::state::{EntityState, StateValue};
use crate::units::{convert_speed, DirectionLetters, SpeedUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerUnit {
    Degrees,
    Letters,
    Speed(SpeedUnit),
}

impl CornerUnit {
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        match token {
            "degrees" => Ok(Self::Degrees),
            "letters" => Ok(Self::Letters),
            other => other
                .parse::<SpeedUnit>()
                .ok()
                .filter(|unit| *unit != SpeedUnit::Auto)
                .map(Self::Speed)
                .ok_or_else(|| ConfigError::InvalidCornerUnit(other.to_string())),
        }
    }
}

/// Configuration of one corner readout.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct CornerInfo {
    #[builder(default)]
    pub show: bool,
    #[builder(into)]
    pub label: Option<String>,
    /// Suffix appended to the value.
    #[builder(into)]
    pub unit: Option<String>,
    #[builder(into, default = "black".to_string())]
    pub color: String,
    #[builder(default = 30.0)]
    pub label_text_size: f64,
    #[builder(default = 50.0)]
    pub value_text_size: f64,
    pub input_unit: Option<CornerUnit>,
    pub output_unit: Option<CornerUnit>,
    #[builder(default)]
    pub direction_letters: DirectionLetters,
    pub precision: Option<u32>,
}

impl Default for CornerInfo {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CornersInfo {
    pub top_left: CornerInfo,
    pub top_right: CornerInfo,
    pub bottom_left: CornerInfo,
    pub bottom_right: CornerInfo,
}

impl CornersInfo {
    pub fn get(&self, position: CornerPosition) -> &CornerInfo {
        match position {
            CornerPosition::TopLeft => &self.top_left,
            CornerPosition::TopRight => &self.top_right,
            CornerPosition::BottomLeft => &self.bottom_left,
            CornerPosition::BottomRight => &self.bottom_right,
        }
    }
}

/// Corners in the order their entity states arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerPosition {
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    pub const fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    const fn class_suffix(self) -> &'static str {
        match self {
            Self::TopLeft => "left-top",
            Self::TopRight => "right-top",
            Self::BottomLeft => "left-bottom",
            Self::BottomRight => "right-bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Hanging,
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAttributes {
    pub color: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    pub class: String,
}

impl TextAttributes {
    fn corner(position: CornerPosition, kind: &str, color: &str, font_size: f64) -> Self {
        Self {
            color: color.to_string(),
            font_size,
            anchor: if position.is_left() { TextAnchor::Start } else { TextAnchor::End },
            baseline: if position.is_top() { Baseline::Hanging } else { Baseline::Auto },
            class: format!("corner-{kind}-{}", position.class_suffix()),
        }
    }
}

// ============================================================================
// CONVERTERS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    Identity,
    DegreesToLetters(DirectionLetters),
    LettersToDegrees(DirectionLetters),
    SpeedUnitConvert { from: SpeedUnit, to: SpeedUnit },
}

impl Converter {
    /// Picks the conversion for a corner's unit pair. Unknown pairs fall back
    /// to identity.
    pub fn for_corner(info: &CornerInfo) -> Self {
        match (info.input_unit, info.output_unit) {
            (Some(CornerUnit::Degrees), Some(CornerUnit::Letters)) => {
                Self::DegreesToLetters(info.direction_letters.clone())
            }
            (Some(CornerUnit::Letters), Some(CornerUnit::Degrees)) => {
                Self::LettersToDegrees(info.direction_letters.clone())
            }
            (Some(CornerUnit::Speed(from)), Some(CornerUnit::Speed(to))) if from != to => {
                Self::SpeedUnitConvert { from, to }
            }
            (Some(input), Some(output)) if input != output => {
                warn!(?input, ?output, "no converter for corner unit pair, showing raw value");
                Self::Identity
            }
            _ => Self::Identity,
        }
    }

    pub fn apply(&self, value: &StateValue) -> StateValue {
        match self {
            Self::Identity => value.clone(),
            Self::DegreesToLetters(letters) => match value.as_number() {
                Some(degrees) => StateValue::Text(letters.degrees_to_letters(degrees)),
                None => value.clone(),
            },
            Self::LettersToDegrees(letters) => match value {
                StateValue::Text(text) => letters
                    .letters_to_degrees(text)
                    .map_or_else(|| value.clone(), StateValue::Number),
                StateValue::Number(_) => value.clone(),
            },
            Self::SpeedUnitConvert { from, to } => value
                .as_number()
                .and_then(|speed| convert_speed(speed, *from, *to))
                .map_or_else(|| value.clone(), StateValue::Number),
        }
    }
}

/// Largest precision a corner keeps; beyond it `10^precision` stops being exact.
pub const MAX_PRECISION: u32 = 15;

/// Rounds half up (towards +∞) and never yields `-0`.
fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    ((value * factor) + 0.5).floor() / factor + 0.0
}

/// Display string for one corner value: converted, rounded when both the
/// value and the precision are numeric, then suffixed with the unit.
pub fn corner_text(state: &EntityState, info: &CornerInfo, converter: &Converter) -> String {
    let converted = converter.apply(&state.state);
    let mut text = match (converted.as_number(), info.precision) {
        (Some(number), Some(precision)) => round(number, precision).to_string(),
        _ => converted.to_string(),
    };
    if let Some(unit) = &info.unit {
        text.push_str(unit);
    }
    text
}

// ============================================================================
// PLANNER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CornerText {
    pub position: CornerPosition,
    pub coordinate: Coordinate,
    pub text: String,
    pub attributes: TextAttributes,
}

#[derive(Debug, Clone, PartialEq)]
struct PlannedCorner {
    position: CornerPosition,
    info: CornerInfo,
    converter: Converter,
    label_coordinate: Coordinate,
    value_coordinate: Coordinate,
}

/// Turns corner configuration plus live states into positioned text.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerInfoPlanner {
    corners: Vec<PlannedCorner>,
}

impl CornerInfoPlanner {
    pub fn new(corners: &CornersInfo, dimensions: &dyn DimensionCalculator) -> Self {
        let corners = CornerPosition::ALL
            .iter()
            .map(|&position| {
                let info = corners.get(position).clone();
                PlannedCorner {
                    position,
                    converter: Converter::for_corner(&info),
                    label_coordinate: dimensions.info_corner_label(position),
                    value_coordinate: dimensions.info_corner_value(position),
                    info,
                }
            })
            .collect();
        Self { corners }
    }

    pub fn converter(&self, position: CornerPosition) -> &Converter {
        &self.corners[position.index()].converter
    }

    /// Static labels; they do not change between updates.
    pub fn labels(&self) -> Vec<CornerText> {
        self.corners
            .iter()
            .filter_map(|corner| {
                let label = corner.info.label.as_ref()?;
                Some(CornerText {
                    position: corner.position,
                    coordinate: corner.label_coordinate,
                    text: label.clone(),
                    attributes: TextAttributes::corner(
                        corner.position,
                        "label",
                        &corner.info.color,
                        corner.info.label_text_size,
                    ),
                })
            })
            .collect()
    }

    /// Values for one update. `states` is indexed like [`CornerPosition::ALL`];
    /// missing or inactive states produce nothing for their corner.
    pub fn values(&self, states: &[EntityState]) -> Vec<CornerText> {
        self.corners
            .iter()
            .filter(|corner| corner.info.show)
            .filter_map(|corner| {
                let state = states.get(corner.position.index()).filter(|s| s.active)?;
                Some(CornerText {
                    position: corner.position,
                    coordinate: corner.value_coordinate,
                    text: corner_text(state, &corner.info, &corner.converter),
                    attributes: TextAttributes::corner(
                        corner.position,
                        "value",
                        &corner.info.color,
                        corner.info.value_text_size,
                    ),
                })
            })
            .collect()
    }

    pub fn draw_labels(&self, scene: &mut Scene) {
        for label in self.labels() {
            scene.retire(Layer::CornerLabel(label.position));
            scene.add(Layer::CornerLabel(label.position), DrawCommand::from(label));
        }
    }

    /// Retires every corner value drawn before, then adds the new ones.
    pub fn draw_values(&self, scene: &mut Scene, states: &[EntityState]) {
        for position in CornerPosition::ALL {
            scene.retire(Layer::CornerValue(position));
        }
        for value in self.values(states) {
            scene.add(Layer::CornerValue(value.position), DrawCommand::from(value));
        }
    }
}
