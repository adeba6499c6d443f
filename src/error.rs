use thiserror::Error;

/// Configuration problems, raised while resolving the card configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("speed_range_step, speed_range_max, speed_ranges or dynamic_speed_ranges should not be set when using speed_range_beaufort. Beaufort uses fixed speed ranges.")]
    BeaufortWithOverrides,
    #[error("speed_range_step/max, speed_ranges and dynamic_speed_ranges should not be configured next to each other.")]
    ConflictingSpeedRangeModes,
    #[error("speed_range_step and speed_range_max should both be set, step: {step:?}, max: {max:?}")]
    IncompleteStepMax { step: Option<f64>, max: Option<f64> },
    #[error("invalid {field}, should be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("speed range step {step} and max {max} would generate more than {limit} buckets")]
    TooManySpeedRanges { step: f64, max: f64, limit: usize },
    #[error("first dynamic speed config average_above should be 0, got {0}")]
    MissingDynamicFloor(f64),
    #[error("dynamic speed ranges average_above should not be negative, got {0}")]
    NegativeAverageAbove(f64),
    #[error("invalid windspeed unit configured: {unit}. Valid options: {valid}")]
    InvalidSpeedUnit { unit: String, valid: &'static str },
    #[error("invalid corner unit configured: {0}. Valid options: degrees, letters, mps, bft, fps, kph, mph, knots")]
    InvalidCornerUnit(String),
    #[error("invalid windspeed_bar_location: {0}. Valid options: right, bottom")]
    InvalidBarLocation(String),
    #[error("current speed arrow location can only be {valid} when speedbars are displayed {orientation}, got {location}")]
    InvalidArrowLocation {
        location: String,
        valid: &'static str,
        orientation: &'static str,
    },
    #[error("statistics not supported for attribute values (entity {0})")]
    StatisticsWithAttribute(String),
    #[error("invalid direction letters {0:?}, expected 5 characters for north, east, south, west and unknown")]
    InvalidDirectionLetters(String),
    #[error("no windspeed entities configured")]
    NoWindSpeedEntities,
}

/// Raised while building a calculator. Reaching one of these means an
/// upstream validation gap, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("failed to parse wind forecast: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse card configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
